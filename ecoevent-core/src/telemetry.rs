//! Fill level, status tier, and fill-time prediction for smart bins.
//!
//! Every derivation is a pure function of a [`Bin`] snapshot and the evaluation
//! time. Nothing is cached; callers recompute on every read.

use chrono::{DateTime, Utc};

use crate::model::{Bin, MaintenanceAction};

/// Fill percentage above which a bin is critical and raises a near-full alert.
pub const CRITICAL_THRESHOLD: f64 = 80.0;
/// Fill percentage above which a bin is in the warning tier.
pub const WARNING_THRESHOLD: f64 = 50.0;
/// Days without maintenance after which a bin needs attention.
pub const MAINTENANCE_INTERVAL_DAYS: i64 = 7;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
/// Telemetry snapshots that cannot be evaluated.
pub enum TelemetryError {
    /// Capacity is zero, negative, or not a finite number.
    #[error("Invalid bin configuration: capacity {capacity} liters")]
    InvalidBinConfiguration {
        /// Reported capacity.
        capacity: f64,
    },
    /// Fill level is negative, not finite, or above capacity.
    #[error("Fill level {level} liters is outside 0..={capacity} liters")]
    LevelOutOfRange {
        /// Reported fill level.
        level: f64,
        /// Reported capacity.
        capacity: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Traffic-light classification of a fill percentage.
pub enum StatusTier {
    /// At most half full.
    Nominal,
    /// More than half full.
    Warning,
    /// More than 80 % full.
    Critical,
}

impl StatusTier {
    /// Classify a fill percentage. Exactly 50 and exactly 80 fall into the lower tier.
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > CRITICAL_THRESHOLD {
            StatusTier::Critical
        } else if percentage > WARNING_THRESHOLD {
            StatusTier::Warning
        } else {
            StatusTier::Nominal
        }
    }

    /// Lowercase label used in the dashboard.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StatusTier::Nominal => "nominal",
            StatusTier::Warning => "warning",
            StatusTier::Critical => "critical",
        }
    }
}

/// Reject snapshots whose numbers would produce `NaN` or infinities downstream.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidBinConfiguration`] for a non-positive capacity and
/// [`TelemetryError::LevelOutOfRange`] when the level is outside `0..=capacity`.
pub fn validate(bin: &Bin) -> Result<(), TelemetryError> {
    if !bin.capacity.is_finite() || bin.capacity <= 0.0 {
        return Err(TelemetryError::InvalidBinConfiguration {
            capacity: bin.capacity,
        });
    }
    if !bin.current_level.is_finite() || bin.current_level < 0.0 || bin.current_level > bin.capacity
    {
        return Err(TelemetryError::LevelOutOfRange {
            level: bin.current_level,
            capacity: bin.capacity,
        });
    }
    Ok(())
}

/// Current level as a percentage of capacity.
///
/// # Errors
///
/// Returns a [`TelemetryError`] when the snapshot fails [`validate`].
pub fn fill_percentage(bin: &Bin) -> Result<f64, TelemetryError> {
    validate(bin)?;
    Ok(bin.current_level / bin.capacity * 100.0)
}

/// Whether the bin is full enough to notify staff.
///
/// # Errors
///
/// Returns a [`TelemetryError`] when the snapshot fails [`validate`].
pub fn needs_near_full_alert(bin: &Bin) -> Result<bool, TelemetryError> {
    Ok(fill_percentage(bin)? > CRITICAL_THRESHOLD)
}

/// Hours elapsed since the bin was last emptied. Negative if `last_emptied` lies in the future.
#[must_use]
pub fn hours_since_emptied(bin: &Bin, now: DateTime<Utc>) -> f64 {
    (now - bin.last_emptied).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Average liters per hour since the bin was last emptied, if positive.
///
/// # Errors
///
/// Returns a [`TelemetryError`] when the snapshot fails [`validate`].
pub fn fill_rate(bin: &Bin, now: DateTime<Utc>) -> Result<Option<f64>, TelemetryError> {
    validate(bin)?;
    let elapsed = hours_since_emptied(bin, now);
    if elapsed <= 0.0 {
        return Ok(None);
    }
    let rate = bin.current_level / elapsed;
    Ok((rate > 0.0).then_some(rate))
}

/// Linear extrapolation of the hours left until the bin is full.
///
/// Assumes the average fill rate since the last emptying stays constant. Yields
/// `None` when that rate is not positive, including for an empty bin.
///
/// # Errors
///
/// Returns a [`TelemetryError`] when the snapshot fails [`validate`].
pub fn predicted_hours_to_full(bin: &Bin, now: DateTime<Utc>) -> Result<Option<f64>, TelemetryError> {
    let Some(rate) = fill_rate(bin, now)? else {
        return Ok(None);
    };
    Ok(Some((bin.capacity - bin.current_level) / rate))
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Everything the status view shows about a bin at one point in time.
pub struct BinReading {
    /// Fill level in percent.
    pub percentage: f64,
    /// Traffic-light tier.
    pub tier: StatusTier,
    /// Predicted hours until full, if a prediction exists.
    pub hours_to_full: Option<f64>,
    /// Whether a near-full notification should be raised.
    pub near_full: bool,
}

impl BinReading {
    /// Evaluate a bin snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`TelemetryError`] when the snapshot fails [`validate`].
    pub fn evaluate(bin: &Bin, now: DateTime<Utc>) -> Result<Self, TelemetryError> {
        let percentage = fill_percentage(bin)?;
        Ok(Self {
            percentage,
            tier: StatusTier::from_percentage(percentage),
            hours_to_full: predicted_hours_to_full(bin, now)?,
            near_full: percentage > CRITICAL_THRESHOLD,
        })
    }

    /// Prediction rounded up to whole hours, e.g. "12 hours until full".
    /// A bin that is already full gets no label.
    #[must_use]
    pub fn prediction_label(&self) -> Option<String> {
        self.hours_to_full
            .filter(|hours| *hours > 0.0)
            .map(|hours| format!("{:.0} hours until full", hours.ceil()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Maintenance due status derived from the latest maintenance record.
pub struct MaintenanceStatus {
    /// Whole days since the latest record.
    pub days_since: i64,
    /// True when more than [`MAINTENANCE_INTERVAL_DAYS`] whole days have passed.
    pub needs_maintenance: bool,
}

/// Maintenance status from the most recent record, or `None` without any history.
#[must_use]
pub fn maintenance_status(bin: &Bin, now: DateTime<Utc>) -> Option<MaintenanceStatus> {
    let latest = bin
        .maintenance_history
        .iter()
        .max_by_key(|record| record.timestamp)?;
    let days_since = (now - latest.timestamp).num_days();
    Some(MaintenanceStatus {
        days_since,
        needs_maintenance: days_since > MAINTENANCE_INTERVAL_DAYS,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Figures for the analytics tab.
pub struct BinAnalytics {
    /// Hours since the bin was last emptied.
    pub hours_since_emptied: f64,
    /// Average liters per hour since then.
    pub fill_rate_lph: Option<f64>,
    /// Number of `Emptied` entries in the maintenance log.
    pub emptied_count: usize,
    /// Mean hours between consecutive `Emptied` entries.
    pub mean_hours_between_emptied: Option<f64>,
}

impl BinAnalytics {
    /// Evaluate analytics for a bin snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`TelemetryError`] when the snapshot fails [`validate`].
    pub fn evaluate(bin: &Bin, now: DateTime<Utc>) -> Result<Self, TelemetryError> {
        let mut emptied: Vec<DateTime<Utc>> = bin
            .maintenance_history
            .iter()
            .filter(|record| record.action == MaintenanceAction::Emptied)
            .map(|record| record.timestamp)
            .collect();
        emptied.sort_unstable();

        let intervals: Vec<f64> = emptied
            .windows(2)
            .filter_map(|pair| match pair {
                [earlier, later] => {
                    Some((*later - *earlier).num_milliseconds() as f64 / MILLIS_PER_HOUR)
                }
                _ => None,
            })
            .collect();
        let mean_hours_between_emptied = (!intervals.is_empty())
            .then(|| intervals.iter().sum::<f64>() / intervals.len() as f64);

        Ok(Self {
            hours_since_emptied: hours_since_emptied(bin, now),
            fill_rate_lph: fill_rate(bin, now)?,
            emptied_count: emptied.len(),
            mean_hours_between_emptied,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::model::{BinCategory, BinId, MaintenanceRecord};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
    }

    fn bin(level: f64, capacity: f64, hours_ago: i64) -> Bin {
        Bin {
            id: BinId(String::from("bin-1")),
            location: String::from("Main Entrance"),
            category: BinCategory::Recyclable,
            current_level: level,
            capacity,
            last_emptied: now() - Duration::hours(hours_ago),
            sensor_id: None,
            maintenance_history: Vec::new(),
        }
    }

    fn record(days_ago: i64, action: MaintenanceAction) -> MaintenanceRecord {
        MaintenanceRecord {
            timestamp: now() - Duration::days(days_ago),
            action,
            notes: None,
        }
    }

    fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn percentage_is_level_over_capacity() {
        let pct = fill_percentage(&bin(30.0, 100.0, 10)).unwrap();
        assert!(close(pct, 30.0));
        let pct = fill_percentage(&bin(0.0, 240.0, 10)).unwrap();
        assert!(close(pct, 0.0));
    }

    #[test]
    fn tier_boundaries_fall_into_lower_tier() {
        assert_eq!(StatusTier::from_percentage(80.0), StatusTier::Warning);
        assert_eq!(StatusTier::from_percentage(80.01), StatusTier::Critical);
        assert_eq!(StatusTier::from_percentage(50.0), StatusTier::Nominal);
        assert_eq!(StatusTier::from_percentage(50.01), StatusTier::Warning);
        assert_eq!(StatusTier::from_percentage(0.0), StatusTier::Nominal);

        let reading = BinReading::evaluate(&bin(80.0, 100.0, 10), now()).unwrap();
        assert_eq!(reading.tier, StatusTier::Warning);
        assert!(!reading.near_full);
    }

    #[test]
    fn near_full_alert_above_eighty_percent() {
        assert!(needs_near_full_alert(&bin(81.0, 100.0, 10)).unwrap());
        assert!(!needs_near_full_alert(&bin(80.0, 100.0, 10)).unwrap());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = fill_percentage(&bin(0.0, 0.0, 10)).unwrap_err();
        assert_eq!(
            err,
            TelemetryError::InvalidBinConfiguration { capacity: 0.0 }
        );
        assert!(BinReading::evaluate(&bin(10.0, 0.0, 10), now()).is_err());
    }

    #[test]
    fn overfull_and_negative_levels_are_rejected() {
        assert!(matches!(
            fill_percentage(&bin(120.0, 100.0, 10)),
            Err(TelemetryError::LevelOutOfRange { .. })
        ));
        assert!(matches!(
            fill_percentage(&bin(-1.0, 100.0, 10)),
            Err(TelemetryError::LevelOutOfRange { .. })
        ));
    }

    #[test]
    fn prediction_extrapolates_average_rate() {
        // 30 liters in 10 hours -> 3 l/h, 70 liters left -> 23.33 hours.
        let hours = predicted_hours_to_full(&bin(30.0, 100.0, 10), now())
            .unwrap()
            .unwrap();
        assert!(close(hours, 70.0 / 3.0));

        let reading = BinReading::evaluate(&bin(30.0, 100.0, 10), now()).unwrap();
        assert_eq!(
            reading.prediction_label().as_deref(),
            Some("24 hours until full")
        );
    }

    #[test]
    fn prediction_absent_for_empty_bin() {
        assert_eq!(
            predicted_hours_to_full(&bin(0.0, 100.0, 10), now()).unwrap(),
            None
        );
        let reading = BinReading::evaluate(&bin(0.0, 100.0, 10), now()).unwrap();
        assert_eq!(reading.prediction_label(), None);
    }

    #[test]
    fn prediction_absent_without_elapsed_time() {
        assert_eq!(
            predicted_hours_to_full(&bin(10.0, 100.0, 0), now()).unwrap(),
            None
        );
        assert_eq!(
            predicted_hours_to_full(&bin(10.0, 100.0, -5), now()).unwrap(),
            None
        );
    }

    #[test]
    fn full_bin_predicts_zero_hours() {
        let hours = predicted_hours_to_full(&bin(100.0, 100.0, 10), now())
            .unwrap()
            .unwrap();
        assert!(close(hours, 0.0));

        let reading = BinReading::evaluate(&bin(100.0, 100.0, 10), now()).unwrap();
        assert_eq!(reading.hours_to_full, Some(0.0));
        assert_eq!(reading.prediction_label(), None);
    }

    #[test]
    fn maintenance_uses_latest_record() {
        let mut snapshot = bin(10.0, 100.0, 10);
        snapshot.maintenance_history = vec![
            record(20, MaintenanceAction::Repaired),
            record(3, MaintenanceAction::Cleaned),
            record(12, MaintenanceAction::Emptied),
        ];
        let status = maintenance_status(&snapshot, now()).unwrap();
        assert_eq!(status.days_since, 3);
        assert!(!status.needs_maintenance);
    }

    #[test]
    fn maintenance_boundary_is_strict() {
        let mut snapshot = bin(10.0, 100.0, 10);
        snapshot.maintenance_history = vec![record(7, MaintenanceAction::Emptied)];
        let status = maintenance_status(&snapshot, now()).unwrap();
        assert_eq!(status.days_since, 7);
        assert!(!status.needs_maintenance);

        snapshot.maintenance_history = vec![record(8, MaintenanceAction::Emptied)];
        assert!(maintenance_status(&snapshot, now()).unwrap().needs_maintenance);
    }

    #[test]
    fn maintenance_unknown_without_history() {
        assert_eq!(maintenance_status(&bin(10.0, 100.0, 10), now()), None);
    }

    #[test]
    fn analytics_average_emptied_interval() {
        let mut snapshot = bin(45.0, 100.0, 15);
        snapshot.maintenance_history = vec![
            record(1, MaintenanceAction::Emptied),
            record(2, MaintenanceAction::Cleaned),
            record(3, MaintenanceAction::Emptied),
            record(5, MaintenanceAction::Emptied),
        ];
        let analytics = BinAnalytics::evaluate(&snapshot, now()).unwrap();
        assert_eq!(analytics.emptied_count, 3);
        assert!(close(analytics.hours_since_emptied, 15.0));
        assert!(close(analytics.fill_rate_lph.unwrap(), 3.0));
        assert!(close(analytics.mean_hours_between_emptied.unwrap(), 48.0));
    }

    #[test]
    fn analytics_without_intervals() {
        let analytics = BinAnalytics::evaluate(&bin(0.0, 100.0, 4), now()).unwrap();
        assert_eq!(analytics.emptied_count, 0);
        assert_eq!(analytics.fill_rate_lph, None);
        assert_eq!(analytics.mean_hours_between_emptied, None);
    }

    #[test]
    fn derivations_are_idempotent() {
        let mut snapshot = bin(65.0, 120.0, 30);
        snapshot.maintenance_history = vec![record(9, MaintenanceAction::Emptied)];
        let first = BinReading::evaluate(&snapshot, now()).unwrap();
        let second = BinReading::evaluate(&snapshot, now()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            maintenance_status(&snapshot, now()),
            maintenance_status(&snapshot, now())
        );
        assert_eq!(
            BinAnalytics::evaluate(&snapshot, now()).unwrap(),
            BinAnalytics::evaluate(&snapshot, now()).unwrap()
        );
    }
}
