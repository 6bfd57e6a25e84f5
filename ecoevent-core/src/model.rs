//! Domain data structures for events, bins, guidelines, attendees, and agencies.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for an event (venue) served by one provider plugin.
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing an event and its human-friendly name.
pub struct EventMeta {
    /// Unique identifier.
    pub id: EventId,
    /// Display name.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a physical bin.
pub struct BinId(pub String);

impl fmt::Display for BinId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Waste stream a bin (or a guideline) belongs to.
pub enum BinCategory {
    /// Residual waste.
    General,
    /// Recyclables such as plastics, paper, and glass.
    Recyclable,
    /// Organic waste for composting.
    Compost,
}

impl fmt::Display for BinCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            BinCategory::General => "general",
            BinCategory::Recyclable => "recyclable",
            BinCategory::Compost => "compost",
        };
        write!(formatter, "{slug}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Kind of work performed on a bin.
pub enum MaintenanceAction {
    /// Contents were collected.
    Emptied,
    /// Bin was cleaned.
    Cleaned,
    /// Bin or sensor was repaired.
    Repaired,
}

impl fmt::Display for MaintenanceAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MaintenanceAction::Emptied => "Emptied",
            MaintenanceAction::Cleaned => "Cleaned",
            MaintenanceAction::Repaired => "Repaired",
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Single entry of a bin's maintenance log.
pub struct MaintenanceRecord {
    /// When the work was done.
    pub timestamp: DateTime<Utc>,
    /// What was done.
    pub action: MaintenanceAction,
    /// Optional free-text note from staff.
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Snapshot of a smart bin as reported by its sensor.
pub struct Bin {
    /// Unique identifier.
    pub id: BinId,
    /// Where the bin stands on the event grounds.
    pub location: String,
    /// Waste stream the bin accepts.
    pub category: BinCategory,
    /// Current fill level in liters.
    pub current_level: f64,
    /// Total capacity in liters.
    pub capacity: f64,
    /// Last time the bin was emptied.
    pub last_emptied: DateTime<Utc>,
    /// Identifier of the attached fill sensor.
    pub sensor_id: Option<String>,
    /// Maintenance log, in no particular order.
    #[serde(default)]
    pub maintenance_history: Vec<MaintenanceRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Disposal instructions for one kind of waste.
pub struct DisposalGuideline {
    /// Name of the waste type, e.g. "Plastic Bottles".
    pub waste_type: String,
    /// Short instructions.
    pub instructions: String,
    /// Bin the waste belongs in.
    pub category: BinCategory,
    /// Illustration shown in the detail view.
    pub image_url: String,
    /// Additional tips.
    pub tips: Vec<String>,
    /// Environmental impact statement.
    pub environmental_impact: String,
    /// Optional QR code payload linking to printed signage.
    pub qr_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for an attendee profile.
pub struct AttendeeId(pub String);

impl fmt::Display for AttendeeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Points awarded for one verified recycling visit.
pub struct RecyclingPoint {
    /// Point delta.
    pub points: u32,
    /// Actions that earned the points.
    pub actions: Vec<String>,
    /// When the points were awarded.
    pub timestamp: DateTime<Utc>,
    /// Bin the attendee used.
    pub bin_id: Option<BinId>,
    /// Sensor or staff member that verified the action.
    pub verified_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Event attendee taking part in the rewards program.
pub struct Attendee {
    /// Unique identifier.
    pub id: AttendeeId,
    /// Display name.
    pub name: String,
    /// Accumulated point total.
    pub points: u32,
    /// Point history, oldest first.
    #[serde(default)]
    pub history: Vec<RecyclingPoint>,
    /// Earned badge names.
    #[serde(default)]
    pub badges: Vec<String>,
    /// Level stored on the profile, if any.
    pub level: Option<u32>,
    /// Cumulative waste diverted from landfill in kilograms.
    pub total_waste_saved_kg: Option<f64>,
}

impl Attendee {
    /// Sum of the point deltas in the history.
    #[must_use]
    pub fn history_points(&self) -> u64 {
        self.history.iter().map(|entry| u64::from(entry.points)).sum()
    }

    /// Whether the stored point total matches the history.
    #[must_use]
    pub fn points_consistent(&self) -> bool {
        u64::from(self.points) == self.history_points()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a recycling agency.
pub struct AgencyId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize)]
/// External company that collects or processes waste for the event.
pub struct Agency {
    /// Unique identifier.
    pub id: AgencyId,
    /// Company name.
    pub name: String,
    /// Contact address.
    pub contact: String,
    /// Waste streams the agency handles.
    pub specializations: Vec<String>,
    /// Human-readable opening hours.
    pub availability: String,
    /// Optional satisfaction rating.
    pub rating: Option<f32>,
    /// Last pickup performed for the event.
    pub last_pickup: Option<DateTime<Utc>>,
    /// Next pickup on the schedule.
    pub next_scheduled_pickup: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn entry(points: u32) -> RecyclingPoint {
        RecyclingPoint {
            points,
            actions: vec![String::from("Recycled bottles")],
            timestamp: Utc.with_ymd_and_hms(2024, 3, 10, 10, 0, 0).unwrap(),
            bin_id: None,
            verified_by: None,
        }
    }

    fn attendee(points: u32, history: Vec<RecyclingPoint>) -> Attendee {
        Attendee {
            id: AttendeeId(String::from("1")),
            name: String::from("Test Attendee"),
            points,
            history,
            badges: Vec::new(),
            level: None,
            total_waste_saved_kg: None,
        }
    }

    #[test]
    fn points_match_history() {
        let profile = attendee(150, vec![entry(50), entry(100)]);
        assert_eq!(profile.history_points(), 150);
        assert!(profile.points_consistent());
    }

    #[test]
    fn diverging_points_are_detected() {
        let profile = attendee(200, vec![entry(50)]);
        assert!(!profile.points_consistent());
    }

    #[test]
    fn category_display_is_lowercase_slug() {
        assert_eq!(BinCategory::Recyclable.to_string(), "recyclable");
        assert_eq!(BinCategory::General.to_string(), "general");
    }
}
