//! Leveling tiers, reward eligibility, and achievement summaries.

use serde::{Deserialize, Serialize};

use crate::model::{Attendee, AttendeeId};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Errors raised by the rewards program.
pub enum RewardError {
    /// Tier thresholds must start at zero and strictly increase.
    #[error("Invalid level table: {0}")]
    InvalidLevelTable(String),
    /// The attendee does not have enough points for the reward.
    #[error("{required} points needed, {available} available")]
    InsufficientPoints {
        /// Points the reward costs.
        required: u32,
        /// Points the attendee has.
        available: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Accent color of a tier in the dashboard.
pub enum TierColor {
    /// Starting tier.
    Gray,
    /// Second tier.
    Green,
    /// Third tier.
    Blue,
    /// Fourth tier.
    Purple,
    /// Top tier.
    Yellow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A named rank unlocked at a cumulative point threshold.
pub struct LevelTier {
    /// Display name.
    pub name: String,
    /// Points needed to reach the tier.
    pub threshold: u32,
    /// Accent color.
    pub color: TierColor,
}

impl LevelTier {
    fn new(name: &str, threshold: u32, color: TierColor) -> Self {
        Self {
            name: name.to_owned(),
            threshold,
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Where a point total sits within the tier table.
pub struct LevelProgress<'table> {
    /// Highest tier reached.
    pub current: &'table LevelTier,
    /// Next tier to reach, or the top tier when already there.
    pub next: &'table LevelTier,
    /// Progress from `current` towards `next` in percent.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Ordered, validated tier table.
pub struct LevelTable {
    tiers: Vec<LevelTier>,
}

impl LevelTable {
    /// Build a table from tiers sorted by threshold.
    ///
    /// # Errors
    ///
    /// Returns [`RewardError::InvalidLevelTable`] if the table is empty, does not start
    /// at zero points, or its thresholds do not strictly increase.
    pub fn new(tiers: Vec<LevelTier>) -> Result<Self, RewardError> {
        let Some(first) = tiers.first() else {
            return Err(RewardError::InvalidLevelTable("no tiers".to_owned()));
        };
        if first.threshold != 0 {
            return Err(RewardError::InvalidLevelTable(format!(
                "first tier '{}' starts at {} points instead of 0",
                first.name, first.threshold
            )));
        }
        for pair in tiers.windows(2) {
            if let [lower, upper] = pair
                && upper.threshold <= lower.threshold
            {
                return Err(RewardError::InvalidLevelTable(format!(
                    "'{}' ({}) does not exceed '{}' ({})",
                    upper.name, upper.threshold, lower.name, lower.threshold
                )));
            }
        }
        Ok(Self { tiers })
    }

    /// The tier table used at events.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                LevelTier::new("Beginner", 0, TierColor::Gray),
                LevelTier::new("Recycler", 100, TierColor::Green),
                LevelTier::new("Eco Warrior", 250, TierColor::Blue),
                LevelTier::new("Sustainability Champion", 500, TierColor::Purple),
                LevelTier::new("Earth Guardian", 1000, TierColor::Yellow),
            ],
        }
    }

    /// All tiers in ascending order.
    #[must_use]
    pub fn tiers(&self) -> &[LevelTier] {
        &self.tiers
    }

    /// Highest tier whose threshold does not exceed `points`.
    ///
    /// # Panics
    ///
    /// Never: a validated table is non-empty and starts at zero.
    #[must_use]
    pub fn current_tier(&self, points: u32) -> &LevelTier {
        self.tiers
            .iter()
            .take_while(|tier| tier.threshold <= points)
            .last()
            .expect("level table starts at zero points")
    }

    /// Lowest tier above `points`, or the top tier when none is left.
    ///
    /// # Panics
    ///
    /// Never: a validated table is non-empty.
    #[must_use]
    pub fn next_tier(&self, points: u32) -> &LevelTier {
        self.tiers
            .iter()
            .find(|tier| tier.threshold > points)
            .or_else(|| self.tiers.last())
            .expect("level table is never empty")
    }

    /// 1-based position of the current tier.
    #[must_use]
    pub fn ordinal(&self, points: u32) -> u32 {
        let reached = self
            .tiers
            .iter()
            .filter(|tier| tier.threshold <= points)
            .count();
        u32::try_from(reached).unwrap_or(u32::MAX)
    }

    /// Current tier, next tier, and the progress between them.
    #[must_use]
    pub fn progress(&self, points: u32) -> LevelProgress<'_> {
        let current = self.current_tier(points);
        let next = self.next_tier(points);
        let percent = if next.threshold == current.threshold {
            100.0
        } else {
            f64::from(points - current.threshold) / f64::from(next.threshold - current.threshold)
                * 100.0
        };
        LevelProgress {
            current,
            next,
            percent,
        }
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Icon family of a reward.
pub enum RewardKind {
    /// Merchandise.
    Gift,
    /// Access or perks.
    Award,
    /// Top-tier experiences.
    Medal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Catalog entry that can be redeemed for points.
pub struct Reward {
    /// Points required.
    pub points: u32,
    /// What the attendee gets.
    pub description: String,
    /// Icon family.
    pub kind: RewardKind,
}

impl Reward {
    /// Whether an attendee with `points` may redeem this reward.
    #[must_use]
    pub fn is_redeemable(&self, points: u32) -> bool {
        points >= self.points
    }
}

/// Rewards offered at events.
#[must_use]
pub fn standard_catalog() -> Vec<Reward> {
    [
        (100, "Free Eco-friendly Water Bottle", RewardKind::Gift),
        (200, "Sustainable Event T-shirt", RewardKind::Gift),
        (500, "VIP Access to Next Event", RewardKind::Award),
        (1000, "Zero-waste Workshop Session", RewardKind::Medal),
    ]
    .into_iter()
    .map(|(points, description, kind)| Reward {
        points,
        description: description.to_owned(),
        kind,
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Confirmed request to hand out a reward. Points are not debited.
pub struct RedemptionRequest {
    /// Who redeems.
    pub attendee: AttendeeId,
    /// What is redeemed.
    pub reward: String,
    /// Points the reward required.
    pub points_required: u32,
}

/// Check eligibility and produce a redemption request for staff.
///
/// The attendee's points and history are left untouched.
///
/// # Errors
///
/// Returns [`RewardError::InsufficientPoints`] when the attendee cannot afford the reward.
pub fn redeem(reward: &Reward, attendee: &Attendee) -> Result<RedemptionRequest, RewardError> {
    if !reward.is_redeemable(attendee.points) {
        return Err(RewardError::InsufficientPoints {
            required: reward.points,
            available: attendee.points,
        });
    }
    Ok(RedemptionRequest {
        attendee: attendee.id.clone(),
        reward: reward.description.clone(),
        points_required: reward.points,
    })
}

#[derive(Debug, Clone, PartialEq)]
/// Statistics shown on the achievements tab.
pub struct AchievementSummary {
    /// Number of recorded recycling actions across the history.
    pub total_actions: usize,
    /// Point total from the profile.
    pub total_points: u32,
    /// Stored level, or the tier ordinal when the profile has none.
    pub level: u32,
    /// Kilograms of waste diverted from landfill.
    pub waste_saved_kg: f64,
    /// Earned badges.
    pub badges: Vec<String>,
}

impl AchievementSummary {
    /// Aggregate an attendee's history.
    #[must_use]
    pub fn for_attendee(attendee: &Attendee, table: &LevelTable) -> Self {
        Self {
            total_actions: attendee
                .history
                .iter()
                .map(|entry| entry.actions.len())
                .sum(),
            total_points: attendee.points,
            level: attendee
                .level
                .unwrap_or_else(|| table.ordinal(attendee.points)),
            waste_saved_kg: attendee.total_waste_saved_kg.unwrap_or_default(),
            badges: attendee.badges.clone(),
        }
    }
}
