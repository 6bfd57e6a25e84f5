//! Core types and service wiring for the ecoevent waste management dashboard.

/// Search and category filtering over disposal guidelines.
pub mod guide;
/// Notices sent to recycling agencies.
pub mod messaging;
/// Domain models and identifiers shared by all providers.
pub mod model;
/// Registry and helpers for plugging event providers into the service.
pub mod plugin;
/// Traits describing the provider interfaces.
pub mod ports;
/// Leveling tiers, reward eligibility, and achievements.
pub mod rewards;
/// High-level service facade used by clients.
pub mod service;
/// Fill level, status, prediction, and maintenance derivations for bins.
pub mod telemetry;

pub use guide::*;
pub use messaging::*;
pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use rewards::*;
pub use service::*;
pub use telemetry::*;
