//! Traits describing provider capabilities and the errors they share.

use async_trait::async_trait;

use crate::messaging::{AgencyNotice, MessagingError};
use crate::model::{Agency, Attendee, AttendeeId, Bin, DisposalGuideline, EventMeta};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to provider backends.
pub enum PortError {
    /// The event has no registered plugin.
    #[error("Unsupported event")]
    UnsupportedEvent,
    /// Requested attendee profile does not exist.
    #[error("Attendee not found: {0}")]
    AttendeeNotFound(String),
    /// Requested agency does not exist.
    #[error("Agency not found: {0}")]
    AgencyNotFound(String),
    /// The notice could not be composed.
    #[error("Messaging error: {0}")]
    Messaging(#[from] MessagingError),
    /// Internal provider error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[async_trait]
/// Source of bin telemetry snapshots.
pub trait BinPort: Send + Sync {
    /// Metadata describing the event handled by this port.
    fn event(&self) -> &EventMeta;

    /// Fetch the latest snapshot of every bin.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the provider request fails.
    async fn bins(&self) -> Result<Vec<Bin>, PortError>;
}

#[async_trait]
/// Source of attendee profiles.
pub trait AttendeePort: Send + Sync {
    /// Metadata describing the event handled by this port.
    fn event(&self) -> &EventMeta;

    /// Fetch one attendee profile.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::AttendeeNotFound`] for unknown ids, or another
    /// [`PortError`] when the provider request fails.
    async fn attendee(&self, id: &AttendeeId) -> Result<Attendee, PortError>;
}

#[async_trait]
/// Source of the disposal guideline catalog.
pub trait GuidelinePort: Send + Sync {
    /// Fetch the catalog in declaration order.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the provider request fails.
    async fn guidelines(&self) -> Result<Vec<DisposalGuideline>, PortError>;
}

#[async_trait]
/// Directory of recycling agencies and the channel used to reach them.
pub trait AgencyPort: Send + Sync {
    /// List agencies working the event.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the provider request fails.
    async fn agencies(&self) -> Result<Vec<Agency>, PortError>;

    /// Deliver a notice to its agency.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the notice cannot be delivered.
    async fn deliver(&self, notice: &AgencyNotice) -> Result<(), PortError>;
}
