//! High-level service facade combining all providers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use crate::guide::{GuideFilter, filter_guidelines};
use crate::messaging::AgencyNotice;
use crate::model::{Agency, AgencyId, Attendee, AttendeeId, Bin, DisposalGuideline, EventId, EventMeta};
use crate::plugin::{EventPlugin, PluginRegistry};
use crate::ports::PortError;
use crate::telemetry;

/// Public entry point for bins, guidelines, rewards, and agency messaging.
pub struct EcoEventService {
    registry: Arc<PluginRegistry>,
}

impl EcoEventService {
    /// Create a new service bound to the provided registry.
    #[must_use]
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// List all available events.
    #[must_use]
    pub fn events(&self) -> Vec<EventMeta> {
        self.registry.events()
    }

    /// Load the latest bin snapshots for an event.
    ///
    /// Snapshots that cannot be evaluated are still returned and logged.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the event is unsupported or the provider call fails.
    #[instrument(skip(self))]
    pub async fn bins(&self, event: &EventId) -> Result<Vec<Bin>, PortError> {
        let plugin = self.registry.plugin(event)?;
        let bins = plugin.bin_port.bins().await?;
        for bin in &bins {
            if let Err(err) = telemetry::validate(bin) {
                warn!(bin = %bin.id, error = %err, "bin reported unusable telemetry");
            }
        }
        debug!(count = bins.len(), "loaded bins");
        Ok(bins)
    }

    /// Load an attendee profile.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the event is unsupported, the attendee is unknown,
    /// or the provider call fails.
    #[instrument(skip(self))]
    pub async fn attendee(&self, event: &EventId, id: &AttendeeId) -> Result<Attendee, PortError> {
        let plugin = self.registry.plugin(event)?;
        let attendee = plugin.attendee_port.attendee(id).await?;
        if !attendee.points_consistent() {
            warn!(
                attendee = %attendee.id,
                points = attendee.points,
                history_points = attendee.history_points(),
                "point total does not match history"
            );
        }
        Ok(attendee)
    }

    /// Load the full guideline catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the event is unsupported or the provider call fails.
    #[instrument(skip(self))]
    pub async fn guidelines(&self, event: &EventId) -> Result<Vec<DisposalGuideline>, PortError> {
        let plugin = self.registry.plugin(event)?;
        plugin.guideline_port.guidelines().await
    }

    /// Search the guideline catalog by text and category.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the event is unsupported or the provider call fails.
    #[instrument(skip(self))]
    pub async fn search_guidelines(
        &self,
        event: &EventId,
        query: &str,
        filter: GuideFilter,
    ) -> Result<Vec<DisposalGuideline>, PortError> {
        let catalog = self.guidelines(event).await?;
        Ok(filter_guidelines(&catalog, query, filter)
            .into_iter()
            .cloned()
            .collect())
    }

    /// List agencies working an event.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the event is unsupported or the provider call fails.
    #[instrument(skip(self))]
    pub async fn agencies(&self, event: &EventId) -> Result<Vec<Agency>, PortError> {
        let plugin = self.registry.plugin(event)?;
        plugin.agency_port.agencies().await
    }

    /// Send a free-text message to an agency and return the logged notice.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the event or agency is unknown, the message is
    /// blank, or delivery fails.
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn send_agency_message(
        &self,
        event: &EventId,
        agency: &AgencyId,
        body: &str,
        now: DateTime<Utc>,
    ) -> Result<AgencyNotice, PortError> {
        let plugin = self.registry.plugin(event)?;
        let target = find_agency(plugin, agency).await?;
        let notice = AgencyNotice::message(&target, body, now)?;
        plugin.agency_port.deliver(&notice).await?;
        debug!(agency = %target.name, "message delivered");
        Ok(notice)
    }

    /// Ask an agency for an unscheduled pickup and return the logged notice.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the event or agency is unknown or delivery fails.
    #[instrument(skip(self))]
    pub async fn request_emergency_pickup(
        &self,
        event: &EventId,
        agency: &AgencyId,
        now: DateTime<Utc>,
    ) -> Result<AgencyNotice, PortError> {
        let plugin = self.registry.plugin(event)?;
        let target = find_agency(plugin, agency).await?;
        let notice = AgencyNotice::emergency_pickup(&target, now);
        plugin.agency_port.deliver(&notice).await?;
        warn!(agency = %target.name, "emergency pickup requested");
        Ok(notice)
    }
}

async fn find_agency(plugin: &EventPlugin, id: &AgencyId) -> Result<Agency, PortError> {
    plugin
        .agency_port
        .agencies()
        .await?
        .into_iter()
        .find(|agency| &agency.id == id)
        .ok_or_else(|| PortError::AgencyNotFound(id.0.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_event_is_unsupported() {
        let service = EcoEventService::new(Arc::new(PluginRegistry::new(Vec::new())));
        assert!(service.events().is_empty());
        let event = EventId(String::from("nowhere"));
        assert!(matches!(
            service.bins(&event).await,
            Err(PortError::UnsupportedEvent)
        ));
        assert!(matches!(
            service.search_guidelines(&event, "food", GuideFilter::All).await,
            Err(PortError::UnsupportedEvent)
        ));
    }
}
