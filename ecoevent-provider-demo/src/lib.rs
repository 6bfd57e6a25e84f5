//! Provider serving in-memory seed data for the demo event.
//!
//! Stands in for the sensor telemetry and attendee profile services a real
//! deployment would talk to. Seed timestamps are anchored to the time the
//! plugin is built so predictions and maintenance status stay meaningful.

mod seed;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use ecoevent_core::{
    messaging::AgencyNotice,
    model::{Agency, Attendee, AttendeeId, Bin, DisposalGuideline, EventId, EventMeta},
    plugin::EventPlugin,
    ports::{AgencyPort, AttendeePort, BinPort, GuidelinePort, PortError},
};

/// Identifier of the demo event.
pub const EVENT_ID: &str = "expo";

/// In-memory store implementing every provider port.
pub struct DemoStore {
    meta: EventMeta,
    bins: Vec<Bin>,
    attendees: Vec<Attendee>,
    guidelines: Vec<DisposalGuideline>,
    agencies: Vec<Agency>,
    delivered: Mutex<Vec<AgencyNotice>>,
}

impl DemoStore {
    /// Create a store whose seed timestamps are relative to `anchor`.
    #[must_use]
    pub fn new(anchor: DateTime<Utc>) -> Self {
        Self {
            meta: event_meta(),
            bins: seed::bins(anchor),
            attendees: seed::attendees(anchor),
            guidelines: seed::guidelines(),
            agencies: seed::agencies(anchor),
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Notices accepted so far, oldest first.
    #[must_use]
    pub fn delivered(&self) -> Vec<AgencyNotice> {
        self.delivered
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BinPort for DemoStore {
    fn event(&self) -> &EventMeta {
        &self.meta
    }

    async fn bins(&self) -> Result<Vec<Bin>, PortError> {
        Ok(self.bins.clone())
    }
}

#[async_trait]
impl AttendeePort for DemoStore {
    fn event(&self) -> &EventMeta {
        &self.meta
    }

    async fn attendee(&self, id: &AttendeeId) -> Result<Attendee, PortError> {
        self.attendees
            .iter()
            .find(|attendee| &attendee.id == id)
            .cloned()
            .ok_or_else(|| PortError::AttendeeNotFound(id.0.clone()))
    }
}

#[async_trait]
impl GuidelinePort for DemoStore {
    async fn guidelines(&self) -> Result<Vec<DisposalGuideline>, PortError> {
        Ok(self.guidelines.clone())
    }
}

#[async_trait]
impl AgencyPort for DemoStore {
    async fn agencies(&self) -> Result<Vec<Agency>, PortError> {
        Ok(self.agencies.clone())
    }

    async fn deliver(&self, notice: &AgencyNotice) -> Result<(), PortError> {
        // Nothing leaves the process; the notice is only kept for inspection.
        info!(agency = %notice.agency, kind = ?notice.kind, "simulated delivery");
        self.delivered
            .lock()
            .map_err(|err| PortError::Internal(format!("delivery log poisoned: {err}")))?
            .push(notice.clone());
        Ok(())
    }
}

/// Build the plugin bundle around an existing store.
#[must_use]
pub fn plugin_with_store(store: &Arc<DemoStore>) -> EventPlugin {
    EventPlugin {
        meta: event_meta(),
        bin_port: Arc::<DemoStore>::clone(store),
        attendee_port: Arc::<DemoStore>::clone(store),
        guideline_port: Arc::<DemoStore>::clone(store),
        agency_port: Arc::<DemoStore>::clone(store),
    }
}

/// Build the plugin bundle for the demo event.
#[must_use]
pub fn plugin(anchor: DateTime<Utc>) -> EventPlugin {
    plugin_with_store(&Arc::new(DemoStore::new(anchor)))
}

fn event_meta() -> EventMeta {
    EventMeta {
        id: EventId(String::from(EVENT_ID)),
        name: String::from("Eco-Event Expo"),
    }
}
