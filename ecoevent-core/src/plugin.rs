//! Registry for all event plugins and their ports.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::model::{EventId, EventMeta};
use crate::ports::{AgencyPort, AttendeePort, BinPort, GuidelinePort, PortError};

/// Collection of ports implementing a provider for a single event.
pub struct EventPlugin {
    /// Static metadata describing the event.
    pub meta: EventMeta,
    /// Bin telemetry source.
    pub bin_port: Arc<dyn BinPort>,
    /// Attendee profile source.
    pub attendee_port: Arc<dyn AttendeePort>,
    /// Disposal guideline catalog.
    pub guideline_port: Arc<dyn GuidelinePort>,
    /// Recycling agency directory.
    pub agency_port: Arc<dyn AgencyPort>,
}

impl EventPlugin {
    /// Whether the bin and attendee ports serve the event named in `meta`.
    #[must_use]
    pub fn serves_own_event(&self) -> bool {
        self.bin_port.event().id == self.meta.id && self.attendee_port.event().id == self.meta.id
    }
}

/// Registry that resolves plugins by event identifier.
pub struct PluginRegistry {
    plugins: HashMap<EventId, EventPlugin>,
}

impl PluginRegistry {
    /// Build a registry from the provided plugin list.
    ///
    /// Plugins whose ports serve a different event than their metadata names are
    /// skipped.
    #[must_use]
    pub fn new(plugins: Vec<EventPlugin>) -> Self {
        let plugins_map = plugins
            .into_iter()
            .filter(|plugin| {
                let consistent = plugin.serves_own_event();
                if !consistent {
                    warn!(event = %plugin.meta.id, "plugin ports serve another event, skipping");
                }
                consistent
            })
            .map(|plugin| (plugin.meta.id.clone(), plugin))
            .collect();
        Self {
            plugins: plugins_map,
        }
    }

    /// Return metadata for all registered events, sorted by name.
    #[must_use]
    pub fn events(&self) -> Vec<EventMeta> {
        let mut events: Vec<EventMeta> = self
            .plugins
            .values()
            .map(|plugin| plugin.meta.clone())
            .collect();
        events.sort_by(|left, right| left.name.cmp(&right.name));
        events
    }

    /// Look up a plugin for the given event.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::UnsupportedEvent`] when no plugin is registered.
    pub fn plugin(&self, event: &EventId) -> Result<&EventPlugin, PortError> {
        self.plugins.get(event).ok_or(PortError::UnsupportedEvent)
    }
}
