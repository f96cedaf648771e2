use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CardResult;
use crate::render::Renderer;

use super::ThermostatCard;

/// UI-level notifications raised toward the host shell. These never reach
/// the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEvent {
    /// The info affordance was activated.
    MoreInfo { entity_id: String },
}

/// Host-side observer of card notifications.
pub trait HostEventListener {
    fn on_event(&mut self, event: &HostEvent);
}

impl<R: Renderer> ThermostatCard<R> {
    pub fn register_listener(&mut self, listener: Box<dyn HostEventListener>) {
        self.core.runtime.listeners.push(listener);
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.core.runtime.listeners.len()
    }

    /// Raises `HostEvent::MoreInfo` for the configured entity.
    pub fn more_info(&mut self) -> CardResult<()> {
        let entity_id = self.configured_entity_id()?;
        self.emit_host_event(HostEvent::MoreInfo { entity_id });
        Ok(())
    }

    pub(super) fn emit_host_event(&mut self, event: HostEvent) {
        debug!(?event, listeners = self.core.runtime.listeners.len(), "host event");
        for listener in &mut self.core.runtime.listeners {
            listener.on_event(&event);
        }
    }
}
