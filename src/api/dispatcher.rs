use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::core::{CLIMATE_DOMAIN, HvacMode, PendingSetpoint};
use crate::error::{CardError, CardResult};
use crate::render::Renderer;

use super::ThermostatCard;

/// Device commands the card can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateService {
    SetTemperature,
    SetHvacMode,
}

impl ClimateService {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SetTemperature => "set_temperature",
            Self::SetHvacMode => "set_hvac_mode",
        }
    }
}

/// One outbound "call device command" request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub data: Map<String, Value>,
}

impl ServiceCall {
    #[must_use]
    pub fn set_temperature(entity_id: &str, temperature: f64) -> Self {
        Self::climate(
            ClimateService::SetTemperature,
            entity_id,
            "temperature",
            Value::from(temperature),
        )
    }

    #[must_use]
    pub fn set_hvac_mode(entity_id: &str, mode: &HvacMode) -> Self {
        Self::climate(
            ClimateService::SetHvacMode,
            entity_id,
            "hvac_mode",
            Value::from(mode.as_str()),
        )
    }

    fn climate(service: ClimateService, entity_id: &str, key: &str, value: Value) -> Self {
        let mut data = Map::new();
        data.insert("entity_id".to_owned(), Value::from(entity_id));
        data.insert(key.to_owned(), value);
        Self {
            domain: CLIMATE_DOMAIN.to_owned(),
            service: service.as_str().to_owned(),
            data,
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        self.data.get("entity_id").and_then(Value::as_str)
    }
}

/// Outbound command channel toward the device provider.
///
/// Fire-and-forget: nothing is returned, the card never waits for or retries
/// a call. The next snapshot is the only confirmation.
pub trait CommandSink {
    fn call_service(&mut self, call: ServiceCall);
}

/// Sink that drops every command; the default until the host installs one.
#[derive(Debug, Default)]
pub struct DiscardCommands;

impl CommandSink for DiscardCommands {
    fn call_service(&mut self, call: ServiceCall) {
        debug!(service = %call.service, "no command sink installed, dropping call");
    }
}

impl<R: Renderer> ThermostatCard<R> {
    pub fn set_command_sink(&mut self, sink: Box<dyn CommandSink>) {
        self.core.runtime.commands = sink;
    }

    /// Live slider movement: previews the value locally, never dispatches.
    ///
    /// Returns `false` when the gesture was ignored (entity missing or
    /// unavailable, where the slider is disabled).
    pub fn slider_input(&mut self, value: f64) -> CardResult<bool> {
        let entity_id = self.interactive_entity_id()?;
        ensure_finite(value)?;
        let Some(entity_id) = entity_id else {
            return Ok(false);
        };

        self.core.interaction.on_drag(value);
        self.core.pending_setpoint = PendingSetpoint::Single(value);
        self.mark_dirty();
        debug!(%entity_id, value, "slider drag preview");
        Ok(true)
    }

    /// Commit of a slider value (change event): dispatches `set_temperature`.
    pub fn slider_change(&mut self, value: f64) -> CardResult<bool> {
        ensure_finite(value)?;
        self.commit_slider(Some(value))
    }

    /// Pointer release without an explicit value: commits the last dragged one.
    pub fn slider_release(&mut self) -> CardResult<bool> {
        self.commit_slider(None)
    }

    fn commit_slider(&mut self, value: Option<f64>) -> CardResult<bool> {
        let Some(entity_id) = self.interactive_entity_id()? else {
            self.core.interaction.reset();
            return Ok(false);
        };
        let Some(value) = self.core.interaction.on_commit(value) else {
            debug!(%entity_id, "slider release without a dragged value");
            return Ok(false);
        };

        self.core.pending_setpoint = PendingSetpoint::Single(value);
        self.mark_dirty();
        self.dispatch(ServiceCall::set_temperature(&entity_id, value));
        Ok(true)
    }

    /// Mode-icon activation: dispatches `set_hvac_mode`.
    ///
    /// Only modes that render an icon (known and supported by the device)
    /// can be activated.
    pub fn mode_selected(&mut self, mode: &HvacMode) -> CardResult<bool> {
        let entity_id = self.configured_entity_id()?;
        let Some(snapshot) = self.tracked_snapshot() else {
            debug!(%entity_id, "mode click ignored, entity not found");
            return Ok(false);
        };
        if !mode.is_known() || !snapshot.supported_modes.contains(mode) {
            warn!(%entity_id, mode = %mode, "mode click ignored, no icon for this mode");
            return Ok(false);
        }

        self.dispatch(ServiceCall::set_hvac_mode(&entity_id, mode));
        Ok(true)
    }

    fn dispatch(&mut self, call: ServiceCall) {
        debug!(
            domain = %call.domain,
            service = %call.service,
            entity_id = call.entity_id().unwrap_or_default(),
            "dispatching device command"
        );
        self.core.runtime.commands.call_service(call);
    }

    /// Entity id when the slider is interactive, `None` when it is disabled.
    fn interactive_entity_id(&self) -> CardResult<Option<String>> {
        let entity_id = self.configured_entity_id()?;
        match self.tracked_snapshot() {
            Some(snapshot) if !snapshot.is_unavailable() => Ok(Some(entity_id)),
            Some(_) => {
                debug!(%entity_id, "slider gesture ignored, device unavailable");
                Ok(None)
            }
            None => {
                debug!(%entity_id, "slider gesture ignored, entity not found");
                Ok(None)
            }
        }
    }
}

fn ensure_finite(value: f64) -> CardResult<()> {
    if !value.is_finite() {
        return Err(CardError::InvalidData(
            "slider value must be finite".to_owned(),
        ));
    }
    Ok(())
}
