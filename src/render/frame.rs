use serde::{Deserialize, Serialize};

use crate::error::{CardError, CardResult};
use crate::render::{
    CurrentTemperatureView, IconButton, ModeRow, SetValuesView, SliderView,
};

/// Warning shown instead of the card when the configured entity is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityNotFoundView {
    pub entity_id: String,
    pub message: String,
}

/// Fully projected thermostat card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermostatView {
    pub entity_id: String,
    pub name: String,
    /// Style class of the card: the current mode name or `unknown-mode`.
    pub mode_class: String,
    pub more_info: IconButton,
    pub slider: SliderView,
    pub current_temperature: CurrentTemperatureView,
    pub set_values: SetValuesView,
    pub modes: ModeRow,
}

/// Backend-agnostic scene for one card draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardFrame {
    /// No config or no host context yet.
    Empty,
    EntityNotFound(EntityNotFoundView),
    Thermostat(Box<ThermostatView>),
}

impl CardFrame {
    #[must_use]
    pub fn thermostat(&self) -> Option<&ThermostatView> {
        match self {
            Self::Thermostat(view) => Some(view),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn validate(&self) -> CardResult<()> {
        match self {
            Self::Empty => Ok(()),
            Self::EntityNotFound(warning) => {
                if warning.entity_id.is_empty() {
                    return Err(CardError::InvalidData(
                        "entity-not-found warning needs an entity id".to_owned(),
                    ));
                }
                Ok(())
            }
            Self::Thermostat(view) => {
                view.slider.validate()?;
                view.current_temperature.view_box.validate()?;
                if let Some(view_box) = view.set_values.view_box {
                    view_box.validate()?;
                }
                Ok(())
            }
        }
    }
}
