use serde::{Deserialize, Serialize};

use crate::core::{CLIMATE_DOMAIN, entity_domain};
use crate::error::{CardError, CardResult};

use super::HassContext;

/// Rows of dashboard layout the host should reserve for the card.
pub const CARD_SIZE: u32 = 7;

const CARD_TYPE: &str = "thermostat";

/// Card setup as written in the dashboard configuration.
///
/// Validated once in `set_config`; nothing here is re-checked while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermostatCardConfig {
    #[serde(rename = "type", default = "default_card_type")]
    pub card_type: String,
    #[serde(default)]
    pub entity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

fn default_card_type() -> String {
    CARD_TYPE.to_owned()
}

impl ThermostatCardConfig {
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            card_type: default_card_type(),
            entity: entity.into(),
            name: None,
            theme: None,
        }
    }

    /// Overrides the display name taken from the entity.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Parses and validates a JSON card configuration.
    pub fn from_json_str(json: &str) -> CardResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| CardError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CardResult<()> {
        let has_object_id = self
            .entity
            .split_once('.')
            .is_some_and(|(_, object_id)| !object_id.is_empty());
        if !has_object_id || entity_domain(&self.entity) != CLIMATE_DOMAIN {
            return Err(CardError::InvalidConfig(
                "Specify an entity from within the climate domain".to_owned(),
            ));
        }
        Ok(())
    }

    /// Name override, ignoring an empty string.
    #[must_use]
    pub fn name_override(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Default configuration for a freshly added card.
///
/// Picks the first climate entity known to the host, searching `entities`
/// before `entities_fallback`. The entity id is empty when none qualifies,
/// which `validate` later rejects.
#[must_use]
pub fn stub_config(
    context: &HassContext,
    entities: &[String],
    entities_fallback: &[String],
) -> ThermostatCardConfig {
    let found = entities
        .iter()
        .chain(entities_fallback)
        .find(|entity_id| {
            entity_domain(entity_id) == CLIMATE_DOMAIN && context.state(entity_id).is_some()
        })
        .cloned()
        .unwrap_or_default();
    ThermostatCardConfig::new(found)
}
