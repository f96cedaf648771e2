use serde::{Deserialize, Serialize};

/// Domain every tracked entity id must belong to.
pub const CLIMATE_DOMAIN: &str = "climate";

/// State string the provider uses for an unreachable device.
pub const UNAVAILABLE_STATE: &str = "unavailable";

/// Preset value meaning "no preset active".
pub const PRESET_NONE: &str = "none";

/// Temperature unit of the host's unit system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "°C")]
    Celsius,
    #[serde(rename = "°F")]
    Fahrenheit,
}

impl TemperatureUnit {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

/// Ambient unit-system setting read from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct UnitSystem {
    pub temperature: TemperatureUnit,
}

impl UnitSystem {
    #[must_use]
    pub const fn metric() -> Self {
        Self {
            temperature: TemperatureUnit::Celsius,
        }
    }

    #[must_use]
    pub const fn imperial() -> Self {
        Self {
            temperature: TemperatureUnit::Fahrenheit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Availability {
    #[default]
    Available,
    Unavailable,
}

impl Availability {
    #[must_use]
    pub const fn is_unavailable(self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// Returns the domain part of an entity id (`climate` for `climate.living_room`).
#[must_use]
pub fn entity_domain(entity_id: &str) -> &str {
    entity_id.split('.').next().unwrap_or_default()
}

/// Returns the object id part of an entity id (`living_room` for `climate.living_room`).
#[must_use]
pub fn entity_object_id(entity_id: &str) -> &str {
    entity_id
        .split_once('.')
        .map_or(entity_id, |(_, object_id)| object_id)
}

/// Returns `Some(value)` only for finite readings.
#[must_use]
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite())
}
