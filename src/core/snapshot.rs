use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{CardError, CardResult};

use super::hvac_mode::HvacMode;
use super::types::{Availability, UNAVAILABLE_STATE, finite};

const DEFAULT_MIN_TEMP: f64 = 7.0;
const DEFAULT_MAX_TEMP: f64 = 35.0;

/// Dual setpoint band used by `heat_cool`-style modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub low: f64,
    pub high: f64,
}

impl TemperatureRange {
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

/// Immutable point-in-time observation of one climate entity.
///
/// Providers hand snapshots out behind an `Arc`; a new observation is a new
/// `Arc`, which is what the card uses for change detection.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    pub entity_id: String,
    /// Raw state string as reported (mode name, `unavailable`, ...).
    pub state: String,
    pub mode: HvacMode,
    pub availability: Availability,
    pub current_temperature: Option<f64>,
    pub target_temperature: Option<f64>,
    /// Low/high targets are only ever present together.
    pub target_range: Option<TemperatureRange>,
    pub min_temp: f64,
    pub max_temp: f64,
    pub step_size: Option<f64>,
    pub supported_modes: Vec<HvacMode>,
    pub hvac_action: Option<String>,
    pub preset_mode: Option<String>,
    pub friendly_name: Option<String>,
}

impl EntitySnapshot {
    /// Creates an available snapshot in `mode` with default bounds and no readings.
    #[must_use]
    pub fn new(entity_id: impl Into<String>, mode: HvacMode) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: mode.as_str().to_owned(),
            mode,
            availability: Availability::Available,
            current_temperature: None,
            target_temperature: None,
            target_range: None,
            min_temp: DEFAULT_MIN_TEMP,
            max_temp: DEFAULT_MAX_TEMP,
            step_size: None,
            supported_modes: Vec::new(),
            hvac_action: None,
            preset_mode: None,
            friendly_name: None,
        }
    }

    /// Creates a snapshot for a device the provider reports as unavailable.
    #[must_use]
    pub fn unavailable(entity_id: impl Into<String>) -> Self {
        let mut snapshot = Self::new(entity_id, HvacMode::Other(UNAVAILABLE_STATE.to_owned()));
        snapshot.availability = Availability::Unavailable;
        snapshot
    }

    #[must_use]
    pub fn with_current_temperature(mut self, value: f64) -> Self {
        self.current_temperature = Some(value);
        self
    }

    #[must_use]
    pub fn with_target_temperature(mut self, value: f64) -> Self {
        self.target_temperature = Some(value);
        self
    }

    #[must_use]
    pub fn with_target_range(mut self, low: f64, high: f64) -> Self {
        self.target_range = Some(TemperatureRange::new(low, high));
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, min_temp: f64, max_temp: f64) -> Self {
        self.min_temp = min_temp;
        self.max_temp = max_temp;
        self
    }

    #[must_use]
    pub fn with_step_size(mut self, step: f64) -> Self {
        self.step_size = Some(step);
        self
    }

    #[must_use]
    pub fn with_supported_modes(mut self, modes: impl IntoIterator<Item = HvacMode>) -> Self {
        self.supported_modes = modes.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_hvac_action(mut self, action: impl Into<String>) -> Self {
        self.hvac_action = Some(action.into());
        self
    }

    #[must_use]
    pub fn with_preset_mode(mut self, preset: impl Into<String>) -> Self {
        self.preset_mode = Some(preset.into());
        self
    }

    #[must_use]
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn target_temperature_low(&self) -> Option<f64> {
        self.target_range.map(|range| range.low)
    }

    #[must_use]
    pub fn target_temperature_high(&self) -> Option<f64> {
        self.target_range.map(|range| range.high)
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.availability.is_unavailable()
    }

    /// Decodes a provider state object
    /// (`{"entity_id": .., "state": .., "attributes": {..}}`).
    pub fn from_state_json(json: &str) -> CardResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|err| CardError::InvalidSnapshot(err.to_string()))?;
        Self::from_state_value(value)
    }

    pub fn from_state_value(value: Value) -> CardResult<Self> {
        let raw: RawState = serde_json::from_value(value)
            .map_err(|err| CardError::InvalidSnapshot(err.to_string()))?;
        Ok(raw.into_snapshot())
    }
}

#[derive(Debug, Deserialize)]
struct RawState {
    entity_id: String,
    state: String,
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl RawState {
    fn into_snapshot(self) -> EntitySnapshot {
        let attributes = &self.attributes;
        let availability = if self.state == UNAVAILABLE_STATE {
            Availability::Unavailable
        } else {
            Availability::Available
        };

        let target_range = match (
            numeric_attribute(attributes, "target_temp_low"),
            numeric_attribute(attributes, "target_temp_high"),
        ) {
            (Some(low), Some(high)) => Some(TemperatureRange::new(low, high)),
            _ => None,
        };

        let supported_modes = attributes
            .get("hvac_modes")
            .and_then(Value::as_array)
            .map(|modes| {
                modes
                    .iter()
                    .filter_map(Value::as_str)
                    .map(HvacMode::parse)
                    .collect()
            })
            .unwrap_or_default();

        EntitySnapshot {
            mode: HvacMode::parse(&self.state),
            availability,
            current_temperature: numeric_attribute(attributes, "current_temperature"),
            target_temperature: numeric_attribute(attributes, "temperature"),
            target_range,
            min_temp: numeric_attribute(attributes, "min_temp").unwrap_or(DEFAULT_MIN_TEMP),
            max_temp: numeric_attribute(attributes, "max_temp").unwrap_or(DEFAULT_MAX_TEMP),
            step_size: numeric_attribute(attributes, "target_temp_step"),
            supported_modes,
            hvac_action: string_attribute(attributes, "hvac_action"),
            preset_mode: string_attribute(attributes, "preset_mode"),
            friendly_name: string_attribute(attributes, "friendly_name"),
            entity_id: self.entity_id,
            state: self.state,
        }
    }
}

/// Numbers may arrive as JSON numbers or numeric strings; anything else,
/// including non-finite values, reads as "no value".
fn numeric_attribute(attributes: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match attributes.get(key)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    finite(value)
}

fn string_attribute(attributes: &Map<String, Value>, key: &str) -> Option<String> {
    attributes
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::EntitySnapshot;
    use crate::core::{Availability, HvacMode};
    use crate::error::CardError;

    #[test]
    fn decodes_dual_setpoint_state() {
        let snapshot = EntitySnapshot::from_state_json(
            r#"{
                "entity_id": "climate.hall",
                "state": "heat_cool",
                "attributes": {
                    "current_temperature": 20.4,
                    "temperature": null,
                    "target_temp_low": 19,
                    "target_temp_high": "24.5",
                    "min_temp": 10,
                    "max_temp": 30,
                    "hvac_modes": ["off", "heat_cool", "boost"],
                    "hvac_action": "idle",
                    "preset_mode": "none",
                    "friendly_name": "Hall"
                }
            }"#,
        )
        .expect("decode");

        assert_eq!(snapshot.mode, HvacMode::HeatCool);
        assert_eq!(snapshot.availability, Availability::Available);
        assert_eq!(snapshot.current_temperature, Some(20.4));
        assert_eq!(snapshot.target_temperature, None);
        assert_eq!(snapshot.target_temperature_low(), Some(19.0));
        assert_eq!(snapshot.target_temperature_high(), Some(24.5));
        assert_eq!((snapshot.min_temp, snapshot.max_temp), (10.0, 30.0));
        assert_eq!(snapshot.step_size, None);
        assert_eq!(
            snapshot.supported_modes,
            vec![
                HvacMode::Off,
                HvacMode::HeatCool,
                HvacMode::Other("boost".to_owned())
            ]
        );
        assert_eq!(snapshot.hvac_action.as_deref(), Some("idle"));
        assert_eq!(snapshot.friendly_name.as_deref(), Some("Hall"));
    }

    #[test]
    fn half_reported_range_is_dropped() {
        let snapshot = EntitySnapshot::from_state_json(
            r#"{"entity_id": "climate.a", "state": "heat",
                "attributes": {"temperature": 21, "target_temp_low": 18}}"#,
        )
        .expect("decode");
        assert_eq!(snapshot.target_range, None);
        assert_eq!(snapshot.target_temperature, Some(21.0));
    }

    #[test]
    fn unavailable_state_and_missing_attributes_use_defaults() {
        let snapshot =
            EntitySnapshot::from_state_json(r#"{"entity_id": "climate.a", "state": "unavailable"}"#)
                .expect("decode");
        assert!(snapshot.is_unavailable());
        assert_eq!((snapshot.min_temp, snapshot.max_temp), (7.0, 35.0));
        assert!(snapshot.supported_modes.is_empty());
    }

    #[test]
    fn malformed_payload_is_rejected() {
        let err = EntitySnapshot::from_state_json(r#"{"state": "heat"}"#).expect_err("no id");
        assert!(matches!(err, CardError::InvalidSnapshot(_)));
    }
}
