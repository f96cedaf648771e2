use serde::{Deserialize, Serialize};
use tracing::warn;

use super::snapshot::EntitySnapshot;
use super::types::{TemperatureUnit, UnitSystem, finite};

pub const METRIC_DEFAULT_STEP: f64 = 0.5;
pub const IMPERIAL_DEFAULT_STEP: f64 = 1.0;

/// Resolves the slider increment.
///
/// A device-reported step wins when it is a finite positive number. Anything
/// else (missing, zero, negative, NaN) falls back to the unit default, so the
/// returned step is always positive.
#[must_use]
pub fn resolve_step_size(snapshot: &EntitySnapshot, unit_system: UnitSystem) -> f64 {
    match finite(snapshot.step_size) {
        Some(step) if step > 0.0 => return step,
        Some(step) => warn!(
            entity_id = %snapshot.entity_id,
            step,
            "ignoring non-positive device step size, using unit default"
        ),
        None => {}
    }
    default_step_for_unit(unit_system.temperature)
}

#[must_use]
pub const fn default_step_for_unit(unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Fahrenheit => IMPERIAL_DEFAULT_STEP,
        TemperatureUnit::Celsius => METRIC_DEFAULT_STEP,
    }
}

/// Legal slider bounds and increment for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    /// Bounds are taken verbatim from the snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &EntitySnapshot, unit_system: UnitSystem) -> Self {
        Self {
            min: snapshot.min_temp,
            max: snapshot.max_temp,
            step: resolve_step_size(snapshot, unit_system),
        }
    }

    /// Whole-degree steps render without fraction digits.
    #[must_use]
    pub fn uses_whole_degrees(self) -> bool {
        self.step == 1.0
    }
}

/// Slider position: the single target when finite, `min_temp` otherwise.
#[must_use]
pub fn slider_value(snapshot: &EntitySnapshot) -> f64 {
    finite(snapshot.target_temperature).unwrap_or(snapshot.min_temp)
}
