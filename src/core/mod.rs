pub mod hvac_mode;
pub mod setpoint;
pub mod snapshot;
pub mod step;
pub mod types;

pub use hvac_mode::{HvacMode, compare_hvac_modes, sorted_hvac_modes};
pub use setpoint::{PendingSetpoint, derive_pending_setpoint};
pub use snapshot::{EntitySnapshot, TemperatureRange};
pub use step::{SliderRange, default_step_for_unit, resolve_step_size, slider_value};
pub use types::{
    Availability, CLIMATE_DOMAIN, PRESET_NONE, TemperatureUnit, UNAVAILABLE_STATE, UnitSystem,
    entity_domain, entity_object_id, finite,
};
