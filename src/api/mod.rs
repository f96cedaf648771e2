mod card;
mod card_config;
mod dispatcher;
mod geometry_autoscaler;
mod hass_context;
mod host_events;
mod mode_icons;
mod number_format;
mod projector;
mod reconciler;
mod render_gate;
mod theming;

pub use card::ThermostatCard;
pub use card_config::{CARD_SIZE, ThermostatCardConfig, stub_config};
pub use dispatcher::{ClimateService, CommandSink, DiscardCommands, ServiceCall};
pub use geometry_autoscaler::{EstimatedLayoutProbe, GeometryAutoscaler, LayoutProbe};
pub use hass_context::{HassContext, Localize, MapLocalizer, Themes};
pub use host_events::{HostEvent, HostEventListener};
pub use mode_icons::{MORE_INFO_ICON, UNKNOWN_MODE_CLASS, build_mode_row, mode_class, mode_icon};
pub use number_format::{NumberFormatOptions, NumberLocale, format_number};
pub use projector::{display_name, mode_text, set_value_text};
pub use theming::ThemeApplier;
