mod frame;
mod null_renderer;
mod primitives;

pub use frame::{CardFrame, EntityNotFoundView, ThermostatView};
pub use null_renderer::NullRenderer;
pub use primitives::{
    BoundingBox, CURRENT_TEMPERATURE_VIEW_BOX, CurrentTemperatureView, IconButton, ModeIcon,
    ModeRow, ModeSlot, SetValuesView, SliderView, ViewBox,
};

use crate::error::CardResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `CardFrame` so drawing code stays
/// isolated from reconciliation and command dispatch.
pub trait Renderer {
    fn render(&mut self, frame: &CardFrame) -> CardResult<()>;
}
