use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{HvacMode, SliderRange};
use crate::error::{CardError, CardResult};

/// Tight bounding box of a rendered text group, in the group's own units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// Viewport of a scalable region: origin and size, plus the matching
/// intrinsic width/height so the region scales to fit its content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// A view box that exactly covers `bounds`.
    #[must_use]
    pub const fn fit(bounds: BoundingBox) -> Self {
        Self::new(bounds.x, bounds.y, bounds.width, bounds.height)
    }

    /// Attribute form: `"min_x min_y width height"`.
    #[must_use]
    pub fn attribute(self) -> String {
        format!(
            "{} {} {} {}",
            self.min_x, self.min_y, self.width, self.height
        )
    }

    pub fn validate(self) -> CardResult<()> {
        if !BoundingBox::new(self.min_x, self.min_y, self.width, self.height).is_valid() {
            return Err(CardError::InvalidData(
                "view box must be finite with non-negative size".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Fixed viewport of the current-temperature readout. It stays anchored to
/// this reference frame and is never refit to its text.
pub const CURRENT_TEMPERATURE_VIEW_BOX: ViewBox = ViewBox::new(0.0, 0.0, 40.0, 20.0);

/// Circular slider state handed to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SliderView {
    /// Device unavailable: rendered, but never interactive.
    Disabled,
    Enabled { value: f64, range: SliderRange },
}

impl SliderView {
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    pub fn validate(self) -> CardResult<()> {
        let Self::Enabled { value, range } = self else {
            return Ok(());
        };
        if !value.is_finite() || !range.min.is_finite() || !range.max.is_finite() {
            return Err(CardError::InvalidData(
                "slider value and bounds must be finite".to_owned(),
            ));
        }
        if !range.step.is_finite() || range.step <= 0.0 {
            return Err(CardError::InvalidData(
                "slider step must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Clickable icon button (mode selector or the more-info affordance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconButton {
    pub icon: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeIcon {
    pub mode: HvacMode,
    pub button: IconButton,
    pub selected: bool,
}

/// One position in the mode row. Modes without a known icon keep their slot
/// but render nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModeSlot {
    Icon(ModeIcon),
    Empty { mode: HvacMode },
}

impl ModeSlot {
    #[must_use]
    pub fn icon(&self) -> Option<&ModeIcon> {
        match self {
            Self::Icon(icon) => Some(icon),
            Self::Empty { .. } => None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> &HvacMode {
        match self {
            Self::Icon(icon) => &icon.mode,
            Self::Empty { mode } => mode,
        }
    }
}

pub type ModeRow = SmallVec<[ModeSlot; 7]>;

/// Current-temperature readout; `value` is `None` when there is no reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentTemperatureView {
    pub value: Option<String>,
    pub unit: String,
    pub view_box: ViewBox,
}

/// Set-value readout: the auto-fit text group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetValuesView {
    pub value_text: String,
    pub mode_text: String,
    /// Last measured fit; `None` until the first layout commit was measured.
    pub view_box: Option<ViewBox>,
}

#[cfg(test)]
mod tests {
    use super::{BoundingBox, SliderView, ViewBox};
    use crate::core::SliderRange;

    #[test]
    fn view_box_fits_bounds_exactly() {
        let view_box = ViewBox::fit(BoundingBox::new(-21.5, -15.25, 43.0, 30.5));
        assert_eq!(view_box.attribute(), "-21.5 -15.25 43 30.5");
        view_box.validate().expect("valid");
    }

    #[test]
    fn negative_size_is_invalid() {
        assert!(!BoundingBox::new(0.0, 0.0, -1.0, 2.0).is_valid());
        assert!(ViewBox::new(0.0, 0.0, 1.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn enabled_slider_requires_positive_step() {
        let slider = SliderView::Enabled {
            value: 20.0,
            range: SliderRange {
                min: 7.0,
                max: 35.0,
                step: 0.0,
            },
        };
        assert!(slider.validate().is_err());
        assert!(SliderView::Disabled.validate().is_ok());
    }
}
