use tracing::{debug, warn};

use crate::render::{BoundingBox, CardFrame, Renderer, ViewBox};

use super::ThermostatCard;

/// Host-side measurement of committed layout.
///
/// Only valid once the host has finished laying out the last rendered frame;
/// the card calls it exclusively from `render_committed`.
pub trait LayoutProbe {
    /// Tight bounding box of the set-value text group, `None` when the host
    /// cannot measure (element detached, zero-size container, ...).
    fn set_values_bounds(&self) -> Option<BoundingBox>;
}

/// Deterministic probe for headless hosts: estimates the text group from
/// character classes instead of asking a layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatedLayoutProbe {
    value_text: String,
    mode_text: String,
    value_font_px: f64,
    mode_font_px: f64,
    mode_line_offset_px: f64,
}

impl EstimatedLayoutProbe {
    const VALUE_FONT_PX: f64 = 20.0;
    const MODE_FONT_PX: f64 = 16.0;
    const MODE_LINE_OFFSET_PX: f64 = 22.0;

    #[must_use]
    pub fn new(value_text: impl Into<String>, mode_text: impl Into<String>) -> Self {
        Self {
            value_text: value_text.into(),
            mode_text: mode_text.into(),
            value_font_px: Self::VALUE_FONT_PX,
            mode_font_px: Self::MODE_FONT_PX,
            mode_line_offset_px: Self::MODE_LINE_OFFSET_PX,
        }
    }

    /// Probe for the set-value group of `frame`; `None` for non-card frames.
    #[must_use]
    pub fn from_frame(frame: &CardFrame) -> Option<Self> {
        let view = frame.thermostat()?;
        Some(Self::new(
            view.set_values.value_text.clone(),
            view.set_values.mode_text.clone(),
        ))
    }
}

impl LayoutProbe for EstimatedLayoutProbe {
    fn set_values_bounds(&self) -> Option<BoundingBox> {
        let value_width = estimate_text_width_px(&self.value_text, self.value_font_px);
        let mode_width = estimate_text_width_px(&self.mode_text, self.mode_font_px);
        let width = value_width.max(mode_width);
        if width <= 0.0 {
            return None;
        }
        // Both lines are centered on x = 0; the value baseline sits at y = 0.
        let top = -self.value_font_px;
        let bottom = if self.mode_text.is_empty() {
            self.value_font_px * 0.25
        } else {
            self.mode_line_offset_px + self.mode_font_px * 0.25
        };
        Some(BoundingBox::new(-width / 2.0, top, width, bottom - top))
    }
}

fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let units = trimmed.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '\u{2212}' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    units * font_size_px
}

/// Deferred "measure, then resize" continuation for the set-value readout.
///
/// A rescale is scheduled after a render and only runs when the host reports
/// that layout has settled. Repeated schedules before that coalesce into one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryAutoscaler {
    pending: Option<PendingRescale>,
    view_box: Option<ViewBox>,
    measured_text: Option<String>,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingRescale {
    text: String,
    generation: u64,
}

impl GeometryAutoscaler {
    #[must_use]
    pub fn view_box(&self) -> Option<ViewBox> {
        self.view_box
    }

    #[must_use]
    pub fn has_pending_rescale(&self) -> bool {
        self.pending.is_some()
    }

    /// True when `text` has not been measured or scheduled yet.
    #[must_use]
    pub fn is_stale_for(&self, text: &str) -> bool {
        let scheduled = self.pending.as_ref().map(|pending| pending.text.as_str());
        self.measured_text.as_deref() != Some(text) && scheduled != Some(text)
    }

    pub fn schedule(&mut self, text: &str) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(PendingRescale {
            text: text.to_owned(),
            generation: self.generation,
        });
    }

    /// Runs the pending continuation against committed layout.
    ///
    /// Returns the new view box when one was applied.
    pub fn on_render_committed(&mut self, probe: &dyn LayoutProbe) -> Option<ViewBox> {
        let pending = self.pending.take()?;
        let Some(bounds) = probe.set_values_bounds() else {
            debug!(generation = pending.generation, "set-value group not measurable yet");
            return None;
        };
        if !bounds.is_valid() {
            warn!(?bounds, "discarding invalid set-value bounds");
            return None;
        }

        let view_box = ViewBox::fit(bounds);
        debug!(
            generation = pending.generation,
            view_box = %view_box.attribute(),
            "set-value group rescaled"
        );
        self.view_box = Some(view_box);
        self.measured_text = Some(pending.text);
        Some(view_box)
    }
}

impl<R: Renderer> ThermostatCard<R> {
    #[must_use]
    pub fn set_values_view_box(&self) -> Option<ViewBox> {
        self.core.autoscaler.view_box()
    }

    #[must_use]
    pub fn has_pending_rescale(&self) -> bool {
        self.core.autoscaler.has_pending_rescale()
    }

    /// Host signal that the last rendered frame is fully laid out.
    ///
    /// Measures the set-value group through `probe` and refits its view box.
    /// Does nothing without a pending rescale. A refit marks the card dirty so
    /// the next frame carries the new view box.
    pub fn render_committed(&mut self, probe: &dyn LayoutProbe) -> Option<ViewBox> {
        let view_box = self.core.autoscaler.on_render_committed(probe)?;
        self.mark_dirty();
        Some(view_box)
    }

    /// Post-render hook: schedules a rescale when the tracked snapshot changed
    /// or the set-value text is not the one last measured.
    pub(super) fn schedule_rescale_after_render(&mut self, frame: &CardFrame) {
        let Some(view) = frame.thermostat() else {
            return;
        };
        let text = &view.set_values.value_text;
        let snapshot_changed = std::mem::take(&mut self.core.runtime.snapshot_changed);
        if snapshot_changed || self.core.autoscaler.is_stale_for(text) {
            debug!(%text, snapshot_changed, "scheduling set-value rescale");
            self.core.autoscaler.schedule(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EstimatedLayoutProbe, GeometryAutoscaler, LayoutProbe};
    use crate::render::{BoundingBox, ViewBox};

    struct FixedProbe(Option<BoundingBox>);

    impl LayoutProbe for FixedProbe {
        fn set_values_bounds(&self) -> Option<BoundingBox> {
            self.0
        }
    }

    #[test]
    fn commit_without_schedule_is_noop() {
        let mut autoscaler = GeometryAutoscaler::default();
        let probe = FixedProbe(Some(BoundingBox::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(autoscaler.on_render_committed(&probe), None);
        assert_eq!(autoscaler.view_box(), None);
    }

    #[test]
    fn scheduled_rescale_fits_measured_box_once() {
        let mut autoscaler = GeometryAutoscaler::default();
        autoscaler.schedule("21.5");
        autoscaler.schedule("22.0");
        let probe = FixedProbe(Some(BoundingBox::new(-24.0, -20.0, 48.0, 43.0)));

        let view_box = autoscaler.on_render_committed(&probe);
        assert_eq!(view_box, Some(ViewBox::new(-24.0, -20.0, 48.0, 43.0)));
        assert!(!autoscaler.has_pending_rescale());
        assert!(!autoscaler.is_stale_for("22.0"));
        assert!(autoscaler.is_stale_for("21.5"));
        assert_eq!(autoscaler.on_render_committed(&probe), None);
    }

    #[test]
    fn unmeasurable_layout_keeps_previous_fit() {
        let mut autoscaler = GeometryAutoscaler::default();
        autoscaler.schedule("20");
        autoscaler.on_render_committed(&FixedProbe(Some(BoundingBox::new(0.0, 0.0, 5.0, 5.0))));
        autoscaler.schedule("20 - 24");
        assert_eq!(autoscaler.on_render_committed(&FixedProbe(None)), None);
        assert_eq!(autoscaler.view_box(), Some(ViewBox::new(0.0, 0.0, 5.0, 5.0)));
        assert!(autoscaler.is_stale_for("20 - 24"));
    }

    #[test]
    fn estimated_probe_widens_with_range_text() {
        let single = EstimatedLayoutProbe::new("21", "Heat")
            .set_values_bounds()
            .expect("single");
        let range = EstimatedLayoutProbe::new("19.5 - 24.0", "Heat")
            .set_values_bounds()
            .expect("range");
        assert!(range.width > single.width);
        assert!((single.x + single.width / 2.0).abs() < 1e-9);
        assert!(EstimatedLayoutProbe::new("", "").set_values_bounds().is_none());
    }
}
