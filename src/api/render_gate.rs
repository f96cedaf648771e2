use tracing::trace;

use crate::error::CardResult;
use crate::render::{CardFrame, Renderer};

use super::ThermostatCard;

impl<R: Renderer> ThermostatCard<R> {
    /// Projects the current frame, hands it to the renderer and runs the
    /// post-render hook.
    pub fn render(&mut self) -> CardResult<()> {
        let frame = self.build_frame();
        self.renderer.render(&frame)?;
        self.finalize_render_cycle(&frame);
        Ok(())
    }

    /// Renders only when something changed since the last frame.
    pub fn render_if_dirty(&mut self) -> CardResult<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    fn finalize_render_cycle(&mut self, frame: &CardFrame) {
        self.core.runtime.dirty = false;
        trace!(empty = frame.is_empty(), "frame rendered");
        self.apply_themes_if_changed();
        self.schedule_rescale_after_render(frame);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use crate::api::{HassContext, ThemeApplier, Themes, ThermostatCard, ThermostatCardConfig};
    use crate::core::{EntitySnapshot, HvacMode, UnitSystem};
    use crate::render::NullRenderer;

    #[derive(Clone, Default)]
    struct RecordingApplier {
        applied: Rc<RefCell<Vec<Option<String>>>>,
    }

    impl ThemeApplier for RecordingApplier {
        fn apply_themes(&mut self, _themes: &Themes, selected: Option<&str>) {
            self.applied.borrow_mut().push(selected.map(str::to_owned));
        }
    }

    fn configured_card(theme: Option<&str>) -> ThermostatCard<NullRenderer> {
        let mut config = ThermostatCardConfig::new("climate.hall");
        if let Some(theme) = theme {
            config = config.with_theme(theme);
        }
        let mut card = ThermostatCard::new(NullRenderer::default());
        card.set_config(config).expect("config");
        card
    }

    #[test]
    fn gate_skips_clean_card() {
        let mut card = configured_card(None);
        let context = Arc::new(
            HassContext::new(UnitSystem::metric())
                .with_snapshot(EntitySnapshot::new("climate.hall", HvacMode::Heat)),
        );
        card.update(context);

        assert!(card.render_if_dirty().expect("render"));
        assert!(!card.render_if_dirty().expect("render"));
        assert_eq!(card.renderer().render_count, 1);
    }

    #[test]
    fn themes_apply_once_per_theme_set() {
        let mut card = configured_card(Some("midnight"));
        let applier = RecordingApplier::default();
        card.set_theme_applier(Box::new(applier.clone()));

        let first = Arc::new(
            HassContext::new(UnitSystem::metric())
                .with_snapshot(EntitySnapshot::new("climate.hall", HvacMode::Heat)),
        );
        card.update(Arc::clone(&first));
        card.render().expect("render");
        card.render().expect("render");
        assert_eq!(*applier.applied.borrow(), [Some("midnight".to_owned())]);

        let retheme = Arc::new((*first).clone().with_themes(Arc::new(Themes::default())));
        card.update(retheme);
        card.render().expect("render");
        assert_eq!(applier.applied.borrow().len(), 2);
    }
}
