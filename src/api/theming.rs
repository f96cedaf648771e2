use std::sync::Arc;

use tracing::trace;

use crate::render::Renderer;

use super::{ThermostatCard, Themes};

/// Applies a theme to the card's host element. Styling itself is the host's
/// business; the card only decides when to re-apply.
pub trait ThemeApplier {
    fn apply_themes(&mut self, themes: &Themes, selected: Option<&str>);
}

/// Theme inputs of the last application, compared by identity.
#[derive(Debug, Clone)]
pub(super) struct AppliedTheme {
    themes: Arc<Themes>,
    selected: Option<String>,
}

impl<R: Renderer> ThermostatCard<R> {
    pub fn set_theme_applier(&mut self, applier: Box<dyn ThemeApplier>) {
        self.core.runtime.theme_applier = Some(applier);
        self.core.runtime.applied_theme = None;
    }

    /// Re-applies themes when the host theme set or the configured theme
    /// changed since the last application.
    pub(super) fn apply_themes_if_changed(&mut self) {
        let (Some(context), Some(config)) = (&self.core.context, &self.core.config) else {
            return;
        };
        let themes = context.themes().clone();
        let selected = config.theme.clone();

        let unchanged = self
            .core
            .runtime
            .applied_theme
            .as_ref()
            .is_some_and(|applied| {
                Arc::ptr_eq(&applied.themes, &themes) && applied.selected == selected
            });
        if unchanged {
            return;
        }

        if let Some(applier) = self.core.runtime.theme_applier.as_mut() {
            trace!(theme = selected.as_deref().unwrap_or("default"), "applying themes");
            applier.apply_themes(&themes, selected.as_deref());
        }
        self.core.runtime.applied_theme = Some(AppliedTheme { themes, selected });
    }
}
