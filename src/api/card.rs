use std::sync::Arc;

use tracing::debug;

use crate::core::{EntitySnapshot, PendingSetpoint};
use crate::error::{CardError, CardResult};
use crate::interaction::SliderInteractionState;
use crate::render::Renderer;

use super::card_config::CARD_SIZE;
use super::theming::AppliedTheme;
use super::{
    CommandSink, DiscardCommands, GeometryAutoscaler, HassContext, HostEventListener,
    ThemeApplier, ThermostatCardConfig,
};

/// Main facade consumed by host dashboards.
///
/// `ThermostatCard` owns the pending setpoint and the snapshot it was derived
/// from, reconciles both against every new host context, projects frames for
/// its renderer and turns gestures into device commands.
pub struct ThermostatCard<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: CardCore,
}

/// Internal card state used by the public facade.
pub(super) struct CardCore {
    pub(super) config: Option<ThermostatCardConfig>,
    pub(super) context: Option<Arc<HassContext>>,
    /// Snapshot the pending setpoint was last derived from.
    pub(super) tracked: Option<Arc<EntitySnapshot>>,
    pub(super) pending_setpoint: PendingSetpoint,
    pub(super) interaction: SliderInteractionState,
    pub(super) autoscaler: GeometryAutoscaler,
    pub(super) runtime: CardRuntimeState,
}

/// Host collaborators and per-cycle flags.
pub(super) struct CardRuntimeState {
    pub(super) commands: Box<dyn CommandSink>,
    pub(super) listeners: Vec<Box<dyn HostEventListener>>,
    pub(super) theme_applier: Option<Box<dyn ThemeApplier>>,
    pub(super) applied_theme: Option<AppliedTheme>,
    pub(super) dirty: bool,
    pub(super) config_changed: bool,
    /// Set by reconciliation, consumed by the post-render rescale hook.
    pub(super) snapshot_changed: bool,
}

impl Default for CardRuntimeState {
    fn default() -> Self {
        Self {
            commands: Box::new(DiscardCommands),
            listeners: Vec::new(),
            theme_applier: None,
            applied_theme: None,
            dirty: true,
            config_changed: false,
            snapshot_changed: false,
        }
    }
}

impl<R: Renderer> ThermostatCard<R> {
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            core: CardCore {
                config: None,
                context: None,
                tracked: None,
                pending_setpoint: PendingSetpoint::default(),
                interaction: SliderInteractionState::default(),
                autoscaler: GeometryAutoscaler::default(),
                runtime: CardRuntimeState::default(),
            },
        }
    }

    /// Validates and installs the card configuration.
    ///
    /// Fails fast with `CardError::InvalidConfig`; the previous configuration
    /// stays in place on error.
    pub fn set_config(&mut self, config: ThermostatCardConfig) -> CardResult<()> {
        config.validate()?;
        if self.core.config.as_ref() == Some(&config) {
            return Ok(());
        }
        let entity_switched = self
            .core
            .config
            .as_ref()
            .is_some_and(|previous| previous.entity != config.entity);
        if entity_switched {
            // A drag on the previous entity must never be committed to the new one.
            self.core.interaction.reset();
        }
        debug!(entity_id = %config.entity, entity_switched, "card configured");
        self.core.config = Some(config);
        self.core.runtime.config_changed = true;
        self.reconcile_pending_setpoint();
        self.mark_dirty();
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> Option<&ThermostatCardConfig> {
        self.core.config.as_ref()
    }

    #[must_use]
    pub fn context(&self) -> Option<&Arc<HassContext>> {
        self.core.context.as_ref()
    }

    #[must_use]
    pub fn card_size(&self) -> u32 {
        CARD_SIZE
    }

    #[must_use]
    pub fn pending_setpoint(&self) -> PendingSetpoint {
        self.core.pending_setpoint
    }

    #[must_use]
    pub fn interaction_state(&self) -> SliderInteractionState {
        self.core.interaction
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.core.runtime.dirty
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub(super) fn mark_dirty(&mut self) {
        self.core.runtime.dirty = true;
    }

    pub(super) fn configured_entity_id(&self) -> CardResult<String> {
        self.core
            .config
            .as_ref()
            .map(|config| config.entity.clone())
            .ok_or(CardError::NotConfigured)
    }

    /// Snapshot of the configured entity in the current context.
    pub(super) fn tracked_snapshot(&self) -> Option<&Arc<EntitySnapshot>> {
        let config = self.core.config.as_ref()?;
        self.core.context.as_ref()?.state(&config.entity)
    }
}
