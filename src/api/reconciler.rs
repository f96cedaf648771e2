use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::derive_pending_setpoint;
use crate::render::Renderer;

use super::{HassContext, ThermostatCard};

impl<R: Renderer> ThermostatCard<R> {
    /// Entry point for a new host context.
    ///
    /// Decides whether the card needs a new frame, then runs the pre-render
    /// setpoint reconciliation so the next frame never shows a stale value.
    /// Returns whether a render is required.
    pub fn update(&mut self, context: Arc<HassContext>) -> bool {
        let render_required = self.should_update(&context);
        self.core.context = Some(context);
        self.reconcile_pending_setpoint();
        self.core.runtime.config_changed = false;
        if render_required {
            self.mark_dirty();
        }
        render_required
    }

    /// True when `context` differs from the current one in anything the card
    /// displays: first context, config change, ambient settings, or a new
    /// snapshot identity for the configured entity.
    #[must_use]
    pub fn should_update(&self, context: &Arc<HassContext>) -> bool {
        let Some(config) = self.core.config.as_ref() else {
            return false;
        };
        if self.core.runtime.config_changed {
            return true;
        }
        let Some(previous) = self.core.context.as_ref() else {
            return true;
        };
        if Arc::ptr_eq(previous, context) {
            return false;
        }
        if previous.ambient_changed(context) {
            return true;
        }
        match (previous.state(&config.entity), context.state(&config.entity)) {
            (Some(old), Some(new)) => !Arc::ptr_eq(old, new),
            (None, None) => false,
            _ => true,
        }
    }

    /// Recomputes the pending setpoint when the configured entity's snapshot
    /// identity differs from the one it was last derived from.
    pub(super) fn reconcile_pending_setpoint(&mut self) {
        let Some(current) = self.tracked_snapshot().cloned() else {
            if self.core.tracked.take().is_some() {
                trace!("tracked entity left the state set");
            }
            return;
        };
        let unchanged = self
            .core
            .tracked
            .as_ref()
            .is_some_and(|tracked| Arc::ptr_eq(tracked, &current));
        if unchanged {
            return;
        }

        let pending = derive_pending_setpoint(&current);
        debug!(
            entity_id = %current.entity_id,
            ?pending,
            "snapshot changed, pending setpoint recomputed"
        );
        if current.is_unavailable() {
            self.core.interaction.reset();
        }
        self.core.pending_setpoint = pending;
        self.core.tracked = Some(current);
        self.core.runtime.snapshot_changed = true;
    }
}
