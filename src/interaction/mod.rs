use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SliderGesture {
    #[default]
    Idle,
    /// Pointer is down and moving; values are previewed, never dispatched.
    Dragging,
}

/// Public slider interaction snapshot exposed to host applications.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SliderInteractionState {
    gesture: SliderGesture,
    last_drag_value: Option<f64>,
    drag_events: u32,
}

impl SliderInteractionState {
    #[must_use]
    pub fn gesture(self) -> SliderGesture {
        self.gesture
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        self.gesture == SliderGesture::Dragging
    }

    /// Value of the most recent drag event of the current gesture.
    #[must_use]
    pub fn last_drag_value(self) -> Option<f64> {
        self.last_drag_value
    }

    /// Number of drag events seen since the gesture started.
    #[must_use]
    pub fn drag_events(self) -> u32 {
        self.drag_events
    }

    pub fn on_drag(&mut self, value: f64) {
        if self.gesture == SliderGesture::Idle {
            self.drag_events = 0;
        }
        self.gesture = SliderGesture::Dragging;
        self.last_drag_value = Some(value);
        self.drag_events = self.drag_events.saturating_add(1);
    }

    /// Ends the gesture and returns the value to commit.
    ///
    /// An explicit commit value wins over the last dragged one.
    pub fn on_commit(&mut self, value: Option<f64>) -> Option<f64> {
        let committed = value.or(self.last_drag_value);
        self.reset();
        committed
    }

    /// Drops any in-flight gesture, e.g. when the device becomes unavailable.
    pub fn reset(&mut self) {
        self.gesture = SliderGesture::Idle;
        self.last_drag_value = None;
        self.drag_events = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{SliderGesture, SliderInteractionState};

    #[test]
    fn drag_then_commit_returns_last_value() {
        let mut state = SliderInteractionState::default();
        state.on_drag(20.0);
        state.on_drag(20.5);
        state.on_drag(21.0);
        assert!(state.is_dragging());
        assert_eq!(state.drag_events(), 3);

        assert_eq!(state.on_commit(None), Some(21.0));
        assert_eq!(state.gesture(), SliderGesture::Idle);
        assert_eq!(state.last_drag_value(), None);
    }

    #[test]
    fn commit_without_drag_uses_explicit_value_only() {
        let mut state = SliderInteractionState::default();
        assert_eq!(state.on_commit(None), None);
        assert_eq!(state.on_commit(Some(18.0)), Some(18.0));
    }
}
