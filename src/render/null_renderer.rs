use crate::error::CardResult;
use crate::render::{CardFrame, Renderer};

/// No-op renderer used by tests and headless card usage.
///
/// It still validates frame content and keeps the last frame so tests can
/// inspect exactly what a real backend would have drawn.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_frame: Option<CardFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &CardFrame) -> CardResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
