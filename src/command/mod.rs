mod history;
mod preview;
mod sticker;
mod stroke;

pub use history::CommandHistory;
pub use preview::Preview;
pub use sticker::{STICKER_SIZE, StickerCommand};
pub use stroke::StrokeCommand;

use crate::render::RenderTarget;

/// A committed drawing action.
///
/// Commands are pure render data: replaying the committed sequence in order
/// reproduces the drawing on any target at any scale. They never read pixels
/// back, and they are immutable once they leave the in-progress phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Freehand polyline stroke.
    Stroke(StrokeCommand),
    /// Glyph stamped at a fixed anchor.
    Sticker(StickerCommand),
}

impl Command {
    /// Paint this command onto the target.
    pub fn render(&self, target: &mut dyn RenderTarget) {
        match self {
            Command::Stroke(stroke) => stroke.render(target),
            Command::Sticker(sticker) => sticker.render(target),
        }
    }

    /// Mutable view of the stroke variant, reserved for the interaction
    /// machine while the stroke is in progress.
    pub(crate) fn as_stroke_mut(&mut self) -> Option<&mut StrokeCommand> {
        match self {
            Command::Stroke(stroke) => Some(stroke),
            Command::Sticker(_) => None,
        }
    }
}
