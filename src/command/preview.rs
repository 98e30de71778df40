use egui::{Color32, Pos2};

use super::sticker;
use crate::render::RenderTarget;

/// Outline color for the brush-size cursor circle.
const PREVIEW_OUTLINE: Color32 = Color32::DARK_GRAY;

/// Ephemeral render of the active tool at the cursor.
///
/// Previews are rebuilt on every idle pointer-move, drawn on top of the
/// committed drawing, and never enter history.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Brush-size circle shown while the brush tool hovers.
    Brush { center: Pos2, width: f32 },
    /// The selected sticker, rendered exactly like a committed stamp.
    Sticker {
        anchor: Pos2,
        glyph: String,
        rotation: f32,
    },
}

impl Preview {
    pub fn render(&self, target: &mut dyn RenderTarget) {
        match self {
            Preview::Brush { center, width } => {
                // Outline of diameter = brush width: signals size without ink.
                target.stroke_circle(*center, width / 2.0, 1.0, PREVIEW_OUTLINE);
            }
            Preview::Sticker {
                anchor,
                glyph,
                rotation,
            } => {
                sticker::draw_sticker(target, glyph, *anchor, *rotation);
            }
        }
    }
}
