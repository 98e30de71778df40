use egui::{Color32, Pos2};

use crate::render::{GlyphFont, RenderTarget};

/// Glyph size on the live surface, in surface pixels. Exports scale it with
/// the rest of the drawing.
pub const STICKER_SIZE: f32 = 32.0;

/// A glyph stamped at a fixed anchor with a fixed rotation.
///
/// Stamps commit atomically on pointer-down; there is no drag phase. The
/// anchor can still be moved with [`StickerCommand::reposition`] before a
/// stamp is handed to history, but the finalized interaction model never
/// does so.
#[derive(Debug, Clone, PartialEq)]
pub struct StickerCommand {
    anchor: Pos2,
    glyph: String,
    rotation: f32,
}

impl StickerCommand {
    /// Create a stamp. `rotation` is in degrees and wraps into `[0, 360)`.
    pub fn new(anchor: Pos2, glyph: impl Into<String>, rotation: f32) -> Self {
        Self {
            anchor,
            glyph: glyph.into(),
            rotation: rotation.rem_euclid(360.0),
        }
    }

    /// Move the anchor, keeping glyph and rotation.
    pub fn reposition(&mut self, anchor: Pos2) {
        self.anchor = anchor;
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Rotation in degrees, within `[0, 360)`.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn render(&self, target: &mut dyn RenderTarget) {
        draw_sticker(target, &self.glyph, self.anchor, self.rotation);
    }
}

/// Shared by committed stamps and the sticker preview so both render
/// identically.
pub(crate) fn draw_sticker(target: &mut dyn RenderTarget, glyph: &str, anchor: Pos2, rotation: f32) {
    let font = if is_emoji(glyph) {
        GlyphFont::Emoji
    } else {
        GlyphFont::Text
    };
    target.draw_glyph(glyph, anchor, rotation, STICKER_SIZE, font, Color32::BLACK);
}

/// Classify a glyph as pictographic.
///
/// Covers the pictographic blocks (Mahjong/dominoes/cards through Symbols
/// and Pictographs Extended-A), the legacy symbol and dingbat blocks, and
/// the supplemental arrows/shapes used by keycap-style emoji.
pub(crate) fn is_emoji(glyph: &str) -> bool {
    glyph.chars().any(|c| {
        matches!(u32::from(c),
            0x1F000..=0x1FAFF
            | 0x2600..=0x27BF
            | 0x2B00..=0x2BFF
            | 0xFE0F)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_into_degree_range() {
        assert_eq!(StickerCommand::new(Pos2::ZERO, "x", 360.0).rotation(), 0.0);
        assert_eq!(StickerCommand::new(Pos2::ZERO, "x", 405.0).rotation(), 45.0);
        assert_eq!(StickerCommand::new(Pos2::ZERO, "x", -90.0).rotation(), 270.0);
        assert_eq!(StickerCommand::new(Pos2::ZERO, "x", 180.0).rotation(), 180.0);
    }

    #[test]
    fn emoji_glyphs_are_classified_as_emoji() {
        assert!(is_emoji("👻"));
        assert!(is_emoji("🗡️"));
        assert!(is_emoji("💥"));
        assert!(is_emoji("★\u{fe0f}"));
    }

    #[test]
    fn plain_text_glyphs_are_not() {
        assert!(!is_emoji("X"));
        assert!(!is_emoji("ab"));
        assert!(!is_emoji("7"));
    }
}
