use egui::{Color32, Pos2};

mod painter;
mod pixmap;

pub use painter::PainterTarget;
pub use pixmap::PixmapTarget;

/// Font classification for sticker glyphs.
///
/// Pictographic glyphs need a font with emoji coverage; everything else is
/// drawn with a plain text face. Targets decide how to honor the hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphFont {
    Text,
    Emoji,
}

/// Rendering surface that commands paint onto.
///
/// Implementations own their coordinate mapping (screen offset for the live
/// painter, scale transform for exports). Each call is self-contained: no
/// transform or style set up by one call may leak into the next.
pub trait RenderTarget {
    /// Wipe the whole surface before a repaint.
    fn clear(&mut self);

    /// Stroke a connected polyline through `points` in order.
    fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32);

    /// Stroke a circle outline.
    fn stroke_circle(&mut self, center: Pos2, radius: f32, width: f32, color: Color32);

    /// Draw `glyph` centered on `anchor`, rotated by `rotation` degrees.
    fn draw_glyph(
        &mut self,
        glyph: &str,
        anchor: Pos2,
        rotation: f32,
        size: f32,
        font: GlyphFont,
        color: Color32,
    );
}
