use egui::{Color32, Pos2};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::{GlyphFont, RenderTarget};
use crate::text::FontLibrary;

/// Raster target for exports.
///
/// All drawing goes through one fixed transform (the export scale), so the
/// replayed drawing is a faithful magnification of the live surface: stroke
/// widths and glyph sizes scale together with the geometry.
pub struct PixmapTarget<'a> {
    pixmap: &'a mut Pixmap,
    transform: Transform,
    background: tiny_skia::Color,
    fonts: &'a FontLibrary,
}

impl<'a> PixmapTarget<'a> {
    pub fn new(
        pixmap: &'a mut Pixmap,
        transform: Transform,
        background: tiny_skia::Color,
        fonts: &'a FontLibrary,
    ) -> Self {
        Self {
            pixmap,
            transform,
            background,
            fonts,
        }
    }

    fn paint(color: Color32) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
        paint.anti_alias = true;
        paint
    }

    fn stroke(width: f32) -> Stroke {
        Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        }
    }
}

impl RenderTarget for PixmapTarget<'_> {
    fn clear(&mut self) {
        self.pixmap.fill(self.background);
    }

    fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(first.x, first.y);
        for point in rest {
            pb.line_to(point.x, point.y);
        }
        let Some(path) = pb.finish() else {
            return;
        };

        self.pixmap.stroke_path(
            &path,
            &Self::paint(color),
            &Self::stroke(width),
            self.transform,
            None,
        );
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, width: f32, color: Color32) {
        let mut pb = PathBuilder::new();
        pb.push_circle(center.x, center.y, radius);
        let Some(path) = pb.finish() else {
            return;
        };

        self.pixmap.stroke_path(
            &path,
            &Self::paint(color),
            &Self::stroke(width),
            self.transform,
            None,
        );
    }

    fn draw_glyph(
        &mut self,
        glyph: &str,
        anchor: Pos2,
        rotation: f32,
        size: f32,
        font: GlyphFont,
        color: Color32,
    ) {
        // Composed per call: anchor translation and rotation never leak into
        // the next command.
        let placed = self
            .transform
            .pre_concat(Transform::from_translate(anchor.x, anchor.y))
            .pre_concat(Transform::from_rotate(rotation));

        self.fonts
            .draw_glyph(self.pixmap, glyph, size, font, color, placed);
    }
}
