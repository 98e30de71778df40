use egui::emath::Rot2;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};

use super::{GlyphFont, RenderTarget};

/// Live target painting into the canvas region of an egui frame.
///
/// Commands use surface-local coordinates; this target offsets them into the
/// canvas rect and clips to it.
pub struct PainterTarget<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> PainterTarget<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, point: Pos2) -> Pos2 {
        self.rect.min + point.to_vec2()
    }
}

impl RenderTarget for PainterTarget<'_> {
    fn clear(&mut self) {
        // An egui painter starts every frame empty; the shell owns the
        // canvas backdrop.
    }

    fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        let points: Vec<Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter
            .add(Shape::line(points, Stroke::new(width, color)));
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, width: f32, color: Color32) {
        self.painter
            .circle_stroke(self.to_screen(center), radius, Stroke::new(width, color));
    }

    fn draw_glyph(
        &mut self,
        glyph: &str,
        anchor: Pos2,
        rotation: f32,
        size: f32,
        _font: GlyphFont,
        color: Color32,
    ) {
        // egui's proportional family already chains emoji fallbacks, so both
        // glyph classes resolve through it.
        let galley = self
            .painter
            .layout_no_wrap(glyph.to_owned(), FontId::proportional(size), color);

        let radians = rotation.to_radians();
        let center = self.to_screen(anchor);
        // TextShape rotates around the galley origin; pull the origin back by
        // the rotated half-extent so the glyph stays centered on the anchor.
        let origin = center + Rot2::from_angle(radians) * (-(galley.size() / 2.0));

        self.painter
            .add(TextShape::new(origin, galley, color).with_angle(radians));
    }
}
