use std::sync::OnceLock;

use egui::Color32;
use log::{debug, warn};
use rustybuzz::ttf_parser::{GlyphId, OutlineBuilder, RasterImageFormat};
use rustybuzz::UnicodeBuffer;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};

use crate::render::GlyphFont;

/// Font stacks mirroring the live surface: an emoji-capable stack for
/// pictographic glyphs, a plain text stack for everything else.
const EMOJI_FAMILIES: &[&str] = &[
    "Apple Color Emoji",
    "Segoe UI Emoji",
    "Noto Color Emoji",
    "Noto Emoji",
];
const TEXT_FAMILIES: &[&str] = &["Arial", "DejaVu Sans", "Liberation Sans"];

/// System font access for export rendering.
///
/// The live surface draws glyphs through egui's font atlas; exports rasterize
/// them from installed fonts instead. The database is loaded lazily on the
/// first glyph drawn, so sessions that never export (or never stamp a
/// sticker) pay nothing.
pub struct FontLibrary {
    db: OnceLock<fontdb::Database>,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("loaded", &self.db.get().is_some())
            .finish()
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        Self { db: OnceLock::new() }
    }

    fn database(&self) -> &fontdb::Database {
        self.db.get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            debug!("loaded {} font faces", db.len());
            db
        })
    }

    /// Pick a face for the glyph class, falling back to any sans-serif.
    fn select_face(&self, font: GlyphFont) -> Option<fontdb::ID> {
        let names = match font {
            GlyphFont::Emoji => EMOJI_FAMILIES,
            GlyphFont::Text => TEXT_FAMILIES,
        };
        let mut families: Vec<fontdb::Family<'_>> =
            names.iter().copied().map(fontdb::Family::Name).collect();
        families.push(fontdb::Family::SansSerif);

        self.database().query(&fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        })
    }

    /// Rasterize `glyph` onto `pixmap`, centered on the local origin,
    /// under `transform` (the caller composes anchor translation, rotation
    /// and export scale into it).
    ///
    /// Best-effort: a machine with no usable font draws nothing.
    pub(crate) fn draw_glyph(
        &self,
        pixmap: &mut Pixmap,
        glyph: &str,
        size: f32,
        font: GlyphFont,
        color: Color32,
        transform: Transform,
    ) {
        let Some(id) = self.select_face(font) else {
            warn!("no font available for {font:?} glyph {glyph:?}");
            return;
        };

        let drawn = self.database().with_face_data(id, |data, index| {
            let Some(face) = rustybuzz::Face::from_slice(data, index) else {
                warn!("font face {id:?} failed to parse");
                return;
            };

            let upem = face.units_per_em() as f32;
            let scale = size / upem;

            let mut buffer = UnicodeBuffer::new();
            buffer.push_str(glyph);
            let shaped = rustybuzz::shape(&face, &[], buffer);
            let infos = shaped.glyph_infos();
            let positions = shaped.glyph_positions();

            // Center the run: horizontally on the total advance, vertically
            // on the ascender/descender midline (the em-box middle, matching
            // the live surface's centered layout).
            let run_width: i32 = positions.iter().map(|p| p.x_advance).sum();
            let mut pen_x = -(run_width as f32) * scale / 2.0;
            let baseline_y =
                (f32::from(face.ascender()) + f32::from(face.descender())) * scale / 2.0;

            for (info, pos) in infos.iter().zip(positions) {
                let glyph_id = GlyphId(info.glyph_id as u16);
                let origin_x = pen_x + pos.x_offset as f32 * scale;
                let origin_y = baseline_y - pos.y_offset as f32 * scale;

                let mut outline = GlyphOutline::new(origin_x, origin_y, scale);
                if face.outline_glyph(glyph_id, &mut outline).is_some() {
                    if let Some(path) = outline.builder.finish() {
                        let mut paint = Paint::default();
                        paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
                        paint.anti_alias = true;
                        pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
                    }
                } else {
                    // Color-emoji faces often carry PNG strikes instead of
                    // outlines (CBDT, sbix).
                    draw_raster_glyph(pixmap, &face, glyph_id, origin_x, origin_y, size, transform);
                }

                pen_x += pos.x_advance as f32 * scale;
            }
        });
        if drawn.is_none() {
            warn!("font face {id:?} could not be loaded");
        }
    }
}

/// Blit an embedded raster strike for glyphs without outlines.
fn draw_raster_glyph(
    pixmap: &mut Pixmap,
    face: &rustybuzz::Face<'_>,
    glyph_id: GlyphId,
    origin_x: f32,
    origin_y: f32,
    size: f32,
    transform: Transform,
) {
    let Some(image) = face.glyph_raster_image(glyph_id, size as u16) else {
        return;
    };
    if image.format != RasterImageFormat::PNG {
        return;
    }
    let Ok(strike) = Pixmap::decode_png(image.data) else {
        warn!("embedded strike for glyph {} failed to decode", glyph_id.0);
        return;
    };

    // Strike offsets are font-relative: x is the left bearing, y the top of
    // the bitmap above the baseline.
    let k = size / f32::from(image.pixels_per_em);
    let left = origin_x + f32::from(image.x) * k;
    let top = origin_y - f32::from(image.y) * k;
    let placed = transform
        .pre_concat(Transform::from_translate(left, top))
        .pre_concat(Transform::from_scale(k, k));

    pixmap.draw_pixmap(0, 0, strike.as_ref(), &PixmapPaint::default(), placed, None);
}

/// Maps font-unit contours (y-up) into surface-local pixels (y-down).
struct GlyphOutline {
    builder: PathBuilder,
    x: f32,
    y: f32,
    scale: f32,
}

impl GlyphOutline {
    fn new(x: f32, y: f32, scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            x,
            y,
            scale,
        }
    }

    fn map_x(&self, x: f32) -> f32 {
        self.x + x * self.scale
    }

    fn map_y(&self, y: f32) -> f32 {
        self.y - y * self.scale
    }
}

impl OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.map_x(x), self.map_y(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.map_x(x), self.map_y(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder
            .quad_to(self.map_x(x1), self.map_y(y1), self.map_x(x), self.map_y(y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.map_x(x1),
            self.map_y(y1),
            self.map_x(x2),
            self.map_y(y2),
            self.map_x(x),
            self.map_y(y),
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
