use std::io::Cursor;

use egui::Vec2;
use image::RgbaImage;
use thiserror::Error;
use tiny_skia::{Pixmap, Transform};

use crate::command::Command;
use crate::render::{PixmapTarget, RenderTarget};
use crate::text::FontLibrary;

/// Errors that can occur while exporting the drawing.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("export dimensions must be positive")]
    InvalidDimensions,
    #[error("failed to allocate export surface")]
    SurfaceAllocation,
    #[error("failed to encode png: {0}")]
    Encoding(#[from] image::ImageError),
}

/// Exports are composited over opaque white; the live surface has no
/// implicit background.
const BACKGROUND: tiny_skia::Color = tiny_skia::Color::WHITE;

/// Replay `commands` onto a fresh raster surface of `width`×`height` pixels
/// and encode it as PNG.
///
/// The surface is scaled from the live surface size, so exporting at a
/// higher resolution magnifies the whole drawing, stroke widths and sticker
/// glyphs included. Live state is never touched.
pub fn export_png(
    commands: &[Command],
    surface_size: Vec2,
    width: u32,
    height: u32,
    fonts: &FontLibrary,
) -> Result<Vec<u8>, ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::InvalidDimensions);
    }

    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::SurfaceAllocation)?;

    let scale_x = width as f32 / surface_size.x;
    let scale_y = height as f32 / surface_size.y;
    let transform = Transform::from_scale(scale_x, scale_y);

    let mut target = PixmapTarget::new(&mut pixmap, transform, BACKGROUND, fonts);
    target.clear();
    for command in commands {
        command.render(&mut target);
    }

    encode_png(&pixmap, width, height)
}

fn encode_png(pixmap: &Pixmap, width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    // tiny-skia stores premultiplied RGBA; straighten it before encoding.
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let image = RgbaImage::from_raw(width, height, rgba).ok_or(ExportError::SurfaceAllocation)?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}
