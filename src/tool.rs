use egui::Color32;
use serde::{Deserialize, Serialize};

/// Mutually exclusive drawing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    Brush,
    Sticker,
}

/// Default brush width ("thin brush").
pub const THIN_BRUSH: f32 = 3.0;
/// Alternate brush width ("thick brush").
pub const THICK_BRUSH: f32 = 6.0;

/// Process-wide tool selection: active mode, brush styling, the registered
/// sticker glyphs, and sticker styling.
///
/// Exactly one mode is active at a time. Selecting a sticker glyph exits
/// brush mode; touching any brush setting exits sticker mode and drops the
/// glyph selection. These setters are the only writers, so the exclusion
/// invariant holds by construction.
///
/// Serializable so the shell can persist tool preferences between sessions.
/// The drawing itself is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolState {
    tool: Tool,
    brush_width: f32,
    brush_color: Color32,
    stickers: Vec<String>,
    selected_sticker: Option<usize>,
    sticker_rotation: f32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            brush_width: THIN_BRUSH,
            brush_color: Color32::BLACK,
            stickers: vec!["👻".to_owned(), "🗡️".to_owned(), "💥".to_owned()],
            selected_sticker: None,
            sticker_rotation: 0.0,
        }
    }
}

impl ToolState {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn brush_width(&self) -> f32 {
        self.brush_width
    }

    pub fn brush_color(&self) -> Color32 {
        self.brush_color
    }

    /// All registered sticker glyphs, in registration order.
    pub fn stickers(&self) -> &[String] {
        &self.stickers
    }

    /// The selected sticker glyph, if sticker mode is active.
    pub fn selected_sticker(&self) -> Option<&str> {
        self.selected_sticker
            .and_then(|i| self.stickers.get(i))
            .map(String::as_str)
    }

    pub fn selected_sticker_index(&self) -> Option<usize> {
        self.selected_sticker
    }

    /// Sticker rotation in degrees, within `[0, 360)`.
    pub fn sticker_rotation(&self) -> f32 {
        self.sticker_rotation
    }

    /// Switch to brush mode, dropping any sticker selection.
    pub fn select_brush(&mut self) {
        self.tool = Tool::Brush;
        self.selected_sticker = None;
    }

    /// Set the brush width. Implies brush mode.
    pub fn set_brush_width(&mut self, width: f32) {
        self.brush_width = width.max(f32::EPSILON);
        self.select_brush();
    }

    /// Set the brush color. Implies brush mode.
    pub fn set_brush_color(&mut self, color: Color32) {
        self.brush_color = color;
        self.select_brush();
    }

    /// Select a registered sticker by index, entering sticker mode.
    ///
    /// Returns `false` for an out-of-range index, leaving the state as-is.
    pub fn select_sticker(&mut self, index: usize) -> bool {
        if index >= self.stickers.len() {
            return false;
        }
        self.selected_sticker = Some(index);
        self.tool = Tool::Sticker;
        true
    }

    /// Set the sticker rotation in degrees; wraps into `[0, 360)`.
    pub fn set_sticker_rotation(&mut self, degrees: f32) {
        self.sticker_rotation = degrees.rem_euclid(360.0);
    }

    /// Register a new selectable glyph.
    ///
    /// Empty or whitespace-only input is silently ignored. The new glyph is
    /// registered but not selected.
    pub fn add_glyph(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.stickers.push(text.to_owned());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_are_mutually_exclusive() {
        let mut tools = ToolState::default();
        assert_eq!(tools.tool(), Tool::Brush);

        assert!(tools.select_sticker(0));
        assert_eq!(tools.tool(), Tool::Sticker);
        assert_eq!(tools.selected_sticker(), Some("👻"));

        tools.set_brush_color(Color32::RED);
        assert_eq!(tools.tool(), Tool::Brush);
        assert_eq!(tools.selected_sticker(), None);

        assert!(tools.select_sticker(2));
        tools.set_brush_width(THICK_BRUSH);
        assert_eq!(tools.tool(), Tool::Brush);
        assert_eq!(tools.selected_sticker(), None);
    }

    #[test]
    fn blank_glyphs_are_rejected() {
        let mut tools = ToolState::default();
        let before = tools.stickers().len();

        assert!(!tools.add_glyph(""));
        assert!(!tools.add_glyph("   "));
        assert!(!tools.add_glyph("\t\n"));
        assert_eq!(tools.stickers().len(), before);

        assert!(tools.add_glyph(" ★ "));
        assert_eq!(tools.stickers().last().map(String::as_str), Some("★"));
        // Registration does not select.
        assert_eq!(tools.tool(), Tool::Brush);
    }

    #[test]
    fn out_of_range_sticker_selection_is_ignored() {
        let mut tools = ToolState::default();
        assert!(!tools.select_sticker(99));
        assert_eq!(tools.tool(), Tool::Brush);
        assert_eq!(tools.selected_sticker(), None);
    }

    #[test]
    fn rotation_wraps() {
        let mut tools = ToolState::default();
        tools.set_sticker_rotation(400.0);
        assert_eq!(tools.sticker_rotation(), 40.0);
        tools.set_sticker_rotation(-30.0);
        assert_eq!(tools.sticker_rotation(), 330.0);
    }
}
