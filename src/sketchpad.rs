use egui::{Color32, Pos2, Vec2};

use crate::command::{Command, CommandHistory, Preview, StickerCommand, StrokeCommand};
use crate::event::{EventBus, SketchEvent};
use crate::export::{self, ExportError};
use crate::render::RenderTarget;
use crate::text::FontLibrary;
use crate::tool::{Tool, ToolState};

/// Pointer interaction states.
///
/// Sticker stamps commit instantly on pointer-down, so only a brush drag
/// ever enters `Drawing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerState {
    Idle,
    Drawing,
}

/// The drawing engine: committed history, tool state, the pointer state
/// machine, and the preview slot, behind the operations the shell calls.
///
/// All mutation is synchronous inside the triggering call; notifications
/// fan out on the event bus right after each state change, and consumers
/// repaint from current state.
pub struct Sketchpad {
    history: CommandHistory,
    tools: ToolState,
    pointer: PointerState,
    preview: Option<Preview>,
    surface_size: Vec2,
    events: EventBus,
    fonts: FontLibrary,
}

impl Sketchpad {
    /// Create an empty sketchpad over a live surface of `surface_size`
    /// pixels (the reference frame for pointer coordinates and exports).
    pub fn new(surface_size: Vec2) -> Self {
        Self {
            history: CommandHistory::new(),
            tools: ToolState::default(),
            pointer: PointerState::Idle,
            preview: None,
            surface_size,
            events: EventBus::new(),
            fonts: FontLibrary::new(),
        }
    }

    // --- pointer input -----------------------------------------------------

    /// Pointer pressed on the surface.
    ///
    /// Sticker mode stamps and commits atomically, staying idle. Brush mode
    /// commits a one-point stroke immediately — a motionless click still
    /// occupies an undo slot — and enters the drawing state.
    pub fn pointer_down(&mut self, point: Pos2) {
        self.preview = None;

        match self.tools.tool() {
            Tool::Sticker => {
                let Some(glyph) = self.tools.selected_sticker() else {
                    return;
                };
                let stamp = StickerCommand::new(point, glyph, self.tools.sticker_rotation());
                self.history.commit(Command::Sticker(stamp));
                self.events.emit(SketchEvent::DrawingChanged);
            }
            Tool::Brush => {
                let stroke =
                    StrokeCommand::new(point, self.tools.brush_width(), self.tools.brush_color());
                self.history.commit(Command::Stroke(stroke));
                self.pointer = PointerState::Drawing;
                self.events.emit(SketchEvent::DrawingChanged);
            }
        }
    }

    /// Pointer moved over the surface.
    ///
    /// While drawing, the in-progress stroke (the newest committed entry)
    /// grows by one point; history shape is unchanged. While idle, the
    /// preview is rebuilt at the cursor.
    pub fn pointer_move(&mut self, point: Pos2) {
        match self.pointer {
            PointerState::Drawing => {
                if let Some(stroke) = self
                    .history
                    .last_committed_mut()
                    .and_then(Command::as_stroke_mut)
                {
                    stroke.extend(point);
                }
                self.events.emit(SketchEvent::DrawingChanged);
            }
            PointerState::Idle => {
                self.preview = Some(match self.tools.selected_sticker() {
                    Some(glyph) => Preview::Sticker {
                        anchor: point,
                        glyph: glyph.to_owned(),
                        rotation: self.tools.sticker_rotation(),
                    },
                    None => Preview::Brush {
                        center: point,
                        width: self.tools.brush_width(),
                    },
                });
                self.events.emit(SketchEvent::ToolMoved);
            }
        }
    }

    /// Pointer released: the in-progress stroke (if any) freezes.
    pub fn pointer_up(&mut self) {
        self.pointer = PointerState::Idle;
    }

    /// Pointer left the surface: drop the preview, and treat an in-progress
    /// stroke as released so the drawing state can never get stuck.
    pub fn pointer_leave(&mut self) {
        self.preview = None;
        self.pointer = PointerState::Idle;
        self.events.emit(SketchEvent::ToolMoved);
    }

    // --- history -----------------------------------------------------------

    /// Undo the newest committed command. Silent no-op when empty.
    pub fn undo(&mut self) {
        if self.history.undo() {
            self.events.emit(SketchEvent::DrawingChanged);
        }
    }

    /// Redo the newest undone command. Silent no-op when empty.
    pub fn redo(&mut self) {
        if self.history.redo() {
            self.events.emit(SketchEvent::DrawingChanged);
        }
    }

    /// Wipe the drawing and the redo stack.
    pub fn clear(&mut self) {
        self.history.clear();
        self.events.emit(SketchEvent::DrawingChanged);
    }

    // --- tool state --------------------------------------------------------

    /// Switch to brush mode.
    pub fn select_brush(&mut self) {
        self.tools.select_brush();
    }

    /// Set the brush width (implies brush mode).
    pub fn set_brush_width(&mut self, width: f32) {
        self.tools.set_brush_width(width);
    }

    /// Set the brush color (implies brush mode).
    pub fn set_brush_color(&mut self, color: Color32) {
        self.tools.set_brush_color(color);
    }

    /// Select a registered sticker (implies sticker mode).
    pub fn select_sticker(&mut self, index: usize) -> bool {
        if self.tools.select_sticker(index) {
            self.events.emit(SketchEvent::ToolMoved);
            true
        } else {
            false
        }
    }

    /// Set the sticker rotation in degrees; wraps into `[0, 360)`.
    pub fn set_sticker_rotation(&mut self, degrees: f32) {
        self.tools.set_sticker_rotation(degrees);
    }

    /// Register a new sticker glyph; blank input is silently ignored.
    pub fn add_glyph(&mut self, text: &str) -> bool {
        self.tools.add_glyph(text)
    }

    /// Replace the tool state wholesale (shell preference restore).
    pub fn restore_tools(&mut self, tools: ToolState) {
        self.tools = tools;
    }

    // --- output ------------------------------------------------------------

    /// Repaint `target` from current state: committed commands in commit
    /// order, then the preview on top — but only while not drawing.
    pub fn render(&self, target: &mut dyn RenderTarget) {
        target.clear();
        for command in self.history.committed() {
            command.render(target);
        }
        if self.pointer == PointerState::Idle {
            if let Some(preview) = &self.preview {
                preview.render(target);
            }
        }
    }

    /// Export the committed drawing at `width`×`height` as PNG bytes.
    pub fn export_png(&self, width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
        export::export_png(
            self.history.committed(),
            self.surface_size,
            width,
            height,
            &self.fonts,
        )
    }

    // --- accessors ---------------------------------------------------------

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn surface_size(&self) -> Vec2 {
        self.surface_size
    }

    /// True while a brush stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.pointer == PointerState::Drawing
    }

    /// The current tool preview, if any.
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }
}
