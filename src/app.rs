use egui::{Color32, CursorIcon, Pos2, Vec2};

use crate::event::SketchEvent;
use crate::panels::tools_panel;
use crate::render::PainterTarget;
use crate::sketchpad::Sketchpad;
use crate::tool::ToolState;

/// Live surface size in logical pixels; also the reference frame for exports.
pub const CANVAS_SIZE: Vec2 = Vec2::new(256.0, 256.0);

/// The eframe shell around the drawing engine.
///
/// Owns the sketchpad and wires raw pointer input into it; everything it
/// does goes through the engine's public operations.
pub struct SketchApp {
    sketchpad: Sketchpad,
    /// Text field contents for registering a new sticker glyph.
    new_sticker: String,
    /// Whether the pointer was over the canvas last frame, for leave events.
    pointer_over_canvas: bool,
    /// Last hover position fed to the engine, to forward genuine moves only.
    last_cursor: Option<Pos2>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut sketchpad = Sketchpad::new(CANVAS_SIZE);

        // Restore tool preferences from the previous session. The drawing
        // itself is never persisted.
        if let Some(storage) = cc.storage {
            if let Some(tools) = eframe::get_value::<ToolState>(storage, eframe::APP_KEY) {
                sketchpad.restore_tools(tools);
            }
        }

        // Repaint whenever the engine reports a change.
        let ctx = cc.egui_ctx.clone();
        sketchpad
            .events()
            .subscribe(Box::new(move |_event: &SketchEvent| ctx.request_repaint()));

        Self {
            sketchpad,
            new_sticker: String::new(),
            pointer_over_canvas: false,
            last_cursor: None,
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        // Drag-only sense: the press itself starts the interaction, so a
        // motionless click still reaches the engine as down/up.
        let (response, painter) = ui.allocate_painter(CANVAS_SIZE, egui::Sense::drag());
        let rect = response.rect;

        // The engine draws on a blank surface; the backdrop is ours.
        painter.rect_filled(rect, 0.0, Color32::WHITE);

        let to_local = |pos: Pos2| (pos - rect.min).to_pos2();

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.sketchpad.pointer_down(to_local(pos));
            }
        } else if response.dragged() && response.drag_delta() != Vec2::ZERO {
            if let Some(pos) = response.interact_pointer_pos() {
                self.sketchpad.pointer_move(to_local(pos));
            }
        }
        if response.drag_stopped() {
            self.sketchpad.pointer_up();
        }

        let hovered = response.hovered();
        if hovered {
            // The preview circle is the cursor.
            ui.ctx().set_cursor_icon(CursorIcon::None);
            if !self.sketchpad.is_drawing() {
                if let Some(pos) = response.hover_pos().map(to_local) {
                    if self.last_cursor != Some(pos) {
                        self.sketchpad.pointer_move(pos);
                        self.last_cursor = Some(pos);
                    }
                }
            }
        } else if self.pointer_over_canvas {
            self.sketchpad.pointer_leave();
            self.last_cursor = None;
        }
        self.pointer_over_canvas = hovered;

        self.sketchpad
            .render(&mut PainterTarget::new(&painter, rect));
    }
}

impl eframe::App for SketchApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.sketchpad.tools());
    }

    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(ctx, &mut self.sketchpad, &mut self.new_sticker);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("You ain't Van Gogh");
            ui.add_space(4.0);
            self.canvas(ui);
        });
    }
}
