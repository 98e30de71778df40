use egui::{Color32, RichText, Slider, TextEdit, vec2};

use crate::sketchpad::Sketchpad;
use crate::tool::{THICK_BRUSH, THIN_BRUSH, Tool};

/// Fixed brush palette, matching the canvas backdrop conventions.
const PALETTE: &[(&str, Color32)] = &[
    ("black", Color32::BLACK),
    ("red", Color32::RED),
    ("blue", Color32::BLUE),
    ("yellow", Color32::YELLOW),
];

/// Default export resolution: a 4x magnification of the live surface.
const EXPORT_SIZE: (u32, u32) = (1024, 1024);

/// The tool side panel: brush and sticker selection, history controls,
/// export. Talks to the engine only through its public operations.
pub fn tools_panel(ctx: &egui::Context, sketchpad: &mut Sketchpad, new_sticker: &mut String) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.separator();

            brush_section(ui, sketchpad);
            ui.separator();

            sticker_section(ui, sketchpad, new_sticker);
            ui.separator();

            history_section(ui, sketchpad);
            ui.separator();

            if ui.button("Export").clicked() {
                export(sketchpad);
            }
        });
}

fn brush_section(ui: &mut egui::Ui, sketchpad: &mut Sketchpad) {
    let tools = sketchpad.tools();
    let brush_active = tools.tool() == Tool::Brush;
    let width = tools.brush_width();
    let color = tools.brush_color();

    ui.horizontal(|ui| {
        if ui
            .selectable_label(brush_active && width == THIN_BRUSH, "Thin Brush")
            .clicked()
        {
            sketchpad.set_brush_width(THIN_BRUSH);
        }
        if ui
            .selectable_label(brush_active && width == THICK_BRUSH, "Thick Brush")
            .clicked()
        {
            sketchpad.set_brush_width(THICK_BRUSH);
        }
    });

    ui.horizontal(|ui| {
        for (name, swatch) in PALETTE {
            let selected = brush_active && color == *swatch;
            let button = egui::Button::new("")
                .fill(*swatch)
                .min_size(vec2(22.0, 22.0))
                .stroke(if selected {
                    egui::Stroke::new(2.0, ui.visuals().strong_text_color())
                } else {
                    egui::Stroke::NONE
                });
            if ui.add(button).on_hover_text(*name).clicked() {
                log::info!("Brush color selected from UI: {name}");
                sketchpad.set_brush_color(*swatch);
            }
        }
    });
}

fn sticker_section(ui: &mut egui::Ui, sketchpad: &mut Sketchpad, new_sticker: &mut String) {
    ui.label("Stickers");

    let stickers: Vec<String> = sketchpad.tools().stickers().to_vec();
    let selected = sketchpad.tools().selected_sticker_index();
    ui.horizontal_wrapped(|ui| {
        for (index, glyph) in stickers.iter().enumerate() {
            let label = RichText::new(glyph).size(18.0);
            if ui
                .selectable_label(selected == Some(index), label)
                .clicked()
            {
                log::info!("Sticker selected from UI: {glyph}");
                sketchpad.select_sticker(index);
            }
        }
    });

    ui.horizontal(|ui| {
        ui.add(
            TextEdit::singleline(new_sticker)
                .hint_text("Add a sticker")
                .desired_width(90.0),
        );
        if ui.button("Add Sticker").clicked() {
            if sketchpad.add_glyph(new_sticker) {
                new_sticker.clear();
            }
        }
    });

    let mut rotation = sketchpad.tools().sticker_rotation();
    if ui
        .add(Slider::new(&mut rotation, 0.0..=360.0).text("Rotation"))
        .changed()
    {
        sketchpad.set_sticker_rotation(rotation);
    }
}

fn history_section(ui: &mut egui::Ui, sketchpad: &mut Sketchpad) {
    ui.horizontal(|ui| {
        let can_undo = sketchpad.history().can_undo();
        let can_redo = sketchpad.history().can_redo();

        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            sketchpad.undo();
        }
        if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
            sketchpad.redo();
        }
        if ui.button("Clear").clicked() {
            sketchpad.clear();
        }
    });
}

fn export(sketchpad: &Sketchpad) {
    let (width, height) = EXPORT_SIZE;
    let png = match sketchpad.export_png(width, height) {
        Ok(png) => png,
        Err(err) => {
            log::error!("Export failed: {err}");
            return;
        }
    };

    let Some(path) = rfd::FileDialog::new()
        .set_file_name("sketchpad.png")
        .add_filter("PNG image", &["png"])
        .save_file()
    else {
        return;
    };

    match std::fs::write(&path, png) {
        Ok(()) => log::info!("Exported {width}x{height} png to {}", path.display()),
        Err(err) => log::error!("Failed to write {}: {err}", path.display()),
    }
}
