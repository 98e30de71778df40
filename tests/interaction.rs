use std::cell::RefCell;
use std::rc::Rc;

use egui::{Color32, Pos2, Vec2};
use sketchpad::{Command, GlyphFont, RenderTarget, SketchEvent, Sketchpad};

const SURFACE: Vec2 = Vec2::new(256.0, 256.0);

/// Records every render call so tests can assert on draw order.
#[derive(Debug, Clone, PartialEq)]
enum Op {
    Clear,
    Polyline {
        points: Vec<Pos2>,
        width: f32,
        color: Color32,
    },
    Circle {
        center: Pos2,
        radius: f32,
    },
    Glyph {
        glyph: String,
        anchor: Pos2,
        rotation: f32,
        size: f32,
        font: GlyphFont,
    },
}

#[derive(Default)]
struct RecordingTarget {
    ops: Vec<Op>,
}

impl RenderTarget for RecordingTarget {
    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        self.ops.push(Op::Polyline {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, _width: f32, _color: Color32) {
        self.ops.push(Op::Circle { center, radius });
    }

    fn draw_glyph(
        &mut self,
        glyph: &str,
        anchor: Pos2,
        rotation: f32,
        size: f32,
        font: GlyphFont,
        _color: Color32,
    ) {
        self.ops.push(Op::Glyph {
            glyph: glyph.to_owned(),
            anchor,
            rotation,
            size,
            font,
        });
    }
}

fn render_ops(pad: &Sketchpad) -> Vec<Op> {
    let mut target = RecordingTarget::default();
    pad.render(&mut target);
    target.ops
}

fn committed(pad: &Sketchpad) -> &[Command] {
    pad.history().committed()
}

#[test]
fn brush_down_commits_a_one_point_stroke_immediately() {
    let mut pad = Sketchpad::new(SURFACE);

    pad.pointer_down(Pos2::new(10.0, 20.0));
    assert!(pad.is_drawing());
    assert_eq!(committed(&pad).len(), 1);

    let Command::Stroke(stroke) = &committed(&pad)[0] else {
        panic!("expected a stroke");
    };
    assert_eq!(stroke.points(), &[Pos2::new(10.0, 20.0)]);
}

#[test]
fn dragging_extends_the_stroke_without_new_commits() {
    let mut pad = Sketchpad::new(SURFACE);

    pad.pointer_down(Pos2::new(0.0, 0.0));
    pad.pointer_move(Pos2::new(5.0, 5.0));
    pad.pointer_move(Pos2::new(10.0, 0.0));
    assert_eq!(committed(&pad).len(), 1);

    let Command::Stroke(stroke) = &committed(&pad)[0] else {
        panic!("expected a stroke");
    };
    assert_eq!(
        stroke.points(),
        &[
            Pos2::new(0.0, 0.0),
            Pos2::new(5.0, 5.0),
            Pos2::new(10.0, 0.0)
        ]
    );

    pad.pointer_up();
    assert!(!pad.is_drawing());

    // Post-release movement builds a preview, never extends the stroke.
    pad.pointer_move(Pos2::new(50.0, 50.0));
    let Command::Stroke(stroke) = &committed(&pad)[0] else {
        panic!("expected a stroke");
    };
    assert_eq!(stroke.points().len(), 3);
    assert!(pad.preview().is_some());
}

#[test]
fn each_motionless_click_occupies_an_undo_slot() {
    let mut pad = Sketchpad::new(SURFACE);

    for i in 0..3 {
        pad.pointer_down(Pos2::new(i as f32, i as f32));
        pad.pointer_up();
    }
    assert_eq!(committed(&pad).len(), 3);

    // One-point strokes render no ink.
    assert_eq!(render_ops(&pad), vec![Op::Clear]);

    // Undo-slot count matches click count.
    pad.undo();
    pad.undo();
    pad.undo();
    assert!(committed(&pad).is_empty());
}

#[test]
fn sticker_stamps_instantly_with_no_drag_phase() {
    let mut pad = Sketchpad::new(SURFACE);
    assert!(pad.select_sticker(0));
    pad.set_sticker_rotation(90.0);

    pad.pointer_down(Pos2::new(1.0, 1.0));
    assert!(!pad.is_drawing());
    assert_eq!(committed(&pad).len(), 1);

    // Moving before pointer-up must not move the stamp.
    pad.pointer_move(Pos2::new(40.0, 40.0));
    pad.pointer_up();

    let Command::Sticker(stamp) = &committed(&pad)[0] else {
        panic!("expected a sticker");
    };
    assert_eq!(stamp.anchor(), Pos2::new(1.0, 1.0));
    assert_eq!(stamp.glyph(), "👻");
    assert_eq!(stamp.rotation(), 90.0);
}

#[test]
fn render_replays_commits_in_order_and_is_idempotent() {
    let mut pad = Sketchpad::new(SURFACE);

    pad.pointer_down(Pos2::new(0.0, 0.0));
    pad.pointer_move(Pos2::new(10.0, 10.0));
    pad.pointer_up();

    pad.set_brush_color(Color32::RED);
    pad.pointer_down(Pos2::new(5.0, 5.0));
    pad.pointer_move(Pos2::new(15.0, 5.0));
    pad.pointer_up();

    pad.select_sticker(2);
    pad.pointer_down(Pos2::new(8.0, 8.0));
    pad.pointer_up();

    let ops = render_ops(&pad);
    assert_eq!(ops.len(), 4);
    assert_eq!(ops[0], Op::Clear);
    assert!(matches!(&ops[1], Op::Polyline { color, .. } if *color == Color32::BLACK));
    assert!(matches!(&ops[2], Op::Polyline { color, .. } if *color == Color32::RED));
    assert!(matches!(&ops[3], Op::Glyph { glyph, .. } if glyph == "💥"));

    // Repainting with no state change yields identical output.
    assert_eq!(render_ops(&pad), ops);
}

#[test]
fn preview_renders_on_top_only_while_not_drawing() {
    let mut pad = Sketchpad::new(SURFACE);

    // Idle hover: brush preview circle, diameter = brush width.
    pad.pointer_move(Pos2::new(30.0, 30.0));
    let ops = render_ops(&pad);
    assert_eq!(
        ops.last(),
        Some(&Op::Circle {
            center: Pos2::new(30.0, 30.0),
            radius: 1.5,
        })
    );

    // While drawing the preview is suppressed.
    pad.pointer_down(Pos2::new(30.0, 30.0));
    pad.pointer_move(Pos2::new(35.0, 35.0));
    assert!(pad.is_drawing());
    let ops = render_ops(&pad);
    assert!(!ops.iter().any(|op| matches!(op, Op::Circle { .. })));

    pad.pointer_up();
    pad.pointer_move(Pos2::new(40.0, 40.0));
    let ops = render_ops(&pad);
    assert!(matches!(ops.last(), Some(Op::Circle { .. })));
}

#[test]
fn sticker_preview_renders_exactly_like_a_committed_stamp() {
    let mut pad = Sketchpad::new(SURFACE);
    pad.select_sticker(1);
    pad.set_sticker_rotation(45.0);

    // Hover preview at a point...
    pad.pointer_move(Pos2::new(12.0, 34.0));
    let preview_op = render_ops(&pad).pop().unwrap();

    // ...then stamp at the same point and compare the committed render.
    pad.pointer_down(Pos2::new(12.0, 34.0));
    pad.pointer_up();
    pad.pointer_leave();
    let stamp_op = render_ops(&pad).pop().unwrap();

    assert_eq!(preview_op, stamp_op);
    assert!(matches!(
        stamp_op,
        Op::Glyph { font: GlyphFont::Emoji, size, .. } if size == 32.0
    ));
}

#[test]
fn pointer_leave_clears_preview_and_unsticks_drawing() {
    let mut pad = Sketchpad::new(SURFACE);

    pad.pointer_move(Pos2::new(10.0, 10.0));
    assert!(pad.preview().is_some());

    pad.pointer_leave();
    assert!(pad.preview().is_none());

    // Leaving mid-stroke behaves as pointer-up.
    pad.pointer_down(Pos2::new(0.0, 0.0));
    assert!(pad.is_drawing());
    pad.pointer_leave();
    assert!(!pad.is_drawing());
    assert_eq!(committed(&pad).len(), 1);
}

#[test]
fn notifications_fire_only_when_state_changes() {
    let mut pad = Sketchpad::new(SURFACE);
    let log: Rc<RefCell<Vec<SketchEvent>>> = Rc::default();

    let sink = Rc::clone(&log);
    pad.events()
        .subscribe(Box::new(move |event: &SketchEvent| {
            sink.borrow_mut().push(*event);
        }));

    // Undo/redo with nothing to do stay silent.
    pad.undo();
    pad.redo();
    assert!(log.borrow().is_empty());

    pad.pointer_move(Pos2::new(1.0, 1.0));
    assert_eq!(log.borrow().last(), Some(&SketchEvent::ToolMoved));

    pad.pointer_down(Pos2::new(1.0, 1.0));
    assert_eq!(log.borrow().last(), Some(&SketchEvent::DrawingChanged));
    pad.pointer_up();

    pad.undo();
    assert_eq!(log.borrow().last(), Some(&SketchEvent::DrawingChanged));

    let before = log.borrow().len();
    pad.undo(); // history is empty again; silent no-op
    assert_eq!(log.borrow().len(), before);
}

#[test]
fn stamping_invalidates_redo_history() {
    let mut pad = Sketchpad::new(SURFACE);

    pad.pointer_down(Pos2::new(0.0, 0.0));
    pad.pointer_move(Pos2::new(9.0, 9.0));
    pad.pointer_up();
    pad.undo();
    assert!(pad.history().can_redo());

    pad.select_sticker(0);
    pad.pointer_down(Pos2::new(5.0, 5.0));
    assert!(!pad.history().can_redo());
}
