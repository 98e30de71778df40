use egui::{Color32, Pos2};

use crate::render::RenderTarget;

/// Freehand stroke: an ordered run of points stroked with one width and color.
///
/// A stroke is created with its pointer-down point and grows by appending
/// points while the pointer stays pressed. It is never reordered or
/// truncated; undo removes the whole command.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeCommand {
    points: Vec<Pos2>,
    width: f32,
    color: Color32,
}

impl StrokeCommand {
    /// Create a stroke starting at `start`.
    pub fn new(start: Pos2, width: f32, color: Color32) -> Self {
        Self {
            points: vec![start],
            width,
            color,
        }
    }

    /// Append a trailing point. Insertion order is drawing order.
    pub fn extend(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Paint the stroke as a connected polyline.
    ///
    /// A stroke needs at least two points to produce ink: a motionless click
    /// leaves a one-point stroke in history that renders nothing.
    pub fn render(&self, target: &mut dyn RenderTarget) {
        if self.points.len() < 2 {
            return;
        }

        target.stroke_polyline(&self.points, self.width, self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_appends_in_order() {
        let mut stroke = StrokeCommand::new(Pos2::new(0.0, 0.0), 3.0, Color32::BLACK);
        stroke.extend(Pos2::new(1.0, 1.0));
        stroke.extend(Pos2::new(2.0, 0.5));

        assert_eq!(
            stroke.points(),
            &[
                Pos2::new(0.0, 0.0),
                Pos2::new(1.0, 1.0),
                Pos2::new(2.0, 0.5)
            ]
        );
    }

    #[test]
    fn sub_pixel_points_are_kept_verbatim() {
        let mut stroke = StrokeCommand::new(Pos2::new(0.25, 0.75), 1.0, Color32::RED);
        stroke.extend(Pos2::new(10.5, 10.5));

        assert_eq!(stroke.points()[0], Pos2::new(0.25, 0.75));
        assert_eq!(stroke.points()[1], Pos2::new(10.5, 10.5));
    }
}
