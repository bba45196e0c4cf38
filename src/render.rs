//! Replays stroke history onto an abstract drawing surface.
//!
//! The surface is a capability, not a technology: anything that can clear
//! itself and draw a colored line segment can display a drawing. The egui
//! painter adapter lives with the app; tests use a recording surface.

use crate::model::{Rgb, Stroke, StrokeGroup};

pub trait Surface {
    fn clear(&mut self);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb, width: f32);
}

/// Paint a single segment. O(1); called once per pointer sample while a
/// gesture is live.
pub fn draw_segment(surface: &mut dyn Surface, stroke: &Stroke) {
    surface.draw_line(
        stroke.x1,
        stroke.y1,
        stroke.x2,
        stroke.y2,
        stroke.color,
        stroke.size,
    );
}

/// Clear the surface and replay every stroke of every group in commit order.
/// Replay order is visual stacking order: later strokes overlay earlier ones.
pub fn redraw_all(surface: &mut dyn Surface, groups: &[StrokeGroup]) {
    surface.clear();
    for group in groups {
        for stroke in group {
            draw_segment(surface, stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Line(i32, i32, i32, i32),
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, _color: Rgb, _width: f32) {
            self.ops
                .push(Op::Line(x1 as i32, y1 as i32, x2 as i32, y2 as i32));
        }
    }

    fn stroke(x1: f32, y1: f32, x2: f32, y2: f32) -> Stroke {
        Stroke {
            x1,
            y1,
            x2,
            y2,
            color: Rgb { r: 0, g: 0, b: 0 },
            size: 2.0,
        }
    }

    #[test]
    fn redraw_clears_then_replays_in_order() {
        let groups = vec![
            vec![stroke(0.0, 0.0, 1.0, 1.0), stroke(1.0, 1.0, 2.0, 2.0)],
            vec![],
            vec![stroke(5.0, 5.0, 6.0, 6.0)],
        ];
        let mut surface = RecordingSurface::default();
        redraw_all(&mut surface, &groups);
        assert_eq!(
            surface.ops,
            vec![
                Op::Clear,
                Op::Line(0, 0, 1, 1),
                Op::Line(1, 1, 2, 2),
                Op::Line(5, 5, 6, 6),
            ]
        );
    }

    #[test]
    fn draw_segment_paints_exactly_one_line() {
        let mut surface = RecordingSurface::default();
        draw_segment(&mut surface, &stroke(3.0, 4.0, 5.0, 6.0));
        assert_eq!(surface.ops, vec![Op::Line(3, 4, 5, 6)]);
    }

    #[test]
    fn redraw_of_empty_history_just_clears() {
        let mut surface = RecordingSurface::default();
        redraw_all(&mut surface, &[]);
        assert_eq!(surface.ops, vec![Op::Clear]);
    }
}
