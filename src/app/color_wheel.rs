use eframe::egui;

use crate::color;
use crate::model::Rgb;

pub(super) const WHEEL_SIZE: usize = 300;
pub(super) const INNER_RADIUS: f32 = 80.0;

/// Hue under a point given relative to the ring center, or `None` when the
/// point misses the annulus. The +180 shift normalizes `atan2` into [0,360).
pub(super) fn ring_hue(dx: f32, dy: f32, inner: f32, outer: f32) -> Option<f32> {
    let dist = (dx * dx + dy * dy).sqrt();
    if dist < inner || dist > outer {
        return None;
    }
    let mut angle = dy.atan2(dx).to_degrees() + 180.0;
    if angle >= 360.0 {
        angle -= 360.0;
    }
    Some(angle)
}

/// Ring-shaped hue picker with saturation/lightness sliders. Slider changes
/// re-resolve the color against the last selected hue, no new ring click
/// required.
pub(super) struct ColorWheel {
    hue: f32,
    saturation: f32,
    lightness: f32,
    selected: Rgb,
    marker: Option<egui::Vec2>,
    texture: Option<egui::TextureHandle>,
}

impl ColorWheel {
    pub fn new(initial: Rgb) -> Self {
        Self {
            hue: 0.0,
            saturation: 1.0,
            lightness: 0.5,
            selected: initial,
            marker: None,
            texture: None,
        }
    }

    pub fn selected(&self) -> Rgb {
        self.selected
    }

    pub fn color_name(&self) -> &'static str {
        color::hue_to_color_name(self.hue)
    }

    fn resolve(&mut self) {
        let (r, g, b) = color::hsl_to_rgb(self.hue / 360.0, self.saturation, self.lightness);
        self.selected = Rgb { r, g, b };
    }

    fn ring_image() -> egui::ColorImage {
        let size = WHEEL_SIZE;
        let outer = size as f32 / 2.0;
        let mut rgba = vec![0u8; size * size * 4];
        for j in 0..size {
            for i in 0..size {
                let dx = i as f32 - outer;
                let dy = j as f32 - outer;
                if let Some(angle) = ring_hue(dx, dy, INNER_RADIUS, outer) {
                    let (r, g, b) = color::hsl_to_rgb(angle / 360.0, 1.0, 0.5);
                    let idx = (j * size + i) * 4;
                    rgba[idx] = r;
                    rgba[idx + 1] = g;
                    rgba[idx + 2] = b;
                    rgba[idx + 3] = 255;
                }
            }
        }
        egui::ColorImage::from_rgba_unmultiplied([size, size], &rgba)
    }

    /// Returns true when the selected color changed this frame.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        let texture = self
            .texture
            .get_or_insert_with(|| {
                ui.ctx().load_texture(
                    "color_wheel_ring",
                    Self::ring_image(),
                    egui::TextureOptions::LINEAR,
                )
            })
            .clone();

        let side = WHEEL_SIZE as f32;
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::click());
        let painter = ui.painter_at(rect);
        painter.image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let center = rect.center();
                let offset = pos - center;
                if let Some(hue) = ring_hue(offset.x, offset.y, INNER_RADIUS, side / 2.0) {
                    self.hue = hue;
                    self.resolve();
                    self.marker = Some(offset);
                    changed = true;
                }
            }
        }

        if let Some(offset) = self.marker {
            let at = rect.center() + offset;
            painter.circle_filled(at, 7.0, self.selected.to_color32());
            painter.circle_stroke(at, 7.0, egui::Stroke::new(3.0, egui::Color32::WHITE));
        }

        ui.label("Lightness");
        if ui
            .add(egui::Slider::new(&mut self.lightness, 0.0..=1.0))
            .changed()
        {
            self.resolve();
            changed = true;
        }
        ui.label("Saturation");
        if ui
            .add(egui::Slider::new(&mut self.saturation, 0.0..=1.0))
            .changed()
        {
            self.resolve();
            changed = true;
        }

        let (preview, _) = ui.allocate_exact_size(egui::vec2(120.0, 48.0), egui::Sense::hover());
        ui.painter().rect_filled(preview, 8.0, self.selected.to_color32());
        ui.monospace(format!("{} - {}", self.color_name(), self.selected.to_hex()));

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicks_outside_the_ring_are_rejected() {
        assert_eq!(ring_hue(0.0, 0.0, 80.0, 150.0), None);
        assert_eq!(ring_hue(50.0, 0.0, 80.0, 150.0), None);
        assert_eq!(ring_hue(200.0, 0.0, 80.0, 150.0), None);
        assert_eq!(ring_hue(0.0, -160.0, 80.0, 150.0), None);
    }

    #[test]
    fn ring_boundaries_are_inclusive() {
        assert!(ring_hue(80.0, 0.0, 80.0, 150.0).is_some());
        assert!(ring_hue(150.0, 0.0, 80.0, 150.0).is_some());
    }

    fn assert_hue(actual: Option<f32>, expected: f32) {
        let actual = actual.expect("point should be inside the ring");
        let d = (actual - expected).abs();
        let d = d.min(360.0 - d);
        assert!(d < 1e-3, "got {actual}, want {expected}");
    }

    #[test]
    fn angle_is_normalized_to_the_wheel() {
        // Left of center lands on the +180 wrap and must come back as 0.
        assert_hue(ring_hue(-100.0, 0.0, 80.0, 150.0), 0.0);
        assert_hue(ring_hue(100.0, 0.0, 80.0, 150.0), 180.0);
        assert_hue(ring_hue(0.0, 100.0, 80.0, 150.0), 270.0);
        assert_hue(ring_hue(0.0, -100.0, 80.0, 150.0), 90.0);
        let hue = ring_hue(-100.0, 0.0, 80.0, 150.0).unwrap();
        assert!((0.0..360.0).contains(&hue));
    }
}
