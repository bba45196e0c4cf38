use eframe::egui;

use crate::model::{Rgb, Stroke};
use crate::render::{self, Surface};
use crate::store::GestureState;
use crate::tone::EngineState;

use super::SoundBrushApp;

/// egui painter adapter for the stroke renderer. Stroke coordinates are
/// canvas-local; the canvas origin shifts them into screen space.
struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
    background: egui::Color32,
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, self.background);
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb, width: f32) {
        let origin = self.rect.min;
        self.painter.line_segment(
            [origin + egui::vec2(x1, y1), origin + egui::vec2(x2, y2)],
            egui::Stroke::new(width, color.to_color32()),
        );
    }
}

impl eframe::App for SoundBrushApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Shortcuts stay off while a gesture is open so a stray key can't
        // undo or snapshot a half-drawn group.
        let skip_shortcuts =
            ctx.wants_keyboard_input() || self.store.state() == GestureState::Drawing;
        ctx.input_mut(|i| {
            if skip_shortcuts {
                return;
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z)
                || i.consume_key(egui::Modifiers::NONE, egui::Key::U)
            {
                self.store.undo();
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::Y)
                || i.consume_key(egui::Modifiers::NONE, egui::Key::R)
            {
                self.store.redo();
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::S) {
                self.save_drawing();
            }
        });

        egui::SidePanel::left("toolbar")
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.heading("SoundBrush");
                ui.separator();
                if self.wheel.ui(ui) {
                    self.brush.color = self.wheel.selected();
                    self.persist_settings();
                }
                ui.separator();
                ui.label("Brush size");
                if ui
                    .add(egui::Slider::new(&mut self.brush.size, 1.0..=50.0))
                    .changed()
                {
                    self.persist_settings();
                }
                let mut audio = self.audio_enabled;
                if ui.checkbox(&mut audio, "Audio tones").changed() {
                    self.set_audio_enabled(audio);
                }
                ui.separator();
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(self.store.can_undo(), egui::Button::new("Undo (U)"))
                        .clicked()
                    {
                        self.store.undo();
                    }
                    if ui
                        .add_enabled(self.store.can_redo(), egui::Button::new("Redo (R)"))
                        .clicked()
                    {
                        self.store.redo();
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("Save (S)").clicked() {
                        self.save_drawing();
                    }
                    if ui.button("Clear").clicked() {
                        self.store.clear();
                    }
                });
                ui.separator();
                ui.label("Gallery");
                let mut load_requested: Option<String> = None;
                egui::ScrollArea::vertical()
                    .max_height(220.0)
                    .show(ui, |ui| {
                        for name in &self.gallery_names {
                            if ui.selectable_label(false, name).clicked() {
                                load_requested = Some(name.clone());
                            }
                        }
                    });
                if let Some(name) = load_requested {
                    self.load_drawing(&name);
                }
                if ui.small_button("Refresh").clicked() {
                    self.refresh_gallery();
                }
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(status) = &self.status {
                    ui.label(status);
                } else {
                    ui.label(format!(
                        "{} brush, size {:.0}",
                        self.wheel.color_name(),
                        self.brush.size
                    ));
                }
                if self.tones.state() == EngineState::Failed {
                    ui.separator();
                    ui.label("audio unavailable");
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let origin = rect.min;

            let pressed = response.drag_started() || response.clicked();
            // A release anywhere ends the gesture, including outside the
            // canvas; a plain click begins and ends one in the same frame.
            let released = response.drag_stopped() || response.clicked();

            if pressed {
                self.store.begin_gesture();
                self.last_sample = response
                    .interact_pointer_pos()
                    .map(|p| p - origin.to_vec2());
            }

            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let sample = pos - origin.to_vec2();
                    if let Some(prev) = self.last_sample {
                        if prev != sample {
                            let stroke = Stroke {
                                x1: prev.x,
                                y1: prev.y,
                                x2: sample.x,
                                y2: sample.y,
                                color: self.brush.color,
                                size: self.brush.size,
                            };
                            self.store.append_segment(stroke);
                            self.tones.play(&self.brush.color.to_hex());
                        }
                    }
                    self.last_sample = Some(sample);
                }
            }

            if released {
                self.store.end_gesture();
                self.last_sample = None;
            }

            let mut surface = PainterSurface {
                painter: &painter,
                rect,
                background: self.background.to_color32(),
            };
            render::redraw_all(&mut surface, self.store.committed());
            for stroke in self.store.active_strokes() {
                render::draw_segment(&mut surface, stroke);
            }
        });
    }
}
