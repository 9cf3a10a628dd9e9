// ui.rs - Controls and the emulated panel

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};
use conway::patterns::PATTERNS;

use crate::OledApp;

impl eframe::App for OledApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Step on the frame clock, like the panel's main loop
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.last_update = Instant::now();
            self.advance();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!(
                "Game of Life ({}x{} OLED)",
                self.display().width(),
                self.display().height()
            ));

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    self.last_update = Instant::now();
                }

                if ui.button("⏭ Step").clicked() {
                    self.is_running = false;
                    self.advance();
                }

                if ui.button("🎲 Reseed").clicked() {
                    self.reseed();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.clear_grid();
                }

                ui.separator();

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(self.selected_pattern_name())
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.apply_selected_pattern();
                }
            });

            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1.0 / self.update_interval.as_secs_f32();
                if ui.add(egui::Slider::new(&mut speed, 0.5..=60.0).suffix(" fps")).changed() {
                    self.update_interval = Duration::from_secs_f32(1.0 / speed);
                }

                ui.separator();

                ui.label("Lit:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Off:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            // The panel itself, one square per display pixel
            let pixel = self.pixel_size;
            let width = self.display().width();
            let height = self.display().height();
            let total_size = Vec2::new(width as f32 * pixel, height as f32 * pixel);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, self.dead_color);
            for (px, py) in self.display().iter_lit() {
                let rect = Rect::from_min_size(
                    origin + Vec2::new(px as f32 * pixel, py as f32 * pixel),
                    Vec2::splat(pixel),
                );
                painter.rect_filled(rect, 0.0, self.live_color);
            }
            painter.rect_stroke(response.rect, 0.0, Stroke::new(1.0, Color32::from_gray(60)));

            // Clicking toggles the cell under the pointer while paused
            if !self.is_running && response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let cell_px = pixel * self.engine().cell_size() as f32;
                    let x = ((pos.x - origin.x) / cell_px) as usize;
                    let y = ((pos.y - origin.y) / cell_px) as usize;
                    let grid = self.engine().grid();
                    if x < grid.width() && y < grid.height() {
                        self.toggle_cell(x, y);
                    }
                }
            }

            ui.separator();

            let engine = self.engine();
            ui.horizontal(|ui| {
                ui.label(format!("Generation: {}", engine.generation()));
                ui.label(format!("Live cells: {}", engine.live_count()));
                ui.label(format!("Stable for: {}", engine.stable_generations()));
                ui.label(format!("Reseeds: {}", engine.reseeds()));
                ui.label(format!("Frame: {:.1} ms", self.last_frame_time.as_secs_f64() * 1000.0));
            });
        });

        // Keep the frame clock ticking while running
        if self.is_running {
            ctx.request_repaint_after(self.update_interval.saturating_sub(self.last_update.elapsed()));
        }
    }
}
