// crates/vidshelf-ui/src/modules/player.rs
//
// Full-window player: video canvas with double-tap seek zones, position and
// duration labels, scrub slider and transport buttons.

use super::AppModule;
use crate::context::AppContext;
use crate::theme::{ACCENT, DARK_BG_3, DARK_TEXT_DIM};
use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Ui, Vec2};
use vidshelf_core::commands::AppCommand;
use vidshelf_core::gesture::TapSide;
use vidshelf_core::helpers::time::format_time;
use vidshelf_core::Session;

const CONTROLS_H: f32 = 110.0;

#[derive(Default)]
pub struct PlayerModule {
    /// Slider value while the user is dragging; the seek is sent on release.
    scrub: Option<f64>,
}

impl PlayerModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any in-progress scrub, e.g. when the player closes.
    pub fn reset(&mut self) {
        self.scrub = None;
    }
}

impl AppModule for PlayerModule {
    fn name(&self) -> &str { "Now Playing" }

    fn ui(&mut self, ui: &mut Ui, session: &Session, ctx: &AppContext, cmd: &mut Vec<AppCommand>) {
        let player = &session.player;
        let Some(record) = player.selected() else { return };
        let step = session.seek_step_ms() as i64;

        // ── Title row ───────────────────────────────────────────────────────
        ui.horizontal(|ui| {
            if ui.button("‹ Library").clicked() {
                cmd.push(AppCommand::ClosePlayer);
            }
            ui.label(RichText::new(&record.name).size(15.0).strong());
        });
        ui.add_space(6.0);

        // ── Canvas ──────────────────────────────────────────────────────────
        let panel_w = ui.available_width();
        let panel_h = (ui.available_height() - CONTROLS_H).max(120.0);
        let ratio = ctx.frame.as_ref()
            .map(|t| { let [w, h] = t.size(); w as f32 / h.max(1) as f32 })
            .unwrap_or(16.0 / 9.0);
        let (canvas_w, canvas_h) = {
            let h = panel_w / ratio;
            if h <= panel_h { (panel_w, h) } else { (panel_h * ratio, panel_h) }
        };

        let (outer, resp) = ui.allocate_exact_size(Vec2::new(panel_w, canvas_h), Sense::click());
        let canvas = Rect::from_center_size(outer.center(), Vec2::new(canvas_w, canvas_h));
        let painter = ui.painter();
        painter.rect_filled(canvas, 6.0, Color32::BLACK);

        match &ctx.frame {
            Some(tex) => {
                painter.image(tex.id(), canvas,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)), Color32::WHITE);
            }
            None => {
                // Waiting for the first frame: spinner.
                let t  = ui.input(|i| i.time) as f32;
                let cx = canvas.center();
                let r  = 14.0_f32;
                painter.circle_stroke(cx, r, egui::Stroke::new(1.5, Color32::from_gray(45)));
                let a = t * 3.5;
                painter.line_segment([cx, cx + egui::vec2(a.cos() * r, a.sin() * r)],
                    egui::Stroke::new(2.0, ACCENT));
                ui.ctx().request_repaint();
            }
        }

        // Double-tap acknowledgment, fading over the tapped half.
        if let Some((side, opacity)) = session.taps.indicator(AppContext::now_ms()) {
            let (half, label) = match side {
                TapSide::Left  => (Rect::from_min_max(canvas.min, canvas.center_bottom()),
                                   format!("« {}s", step / 1000)),
                TapSide::Right => (Rect::from_min_max(canvas.center_top(), canvas.max),
                                   format!("{}s »", step / 1000)),
            };
            painter.rect_filled(half, 6.0, Color32::from_white_alpha((40.0 * opacity) as u8));
            painter.text(half.center(), Align2::CENTER_CENTER, label,
                FontId::proportional(22.0),
                Color32::WHITE.gamma_multiply(opacity));
            ui.ctx().request_repaint();
        }

        if resp.clicked() {
            if let Some(pos) = resp.interact_pointer_pos().filter(|p| canvas.contains(*p)) {
                cmd.push(AppCommand::Tap { x: pos.x - canvas.left(), width: canvas.width() });
            }
        }

        ui.add_space(8.0);

        // ── Time labels + scrub slider ──────────────────────────────────────
        let shown_ms = match self.scrub {
            Some(f) => (f * player.duration_ms() as f64) as u64,
            None    => player.position_ms(),
        };
        ui.horizontal(|ui| {
            ui.label(RichText::new(format_time(shown_ms)).monospace().color(DARK_TEXT_DIM));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(format_time(player.duration_ms())).monospace().color(DARK_TEXT_DIM));
            });
        });

        let mut value = self.scrub.unwrap_or_else(|| player.fraction());
        ui.spacing_mut().slider_width = ui.available_width();
        let slider = egui::Slider::new(&mut value, 0.0..=1.0).show_value(false);
        let s = ui.add_enabled(player.duration_ms() > 0, slider);
        if s.dragged() {
            self.scrub = Some(value);
        }
        if s.drag_stopped() || (s.changed() && !s.dragged()) {
            cmd.push(AppCommand::SeekToFraction(value));
            self.scrub = None;
        }

        ui.add_space(6.0);

        // ── Transport ───────────────────────────────────────────────────────
        ui.horizontal(|ui| {
            let btn_w = 64.0;
            let total = btn_w * 3.0 + ui.spacing().item_spacing.x * 2.0;
            ui.add_space(((ui.available_width() - total) / 2.0).max(0.0));

            let big = |text: &str| egui::Button::new(RichText::new(text).size(18.0))
                .fill(DARK_BG_3)
                .min_size(egui::vec2(btn_w, 40.0));

            if ui.add(big(&format!("⟲ {}", step / 1000))).on_hover_text("Back").clicked() {
                cmd.push(AppCommand::SeekBy(-step));
            }
            let play_label = if player.is_playing() { "⏸" } else { "▶" };
            if ui.add(big(play_label)).clicked() {
                cmd.push(AppCommand::TogglePlayPause);
            }
            if ui.add(big(&format!("{} ⟳", step / 1000))).on_hover_text("Forward").clicked() {
                cmd.push(AppCommand::SeekBy(step));
            }
        });

        if player.is_playing() {
            ui.ctx().request_repaint();
        }
    }
}
