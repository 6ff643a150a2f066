// crates/vidshelf-ui/src/modules/library.rs
use super::AppModule;
use crate::context::AppContext;
use crate::helpers::format::{fit_label, truncate};
use crate::theme::{ACCENT, DARK_BG_2, DARK_BG_3, DARK_TEXT, DARK_TEXT_DIM, DESTRUCTIVE};
use egui::{Align, Align2, FontId, Layout, RichText, Sense, Ui};
use vidshelf_core::commands::AppCommand;
use vidshelf_core::helpers::time::format_duration_secs;
use vidshelf_core::Session;

const ROW_H: f32 = 56.0;

pub struct LibraryModule;

impl AppModule for LibraryModule {
    fn name(&self) -> &str { "My Videos" }

    fn ui(&mut self, ui: &mut Ui, session: &Session, _ctx: &AppContext, cmd: &mut Vec<AppCommand>) {
        let library = session.store.library();

        // ── Header ──────────────────────────────────────────────────────────
        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin { left: 12, right: 12, top: 8, bottom: 8 })
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("{} videos", library.len()))
                        .size(12.0).color(DARK_TEXT_DIM));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let add = egui::Button::new(RichText::new("＋ Add video").color(egui::Color32::WHITE))
                            .fill(ACCENT);
                        if ui.add(add).clicked() {
                            cmd.push(AppCommand::ImportVideo);
                        }
                        let clear = egui::Button::new(RichText::new("Clear all").color(DESTRUCTIVE));
                        if ui.add_enabled(!library.is_empty(), clear).clicked() {
                            cmd.push(AppCommand::RequestClearAll);
                        }
                    });
                });
            });

        ui.add_space(4.0);

        // ── Rows ────────────────────────────────────────────────────────────
        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            if library.is_empty() {
                ui.add_space(80.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("🎬").size(40.0));
                    ui.add_space(8.0);
                    ui.label(RichText::new("No videos yet").size(16.0).strong());
                    ui.label(RichText::new("Use “Add video” or drop a file here")
                        .size(12.0).color(DARK_TEXT_DIM));
                });
                return;
            }

            for record in library {
                let (rect, row) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), ROW_H), Sense::click());
                let painter = ui.painter();

                let fill = if row.hovered() { DARK_BG_3 } else { DARK_BG_2 };
                painter.rect_filled(rect.shrink2(egui::vec2(0.0, 2.0)), 8.0, fill);

                let text_left = rect.left() + 16.0;
                let name_px   = rect.width() - 16.0 - 56.0;
                painter.text(
                    egui::pos2(text_left, rect.center().y - 9.0),
                    Align2::LEFT_CENTER,
                    fit_label(&record.name, name_px, 14.0),
                    FontId::proportional(14.0),
                    DARK_TEXT,
                );
                painter.text(
                    egui::pos2(text_left, rect.center().y + 11.0),
                    Align2::LEFT_CENTER,
                    format_duration_secs(record.duration),
                    FontId::monospace(11.0),
                    DARK_TEXT_DIM,
                );

                // Registered after the row so it wins the hit test.
                let del_rect = egui::Rect::from_center_size(
                    egui::pos2(rect.right() - 28.0, rect.center().y), egui::vec2(32.0, 28.0));
                let del = ui.put(del_rect,
                    egui::Button::new(RichText::new("🗑").color(DESTRUCTIVE)).frame(false))
                    .on_hover_text("Delete");

                if del.clicked() {
                    cmd.push(AppCommand::RequestDelete(record.id.clone()));
                } else if row.clicked() {
                    cmd.push(AppCommand::OpenPlayer(record.id.clone()));
                }
                if row.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }

                // ── Right-click context menu ────────────────────────────────
                row.context_menu(|ui| {
                    ui.set_min_width(160.0);
                    ui.label(RichText::new(truncate(&record.name, 32)).size(11.0).color(DARK_TEXT_DIM));
                    ui.separator();
                    if ui.button("▶  Play").clicked() {
                        cmd.push(AppCommand::OpenPlayer(record.id.clone()));
                        ui.close();
                    }
                    if ui.button(RichText::new("🗑  Delete").color(DESTRUCTIVE)).clicked() {
                        cmd.push(AppCommand::RequestDelete(record.id.clone()));
                        ui.close();
                    }
                });
            }
            ui.add_space(8.0);
        });
    }
}
