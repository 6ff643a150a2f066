// src/app.rs (vidshelf-ui)
use std::sync::Arc;

use vidshelf_core::commands::{AppCommand, NoticeKind};
use vidshelf_core::config::AppConfig;
use vidshelf_core::files::NativeFs;
use vidshelf_core::import::MediaPicker;
use vidshelf_core::playback::dispatch;
use vidshelf_core::{LibraryStore, Platform, Session, StorageAdapter};
use vidshelf_media::{PlayerWorker, WorkerOptions};
use crate::context::AppContext;
use crate::modules::{AppModule, library::LibraryModule, player::PlayerModule};
use crate::picker::{DialogPicker, DroppedFile};
use crate::theme::{configure_style, ACCENT, DESTRUCTIVE};
use crate::paths;
use eframe::egui;
use egui::RichText;

// ── App ───────────────────────────────────────────────────────────────────────

pub struct VidShelfApp {
    session:      Session,
    context:      AppContext,
    library:      LibraryModule,
    player:       PlayerModule,
    /// Commands emitted by modules each frame, processed after the UI pass
    pending_cmds: Vec<AppCommand>,
}

impl VidShelfApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        configure_style(&cc.egui_ctx);
        // Pin to dark mode: prevents egui overwriting our theme on OS light/dark changes.
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let platform = Platform::current();
        let storage  = StorageAdapter::for_platform(platform, &paths::storage_dir());
        let fs       = NativeFs::new(paths::videos_dir());
        let store    = LibraryStore::open(platform, storage, Box::new(fs));

        // Paused seeks and late errors arrive while egui is idle; wake it.
        let repaint_ctx = cc.egui_ctx.clone();
        let worker = PlayerWorker::with_waker(
            WorkerOptions {
                looping:         config.looping,
                max_frame_width: config.max_frame_width,
            },
            Arc::new(move || repaint_ctx.request_repaint()),
        );

        Self {
            session:      Session::new(store, &config),
            context:      AppContext::new(worker),
            library:      LibraryModule,
            player:       PlayerModule::new(),
            pending_cmds: Vec::new(),
        }
    }

    fn process_command(&mut self, cmd: AppCommand, picker: &mut dyn MediaPicker) {
        let was_open = self.session.player.is_open();
        let surface_cmds = self.session.apply(cmd, picker, AppContext::now_ms());
        dispatch(&mut self.context.worker, surface_cmds);
        if was_open && !self.session.player.is_open() {
            self.player.reset();
        }
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let files = ctx.input(|i| i.raw.dropped_files.clone());
        for file in files {
            let Some(path) = file.path else { continue };
            if !DroppedFile::is_video(&path) {
                log::info!("[app] ignoring dropped non-video {}", path.display());
                continue;
            }
            self.process_command(AppCommand::ImportVideo, &mut DroppedFile::new(path));
        }
    }

    fn handle_hotkeys(&mut self, ctx: &egui::Context) {
        // Modals own the keyboard while open.
        if !self.session.player.is_open()
            || self.session.pending_confirm.is_some()
            || self.session.notice.is_some()
        {
            return;
        }
        let step = self.session.seek_step_ms() as i64;
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Space) {
                self.pending_cmds.push(AppCommand::TogglePlayPause);
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                self.pending_cmds.push(AppCommand::SeekBy(-step));
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                self.pending_cmds.push(AppCommand::SeekBy(step));
            }
            if i.key_pressed(egui::Key::Escape) {
                self.pending_cmds.push(AppCommand::ClosePlayer);
            }
        });
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(confirm) = &self.session.pending_confirm {
            let modal = egui::Modal::new(egui::Id::new("confirm_modal")).show(ctx, |ui| {
                ui.set_width(300.0);
                ui.label(RichText::new(confirm.title()).size(16.0).strong());
                ui.add_space(6.0);
                ui.label(confirm.message());
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.pending_cmds.push(AppCommand::CancelPending);
                    }
                    let confirm_btn = egui::Button::new(
                        RichText::new(confirm.confirm_label()).color(egui::Color32::WHITE),
                    ).fill(DESTRUCTIVE);
                    if ui.add(confirm_btn).clicked() {
                        self.pending_cmds.push(AppCommand::ConfirmPending);
                    }
                });
            });
            if modal.should_close() {
                self.pending_cmds.push(AppCommand::CancelPending);
            }
            return;
        }

        if let Some(notice) = &self.session.notice {
            let modal = egui::Modal::new(egui::Id::new("notice_modal")).show(ctx, |ui| {
                ui.set_width(300.0);
                let color = match notice.kind {
                    NoticeKind::Info  => ACCENT,
                    NoticeKind::Error => DESTRUCTIVE,
                };
                ui.label(RichText::new(&notice.title).size(16.0).strong().color(color));
                ui.add_space(6.0);
                ui.label(&notice.body);
                ui.add_space(12.0);
                if ui.button("OK").clicked() {
                    self.pending_cmds.push(AppCommand::DismissNotice);
                }
            });
            if modal.should_close() {
                self.pending_cmds.push(AppCommand::DismissNotice);
            }
        }
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for VidShelfApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.context.worker.shutdown();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_drag_and_drop(ctx);
        self.context.ingest_player_events(&mut self.session, ctx);
        self.handle_hotkeys(ctx);

        let player_open = self.session.player.is_open();
        let title = if player_open { self.player.name() } else { self.library.name() };

        egui::TopBottomPanel::top("top_panel")
            .exact_height(40.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(RichText::new("VidShelf").strong().size(16.0).color(ACCENT));
                    ui.separator();
                    ui.label(RichText::new(title).size(13.0).weak());
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if player_open {
                self.player.ui(ui, &self.session, &self.context, &mut self.pending_cmds);
            } else {
                self.library.ui(ui, &self.session, &self.context, &mut self.pending_cmds);
            }
        });

        self.show_dialogs(ctx);

        // ── Process commands emitted by modules this frame ────────────────────
        let cmds: Vec<AppCommand> = self.pending_cmds.drain(..).collect();
        let mut picker = DialogPicker;
        for cmd in cmds {
            self.process_command(cmd, &mut picker);
        }
    }
}
