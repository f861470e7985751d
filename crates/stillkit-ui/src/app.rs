// src/app.rs (stillkit-ui)
use crate::context::AppContext;
use crate::helpers::save;
use crate::modules::{
    alpha_tool::AlphaToolModule,
    home::HomeModule,
    mixer_tool::MixerToolModule,
    still_tool::StillToolModule,
    ToolModule,
};
use crate::theme::{self, configure_style};
use eframe::egui;
use egui::{Align, Layout, RichText};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use stillkit_core::commands::ToolCommand;
use stillkit_core::selection::MAX_FADE_SECONDS;
use stillkit_core::state::{
    AlphaToolState, EngineStatus, MixerToolState, PickedFile, Screen, SessionState,
    StillToolState, MAX_ZOOM,
};
use stillkit_core::tools::{tool_info, ToolId};
use stillkit_media::MediaWorker;

/// The only persisted bits: cosmetic preferences. Picked files, selections,
/// and results always start fresh.
#[derive(Serialize, Deserialize)]
struct AppStorage {
    zoom:     f32,
    fade_in:  f64,
    fade_out: f64,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct StillKitApp {
    state:        SessionState,
    context:      AppContext,
    // Panel modules as concrete types so a routing typo is a compile error.
    home:         HomeModule,
    alpha_tool:   AlphaToolModule,
    still_tool:   StillToolModule,
    mixer_tool:   MixerToolModule,
    /// Commands emitted by modules each frame, processed after the UI pass.
    pending_cmds: Vec<ToolCommand>,
}

impl StillKitApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);
        // Pin to dark mode so OS light/dark switches don't overwrite the theme.
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let mut state = SessionState::default();
        if let Some(stored) = cc
            .storage
            .and_then(|s| eframe::get_value::<AppStorage>(s, eframe::APP_KEY))
        {
            state.zoom            = stored.zoom.clamp(0.0, MAX_ZOOM);
            state.sticky_fade_in  = stored.fade_in.clamp(0.0, MAX_FADE_SECONDS);
            state.sticky_fade_out = stored.fade_out.clamp(0.0, MAX_FADE_SECONDS);
        }

        Self {
            state,
            context:      AppContext::new(MediaWorker::new()),
            home:         HomeModule,
            alpha_tool:   AlphaToolModule,
            still_tool:   StillToolModule,
            mixer_tool:   MixerToolModule::new(),
            pending_cmds: Vec::new(),
        }
    }

    fn process_command(&mut self, cmd: ToolCommand) {
        match cmd {
            // ── Navigation ───────────────────────────────────────────────────
            ToolCommand::OpenTool(id) => {
                self.state.screen = Screen::Tool(id);
            }
            ToolCommand::GoHome => {
                // Leaving a tool discards its session: picked files, results,
                // and selections never survive navigation. In-flight work is
                // orphaned and its events die on the stale-job guards.
                if let Screen::Tool(id) = self.state.screen {
                    match id {
                        ToolId::TransparentPixel => {
                            self.state.alpha = AlphaToolState::default();
                        }
                        ToolId::StillToVideo => {
                            self.state.still = StillToolState::default();
                        }
                        ToolId::ImageAudioMixer => {
                            self.context.playback.stop();
                            self.mixer_tool.waveform.reset();
                            self.state.mixer = MixerToolState::default();
                        }
                    }
                }
                self.state.screen = Screen::Home;
            }

            // ── File choices ─────────────────────────────────────────────────
            ToolCommand::ChooseImage { tool, path } => {
                let file = picked_file(path);
                match tool {
                    ToolId::TransparentPixel => {
                        self.state.alpha.source = Some(file);
                        self.state.alpha.result = None;
                        self.state.alpha.error  = None;
                    }
                    ToolId::StillToVideo => {
                        self.state.still.source = Some(file);
                        self.state.still.result = None;
                        self.state.still.error  = None;
                        self.state.still.notice = None;
                    }
                    ToolId::ImageAudioMixer => {
                        self.state.mixer.image  = Some(file);
                        self.state.mixer.result = None;
                    }
                }
            }
            ToolCommand::ChooseAudio { path } => {
                self.context.playback.stop();
                self.mixer_tool.waveform.reset();
                let file = picked_file(path.clone());
                let job  = self.context.worker.load_audio(path);
                self.state.mixer.replace_audio(file, job);
                self.state.mixer.error = None;
            }

            // ── Conversions ──────────────────────────────────────────────────
            ToolCommand::RunTransparentPixel => {
                if self.state.alpha.job.is_none() {
                    if let Some(path) =
                        self.state.alpha.source.as_ref().map(|f| f.path.clone())
                    {
                        self.state.alpha.result = None;
                        self.state.alpha.error  = None;
                        self.state.alpha.job    = Some(self.context.worker.start_alpha(path));
                    }
                }
            }
            ToolCommand::RunStillToVideo => {
                if self.state.engine.is_ready() && !self.state.transcode_in_flight() {
                    if let Some(path) =
                        self.state.still.source.as_ref().map(|f| f.path.clone())
                    {
                        self.state.still.result   = None;
                        self.state.still.error    = None;
                        self.state.still.notice   = None;
                        self.state.still.progress = 0;
                        self.state.still.job =
                            Some(self.context.worker.start_still_video(path));
                    }
                }
            }
            ToolCommand::RunMix => {
                if self.state.engine.is_ready() && !self.state.transcode_in_flight() {
                    let image     = self.state.mixer.image.as_ref().map(|f| f.path.clone());
                    let audio     = self.state.mixer.audio.as_ref().map(|f| f.path.clone());
                    let selection = self.state.mixer.selection;
                    if let (Some(image), Some(audio), Some(selection)) =
                        (image, audio, selection)
                    {
                        self.context.playback.stop();
                        self.state.mixer.result   = None;
                        self.state.mixer.error    = None;
                        self.state.mixer.progress = 0;
                        self.state.mixer.job =
                            Some(self.context.worker.start_mix(image, audio, selection));
                    }
                }
            }

            // ── Region editor ────────────────────────────────────────────────
            ToolCommand::SetRegion { start, end } => {
                if let Some(sel) = &mut self.state.mixer.selection {
                    sel.set_region(start, end);
                }
            }
            ToolCommand::SetRegionStart(t) => {
                if let Some(sel) = &mut self.state.mixer.selection {
                    sel.set_start(t);
                }
            }
            ToolCommand::SetRegionEnd(t) => {
                if let Some(sel) = &mut self.state.mixer.selection {
                    sel.set_end(t);
                }
            }
            ToolCommand::SetFadeIn(v) => {
                let v = v.clamp(0.0, MAX_FADE_SECONDS);
                if let Some(sel) = &mut self.state.mixer.selection {
                    sel.fade_in_seconds = v;
                }
                self.state.sticky_fade_in = v;
            }
            ToolCommand::SetFadeOut(v) => {
                let v = v.clamp(0.0, MAX_FADE_SECONDS);
                if let Some(sel) = &mut self.state.mixer.selection {
                    sel.fade_out_seconds = v;
                }
                self.state.sticky_fade_out = v;
            }
            ToolCommand::SetZoom(z) => {
                self.state.zoom = z.clamp(0.0, MAX_ZOOM);
            }

            // ── Preview ──────────────────────────────────────────────────────
            ToolCommand::PreviewStart => {
                let audio = self.state.mixer.audio.as_ref().map(|f| f.path.clone());
                if let (Some(path), Some(sel)) = (audio, self.state.mixer.selection) {
                    let (from, to) = sel.preview_start_window();
                    self.context.playback.play(&path, from, to);
                }
            }
            ToolCommand::PreviewEnd => {
                let audio = self.state.mixer.audio.as_ref().map(|f| f.path.clone());
                if let (Some(path), Some(sel)) = (audio, self.state.mixer.selection) {
                    let (from, to) = sel.preview_end_window();
                    self.context.playback.play(&path, from, to);
                }
            }
            ToolCommand::StopPreview => {
                self.context.playback.stop();
            }

            // ── Results ──────────────────────────────────────────────────────
            ToolCommand::SaveResult(tool) => match tool {
                ToolId::TransparentPixel => {
                    if let Some(output) = &self.state.alpha.result {
                        save::save_output(output, "PNG image", &["png"]);
                    }
                }
                ToolId::StillToVideo => {
                    if let Some(output) = &self.state.still.result {
                        save::save_output(output, "MP4 video", &["mp4"]);
                    }
                }
                ToolId::ImageAudioMixer => {
                    if let Some(output) = &self.state.mixer.result {
                        save::save_output(output, "MP4 video", &["mp4"]);
                    }
                }
            },
            ToolCommand::DismissError(tool) => match tool {
                ToolId::TransparentPixel => self.state.alpha.error = None,
                ToolId::StillToVideo     => self.state.still.error = None,
                ToolId::ImageAudioMixer  => self.state.mixer.error = None,
            },
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel")
            .exact_height(36.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        RichText::new("🧰 StillKit")
                            .strong()
                            .size(15.0)
                            .color(theme::ACCENT),
                    );
                    ui.separator();

                    if let Screen::Tool(id) = self.state.screen {
                        let back = ui.add_enabled(
                            !self.state.transcode_in_flight(),
                            egui::Button::new("⬅ Tools"),
                        );
                        if back.clicked() {
                            self.pending_cmds.push(ToolCommand::GoHome);
                        }
                        ui.label(RichText::new(tool_info(id).name).size(12.0).weak());
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        match &self.state.engine {
                            EngineStatus::Ready { version } => {
                                ui.label(
                                    RichText::new("✔ engine ready")
                                        .size(10.0)
                                        .color(theme::GOOD),
                                )
                                .on_hover_text(version);
                            }
                            // Failed renders identically to Loading: the
                            // status never resolves and the log has the cause.
                            EngineStatus::Loading | EngineStatus::Failed => {
                                ui.label(
                                    RichText::new("loading engine…")
                                        .size(10.0)
                                        .color(theme::DARK_TEXT_DIM),
                                );
                                ui.add(egui::Spinner::new().size(12.0));
                            }
                        }
                    });
                });
            });
    }
}

fn picked_file(path: PathBuf) -> PickedFile {
    let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    PickedFile::new(path, size)
}

// ── Modals ────────────────────────────────────────────────────────────────────

/// Blocking progress card shown while an engine transcode runs. No cancel:
/// jobs are short and always run to completion or failure.
///
/// Layer order, bottom to top: panels, then the scrim painter, then the card
/// Area (same Foreground order, registered later, so it draws on top).
fn show_progress_modal(ctx: &egui::Context, state: &SessionState) {
    if !state.transcode_in_flight() {
        return;
    }
    let pct = if state.still.job.is_some() {
        state.still.progress
    } else {
        state.mixer.progress
    };

    let screen = ctx.screen_rect();
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("progress_modal_scrim"),
    ));
    painter.rect_filled(screen, 0.0, egui::Color32::from_black_alpha(128));

    let card_rect =
        egui::Rect::from_center_size(screen.center(), egui::vec2(360.0, 170.0));

    egui::Area::new(egui::Id::new("progress_modal_card"))
        .order(egui::Order::Foreground)
        .fixed_pos(card_rect.min)
        .show(ctx, |ui| {
            ui.set_min_size(card_rect.size());
            ui.set_max_size(card_rect.size());

            // Swallow pointer input so nothing behind the scrim reacts.
            let _ = ui.interact(
                screen,
                egui::Id::new("progress_modal_blocker"),
                egui::Sense::click_and_drag(),
            );

            ui.painter().rect(
                card_rect,
                4.0,
                theme::DARK_BG_2,
                egui::Stroke::new(1.0, theme::ACCENT_DIM),
                egui::StrokeKind::Inside,
            );

            let inner = card_rect.shrink(22.0);
            let mut child = ui.new_child(egui::UiBuilder::new().max_rect(inner));
            child.vertical_centered(|ui| {
                ui.label(RichText::new("Converting…").size(13.0).strong());
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!("{pct}%"))
                        .size(40.0)
                        .strong()
                        .color(theme::ACCENT),
                );
                ui.add_space(8.0);
                let (bar, _) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), 8.0),
                    egui::Sense::hover(),
                );
                let p = ui.painter();
                p.rect_filled(bar, 4.0, theme::DARK_BG_4);
                if pct > 0 {
                    let mut fill = bar;
                    fill.max.x = bar.min.x + bar.width() * f32::from(pct) / 100.0;
                    p.rect_filled(fill, 4.0, theme::ACCENT);
                }
            });
        });

    ctx.request_repaint();
}

/// Blocking failure alert. One per session can be up at a time because tools
/// reset their error on dismissal and new jobs clear it on start.
fn show_error_modal(
    ctx:   &egui::Context,
    state: &SessionState,
    cmd:   &mut Vec<ToolCommand>,
) {
    let (tool, message) = if let Some(e) = &state.alpha.error {
        (ToolId::TransparentPixel, e)
    } else if let Some(e) = &state.still.error {
        (ToolId::StillToVideo, e)
    } else if let Some(e) = &state.mixer.error {
        (ToolId::ImageAudioMixer, e)
    } else {
        return;
    };

    let screen = ctx.screen_rect();
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("error_modal_scrim"),
    ));
    painter.rect_filled(screen, 0.0, egui::Color32::from_black_alpha(128));

    let card_rect =
        egui::Rect::from_center_size(screen.center(), egui::vec2(380.0, 140.0));

    egui::Area::new(egui::Id::new("error_modal_card"))
        .order(egui::Order::Foreground)
        .fixed_pos(card_rect.min)
        .show(ctx, |ui| {
            ui.set_min_size(card_rect.size());
            ui.set_max_size(card_rect.size());

            let _ = ui.interact(
                screen,
                egui::Id::new("error_modal_blocker"),
                egui::Sense::click_and_drag(),
            );

            ui.painter().rect(
                card_rect,
                4.0,
                theme::DARK_BG_2,
                egui::Stroke::new(1.0, theme::BAD),
                egui::StrokeKind::Inside,
            );

            let inner = card_rect.shrink(20.0);
            let mut child = ui.new_child(egui::UiBuilder::new().max_rect(inner));
            child.vertical_centered(|ui| {
                ui.label(RichText::new("Something went wrong").size(13.0).strong());
                ui.add_space(6.0);
                ui.label(
                    RichText::new(message.as_str())
                        .size(10.5)
                        .color(theme::DARK_TEXT_DIM),
                );
                ui.add_space(10.0);
                if ui
                    .add(egui::Button::new("Dismiss").min_size(egui::vec2(120.0, 24.0)))
                    .clicked()
                {
                    cmd.push(ToolCommand::DismissError(tool));
                }
            });
        });
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for StillKitApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(
            storage,
            eframe::APP_KEY,
            &AppStorage {
                zoom:     self.state.zoom,
                fade_in:  self.state.sticky_fade_in,
                fade_out: self.state.sticky_fade_out,
            },
        );
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.context.playback.tick();
        self.context.ingest_media_events(&mut self.state, ctx);

        self.top_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    match self.state.screen {
                        Screen::Home => {
                            self.home.ui(ui, &self.state, &mut self.pending_cmds);
                        }
                        Screen::Tool(ToolId::TransparentPixel) => {
                            self.alpha_tool.ui(ui, &self.state, &mut self.pending_cmds);
                        }
                        Screen::Tool(ToolId::StillToVideo) => {
                            self.still_tool.ui(ui, &self.state, &mut self.pending_cmds);
                        }
                        Screen::Tool(ToolId::ImageAudioMixer) => {
                            self.mixer_tool.ui(ui, &self.state, &mut self.pending_cmds);
                        }
                    }
                });
        });

        show_progress_modal(ctx, &self.state);
        show_error_modal(ctx, &self.state, &mut self.pending_cmds);

        // ── Process commands emitted by modules this frame ────────────────────
        let cmds: Vec<ToolCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd);
        }

        // ── Repaint policy ────────────────────────────────────────────────────
        // Background work delivers results over the channel; keep the loop
        // turning while anything is pending so ingest actually runs.
        let busy = self.state.transcode_in_flight()
            || self.state.alpha.job.is_some()
            || self.state.mixer.load_job.is_some()
            || self.context.playback.is_playing();
        if busy {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else if !self.state.engine.is_ready() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
