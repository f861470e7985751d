// crates/stillkit-ui/src/modules/mixer_tool.rs
//
// Image + audio mixer screen: pick an image and an audio file, trim the
// audio on the waveform, set fades, audition the boundaries, convert.
// The waveform widget owns all region gestures; this panel wires everything
// else around it.

use super::waveform::WaveformView;
use super::ToolModule;
use crate::helpers::format::truncate;
use crate::theme::{DARK_BG_2, DARK_BORDER, DARK_TEXT_DIM, GOOD};
use egui::{RichText, Stroke, Ui};
use rfd::FileDialog;
use stillkit_core::commands::ToolCommand;
use stillkit_core::helpers::size::format_bytes;
use stillkit_core::helpers::time::{format_boundary, format_timestamp};
use stillkit_core::selection::MAX_FADE_SECONDS;
use stillkit_core::state::{SessionState, MAX_ZOOM};
use stillkit_core::tools::ToolId;

pub struct MixerToolModule {
    pub waveform: WaveformView,
}

impl MixerToolModule {
    pub fn new() -> Self {
        Self { waveform: WaveformView::new() }
    }
}

impl ToolModule for MixerToolModule {
    fn name(&self) -> &str { "Image + Audio Mixer" }

    fn ui(&mut self, ui: &mut Ui, state: &SessionState, cmd: &mut Vec<ToolCommand>) {
        let tool = &state.mixer;
        let busy = tool.job.is_some();

        ui.add_space(8.0);
        ui.label(RichText::new("Put a still image over a piece of audio").size(14.0).strong());
        ui.label(
            RichText::new(
                "Produces an MP4 of the image with your trimmed audio underneath. \
                 Drag on the waveform to choose the part you want.",
            )
            .size(10.5)
            .color(DARK_TEXT_DIM),
        );
        ui.add_space(12.0);

        if !state.engine.is_ready() {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new().size(14.0));
                ui.label(
                    RichText::new("Preparing the conversion engine…")
                        .size(10.5)
                        .color(DARK_TEXT_DIM),
                );
            });
            ui.add_space(8.0);
        }

        // ── Inputs ───────────────────────────────────────────────────────────
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("🖼  Choose image…"))
                .clicked()
            {
                if let Some(path) = FileDialog::new()
                    .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "webp"])
                    .pick_file()
                {
                    cmd.push(ToolCommand::ChooseImage {
                        tool: ToolId::ImageAudioMixer,
                        path,
                    });
                }
            }
            if let Some(file) = &tool.image {
                ui.label(RichText::new(truncate(&file.name, 40)).size(11.0));
                ui.label(
                    RichText::new(format_bytes(file.size_bytes))
                        .size(10.0)
                        .color(DARK_TEXT_DIM),
                );
            }
        });

        if let Some(file) = &tool.image {
            ui.add_space(6.0);
            ui.add(
                egui::Image::new(format!("file://{}", file.path.display()))
                    .max_height(140.0)
                    .max_width(ui.available_width())
                    .corner_radius(egui::CornerRadius::same(4)),
            );
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("🎵  Choose audio…"))
                .clicked()
            {
                if let Some(path) = FileDialog::new()
                    .add_filter("Audio", &["mp3", "wav", "m4a", "flac", "ogg"])
                    .pick_file()
                {
                    cmd.push(ToolCommand::ChooseAudio { path });
                }
            }
            if let Some(file) = &tool.audio {
                ui.label(RichText::new(truncate(&file.name, 40)).size(11.0));
                ui.label(
                    RichText::new(format_bytes(file.size_bytes))
                        .size(10.0)
                        .color(DARK_TEXT_DIM),
                );
            }
            if tool.load_job.is_some() {
                ui.add(egui::Spinner::new().size(12.0));
                ui.label(RichText::new("Reading audio…").size(10.0).color(DARK_TEXT_DIM));
            }
        });

        // ── Waveform + selection controls ────────────────────────────────────
        if let (Some(data), Some(selection)) = (&tool.waveform, &tool.selection) {
            ui.add_space(10.0);
            self.waveform.ui(ui, data, selection, state.zoom, cmd);
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                boundary_field(ui, "Start", selection.start_seconds);
                boundary_field(ui, "End", selection.end_seconds);
                ui.label(
                    RichText::new(format!(
                        "{} selected of {}",
                        format_timestamp(selection.trim_duration()),
                        format_timestamp(data.duration),
                    ))
                    .size(10.0)
                    .color(DARK_TEXT_DIM),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut zoom = state.zoom;
                    let resp = ui.add(
                        egui::Slider::new(&mut zoom, 0.0..=MAX_ZOOM)
                            .text("zoom")
                            .custom_formatter(|v, _| {
                                if v <= 0.0 {
                                    "fit".to_string()
                                } else {
                                    format!("{v:.0} px/s")
                                }
                            }),
                    );
                    if resp.changed() {
                        cmd.push(ToolCommand::SetZoom(zoom));
                    }
                });
            });

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let mut fade_in = selection.fade_in_seconds;
                let r = ui.add(
                    egui::Slider::new(&mut fade_in, 0.0..=MAX_FADE_SECONDS)
                        .step_by(0.5)
                        .suffix(" s")
                        .text("fade in"),
                );
                if r.changed() {
                    cmd.push(ToolCommand::SetFadeIn(fade_in));
                }

                ui.add_space(12.0);

                let mut fade_out = selection.fade_out_seconds;
                let r = ui.add(
                    egui::Slider::new(&mut fade_out, 0.0..=MAX_FADE_SECONDS)
                        .step_by(0.5)
                        .suffix(" s")
                        .text("fade out"),
                );
                if r.changed() {
                    cmd.push(ToolCommand::SetFadeOut(fade_out));
                }
            });

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("▶  Start").clicked() {
                    cmd.push(ToolCommand::PreviewStart);
                }
                if ui.button("▶  End").clicked() {
                    cmd.push(ToolCommand::PreviewEnd);
                }
                if ui.button("⏹").clicked() {
                    cmd.push(ToolCommand::StopPreview);
                }
                ui.label(
                    RichText::new("Audition the first / last seconds of the selection")
                        .size(9.5)
                        .color(DARK_TEXT_DIM),
                );
            });
        }

        ui.add_space(12.0);

        // ── Run ──────────────────────────────────────────────────────────────
        let can_run = tool.image.is_some()
            && tool.selection.is_some()
            && state.engine.is_ready()
            && !state.transcode_in_flight();
        if ui
            .add_enabled(can_run, egui::Button::new("🎬  Convert"))
            .clicked()
        {
            cmd.push(ToolCommand::RunMix);
        }

        // ── Result ───────────────────────────────────────────────────────────
        if let Some(output) = &tool.result {
            ui.add_space(12.0);
            egui::Frame::new()
                .fill(DARK_BG_2)
                .stroke(Stroke::new(1.0, DARK_BORDER))
                .corner_radius(egui::CornerRadius::same(5))
                .inner_margin(egui::Margin::same(10))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("✔").color(GOOD));
                        ui.label(
                            RichText::new(format!(
                                "Video ready · {}",
                                format_bytes(output.size_bytes()),
                            ))
                            .size(11.0),
                        );
                        if ui.button("💾  Save…").clicked() {
                            cmd.push(ToolCommand::SaveResult(ToolId::ImageAudioMixer));
                        }
                    });
                });
        }
    }
}

/// Small framed read-only readout for a trim boundary, two decimals.
fn boundary_field(ui: &mut Ui, label: &str, seconds: f64) {
    ui.label(RichText::new(label).size(10.0).color(DARK_TEXT_DIM));
    egui::Frame::new()
        .fill(DARK_BG_2)
        .stroke(Stroke::new(1.0, DARK_BORDER))
        .corner_radius(egui::CornerRadius::same(3))
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(format_boundary(seconds)).size(11.0).monospace());
        });
}
