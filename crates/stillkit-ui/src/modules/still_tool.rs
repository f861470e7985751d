// crates/stillkit-ui/src/modules/still_tool.rs
//
// Image → silent video tool screen. The conversion itself runs through the
// engine on the worker; while it runs the app shows the blocking progress
// modal, so this panel only provides the inputs and the result.

use super::ToolModule;
use crate::helpers::format::truncate;
use crate::theme::{DARK_BG_2, DARK_BORDER, DARK_TEXT_DIM, GOOD, WARN};
use egui::{RichText, Stroke, Ui};
use rfd::FileDialog;
use stillkit_core::commands::ToolCommand;
use stillkit_core::helpers::size::{format_bytes, STILL_VIDEO_MAX_BYTES};
use stillkit_core::state::SessionState;
use stillkit_core::tools::ToolId;

pub struct StillToolModule;

impl ToolModule for StillToolModule {
    fn name(&self) -> &str { "Image to Video" }

    fn ui(&mut self, ui: &mut Ui, state: &SessionState, cmd: &mut Vec<ToolCommand>) {
        let tool = &state.still;
        let busy = tool.job.is_some();

        ui.add_space(8.0);
        ui.label(RichText::new("Turn a still into a short clip").size(14.0).strong());
        ui.label(
            RichText::new(format!(
                "Converts an image into a 2-second silent MP4 for pipelines that only \
                 take video. Output is capped at {}.",
                format_bytes(STILL_VIDEO_MAX_BYTES),
            ))
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

        // ── Source ───────────────────────────────────────────────────────────
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
                        tool: ToolId::StillToVideo,
                        path,
                    });
                }
            }
            if let Some(file) = &tool.source {
                ui.label(RichText::new(truncate(&file.name, 48)).size(11.0));
                ui.label(
                    RichText::new(format_bytes(file.size_bytes))
                        .size(10.0)
                        .color(DARK_TEXT_DIM),
                );
            }
        });

        if let Some(file) = &tool.source {
            ui.add_space(8.0);
            ui.add(
                egui::Image::new(format!("file://{}", file.path.display()))
                    .max_height(220.0)
                    .max_width(ui.available_width())
                    .corner_radius(egui::CornerRadius::same(4)),
            );
        }

        ui.add_space(12.0);

        // ── Run ──────────────────────────────────────────────────────────────
        let can_run = tool.source.is_some()
            && state.engine.is_ready()
            && !state.transcode_in_flight();
        if ui
            .add_enabled(can_run, egui::Button::new("🎞  Convert to video"))
            .clicked()
        {
            cmd.push(ToolCommand::RunStillToVideo);
        }

        // Oversize result: inline note, nothing to save.
        if let Some(notice) = &tool.notice {
            ui.add_space(8.0);
            ui.label(RichText::new(format!("⚠ {notice}")).size(11.0).color(WARN));
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
                            cmd.push(ToolCommand::SaveResult(ToolId::StillToVideo));
                        }
                    });
                });
        }
    }
}
