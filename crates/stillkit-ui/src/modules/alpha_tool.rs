// crates/stillkit-ui/src/modules/alpha_tool.rs
//
// Transparent-pixel tool screen. Pick an image, run the pixel edit on the
// worker, save the resulting PNG. No engine involved.

use super::ToolModule;
use crate::helpers::format::truncate;
use crate::theme::{DARK_BG_2, DARK_BORDER, DARK_TEXT_DIM, GOOD};
use egui::{RichText, Stroke, Ui};
use rfd::FileDialog;
use stillkit_core::commands::ToolCommand;
use stillkit_core::helpers::size::format_bytes;
use stillkit_core::state::SessionState;
use stillkit_core::tools::ToolId;

pub struct AlphaToolModule;

impl ToolModule for AlphaToolModule {
    fn name(&self) -> &str { "Transparent Pixel PNG" }

    fn ui(&mut self, ui: &mut Ui, state: &SessionState, cmd: &mut Vec<ToolCommand>) {
        let tool = &state.alpha;
        let busy = tool.job.is_some();

        ui.add_space(8.0);
        ui.label(RichText::new("Make an image upload-proof").size(14.0).strong());
        ui.label(
            RichText::new(
                "Sets the top-left pixel to about 1% opacity. Invisible to the eye, \
                 but sites keep the file as a PNG instead of recompressing it.",
            )
            .size(10.5)
            .color(DARK_TEXT_DIM),
        );
        ui.add_space(12.0);

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
                        tool: ToolId::TransparentPixel,
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
        ui.horizontal(|ui| {
            let can_run = tool.source.is_some() && !busy;
            if ui
                .add_enabled(can_run, egui::Button::new("✨  Add transparent pixel"))
                .clicked()
            {
                cmd.push(ToolCommand::RunTransparentPixel);
            }
            if busy {
                ui.add(egui::Spinner::new().size(14.0));
                ui.label(RichText::new("Processing…").size(10.5).color(DARK_TEXT_DIM));
            }
        });

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
                            RichText::new(format!("PNG ready · {}", format_bytes(output.size_bytes())))
                                .size(11.0),
                        );
                        if ui.button("💾  Save…").clicked() {
                            cmd.push(ToolCommand::SaveResult(ToolId::TransparentPixel));
                        }
                    });
                });
        }
    }
}
