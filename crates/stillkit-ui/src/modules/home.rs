// crates/stillkit-ui/src/modules/home.rs
//
// The tool directory: one card per registered tool, in registry order.
// Clicking a card emits OpenTool; everything else here is paint.

use super::ToolModule;
use crate::theme::{ACCENT, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM};
use egui::{Id, RichText, Sense, Stroke, Ui};
use stillkit_core::commands::ToolCommand;
use stillkit_core::state::SessionState;
use stillkit_core::tools::TOOLS;

const CARD_WIDTH:  f32 = 248.0;
const CARD_HEIGHT: f32 = 108.0;

pub struct HomeModule;

impl ToolModule for HomeModule {
    fn name(&self) -> &str { "Home" }

    fn ui(&mut self, ui: &mut Ui, _state: &SessionState, cmd: &mut Vec<ToolCommand>) {
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("All tools").size(18.0).strong());
            ui.label(
                RichText::new("Pick a tool to get started")
                    .size(11.0)
                    .color(DARK_TEXT_DIM),
            );
        });
        ui.add_space(16.0);

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(10.0, 10.0);

            for info in TOOLS {
                let card_resp = egui::Frame::new()
                    .fill(DARK_BG_3)
                    .stroke(Stroke::new(1.0, DARK_BORDER))
                    .corner_radius(egui::CornerRadius::same(5))
                    .inner_margin(egui::Margin::same(10))
                    .show(ui, |ui| {
                        ui.set_width(CARD_WIDTH);
                        ui.set_height(CARD_HEIGHT);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(info.glyph).size(26.0));
                            ui.vertical(|ui| {
                                ui.label(RichText::new(info.name).size(13.0).strong());
                                ui.label(
                                    RichText::new(info.category.label())
                                        .size(9.0)
                                        .color(ACCENT),
                                );
                            });
                        });
                        ui.add_space(4.0);
                        ui.label(
                            RichText::new(info.description)
                                .size(10.5)
                                .color(DARK_TEXT_DIM),
                        );
                    })
                    .response;

                let interact = ui.interact(
                    card_resp.rect,
                    Id::new("tool_card").with(info.id),
                    Sense::click(),
                );
                if interact.hovered() {
                    // Accent border painted over the frame's own stroke.
                    ui.painter().rect_stroke(
                        card_resp.rect,
                        egui::CornerRadius::same(5),
                        Stroke::new(1.0, ACCENT),
                        egui::StrokeKind::Inside,
                    );
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if interact.clicked() {
                    cmd.push(ToolCommand::OpenTool(info.id));
                }
            }
        });
    }
}
