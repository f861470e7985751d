// crates/stillkit-ui/src/modules/mod.rs
//
// Panel registry. To add a new tool screen:
//   1. Create modules/mytool.rs implementing ToolModule
//   2. Add `pub mod mytool;` below
//   3. Route its ToolId to the panel in app.rs

pub mod home;
pub mod waveform;
pub mod alpha_tool;
pub mod still_tool;
pub mod mixer_tool;

use egui::Ui;
use stillkit_core::commands::ToolCommand;
use stillkit_core::state::SessionState;

/// Every screen-level panel implements this trait.
/// Panels read state and emit commands; they never mutate state directly.
pub trait ToolModule {
    fn name(&self) -> &str;
    fn ui(&mut self, ui: &mut Ui, state: &SessionState, cmd: &mut Vec<ToolCommand>);
}
