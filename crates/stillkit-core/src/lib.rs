// crates/stillkit-core/src/lib.rs
//
// Pure data layer of StillKit: tool registry, selection model, command
// builders, session state, and the types that flow over the media channel.
// No egui, no I/O — everything here is testable without a window or a
// running engine.

pub mod commands;
pub mod engine_args;
pub mod events;
pub mod filter;
pub mod helpers;
pub mod selection;
pub mod state;
pub mod tools;

// Re-export the types the UI touches on nearly every frame.
pub use selection::AudioSelection;
pub use state::SessionState;
pub use tools::{ToolId, ToolInfo};
