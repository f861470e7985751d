// crates/stillkit-media/src/lib.rs
//
// No egui dependency — communicates with stillkit-ui via channels only.
//
// To add a new media capability:
//   1. Create a new module file here
//   2. Add `mod mymodule;` below
//   3. Call it from worker.rs (a new MediaWorker method)

pub mod alpha;
pub mod analysis;
pub mod engine;
pub mod error;
pub mod jobs;
pub mod progress;
pub mod worker;

// Re-export the main public API so stillkit-ui imports are simple.
pub use error::{MediaError, Result};
pub use worker::MediaWorker;
pub use stillkit_core::events::MediaEvent;
