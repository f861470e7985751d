// crates/stillkit-core/src/events.rs
//
// Types that flow across the channel between stillkit-media and stillkit-ui.
// No egui, no process handles — just plain data. The channel is created once
// when the worker starts; the UI drains it every frame and is the only side
// that touches session state.

use uuid::Uuid;

/// Events sent from the MediaWorker background threads to the UI.
pub enum MediaEvent {
    /// Engine binary resolved and version-probed.
    EngineReady  { version: String },
    /// Engine could not be resolved. Terminal — no retry path exists.
    EngineFailed { error: String },

    /// Audio analysis finished for the mixer.
    AudioLoaded  { job: Uuid, peaks: Vec<f32>, duration: f64, sample_rate: u32 },
    AudioFailed  { job: Uuid, error: String },

    /// Raw engine progress for a transcode, as a rounded percentage. The UI
    /// clamps and makes it monotonic; out-of-range values are dropped there.
    JobProgress  { job: Uuid, percent: i32 },
    /// One line of engine log output, forwarded for diagnostics.
    JobLog       { job: Uuid, line: String },
    /// Job finished; `bytes` is the produced file read back from the
    /// engine's scratch directory (or the in-process encoder).
    JobDone      { job: Uuid, bytes: Vec<u8> },
    /// Job produced a file over the tool's size cap. Non-fatal: the UI shows
    /// an inline message and offers nothing to save.
    JobOversized { job: Uuid, size_bytes: u64 },
    /// Job failed. `error` is for the log; the UI shows a generic alert.
    JobFailed    { job: Uuid, error: String },
}
