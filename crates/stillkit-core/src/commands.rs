// crates/stillkit-core/src/commands.rs
//
// Everything the UI can ask the app to do. Modules push these into a queue
// during their ui() pass; app.rs drains and applies them afterwards, so state
// mutation happens in exactly one place.

use crate::tools::ToolId;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum ToolCommand {
    // ── Navigation ───────────────────────────────────────────────────────
    OpenTool(ToolId),
    GoHome,

    // ── File choices ─────────────────────────────────────────────────────
    /// A picker dialog resolved to an image for the given tool.
    ChooseImage { tool: ToolId, path: PathBuf },
    /// A picker dialog resolved to an audio file for the mixer. Replaces the
    /// current asset and discards its selection.
    ChooseAudio { path: PathBuf },

    // ── Conversions ──────────────────────────────────────────────────────
    RunTransparentPixel,
    RunStillToVideo,
    RunMix,

    // ── Region editor ────────────────────────────────────────────────────
    /// A fresh drag on the waveform created a region covering this range.
    SetRegion { start: f64, end: f64 },
    /// Custom start handle moved. The widget already clamped the value for
    /// display; the processor clamps again, so order never matters.
    SetRegionStart(f64),
    /// Custom end handle moved, same clamping rules.
    SetRegionEnd(f64),
    SetFadeIn(f64),
    SetFadeOut(f64),
    /// Waveform magnification; 0 = fit to width. Session-sticky.
    SetZoom(f32),
    /// Audition the first seconds of the selection.
    PreviewStart,
    /// Audition the last seconds of the selection.
    PreviewEnd,
    /// Stop any audition currently playing.
    StopPreview,

    // ── Results ──────────────────────────────────────────────────────────
    /// Open a save dialog for the tool's finished output.
    SaveResult(ToolId),
    /// Close the blocking failure alert for the tool.
    DismissError(ToolId),
}
