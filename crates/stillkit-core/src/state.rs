// crates/stillkit-core/src/state.rs
//
// Session state for one app run. Nothing here is persisted — selections,
// picked files, and job results all die with the session (cosmetic prefs are
// stored separately by the UI crate). Mutation happens only in the command
// processor; modules read this and emit commands.

use crate::selection::AudioSelection;
use crate::tools::ToolId;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Tool(ToolId),
}

/// Upper bound of the waveform zoom slider, in px/sec.
pub const MAX_ZOOM: f32 = 500.0;

/// Engine lifecycle. `Failed` is terminal — there is no retry, and the UI
/// presents it as the loading state with the detail in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineStatus {
    Loading,
    Ready { version: String },
    Failed,
}

impl EngineStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, EngineStatus::Ready { .. })
    }
}

/// A file chosen through a picker dialog.
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub path:       PathBuf,
    pub name:       String,
    pub size_bytes: u64,
}

impl PickedFile {
    pub fn new(path: PathBuf, size_bytes: u64) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Self { path, name, size_bytes }
    }
}

/// Finished job output, held in memory until saved or replaced.
#[derive(Debug, Clone)]
pub struct JobOutput {
    pub bytes:          Vec<u8>,
    pub suggested_name: String,
}

impl JobOutput {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Decoded waveform for the mixer's loaded audio.
#[derive(Debug, Clone)]
pub struct WaveformData {
    pub peaks:       Vec<f32>,
    pub duration:    f64,
    pub sample_rate: u32,
}

// ── Per-tool state ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct AlphaToolState {
    pub source: Option<PickedFile>,
    pub job:    Option<Uuid>,
    pub result: Option<JobOutput>,
    pub error:  Option<String>,
}

#[derive(Default)]
pub struct StillToolState {
    pub source:   Option<PickedFile>,
    pub job:      Option<Uuid>,
    pub progress: u8,
    pub result:   Option<JobOutput>,
    pub error:    Option<String>,
    /// Non-fatal abort message (output over the size cap). Shown inline, not
    /// as a blocking alert, and never accompanied by a result.
    pub notice:   Option<String>,
}

#[derive(Default)]
pub struct MixerToolState {
    pub image:     Option<PickedFile>,
    pub audio:     Option<PickedFile>,
    /// Analysis job for the current audio file, if still decoding.
    pub load_job:  Option<Uuid>,
    pub waveform:  Option<WaveformData>,
    pub selection: Option<AudioSelection>,
    pub job:       Option<Uuid>,
    pub progress:  u8,
    pub result:    Option<JobOutput>,
    pub error:     Option<String>,
}

impl MixerToolState {
    /// Swap in a new audio file: the old waveform, selection, and result all
    /// belong to the replaced asset and are discarded. `load_job` tracks the
    /// analysis so a stale result from the previous file is ignored.
    pub fn replace_audio(&mut self, file: PickedFile, load_job: Uuid) {
        self.audio     = Some(file);
        self.load_job  = Some(load_job);
        self.waveform  = None;
        self.selection = None;
        self.result    = None;
    }

    /// Analysis finished: keep the waveform and create the one selection for
    /// this asset, spanning the full duration. Fades start from the caller's
    /// sticky defaults.
    pub fn finish_audio_load(&mut self, data: WaveformData, fade_in: f64, fade_out: f64) {
        let mut sel = AudioSelection::full(data.duration);
        sel.fade_in_seconds  = fade_in;
        sel.fade_out_seconds = fade_out;
        self.waveform  = Some(data);
        self.selection = Some(sel);
        self.load_job  = None;
    }
}

// ── Session ──────────────────────────────────────────────────────────────────

pub struct SessionState {
    pub screen: Screen,
    pub engine: EngineStatus,
    /// Waveform magnification in px/sec; 0 = fit to container. Sticky for the
    /// whole session and re-applied after every audio load.
    pub zoom:   f32,
    /// Last fade values the user set; freshly loaded selections start from
    /// these rather than zero.
    pub sticky_fade_in:  f64,
    pub sticky_fade_out: f64,
    pub alpha:  AlphaToolState,
    pub still:  StillToolState,
    pub mixer:  MixerToolState,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            screen: Screen::Home,
            engine: EngineStatus::Loading,
            zoom:   0.0,
            sticky_fade_in:  0.0,
            sticky_fade_out: 0.0,
            alpha:  AlphaToolState::default(),
            still:  StillToolState::default(),
            mixer:  MixerToolState::default(),
        }
    }
}

impl SessionState {
    /// At most one engine transcode runs at a time; convert actions disable
    /// while this is true.
    pub fn transcode_in_flight(&self) -> bool {
        self.still.job.is_some() || self.mixer.job.is_some()
    }
}

/// Fold an incoming raw percentage into the shown progress: out-of-range
/// values are ignored, in-range values can only move the bar forward.
pub fn apply_progress(current: u8, incoming: i32) -> u8 {
    if (0..=100).contains(&incoming) {
        current.max(incoming as u8)
    } else {
        current
    }
}

// ── Output naming ────────────────────────────────────────────────────────────

/// `photo.jpeg` → `processed_photo.png`. The extension is always rewritten —
/// the output really is a PNG no matter what came in.
pub fn processed_png_name(input_name: &str) -> String {
    let renamed = Path::new(input_name).with_extension("png");
    format!("processed_{}", renamed.to_string_lossy())
}

/// `photo.png` → `converted_photo.mp4` (stem is everything before the first
/// dot; falls back to "video" for dotfiles and empty names).
pub fn converted_video_name(input_name: &str) -> String {
    let stem = input_name.split('.').next().filter(|s| !s.is_empty());
    format!("converted_{}.mp4", stem.unwrap_or("video"))
}

/// Mixer outputs are named by wall-clock millis so repeated exports never
/// collide in the save dialog.
pub fn mixer_output_name(unix_millis: u128) -> String {
    format!("image_audio_mixer_{unix_millis}.mp4")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_never_moves_backwards() {
        let mut pct = 0u8;
        for raw in [10, 40, 35, 90, 80, 100] {
            pct = apply_progress(pct, raw);
        }
        assert_eq!(pct, 100);
    }

    #[test]
    fn out_of_range_progress_is_ignored() {
        assert_eq!(apply_progress(42, -5), 42);
        assert_eq!(apply_progress(42, 101), 42);
        assert_eq!(apply_progress(42, 100), 100);
    }

    #[test]
    fn replacing_audio_discards_the_old_session() {
        let mut mixer = MixerToolState::default();
        let job = Uuid::new_v4();
        mixer.replace_audio(PickedFile::new("a.mp3".into(), 10), job);
        mixer.finish_audio_load(
            WaveformData { peaks: vec![0.5; 1000], duration: 30.0, sample_rate: 44_100 },
            0.0,
            0.0,
        );
        assert!(mixer.selection.is_some());

        let job2 = Uuid::new_v4();
        mixer.replace_audio(PickedFile::new("b.wav".into(), 10), job2);
        assert!(mixer.waveform.is_none());
        assert!(mixer.selection.is_none());
        assert_eq!(mixer.load_job, Some(job2));
    }

    #[test]
    fn loaded_selection_spans_the_full_asset() {
        let mut mixer = MixerToolState::default();
        mixer.replace_audio(PickedFile::new("a.mp3".into(), 10), Uuid::new_v4());
        mixer.finish_audio_load(
            WaveformData { peaks: vec![], duration: 12.5, sample_rate: 48_000 },
            1.0,
            2.0,
        );
        let sel = mixer.selection.unwrap();
        assert_eq!(sel.start_seconds, 0.0);
        assert_eq!(sel.end_seconds, 12.5);
        assert_eq!(sel.fade_in_seconds, 1.0);
        assert_eq!(sel.fade_out_seconds, 2.0);
    }

    #[test]
    fn output_names_follow_the_tool_conventions() {
        assert_eq!(processed_png_name("photo.jpeg"), "processed_photo.png");
        assert_eq!(processed_png_name("no_ext"), "processed_no_ext.png");
        assert_eq!(converted_video_name("cover.art.png"), "converted_cover.mp4");
        assert_eq!(converted_video_name(""), "converted_video.mp4");
        assert_eq!(
            mixer_output_name(1_700_000_000_000),
            "image_audio_mixer_1700000000000.mp4"
        );
    }
}
