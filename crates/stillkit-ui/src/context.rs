// crates/stillkit-ui/src/context.rs
//
// AppContext owns the runtime handles that are NOT part of SessionState:
//
//   AppContext
//     ├── worker   — the background media worker + its event channel
//     └── playback — rodio preview playback (stream + at most one sink)
//
// StillKitApp holds one of these plus a SessionState and the tool panels —
// nothing else. All MediaEvent traffic is folded into state here, in one
// place, so panels only ever read state and emit commands.

use eframe::egui;
use rodio::{Decoder, OutputStream, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use stillkit_core::events::MediaEvent;
use stillkit_core::helpers::size::{format_bytes, STILL_VIDEO_MAX_BYTES};
use stillkit_core::state::{
    self, EngineStatus, JobOutput, SessionState, WaveformData,
};
use stillkit_media::MediaWorker;

/// Shown verbatim in the blocking alert for any failed job. Details go to
/// the log only; the alert never echoes engine output.
pub const GENERIC_JOB_ERROR: &str =
    "The operation failed. Nothing was saved — please try again.";

/// Alert text when a picked audio file cannot be decoded.
pub const AUDIO_LOAD_ERROR: &str =
    "That audio file could not be read. Pick a different file.";

pub struct AppContext {
    pub worker:   MediaWorker,
    pub playback: PreviewPlayback,
}

impl AppContext {
    pub fn new(worker: MediaWorker) -> Self {
        Self {
            worker,
            playback: PreviewPlayback::new(),
        }
    }

    /// Drain the worker event channel into `SessionState`. Called once per
    /// frame, before panels are drawn.
    pub fn ingest_media_events(&mut self, state: &mut SessionState, ctx: &egui::Context) {
        while let Ok(event) = self.worker.rx.try_recv() {
            apply_media_event(state, event, ctx);
        }
    }
}

/// Fold one worker event into `SessionState`.
///
/// Every result is guarded against staleness: a job id that no longer
/// matches the tool's in-flight id (the user navigated away, or picked a
/// new file mid-load) is dropped without touching state.
fn apply_media_event(state: &mut SessionState, event: MediaEvent, ctx: &egui::Context) {
    match event {
        MediaEvent::EngineReady { version } => {
            tracing::info!("[engine] ready: {version}");
            state.engine = EngineStatus::Ready { version };
            ctx.request_repaint();
        }

        // Terminal. The UI keeps showing the loading chip; only the
        // log records what actually happened.
        MediaEvent::EngineFailed { error } => {
            tracing::error!("[engine] unavailable: {error}");
            state.engine = EngineStatus::Failed;
            ctx.request_repaint();
        }

        MediaEvent::AudioLoaded { job, peaks, duration, sample_rate } => {
            if state.mixer.load_job == Some(job) {
                let data = WaveformData { peaks, duration, sample_rate };
                state.mixer.finish_audio_load(
                    data,
                    state.sticky_fade_in,
                    state.sticky_fade_out,
                );
                ctx.request_repaint();
            }
        }

        MediaEvent::AudioFailed { job, error } => {
            tracing::warn!("[audio] load failed: {error}");
            if state.mixer.load_job == Some(job) {
                state.mixer.load_job = None;
                state.mixer.audio    = None;
                state.mixer.error    = Some(AUDIO_LOAD_ERROR.to_string());
                ctx.request_repaint();
            }
        }

        MediaEvent::JobProgress { job, percent } => {
            if state.still.job == Some(job) {
                state.still.progress =
                    state::apply_progress(state.still.progress, percent);
                ctx.request_repaint();
            } else if state.mixer.job == Some(job) {
                state.mixer.progress =
                    state::apply_progress(state.mixer.progress, percent);
                ctx.request_repaint();
            }
        }

        MediaEvent::JobLog { job, line } => {
            tracing::debug!("[engine {job}] {line}");
        }

        MediaEvent::JobDone { job, bytes } => {
            finish_job(state, job, bytes);
            ctx.request_repaint();
        }

        MediaEvent::JobOversized { job, size_bytes } => {
            if state.still.job == Some(job) {
                state.still.job      = None;
                state.still.progress = 0;
                state.still.result   = None;
                state.still.notice   = Some(format!(
                    "Output came to {} — over the {} limit. Try a smaller image.",
                    format_bytes(size_bytes),
                    format_bytes(STILL_VIDEO_MAX_BYTES),
                ));
                ctx.request_repaint();
            }
        }

        MediaEvent::JobFailed { job, error } => {
            tracing::warn!("[job {job}] failed: {error}");
            if state.alpha.job == Some(job) {
                state.alpha.job   = None;
                state.alpha.error = Some(GENERIC_JOB_ERROR.to_string());
            } else if state.still.job == Some(job) {
                state.still.job      = None;
                state.still.progress = 0;
                state.still.error    = Some(GENERIC_JOB_ERROR.to_string());
            } else if state.mixer.job == Some(job) {
                state.mixer.job      = None;
                state.mixer.progress = 0;
                state.mixer.error    = Some(GENERIC_JOB_ERROR.to_string());
            }
            ctx.request_repaint();
        }
    }
}

/// Route finished output bytes to whichever tool owns the job and attach
/// the save-dialog name, which depends on the tool's input file name.
fn finish_job(state: &mut SessionState, job: uuid::Uuid, bytes: Vec<u8>) {
    if state.alpha.job == Some(job) {
        let name = state.alpha.source.as_ref()
            .map(|f| state::processed_png_name(&f.name))
            .unwrap_or_else(|| "processed_image.png".to_string());
        state.alpha.job    = None;
        state.alpha.result = Some(JobOutput { bytes, suggested_name: name });
    } else if state.still.job == Some(job) {
        let name = state.still.source.as_ref()
            .map(|f| state::converted_video_name(&f.name))
            .unwrap_or_else(|| "converted_video.mp4".to_string());
        state.still.job      = None;
        state.still.progress = 100;
        state.still.result   = Some(JobOutput { bytes, suggested_name: name });
    } else if state.mixer.job == Some(job) {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        state.mixer.job      = None;
        state.mixer.progress = 100;
        state.mixer.result   = Some(JobOutput {
            bytes,
            suggested_name: state::mixer_output_name(millis),
        });
    }
}

// ── Preview playback ─────────────────────────────────────────────────────────

/// Short rodio-backed audition of a selection edge. At most one sink exists
/// at a time; starting a preview replaces any running one.
pub struct PreviewPlayback {
    // OutputStream must outlive the sink — dropping it stops all audio.
    stream:  Option<OutputStream>,
    sink:    Option<Sink>,
    stop_at: Option<Instant>,
}

impl PreviewPlayback {
    fn new() -> Self {
        Self { stream: None, sink: None, stop_at: None }
    }

    /// Play `path` from `start` until `end` (both in seconds).
    ///
    /// Device failures are logged and swallowed — a preview that stays silent
    /// is annoying, not fatal, and the selection itself is unaffected.
    pub fn play(&mut self, path: &Path, start: f64, end: f64) {
        self.stop();

        // Lazy init: the output device is opened on first use, once the event
        // loop is live, not at app construction.
        if self.stream.is_none() {
            match rodio::OutputStreamBuilder::open_default_stream() {
                Ok(stream) => self.stream = Some(stream),
                Err(err) => {
                    tracing::warn!("[preview] audio device unavailable: {err}");
                    return;
                }
            }
        }
        let Some(stream) = &self.stream else { return };

        let file = match File::open(path) {
            Ok(f) => f,
            Err(err) => {
                tracing::warn!("[preview] open failed for {}: {err}", path.display());
                return;
            }
        };
        let decoder = match Decoder::new(BufReader::new(file)) {
            Ok(d) => d,
            Err(err) => {
                tracing::warn!("[preview] decode failed: {err}");
                return;
            }
        };

        let sink = Sink::connect_new(&stream.mixer());
        sink.append(decoder);
        // Seek failures (some formats can't) degrade to playing from zero.
        let _ = sink.try_seek(Duration::from_secs_f64(start));
        sink.play();

        self.sink    = Some(sink);
        self.stop_at = Some(Instant::now() + Duration::from_secs_f64((end - start).max(0.0)));
    }

    /// Stop the sink once its window has elapsed. Called every frame.
    pub fn tick(&mut self) {
        if let Some(deadline) = self.stop_at {
            if Instant::now() >= deadline {
                self.stop();
            }
        }
    }

    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.stop_at = None;
    }

    pub fn is_playing(&self) -> bool {
        self.sink.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn oversized_still_output_leaves_a_notice_and_nothing_to_save() {
        let ctx = egui::Context::default();
        let mut state = SessionState::default();
        let job = Uuid::new_v4();
        state.still.job      = Some(job);
        state.still.progress = 80;

        apply_media_event(
            &mut state,
            MediaEvent::JobOversized { job, size_bytes: 16 * 1024 * 1024 },
            &ctx,
        );

        let notice = state.still.notice.as_deref().expect("cap message missing");
        assert!(notice.contains("16.0 MB"));
        assert!(notice.contains("15.0 MB"));
        assert!(state.still.result.is_none());
        assert!(state.still.job.is_none());
        assert_eq!(state.still.progress, 0);
    }

    #[test]
    fn oversized_event_for_a_stale_job_changes_nothing() {
        let ctx = egui::Context::default();
        let mut state = SessionState::default();
        state.still.job = Some(Uuid::new_v4());

        apply_media_event(
            &mut state,
            MediaEvent::JobOversized { job: Uuid::new_v4(), size_bytes: 99 },
            &ctx,
        );

        assert!(state.still.notice.is_none());
        assert!(state.still.job.is_some());
    }

    #[test]
    fn failed_job_resets_in_flight_state_for_a_retry() {
        let ctx = egui::Context::default();
        let mut state = SessionState::default();
        let job = Uuid::new_v4();
        state.mixer.job      = Some(job);
        state.mixer.progress = 55;

        apply_media_event(
            &mut state,
            MediaEvent::JobFailed { job, error: "boom".into() },
            &ctx,
        );

        assert_eq!(state.mixer.error.as_deref(), Some(GENERIC_JOB_ERROR));
        assert!(state.mixer.job.is_none());
        assert_eq!(state.mixer.progress, 0);
        assert!(!state.transcode_in_flight());
    }

    #[test]
    fn finished_still_job_carries_the_converted_name() {
        let ctx = egui::Context::default();
        let mut state = SessionState::default();
        let job = Uuid::new_v4();
        state.still.job = Some(job);
        state.still.source =
            Some(state::PickedFile::new("poster.png".into(), 123));

        apply_media_event(
            &mut state,
            MediaEvent::JobDone { job, bytes: vec![1, 2, 3] },
            &ctx,
        );

        let out = state.still.result.expect("result missing");
        assert_eq!(out.suggested_name, "converted_poster.mp4");
        assert_eq!(out.bytes, vec![1, 2, 3]);
        assert_eq!(state.still.progress, 100);
    }
}
