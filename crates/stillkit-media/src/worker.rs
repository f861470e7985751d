// crates/stillkit-media/src/worker.rs
//
// MediaWorker: owns the engine handle and the one event channel back to the
// UI. All public API that stillkit-ui calls lives here. Every call spawns a
// short-lived thread and reports through `rx`; nothing blocks the caller.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::RwLock;
use uuid::Uuid;

use stillkit_core::events::MediaEvent;
use stillkit_core::selection::AudioSelection;

use crate::alpha::process_image;
use crate::analysis;
use crate::engine::Engine;
use crate::error::MediaError;
use crate::jobs::{run_mix, run_still_video};

pub struct MediaWorker {
    /// Shared event channel: engine status, analysis results, job progress
    /// and outcomes. Created once here; the UI drains it every frame.
    pub rx: Receiver<MediaEvent>,
    tx:     Sender<MediaEvent>,

    /// Resolved engine, written once by the startup probe thread. `None`
    /// until the probe finishes (or forever, if it fails).
    engine: Arc<RwLock<Option<Engine>>>,
}

impl MediaWorker {
    pub fn new() -> Self {
        let (tx, rx) = bounded(512);
        let engine: Arc<RwLock<Option<Engine>>> = Arc::new(RwLock::new(None));

        // ── Engine probe ──────────────────────────────────────────────────────
        // Runs once at startup. Failure is terminal for the session: the UI
        // keeps showing its loading state and every transcode surface stays
        // disabled.
        {
            let tx     = tx.clone();
            let engine = Arc::clone(&engine);
            thread::spawn(move || match Engine::resolve() {
                Ok(found) => {
                    let version = found.version.clone();
                    *engine.write() = Some(found);
                    let _ = tx.send(MediaEvent::EngineReady { version });
                }
                Err(e) => {
                    tracing::error!("[media] engine probe failed: {e}");
                    let _ = tx.send(MediaEvent::EngineFailed { error: e.to_string() });
                }
            });
        }

        Self { rx, tx, engine }
    }

    /// Decode and bin the audio file for the mixer's waveform.
    pub fn load_audio(&self, path: PathBuf) -> Uuid {
        let job = Uuid::new_v4();
        let tx  = self.tx.clone();
        thread::spawn(move || match analysis::load_audio(&path) {
            Ok(data) => {
                let _ = tx.send(MediaEvent::AudioLoaded {
                    job,
                    peaks:       data.peaks,
                    duration:    data.duration,
                    sample_rate: data.sample_rate,
                });
            }
            Err(e) => {
                tracing::warn!("[media] audio analysis failed: {e}");
                let _ = tx.send(MediaEvent::AudioFailed { job, error: e.to_string() });
            }
        });
        job
    }

    /// Re-encode the image as a PNG with the corner pixel made transparent.
    /// Pure Rust — runs even when the engine is unavailable.
    pub fn start_alpha(&self, path: PathBuf) -> Uuid {
        let job = Uuid::new_v4();
        let tx  = self.tx.clone();
        thread::spawn(move || match process_image(&path) {
            Ok(bytes) => {
                let _ = tx.send(MediaEvent::JobDone { job, bytes });
            }
            Err(e) => {
                tracing::warn!("[media] transparent-pixel job failed: {e}");
                let _ = tx.send(MediaEvent::JobFailed { job, error: e.to_string() });
            }
        });
        job
    }

    /// Transcode the image into a short silent video clip.
    pub fn start_still_video(&self, image: PathBuf) -> Uuid {
        let job    = Uuid::new_v4();
        let tx     = self.tx.clone();
        let engine = Arc::clone(&self.engine);
        thread::spawn(move || {
            let guard = engine.read();
            let Some(engine) = guard.as_ref() else {
                let _ = tx.send(MediaEvent::JobFailed {
                    job,
                    error: "engine not available".into(),
                });
                return;
            };
            match run_still_video(engine, &image, job, &tx) {
                Ok(bytes) => {
                    let _ = tx.send(MediaEvent::JobDone { job, bytes });
                }
                Err(MediaError::OutputTooLarge { size_bytes }) => {
                    let _ = tx.send(MediaEvent::JobOversized { job, size_bytes });
                }
                Err(e) => {
                    tracing::warn!("[media] still-video job failed: {e}");
                    let _ = tx.send(MediaEvent::JobFailed { job, error: e.to_string() });
                }
            }
        });
        job
    }

    /// Mux the image with the selected slice of the audio into one video.
    pub fn start_mix(&self, image: PathBuf, audio: PathBuf, selection: AudioSelection) -> Uuid {
        let job    = Uuid::new_v4();
        let tx     = self.tx.clone();
        let engine = Arc::clone(&self.engine);
        thread::spawn(move || {
            let guard = engine.read();
            let Some(engine) = guard.as_ref() else {
                let _ = tx.send(MediaEvent::JobFailed {
                    job,
                    error: "engine not available".into(),
                });
                return;
            };
            match run_mix(engine, &image, &audio, selection, job, &tx) {
                Ok(bytes) => {
                    let _ = tx.send(MediaEvent::JobDone { job, bytes });
                }
                Err(e) => {
                    tracing::warn!("[media] mix job failed: {e}");
                    let _ = tx.send(MediaEvent::JobFailed { job, error: e.to_string() });
                }
            }
        });
        job
    }
}

impl Default for MediaWorker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    // Engine status events from the startup probe interleave with job events;
    // tests skip them and wait for the event belonging to their job.
    fn wait_for_job(worker: &MediaWorker, job: Uuid) -> MediaEvent {
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        loop {
            let remaining = deadline
                .checked_duration_since(std::time::Instant::now())
                .expect("timed out waiting for job event");
            match worker.rx.recv_timeout(remaining).expect("worker channel closed") {
                MediaEvent::EngineReady { .. } | MediaEvent::EngineFailed { .. } => continue,
                e @ (MediaEvent::AudioLoaded { job: j, .. }
                | MediaEvent::AudioFailed { job: j, .. }
                | MediaEvent::JobProgress { job: j, .. }
                | MediaEvent::JobLog { job: j, .. }
                | MediaEvent::JobDone { job: j, .. }
                | MediaEvent::JobOversized { job: j, .. }
                | MediaEvent::JobFailed { job: j, .. }) => {
                    if j == job {
                        return e;
                    }
                }
            }
        }
    }

    fn write_wav(path: &std::path::Path, seconds: f64, rate: u32) {
        let count = (seconds * rate as f64) as usize;
        let data_len = (count * 2) as u32;
        let mut f = std::fs::File::create(path).unwrap();
        f.write_all(b"RIFF").unwrap();
        f.write_all(&(36 + data_len).to_le_bytes()).unwrap();
        f.write_all(b"WAVEfmt ").unwrap();
        f.write_all(&16u32.to_le_bytes()).unwrap();
        f.write_all(&1u16.to_le_bytes()).unwrap();
        f.write_all(&1u16.to_le_bytes()).unwrap();
        f.write_all(&rate.to_le_bytes()).unwrap();
        f.write_all(&(rate * 2).to_le_bytes()).unwrap();
        f.write_all(&2u16.to_le_bytes()).unwrap();
        f.write_all(&16u16.to_le_bytes()).unwrap();
        f.write_all(b"data").unwrap();
        f.write_all(&data_len.to_le_bytes()).unwrap();
        for i in 0..count {
            let s = if (i / 25) % 2 == 0 { 9000i16 } else { -9000 };
            f.write_all(&s.to_le_bytes()).unwrap();
        }
    }

    #[test]
    fn audio_load_reports_waveform_over_the_channel() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("clip.wav");
        write_wav(&wav, 1.0, 8000);

        let worker = MediaWorker::new();
        let job = worker.load_audio(wav);
        match wait_for_job(&worker, job) {
            MediaEvent::AudioLoaded { duration, sample_rate, peaks, .. } => {
                assert_eq!(sample_rate, 8000);
                assert!((duration - 1.0).abs() < 1e-6);
                assert!(!peaks.is_empty());
            }
            other => panic!("unexpected event: {:?}", event_name(&other)),
        }
    }

    #[test]
    fn missing_audio_file_reports_failure_not_panic() {
        let worker = MediaWorker::new();
        let job = worker.load_audio(PathBuf::from("/nonexistent/clip.mp3"));
        match wait_for_job(&worker, job) {
            MediaEvent::AudioFailed { error, .. } => assert!(!error.is_empty()),
            other => panic!("unexpected event: {:?}", event_name(&other)),
        }
    }

    #[test]
    fn alpha_job_round_trips_through_the_channel() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("pic.png");
        let img = image::ImageBuffer::from_pixel(2, 2, image::Rgba([9u8, 8, 7, 255]));
        img.save(&png).unwrap();

        let worker = MediaWorker::new();
        let job = worker.start_alpha(png);
        match wait_for_job(&worker, job) {
            MediaEvent::JobDone { bytes, .. } => {
                let out = image::load_from_memory(&bytes).unwrap().to_rgba8();
                assert_eq!(out.get_pixel(0, 0).0[3], crate::alpha::TRANSPARENT_ALPHA);
            }
            other => panic!("unexpected event: {:?}", event_name(&other)),
        }
    }

    fn event_name(e: &MediaEvent) -> &'static str {
        match e {
            MediaEvent::EngineReady { .. } => "EngineReady",
            MediaEvent::EngineFailed { .. } => "EngineFailed",
            MediaEvent::AudioLoaded { .. } => "AudioLoaded",
            MediaEvent::AudioFailed { .. } => "AudioFailed",
            MediaEvent::JobProgress { .. } => "JobProgress",
            MediaEvent::JobLog { .. } => "JobLog",
            MediaEvent::JobDone { .. } => "JobDone",
            MediaEvent::JobOversized { .. } => "JobOversized",
            MediaEvent::JobFailed { .. } => "JobFailed",
        }
    }
}
