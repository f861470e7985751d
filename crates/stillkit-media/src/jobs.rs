// crates/stillkit-media/src/jobs.rs
//
// One function per transcode job. Each stages its inputs into a private
// scratch directory, runs the engine there with the tool's argument list,
// and reads the finished MP4 back into memory. The scratch directory and
// everything in it disappear when the TempDir drops.

use crate::engine::Engine;
use crate::error::{MediaError, Result};
use crossbeam_channel::Sender;
use std::path::Path;
use stillkit_core::engine_args;
use stillkit_core::events::MediaEvent;
use stillkit_core::helpers::size::STILL_VIDEO_MAX_BYTES;
use stillkit_core::selection::AudioSelection;
use uuid::Uuid;

const STAGED_IMAGE: &str = "input.png";
const STAGED_AUDIO: &str = "input.mp3";
const OUTPUT_NAME: &str = "output.mp4";

/// Still image to a fixed-length silent clip. Fails with
/// [`MediaError::OutputTooLarge`] when the result exceeds the upload cap.
pub fn run_still_video(
    engine: &Engine,
    image: &Path,
    job: Uuid,
    tx: &Sender<MediaEvent>,
) -> Result<Vec<u8>> {
    let dir = scratch_dir()?;
    std::fs::copy(image, dir.path().join(STAGED_IMAGE))?;

    let args = engine_args::still_video_args(STAGED_IMAGE, OUTPUT_NAME);
    engine.exec(dir.path(), &args, engine_args::STILL_CLIP_SECONDS, job, tx)?;

    let bytes = std::fs::read(dir.path().join(OUTPUT_NAME))?;
    if bytes.len() as u64 > STILL_VIDEO_MAX_BYTES {
        return Err(MediaError::OutputTooLarge { size_bytes: bytes.len() as u64 });
    }
    Ok(bytes)
}

/// Still image plus trimmed and faded audio, muxed into one MP4.
pub fn run_mix(
    engine: &Engine,
    image: &Path,
    audio: &Path,
    selection: AudioSelection,
    job: Uuid,
    tx: &Sender<MediaEvent>,
) -> Result<Vec<u8>> {
    let dir = scratch_dir()?;
    std::fs::copy(image, dir.path().join(STAGED_IMAGE))?;
    std::fs::copy(audio, dir.path().join(STAGED_AUDIO))?;

    let args = engine_args::mix_args(STAGED_IMAGE, STAGED_AUDIO, &selection, OUTPUT_NAME);
    engine.exec(dir.path(), &args, selection.trim_duration(), job, tx)?;

    Ok(std::fs::read(dir.path().join(OUTPUT_NAME))?)
}

fn scratch_dir() -> Result<tempfile::TempDir> {
    Ok(tempfile::Builder::new().prefix("stillkit-job-").tempdir()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_names_match_the_argument_builders() {
        let args = engine_args::still_video_args(STAGED_IMAGE, OUTPUT_NAME);
        assert!(args.contains(&STAGED_IMAGE.to_string()));
        assert_eq!(args.last().map(String::as_str), Some(OUTPUT_NAME));
    }

    #[test]
    fn scratch_dirs_are_private_per_job() {
        let a = scratch_dir().unwrap();
        let b = scratch_dir().unwrap();
        assert_ne!(a.path(), b.path());
        assert!(a
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("stillkit-job-")));
    }
}
