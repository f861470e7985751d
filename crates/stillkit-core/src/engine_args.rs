// crates/stillkit-core/src/engine_args.rs
//
// Argument lists for the two engine-backed jobs. The engine receives these
// verbatim (plus the I/O bookkeeping flags the runner adds); everything about
// the output format lives here, nothing about processes or files.

use crate::filter::audio_filter_chain;
use crate::selection::AudioSelection;

/// Fit inside 2048×2048 without upscaling distortion, then pad both axes to
/// even numbers — libx264 with yuv420p rejects odd dimensions.
pub const SCALE_PAD_FILTER: &str =
    "scale=2048:2048:force_original_aspect_ratio=decrease,pad=ceil(iw/2)*2:ceil(ih/2)*2";

/// Length of the silent clip produced by the image→video tool.
pub const STILL_CLIP_SECONDS: f64 = 2.0;

/// Arguments for the image→silent-video conversion. `image` and `output` are
/// names inside the job's scratch directory.
pub fn still_video_args(image: &str, output: &str) -> Vec<String> {
    let args: Vec<&str> = vec![
        "-loop", "1",
        "-i", image,
        "-c:v", "libx264",
        "-t", "2",
        "-pix_fmt", "yuv420p",
        "-vf", SCALE_PAD_FILTER,
        "-r", "30",
        "-movflags", "+faststart",
        output,
    ];
    args.into_iter().map(str::to_string).collect()
}

/// Arguments for the image+audio mix. The audio stream is trimmed and faded
/// by the selection's filter chain; the video track is the still image looped
/// at 10 fps for the trimmed duration.
pub fn mix_args(image: &str, audio: &str, sel: &AudioSelection, output: &str) -> Vec<String> {
    let trim_duration = sel.trim_duration().to_string();
    let af = audio_filter_chain(sel);
    let args: Vec<&str> = vec![
        "-loop", "1",
        "-r", "10",
        "-i", image,
        "-i", audio,
        "-c:v", "libx264",
        "-preset", "ultrafast",
        "-tune", "stillimage",
        "-c:a", "aac",
        "-b:a", "192k",
        "-t", &trim_duration,
        "-pix_fmt", "yuv420p",
        "-vf", SCALE_PAD_FILTER,
        "-af", &af,
        "-shortest",
        "-threads", "0",
        "-movflags", "+faststart",
        output,
    ];
    args.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_video_is_two_seconds_at_thirty_fps() {
        let args = still_video_args("input.png", "output.mp4");
        assert_eq!(args.first().map(String::as_str), Some("-loop"));
        assert_eq!(args.last().map(String::as_str), Some("output.mp4"));

        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "2");
        let r = args.iter().position(|a| a == "-r").unwrap();
        assert_eq!(args[r + 1], "30");
        assert!(args.contains(&SCALE_PAD_FILTER.to_string()));
        assert!(args.contains(&"+faststart".to_string()));
    }

    #[test]
    fn mix_trims_output_to_the_selection() {
        let mut sel = AudioSelection::full(10.0);
        sel.set_region(2.0, 8.0);
        let args = mix_args("input.png", "input.mp3", &sel, "output.mp4");

        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "6");

        let af = args.iter().position(|a| a == "-af").unwrap();
        assert_eq!(args[af + 1], audio_filter_chain(&sel));
    }

    #[test]
    fn mix_keeps_both_inputs_in_order() {
        let sel = AudioSelection::full(4.0);
        let args = mix_args("input.png", "input.mp3", &sel, "output.mp4");
        let png = args.iter().position(|a| a == "input.png").unwrap();
        let mp3 = args.iter().position(|a| a == "input.mp3").unwrap();
        assert!(png < mp3);
        assert_eq!(args[png - 1], "-i");
        assert_eq!(args[mp3 - 1], "-i");
        assert!(args.contains(&"-shortest".to_string()));
        assert!(args.contains(&"stillimage".to_string()));
    }
}
