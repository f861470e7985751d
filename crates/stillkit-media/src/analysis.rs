// crates/stillkit-media/src/analysis.rs
//
// Audio analysis for the mixer's waveform: decode the picked file to mono
// f32, measure its duration, and reduce it to fixed-width peak columns.
// Decoding is pure Rust (symphonia) — the engine binary is only for
// transcodes, never for display.

use crate::error::{MediaError, Result};
use rayon::prelude::*;
use std::fs::File;
use std::path::Path;
use stillkit_core::state::WaveformData;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};

/// Peak-column count for the waveform trace. One column per horizontal
/// sample; the widget stretches or shrinks this to its pixel width.
pub const WAVEFORM_COLUMNS: usize = 1000;

/// Decode, measure, and bin the file at `path`.
pub fn load_audio(path: &Path) -> Result<WaveformData> {
    let (samples, sample_rate) = decode_mono(path)?;
    if samples.is_empty() {
        return Err(MediaError::UnsupportedAudio(format!(
            "no decodable samples in {}",
            path.display()
        )));
    }
    let duration = samples.len() as f64 / sample_rate as f64;
    let peaks = peak_columns(&samples, WAVEFORM_COLUMNS);
    tracing::debug!(
        "[analysis] {}: {:.2}s at {} Hz, {} peak columns",
        path.display(),
        duration,
        sample_rate,
        peaks.len()
    );
    Ok(WaveformData { peaks, duration, sample_rate })
}

/// Decode the whole file to mono by averaging channels per frame.
pub fn decode_mono(path: &Path) -> Result<(Vec<f32>, u32)> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        hint.with_extension(ext);
    }

    let probed = get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| MediaError::UnsupportedAudio(format!("no audio track in {}", path.display())))?
        .clone();
    let mut decoder = get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut mono: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            // A reader that can't parse the stream any further may not have
            // advanced, so retrying would spin. Keep what decoded so far.
            Err(SymphoniaError::DecodeError(_)) => break,
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };
        if packet.track_id() != track.id {
            continue;
        }
        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(e.into()),
        };
        if sample_rate == 0 {
            sample_rate = decoded.spec().rate;
        }
        let channels = decoded.spec().channels.count().max(1);
        let buf = sample_buf.get_or_insert_with(|| {
            SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec())
        });
        buf.copy_interleaved_ref(decoded);
        for frame in buf.samples().chunks(channels) {
            let sum: f32 = frame.iter().sum();
            mono.push(sum / channels as f32);
        }
    }

    if sample_rate == 0 {
        return Err(MediaError::UnsupportedAudio(format!(
            "unknown sample rate in {}",
            path.display()
        )));
    }
    Ok((mono, sample_rate))
}

/// Reduce samples to at most ~`columns` absolute-maximum peaks. Columns come
/// out in [0, 1] for any input already in [-1, 1].
pub fn peak_columns(samples: &[f32], columns: usize) -> Vec<f32> {
    if samples.is_empty() || columns == 0 {
        return Vec::new();
    }
    let block = (samples.len() / columns).max(1);
    samples
        .par_chunks(block)
        .map(|chunk| chunk.iter().fold(0f32, |m, &s| m.max(s.abs().min(1.0))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn peaks_capture_the_loudest_sample_per_block() {
        let mut samples = vec![0.1f32; 400];
        samples[150] = -0.9; // negative peak still counts via abs
        samples[350] = 0.6;
        let peaks = peak_columns(&samples, 4);
        assert_eq!(peaks.len(), 4);
        assert_eq!(peaks[0], 0.1);
        assert_eq!(peaks[1], 0.9);
        assert_eq!(peaks[3], 0.6);
    }

    #[test]
    fn short_input_yields_one_column_per_sample() {
        let samples = vec![0.2f32, 0.4, 0.8];
        let peaks = peak_columns(&samples, 1000);
        assert_eq!(peaks.len(), 3);
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let peaks = peak_columns(&[3.5f32, -7.0], 2);
        assert!(peaks.iter().all(|&p| p <= 1.0));
    }

    #[test]
    fn empty_input_yields_no_columns() {
        assert!(peak_columns(&[], 1000).is_empty());
    }

    // Minimal 16-bit PCM mono WAV, enough for the decoder to chew on.
    fn write_test_wav(path: &Path, samples: &[i16], rate: u32) {
        let data_len = (samples.len() * 2) as u32;
        let mut f = File::create(path).unwrap();
        f.write_all(b"RIFF").unwrap();
        f.write_all(&(36 + data_len).to_le_bytes()).unwrap();
        f.write_all(b"WAVE").unwrap();
        f.write_all(b"fmt ").unwrap();
        f.write_all(&16u32.to_le_bytes()).unwrap();
        f.write_all(&1u16.to_le_bytes()).unwrap(); // PCM
        f.write_all(&1u16.to_le_bytes()).unwrap(); // mono
        f.write_all(&rate.to_le_bytes()).unwrap();
        f.write_all(&(rate * 2).to_le_bytes()).unwrap();
        f.write_all(&2u16.to_le_bytes()).unwrap();
        f.write_all(&16u16.to_le_bytes()).unwrap();
        f.write_all(b"data").unwrap();
        f.write_all(&data_len.to_le_bytes()).unwrap();
        for s in samples {
            f.write_all(&s.to_le_bytes()).unwrap();
        }
    }

    #[test]
    fn wav_round_trip_reports_duration_and_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        // Half a second of a loud-ish square-ish signal at 8 kHz.
        let samples: Vec<i16> = (0..4000)
            .map(|i| if (i / 20) % 2 == 0 { 12_000 } else { -12_000 })
            .collect();
        write_test_wav(&path, &samples, 8000);

        let data = load_audio(&path).unwrap();
        assert_eq!(data.sample_rate, 8000);
        assert!((data.duration - 0.5).abs() < 1e-6);
        assert!(!data.peaks.is_empty());
        assert!(data.peaks.iter().any(|&p| p > 0.3));
        assert!(data.peaks.iter().all(|&p| p <= 1.0));
    }

    #[test]
    fn trailing_garbage_after_the_data_chunk_keeps_what_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trailing.wav");
        let samples: Vec<i16> = (0..2000)
            .map(|i| if (i / 20) % 2 == 0 { 12_000 } else { -12_000 })
            .collect();
        write_test_wav(&path, &samples, 8000);
        // Bytes past the declared data chunk that parse as neither a chunk
        // header nor audio. Decoding must terminate with the real samples
        // intact, not loop on the unreadable tail.
        let mut f = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        f.write_all(&[0xde; 37]).unwrap();

        let data = load_audio(&path).unwrap();
        assert_eq!(data.sample_rate, 8000);
        assert!((data.duration - 0.25).abs() < 1e-6);
        assert!(data.peaks.iter().any(|&p| p > 0.3));
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_audio.wav");
        std::fs::write(&path, b"definitely not a riff").unwrap();
        assert!(load_audio(&path).is_err());
    }
}
