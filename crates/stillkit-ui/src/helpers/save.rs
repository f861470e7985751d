// crates/stillkit-ui/src/helpers/save.rs
//
// Shared "Save result" flow for the tool panels. Every tool ends the same
// way: finished bytes in memory, a native save dialog, one disk write.

use rfd::FileDialog;
use std::path::Path;
use stillkit_core::state::JobOutput;

/// Asks the user where to put `output` and writes it there.
///
/// Closing the dialog without picking a destination is a normal outcome and
/// is not reported anywhere.
pub fn save_output(output: &JobOutput, filter_name: &str, extensions: &[&str]) {
    let Some(dest) = FileDialog::new()
        .set_file_name(&output.suggested_name)
        .add_filter(filter_name, extensions)
        .save_file()
    else {
        return;
    };
    let _ = write_output(&dest, output);
}

/// Write the finished bytes to `dest`. A failed write is logged exactly
/// once, here and nowhere else; the bytes stay in state so the user can
/// try again.
pub fn write_output(dest: &Path, output: &JobOutput) -> bool {
    match std::fs::write(dest, &output.bytes) {
        Ok(()) => {
            tracing::info!("[save] wrote {} ({} bytes)", dest.display(), output.bytes.len());
            true
        }
        Err(err) => {
            tracing::error!("[save] failed to write {}: {err}", dest.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(bytes: &[u8]) -> JobOutput {
        JobOutput {
            bytes:          bytes.to_vec(),
            suggested_name: "out.bin".to_string(),
        }
    }

    #[test]
    fn successful_write_lands_the_bytes_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("clip.mp4");
        assert!(write_output(&dest, &output(b"abc")));
        assert_eq!(std::fs::read(&dest).unwrap(), b"abc");
    }

    #[test]
    fn failed_write_reports_false_and_keeps_the_output_intact() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("does").join("not").join("exist.mp4");
        let out = output(b"abc");
        assert!(!write_output(&dest, &out));
        // Nothing was consumed; a retry with a better destination still works.
        let dest2 = dir.path().join("retry.mp4");
        assert!(write_output(&dest2, &out));
    }
}
