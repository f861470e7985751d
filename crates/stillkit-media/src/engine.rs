// crates/stillkit-media/src/engine.rs
//
// The external transcoding engine: an ffmpeg binary driven as a black box.
// This module resolves the binary once at startup, and runs argument lists
// inside a job's scratch directory with machine-readable progress on stdout
// and log lines on stderr. Nothing here knows what the arguments mean.

use crate::error::{MediaError, Result};
use crate::progress::{ProgressParser, ProgressUpdate};
use crossbeam_channel::Sender;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use stillkit_core::events::MediaEvent;
use uuid::Uuid;

/// Environment override for the engine binary. Without it, `ffmpeg` is
/// looked up on PATH.
pub const ENGINE_ENV: &str = "STILLKIT_FFMPEG";

/// How many trailing engine log lines ride along in a failure report.
const LOG_TAIL_LINES: usize = 12;

/// A resolved, version-probed engine binary.
#[derive(Debug, Clone)]
pub struct Engine {
    pub program: PathBuf,
    pub version: String,
}

impl Engine {
    /// Resolve the binary and probe it. Called once, on a worker thread, at
    /// startup; failure is terminal for the session.
    pub fn resolve() -> Result<Engine> {
        let program = std::env::var_os(ENGINE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("ffmpeg"));

        let output = Command::new(&program)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| MediaError::EngineUnavailable {
                detail: format!("{}: {e}", program.display()),
            })?;

        if !output.status.success() {
            return Err(MediaError::EngineUnavailable {
                detail: format!("{} ({})", program.display(), output.status),
            });
        }

        let version = banner_version(&output.stdout);
        tracing::info!("engine ready: {version}");
        Ok(Engine { program, version })
    }

    /// Run one argument list inside `dir`. Inputs are already staged there
    /// under the names the arguments reference; the output lands there too.
    ///
    /// Progress percentages (raw, unclamped) and log lines are sent over
    /// `tx` as they arrive. Returns once the engine exits; non-zero exit
    /// becomes an error carrying the stderr tail.
    pub fn exec(
        &self,
        dir: &Path,
        args: &[String],
        expected_seconds: f64,
        job: Uuid,
        tx: &Sender<MediaEvent>,
    ) -> Result<()> {
        tracing::debug!("[engine] exec {:?}", args);

        let mut child = Command::new(&self.program)
            .current_dir(dir)
            .args(["-nostdin", "-y", "-progress", "pipe:1"])
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Stderr must be drained concurrently or a chatty engine fills the
        // pipe and stalls. The thread forwards each line and keeps a tail
        // for the failure report.
        let stderr = child.stderr.take();
        let log_tx = tx.clone();
        let stderr_thread = thread::spawn(move || {
            let mut tail: Vec<String> = Vec::new();
            if let Some(stderr) = stderr {
                for line in BufReader::new(stderr).lines() {
                    let Ok(line) = line else { break };
                    if line.is_empty() {
                        continue;
                    }
                    if tail.len() == LOG_TAIL_LINES {
                        tail.remove(0);
                    }
                    tail.push(line.clone());
                    let _ = log_tx.send(MediaEvent::JobLog { job, line });
                }
            }
            tail
        });

        if let Some(stdout) = child.stdout.take() {
            let parser = ProgressParser::new(expected_seconds);
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                match parser.push(&line) {
                    Some(ProgressUpdate::Percent(percent)) => {
                        let _ = tx.send(MediaEvent::JobProgress { job, percent });
                    }
                    Some(ProgressUpdate::End) => {
                        let _ = tx.send(MediaEvent::JobProgress { job, percent: 100 });
                    }
                    None => {}
                }
            }
        }

        let status = child.wait()?;
        let tail = stderr_thread.join().unwrap_or_default();

        if status.success() {
            Ok(())
        } else {
            Err(MediaError::EngineExit {
                status: status.to_string(),
                tail:   tail.join("\n"),
            })
        }
    }
}

/// First line of the `-version` banner, e.g. "ffmpeg version 6.1.1 ...".
fn banner_version(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .lines()
        .next()
        .unwrap_or("unknown")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_takes_the_first_line_only() {
        let out = b"ffmpeg version 6.1.1 Copyright (c) 2000-2023\nbuilt with gcc\n";
        assert_eq!(banner_version(out), "ffmpeg version 6.1.1 Copyright (c) 2000-2023");
    }

    #[test]
    fn empty_banner_reads_unknown() {
        assert_eq!(banner_version(b""), "unknown");
    }
}
