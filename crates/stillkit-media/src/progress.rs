// crates/stillkit-media/src/progress.rs
//
// Parses the engine's machine-readable progress stream (`-progress pipe:1`,
// blocks of key=value lines) into rounded percentages against the expected
// output duration. The UI side owns clamping and monotonicity; this module
// only translates lines.

/// One meaningful line from the progress stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// Position reached, as a rounded percentage of the expected duration.
    /// May be out of [0, 100] when the engine overshoots or reports its
    /// start-of-stream sentinel; the receiver drops those.
    Percent(i32),
    /// Final block marker — the job's output is fully written.
    End,
}

pub struct ProgressParser {
    expected_us: f64,
}

impl ProgressParser {
    /// `expected_seconds` is the duration of the output being produced
    /// (2 s for the still tool, the trim duration for the mixer).
    pub fn new(expected_seconds: f64) -> Self {
        Self { expected_us: expected_seconds * 1_000_000.0 }
    }

    /// Feed one line; most lines of a block are irrelevant and return None.
    pub fn push(&self, line: &str) -> Option<ProgressUpdate> {
        let (key, value) = line.trim().split_once('=')?;
        match key {
            // out_time_ms is also microseconds (long-standing engine quirk),
            // so out_time_us alone is enough and unambiguous.
            "out_time_us" => {
                let us = value.parse::<i64>().ok()?;
                Some(ProgressUpdate::Percent(self.percent(us)))
            }
            "progress" if value == "end" => Some(ProgressUpdate::End),
            _ => None,
        }
    }

    fn percent(&self, out_time_us: i64) -> i32 {
        if self.expected_us <= 0.0 {
            return 0;
        }
        let ratio = out_time_us as f64 / self.expected_us;
        (ratio * 100.0).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_lines_yield_percent_then_end() {
        let parser = ProgressParser::new(2.0);
        let block = [
            "frame=30",
            "fps=0.00",
            "total_size=48",
            "out_time_us=1000000",
            "out_time_ms=1000000",
            "out_time=00:00:01.000000",
            "speed=1.9x",
            "progress=continue",
        ];
        let updates: Vec<_> = block.iter().filter_map(|l| parser.push(l)).collect();
        assert_eq!(updates, vec![ProgressUpdate::Percent(50)]);

        assert_eq!(parser.push("out_time_us=2000000"), Some(ProgressUpdate::Percent(100)));
        assert_eq!(parser.push("progress=end"), Some(ProgressUpdate::End));
    }

    #[test]
    fn start_sentinel_goes_negative_not_zero() {
        // The engine reports a huge negative out_time before the first frame;
        // forwarding it raw lets the receiver's range check discard it.
        let parser = ProgressParser::new(6.0);
        match parser.push("out_time_us=-9223372036854775808") {
            Some(ProgressUpdate::Percent(p)) => assert!(p < 0),
            other => panic!("expected a percent, got {other:?}"),
        }
    }

    #[test]
    fn overshoot_exceeds_one_hundred() {
        let parser = ProgressParser::new(2.0);
        assert_eq!(parser.push("out_time_us=2100000"), Some(ProgressUpdate::Percent(105)));
    }

    #[test]
    fn unparsable_and_foreign_lines_are_ignored() {
        let parser = ProgressParser::new(2.0);
        assert_eq!(parser.push("out_time_us=N/A"), None);
        assert_eq!(parser.push("progress=continue"), None);
        assert_eq!(parser.push("bitrate=192.0kbits/s"), None);
        assert_eq!(parser.push(""), None);
    }

    #[test]
    fn zero_expected_duration_never_divides() {
        let parser = ProgressParser::new(0.0);
        assert_eq!(parser.push("out_time_us=500000"), Some(ProgressUpdate::Percent(0)));
    }
}
