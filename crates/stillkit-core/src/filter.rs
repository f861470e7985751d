// crates/stillkit-core/src/filter.rs
//
// Builds the audio filter chain the engine consumes verbatim. Pure string
// construction — no I/O, no engine knowledge beyond the filter grammar.

use crate::selection::AudioSelection;

/// Derive the `-af` filter chain for a selection.
///
/// Stages, in order:
///   1. `atrim` over [start, end]
///   2. `asetpts=PTS-STARTPTS` so the trimmed clip starts at t=0
///   3. fade-in of `fade_in_seconds` at t=0, only when > 0
///   4. fade-out ending at the trim boundary, only when > 0 *and* its start
///      `(end − start) − fade_out` lands strictly inside the clip; otherwise
///      the stage is silently dropped
///
/// Rebuilding from the same selection always yields the same chain.
pub fn audio_filter_chain(sel: &AudioSelection) -> String {
    let mut af = format!(
        "atrim={}:{},asetpts=PTS-STARTPTS",
        sel.start_seconds, sel.end_seconds
    );

    if sel.fade_in_seconds > 0.0 {
        af.push_str(&format!(",afade=t=in:st=0:d={}", sel.fade_in_seconds));
    }

    if sel.fade_out_seconds > 0.0 {
        let fade_out_start = sel.trim_duration() - sel.fade_out_seconds;
        if fade_out_start > 0.0 {
            af.push_str(&format!(
                ",afade=t=out:st={}:d={}",
                fade_out_start, sel.fade_out_seconds
            ));
        }
    }

    af
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(start: f64, end: f64, fade_in: f64, fade_out: f64) -> AudioSelection {
        AudioSelection {
            start_seconds:    start,
            end_seconds:      end,
            total_duration:   end.max(10.0),
            fade_in_seconds:  fade_in,
            fade_out_seconds: fade_out,
        }
    }

    #[test]
    fn bare_trim_without_fades() {
        let sel = selection(0.0, 10.0, 0.0, 0.0);
        assert_eq!(audio_filter_chain(&sel), "atrim=0:10,asetpts=PTS-STARTPTS");
    }

    #[test]
    fn full_chain_with_both_fades() {
        // 10 s asset trimmed to [2, 8] with 1 s ramps at both ends:
        // 6 s output, fade-in over 0–1 s, fade-out over 5–6 s.
        let sel = selection(2.0, 8.0, 1.0, 1.0);
        assert_eq!(
            audio_filter_chain(&sel),
            "atrim=2:8,asetpts=PTS-STARTPTS,afade=t=in:st=0:d=1,afade=t=out:st=5:d=1"
        );
        assert_eq!(sel.trim_duration(), 6.0);
    }

    #[test]
    fn fade_out_dropped_when_start_would_be_negative() {
        // (0.5 − 0) − 1 = −0.5 → no fade-out stage.
        let sel = selection(0.0, 0.5, 0.0, 1.0);
        assert_eq!(
            audio_filter_chain(&sel),
            "atrim=0:0.5,asetpts=PTS-STARTPTS"
        );
    }

    #[test]
    fn fade_out_dropped_when_it_covers_the_whole_clip() {
        // fade_out == trim duration → start lands exactly at 0 → dropped.
        let sel = selection(2.0, 5.0, 0.0, 3.0);
        assert_eq!(audio_filter_chain(&sel), "atrim=2:5,asetpts=PTS-STARTPTS");
    }

    #[test]
    fn fade_in_alone_is_kept_even_on_short_clips() {
        // Fade-in has no drop rule; overlap with the clip end is allowed.
        let sel = selection(0.0, 0.5, 2.0, 0.0);
        assert_eq!(
            audio_filter_chain(&sel),
            "atrim=0:0.5,asetpts=PTS-STARTPTS,afade=t=in:st=0:d=2"
        );
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let sel = selection(1.25, 7.75, 0.5, 2.0);
        let first = audio_filter_chain(&sel);
        assert_eq!(audio_filter_chain(&sel), first);
        assert_eq!(
            first,
            "atrim=1.25:7.75,asetpts=PTS-STARTPTS,afade=t=in:st=0:d=0.5,afade=t=out:st=4.5:d=2"
        );
    }

    #[test]
    fn fractional_boundaries_format_without_padding() {
        let sel = selection(0.5, 2.5, 0.0, 0.0);
        assert_eq!(audio_filter_chain(&sel), "atrim=0.5:2.5,asetpts=PTS-STARTPTS");
    }
}
