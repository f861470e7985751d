// crates/stillkit-core/src/selection.rs
//
// The trim/fade selection for one loaded audio asset. Exactly one selection
// exists per asset: it is created when the waveform finishes loading, mutated
// by region drags and fade inputs, and discarded when the audio is replaced.

/// Minimum width of a selection in seconds. Handle drags clamp against this
/// so the region can never collapse to a point.
pub const MIN_REGION_SECONDS: f64 = 0.1;

/// Length of the boundary audition windows played by the preview buttons.
pub const PREVIEW_SECONDS: f64 = 3.0;

/// Upper bound of the fade-in/fade-out inputs.
pub const MAX_FADE_SECONDS: f64 = 10.0;

/// Trim boundaries and fade durations for the loaded audio, all in seconds.
///
/// Invariants kept by the mutating methods:
///   0 ≤ start ≤ end − MIN_REGION_SECONDS (when the asset is long enough)
///   end ≤ total_duration
/// Fades are not validated against the selection length beyond the fade-out
/// drop rule in `filter::audio_filter_chain` — overlapping ramps on very
/// short clips are allowed and left to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSelection {
    pub start_seconds:    f64,
    pub end_seconds:      f64,
    pub total_duration:   f64,
    pub fade_in_seconds:  f64,
    pub fade_out_seconds: f64,
}

impl AudioSelection {
    /// The default selection for a freshly loaded asset: the full range.
    pub fn full(total_duration: f64) -> Self {
        Self {
            start_seconds:    0.0,
            end_seconds:      total_duration,
            total_duration,
            fade_in_seconds:  0.0,
            fade_out_seconds: 0.0,
        }
    }

    /// Length of the trimmed output.
    pub fn trim_duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }

    /// Clamp a candidate start time so the minimum-width invariant holds.
    pub fn clamp_start(&self, t: f64) -> f64 {
        t.clamp(0.0, (self.end_seconds - MIN_REGION_SECONDS).max(0.0))
    }

    /// Clamp a candidate end time so the minimum-width invariant holds.
    pub fn clamp_end(&self, t: f64) -> f64 {
        let floor = (self.start_seconds + MIN_REGION_SECONDS).min(self.total_duration);
        t.clamp(floor, self.total_duration)
    }

    /// Move the start boundary (custom handle drag). Always clamped.
    pub fn set_start(&mut self, t: f64) {
        self.start_seconds = self.clamp_start(t);
    }

    /// Move the end boundary (custom handle drag). Always clamped.
    pub fn set_end(&mut self, t: f64) {
        self.end_seconds = self.clamp_end(t);
    }

    /// Replace both boundaries from a fresh drag-created region. The inputs
    /// may arrive in either order; the result is ordered, bounded to the
    /// asset, and widened to the minimum width where the asset allows it.
    pub fn set_region(&mut self, a: f64, b: f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let start = lo.clamp(0.0, self.total_duration);
        let mut end = hi.clamp(0.0, self.total_duration);
        if end - start < MIN_REGION_SECONDS {
            end = (start + MIN_REGION_SECONDS).min(self.total_duration);
        }
        self.start_seconds = start.min((end - MIN_REGION_SECONDS).max(0.0));
        self.end_seconds = end;
    }

    /// Audition window for the start boundary: [start, min(start+3, end)].
    pub fn preview_start_window(&self) -> (f64, f64) {
        (
            self.start_seconds,
            (self.start_seconds + PREVIEW_SECONDS).min(self.end_seconds),
        )
    }

    /// Audition window for the end boundary: [max(start, end−3), end].
    pub fn preview_end_window(&self) -> (f64, f64) {
        (
            (self.end_seconds - PREVIEW_SECONDS).max(self.start_seconds),
            self.end_seconds,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_selection_covers_full_duration() {
        let sel = AudioSelection::full(10.0);
        assert_eq!(sel.start_seconds, 0.0);
        assert_eq!(sel.end_seconds, 10.0);
        assert_eq!(sel.total_duration, 10.0);
        assert_eq!(sel.fade_in_seconds, 0.0);
        assert_eq!(sel.fade_out_seconds, 0.0);
    }

    #[test]
    fn start_clamps_below_end_minus_min_width() {
        let mut sel = AudioSelection::full(10.0);
        sel.set_end(5.0);
        sel.set_start(9.0);
        assert!(sel.start_seconds <= sel.end_seconds - MIN_REGION_SECONDS + 1e-9);
        assert!((sel.start_seconds - 4.9).abs() < 1e-9);
    }

    #[test]
    fn end_clamps_above_start_plus_min_width() {
        let mut sel = AudioSelection::full(10.0);
        sel.set_start(4.0);
        sel.set_end(2.0);
        assert!(sel.end_seconds >= sel.start_seconds + MIN_REGION_SECONDS - 1e-9);
        assert!((sel.end_seconds - 4.1).abs() < 1e-9);
    }

    #[test]
    fn boundaries_never_leave_the_asset() {
        let mut sel = AudioSelection::full(10.0);
        sel.set_start(-3.0);
        assert_eq!(sel.start_seconds, 0.0);
        sel.set_end(25.0);
        assert_eq!(sel.end_seconds, 10.0);
    }

    #[test]
    fn drag_created_region_is_ordered_and_widened() {
        let mut sel = AudioSelection::full(10.0);
        sel.set_region(7.0, 3.0);
        assert_eq!(sel.start_seconds, 3.0);
        assert_eq!(sel.end_seconds, 7.0);

        sel.set_region(5.0, 5.02);
        assert!(sel.end_seconds - sel.start_seconds >= MIN_REGION_SECONDS - 1e-9);
    }

    #[test]
    fn min_width_survives_repeated_opposing_drags() {
        let mut sel = AudioSelection::full(10.0);
        for _ in 0..50 {
            sel.set_start(sel.end_seconds);
            sel.set_end(sel.start_seconds);
        }
        assert!(sel.end_seconds - sel.start_seconds >= MIN_REGION_SECONDS - 1e-9);
        assert!(sel.start_seconds >= 0.0);
        assert!(sel.end_seconds <= sel.total_duration);
    }

    #[test]
    fn start_preview_is_capped_at_three_seconds() {
        let mut sel = AudioSelection::full(60.0);
        sel.set_region(10.0, 30.0);
        assert_eq!(sel.preview_start_window(), (10.0, 13.0));
        assert_eq!(sel.preview_end_window(), (27.0, 30.0));
    }

    #[test]
    fn short_selection_previews_never_cross_boundaries() {
        let mut sel = AudioSelection::full(60.0);
        sel.set_region(10.0, 11.0);
        assert_eq!(sel.preview_start_window(), (10.0, 11.0));
        assert_eq!(sel.preview_end_window(), (10.0, 11.0));
    }
}
