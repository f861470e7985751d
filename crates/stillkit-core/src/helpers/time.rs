// crates/stillkit-core/src/helpers/time.rs
//
// Shared time formatting for the UI crate. Everything the screens print
// about seconds goes through here so the formats can't drift apart.

/// Format a position in seconds as `M:SS.t` (tenths).
///
/// Used under the waveform for the duration readout and the preview labels.
///
/// ```
/// use stillkit_core::helpers::time::format_timestamp;
/// assert_eq!(format_timestamp(0.0),   "0:00.0");
/// assert_eq!(format_timestamp(7.25),  "0:07.2");
/// assert_eq!(format_timestamp(61.5),  "1:01.5");
/// assert_eq!(format_timestamp(605.0), "10:05.0");
/// ```
pub fn format_timestamp(secs: f64) -> String {
    let whole = secs.max(0.0);
    let m = (whole / 60.0) as u64;
    let s = whole % 60.0;
    let tenths = ((whole * 10.0) as u64) % 10;
    format!("{m}:{:02}.{tenths}", s as u64)
}

/// Format a boundary value for the numeric start/end fields: always two
/// decimals, no unit.
///
/// ```
/// use stillkit_core::helpers::time::format_boundary;
/// assert_eq!(format_boundary(0.0),       "0.00");
/// assert_eq!(format_boundary(2.3333333), "2.33");
/// ```
pub fn format_boundary(secs: f64) -> String {
    format!("{secs:.2}")
}
