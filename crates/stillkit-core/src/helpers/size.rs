// crates/stillkit-core/src/helpers/size.rs

/// Hard cap on the image→video tool's output. Platforms that accept short
/// clips reject anything bigger, so exceeding this aborts the job with a
/// message instead of offering a save.
pub const STILL_VIDEO_MAX_BYTES: u64 = 15 * 1024 * 1024;

/// Format a byte count for display.
///
/// | Range    | Format    | Example    |
/// |----------|-----------|------------|
/// | ≥ 1 MiB  | `X.X MB`  | `14.2 MB`  |
/// | ≥ 1 KiB  | `X.X KB`  | `832.0 KB` |
/// | < 1 KiB  | `X B`     | `512 B`    |
///
/// ```
/// use stillkit_core::helpers::size::format_bytes;
/// assert_eq!(format_bytes(512),        "512 B");
/// assert_eq!(format_bytes(2048),       "2.0 KB");
/// assert_eq!(format_bytes(14_889_780), "14.2 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= MIB {
        format!("{:.1} MB", b / MIB)
    } else if b >= KIB {
        format!("{:.1} KB", b / KIB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_is_fifteen_binary_megabytes() {
        assert_eq!(STILL_VIDEO_MAX_BYTES, 15_728_640);
    }

    #[test]
    fn exactly_at_cap_formats_as_fifteen_megabytes() {
        assert_eq!(format_bytes(STILL_VIDEO_MAX_BYTES), "15.0 MB");
    }
}
