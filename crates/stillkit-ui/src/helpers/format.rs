// crates/stillkit-ui/src/helpers/format.rs
//
// UI-layer string utilities that don't belong in stillkit-core.
//
// Time and byte-size formatting live in stillkit_core::helpers — use those
// for anything a tool panel shows about media. This module only holds
// display-context helpers with no meaning outside the UI.

/// Clips `s` to at most `max` bytes without splitting a codepoint.
///
/// Used to keep picked file names from blowing out their cards. `max` is a
/// byte count; for ASCII names that equals the character count, for
/// multibyte text the result may be shorter but is always valid UTF-8.
pub fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_is_unchanged() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5),  "hello");
    }

    #[test]
    fn long_ascii_is_clipped() {
        assert_eq!(truncate("hello world", 5), "hello");
    }

    #[test]
    fn empty_input() {
        assert_eq!(truncate("", 5), "");
    }

    #[test]
    fn multibyte_does_not_split_codepoint() {
        // "é" is two bytes; a one-byte budget must round down to empty.
        assert_eq!(truncate("élan", 1), "");
        assert_eq!(truncate("élan", 2), "é");
    }
}
