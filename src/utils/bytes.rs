//! Byte classification and bounded scanning helpers.
//!
//! Every capped scan in the extraction strategies goes through
//! [`scan_window`] so a loop can never look past its window, however large
//! the input file is.

/// Printable ASCII, space through tilde.
#[inline]
pub fn is_printable_ascii(byte: u8) -> bool {
    (32..=126).contains(&byte)
}

#[inline]
pub fn is_line_break(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r')
}

/// Printable ASCII plus the three whitespace controls that survive decoding.
#[inline]
pub fn is_text_byte(byte: u8) -> bool {
    is_printable_ascii(byte) || is_line_break(byte) || byte == b'\t'
}

#[inline]
pub fn is_ascii_letter(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

/// Returns the first `min(len, cap)` bytes.
pub fn scan_window(bytes: &[u8], cap: usize) -> &[u8] {
    &bytes[..bytes.len().min(cap)]
}

/// Finds the next occurrence of a two-byte marker at or after `from`.
///
/// A marker whose second byte would fall outside `window` is not a match.
pub fn find_pair(window: &[u8], from: usize, pair: [u8; 2]) -> Option<usize> {
    if from >= window.len() {
        return None;
    }
    window[from..]
        .windows(2)
        .position(|w| w[0] == pair[0] && w[1] == pair[1])
        .map(|offset| from + offset)
}

/// Longest prefix of `text` holding at most `max_chars` characters.
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
