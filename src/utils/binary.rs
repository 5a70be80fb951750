/// Number of leading bytes inspected by [`is_binary`].
pub const BINARY_PROBE_LEN: usize = 8192;

/// Checks if the buffer contains binary data.
/// Uses a simple heuristic: looks for null bytes in the first 8KB.
pub fn is_binary(content: &[u8]) -> bool {
    let check_len = content.len().min(BINARY_PROBE_LEN);
    content[..check_len].contains(&0)
}
