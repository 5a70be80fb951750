use anyhow::Result;
use tiktoken_rs::cl100k_base;

/// Fast token estimate for recovered document text (~4 chars per token).
/// Recovered text is mostly prose, so whitespace-separated words give a floor.
pub fn estimate_tokens(text: &str) -> usize {
    let char_estimate = text.len() / 4;
    let word_estimate = text.split_whitespace().count();
    char_estimate.max(word_estimate)
}

/// Accurate token count with the cl100k tokenizer
pub fn count_tokens(text: &str) -> Result<usize> {
    let bpe = cl100k_base()?;
    Ok(bpe.encode_with_special_tokens(text).len())
}

/// Counts accurately, falling back to the estimate if the tokenizer fails
/// to load.
pub fn count_or_estimate(text: &str) -> usize {
    count_tokens(text).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "tokenizer unavailable, estimating");
        estimate_tokens(text)
    })
}
