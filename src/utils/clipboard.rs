use anyhow::{Context, Result};
use arboard::Clipboard;

/// Puts the assembled context on the system clipboard.
pub fn copy_to_clipboard(content: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
    clipboard
        .set_text(content)
        .context("Failed to set clipboard text")?;
    tracing::debug!(chars = content.chars().count(), "copied context to clipboard");
    Ok(())
}
