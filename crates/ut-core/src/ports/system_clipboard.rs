//! System clipboard port - abstracts clipboard writes
//!
//! The translator only ever writes to the clipboard, so the port is
//! write-only. The write is awaited: the copy confirmation must not fire
//! before the text actually landed on the clipboard.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SystemClipboardPort: Send + Sync {
    /// Replace the clipboard content with `text`.
    ///
    /// An empty string is a valid payload and clears the clipboard.
    async fn set_text(&self, text: String) -> Result<()>;
}
