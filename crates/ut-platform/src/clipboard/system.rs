use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use clipboard_rs::{Clipboard, ClipboardContext};
use log::debug;
use tokio::task::spawn_blocking;
use ut_core::ports::SystemClipboardPort;

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

pub struct SystemClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let context = map_clipboard_err(ClipboardContext::new())
            .context("ClipboardContext::new failed")?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }
}

#[async_trait]
impl SystemClipboardPort for SystemClipboard {
    async fn set_text(&self, text: String) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        let written = text.len();

        // clipboard access can block on the window system
        spawn_blocking(move || {
            let ctx = inner.lock().unwrap();
            map_clipboard_err(ctx.set_text(text))
        })
        .await
        .context("clipboard write task failed")??;

        debug!("clipboard updated ({} bytes)", written);
        Ok(())
    }
}
