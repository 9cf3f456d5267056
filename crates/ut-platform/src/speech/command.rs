//! Command-line speech synthesis.
//! Uses `say` on macOS, `espeak` on Linux, the SAPI synthesizer on Windows.

use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use tokio::process::Command;
use ut_core::language::LanguageId;
use ut_core::ports::SpeechSynthesisPort;

pub struct CommandSpeechSynthesizer;

impl CommandSpeechSynthesizer {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "linux")]
fn build_command(text: &str, language: Option<&LanguageId>) -> Command {
    let mut command = Command::new("espeak");
    if let Some(language) = language {
        command.arg("-v").arg(language.as_str());
    }
    command.arg(text);
    command
}

#[cfg(target_os = "macos")]
fn build_command(text: &str, _language: Option<&LanguageId>) -> Command {
    // `say` selects voices by name, not by language tag; stay on the default voice
    let mut command = Command::new("say");
    command.arg(text);
    command
}

#[cfg(target_os = "windows")]
fn build_command(_text: &str, _language: Option<&LanguageId>) -> Command {
    // text goes over stdin so it never needs PowerShell quoting
    let mut command = Command::new("powershell");
    command.args([
        "-NoProfile",
        "-Command",
        "Add-Type -AssemblyName System.Speech; \
         (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak([Console]::In.ReadToEnd())",
    ]);
    command.stdin(Stdio::piped());
    command
}

#[async_trait]
impl SpeechSynthesisPort for CommandSpeechSynthesizer {
    async fn speak(&self, text: String, language: Option<LanguageId>) -> Result<()> {
        if text.is_empty() {
            debug!("nothing to speak");
            return Ok(());
        }

        let mut command = build_command(&text, language.as_ref());
        command.stdout(Stdio::null()).stderr(Stdio::null());

        let mut child = command.spawn().context("spawn speech command failed")?;

        #[cfg(target_os = "windows")]
        if let Some(mut stdin) = child.stdin.take() {
            use tokio::io::AsyncWriteExt;
            if let Err(error) = stdin.write_all(text.as_bytes()).await {
                warn!("feed speech text failed: {}", error);
            }
        }

        // playback runs detached; the caller never waits for it
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    warn!("speech command exited with {}", status);
                }
                Err(error) => warn!("speech playback did not finish cleanly: {}", error),
                _ => {}
            }
        });

        debug!(
            "speech dispatched ({} chars, voice {:?})",
            text.len(),
            language.as_ref().map(|id| id.as_str())
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn test_language_tag_selects_the_espeak_voice() {
        let fr = LanguageId::from("fr");
        let command = build_command("bonjour", Some(&fr));

        let std_command = command.as_std();
        assert_eq!(std_command.get_program(), "espeak");
        let args: Vec<_> = std_command.get_args().collect();
        assert_eq!(args, ["-v", "fr", "bonjour"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_missing_language_falls_back_to_default_voice() {
        let command = build_command("hello", None);

        let args: Vec<_> = command.as_std().get_args().collect();
        assert_eq!(args, ["hello"]);
    }
}
