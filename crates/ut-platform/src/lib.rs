//! # ut-platform
//!
//! Platform adapters for UniTranslate: system clipboard access and
//! command-line speech synthesis.

pub mod clipboard;
pub mod speech;

pub use clipboard::SystemClipboard;
pub use speech::CommandSpeechSynthesizer;
