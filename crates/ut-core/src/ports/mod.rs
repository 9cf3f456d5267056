//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! external dependencies.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `ut-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a business capability?**
//! 2. **Will it be depended upon by multiple use cases or domains?**
//! 3. **Is it implemented by the infrastructure or platform layer?**
//!
//! If all three answers are **yes**, place it in `ut-core/ports`.
//! Otherwise, place it in the relevant `domain` submodule.

mod clock;
pub mod errors;
pub mod speech;
pub mod system_clipboard;
pub mod translation;


pub use clock::*;
pub use errors::ServiceError;
pub use speech::SpeechSynthesisPort;
pub use system_clipboard::SystemClipboardPort;
pub use translation::{LanguageCatalogPort, TranslationServicePort};
