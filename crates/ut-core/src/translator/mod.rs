mod attempt;
mod state_machine;

pub use attempt::{AttemptPhase, PendingTranslation, TranslationAttempt};
pub use state_machine::{
    TextField, TranslatorAction, TranslatorEvent, TranslatorPolicy, TranslatorState,
    TranslatorStateMachine,
};
