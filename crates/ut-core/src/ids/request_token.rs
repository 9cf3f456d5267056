use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Monotonic version marker minted once per executed translation attempt.
///
/// Tokens order attempts by issue time; a response is only applied while its
/// token is still the live one. Comparing tokens is how out-of-order
/// completions get discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Display for RequestToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
