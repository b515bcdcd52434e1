//! Synthesis options.

use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

/// What to do when the input register is wider than the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversizedInput {
    /// Ignore the input's high bits; they cannot affect a sum taken modulo
    /// `2^len(target)`.
    #[default]
    Truncate,
    /// Fail with [`SynthError::OversizedInput`].
    Reject,
}

/// Options shared by every synthesizer in this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthOptions {
    /// Policy for inputs wider than the target.
    pub oversized_input: OversizedInput,
}

impl SynthOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the oversized-input policy.
    #[must_use]
    pub fn with_oversized_input(mut self, policy: OversizedInput) -> Self {
        self.oversized_input = policy;
        self
    }

    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SynthResult<Self> {
        serde_json::from_str(json).map_err(|e| SynthError::InvalidOptions(e.to_string()))
    }
}
