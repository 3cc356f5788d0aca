//! Core types for toxiscan

use serde::{Deserialize, Serialize};
use std::fmt;

/// Final binary verdict for a message
///
/// There is deliberately no "unknown" variant: uncertainty is carried by
/// the confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToxicityLabel {
    /// The message contains toxic content
    Toxic,
    /// No toxic content was found
    NonToxic,
}

impl ToxicityLabel {
    /// Wire representation (`TOXIC` / `NON_TOXIC`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toxic => "TOXIC",
            Self::NonToxic => "NON_TOXIC",
        }
    }
}

impl fmt::Display for ToxicityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse reading of a generative model's free-text answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoarseSignal {
    /// The answer indicates toxic content
    Toxic,
    /// The answer indicates safe content
    NonToxic,
    /// Nothing recognizable in the answer
    Ambiguous,
}

impl CoarseSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toxic => "TOXIC",
            Self::NonToxic => "NON_TOXIC",
            Self::Ambiguous => "AMBIGUOUS",
        }
    }
}

impl fmt::Display for CoarseSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
