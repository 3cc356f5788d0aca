//! Toxiscan Core
//!
//! Core types and error handling shared across toxiscan components.
//!
//! This crate provides:
//! - The binary toxicity label and the three-valued coarse signal
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{CoarseSignal, ToxicityLabel};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{CoarseSignal, ToxicityLabel};
}
