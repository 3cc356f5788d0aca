//! Toxiscan Classifiers
//!
//! Deterministic toxicity classification for short free-text messages.
//!
//! The crate is organised in layers:
//! - [`catalog`]: the static, versioned set of toxicity categories and rules
//! - [`patterns`]: the rule-based classifier producing a label and confidence
//! - [`signal`]: reads a coarse verdict out of a generative model's free text
//! - [`hybrid`]: reconciles the two verdicts under a fixed precedence policy
//! - [`facade`]: the single entry point, degrading to pattern-only on any
//!   secondary failure
//!
//! Classification never fails once a catalog has been built.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod facade;
pub mod hybrid;
pub mod patterns;
pub mod secondary;
pub mod signal;

pub use catalog::{Category, PatternCatalog, Rule, CATALOG_VERSION};
pub use classifier::{ClassificationMetadata, ClassificationResult, Classifier, Engine};
pub use config::{load_config, SecondaryConfig, ToxiscanConfig};
pub use facade::ClassifierFacade;
pub use hybrid::HybridResolver;
pub use patterns::PatternClassifier;
pub use secondary::{build_prompt, HttpCompletionModel, SecondaryFailure, SecondaryModel};
pub use signal::SignalParser;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassificationResult, Classifier};
    pub use crate::facade::ClassifierFacade;
    pub use crate::patterns::PatternClassifier;
    pub use crate::secondary::{SecondaryFailure, SecondaryModel};
    pub use toxiscan_core::{CoarseSignal, ToxicityLabel};
}
