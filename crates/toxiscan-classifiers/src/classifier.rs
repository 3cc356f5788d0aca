//! Classifier trait and common types

use async_trait::async_trait;
use serde::Serialize;
use toxiscan_core::{CoarseSignal, ToxicityLabel};

/// Trait for all classifiers
///
/// Unlike most fallible operations in the workspace, classification
/// always yields a result.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given text
    async fn classify(&self, text: &str) -> ClassificationResult;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Which engine currently produces results
    fn engine(&self) -> Engine;
}

/// Result of classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Binary verdict
    pub label: ToxicityLabel,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,

    /// Additional metadata
    pub metadata: ClassificationMetadata,
}

impl ClassificationResult {
    /// Create a new classification result
    pub fn new(label: ToxicityLabel, confidence: f32) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
            metadata: ClassificationMetadata::default(),
        }
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: ClassificationMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Metadata about classification
///
/// Informational only: nothing here feeds back into label or confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationMetadata {
    /// Engine that produced the verdict
    pub engine: Engine,

    /// Distinct categories that matched, in catalog order
    pub categories: Vec<String>,

    /// Total rule occurrences across all categories
    pub total_matches: usize,

    /// Coarse signal applied by hybrid resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<CoarseSignal>,
}

/// Engine behind a classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Rule catalog only
    #[default]
    Pattern,
    /// Rule catalog reconciled with a generative model
    Hybrid,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Hybrid => "hybrid",
        }
    }
}
