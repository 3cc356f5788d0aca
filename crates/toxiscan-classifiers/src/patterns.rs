//! Pattern-based toxicity classifier
//!
//! Applies every rule of a [`PatternCatalog`] to the lowercased message and
//! turns the total number of occurrences into a confidence step.

use crate::catalog::PatternCatalog;
use crate::classifier::{ClassificationMetadata, ClassificationResult, Classifier, Engine};
use std::sync::Arc;
use toxiscan_core::{Result, ToxicityLabel};

/// Confidence for empty or whitespace-only input
pub const EMPTY_INPUT_CONFIDENCE: f32 = 1.0;

/// Confidence when no rule matched
pub const NO_MATCH_CONFIDENCE: f32 = 0.85;

/// Deterministic classifier over a shared rule catalog
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    name: String,
    catalog: Arc<PatternCatalog>,
}

impl PatternClassifier {
    /// Create a classifier over an existing catalog
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self {
            name: "toxicity-patterns".to_string(),
            catalog,
        }
    }

    /// Create a classifier over the built-in catalog
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(Arc::new(PatternCatalog::builtin()?)))
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Classify `text` synchronously.
    ///
    /// Never fails and never blocks: every input, including the empty
    /// string, has a defined result.
    pub fn evaluate(&self, text: &str) -> ClassificationResult {
        if text.trim().is_empty() {
            return ClassificationResult::new(ToxicityLabel::NonToxic, EMPTY_INPUT_CONFIDENCE);
        }

        let text_lower = fold_case(text);

        let mut total_matches = 0;
        let mut categories = Vec::new();
        for category in self.catalog.categories() {
            let hits = category.occurrences(&text_lower);
            if hits > 0 {
                total_matches += hits;
                categories.push(category.id().to_string());
            }
        }

        tracing::debug!(total_matches, ?categories, "pattern classification");

        let metadata = ClassificationMetadata {
            engine: Engine::Pattern,
            categories,
            total_matches,
            signal: None,
        };

        match confidence_for_matches(total_matches) {
            None => ClassificationResult::new(ToxicityLabel::NonToxic, NO_MATCH_CONFIDENCE)
                .with_metadata(metadata),
            Some(confidence) => {
                ClassificationResult::new(ToxicityLabel::Toxic, confidence).with_metadata(metadata)
            }
        }
    }
}

/// Lowercase `text` so that `text` and its uppercase form fold alike.
///
/// Plain lowercasing keeps ligatures such as `ﬁ` intact while uppercasing
/// expands them, so the uppercase pass goes first.
fn fold_case(text: &str) -> String {
    text.to_uppercase().to_lowercase()
}

/// Confidence of a toxic verdict for a given occurrence count.
///
/// Driven by raw occurrences, not by distinct categories. Saturates below
/// 1.0. Returns `None` when nothing matched.
pub fn confidence_for_matches(total_matches: usize) -> Option<f32> {
    match total_matches {
        0 => None,
        1 => Some(0.75),
        2 => Some(0.90),
        _ => Some(0.98),
    }
}

#[async_trait::async_trait]
impl Classifier for PatternClassifier {
    async fn classify(&self, text: &str) -> ClassificationResult {
        self.evaluate(text)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn engine(&self) -> Engine {
        Engine::Pattern
    }
}
