//! Hybrid resolution between the pattern verdict and a coarse signal
//!
//! The pattern classifier acts as a safety floor: a safe signal can only
//! discount a toxic pattern verdict, never flip it. A toxic signal is
//! sufficient on its own.

use crate::classifier::{ClassificationResult, Engine};
use toxiscan_core::{CoarseSignal, ToxicityLabel};

/// Applied to a toxic pattern verdict when the signal says safe
pub const DISAGREEMENT_DISCOUNT: f32 = 0.95;

/// Confidence when both sides say safe
pub const AGREEMENT_CONFIDENCE: f32 = 0.93;

/// Confidence when the signal says toxic
pub const TOXIC_SIGNAL_CONFIDENCE: f32 = 0.94;

/// Fixed-precedence resolution policy
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridResolver;

impl HybridResolver {
    /// Reconcile `pattern_result` with `signal`.
    ///
    /// An ambiguous signal returns `pattern_result` untouched.
    pub fn resolve(
        pattern_result: ClassificationResult,
        signal: CoarseSignal,
    ) -> ClassificationResult {
        let (label, confidence) = match (signal, pattern_result.label) {
            (CoarseSignal::Ambiguous, _) => return pattern_result,
            (CoarseSignal::NonToxic, ToxicityLabel::Toxic) => (
                ToxicityLabel::Toxic,
                pattern_result.confidence * DISAGREEMENT_DISCOUNT,
            ),
            (CoarseSignal::NonToxic, ToxicityLabel::NonToxic) => {
                (ToxicityLabel::NonToxic, AGREEMENT_CONFIDENCE)
            }
            (CoarseSignal::Toxic, _) => (ToxicityLabel::Toxic, TOXIC_SIGNAL_CONFIDENCE),
        };

        let mut metadata = pattern_result.metadata;
        metadata.engine = Engine::Hybrid;
        metadata.signal = Some(signal);

        ClassificationResult::new(label, confidence).with_metadata(metadata)
    }
}
