//! Single entry point for toxicity classification
//!
//! Routes each call either to the pattern classifier alone or through hybrid
//! resolution with a generative backend. Any secondary failure degrades to
//! the pattern-only result; callers never see an error.

use crate::classifier::{ClassificationResult, Classifier, Engine};
use crate::config::ToxiscanConfig;
use crate::hybrid::HybridResolver;
use crate::patterns::PatternClassifier;
use crate::secondary::{build_prompt, HttpCompletionModel, SecondaryFailure, SecondaryModel};
use crate::signal::SignalParser;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use toxiscan_core::Result;
use tracing::{debug, info, warn};

/// Default bound on a single secondary call
pub const DEFAULT_SECONDARY_TIMEOUT: Duration = Duration::from_secs(30);

/// Toxicity classification facade
pub struct ClassifierFacade {
    pattern: Arc<PatternClassifier>,
    parser: SignalParser,
    secondary: Option<Arc<dyn SecondaryModel>>,
    use_secondary: AtomicBool,
    timeout: Duration,
}

impl ClassifierFacade {
    /// Create a pattern-only facade
    pub fn new(pattern: Arc<PatternClassifier>) -> Result<Self> {
        Ok(Self {
            pattern,
            parser: SignalParser::new()?,
            secondary: None,
            use_secondary: AtomicBool::new(false),
            timeout: DEFAULT_SECONDARY_TIMEOUT,
        })
    }

    /// Attach a generative backend and enable the hybrid path
    pub fn with_secondary(mut self, model: Arc<dyn SecondaryModel>) -> Self {
        self.secondary = Some(model);
        self.use_secondary = AtomicBool::new(true);
        self
    }

    /// Bound each secondary call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a facade over the built-in catalog, wiring the HTTP backend
    /// when the configuration enables it
    pub fn from_config(config: &ToxiscanConfig) -> Result<Self> {
        config.validate()?;

        let pattern = Arc::new(PatternClassifier::builtin()?);
        let facade = Self::new(pattern)?.with_timeout(config.secondary.timeout());

        if !config.secondary.enabled {
            info!("Classifier facade ready (pattern only)");
            return Ok(facade);
        }

        let backend = HttpCompletionModel::from_config(&config.secondary)?;
        info!(
            backend = backend.url(),
            model = %config.secondary.model,
            "Classifier facade ready (hybrid)"
        );

        Ok(facade.with_secondary(Arc::new(backend)))
    }

    /// Toggle the hybrid path for subsequent calls.
    ///
    /// Calls already in flight keep the path they started with.
    pub fn configure(&self, uses_secondary_signal: bool) {
        self.use_secondary.store(uses_secondary_signal, Ordering::Release);
        debug!(uses_secondary_signal, "facade reconfigured");
    }

    /// Whether calls currently take the hybrid path
    pub fn uses_secondary(&self) -> bool {
        self.secondary.is_some() && self.use_secondary.load(Ordering::Acquire)
    }

    /// Classify `text`. Never fails.
    pub async fn classify(&self, text: &str) -> ClassificationResult {
        let use_secondary = self.use_secondary.load(Ordering::Acquire);
        let pattern_result = self.pattern.evaluate(text);

        let model = match &self.secondary {
            Some(model) if use_secondary => model,
            _ => return record(pattern_result),
        };

        // Nothing for the backend to judge.
        if text.trim().is_empty() {
            return record(pattern_result);
        }

        match self.call_secondary(model.as_ref(), text).await {
            Ok(completion) => {
                let signal = self.parser.parse(&completion);
                debug!(backend = model.name(), %signal, "secondary signal");
                record(HybridResolver::resolve(pattern_result, signal))
            }
            Err(failure) => {
                warn!(
                    backend = model.name(),
                    error = %failure,
                    "secondary call failed, using pattern result"
                );
                metrics::counter!("toxiscan_secondary_failures_total", "reason" => failure.reason())
                    .increment(1);
                record(pattern_result)
            }
        }
    }

    async fn call_secondary(
        &self,
        model: &dyn SecondaryModel,
        text: &str,
    ) -> std::result::Result<String, SecondaryFailure> {
        let prompt = build_prompt(text);

        match tokio::time::timeout(self.timeout, model.complete(&prompt)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(SecondaryFailure::Timeout(self.timeout)),
        }
    }
}

fn record(result: ClassificationResult) -> ClassificationResult {
    metrics::counter!(
        "toxiscan_classifications_total",
        "engine" => result.metadata.engine.as_str(),
        "label" => result.label.as_str()
    )
    .increment(1);
    result
}

#[async_trait::async_trait]
impl Classifier for ClassifierFacade {
    async fn classify(&self, text: &str) -> ClassificationResult {
        ClassifierFacade::classify(self, text).await
    }

    fn name(&self) -> &str {
        "toxicity"
    }

    fn engine(&self) -> Engine {
        if self.uses_secondary() {
            Engine::Hybrid
        } else {
            Engine::Pattern
        }
    }
}
