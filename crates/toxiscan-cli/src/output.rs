//! Rendering of classification results

use serde::Serialize;
use toxiscan_classifiers::{ClassificationResult, PatternCatalog};
use toxiscan_core::ToxicityLabel;

#[derive(Debug, Serialize)]
struct JsonLine<'a> {
    text: &'a str,
    label: ToxicityLabel,
    confidence: f32,
    categories: &'a [String],
    engine: &'static str,
}

/// `TOXIC (75.0%)  [insults]`
pub fn render_human(result: &ClassificationResult) -> String {
    let mut line = format!("{} ({:.1}%)", result.label, result.confidence * 100.0);
    if !result.metadata.categories.is_empty() {
        line.push_str(&format!("  [{}]", result.metadata.categories.join(", ")));
    }
    line
}

pub fn render_json(text: &str, result: &ClassificationResult) -> serde_json::Result<String> {
    serde_json::to_string(&JsonLine {
        text,
        label: result.label,
        confidence: result.confidence,
        categories: &result.metadata.categories,
        engine: result.metadata.engine.as_str(),
    })
}

pub fn render_catalog(catalog: &PatternCatalog, show_rules: bool) -> String {
    let mut out = format!(
        "catalog {} ({} rules)\n",
        catalog.version(),
        catalog.rule_count()
    );
    for category in catalog.categories() {
        out.push_str(&format!("  {:<16} {:>3}\n", category.id(), category.rules().len()));
        if show_rules {
            for rule in category.rules() {
                out.push_str(&format!("      {}\n", rule.source()));
            }
        }
    }
    out
}
