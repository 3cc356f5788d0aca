//! Coarse signal extraction from generative model output
//!
//! The generative backend is asked for one of two tokens, but nothing
//! guarantees it complies. The parser looks for toxic and safe indicators
//! anywhere in the answer and lets safe indicators win, since every
//! "não tóxica" answer also contains "tóxica".

use aho_corasick::AhoCorasick;
use toxiscan_core::{CoarseSignal, Error, Result};

/// Indicators of a toxic verdict (matched against normalized text)
const TOXIC_TOKENS: &[&str] = &["TOXICA", "TÓXICA", "TOXICO", "TÓXICO", "TOXIC"];

/// Indicators of a safe verdict (matched against normalized text)
const SAFE_TOKENS: &[&str] = &[
    "NAO TOXICA",
    "NÃO TOXICA",
    "NAO TÓXICA",
    "NÃO TÓXICA",
    "NAO TOXICO",
    "NÃO TOXICO",
    "NAO TÓXICO",
    "NÃO TÓXICO",
    "NON TOXIC",
    "NOT TOXIC",
    "SEGURA",
    "NORMAL",
];

/// Parses free text into a [`CoarseSignal`]
#[derive(Debug, Clone)]
pub struct SignalParser {
    toxic: AhoCorasick,
    safe: AhoCorasick,
}

impl SignalParser {
    /// Create a parser with the built-in indicator sets
    pub fn new() -> Result<Self> {
        Ok(Self {
            toxic: Self::build_matcher(TOXIC_TOKENS)?,
            safe: Self::build_matcher(SAFE_TOKENS)?,
        })
    }

    fn build_matcher(tokens: &[&str]) -> Result<AhoCorasick> {
        AhoCorasick::new(tokens)
            .map_err(|e| Error::internal(format!("Failed to build signal matcher: {}", e)))
    }

    /// Read a coarse verdict out of `response`.
    ///
    /// Total: unrecognized input yields [`CoarseSignal::Ambiguous`].
    pub fn parse(&self, response: &str) -> CoarseSignal {
        let normalized = normalize(response);

        let toxic_found = self.toxic.is_match(&normalized);
        let safe_found = self.safe.is_match(&normalized);

        let signal = if safe_found {
            CoarseSignal::NonToxic
        } else if toxic_found {
            CoarseSignal::Toxic
        } else {
            CoarseSignal::Ambiguous
        };

        tracing::trace!(toxic_found, safe_found, %signal, "parsed secondary signal");

        signal
    }
}

/// Uppercase and turn `_`/`-` into spaces
fn normalize(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> SignalParser {
        SignalParser::new().unwrap()
    }

    #[test]
    fn test_formatting_variants_are_equivalent() {
        let parser = parser();
        for text in ["NAO_TOXICA", "nao-toxica", "NAO TOXICA", "não tóxica", "Não-Tóxica."] {
            assert_eq!(parser.parse(text), CoarseSignal::NonToxic, "input: {text}");
        }
    }

    #[test]
    fn test_toxic_variants() {
        let parser = parser();
        for text in ["TOXICA", "tóxica", "Resposta: toxic", "a mensagem é TÓXICO"] {
            assert_eq!(parser.parse(text), CoarseSignal::Toxic, "input: {text}");
        }
    }

    #[test]
    fn test_safe_takes_precedence() {
        let parser = parser();
        assert_eq!(
            parser.parse("resposta: NAO_TOXICA, mas contem TOXICA citação"),
            CoarseSignal::NonToxic
        );
        assert_eq!(parser.parse("TOXICA? não, é normal"), CoarseSignal::NonToxic);
    }

    #[test]
    fn test_generic_safe_indicators() {
        let parser = parser();
        assert_eq!(parser.parse("mensagem segura"), CoarseSignal::NonToxic);
        assert_eq!(parser.parse("Normal"), CoarseSignal::NonToxic);
    }

    #[test]
    fn test_unrecognized_is_ambiguous() {
        let parser = parser();
        for text in ["", "   ", "I cannot answer that", "</s><|assistant|>", "42"] {
            assert_eq!(parser.parse(text), CoarseSignal::Ambiguous, "input: {text:?}");
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("nao_toxica-ok"), "NAO TOXICA OK");
    }
}
