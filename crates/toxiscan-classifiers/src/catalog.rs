//! Toxicity pattern catalog
//!
//! A catalog is an ordered set of [`Category`] values, each holding an
//! ordered list of compiled [`Rule`]s. Catalogs are built once, validated
//! up front and never mutated afterwards, so a single instance can be shared
//! behind an `Arc` by any number of concurrent classifiers.
//!
//! Rules are written against lowercase Portuguese text and use Unicode word
//! boundaries.

use regex::{Regex, RegexBuilder};
use toxiscan_core::{Error, Result};

/// Version of the built-in rule set
pub const CATALOG_VERSION: &str = "pt-br.1";

/// Built-in category definitions, in evaluation order
const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "insults",
        &[
            r"\b(idiota|burr[oa]|estúpid[oa]|imbecil|otári[oa]|babac[oa])\b",
            r"\b(desgra[çc]ad[oa]|desgraç[oa]|miserável|verme|escroto)\b",
            r"\b(lixo|vagabund[oa]|safad[oa]|nojento|immundo)\b",
            r"\b(cret[ií]n[oa]|ment[ei]ros[oa]|palha[çc]o|ridícul[oa])\b",
            r"\b(in[úu]til|incompetente|fracassad[oa]|medíocre)\b",
            r"\b(retardad[oa]|mongolóide|débil mental|deficiente)\b",
            r"\b(filho da m[ãa]e|filha da m[ãa]e|sem vergonha)\b",
            r"\b(canalha|sacana|vigarista|malandro|bandid[oa])\b",
            r"\b(porco|porcaria|sujo|fedorento|seboso)\b",
            r"\b(trouxa|bobo|tonto|anta|jumento|asno)\b",
            r"\b(ralo|ralé|gentalha|escória|escumalha)\b",
            r"\b(peste|praga|demônio|capeta|diabo)\b",
            r"\b(bost[ao]|merda seca|bosta humana)\b",
            r"\b(cu|c[uú]zao|c[uú]zona|bundão|bundona)\b",
            r"\b(arrombad[oa]|fudid[oa]|ferrad[oa])\b",
        ],
    ),
    (
        "profanity",
        &[
            r"\b(caralho|cacete|porra|merda|bosta)\b",
            r"\b(puto|puta|put[oa]|putaria|puteiro)\b",
            r"\b(fdp|filho da puta|filha da puta|fda puta)\b",
            r"\b(fod[ea]|foder|fodido|vai se fod[ea]r)\b",
            r"\b(corno|corna|chifr[uda]|chifrudo)\b",
            r"\b(caralh[oa]|pqp|puta que pariu)\b",
            r"\b(buceta|xoxota|xana|racha|pepeca)\b",
            r"\b(pau|pinto|p[ií]ca|rola|c[aá]ralho)\b",
            r"\b(cu|[aâ]nus|bunda|rabo)\b",
            r"\b(puta merda|cacete|caraio|krl|krlo)\b",
            r"\b(vsf|vai tomar no [cú]|vai se ferrar)\b",
            r"\b(pqp|ptqp|poha|porra nenhuma)\b",
        ],
    ),
    (
        "homophobia",
        &[
            r"\b(viado|viada|bicha|baitola|maricas)\b",
            r"\b(fresco|frutinha|boiola|gay de araque)\b",
            r"\b(gay|lésbica|travesti|trans).*(lixo|nojo|imundo|anormal)\b",
            r"\b(sapat[ãa]o|machorra|caminhoneira)\b",
            r"\b(paneleiro|veado|invertido)\b",
        ],
    ),
    (
        "racism",
        &[
            // animalizing terms
            r"\b(macac[oa]|chimpanz[eé]|chipanz[eé]|gorila|s[ií]mio|primata)\b",
            r"\b(preto|negro|negra|pardo).*(sujo|fedido|macaco|chimpanzé)\b",
            r"\b(preto|negro).*(ladrão|bandido|vagabundo)\b",
            r"\b(crioulo|criola|nego|nega).*(safado|vagabundo)\b",
            r"\b(volta.*(África|senzala|tronco))\b",
            // directed at the reader
            r"\b(você|tu|vc|voce|v[cç]).*(é|e|eh).*(macaco|chimpanz|chipanz|gorila|símio|primata)\b",
            r"\b(seu|sua|teu|tua).*(macaco|chimpanz|chipanz|gorila|símio|primata)\b",
            r"\b(parece|igual|tipo|nem parece).*(macaco|chimpanz|gorila|símio)\b",
            r"\b(voce|vc).*(e|eh).*(macaco|gorila|simio)\b",
            r"\b(escravo|escrava|senzala|chibata)\b",
            r"\b(cor de (bosta|cocô|carvão))\b",
        ],
    ),
    (
        "misogyny",
        &[
            r"\b(mulher|feminista).*(burra|idiota|vadia|piranha)\b",
            r"\b(puta|vadia|piranha|galinha|vagabunda|safada)\b",
            r"\b(rapariga|quenga|prostituta|rameira)\b",
            r"\b(vagabunda|sem vergonha|oferecida|cachorra)\b",
            r"\b(mulher.*(lugar|cozinha|tanque|fogão))\b",
            r"\b(vaca|égua|cadela|cabra)\b",
        ],
    ),
    (
        "threats",
        &[
            r"\b(vou te (matar|socar|bater|esfaquear|quebrar|acabar))\b",
            r"\b(vai morrer|vou te pegar|vai se arrepender|vai se foder)\b",
            r"\b(te quebro|te arrebento|te acabo|te destruo)\b",
            r"\b(toma cuidado|fica esperto|você vai ver|vai ter problema)\b",
            r"\b(vou mandar|vou chamar|vou denunciar).*(mat[aá]r|bater)\b",
        ],
    ),
    (
        "general_offense",
        &[
            r"\b(vai.*(inferno|morrer|explodir|desgraça))\b",
            r"\b(toma no.*(cu|[aâ]nus|rabo|bunda))\b",
            r"\b(enfia no.*(cu|[aâ]nus|rabo))\b",
            r"\b(cala.*(boca|matraca|a boca))\b",
            r"\b(se mata|vai morrer|morre logo)\b",
            r"\b(nojento|asqueroso|repugnante|abominável)\b",
            r"\b(come merda|chupa rola|mama aqui)\b",
        ],
    ),
];

/// A single compiled matching expression
#[derive(Debug, Clone)]
pub struct Rule {
    source: String,
    regex: Regex,
}

impl Rule {
    /// Compile a rule. Matching is case-insensitive.
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::catalog(format!("failed to compile rule '{}': {}", source, e)))?;

        Ok(Self { source, regex })
    }

    /// Pattern source this rule was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of non-overlapping occurrences in `text`
    pub fn occurrences(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }
}

/// A named group of rules
#[derive(Debug, Clone)]
pub struct Category {
    id: String,
    rules: Vec<Rule>,
}

impl Category {
    /// Build a category, compiling every pattern.
    ///
    /// Fails on the first pattern that does not compile.
    pub fn new<I, S>(id: impl Into<String>, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::catalog("category identifier must not be empty"));
        }

        let rules = patterns
            .into_iter()
            .map(|pattern| match Rule::new(pattern) {
                Err(Error::Catalog(msg)) => {
                    Err(Error::catalog(format!("category '{}': {}", id, msg)))
                }
                other => other,
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { id, rules })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Total occurrences of all rules of this category in `text`
    pub fn occurrences(&self, text: &str) -> usize {
        self.rules.iter().map(|rule| rule.occurrences(text)).sum()
    }
}

/// Immutable, ordered set of toxicity categories
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    version: String,
    categories: Vec<Category>,
}

impl PatternCatalog {
    /// Compile the built-in Portuguese catalog
    pub fn builtin() -> Result<Self> {
        let catalog = Self::from_definitions(
            CATALOG_VERSION,
            BUILTIN_CATEGORIES
                .iter()
                .map(|(id, patterns)| (*id, patterns.iter().copied())),
        )?;

        tracing::debug!(
            version = CATALOG_VERSION,
            categories = catalog.categories.len(),
            rules = catalog.rule_count(),
            "compiled built-in pattern catalog"
        );

        Ok(catalog)
    }

    /// Compile a catalog from `(category, patterns)` definitions.
    ///
    /// Category identifiers must be unique.
    pub fn from_definitions<D, K, I, S>(version: impl Into<String>, definitions: D) -> Result<Self>
    where
        D: IntoIterator<Item = (K, I)>,
        K: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories: Vec<Category> = Vec::new();

        for (id, patterns) in definitions {
            let id = id.into();
            if categories.iter().any(|c| c.id == id) {
                return Err(Error::catalog(format!("duplicate category '{}'", id)));
            }
            categories.push(Category::new(id, patterns)?);
        }

        Ok(Self {
            version: version.into(),
            categories,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Categories in evaluation order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by identifier
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Total number of rules across all categories
    pub fn rule_count(&self) -> usize {
        self.categories.iter().map(|c| c.rules.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_compiles() {
        let catalog = PatternCatalog::builtin().unwrap();

        let ids: Vec<_> = catalog.categories().iter().map(|c| c.id()).collect();
        assert_eq!(
            ids,
            vec![
                "insults",
                "profanity",
                "homophobia",
                "racism",
                "misogyny",
                "threats",
                "general_offense"
            ]
        );
        assert_eq!(catalog.version(), CATALOG_VERSION);
        assert_eq!(catalog.rule_count(), 61);
    }

    #[test]
    fn test_malformed_rule_fails_at_build() {
        let err = PatternCatalog::from_definitions(
            "test",
            vec![("insults", vec![r"\b(idiota\b"])],
        )
        .unwrap_err();

        assert!(matches!(err, Error::Catalog(_)));
        assert!(err.to_string().contains("insults"));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let err = PatternCatalog::from_definitions(
            "test",
            vec![("spam", vec!["a"]), ("spam", vec!["b"])],
        )
        .unwrap_err();

        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rule_counts_every_occurrence() {
        let rule = Rule::new(r"\b(idiota|imbecil)\b").unwrap();
        assert_eq!(rule.occurrences("idiota e imbecil, muito idiota"), 3);
        assert_eq!(rule.occurrences("idiotas"), 0);
        assert_eq!(rule.occurrences("IDIOTA"), 1);
        assert_eq!(rule.source(), r"\b(idiota|imbecil)\b");
    }

    #[test]
    fn test_unicode_word_boundaries() {
        let catalog = PatternCatalog::builtin().unwrap();
        let insults = catalog.category("insults").unwrap();

        assert_eq!(insults.occurrences("que estúpido"), 1);
        assert_eq!(insults.occurrences("isso é inútil"), 1);
        // "cu" must not match inside other words
        assert_eq!(insults.occurrences("circuito acumulado"), 0);
    }
}
