//! Compliance scanning: flags non-vegan ingredient terms in free text.
//!
//! [`ComplianceScanner`] is a pure classifier: it takes the raw user query
//! and returns the ordered list of disallowed terms it contains.  The result
//! feeds two consumers: the warning banner shown by the renderer, and the
//! substitution note embedded in the generation prompt.
//!
//! Matching is **boundary-aware**: a term only matches as a whole word (or,
//! for multi-word terms such as `"ice cream"`, as a contiguous run of whole
//! words).  `"eggplant"` therefore never triggers the `"egg"` term.

// ---------------------------------------------------------------------------
// Canonical term list
// ---------------------------------------------------------------------------

/// The canonical disallowed-term list, in report order.
///
/// Covers dairy, eggs, meat, fish/seafood and common derivative products.
/// Multi-word entries match as contiguous phrases.
pub const DISALLOWED_TERMS: &[&str] = &[
    "milk",
    "cheese",
    "butter",
    "yogurt",
    "yoghurt",
    "cream",
    "sour cream",
    "egg",
    "eggs",
    "honey",
    "meat",
    "chicken",
    "turkey",
    "duck",
    "beef",
    "pork",
    "lamb",
    "fish",
    "salmon",
    "tuna",
    "shrimp",
    "crab",
    "lobster",
    "gelatin",
    "gelatine",
    "lard",
    "mayonnaise",
    "mayo",
    "bacon",
    "ham",
    "sausage",
    "pepperoni",
    "anchovies",
    "worcestershire",
    "caesar dressing",
    "ranch dressing",
    "ice cream",
    "whey",
    "casein",
];

// ---------------------------------------------------------------------------
// ComplianceFinding
// ---------------------------------------------------------------------------

/// Ordered sequence of matched disallowed terms.
///
/// Empty means "fully compliant".  Order follows the canonical term list,
/// not the order of appearance in the input.
pub type ComplianceFinding = Vec<String>;

/// Render a finding as the user-facing warning banner, or `None` when the
/// query is fully compliant.
pub fn warning_message(finding: &[String]) -> Option<String> {
    if finding.is_empty() {
        return None;
    }
    Some(format!(
        "Non-vegan ingredients found: {}. Consider plant-based alternatives!",
        finding.join(", ")
    ))
}

// ---------------------------------------------------------------------------
// ComplianceScanner
// ---------------------------------------------------------------------------

/// Pure, deterministic scanner for disallowed ingredient terms.
///
/// ```rust
/// use veganchef::compliance::ComplianceScanner;
///
/// let scanner = ComplianceScanner::new();
/// assert_eq!(scanner.scan("pasta with chicken"), vec!["chicken"]);
/// // Substring of an unrelated word must NOT be flagged.
/// assert!(scanner.scan("grilled eggplant").is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ComplianceScanner {
    terms: Vec<String>,
}

impl ComplianceScanner {
    /// Scanner over the canonical [`DISALLOWED_TERMS`] list.
    pub fn new() -> Self {
        Self::with_terms(DISALLOWED_TERMS.iter().map(|t| t.to_string()).collect())
    }

    /// Scanner over a custom term list.
    ///
    /// Terms are lowercased on construction; report order follows the order
    /// of `terms`.
    pub fn with_terms(terms: Vec<String>) -> Self {
        Self {
            terms: terms.into_iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Scan `query` and return every disallowed term it contains, in
    /// canonical list order.  Each term is reported at most once.
    ///
    /// Never fails; empty or unknown input yields an empty finding.
    pub fn scan(&self, query: &str) -> ComplianceFinding {
        let words = tokenize(query);

        self.terms
            .iter()
            .filter(|term| matches_term(&words, term))
            .cloned()
            .collect()
    }
}

impl Default for ComplianceScanner {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Matching helpers
// ---------------------------------------------------------------------------

/// Split text into lowercase alphanumeric words.  Punctuation and whitespace
/// are word boundaries; hyphenated compounds split into their parts.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// True when `term` (one or more words) occurs as a contiguous run of whole
/// words in `words`.
fn matches_term(words: &[String], term: &str) -> bool {
    let term_words: Vec<&str> = term.split_whitespace().collect();
    if term_words.is_empty() || words.len() < term_words.len() {
        return false;
    }
    words
        .windows(term_words.len())
        .any(|win| win.iter().map(String::as_str).eq(term_words.iter().copied()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
