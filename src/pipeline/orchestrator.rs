//! Recipe orchestrator: drives the two external services to a single artifact.
//!
//! [`RecipeOrchestrator`] owns the pure front half of the pipeline (scanner
//! and prompt builder) and the two service handles.  [`acquire`] performs one
//! complete submission; the caller is responsible for not issuing a second
//! `acquire` while one is outstanding (disable the submit affordance while
//! loading).
//!
//! [`acquire`]: RecipeOrchestrator::acquire

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::compliance::{ComplianceFinding, ComplianceScanner};
use crate::generate::{PromptBuilder, RecipeGenerator};
use crate::search::{RecipeSearch, RelatedRecipe};

// ---------------------------------------------------------------------------
// AcquireError
// ---------------------------------------------------------------------------

/// The only fatal condition for one `acquire` call.
///
/// Every service-level failure is absorbed into the artifact as a
/// [`Degradation`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    /// The query was empty after trimming; no service was contacted.
    #[error("please enter some ingredients or a dish idea first")]
    EmptyInput,
}

// ---------------------------------------------------------------------------
// Degradation
// ---------------------------------------------------------------------------

/// Non-fatal conditions recorded on the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// The text-generation service failed; the narrative is a placeholder.
    GenerationFailed(String),
    /// The search service failed; the related list is empty.
    SearchFailed(String),
    /// The search service succeeded but matched nothing.
    SearchEmpty,
}

// ---------------------------------------------------------------------------
// RecipeArtifact
// ---------------------------------------------------------------------------

/// Placeholder narrative used when the generation service is unavailable.
pub const UNAVAILABLE_NARRATIVE: &str =
    "Recipe generation is unavailable right now. Please try again in a moment.";

/// The full result of one submission.
///
/// `warnings` always equals the compliance finding computed from the query
/// that produced the artifact.  `related` ids are unique within the artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeArtifact {
    /// Generated recipe text, or [`UNAVAILABLE_NARRATIVE`] when degraded.
    pub narrative: String,
    /// Related recipes from the search service, possibly empty.
    pub related: Vec<RelatedRecipe>,
    /// Non-vegan terms found in the query.
    pub warnings: ComplianceFinding,
    /// Service-level conditions absorbed during acquisition.
    pub degradations: Vec<Degradation>,
}

impl RecipeArtifact {
    /// True when the generation service did not produce a real narrative.
    pub fn narrative_is_placeholder(&self) -> bool {
        self.degradations
            .iter()
            .any(|d| matches!(d, Degradation::GenerationFailed(_)))
    }

    /// True when any service-level condition was recorded.
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// RecipeOrchestrator
// ---------------------------------------------------------------------------

/// Coordinates one submission across both external services.
///
/// Create with [`RecipeOrchestrator::new`]; the scanner, prompt builder and
/// result cap have sensible defaults.
pub struct RecipeOrchestrator {
    scanner: ComplianceScanner,
    prompts: PromptBuilder,
    generator: Arc<dyn RecipeGenerator>,
    search: Arc<dyn RecipeSearch>,
    max_related: usize,
}

impl RecipeOrchestrator {
    /// Default cap on related-recipe results per submission.
    pub const DEFAULT_MAX_RELATED: usize = 3;

    /// Create an orchestrator over the two service handles.
    pub fn new(generator: Arc<dyn RecipeGenerator>, search: Arc<dyn RecipeSearch>) -> Self {
        Self {
            scanner: ComplianceScanner::new(),
            prompts: PromptBuilder::new(),
            generator,
            search,
            max_related: Self::DEFAULT_MAX_RELATED,
        }
    }

    /// Replace the default scanner (custom disallowed-term list).
    pub fn with_scanner(mut self, scanner: ComplianceScanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// Replace the default related-recipe cap.
    pub fn with_max_related(mut self, max_related: usize) -> Self {
        self.max_related = max_related;
        self
    }

    /// Screen `query` without contacting any service.
    ///
    /// Exposed so renderers can show the warning banner before (or without)
    /// a full acquisition.
    pub fn scan(&self, query: &str) -> ComplianceFinding {
        self.scanner.scan(query)
    }

    // -----------------------------------------------------------------------
    // acquire
    // -----------------------------------------------------------------------

    /// Perform one complete submission.
    ///
    /// The generation and search calls run concurrently; the artifact is
    /// assembled only after **both** have settled.  Either service failing
    /// degrades its half of the artifact and never aborts the other.
    ///
    /// # Errors
    ///
    /// [`AcquireError::EmptyInput`] when `query` trims to nothing: the only
    /// error this method returns.
    pub async fn acquire(&self, query: &str) -> Result<RecipeArtifact, AcquireError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AcquireError::EmptyInput);
        }

        let warnings = self.scanner.scan(query);
        if !warnings.is_empty() {
            log::debug!("orchestrator: non-vegan terms in query: {warnings:?}");
        }
        let prompt = self.prompts.build(query, &warnings);

        let (generation, search) = tokio::join!(
            self.generator.generate(&prompt),
            self.search.search(query, self.max_related),
        );

        let mut degradations = Vec::new();

        let narrative = match generation {
            Ok(text) => text,
            Err(e) => {
                log::warn!("orchestrator: generation failed ({e}), using placeholder narrative");
                degradations.push(Degradation::GenerationFailed(e.to_string()));
                UNAVAILABLE_NARRATIVE.to_string()
            }
        };

        let related = match search {
            Ok(items) => {
                if items.is_empty() {
                    log::debug!("orchestrator: search matched nothing");
                    degradations.push(Degradation::SearchEmpty);
                }
                dedup_by_id(items, self.max_related)
            }
            Err(e) => {
                log::warn!("orchestrator: search failed ({e}), related list is empty");
                degradations.push(Degradation::SearchFailed(e.to_string()));
                Vec::new()
            }
        };

        Ok(RecipeArtifact {
            narrative,
            related,
            warnings,
            degradations,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Keep the first occurrence of each id, preserving order, capped at `max`.
fn dedup_by_id(items: Vec<RelatedRecipe>, max: usize) -> Vec<RelatedRecipe> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len().min(max));
    for item in items {
        if out.len() == max {
            break;
        }
        if seen.insert(item.id) {
            out.push(item);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
