//! Recipe acquisition pipeline for VeganChef.
//!
//! This module wires the full query → compliance scan → prompt → services →
//! artifact pipeline and defines the artifact returned to renderers.
//!
//! # Architecture
//!
//! ```text
//! acquire(query)
//!   ├─ reject trimmed-empty input              → Err(AcquireError::EmptyInput)
//!   ├─ ComplianceScanner::scan(query)          → warnings
//!   ├─ PromptBuilder::build(query, warnings)   → prompt
//!   ├─ tokio::join!(
//!   │      RecipeGenerator::generate(prompt),    ── may fail: placeholder
//!   │      RecipeSearch::search(query, cap),     ── may fail: empty list
//!   │  )                                         both always awaited
//!   └─ RecipeArtifact { narrative, related, warnings, degradations }
//! ```
//!
//! The two service calls are independent: one failing must never prevent the
//! other's result from being surfaced.  Network errors never cross the
//! `acquire` boundary as `Err`: the only `Err` is `EmptyInput`.

pub mod orchestrator;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use orchestrator::{
    AcquireError, Degradation, RecipeArtifact, RecipeOrchestrator, UNAVAILABLE_NARRATIVE,
};
