//! VeganChef: conversational vegan recipe orchestration engine.
//!
//! The engine turns a free-text ingredient list or dish idea (typed or
//! spoken) into a vegan recipe narrative plus related-recipe links, with an
//! optional narration loop.  Presentation is deliberately out of scope:
//! renderers (a web page, a TUI, the bundled CLI) call into the engine and
//! display whatever it returns.
//!
//! # Architecture
//!
//! ```text
//! typed input ─────────────┐
//! VoiceCaptureController ──┤ transcript
//!                          ▼
//!                 ComplianceScanner ── warnings ──┐
//!                          │                      │
//!                    PromptBuilder                │
//!                          │                      │
//!                 RecipeOrchestrator::acquire     │
//!                   ├─ RecipeGenerator  (may fail → placeholder)
//!                   └─ RecipeSearch     (may fail → empty list)
//!                          │                      │
//!                          ▼                      ▼
//!                       RecipeArtifact { narrative, related, warnings }
//!                          │
//!              SessionAggregator (conversation log)
//!                          │
//!              SpeechPlaybackController (optional narration,
//!                 networked provider with local fallback)
//! ```
//!
//! Both external services are unreliable by contract: either one failing
//! degrades its half of the artifact and never suppresses the other's
//! result.  The only fatal per-call condition is empty input.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use veganchef::config::AppConfig;
//! use veganchef::generate::ChatCompletionsGenerator;
//! use veganchef::pipeline::RecipeOrchestrator;
//! use veganchef::search::SpoonacularClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load().unwrap();
//!     let orchestrator = RecipeOrchestrator::new(
//!         Arc::new(ChatCompletionsGenerator::from_config(&config.generation)),
//!         Arc::new(SpoonacularClient::from_config(&config.search)),
//!     );
//!
//!     let artifact = orchestrator.acquire("pasta with basil").await.unwrap();
//!     println!("{}", artifact.narrative);
//! }
//! ```

pub mod compliance;
pub mod config;
pub mod generate;
pub mod pipeline;
pub mod search;
pub mod session;
pub mod voice;

// ---------------------------------------------------------------------------
// Crate-level re-exports
// ---------------------------------------------------------------------------

pub use compliance::{ComplianceFinding, ComplianceScanner};
pub use generate::PromptBuilder;
pub use pipeline::{AcquireError, RecipeArtifact, RecipeOrchestrator};
pub use search::RelatedRecipe;
pub use session::SessionAggregator;
pub use voice::{SpeechPlaybackController, VoiceCaptureController};
