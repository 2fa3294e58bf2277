//! Recipe text generation for VeganChef.
//!
//! This module provides:
//! * [`RecipeGenerator`]: async trait implemented by all generation backends.
//! * [`ChatCompletionsGenerator`]: OpenAI-compatible REST API backend.
//! * [`PromptBuilder`]: builds the vegan-recipe generation instruction.
//! * [`GenerationError`]: error variants for generation calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use veganchef::config::AppConfig;
//! use veganchef::generate::{ChatCompletionsGenerator, PromptBuilder, RecipeGenerator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let generator = ChatCompletionsGenerator::from_config(&config.generation);
//!
//!     let prompt = PromptBuilder::new().build("tomatoes, basil, pasta", &[]);
//!     match generator.generate(&prompt).await {
//!         Ok(narrative) => println!("{narrative}"),
//!         Err(e) => eprintln!("generation failed: {e}"),
//!     }
//! }
//! ```

pub mod client;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{ChatCompletionsGenerator, GenerationError, RecipeGenerator};
pub use prompt::PromptBuilder;
