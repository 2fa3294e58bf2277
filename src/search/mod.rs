//! Related-recipe search for VeganChef.
//!
//! This module provides:
//! * [`RecipeSearch`]: async trait implemented by all search backends.
//! * [`SpoonacularClient`]: Spoonacular-compatible `complexSearch` backend
//!   with the vegan diet filter applied.
//! * [`RelatedRecipe`]: one search hit plus its display helpers.
//! * [`SearchError`]: error variants for search calls.
//!
//! Search failure is never escalated by the orchestrator; it only produces
//! an empty related-recipe list.

pub mod client;
pub mod recipe;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{RecipeSearch, SearchError, SpoonacularClient};
pub use recipe::RelatedRecipe;
