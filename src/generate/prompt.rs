//! Prompt builder for vegan recipe generation.
//!
//! [`PromptBuilder`] turns the raw user query (plus any compliance findings)
//! into the single instruction string sent to the text-generation service.
//! It is a pure, total function of its inputs: every query produces a prompt,
//! and the same query always produces the same prompt.
//!
//! Callers are responsible for rejecting empty input *before* building: the
//! orchestrator does this in its first step.

// ---------------------------------------------------------------------------
// Instruction template
// ---------------------------------------------------------------------------

/// Fixed preamble: plant-based-only mandate plus the substitution rule.
const INSTRUCTION_PREAMBLE: &str = "\
You are a helpful vegan recipe assistant. Always create plant-based recipes only.
If any non-vegan ingredients are mentioned, substitute them with plant-based
alternatives instead of refusing, and explain the substitutions at the end.";

/// Fixed response-shape request appended after the query.
const RESPONSE_SHAPE: &str = "\
Respond with: dish name, a short description, preparation and cooking time,
servings, an ingredient list, numbered steps, and optional tips or nutrition
notes.";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds the generation instruction for one submission.
///
/// ```rust
/// use veganchef::generate::PromptBuilder;
///
/// let builder = PromptBuilder::new();
/// let prompt = builder.build("pasta with chicken", &["chicken".to_string()]);
/// assert!(prompt.contains("\"pasta with chicken\""));
/// assert!(prompt.contains("chicken"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the generation prompt for `query`.
    ///
    /// Structure (in order):
    /// 1. Plant-based mandate + substitution rule.
    /// 2. The raw query, embedded verbatim in quotes.
    /// 3. When `flagged` is non-empty, an explicit list of the non-vegan
    ///    items that must be substituted.
    /// 4. The structured response shape request.
    pub fn build(&self, query: &str, flagged: &[String]) -> String {
        let mut prompt = String::with_capacity(512);
        prompt.push_str(INSTRUCTION_PREAMBLE);
        prompt.push_str("\n\n");
        prompt.push_str(&format!(
            "Create a recipe using the following: \"{query}\".\n"
        ));
        if !flagged.is_empty() {
            prompt.push_str(&format!(
                "The request mentions these non-vegan items: {}. Replace each one \
                 with a plant-based substitute in the final recipe.\n",
                flagged.join(", ")
            ));
        }
        prompt.push('\n');
        prompt.push_str(RESPONSE_SHAPE);
        prompt
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
