//! The `RelatedRecipe` result type and its display helpers.
//!
//! A `RelatedRecipe` is sourced entirely from the search service and never
//! mutated locally: the helpers here produce *derived display strings*
//! (HTML-stripped truncated summary, public source URL) without touching the
//! stored fields.

use serde::{Deserialize, Serialize};

/// Maximum summary length (in characters) shown by renderers.
const SUMMARY_DISPLAY_CHARS: usize = 150;

// ---------------------------------------------------------------------------
// RelatedRecipe
// ---------------------------------------------------------------------------

/// One hit from the recipe-search service.
///
/// `id` is unique within a single result set, not globally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedRecipe {
    pub id: u64,
    pub title: String,
    /// Total time in minutes, when the service reports it.
    #[serde(rename = "readyInMinutes", default)]
    pub ready_in_minutes: Option<u32>,
    /// Short HTML summary, when the service reports it.
    #[serde(default)]
    pub summary: Option<String>,
}

impl RelatedRecipe {
    /// Summary prepared for display: HTML tags stripped, truncated to 150
    /// characters with a trailing ellipsis.  `None` when the service sent no
    /// summary or it was empty after stripping.
    pub fn display_summary(&self) -> Option<String> {
        let raw = self.summary.as_deref()?;
        let text = strip_html(raw);
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut out: String = text.chars().take(SUMMARY_DISPLAY_CHARS).collect();
        if text.chars().count() > SUMMARY_DISPLAY_CHARS {
            out.push_str("...");
        }
        Some(out)
    }

    /// Public page for this recipe, in the service's `{kebab-title}-{id}`
    /// URL scheme.
    pub fn source_url(&self) -> String {
        format!(
            "https://spoonacular.com/recipes/{}-{}",
            slugify(&self.title),
            self.id
        )
    }
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Remove `<...>` tag runs.  Unterminated tags swallow the remainder, which
/// matches how truncated upstream summaries are best rendered.
fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Lowercase, alphanumeric runs joined by single dashes, no leading or
/// trailing dash.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_dash = true; // suppress a leading dash
    for c in title.chars() {
        let lc = c.to_ascii_lowercase();
        if lc.is_ascii_alphanumeric() {
            slug.push(lc);
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: u64, title: &str, summary: Option<&str>) -> RelatedRecipe {
        RelatedRecipe {
            id,
            title: title.into(),
            ready_in_minutes: Some(30),
            summary: summary.map(|s| s.to_string()),
        }
    }

    // ---- Deserialization ----

    #[test]
    fn deserializes_service_wire_shape() {
        let json = r#"{
            "id": 123456,
            "title": "Vegan Buddha Bowl",
            "readyInMinutes": 30,
            "summary": "A nutritious bowl"
        }"#;
        let r: RelatedRecipe = serde_json::from_str(json).unwrap();
        assert_eq!(r.id, 123456);
        assert_eq!(r.title, "Vegan Buddha Bowl");
        assert_eq!(r.ready_in_minutes, Some(30));
        assert_eq!(r.summary.as_deref(), Some("A nutritious bowl"));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let json = r#"{ "id": 1, "title": "Soup" }"#;
        let r: RelatedRecipe = serde_json::from_str(json).unwrap();
        assert_eq!(r.ready_in_minutes, None);
        assert_eq!(r.summary, None);
    }

    // ---- display_summary ----

    #[test]
    fn display_summary_strips_html() {
        let r = recipe(1, "Soup", Some("A <b>rich</b> and <i>creamy</i> soup"));
        assert_eq!(r.display_summary().as_deref(), Some("A rich and creamy soup"));
    }

    #[test]
    fn display_summary_truncates_long_text() {
        let long = "x".repeat(400);
        let r = recipe(1, "Soup", Some(&long));
        let shown = r.display_summary().unwrap();
        assert_eq!(shown.chars().count(), 153); // 150 + "..."
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn display_summary_none_when_absent_or_empty() {
        assert!(recipe(1, "Soup", None).display_summary().is_none());
        assert!(recipe(1, "Soup", Some("<p></p>")).display_summary().is_none());
    }

    // ---- source_url ----

    #[test]
    fn source_url_uses_kebab_title_and_id() {
        let r = recipe(345678, "Vegan Pasta Primavera", None);
        assert_eq!(
            r.source_url(),
            "https://spoonacular.com/recipes/vegan-pasta-primavera-345678"
        );
    }

    #[test]
    fn source_url_collapses_punctuation() {
        let r = recipe(7, "Mac & Cheese (Vegan!)", None);
        assert_eq!(
            r.source_url(),
            "https://spoonacular.com/recipes/mac-cheese-vegan-7"
        );
    }
}
