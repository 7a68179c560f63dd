//! Recipe suggestions from a free-text ingredient list.

use std::fmt::Write as _;

use tracing::debug;

use crate::classifier::{self, PrimaryCategory};
use crate::parser;
use crate::taxonomy;
use crate::types::RecipeTemplate;

use super::non_blank;

/// Number of recipes suggested per request.
pub const MAX_SUGGESTIONS: usize = 3;

/// A selected template plus the parsed tokens it mentions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSuggestion {
    /// The template, in table order.
    pub template: &'static RecipeTemplate,
    /// Parsed ingredient tokens found in the name or description, in parse order.
    pub uses: Vec<String>,
}

/// Pick recipes for `ingredients` without rendering them.
///
/// Ranking is the static table order; match quality never reorders results.
#[must_use]
pub fn select_recipes(ingredients: &str) -> (PrimaryCategory, Vec<RecipeSuggestion>) {
    let tokens = parser::parse_ingredients(ingredients);
    let category = classifier::identify_primary_category(&tokens);
    debug!(%category, tokens = tokens.len(), "Primary category resolved");

    let suggestions = taxonomy::templates_or_default(category.template_key())
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|template| RecipeSuggestion {
            template,
            uses: tokens
                .iter()
                .filter(|token| template.mentions(token))
                .cloned()
                .collect(),
        })
        .collect();

    (category, suggestions)
}

/// Render recipe suggestions as display text.
#[must_use]
pub fn recipe_suggestions(ingredients: &str, preferences: Option<&str>) -> String {
    let (_, suggestions) = select_recipes(ingredients);

    let mut out = String::from("Based on your ingredients, here are 3 recipe suggestions:\n\n");
    for (index, suggestion) in suggestions.iter().enumerate() {
        let t = suggestion.template;
        let _ = writeln!(out, "{}. **{}**", index + 1, t.name);
        let _ = writeln!(out, "   {}", t.description);
        let _ = writeln!(out, "   Cooking time: {} minutes", t.cooking_time_minutes);
        let _ = writeln!(out, "   Method: {}", t.method);
        if !suggestion.uses.is_empty() {
            let _ = writeln!(out, "   Uses: {}", suggestion.uses.join(", "));
        }
        out.push('\n');
    }

    if let Some(prefs) = non_blank(preferences) {
        let _ = writeln!(out, "Note: Recipes can be adapted for {prefs} preferences.");
    }

    out.push_str("\nAI-powered suggestions based on your pantry.");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chicken_group_in_table_order() {
        let (category, picks) = select_recipes("Chicken, rice");
        assert_eq!(category, PrimaryCategory::Protein("chicken"));
        let names: Vec<_> = picks.iter().map(|s| s.template.name).collect();
        assert_eq!(
            names,
            ["Herb-Roasted Chicken", "Quick Chicken Stir-Fry", "Creamy Chicken Pasta"]
        );
        assert_eq!(picks[0].uses, ["chicken"]);
    }

    #[test]
    fn protein_without_group_uses_vegetables() {
        let (category, picks) = select_recipes("tofu, spinach");
        assert_eq!(category, PrimaryCategory::Protein("tofu"));
        assert_eq!(picks[0].template.name, "Roasted Vegetable Medley");
    }

    #[test]
    fn uses_line_lists_matches_in_parse_order() {
        let text = recipe_suggestions("garlic, pasta, olive oil", None);
        assert!(text.contains("   Uses: garlic, pasta, olive oil\n"));
    }

    #[test]
    fn blank_preferences_are_ignored() {
        assert!(!recipe_suggestions("beef", Some("   ")).contains("Note:"));
        assert!(
            recipe_suggestions("beef", Some("low-carb"))
                .contains("Note: Recipes can be adapted for low-carb preferences.\n")
        );
    }

    #[test]
    fn output_is_deterministic() {
        let a = recipe_suggestions("fish, lemon and herbs", Some("pescatarian"));
        let b = recipe_suggestions("fish, lemon and herbs", Some("pescatarian"));
        assert_eq!(a, b);
    }
}
