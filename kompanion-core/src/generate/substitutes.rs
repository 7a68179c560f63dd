//! Ingredient substitution suggestions.

use std::fmt::Write as _;

use crate::taxonomy;

use super::non_blank;

/// Where a substitute list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstituteSource {
    /// Exact table key.
    Exact,
    /// First table key overlapping the ingredient as a substring.
    Partial,
    /// Nothing matched; generic advice.
    Generic,
}

/// Look up substitutes for `ingredient` (normalised: lowercased, trimmed).
#[must_use]
pub fn lookup_substitutes(ingredient: &str) -> (SubstituteSource, &'static [&'static str]) {
    let normalized = ingredient.trim().to_lowercase();
    if let Some(subs) = taxonomy::substitutes_for(&normalized) {
        return (SubstituteSource::Exact, subs);
    }
    if let Some(subs) = taxonomy::partial_substitutes_for(&normalized) {
        return (SubstituteSource::Partial, subs);
    }
    (SubstituteSource::Generic, taxonomy::GENERIC_SUBSTITUTES)
}

/// Render substitution suggestions. `ingredient` is echoed as given.
#[must_use]
pub fn substitute_suggestions(ingredient: &str, recipe: Option<&str>) -> String {
    let (_, substitutes) = lookup_substitutes(ingredient);

    let mut out = String::new();
    let _ = write!(out, "Substitutions for **{ingredient}**:\n\n");
    for (index, substitute) in substitutes.iter().enumerate() {
        let _ = writeln!(out, "{}. {substitute}", index + 1);
    }
    out.push('\n');

    if let Some(recipe) = non_blank(recipe) {
        let _ = writeln!(out, "Context: Works well in {recipe}");
    }

    out.push_str(
        "\nNote: Adjust proportions as needed. \
         Some substitutes may alter taste or texture slightly.",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn butter_exact() {
        assert_eq!(
            lookup_substitutes("butter"),
            (SubstituteSource::Exact, &["olive oil", "coconut oil", "margarine", "ghee"][..])
        );
    }

    #[test]
    fn normalises_before_lookup() {
        assert_eq!(lookup_substitutes("  Soy Sauce ").0, SubstituteSource::Exact);
    }

    #[test]
    fn partial_then_generic() {
        assert_eq!(lookup_substitutes("whole milk").0, SubstituteSource::Partial);
        let (source, subs) = lookup_substitutes("saffron");
        assert_eq!(source, SubstituteSource::Generic);
        assert_eq!(subs.len(), 3);
    }

    #[test]
    fn recipe_context_line() {
        let with = substitute_suggestions("Eggs", Some("banana bread"));
        assert!(with.starts_with("Substitutions for **Eggs**:\n\n1. flax eggs"));
        assert!(with.contains("\nContext: Works well in banana bread\n"));

        let without = substitute_suggestions("Eggs", Some(""));
        assert!(!without.contains("Context:"));
    }
}
