//! Ingredient-category and chat-intent classification.
//!
//! Both classifiers use plain substring containment against the static
//! keyword tables. Short keywords therefore match inside longer words
//! ("oats" in "goats"); this is deliberate and covered by tests.

use std::fmt;

use crate::taxonomy::{self, GRAIN, PROTEIN};

// ---------------------------------------------------------------------------
// Primary category
// ---------------------------------------------------------------------------

/// Dominant ingredient classification used to pick a recipe template group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimaryCategory {
    /// A protein keyword matched; carries the specific keyword (e.g. `"chicken"`).
    Protein(&'static str),
    /// A grain keyword matched.
    Grain,
    /// Nothing matched.
    Vegetable,
}

impl PrimaryCategory {
    /// Key into [`taxonomy::RECIPE_TEMPLATES`].
    ///
    /// Protein keys may have no template group (e.g. `"tofu"`); callers fall
    /// back via [`taxonomy::templates_or_default`].
    #[must_use]
    pub fn template_key(self) -> &'static str {
        match self {
            Self::Protein(keyword) => keyword,
            Self::Grain => taxonomy::GRAIN_TEMPLATE_KEY,
            Self::Vegetable => taxonomy::DEFAULT_TEMPLATE_KEY,
        }
    }
}

impl fmt::Display for PrimaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_key())
    }
}

/// Classify a parsed ingredient list.
///
/// Scans ingredients in order; for each one the protein set is checked before
/// the grain set, and the first hit ends the scan. So `["chicken", "rice"]`
/// is `Protein("chicken")` while `["rice", "chicken"]` is `Grain`.
#[must_use]
pub fn identify_primary_category<S: AsRef<str>>(ingredients: &[S]) -> PrimaryCategory {
    for ingredient in ingredients {
        let ingredient = ingredient.as_ref();
        if let Some(keyword) = PROTEIN.find_in(ingredient) {
            return PrimaryCategory::Protein(keyword);
        }
        if GRAIN.find_in(ingredient).is_some() {
            return PrimaryCategory::Grain;
        }
    }
    PrimaryCategory::Vegetable
}

// ---------------------------------------------------------------------------
// Chat intent
// ---------------------------------------------------------------------------

/// Chat intent bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatIntent {
    /// "How long do I cook/bake ..."
    CookingTime,
    /// Storing or keeping food.
    Storage,
    /// Substituting or replacing an ingredient.
    Substitution,
    /// Meal prep or meal planning.
    MealPlanning,
    /// Asking for a recipe.
    Recipe,
    /// A question or a plea for help.
    Capabilities,
    /// Anything else.
    Fallback,
}

/// An ordered `(predicate, intent)` pair. Predicates see lowercased text.
#[derive(Clone, Copy)]
pub struct IntentRule {
    /// Intent produced when the predicate holds.
    pub intent: ChatIntent,
    /// Predicate over the lowercased message.
    pub matches: fn(&str) -> bool,
}

impl fmt::Debug for IntentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentRule")
            .field("intent", &self.intent)
            .finish_non_exhaustive()
    }
}

/// Chat rules, evaluated top to bottom; first match wins.
pub const CHAT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: ChatIntent::CookingTime,
        matches: |m| m.contains("how long") && (m.contains("cook") || m.contains("bake")),
    },
    IntentRule {
        intent: ChatIntent::Storage,
        matches: |m| m.contains("store") || m.contains("keep"),
    },
    IntentRule {
        intent: ChatIntent::Substitution,
        matches: |m| m.contains("substitute") || m.contains("replace"),
    },
    IntentRule {
        intent: ChatIntent::MealPlanning,
        matches: |m| m.contains("meal prep") || m.contains("meal plan"),
    },
    IntentRule {
        intent: ChatIntent::Recipe,
        matches: |m| m.contains("recipe"),
    },
    IntentRule {
        intent: ChatIntent::Capabilities,
        matches: |m| m.contains('?') || m.contains("help"),
    },
];

/// Classify a chat message.
#[must_use]
pub fn classify_chat(message: &str) -> ChatIntent {
    let lower = message.to_lowercase();
    CHAT_RULES
        .iter()
        .find(|rule| (rule.matches)(&lower))
        .map_or(ChatIntent::Fallback, |rule| rule.intent)
}
