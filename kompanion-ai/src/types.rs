//! Request and backend identity types.

use std::fmt;
use std::time::Duration;

use kompanion_core::config::LatencyConfig;
use kompanion_core::generate;

/// Identifier of a scheduled delivery.
pub type RequestId = u64;

/// Which request family an [`AiRequest`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Recipe suggestions.
    Recipes,
    /// Grocery list.
    GroceryList,
    /// Ingredient substitutes.
    Substitutes,
    /// Free-form chat.
    Chat,
}

impl RequestKind {
    /// Simulated processing time for this kind.
    #[must_use]
    pub fn latency(self, config: &LatencyConfig) -> Duration {
        match self {
            Self::Recipes => config.recipes(),
            Self::GroceryList => config.grocery(),
            Self::Substitutes => config.substitutes(),
            Self::Chat => config.chat(),
        }
    }

    /// Prefix of the error message delivered when generation fails.
    #[must_use]
    pub fn failure_prefix(self) -> &'static str {
        match self {
            Self::Recipes => "Failed to generate recipe suggestions",
            Self::GroceryList => "Failed to generate grocery list",
            Self::Substitutes => "Failed to generate substitutes",
            Self::Chat => "Failed to process message",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Recipes => "recipes",
            Self::GroceryList => "grocery_list",
            Self::Substitutes => "substitutes",
            Self::Chat => "chat",
        };
        f.write_str(name)
    }
}

/// A request with its owned inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiRequest {
    /// Suggest recipes for a free-text ingredient list.
    Recipes {
        /// Comma/semicolon/newline/"and"-separated ingredients.
        ingredients: String,
        /// Optional dietary preferences.
        preferences: Option<String>,
    },
    /// Build a grocery list.
    GroceryList {
        /// Free-text pantry contents.
        pantry_items: String,
        /// Meal plan, echoed verbatim in the header.
        meal_plan: String,
    },
    /// Suggest substitutes for one ingredient.
    Substitutes {
        /// The ingredient to replace.
        ingredient: String,
        /// Optional recipe context.
        recipe: Option<String>,
    },
    /// Free-form chat.
    Chat {
        /// The user's message.
        message: String,
        /// Optional conversation context.
        context: Option<String>,
    },
}

impl AiRequest {
    /// Request family.
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Recipes { .. } => RequestKind::Recipes,
            Self::GroceryList { .. } => RequestKind::GroceryList,
            Self::Substitutes { .. } => RequestKind::Substitutes,
            Self::Chat { .. } => RequestKind::Chat,
        }
    }

    /// Run the rule-based generator for this request.
    #[must_use]
    pub fn generate_rule_based(&self) -> String {
        match self {
            Self::Recipes { ingredients, preferences } => {
                generate::recipe_suggestions(ingredients, preferences.as_deref())
            }
            Self::GroceryList { pantry_items, meal_plan } => {
                generate::grocery_list(pantry_items, meal_plan)
            }
            Self::Substitutes { ingredient, recipe } => {
                generate::substitute_suggestions(ingredient, recipe.as_deref())
            }
            Self::Chat { message, context } => generate::chat_response(message, context.as_deref()),
        }
    }
}

/// Concrete backend variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Keyword tables and templates.
    RuleBased,
    /// An on-device model loaded through a `ModelLoader`.
    LocalModel,
}

impl BackendKind {
    /// Human-readable label for status displays.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::RuleBased => "Mock AI (Rule-based)",
            Self::LocalModel => "Real LLM",
        }
    }
}

/// Label shown before any backend has been created.
pub const NOT_INITIALIZED_LABEL: &str = "Not initialized";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_latencies() {
        let config = LatencyConfig::default();
        assert_eq!(RequestKind::Recipes.latency(&config), Duration::from_millis(1200));
        assert_eq!(RequestKind::GroceryList.latency(&config), Duration::from_millis(1000));
        assert_eq!(RequestKind::Substitutes.latency(&config), Duration::from_millis(800));
        assert_eq!(RequestKind::Chat.latency(&config), Duration::from_millis(900));
    }

    #[test]
    fn request_dispatches_to_generator() {
        let req = AiRequest::Substitutes {
            ingredient: "butter".into(),
            recipe: None,
        };
        assert_eq!(req.kind(), RequestKind::Substitutes);
        assert!(req.generate_rule_based().contains("1. olive oil\n"));
    }
}
