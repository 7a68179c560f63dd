//! Core data types shared across the generation pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a recipe is cooked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingMethod {
    /// Baked or roasted.
    Oven,
    /// Pan, pot or wok on the hob.
    Stovetop,
    /// Low and slow in a slow cooker.
    SlowCooker,
}

impl CookingMethod {
    /// Display text used in generated responses.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Oven => "oven",
            Self::Stovetop => "stovetop",
            Self::SlowCooker => "slow cooker",
        }
    }
}

impl fmt::Display for CookingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A static recipe entry, grouped by primary category in
/// [`crate::taxonomy::RECIPE_TEMPLATES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecipeTemplate {
    /// Recipe title.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Nominal cooking time in minutes (always positive).
    pub cooking_time_minutes: u32,
    /// Cooking method.
    pub method: CookingMethod,
}

impl RecipeTemplate {
    /// Build a template. Used by the static tables.
    #[must_use]
    pub const fn new(
        name: &'static str,
        description: &'static str,
        cooking_time_minutes: u32,
        method: CookingMethod,
    ) -> Self {
        Self {
            name,
            description,
            cooking_time_minutes,
            method,
        }
    }

    /// Whether `token` occurs in the lowercased name or description.
    #[must_use]
    pub fn mentions(&self, token: &str) -> bool {
        self.description.to_lowercase().contains(token) || self.name.to_lowercase().contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display_text() {
        assert_eq!(CookingMethod::Oven.to_string(), "oven");
        assert_eq!(CookingMethod::Stovetop.to_string(), "stovetop");
        assert_eq!(CookingMethod::SlowCooker.to_string(), "slow cooker");
    }

    #[test]
    fn mentions_is_case_insensitive_substring() {
        let t = RecipeTemplate::new(
            "Herb-Roasted Chicken",
            "Juicy chicken with aromatic herbs",
            45,
            CookingMethod::Oven,
        );
        assert!(t.mentions("chicken"));
        assert!(t.mentions("herb"));
        assert!(!t.mentions("beef"));
    }
}
