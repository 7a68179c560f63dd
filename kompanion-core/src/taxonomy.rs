//! Static keyword taxonomy, recipe templates and substitution table.
//!
//! All tables are `'static` and read-only. Order is significant everywhere:
//! - keyword order decides which protein keyword is reported as the category,
//! - template order is the display/ranking order,
//! - substitution order decides which partial match wins and which
//!   alternative is preferred.

use crate::types::CookingMethod::{Oven, SlowCooker, Stovetop};
use crate::types::RecipeTemplate;

/// A named, ordered set of lowercase keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordSet {
    /// Set name ("protein", "vegetable", ...).
    pub name: &'static str,
    /// Keywords in table order.
    pub words: &'static [&'static str],
}

impl KeywordSet {
    /// Exact membership test.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word)
    }

    /// First keyword (in table order) that occurs as a substring of `text`.
    #[must_use]
    pub fn find_in(&self, text: &str) -> Option<&'static str> {
        self.words.iter().copied().find(|kw| text.contains(*kw))
    }

    /// Whether any item contains any keyword of this set.
    #[must_use]
    pub fn matches_any<S: AsRef<str>>(&self, items: &[S]) -> bool {
        items.iter().any(|item| self.find_in(item.as_ref()).is_some())
    }
}

/// Protein keywords.
pub const PROTEIN: KeywordSet = KeywordSet {
    name: "protein",
    words: &["chicken", "beef", "pork", "fish", "tofu", "eggs", "turkey", "lamb"],
};

/// Vegetable keywords.
pub const VEGETABLE: KeywordSet = KeywordSet {
    name: "vegetable",
    words: &[
        "tomato", "onion", "garlic", "pepper", "carrot", "broccoli", "spinach", "lettuce", "potato",
        "mushroom",
    ],
};

/// Grain keywords.
pub const GRAIN: KeywordSet = KeywordSet {
    name: "grain",
    words: &["rice", "pasta", "bread", "flour", "quinoa", "oats", "noodles"],
};

/// Dairy keywords.
pub const DAIRY: KeywordSet = KeywordSet {
    name: "dairy",
    words: &["milk", "cheese", "butter", "yogurt", "cream"],
};

/// Template key used for every grain match.
pub const GRAIN_TEMPLATE_KEY: &str = "pasta";

/// Template key used when nothing matches, and when a category has no templates.
pub const DEFAULT_TEMPLATE_KEY: &str = "vegetable";

/// Recipe templates keyed by primary category, in display order.
pub static RECIPE_TEMPLATES: &[(&str, &[RecipeTemplate])] = &[
    (
        "chicken",
        &[
            RecipeTemplate::new(
                "Herb-Roasted Chicken",
                "Juicy chicken with aromatic herbs and crispy skin",
                45,
                Oven,
            ),
            RecipeTemplate::new(
                "Quick Chicken Stir-Fry",
                "Asian-inspired stir-fry with fresh vegetables",
                20,
                Stovetop,
            ),
            RecipeTemplate::new(
                "Creamy Chicken Pasta",
                "Comfort food with rich cream sauce",
                30,
                Stovetop,
            ),
        ],
    ),
    (
        "beef",
        &[
            RecipeTemplate::new(
                "Classic Beef Stir-Fry",
                "Tender beef with colorful vegetables",
                25,
                Stovetop,
            ),
            RecipeTemplate::new(
                "Beef and Vegetable Stew",
                "Hearty slow-cooked comfort meal",
                120,
                SlowCooker,
            ),
            RecipeTemplate::new(
                "Quick Beef Tacos",
                "Easy weeknight dinner with bold flavors",
                20,
                Stovetop,
            ),
        ],
    ),
    (
        "pasta",
        &[
            RecipeTemplate::new(
                "Garlic Olive Oil Pasta",
                "Simple Italian classic (Aglio e Olio)",
                15,
                Stovetop,
            ),
            RecipeTemplate::new(
                "Tomato Basil Pasta",
                "Fresh and light Mediterranean dish",
                20,
                Stovetop,
            ),
            RecipeTemplate::new(
                "Creamy Vegetable Pasta",
                "Hearty pasta with seasonal vegetables",
                25,
                Stovetop,
            ),
        ],
    ),
    (
        "vegetable",
        &[
            RecipeTemplate::new(
                "Roasted Vegetable Medley",
                "Colorful sheet-pan vegetables",
                35,
                Oven,
            ),
            RecipeTemplate::new(
                "Quick Vegetable Stir-Fry",
                "Crisp-tender vegetables with savory sauce",
                15,
                Stovetop,
            ),
            RecipeTemplate::new(
                "Hearty Vegetable Soup",
                "Warming, nutritious comfort bowl",
                40,
                Stovetop,
            ),
        ],
    ),
    (
        "fish",
        &[
            RecipeTemplate::new(
                "Lemon Herb Baked Fish",
                "Light and flaky with bright flavors",
                25,
                Oven,
            ),
            RecipeTemplate::new(
                "Pan-Seared Fish",
                "Crispy skin with tender, moist flesh",
                20,
                Stovetop,
            ),
            RecipeTemplate::new("Fish Tacos", "Fresh and zesty weeknight favorite", 25, Stovetop),
        ],
    ),
];

/// Ingredient → ranked substitutes (first preferred), in lookup order.
pub static SUBSTITUTIONS: &[(&str, &[&str])] = &[
    ("butter", &["olive oil", "coconut oil", "margarine", "ghee"]),
    ("milk", &["almond milk", "soy milk", "oat milk", "coconut milk"]),
    (
        "eggs",
        &[
            "flax eggs (1 tbsp ground flax + 3 tbsp water)",
            "chia eggs",
            "mashed banana",
            "applesauce",
        ],
    ),
    ("flour", &["almond flour", "coconut flour", "oat flour", "rice flour"]),
    ("sugar", &["honey", "maple syrup", "stevia", "agave nectar"]),
    ("chicken", &["turkey", "tofu", "tempeh", "seitan"]),
    ("beef", &["ground turkey", "plant-based meat", "mushrooms", "lentils"]),
    ("cheese", &["nutritional yeast", "cashew cheese", "vegan cheese", "tofu ricotta"]),
    ("soy sauce", &["tamari", "coconut aminos", "Worcestershire sauce", "liquid aminos"]),
    ("yogurt", &["Greek yogurt", "coconut yogurt", "sour cream", "mashed avocado"]),
];

/// Returned when neither an exact nor a partial substitution match exists.
pub const GENERIC_SUBSTITUTES: &[&str] = &[
    "Similar items in your pantry",
    "Generic store brand alternative",
    "Adjust recipe to omit if optional",
];

/// Templates registered for `key`, if any.
#[must_use]
pub fn templates_for(key: &str) -> Option<&'static [RecipeTemplate]> {
    RECIPE_TEMPLATES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, templates)| *templates)
}

/// Templates for `key`, falling back to the vegetable group.
#[must_use]
pub fn templates_or_default(key: &str) -> &'static [RecipeTemplate] {
    templates_for(key)
        .or_else(|| templates_for(DEFAULT_TEMPLATE_KEY))
        .unwrap_or(&[])
}

/// Exact substitution lookup.
#[must_use]
pub fn substitutes_for(ingredient: &str) -> Option<&'static [&'static str]> {
    SUBSTITUTIONS
        .iter()
        .find(|(k, _)| *k == ingredient)
        .map(|(_, subs)| *subs)
}

/// First entry whose key contains `ingredient` or is contained by it.
///
/// Plain substring semantics: an empty `ingredient` matches the first entry,
/// and "goats" matches a key of "oats".
#[must_use]
pub fn partial_substitutes_for(ingredient: &str) -> Option<&'static [&'static str]> {
    SUBSTITUTIONS
        .iter()
        .find(|(k, _)| ingredient.contains(*k) || k.contains(ingredient))
        .map(|(_, subs)| *subs)
}
