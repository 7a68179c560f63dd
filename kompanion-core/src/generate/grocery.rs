//! Grocery list generation from pantry contents and a meal plan.

use std::fmt::Write as _;

use crate::parser;
use crate::taxonomy::{DAIRY, PROTEIN, VEGETABLE};

const FRESH_PRODUCE: &[&str] = &[
    "Fresh tomatoes",
    "Onions (yellow and red)",
    "Garlic cloves",
    "Bell peppers (assorted colors)",
    "Fresh herbs (basil, parsley)",
];

const PROTEINS: &[&str] = &["Chicken breast (1 lb)", "Ground beef (1 lb)", "Eggs (dozen)"];

const PANTRY_STAPLES: &[&str] = &[
    "Olive oil",
    "Salt and pepper",
    "Pasta (if needed)",
    "Rice (if needed)",
];

const DAIRY_ITEMS: &[&str] = &["Milk", "Butter", "Cheese (cheddar or preferred type)"];

/// One titled block of the grocery list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrocerySection {
    /// Section heading.
    pub title: &'static str,
    /// Fixed items listed under the heading.
    pub items: &'static [&'static str],
}

/// Sections chosen for a pantry/meal-plan pair, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryList {
    /// The meal plan, verbatim.
    pub meal_plan: String,
    /// Included sections.
    pub sections: Vec<GrocerySection>,
}

impl GroceryList {
    /// Decide which sections to include.
    ///
    /// - Fresh Produce unless the pantry already holds a vegetable,
    /// - Proteins if the pantry lacks one or the meal plan names one,
    /// - Pantry Staples always,
    /// - Dairy unless the pantry already holds a dairy item.
    #[must_use]
    pub fn build(pantry_items: &str, meal_plan: &str) -> Self {
        let pantry = parser::parse_ingredients(pantry_items);
        let meal_keywords = parser::extract_keywords(meal_plan);

        let mut sections = Vec::with_capacity(4);
        if !VEGETABLE.matches_any(&pantry) {
            sections.push(GrocerySection { title: "Fresh Produce", items: FRESH_PRODUCE });
        }
        if !PROTEIN.matches_any(&pantry) || meal_keywords.iter().any(|kw| PROTEIN.contains(kw)) {
            sections.push(GrocerySection { title: "Proteins", items: PROTEINS });
        }
        sections.push(GrocerySection { title: "Pantry Staples", items: PANTRY_STAPLES });
        if !DAIRY.matches_any(&pantry) {
            sections.push(GrocerySection { title: "Dairy", items: DAIRY_ITEMS });
        }

        Self {
            meal_plan: meal_plan.to_owned(),
            sections,
        }
    }

    /// Render as display text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("Smart Grocery List\n");
        let _ = write!(out, "Based on your meal plan: \"{}\"\n\n", self.meal_plan);
        for section in &self.sections {
            let _ = writeln!(out, "{}:", section.title);
            for item in section.items {
                let _ = writeln!(out, "  • {item}");
            }
            out.push('\n');
        }
        out.push_str("Tip: Cross-check with your current pantry to avoid duplicates.");
        out
    }
}

/// Build and render a grocery list.
#[must_use]
pub fn grocery_list(pantry_items: &str, meal_plan: &str) -> String {
    GroceryList::build(pantry_items, meal_plan).render()
}
