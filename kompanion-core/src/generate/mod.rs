//! Response generation for the four request kinds.
//!
//! Each procedure is a pure function of its inputs and the static tables in
//! [`crate::taxonomy`]: identical input always yields byte-identical output.
//! The exact wording (headers, bullets, footers) is part of the observable
//! contract and is pinned by the golden tests in `tests/golden_responses.rs`.

pub mod chat;
pub mod grocery;
pub mod recipes;
pub mod substitutes;

pub use chat::chat_response;
pub use grocery::{GroceryList, GrocerySection, grocery_list};
pub use recipes::{RecipeSuggestion, recipe_suggestions};
pub use substitutes::{SubstituteSource, substitute_suggestions};

/// `Some(text)` when `text` is present and not blank.
pub(crate) fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}
