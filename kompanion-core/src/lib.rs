//! # Kitchen Kompanion Core Library
//!
//! Deterministic, table-driven response generation for an on-device cooking
//! assistant. No model, no network: every answer is a pure function of the
//! input text and the static tables in [`taxonomy`].
//!
//! ## Pipeline
//!
//! ```text
//! free text ──► parser ──► classifier ──► generate ──► formatted text
//!                 │            │              │
//!                 └────────────┴── taxonomy ──┘   (immutable, process-wide)
//! ```
//!
//! - [`parser`]: splits free text into ingredient tokens and meal-plan keywords
//! - [`classifier`]: primary ingredient category and chat intent
//! - [`generate`]: recipes, grocery list, substitutes and chat replies
//! - [`config`]: `kompanion.toml` settings shared with the runtime crates

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classifier;
pub mod config;
pub mod error;
pub mod generate;
pub mod parser;
pub mod taxonomy;
pub mod types;

pub use classifier::{ChatIntent, PrimaryCategory};
pub use config::KompanionConfig;
pub use error::KompanionError;
pub use types::{CookingMethod, RecipeTemplate};
