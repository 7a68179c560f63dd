//! # Kitchen Kompanion AI Runtime
//!
//! Asynchronous backend contract, the rule-based backend and the policy that
//! picks which backend serves requests.
//!
//! ## Layers
//!
//! - [`backend`] is the [`OnDeviceAiService`] capability contract
//! - [`rule_based`] implements it on top of `kompanion-core` generators
//! - [`scheduler`] turns each request into a delayed delivery task
//! - [`factory`] and [`selector`] choose, memoize and replace backends
//! - [`assistant`] wraps everything in `async fn`s for front ends
//!
//! Results never arrive inline: a request method returns first and its
//! callback fires later on the runtime the backend was built with.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assistant;
pub mod backend;
pub mod callback;
pub mod error;
pub mod factory;
pub mod prefs;
pub mod rule_based;
pub mod scheduler;
pub mod selector;
pub mod types;

pub use assistant::KitchenAssistant;
pub use backend::OnDeviceAiService;
pub use callback::AiCallback;
pub use error::AiError;
pub use factory::{BackendFactory, DeviceProbe, ModelLoader};
pub use prefs::{InMemoryPreferences, PreferenceStore, TomlPreferences};
pub use rule_based::RuleBasedBackend;
pub use selector::ServiceSelector;
pub use types::{AiRequest, BackendKind, RequestKind};
