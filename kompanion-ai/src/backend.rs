//! Backend capability contract.
//!
//! Every backend variant (rule-based today, an on-device model later) is an
//! [`OnDeviceAiService`]. The four request methods are non-blocking: they
//! schedule work and return immediately, and the result reaches the
//! callback later on the backend's runtime.
//!
//! Contract for implementors:
//! - exactly one of `on_success` / `on_error` per request, never inline;
//! - faults while generating become `on_error`, never a panic at the caller;
//! - after [`cancel`](OnDeviceAiService::cancel) returns, no callback for an
//!   earlier request fires or is still running (a callback must therefore
//!   not wait on another thread that is cancelling the same backend);
//! - [`cleanup`](OnDeviceAiService::cleanup) is idempotent.

use crate::callback::AiCallback;
use crate::types::{AiRequest, BackendKind, RequestId};

/// Uniform asynchronous contract for all backends.
pub trait OnDeviceAiService: Send + Sync {
    /// Which concrete variant this is.
    fn kind(&self) -> BackendKind;

    /// Cheap readiness check without side effects.
    fn is_available(&self) -> bool;

    /// Schedule `request`; the outcome is delivered to `callback`.
    fn submit(&self, request: AiRequest, callback: Box<dyn AiCallback>) -> RequestId;

    /// Suggest recipes for a free-text ingredient list.
    fn suggest_recipes(
        &self,
        ingredients: &str,
        preferences: Option<&str>,
        callback: Box<dyn AiCallback>,
    ) -> RequestId {
        self.submit(
            AiRequest::Recipes {
                ingredients: ingredients.to_owned(),
                preferences: preferences.map(str::to_owned),
            },
            callback,
        )
    }

    /// Build a grocery list for a meal plan given the pantry contents.
    fn generate_grocery_list(
        &self,
        pantry_items: &str,
        meal_plan: &str,
        callback: Box<dyn AiCallback>,
    ) -> RequestId {
        self.submit(
            AiRequest::GroceryList {
                pantry_items: pantry_items.to_owned(),
                meal_plan: meal_plan.to_owned(),
            },
            callback,
        )
    }

    /// Suggest substitutes for an ingredient.
    fn suggest_substitutes(
        &self,
        ingredient: &str,
        recipe: Option<&str>,
        callback: Box<dyn AiCallback>,
    ) -> RequestId {
        self.submit(
            AiRequest::Substitutes {
                ingredient: ingredient.to_owned(),
                recipe: recipe.map(str::to_owned),
            },
            callback,
        )
    }

    /// Free-form cooking chat.
    fn chat(
        &self,
        message: &str,
        context: Option<&str>,
        callback: Box<dyn AiCallback>,
    ) -> RequestId {
        self.submit(
            AiRequest::Chat {
                message: message.to_owned(),
                context: context.map(str::to_owned),
            },
            callback,
        )
    }

    /// Best-effort abort of in-flight work.
    fn cancel(&self) {}

    /// Release all resources. Idempotent.
    fn cleanup(&self) {}
}
