//! Awaitable facade used by front ends.
//!
//! Each call resolves the current backend through the selector, submits the
//! request with a [`channel`](crate::callback::channel) callback and awaits
//! the outcome.

use std::sync::Arc;

use kompanion_core::config::AssistantConfig;
use tracing::debug;

use crate::callback;
use crate::error::AiError;
use crate::selector::ServiceSelector;
use crate::types::AiRequest;

/// Error message for a recipe request made with an empty pantry.
pub const EMPTY_PANTRY_MESSAGE: &str = "Your pantry is empty. Add items first!";

/// Cooking assistant bound to a [`ServiceSelector`].
pub struct KitchenAssistant {
    selector: Arc<ServiceSelector>,
    config: AssistantConfig,
}

impl KitchenAssistant {
    /// Assistant using `selector` for backend access.
    #[must_use]
    pub fn new(selector: Arc<ServiceSelector>, config: AssistantConfig) -> Self {
        Self { selector, config }
    }

    /// The underlying selector.
    #[must_use]
    pub fn selector(&self) -> &Arc<ServiceSelector> {
        &self.selector
    }

    /// Recipe suggestions for a free-text ingredient list.
    ///
    /// # Errors
    /// The backend's failure message, or [`AiError::Cancelled`] if the
    /// request was cancelled before delivery.
    pub async fn suggest_recipes(
        &self,
        ingredients: &str,
        preferences: Option<&str>,
    ) -> Result<String, AiError> {
        self.run(AiRequest::Recipes {
            ingredients: ingredients.to_owned(),
            preferences: preferences.map(str::to_owned),
        })
        .await
    }

    /// Recipe suggestions from pantry item names.
    ///
    /// Only the first `max_pantry_items` names are sent.
    ///
    /// # Errors
    /// [`AiError::InvalidInput`] with [`EMPTY_PANTRY_MESSAGE`] when `items` is
    /// empty; otherwise see [`suggest_recipes`](Self::suggest_recipes).
    pub async fn suggest_from_pantry<S: AsRef<str>>(&self, items: &[S]) -> Result<String, AiError> {
        if items.is_empty() {
            return Err(AiError::InvalidInput(EMPTY_PANTRY_MESSAGE.to_owned()));
        }
        let ingredients = items
            .iter()
            .take(self.config.max_pantry_items)
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ");
        self.suggest_recipes(&ingredients, None).await
    }

    /// Grocery list for a meal plan.
    ///
    /// # Errors
    /// See [`suggest_recipes`](Self::suggest_recipes).
    pub async fn grocery_list(
        &self,
        pantry_items: &str,
        meal_plan: &str,
    ) -> Result<String, AiError> {
        self.run(AiRequest::GroceryList {
            pantry_items: pantry_items.to_owned(),
            meal_plan: meal_plan.to_owned(),
        })
        .await
    }

    /// Grocery list for the default meal plan, given pantry item names.
    ///
    /// # Errors
    /// See [`suggest_recipes`](Self::suggest_recipes).
    pub async fn grocery_for_pantry<S: AsRef<str>>(&self, items: &[S]) -> Result<String, AiError> {
        let pantry: String = items.iter().map(|item| format!("{}, ", item.as_ref())).collect();
        let meal_plan = self.config.default_meal_plan.clone();
        self.grocery_list(&pantry, &meal_plan).await
    }

    /// Substitutes for an ingredient.
    ///
    /// # Errors
    /// See [`suggest_recipes`](Self::suggest_recipes).
    pub async fn substitutes(
        &self,
        ingredient: &str,
        recipe: Option<&str>,
    ) -> Result<String, AiError> {
        self.run(AiRequest::Substitutes {
            ingredient: ingredient.to_owned(),
            recipe: recipe.map(str::to_owned),
        })
        .await
    }

    /// Chat message with the configured kitchen context.
    ///
    /// # Errors
    /// See [`suggest_recipes`](Self::suggest_recipes).
    pub async fn ask(&self, message: &str) -> Result<String, AiError> {
        self.run(AiRequest::Chat {
            message: message.to_owned(),
            context: Some(self.config.chat_context.clone()),
        })
        .await
    }

    /// Switch between forced rule-based mode and automatic selection.
    /// Returns the label of the backend now in use.
    pub fn toggle_mock_mode(&self, force_mock: bool) -> &'static str {
        self.selector.set_force_mock_mode(force_mock).kind().label()
    }

    /// Label of the backend in use, creating it if needed.
    #[must_use]
    pub fn backend_label(&self) -> &'static str {
        self.selector.get_instance(false).kind().label()
    }

    /// Whether the backend in use can currently serve requests.
    #[must_use]
    pub fn is_ai_available(&self) -> bool {
        self.selector.get_instance(false).is_available()
    }

    async fn run(&self, request: AiRequest) -> Result<String, AiError> {
        let kind = request.kind();
        let backend = self.selector.get_instance(false);
        let (cb, rx) = callback::channel();
        let id = backend.submit(request, cb);
        debug!(%kind, id, "Awaiting backend response");

        match rx.await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(message)) => Err(AiError::Generation(message)),
            Err(_) => Err(AiError::Cancelled),
        }
    }
}
