//! Free-form chat replies.

use crate::classifier::{self, ChatIntent};

const COOKING_TIME: &str = "Cooking times vary by recipe and method:\n\
• Stir-fry: 15-20 minutes\n\
• Baked dishes: 30-45 minutes\n\
• Slow cooker: 4-8 hours\n\
• Instant pot: 15-30 minutes\n\n\
What are you planning to cook?";

const STORAGE: &str = "Storage tips:\n\
• Fresh produce: Refrigerate in crisper drawer (3-7 days)\n\
• Cooked meals: Refrigerate in airtight containers (3-4 days)\n\
• Dry goods: Cool, dry pantry (months to years)\n\
• Frozen items: Freezer at 0°F (-18°C) (3-12 months)\n\n\
Always check for signs of spoilage before use.";

const SUBSTITUTION: &str = "I can help with ingredient substitutions! Tell me:\n\
1. What ingredient do you need to replace?\n\
2. What recipe are you making?\n\n\
I'll suggest appropriate alternatives that work well.";

const MEAL_PLANNING: &str = "Meal planning tips:\n\
1. Plan 3-5 dinners per week\n\
2. Choose recipes with overlapping ingredients\n\
3. Prep ingredients on weekends\n\
4. Use your pantry items first\n\
5. Include one \"leftover\" night\n\n\
Would you like help creating a meal plan?";

const RECIPE: &str = "I can suggest recipes based on your ingredients! Just tell me:\n\
• What ingredients you have\n\
• Any dietary preferences\n\
• How much time you have\n\n\
I'll provide personalized recipe suggestions.";

const CAPABILITIES: &str = "I'm your Kitchen Kompanion AI assistant! I can help with:\n\n\
✓ Recipe suggestions from your ingredients\n\
✓ Smart grocery list generation\n\
✓ Ingredient substitutions\n\
✓ Cooking tips and techniques\n\
✓ Meal planning advice\n\
✓ Food storage guidance\n\n\
What would you like help with today?";

const FALLBACK_BODY: &str = "I'm your on-device AI cooking assistant. \
While I can help with recipes, substitutions, and meal planning, \
I might need more specific information to give you the best answer.\n\n\
Try asking about:\n\
• Recipe suggestions\n\
• Ingredient substitutions\n\
• Cooking times and methods\n\
• Meal planning strategies";

/// Fixed reply for an intent. `None` for [`ChatIntent::Fallback`], which echoes the message.
#[must_use]
pub fn canned_reply(intent: ChatIntent) -> Option<&'static str> {
    match intent {
        ChatIntent::CookingTime => Some(COOKING_TIME),
        ChatIntent::Storage => Some(STORAGE),
        ChatIntent::Substitution => Some(SUBSTITUTION),
        ChatIntent::MealPlanning => Some(MEAL_PLANNING),
        ChatIntent::Recipe => Some(RECIPE),
        ChatIntent::Capabilities => Some(CAPABILITIES),
        ChatIntent::Fallback => None,
    }
}

/// Reply to a chat message.
///
/// `context` is accepted for interface parity with model-backed
/// implementations; rule-based replies do not depend on it.
#[must_use]
pub fn chat_response(message: &str, _context: Option<&str>) -> String {
    let intent = classifier::classify_chat(message);
    match canned_reply(intent) {
        Some(reply) => reply.to_owned(),
        None => format!("Thanks for your question: \"{message}\"\n\n{FALLBACK_BODY}"),
    }
}
