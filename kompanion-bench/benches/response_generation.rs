//! Kitchen Kompanion benchmark suite.
//!
//! Generation runs on the UI-facing delivery path, so each response should
//! stay well under a millisecond:
//!   parse_ingredients_long_list ....... < 20μs
//!   recipe_suggestions_mixed_pantry ... < 50μs
//!   grocery_list_full ................. < 50μs
//!   chat_reply_per_intent ............. < 5μs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kompanion_core::classifier;
use kompanion_core::generate;
use kompanion_core::parser;

const PANTRY: &str = "Chicken thighs, brown rice; garlic and olive oil\n\
    spinach, bell pepper, cheddar cheese, milk, eggs, flour, butter, \
    tomatoes; onion and basil, quinoa, yogurt";

const CHAT_MESSAGES: [&str; 7] = [
    "How long should I bake salmon?",
    "where do I store leftover soup",
    "can I replace eggs in brownies",
    "help me meal plan for the week",
    "any recipe with lentils",
    "what can you do?",
    "I burnt the toast",
];

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_ingredients_long_list", |b| {
        b.iter(|| parser::parse_ingredients(black_box(PANTRY)));
    });
}

fn bench_recipes(c: &mut Criterion) {
    c.bench_function("recipe_suggestions_mixed_pantry", |b| {
        b.iter(|| generate::recipe_suggestions(black_box(PANTRY), black_box(Some("gluten-free"))));
    });
}

fn bench_grocery(c: &mut Criterion) {
    c.bench_function("grocery_list_full", |b| {
        b.iter(|| {
            generate::grocery_list(
                black_box("salt, pepper"),
                black_box("Chicken on Monday, fish on Friday, pasta bake for the weekend"),
            )
        });
    });
}

fn bench_substitutes(c: &mut Criterion) {
    c.bench_function("substitutes_partial_match", |b| {
        b.iter(|| {
            generate::substitute_suggestions(
                black_box("unsalted butter"),
                black_box(Some("shortbread")),
            )
        });
    });
}

fn bench_chat(c: &mut Criterion) {
    c.bench_function("chat_reply_per_intent", |b| {
        b.iter(|| {
            for message in CHAT_MESSAGES {
                black_box(classifier::classify_chat(black_box(message)));
                black_box(generate::chat_response(black_box(message), None));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_recipes,
    bench_grocery,
    bench_substitutes,
    bench_chat,
);
criterion_main!(benches);
