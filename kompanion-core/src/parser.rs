//! Free-text normalisation and tokenisation.

/// Delimiters between ingredients. `" and "` only splits when surrounded by spaces.
const INGREDIENT_DELIMITERS: &[&str] = &[",", ";", "\n", " and "];

/// Delimiters between meal-plan words.
const KEYWORD_DELIMITERS: &[char] = &[' ', ',', '.', ';'];

/// Shortest meal-plan keyword kept is one character longer than this.
const MIN_KEYWORD_LEN: usize = 3;

/// Split free text into normalised ingredient tokens.
///
/// Lowercases, splits on commas, semicolons, newlines and the word `" and "`,
/// trims each piece and drops empty ones. Input order and duplicates are kept.
///
/// ```
/// use kompanion_core::parser::parse_ingredients;
/// assert_eq!(parse_ingredients("Tomato, Onion and Garlic"), ["tomato", "onion", "garlic"]);
/// ```
#[must_use]
pub fn parse_ingredients(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    split_on_any(&lower, INGREDIENT_DELIMITERS)
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Split meal-plan text into candidate keywords longer than three characters.
///
/// Intended for loose scanning only; callers compare the tokens against
/// keyword sets, not against each other.
#[must_use]
pub fn extract_keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(KEYWORD_DELIMITERS)
        .map(str::trim)
        .filter(|token| token.chars().count() > MIN_KEYWORD_LEN)
        .map(str::to_owned)
        .collect()
}

/// Split `text` wherever any delimiter starts, trying delimiters in order at
/// each position.
fn split_on_any<'a>(text: &'a str, delimiters: &[&str]) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut cursor = 0;

    while cursor < text.len() {
        let rest = &text[cursor..];
        if let Some(delim) = delimiters.iter().find(|d| rest.starts_with(**d)) {
            pieces.push(&text[start..cursor]);
            cursor += delim.len();
            start = cursor;
        } else {
            // Advance one whole char so slicing stays on UTF-8 boundaries.
            cursor += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    pieces.push(&text[start..]);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_delimiters() {
        assert_eq!(
            parse_ingredients("Chicken; rice\nBroccoli, soy sauce and GINGER"),
            ["chicken", "rice", "broccoli", "soy sauce", "ginger"]
        );
    }

    #[test]
    fn keeps_duplicates_and_order() {
        assert_eq!(parse_ingredients("egg, milk, egg"), ["egg", "milk", "egg"]);
    }

    #[test]
    fn drops_blank_pieces() {
        assert_eq!(parse_ingredients(" ,, ;\n"), Vec::<String>::new());
        assert!(parse_ingredients("").is_empty());
    }

    #[test]
    fn and_needs_surrounding_spaces() {
        assert_eq!(parse_ingredients("sandwich bread"), ["sandwich bread"]);
        assert_eq!(parse_ingredients("salt AND pepper"), ["salt", "pepper"]);
    }

    #[test]
    fn handles_multibyte_text() {
        assert_eq!(parse_ingredients("Crème fraîche, jalapeño"), ["crème fraîche", "jalapeño"]);
    }

    #[test]
    fn keywords_filter_short_tokens() {
        assert_eq!(
            extract_keywords("Fish on Friday. Beef, tacos; rice or soup"),
            ["fish", "friday", "beef", "tacos", "rice", "soup"]
        );
    }
}
