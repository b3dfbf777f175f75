use std::sync::LazyLock;

use regex::Regex;

use crate::ambiguous::strip_ambiguous_qualifiers;
use crate::parser::strip_leading_amount;

/// Preparation words that do not change what is bought.
const DESCRIPTORS: [&str; 18] = [
    "fresh", "large", "small", "medium", "chopped", "diced", "minced", "sliced", "grated",
    "shredded", "peeled", "boneless", "skinless", "finely", "roughly", "softened", "melted",
    "divided",
];

/// Words that look plural but are not.
const INVARIANT: [&str; 6] = [
    "hummus",
    "couscous",
    "asparagus",
    "molasses",
    "swiss",
    "grits",
];

const IRREGULAR: [(&str, &str); 3] = [("leaves", "leaf"), ("loaves", "loaf"), ("halves", "half")];

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"));

/// Grouping key for an ingredient line or a pantry item name.
///
/// `"2 cups Chopped Tomatoes, drained"` and `"tomato"` both become `"tomato"`.
pub fn normalize_name(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let without_notes = PARENTHETICAL.replace_all(&lowered, " ");
    let head = without_notes
        .split(',')
        .next()
        .unwrap_or_default()
        .trim();

    let name = strip_ambiguous_qualifiers(&strip_leading_amount(head));

    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect();

    let words: Vec<&str> = cleaned
        .split_whitespace()
        .map(|word| word.trim_matches(['-', '\'']))
        .filter(|word| !word.is_empty())
        .collect();

    let mut kept: Vec<&str> = words
        .iter()
        .copied()
        .filter(|word| !DESCRIPTORS.contains(word))
        .collect();

    // "fresh" on its own is still the name
    if kept.is_empty() {
        kept = words;
    }

    let Some((last, rest)) = kept.split_last() else {
        return String::new();
    };

    let mut normalized: Vec<String> = rest.iter().map(|word| word.to_string()).collect();
    normalized.push(singularize(last));
    normalized.join(" ")
}

/// Simple English singular of one lowercase word.
pub fn singularize(word: &str) -> String {
    if INVARIANT.contains(&word) || word.chars().count() <= 3 {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return singular.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }

    if word.ends_with("oes")
        || word.ends_with("ches")
        || word.ends_with("shes")
        || word.ends_with("xes")
        || word.ends_with("sses")
    {
        return word[..word.len() - 2].to_string();
    }

    if word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_singularizes() {
        assert_eq!(normalize_name("Tomatoes"), "tomato");
        assert_eq!(normalize_name("Eggs"), "egg");
        assert_eq!(normalize_name("green beans"), "green bean");
    }

    #[test]
    fn test_normalize_strips_quantity_and_unit() {
        assert_eq!(normalize_name("2 cups all-purpose flour"), "all-purpose flour");
        assert_eq!(normalize_name("2 lb chicken breast"), "chicken breast");
        assert_eq!(normalize_name("1 (14 oz) can diced tomatoes"), "tomato");
    }

    #[test]
    fn test_normalize_strips_descriptors_and_notes() {
        assert_eq!(
            normalize_name("boneless skinless chicken breasts"),
            "chicken breast"
        );
        assert_eq!(normalize_name("Fresh basil leaves, chopped"), "basil leaf");
        assert_eq!(normalize_name("onion (about 1 cup), diced"), "onion");
        assert_eq!(normalize_name("fresh"), "fresh");
    }

    #[test]
    fn test_normalize_strips_ambiguous_qualifiers() {
        assert_eq!(normalize_name("salt to taste"), "salt");
        assert_eq!(normalize_name("Pepper, to taste"), "pepper");
        assert_eq!(normalize_name("a pinch of nutmeg"), "nutmeg");
        assert_eq!(normalize_name("1 pinch of nutmeg"), "nutmeg");
    }

    #[test]
    fn test_normalize_strips_oversized_amounts() {
        assert_eq!(normalize_name("99999999999999999 cups flour"), "flour");
    }

    #[test]
    fn test_normalize_keeps_internal_hyphens_and_apostrophes() {
        assert_eq!(normalize_name("baker's yeast!"), "baker's yeast");
        assert_eq!(normalize_name("  -- extra-virgin olive oil. "), "extra-virgin olive oil");
    }

    #[test]
    fn test_singularize_rules() {
        assert_eq!(singularize("berries"), "berry");
        assert_eq!(singularize("potatoes"), "potato");
        assert_eq!(singularize("peaches"), "peach");
        assert_eq!(singularize("radishes"), "radish");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("glasses"), "glass");
        assert_eq!(singularize("lentils"), "lentil");
        assert_eq!(singularize("grass"), "grass");
        assert_eq!(singularize("asparagus"), "asparagus");
        assert_eq!(singularize("molasses"), "molasses");
        assert_eq!(singularize("hummus"), "hummus");
        assert_eq!(singularize("peas"), "pea");
        assert_eq!(singularize("gas"), "gas");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("  , "), "");
    }
}
