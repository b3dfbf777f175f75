use std::sync::LazyLock;

use regex::Regex;

/// Keywords for amounts that cannot be measured and are bought "as needed".
const AMBIGUOUS_QUANTITIES: &[&str] = &[
    "a pinch",
    "pinch",
    "pinches",
    "a dash",
    "dash",
    "dashes",
    "to taste",
    "taste",
    "as needed",
    "a handful",
    "handful",
    "handfuls",
    "some",
    "a sprinkle",
    "sprinkle",
    "sprinkles",
    "for garnish",
];

/// Qualifier phrases that hang off an ingredient name without changing what is bought.
static QUALIFIERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:(?:a\s+)?(?:pinch|dash|handful|sprinkle|splash)(?:\s+of)?\s+)",
        r"|(?:\s*[,;]?\s*\b(?:to taste|as needed|for garnish|for serving|optional|if desired)",
        r"\b\s*)+$",
    ))
    .expect("qualifier pattern is valid")
});

/// Check if a quantity string is ambiguous (non-numeric)
///
/// Returns true for quantities like "a pinch", "to taste", "1 dash" or "handful",
/// false for numeric quantities like "2", "1/2" or "1.5". Keywords only match
/// whole words.
pub fn is_ambiguous_quantity(quantity_str: &str) -> bool {
    let normalized = quantity_str.trim().to_lowercase();

    if AMBIGUOUS_QUANTITIES.contains(&normalized.as_str()) {
        return true;
    }

    if AMBIGUOUS_QUANTITIES.iter().any(|keyword| {
        normalized.starts_with(&format!("{keyword} "))
            || normalized.ends_with(&format!(" {keyword}"))
    }) {
        return true;
    }

    let has_numeric = normalized.chars().any(|c| {
        c.is_ascii_digit() || c == '/' || c == '.' || crate::fraction_utils::is_vulgar_fraction(c)
    });

    !has_numeric
}

/// Remove "to taste", "a pinch of", "for garnish" and similar qualifiers.
///
/// `"salt to taste"` and `"a pinch of salt"` both become `"salt"`.
pub fn strip_ambiguous_qualifiers(name: &str) -> String {
    QUALIFIERS.replace_all(name.trim(), "").trim().to_string()
}
