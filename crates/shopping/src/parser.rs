use std::str::FromStr;
use std::sync::LazyLock;

use fraction::Fraction;
use regex::Regex;

use crate::ambiguous::is_ambiguous_quantity;
use crate::fraction_utils::{parse_quantity, zero};
use crate::units::Unit;

/// Result of reading a free-text ingredient line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedIngredient {
    /// `"2 cups flour"`, or `"2 eggs"` with no unit.
    Parsed {
        quantity: Fraction,
        unit: Option<Unit>,
        name: String,
    },
    /// Anything without a usable leading amount, kept verbatim.
    Unparsed { text: String },
}

const NUMBER: &str = r"\d+\s+\d+/\d+|\d+/\d+|\d*\s?[½⅓⅔¼¾⅛⅜⅝⅞]|\d*\.\d+|\d+";

static LEADING_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<qty>{NUMBER})(?:\s*(?:-|–|to)\s*(?P<upper>{NUMBER}))?(?:\s+|$|(?P<glued>[A-Za-z]))"
    ))
    .expect("quantity pattern is valid")
});

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\([^)]*\)\s*").expect("parenthetical pattern is valid"));

/// Amount text, unit and name remainder of a line, before the amount is checked.
struct Leading<'a> {
    amount: &'a str,
    unit: Option<Unit>,
    name: String,
}

/// Parse an ingredient line into quantity, unit and name.
///
/// Never fails: lines without a positive leading quantity, with an amount
/// nobody measures (`"1 pinch of salt"`), with an amount over
/// [`MAX_QUANTITY`](crate::fraction_utils::MAX_QUANTITY) or without a name
/// remainder come back as [`ParsedIngredient::Unparsed`] holding the trimmed text.
pub fn parse_ingredient(text: &str) -> ParsedIngredient {
    let trimmed = text.trim();
    let unparsed = || ParsedIngredient::Unparsed {
        text: trimmed.to_string(),
    };

    let Some(leading) = read_leading(strip_bullet(trimmed)) else {
        return unparsed();
    };

    if leading.name.is_empty() || is_ambiguous_amount(&leading) {
        return unparsed();
    }

    let Ok(quantity) = parse_quantity(leading.amount) else {
        return unparsed();
    };

    if quantity <= zero() {
        return unparsed();
    }

    ParsedIngredient::Parsed {
        quantity,
        unit: leading.unit,
        name: leading.name,
    }
}

/// Name part of an ingredient line, with any leading amount and unit removed
/// whether or not the amount itself is usable.
///
/// `"99999 cups flour"` and `"1 pinch of salt"` become `"flour"` and
/// `"pinch of salt"`; lines without a leading amount come back trimmed.
pub fn strip_leading_amount(text: &str) -> String {
    let line = strip_bullet(text.trim());

    match read_leading(line) {
        Some(leading) if !leading.name.is_empty() => leading.name,
        _ => line.to_string(),
    }
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(['-', '*', '•']).trim_start()
}

fn read_leading(line: &str) -> Option<Leading<'_>> {
    let captures = LEADING_QUANTITY.captures(line)?;

    // Ranges ("2-3 cloves") are bought at the upper bound.
    let amount = captures
        .name("upper")
        .or_else(|| captures.name("qty"))?
        .as_str();

    // "200g flour": the unit is glued to the number.
    let rest_start = match captures.name("glued") {
        Some(glued) => glued.start(),
        None => captures.get(0).map(|m| m.end()).unwrap_or_default(),
    };
    let rest = PARENTHETICAL.replace(line[rest_start..].trim_start(), "");

    let (unit, name) = split_unit(&rest);

    Some(Leading {
        amount,
        unit,
        name: strip_of(name).trim().to_string(),
    })
}

/// A number in front of a word like "pinch" or "handful" is not a measurement.
fn is_ambiguous_amount(leading: &Leading<'_>) -> bool {
    leading.unit.is_none()
        && leading
            .name
            .split_whitespace()
            .next()
            .is_some_and(|word| is_ambiguous_quantity(&format!("{} {word}", leading.amount)))
}

/// Split a leading unit token (one or two words) from the name.
fn split_unit(rest: &str) -> (Option<Unit>, &str) {
    let rest = rest.trim_start();
    let Some((first, after_first)) = next_word(rest) else {
        return (None, rest);
    };

    if let Some((second, after_second)) = next_word(after_first) {
        let candidate = format!("{} {}", clean_token(first), clean_token(second));
        if let Ok(unit) = Unit::from_str(&candidate) {
            return (Some(unit), after_second);
        }
    }

    match Unit::from_str(clean_token(first)) {
        Ok(unit) => (Some(unit), after_first),
        Err(_) => (None, rest),
    }
}

fn next_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }

    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    Some((&text[..end], &text[end..]))
}

fn clean_token(token: &str) -> &str {
    token.trim_end_matches(['.', ','])
}

fn strip_of(name: &str) -> &str {
    let trimmed = name.trim_start();
    match trimmed.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("of ") => &trimmed[3..],
        _ => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(quantity: Fraction, unit: Option<Unit>, name: &str) -> ParsedIngredient {
        ParsedIngredient::Parsed {
            quantity,
            unit,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_parse_quantity_unit_name() {
        assert_eq!(
            parse_ingredient("2 cups flour"),
            parsed(Fraction::new(2u64, 1u64), Some(Unit::Cup), "flour")
        );
    }

    #[test]
    fn test_parse_mixed_and_unicode_fractions() {
        assert_eq!(
            parse_ingredient("1 1/2 tbsp olive oil"),
            parsed(Fraction::new(3u64, 2u64), Some(Unit::Tablespoon), "olive oil")
        );
        assert_eq!(
            parse_ingredient("½ tsp salt"),
            parsed(Fraction::new(1u64, 2u64), Some(Unit::Teaspoon), "salt")
        );
        assert_eq!(
            parse_ingredient("1½ cups milk"),
            parsed(Fraction::new(3u64, 2u64), Some(Unit::Cup), "milk")
        );
    }

    #[test]
    fn test_parse_bare_count() {
        assert_eq!(
            parse_ingredient("3 eggs"),
            parsed(Fraction::new(3u64, 1u64), None, "eggs")
        );
    }

    #[test]
    fn test_parse_two_word_unit_and_of() {
        assert_eq!(
            parse_ingredient("4 fl oz of cream"),
            parsed(Fraction::new(4u64, 1u64), Some(Unit::FluidOunce), "cream")
        );
    }

    #[test]
    fn test_parse_glued_unit() {
        assert_eq!(
            parse_ingredient("200g dark chocolate"),
            parsed(Fraction::new(200u64, 1u64), Some(Unit::Gram), "dark chocolate")
        );
    }

    #[test]
    fn test_parse_range_uses_upper_bound() {
        assert_eq!(
            parse_ingredient("2-3 cloves garlic"),
            parsed(Fraction::new(3u64, 1u64), Some(Unit::Clove), "garlic")
        );
        assert_eq!(
            parse_ingredient("1 to 2 lbs. potatoes"),
            parsed(Fraction::new(2u64, 1u64), Some(Unit::Pound), "potatoes")
        );
    }

    #[test]
    fn test_parse_skips_package_note() {
        assert_eq!(
            parse_ingredient("1 (14 oz) can diced tomatoes"),
            parsed(Fraction::new(1u64, 1u64), Some(Unit::Can), "diced tomatoes")
        );
    }

    #[test]
    fn test_parse_strips_bullet() {
        assert_eq!(
            parse_ingredient("- 1 lb chicken breast"),
            parsed(Fraction::new(1u64, 1u64), Some(Unit::Pound), "chicken breast")
        );
    }

    #[test]
    fn test_unparseable_lines_pass_through() {
        assert_eq!(
            parse_ingredient("  salt to taste "),
            ParsedIngredient::Unparsed {
                text: "salt to taste".to_string()
            }
        );
        assert_eq!(
            parse_ingredient("a pinch of nutmeg"),
            ParsedIngredient::Unparsed {
                text: "a pinch of nutmeg".to_string()
            }
        );
    }

    #[test]
    fn test_zero_or_nameless_lines_are_unparsed() {
        assert!(matches!(
            parse_ingredient("0 cups sugar"),
            ParsedIngredient::Unparsed { .. }
        ));
        assert!(matches!(
            parse_ingredient("2 cups"),
            ParsedIngredient::Unparsed { .. }
        ));
        assert!(matches!(parse_ingredient(""), ParsedIngredient::Unparsed { .. }));
    }

    #[test]
    fn test_counted_vague_amounts_are_unparsed() {
        assert_eq!(
            parse_ingredient("1 pinch of nutmeg"),
            ParsedIngredient::Unparsed {
                text: "1 pinch of nutmeg".to_string()
            }
        );
        assert!(matches!(
            parse_ingredient("2 dashes hot sauce"),
            ParsedIngredient::Unparsed { .. }
        ));
        assert!(matches!(
            parse_ingredient("1 handful spinach"),
            ParsedIngredient::Unparsed { .. }
        ));
    }

    #[test]
    fn test_oversized_amounts_are_unparsed() {
        assert_eq!(
            parse_ingredient("99999999999999999 cups flour"),
            ParsedIngredient::Unparsed {
                text: "99999999999999999 cups flour".to_string()
            }
        );
        assert!(matches!(
            parse_ingredient("18446744073709551616 eggs"),
            ParsedIngredient::Unparsed { .. }
        ));
    }

    #[test]
    fn test_strip_leading_amount() {
        assert_eq!(strip_leading_amount("2 cups flour"), "flour");
        assert_eq!(strip_leading_amount("99999999999999999 cups flour"), "flour");
        assert_eq!(strip_leading_amount("1 pinch of nutmeg"), "pinch of nutmeg");
        assert_eq!(strip_leading_amount("- salt to taste"), "salt to taste");
        assert_eq!(strip_leading_amount("2 cups"), "2 cups");
    }

    #[test]
    fn test_words_starting_like_units_stay_in_name() {
        assert_eq!(
            parse_ingredient("2 large carrots"),
            parsed(Fraction::new(2u64, 1u64), None, "large carrots")
        );
        assert_eq!(
            parse_ingredient("1 lime"),
            parsed(Fraction::new(1u64, 1u64), None, "lime")
        );
    }
}
