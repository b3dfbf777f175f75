use fraction::{CheckedAdd, CheckedDiv, CheckedMul, Fraction};

const VULGAR_FRACTIONS: [(char, u64, u64); 9] = [
    ('½', 1, 2),
    ('⅓', 1, 3),
    ('⅔', 2, 3),
    ('¼', 1, 4),
    ('¾', 3, 4),
    ('⅛', 1, 8),
    ('⅜', 3, 8),
    ('⅝', 5, 8),
    ('⅞', 7, 8),
];

/// Denominators a cook can measure directly.
const KITCHEN_DENOMINATORS: [u64; 5] = [1, 2, 3, 4, 8];

/// Largest amount a single ingredient line may ask for.
pub const MAX_QUANTITY: u64 = 10_000;

pub fn zero() -> Fraction {
    Fraction::new(0u64, 1u64)
}

pub fn is_vulgar_fraction(c: char) -> bool {
    VULGAR_FRACTIONS.iter().any(|(v, _, _)| *v == c)
}

fn vulgar_fraction(c: char) -> Option<Fraction> {
    VULGAR_FRACTIONS
        .iter()
        .find(|(v, _, _)| *v == c)
        .map(|(_, n, d)| Fraction::new(*n, *d))
}

/// True when the amount reads as a whole number or a half, third, quarter or eighth.
pub fn is_kitchen_fraction(value: Fraction) -> bool {
    value
        .denom()
        .is_some_and(|denom| KITCHEN_DENOMINATORS.contains(denom))
}

/// `a + b`, or `None` when the exact result does not fit.
pub fn checked_add(a: Fraction, b: Fraction) -> Option<Fraction> {
    a.checked_add(&b)
}

/// `a * b`, or `None` when the exact result does not fit.
pub fn checked_mul(a: Fraction, b: Fraction) -> Option<Fraction> {
    a.checked_mul(&b)
}

/// `a / b`, or `None` when the exact result does not fit.
pub fn checked_div(a: Fraction, b: Fraction) -> Option<Fraction> {
    a.checked_div(&b)
}

/// Parse a quantity string into a Fraction
///
/// Supports formats:
/// - Whole numbers: "2" → 2/1
/// - Pure fractions: "1/2" → 1/2
/// - Mixed fractions: "1 1/2" → 3/2
/// - Decimals: "0.5" → 1/2
/// - Unicode fractions: "½", "1½" → 1/2, 3/2
pub fn parse_quantity(quantity_str: &str) -> Result<Fraction, String> {
    let trimmed = quantity_str.trim();

    if trimmed.is_empty() {
        return Err("Empty quantity".to_string());
    }

    if trimmed.starts_with('-') || trimmed.contains("/-") {
        return Err("Negative quantities are not allowed".to_string());
    }

    // Handle unicode fractions: "½", "1½", "1 ½"
    if let Some(last) = trimmed.chars().last()
        && let Some(fractional) = vulgar_fraction(last)
    {
        let whole = trimmed[..trimmed.len() - last.len_utf8()].trim();
        if whole.is_empty() {
            return Ok(fractional);
        }

        let whole = parse_whole(whole)?;

        return Ok(Fraction::new(whole, 1u64) + fractional);
    }

    // Handle mixed fractions: "1 1/2"
    if trimmed.contains(' ') && trimmed.contains('/') {
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(format!("Invalid mixed fraction format: {}", quantity_str));
        }

        let whole = parse_whole(parts[0])?;

        return Ok(Fraction::new(whole, 1u64) + parse_pure_fraction(parts[1])?);
    }

    // Handle pure fractions: "1/2"
    if trimmed.contains('/') {
        return parse_pure_fraction(trimmed);
    }

    parse_decimal(trimmed)
}

fn parse_pure_fraction(value: &str) -> Result<Fraction, String> {
    let parts: Vec<&str> = value.split('/').collect();
    if parts.len() != 2 {
        return Err(format!("Invalid fraction format: {}", value));
    }

    let numerator: u64 = parts[0]
        .trim()
        .parse()
        .map_err(|_| format!("Invalid numerator: {}", parts[0]))?;
    let denominator: u64 = parts[1]
        .trim()
        .parse()
        .map_err(|_| format!("Invalid denominator: {}", parts[1]))?;

    if denominator == 0 {
        return Err("Denominator cannot be zero".to_string());
    }

    let value = Fraction::new(numerator, denominator);
    if value > Fraction::new(MAX_QUANTITY, 1u64) {
        return Err(format!("Quantity too large: {}", value));
    }

    Ok(value)
}

fn parse_whole(value: &str) -> Result<u64, String> {
    let whole: u64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid whole number: {}", value))?;

    if whole > MAX_QUANTITY {
        return Err(format!("Quantity too large: {}", whole));
    }

    Ok(whole)
}

/// Exact decimal parsing: "1.25" becomes 125/100 without going through f64.
fn parse_decimal(value: &str) -> Result<Fraction, String> {
    let (whole, decimals) = match value.split_once('.') {
        Some((whole, decimals)) => (whole, decimals),
        None => (value, ""),
    };

    if decimals.len() > 6 {
        return Err(format!("Too many decimal places: {}", value));
    }

    let whole = if whole.is_empty() {
        0
    } else {
        parse_whole(whole)?
    };

    if decimals.is_empty() {
        return Ok(Fraction::new(whole, 1u64));
    }

    let scale = 10u64.pow(decimals.len() as u32);
    let decimals: u64 = decimals
        .parse()
        .map_err(|_| format!("Invalid number format: {}", value))?;

    Ok(Fraction::new(whole * scale + decimals, scale))
}

/// Format a Fraction as a human-readable string
///
/// Formats:
/// - Whole numbers: 2/1 → "2"
/// - Mixed fractions: 3/2 → "1 1/2"
/// - Pure fractions: 1/2 → "1/2"
pub fn format_quantity(fraction: Fraction) -> String {
    let (Some(numer), Some(denom)) = (fraction.numer(), fraction.denom()) else {
        return "0".to_string();
    };
    let (numer, denom) = (*numer, *denom);

    if denom == 1 {
        return format!("{}", numer);
    }

    if numer >= denom {
        let whole = numer / denom;
        let remainder = numer % denom;

        if remainder == 0 {
            format!("{}", whole)
        } else {
            format!("{} {}/{}", whole, remainder, denom)
        }
    } else {
        format!("{}/{}", numer, denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fraction_pure_fraction() {
        let result = parse_quantity("1/2").unwrap();
        assert_eq!(result, Fraction::new(1u64, 2u64));
    }

    #[test]
    fn test_parse_fraction_mixed_fraction() {
        let result = parse_quantity("1 1/2").unwrap();
        assert_eq!(result, Fraction::new(3u64, 2u64));
    }

    #[test]
    fn test_parse_fraction_decimal_is_exact() {
        assert_eq!(parse_quantity("0.5").unwrap(), Fraction::new(1u64, 2u64));
        assert_eq!(parse_quantity("1.25").unwrap(), Fraction::new(5u64, 4u64));
        assert_eq!(parse_quantity(".75").unwrap(), Fraction::new(3u64, 4u64));
    }

    #[test]
    fn test_parse_fraction_whole_number() {
        assert_eq!(parse_quantity("2").unwrap(), Fraction::new(2u64, 1u64));
    }

    #[test]
    fn test_parse_unicode_fractions() {
        assert_eq!(parse_quantity("½").unwrap(), Fraction::new(1u64, 2u64));
        assert_eq!(parse_quantity("1½").unwrap(), Fraction::new(3u64, 2u64));
        assert_eq!(parse_quantity("2 ¾").unwrap(), Fraction::new(11u64, 4u64));
    }

    #[test]
    fn test_parse_fraction_rejects_negatives() {
        for input in ["-2", "-0.5", "-1/2", "-1 1/2", "1/-2"] {
            let result = parse_quantity(input);
            assert!(result.is_err(), "{input} should be rejected");
            assert!(
                result
                    .unwrap_err()
                    .contains("Negative quantities are not allowed")
            );
        }
    }

    #[test]
    fn test_parse_fraction_rejects_zero_denominator() {
        assert_eq!(
            parse_quantity("3/0").unwrap_err(),
            "Denominator cannot be zero"
        );
    }

    #[test]
    fn test_parse_rejects_words() {
        assert!(parse_quantity("some").is_err());
        assert!(parse_quantity("").is_err());
    }

    #[test]
    fn test_format_fraction_simplify() {
        assert_eq!(format_quantity(Fraction::new(4u64, 8u64)), "1/2");
    }

    #[test]
    fn test_format_fraction_mixed() {
        assert_eq!(format_quantity(Fraction::new(3u64, 2u64)), "1 1/2");
    }

    #[test]
    fn test_format_fraction_whole() {
        assert_eq!(format_quantity(Fraction::new(4u64, 2u64)), "2");
    }

    #[test]
    fn test_parse_rejects_oversized_quantities() {
        for input in ["99999999999999999", "10001", "20000.5", "10001 1/2", "30001/3", "99999½"] {
            let result = parse_quantity(input);
            assert!(result.is_err(), "{input} should be rejected");
            assert!(result.unwrap_err().starts_with("Quantity too large"));
        }

        assert_eq!(
            parse_quantity("10000").unwrap(),
            Fraction::new(MAX_QUANTITY, 1u64)
        );
    }

    #[test]
    fn test_kitchen_fractions() {
        assert!(is_kitchen_fraction(Fraction::new(3u64, 8u64)));
        assert!(is_kitchen_fraction(Fraction::new(2u64, 1u64)));
        assert!(is_kitchen_fraction(Fraction::new(4u64, 6u64)));
        assert!(!is_kitchen_fraction(Fraction::new(17u64, 16u64)));
        assert!(!is_kitchen_fraction(Fraction::new(5u64, 7u64)));
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let huge = Fraction::new(u64::MAX, 1u64);
        let three = Fraction::new(3u64, 1u64);

        assert_eq!(checked_mul(huge, three), None);
        assert_eq!(checked_add(huge, three), None);
        assert_eq!(checked_div(huge, Fraction::new(1u64, 3u64)), None);
        assert_eq!(
            checked_add(Fraction::new(1u64, 2u64), Fraction::new(1u64, 3u64)),
            Some(Fraction::new(5u64, 6u64))
        );
    }
}
