use fraction::Fraction;
use serde::{Serialize, Serializer};
use strum::{AsRefStr, EnumString, VariantArray};

use crate::fraction_utils::{checked_div, checked_mul, is_kitchen_fraction};

/// Units recognised in ingredient lines.
///
/// Parsing is ASCII case-insensitive and accepts the usual abbreviations and
/// plurals. A trailing period is stripped before lookup by the parser.
#[derive(
    EnumString, AsRefStr, VariantArray, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[strum(ascii_case_insensitive)]
pub enum Unit {
    #[strum(serialize = "tsp", serialize = "tsps", serialize = "teaspoon", serialize = "teaspoons")]
    Teaspoon,
    #[strum(
        serialize = "tbsp",
        serialize = "tbsps",
        serialize = "tbs",
        serialize = "tablespoon",
        serialize = "tablespoons"
    )]
    Tablespoon,
    #[strum(
        serialize = "fl oz",
        serialize = "fl. oz",
        serialize = "fluid ounce",
        serialize = "fluid ounces"
    )]
    FluidOunce,
    #[strum(serialize = "cup", serialize = "cups")]
    Cup,
    #[strum(serialize = "pint", serialize = "pints", serialize = "pt")]
    Pint,
    #[strum(serialize = "quart", serialize = "quarts", serialize = "qt")]
    Quart,
    #[strum(serialize = "gallon", serialize = "gallons", serialize = "gal")]
    Gallon,
    #[strum(
        serialize = "ml",
        serialize = "milliliter",
        serialize = "milliliters",
        serialize = "millilitre",
        serialize = "millilitres"
    )]
    Milliliter,
    #[strum(
        serialize = "l",
        serialize = "liter",
        serialize = "liters",
        serialize = "litre",
        serialize = "litres"
    )]
    Liter,
    #[strum(serialize = "g", serialize = "gram", serialize = "grams", serialize = "gr")]
    Gram,
    #[strum(
        serialize = "kg",
        serialize = "kilogram",
        serialize = "kilograms",
        serialize = "kgs"
    )]
    Kilogram,
    #[strum(serialize = "oz", serialize = "ounce", serialize = "ounces")]
    Ounce,
    #[strum(serialize = "lb", serialize = "lbs", serialize = "pound", serialize = "pounds")]
    Pound,
    #[strum(
        serialize = "piece",
        serialize = "pieces",
        serialize = "whole",
        serialize = "item",
        serialize = "items"
    )]
    Piece,
    #[strum(serialize = "clove", serialize = "cloves")]
    Clove,
    #[strum(serialize = "can", serialize = "cans", serialize = "tin", serialize = "tins")]
    Can,
    #[strum(serialize = "jar", serialize = "jars")]
    Jar,
    #[strum(serialize = "slice", serialize = "slices")]
    Slice,
    #[strum(serialize = "bunch", serialize = "bunches")]
    Bunch,
    #[strum(serialize = "head", serialize = "heads")]
    Head,
    #[strum(serialize = "stick", serialize = "sticks")]
    Stick,
    #[strum(
        serialize = "package",
        serialize = "packages",
        serialize = "pkg",
        serialize = "packet",
        serialize = "packets"
    )]
    Package,
    #[strum(serialize = "bag", serialize = "bags")]
    Bag,
    #[strum(serialize = "bottle", serialize = "bottles")]
    Bottle,
    #[strum(serialize = "sprig", serialize = "sprigs")]
    Sprig,
}

/// Measurement category. Only quantities sharing a measure can be merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Measure {
    Volume,
    Weight,
    /// Bare counts: "2 eggs", "3 whole onions".
    Count,
    /// Containers and portions that only merge with themselves: cloves, cans, slices.
    Each(Unit),
}

impl Unit {
    pub fn measure(&self) -> Measure {
        match self {
            Unit::Teaspoon
            | Unit::Tablespoon
            | Unit::FluidOunce
            | Unit::Cup
            | Unit::Pint
            | Unit::Quart
            | Unit::Gallon
            | Unit::Milliliter
            | Unit::Liter => Measure::Volume,
            Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => Measure::Weight,
            Unit::Piece => Measure::Count,
            other => Measure::Each(*other),
        }
    }

    /// Size of one unit in its measure's base unit (ml for volume, g for weight).
    ///
    /// Units without a conversion (counts and containers) have factor 1.
    pub fn base_factor(&self) -> Fraction {
        match self {
            Unit::Teaspoon => Fraction::new(5u64, 1u64),
            Unit::Tablespoon => Fraction::new(15u64, 1u64),
            Unit::FluidOunce => Fraction::new(30u64, 1u64),
            Unit::Cup => Fraction::new(240u64, 1u64),
            Unit::Pint => Fraction::new(480u64, 1u64),
            Unit::Quart => Fraction::new(960u64, 1u64),
            Unit::Gallon => Fraction::new(3840u64, 1u64),
            Unit::Milliliter => Fraction::new(1u64, 1u64),
            Unit::Liter => Fraction::new(1000u64, 1u64),
            Unit::Gram => Fraction::new(1u64, 1u64),
            Unit::Kilogram => Fraction::new(1000u64, 1u64),
            // International avoirdupois pound, 16 ounces exactly.
            Unit::Pound => Fraction::new(45_359_237u64, 100_000u64),
            Unit::Ounce => Fraction::new(45_359_237u64, 1_600_000u64),
            _ => Fraction::new(1u64, 1u64),
        }
    }

    /// Display label, pluralised when more than one is needed.
    pub fn label(&self, plural: bool) -> &'static str {
        match (self, plural) {
            (Unit::Teaspoon, _) => "tsp",
            (Unit::Tablespoon, _) => "tbsp",
            (Unit::FluidOunce, _) => "fl oz",
            (Unit::Cup, false) => "cup",
            (Unit::Cup, true) => "cups",
            (Unit::Pint, false) => "pint",
            (Unit::Pint, true) => "pints",
            (Unit::Quart, false) => "quart",
            (Unit::Quart, true) => "quarts",
            (Unit::Gallon, false) => "gallon",
            (Unit::Gallon, true) => "gallons",
            (Unit::Milliliter, _) => "ml",
            (Unit::Liter, _) => "l",
            (Unit::Gram, _) => "g",
            (Unit::Kilogram, _) => "kg",
            (Unit::Ounce, _) => "oz",
            (Unit::Pound, _) => "lb",
            (Unit::Piece, false) => "piece",
            (Unit::Piece, true) => "pieces",
            (Unit::Clove, false) => "clove",
            (Unit::Clove, true) => "cloves",
            (Unit::Can, false) => "can",
            (Unit::Can, true) => "cans",
            (Unit::Jar, false) => "jar",
            (Unit::Jar, true) => "jars",
            (Unit::Slice, false) => "slice",
            (Unit::Slice, true) => "slices",
            (Unit::Bunch, false) => "bunch",
            (Unit::Bunch, true) => "bunches",
            (Unit::Head, false) => "head",
            (Unit::Head, true) => "heads",
            (Unit::Stick, false) => "stick",
            (Unit::Stick, true) => "sticks",
            (Unit::Package, false) => "package",
            (Unit::Package, true) => "packages",
            (Unit::Bag, false) => "bag",
            (Unit::Bag, true) => "bags",
            (Unit::Bottle, false) => "bottle",
            (Unit::Bottle, true) => "bottles",
            (Unit::Sprig, false) => "sprig",
            (Unit::Sprig, true) => "sprigs",
        }
    }

    /// Singular label, used as the stable unit key when persisting lines.
    pub fn key(&self) -> &'static str {
        self.label(false)
    }

    /// Amount of `base` (in this unit's base measure) expressed in this unit.
    ///
    /// `None` when the exact result does not fit.
    pub fn from_base(&self, base: Fraction) -> Option<Fraction> {
        checked_div(base, self.base_factor())
    }

    pub fn to_base(&self, quantity: Fraction) -> Option<Fraction> {
        checked_mul(quantity, self.base_factor())
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Pick the unit to present a merged total in.
///
/// Uses the single unit when every contribution agreed. Otherwise the largest
/// contributing unit in which the total is at least one and reads as a kitchen
/// fraction, falling back to the smallest contributing unit. The total is
/// always shown exactly in the returned unit.
pub fn display_unit(contributing: &[Unit], base_total: Fraction) -> Option<Unit> {
    let first = *contributing.first()?;
    if contributing.iter().all(|unit| *unit == first) {
        return Some(first);
    }

    let one = Fraction::new(1u64, 1u64);
    let mut by_size = contributing.to_vec();
    by_size.sort_by(|a, b| {
        a.base_factor()
            .partial_cmp(&b.base_factor())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(b))
    });
    by_size.dedup();

    by_size
        .iter()
        .rev()
        .find(|unit| {
            unit.from_base(base_total)
                .is_some_and(|value| value >= one && is_kitchen_fraction(value))
        })
        .or_else(|| by_size.first())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_unit_aliases_parse_case_insensitively() {
        assert_eq!(Unit::from_str("Cups").unwrap(), Unit::Cup);
        assert_eq!(Unit::from_str("TBSP").unwrap(), Unit::Tablespoon);
        assert_eq!(Unit::from_str("lbs").unwrap(), Unit::Pound);
        assert_eq!(Unit::from_str("fl oz").unwrap(), Unit::FluidOunce);
        assert_eq!(Unit::from_str("whole").unwrap(), Unit::Piece);
        assert!(Unit::from_str("flour").is_err());
    }

    #[test]
    fn test_volume_conversions() {
        let tbsp = Unit::Tablespoon.to_base(Fraction::new(1u64, 1u64)).unwrap();
        assert_eq!(
            Unit::Teaspoon.from_base(tbsp),
            Some(Fraction::new(3u64, 1u64))
        );

        let cup = Unit::Cup.to_base(Fraction::new(1u64, 1u64)).unwrap();
        assert_eq!(
            Unit::Tablespoon.from_base(cup),
            Some(Fraction::new(16u64, 1u64))
        );
    }

    #[test]
    fn test_weight_conversions_are_exact() {
        let pound = Unit::Pound.to_base(Fraction::new(1u64, 1u64)).unwrap();
        assert_eq!(Unit::Ounce.from_base(pound), Some(Fraction::new(16u64, 1u64)));

        let kilo = Unit::Kilogram.to_base(Fraction::new(2u64, 1u64)).unwrap();
        assert_eq!(Unit::Gram.from_base(kilo), Some(Fraction::new(2000u64, 1u64)));
    }

    #[test]
    fn test_conversion_overflow_is_reported() {
        assert_eq!(Unit::Gallon.to_base(Fraction::new(u64::MAX, 1u64)), None);
    }

    #[test]
    fn test_measures_never_cross_volume_and_weight() {
        assert_eq!(Unit::Cup.measure(), Measure::Volume);
        assert_eq!(Unit::Ounce.measure(), Measure::Weight);
        assert_eq!(Unit::FluidOunce.measure(), Measure::Volume);
        assert_eq!(Unit::Clove.measure(), Measure::Each(Unit::Clove));
        assert_eq!(Unit::Piece.measure(), Measure::Count);
    }

    #[test]
    fn test_display_unit_keeps_agreed_unit() {
        let total = Unit::Teaspoon.to_base(Fraction::new(6u64, 1u64)).unwrap();
        assert_eq!(
            display_unit(&[Unit::Teaspoon, Unit::Teaspoon], total),
            Some(Unit::Teaspoon)
        );
    }

    #[test]
    fn test_display_unit_prefers_largest_reaching_one() {
        // 1 cup + 8 tbsp = 360 ml, 1 1/2 cups
        let total = Fraction::new(360u64, 1u64);
        assert_eq!(
            display_unit(&[Unit::Tablespoon, Unit::Cup], total),
            Some(Unit::Cup)
        );

        // 1 tsp + 1/8 cup = 35 ml, less than a cup
        let total = Fraction::new(35u64, 1u64);
        assert_eq!(
            display_unit(&[Unit::Cup, Unit::Teaspoon], total),
            Some(Unit::Teaspoon)
        );
    }

    #[test]
    fn test_display_unit_falls_back_when_total_is_not_a_kitchen_fraction() {
        // 1 cup + 1 tbsp = 255 ml: 1 1/16 cups, 17 tbsp
        let total = Fraction::new(255u64, 1u64);
        assert_eq!(
            display_unit(&[Unit::Cup, Unit::Tablespoon], total),
            Some(Unit::Tablespoon)
        );

        // 1 lb + 1 oz: 1 1/16 lb, 17 oz
        let total = Unit::Ounce.to_base(Fraction::new(17u64, 1u64)).unwrap();
        assert_eq!(
            display_unit(&[Unit::Pound, Unit::Ounce], total),
            Some(Unit::Ounce)
        );
    }

    #[test]
    fn test_labels_pluralise() {
        assert_eq!(Unit::Cup.label(true), "cups");
        assert_eq!(Unit::Cup.label(false), "cup");
        assert_eq!(Unit::Pound.label(true), "lb");
    }
}
