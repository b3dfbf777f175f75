use std::collections::BTreeMap;

use fraction::Fraction;
use serde::{Serialize, Serializer};

use crate::fraction_utils::{checked_add, format_quantity, zero};
use crate::units::{Measure, Unit, display_unit};

/// Amount on a shopping-list line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Measured(Fraction),
    /// Unparsed lines such as "salt to taste".
    AsNeeded,
}

impl Quantity {
    /// Exact amount as shown and stored: `"2"`, `"1 1/2"`, `"17"`.
    pub fn display(&self) -> String {
        match self {
            Quantity::Measured(value) => format_quantity(*value),
            Quantity::AsNeeded => "as needed".to_string(),
        }
    }

    pub fn is_plural(&self) -> bool {
        match self {
            Quantity::Measured(value) => *value > Fraction::new(1u64, 1u64),
            Quantity::AsNeeded => false,
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display())
    }
}

/// One scaled ingredient line from one meal.
#[derive(Debug, Clone)]
pub struct Contribution<'a> {
    pub name: &'a str,
    pub amount: Amount,
    pub recipe_id: &'a str,
    pub meal_id: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Measured {
        quantity: Fraction,
        unit: Option<Unit>,
    },
    AsNeeded,
}

impl Amount {
    fn key(&self) -> LineKey {
        match self {
            Amount::Measured { unit, .. } => {
                LineKey::Measured(unit.map(|unit| unit.measure()).unwrap_or(Measure::Count))
            }
            Amount::AsNeeded => LineKey::AsNeeded,
        }
    }
}

/// Contributions sharing a line key are merged; different keys stay separate lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineKey {
    Measured(Measure),
    AsNeeded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedLine {
    pub key: LineKey,
    pub name: String,
    pub quantity: Quantity,
    pub unit: Option<Unit>,
    pub recipe_ids: Vec<String>,
    pub meal_ids: Vec<String>,
}

#[derive(Debug)]
struct Accumulator {
    name: String,
    base_total: Fraction,
    units: Vec<Option<Unit>>,
    recipe_ids: Vec<String>,
    meal_ids: Vec<String>,
}

impl Accumulator {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_total: zero(),
            units: Vec::new(),
            recipe_ids: Vec::new(),
            meal_ids: Vec::new(),
        }
    }

    fn finish(self, key: LineKey) -> AggregatedLine {
        let (quantity, unit) = match key {
            LineKey::AsNeeded => (Quantity::AsNeeded, None),
            // A bare count anywhere keeps the whole line unitless.
            LineKey::Measured(_) if self.units.iter().any(Option::is_none) => {
                (Quantity::Measured(self.base_total), None)
            }
            LineKey::Measured(_) => {
                let units: Vec<Unit> = self.units.iter().flatten().copied().collect();
                let unit = display_unit(&units, self.base_total);

                match unit.and_then(|unit| unit.from_base(self.base_total)) {
                    Some(quantity) => (Quantity::Measured(quantity), unit),
                    None => (Quantity::AsNeeded, None),
                }
            }
        };

        AggregatedLine {
            key,
            name: self.name,
            quantity,
            unit,
            recipe_ids: self.recipe_ids,
            meal_ids: self.meal_ids,
        }
    }
}

/// Ingredient Aggregation
///
/// Groups contributions by normalized name, then by measure within a name.
/// Measured amounts are summed exactly in base units (ml, g, count) and only
/// converted back for display, so a merge never loses quantity. An amount too
/// large to sum exactly is bought "as needed" on its own line instead.
///
/// - "1 cup flour" + "1 cup flour" = "2 cups flour"
/// - "3 tsp sugar" + "1 tbsp sugar" = "2 tbsp sugar"
/// - "1 cup butter" + "1 tbsp butter" = "17 tbsp butter"
/// - "1 cup milk" + "8 oz milk" = 2 separate lines (volume and weight)
#[derive(Debug, Default)]
pub struct IngredientAggregation {
    groups: BTreeMap<String, BTreeMap<LineKey, Accumulator>>,
}

impl IngredientAggregation {
    pub fn add(&mut self, normalized_name: &str, contribution: Contribution<'_>) {
        let lines = self.groups.entry(normalized_name.to_string()).or_default();
        let mut key = contribution.amount.key();

        if let Amount::Measured { quantity, unit } = contribution.amount {
            let total = match lines.get(&key) {
                Some(accumulator) => {
                    total_with(accumulator.base_total, &accumulator.units, quantity, unit)
                }
                None => total_with(zero(), &[], quantity, unit),
            };

            match total {
                Some(total) => {
                    let accumulator = lines
                        .entry(key)
                        .or_insert_with(|| Accumulator::new(contribution.name));
                    accumulator.base_total = total;
                    accumulator.units.push(unit);
                }
                None => {
                    tracing::debug!(name = normalized_name, "amount too large to merge exactly");
                    key = LineKey::AsNeeded;
                }
            }
        }

        let accumulator = lines
            .entry(key)
            .or_insert_with(|| Accumulator::new(contribution.name));
        push_unique(&mut accumulator.recipe_ids, contribution.recipe_id);
        push_unique(&mut accumulator.meal_ids, contribution.meal_id);
    }

    /// Merged lines per normalized name, names in ascending order and lines
    /// in measure order.
    pub fn finish(self) -> Vec<(String, Vec<AggregatedLine>)> {
        self.groups
            .into_iter()
            .map(|(name, lines)| {
                let lines = lines
                    .into_iter()
                    .map(|(key, accumulator)| accumulator.finish(key))
                    .collect();
                (name, lines)
            })
            .collect()
    }
}

/// Exact base total once `quantity` joins a line, `None` when it would
/// overflow in the base unit or in any unit the line may be shown in.
fn total_with(
    base_total: Fraction,
    units: &[Option<Unit>],
    quantity: Fraction,
    unit: Option<Unit>,
) -> Option<Fraction> {
    let base = match unit {
        Some(unit) => unit.to_base(quantity)?,
        None => quantity,
    };
    let total = checked_add(base_total, base)?;

    units
        .iter()
        .chain(std::iter::once(&unit))
        .flatten()
        .all(|unit| unit.from_base(total).is_some())
        .then_some(total)
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}
