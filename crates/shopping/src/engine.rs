use std::collections::{HashMap, HashSet};

use fraction::Fraction;
use famplan_shared::mealplan::{MealStatus, PlannedMeal};
use famplan_shared::pantry::PantryItem;
use famplan_shared::recipe::Recipe;
use famplan_shared::shopping::{ItemSource, Priority};
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::aggregation::{AggregatedLine, Amount, Contribution, IngredientAggregation, Quantity};
use crate::categorization::{Category, categorize};
use crate::error::ValidationError;
use crate::fraction_utils::checked_mul;
use crate::normalize::normalize_name;
use crate::parser::{ParsedIngredient, parse_ingredient};
use crate::units::Unit;

/// Store snapshots the engine consolidates. The engine never fetches anything itself.
#[derive(Debug, Clone, Copy)]
pub struct ConsolidationInput<'a> {
    pub family_id: &'a str,
    pub meal_ids: &'a [String],
    pub meals: &'a [PlannedMeal],
    pub recipes: &'a [Recipe],
    pub pantry: &'a [PantryItem],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItemDraft {
    pub name: String,
    pub normalized_name: String,
    pub quantity: Quantity,
    pub unit: Option<Unit>,
    pub category: Category,
    pub aisle: String,
    pub priority: Priority,
    pub source: ItemSource,
    /// First recipe that asked for this line.
    pub recipe_id: String,
    pub recipe_ids: Vec<String>,
    pub meal_ids: Vec<String>,
}

impl ShoppingListItemDraft {
    /// Unit half of the persistence key. Counts have no unit; "as needed"
    /// lines get their own key so they never overwrite a measured line.
    pub fn unit_key(&self) -> &'static str {
        match (self.quantity, self.unit) {
            (Quantity::AsNeeded, _) => "as needed",
            (Quantity::Measured(_), Some(unit)) => unit.key(),
            (Quantity::Measured(_), None) => "",
        }
    }

    /// Unit as shown next to the quantity, pluralised.
    pub fn unit_label(&self) -> &'static str {
        self.unit
            .map(|unit| unit.label(self.quantity.is_plural()))
            .unwrap_or_default()
    }

    /// `"2 cups flour"`, `"3 eggs"`, `"salt to taste (as needed)"`.
    pub fn label(&self) -> String {
        match (self.quantity, self.unit) {
            (Quantity::AsNeeded, _) => format!("{} (as needed)", self.name),
            (quantity, Some(_)) => {
                format!("{} {} {}", quantity.display(), self.unit_label(), self.name)
            }
            (quantity, None) => format!("{} {}", quantity.display(), self.name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SkipTarget {
    Meal,
    Recipe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    UnknownMeal,
    AdHocMeal,
    UnknownRecipe,
    DuplicateMeal,
    MealCompleted,
    EmptyRecipe,
}

/// An input that contributed nothing, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipReport {
    pub id: String,
    pub kind: SkipTarget,
    pub reason: SkipReason,
}

/// A name that could not be merged into one line because its units are incompatible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitConflict {
    pub normalized_name: String,
    pub units: Vec<String>,
}

/// Non-fatal: the list was built from the resolvable subset of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialResolutionWarning {
    pub message: String,
    pub skipped: Vec<SkipReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListProposal {
    pub proposed_items: Vec<ShoppingListItemDraft>,
    pub skipped_for_pantry: Vec<PantryItem>,
    pub skipped: Vec<SkipReport>,
    pub unit_conflicts: Vec<UnitConflict>,
}

impl ShoppingListProposal {
    pub fn warning(&self) -> Option<PartialResolutionWarning> {
        if self.skipped.is_empty() {
            return None;
        }

        Some(PartialResolutionWarning {
            message: format!(
                "{} meal or recipe reference(s) contributed nothing to the list",
                self.skipped.len()
            ),
            skipped: self.skipped.clone(),
        })
    }
}

/// Consolidate the recipes behind a set of planned meals into a pantry-aware
/// shopping list proposal.
///
/// Meals are visited in `meal_ids` order. Every ingredient line is scaled by
/// the meal's servings over the recipe's, grouped by normalized name and merged
/// within its measure. Names the pantry holds (and is not low on) are left out
/// and reported; names the pantry is low on are proposed at high priority.
///
/// Only malformed input fails. Unresolvable meals and recipes are reported in
/// [`ShoppingListProposal::skipped`].
pub fn generate_shopping_list(
    input: ConsolidationInput<'_>,
) -> Result<ShoppingListProposal, ValidationError> {
    let family_id = input.family_id.trim();
    if family_id.is_empty() {
        return Err(ValidationError::MissingFamily);
    }

    if input.meal_ids.is_empty() {
        return Err(ValidationError::NoMeals);
    }

    check_family("meal", family_id, input.meals.iter().map(|m| (&m.id, &m.family_id)))?;
    check_family(
        "recipe",
        family_id,
        input.recipes.iter().map(|r| (&r.id, &r.family_id)),
    )?;
    check_family(
        "pantry item",
        family_id,
        input.pantry.iter().map(|p| (&p.id, &p.family_id)),
    )?;

    let meals: HashMap<&str, &PlannedMeal> =
        input.meals.iter().map(|m| (m.id.as_str(), m)).collect();
    let recipes: HashMap<&str, &Recipe> =
        input.recipes.iter().map(|r| (r.id.as_str(), r)).collect();

    let mut skipped = Vec::new();
    let mut seen = HashSet::new();
    let mut aggregation = IngredientAggregation::default();

    for meal_id in input.meal_ids {
        let meal_id = meal_id.as_str();

        if !seen.insert(meal_id) {
            skip(&mut skipped, meal_id, SkipTarget::Meal, SkipReason::DuplicateMeal);
            continue;
        }

        let Some(meal) = meals.get(meal_id) else {
            skip(&mut skipped, meal_id, SkipTarget::Meal, SkipReason::UnknownMeal);
            continue;
        };

        if meal.status == MealStatus::Completed {
            skip(&mut skipped, meal_id, SkipTarget::Meal, SkipReason::MealCompleted);
            continue;
        }

        let Some(recipe_id) = meal.recipe_id.as_deref().filter(|id| !id.trim().is_empty()) else {
            skip(&mut skipped, meal_id, SkipTarget::Meal, SkipReason::AdHocMeal);
            continue;
        };

        let Some(recipe) = recipes.get(recipe_id) else {
            skip(&mut skipped, recipe_id, SkipTarget::Recipe, SkipReason::UnknownRecipe);
            continue;
        };

        let lines: Vec<&str> = recipe
            .ingredients
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            skip(&mut skipped, recipe_id, SkipTarget::Recipe, SkipReason::EmptyRecipe);
            continue;
        }

        let factor = scale_factor(meal.servings, recipe.servings);

        for line in lines {
            let mut normalized = normalize_name(line);
            if normalized.is_empty() {
                normalized = line.to_lowercase();
            }

            let (name, amount) = match parse_ingredient(line) {
                ParsedIngredient::Parsed {
                    quantity,
                    unit,
                    name,
                } => match checked_mul(quantity, factor) {
                    Some(quantity) => (name, Amount::Measured { quantity, unit }),
                    None => {
                        tracing::debug!(line, "scaled amount too large, bought as needed");
                        (line.to_owned(), Amount::AsNeeded)
                    }
                },
                ParsedIngredient::Unparsed { text } => (text, Amount::AsNeeded),
            };

            aggregation.add(
                &normalized,
                Contribution {
                    name: &name,
                    amount,
                    recipe_id: &recipe.id,
                    meal_id,
                },
            );
        }
    }

    let pantry = pantry_by_name(input.pantry);
    let mut proposal = ShoppingListProposal {
        skipped,
        ..Default::default()
    };

    for (normalized_name, lines) in aggregation.finish() {
        let on_hand = pantry.get(normalized_name.as_str());

        let priority = match on_hand {
            Some(items) if items.iter().any(|item| !item.low_stock) => {
                tracing::debug!(name = %normalized_name, "ingredient covered by pantry");
                for item in items.iter().filter(|item| !item.low_stock) {
                    if !proposal.skipped_for_pantry.iter().any(|p| p.id == item.id) {
                        proposal.skipped_for_pantry.push((*item).clone());
                    }
                }
                continue;
            }
            Some(_) => Priority::High,
            None => Priority::Normal,
        };

        if lines.len() > 1 {
            tracing::debug!(
                name = %normalized_name,
                lines = lines.len(),
                "incompatible units kept as separate lines"
            );
        }

        let category = categorize(&normalized_name);
        let drafts: Vec<ShoppingListItemDraft> = lines
            .into_iter()
            .map(|line| draft(&normalized_name, line, category, priority))
            .collect();

        if drafts.len() > 1 {
            proposal.unit_conflicts.push(UnitConflict {
                normalized_name: normalized_name.clone(),
                units: drafts.iter().map(conflict_label).collect(),
            });
        }

        proposal.proposed_items.extend(drafts);
    }

    // Groups arrive in name order; a stable sort keeps it within a category.
    proposal.proposed_items.sort_by_key(|item| item.category);

    Ok(proposal)
}

fn check_family<'a>(
    kind: &'static str,
    family_id: &str,
    records: impl Iterator<Item = (&'a String, &'a String)>,
) -> Result<(), ValidationError> {
    for (id, owner) in records {
        if owner != family_id {
            return Err(ValidationError::CrossFamily {
                kind,
                id: id.to_owned(),
                family_id: family_id.to_owned(),
            });
        }
    }

    Ok(())
}

fn skip(skipped: &mut Vec<SkipReport>, id: &str, kind: SkipTarget, reason: SkipReason) {
    tracing::debug!(id, kind = %kind, reason = %reason, "input skipped");

    let report = SkipReport {
        id: id.to_owned(),
        kind,
        reason,
    };

    if !skipped.contains(&report) {
        skipped.push(report);
    }
}

/// Meal servings over recipe servings, 1 when either is unknown.
fn scale_factor(meal_servings: Option<u32>, recipe_servings: Option<u32>) -> Fraction {
    match (meal_servings, recipe_servings) {
        (Some(meal), Some(recipe)) if meal > 0 && recipe > 0 => {
            Fraction::new(u64::from(meal), u64::from(recipe))
        }
        _ => Fraction::new(1u64, 1u64),
    }
}

fn pantry_by_name(pantry: &[PantryItem]) -> HashMap<String, Vec<&PantryItem>> {
    let mut by_name: HashMap<String, Vec<&PantryItem>> = HashMap::new();

    for item in pantry {
        let normalized = normalize_name(&item.name);
        if normalized.is_empty() {
            continue;
        }

        by_name.entry(normalized).or_default().push(item);
    }

    by_name
}

fn draft(
    normalized_name: &str,
    line: AggregatedLine,
    category: Category,
    priority: Priority,
) -> ShoppingListItemDraft {
    ShoppingListItemDraft {
        name: line.name,
        normalized_name: normalized_name.to_owned(),
        quantity: line.quantity,
        unit: line.unit,
        category,
        aisle: category.aisle().to_owned(),
        priority,
        source: ItemSource::Recipe,
        recipe_id: line.recipe_ids.first().cloned().unwrap_or_default(),
        recipe_ids: line.recipe_ids,
        meal_ids: line.meal_ids,
    }
}

fn conflict_label(item: &ShoppingListItemDraft) -> String {
    match (item.quantity, item.unit) {
        (Quantity::AsNeeded, _) => "as needed".to_owned(),
        (_, Some(unit)) => unit.key().to_owned(),
        (_, None) => "count".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn recipe(id: &str, servings: Option<u32>, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: id.to_owned(),
            family_id: "f1".to_owned(),
            name: format!("Recipe {id}"),
            ingredients: ingredients.iter().map(|line| line.to_string()).collect(),
            servings,
        }
    }

    fn meal(id: &str, recipe_id: Option<&str>, servings: Option<u32>) -> PlannedMeal {
        PlannedMeal {
            id: id.to_owned(),
            family_id: "f1".to_owned(),
            recipe_id: recipe_id.map(str::to_owned),
            scheduled_for: date!(2024 - 03 - 04),
            servings,
            status: MealStatus::Planned,
        }
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn run(
        meal_ids: &[String],
        meals: &[PlannedMeal],
        recipes: &[Recipe],
        pantry: &[PantryItem],
    ) -> Result<ShoppingListProposal, ValidationError> {
        generate_shopping_list(ConsolidationInput {
            family_id: "f1",
            meal_ids,
            meals,
            recipes,
            pantry,
        })
    }

    #[test]
    fn test_scales_by_servings() {
        let recipes = [recipe("r1", Some(4), &["1 cup rice", "2 eggs"])];
        let meals = [meal("m1", Some("r1"), Some(6))];

        let proposal = run(&ids(&["m1"]), &meals, &recipes, &[]).unwrap();
        let labels: Vec<String> = proposal.proposed_items.iter().map(|i| i.label()).collect();

        assert_eq!(labels, vec!["3 eggs", "1 1/2 cups rice"]);
    }

    #[test]
    fn test_missing_servings_do_not_scale() {
        assert_eq!(scale_factor(None, Some(4)), Fraction::new(1u64, 1u64));
        assert_eq!(scale_factor(Some(2), None), Fraction::new(1u64, 1u64));
        assert_eq!(scale_factor(Some(2), Some(0)), Fraction::new(1u64, 1u64));
        assert_eq!(scale_factor(Some(2), Some(4)), Fraction::new(1u64, 2u64));
    }

    #[test]
    fn test_skip_reasons() {
        let recipes = [recipe("r1", None, &["1 lb beef"]), recipe("r2", None, &["  "])];
        let mut done = meal("m3", Some("r1"), None);
        done.status = MealStatus::Completed;
        let meals = [
            meal("m1", Some("r1"), None),
            meal("m2", None, None),
            done,
            meal("m4", Some("missing"), None),
            meal("m5", Some("r2"), None),
        ];

        let proposal = run(
            &ids(&["m1", "m1", "m2", "m3", "m4", "m5", "nope"]),
            &meals,
            &recipes,
            &[],
        )
        .unwrap();

        let reasons: Vec<(&str, SkipReason)> = proposal
            .skipped
            .iter()
            .map(|s| (s.id.as_str(), s.reason))
            .collect();

        assert_eq!(
            reasons,
            vec![
                ("m1", SkipReason::DuplicateMeal),
                ("m2", SkipReason::AdHocMeal),
                ("m3", SkipReason::MealCompleted),
                ("missing", SkipReason::UnknownRecipe),
                ("r2", SkipReason::EmptyRecipe),
                ("nope", SkipReason::UnknownMeal),
            ]
        );
        assert_eq!(proposal.proposed_items.len(), 1);
        assert_eq!(proposal.proposed_items[0].meal_ids, vec!["m1"]);
        assert!(proposal.warning().is_some());
    }

    #[test]
    fn test_validation_errors() {
        let recipes = [recipe("r1", None, &["1 lb beef"])];
        let meals = [meal("m1", Some("r1"), None)];

        assert_eq!(
            run(&[], &meals, &recipes, &[]).unwrap_err(),
            ValidationError::NoMeals
        );

        let err = generate_shopping_list(ConsolidationInput {
            family_id: "  ",
            meal_ids: &ids(&["m1"]),
            meals: &meals,
            recipes: &recipes,
            pantry: &[],
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingFamily);

        let mut foreign = recipe("r2", None, &["1 egg"]);
        foreign.family_id = "f2".to_owned();
        let err = run(&ids(&["m1"]), &meals, &[foreign], &[]).unwrap_err();
        assert!(matches!(err, ValidationError::CrossFamily { kind: "recipe", .. }));
    }

    #[test]
    fn test_unit_conflicts_are_reported() {
        let recipes = [recipe("r1", None, &["1 cup milk", "8 oz milk", "milk to taste"])];
        let meals = [meal("m1", Some("r1"), None)];

        let proposal = run(&ids(&["m1"]), &meals, &recipes, &[]).unwrap();

        assert_eq!(proposal.proposed_items.len(), 3);
        assert_eq!(
            proposal.unit_conflicts,
            vec![UnitConflict {
                normalized_name: "milk".to_owned(),
                units: vec!["cup".to_owned(), "oz".to_owned(), "as needed".to_owned()],
            }]
        );
        assert!(proposal.warning().is_none());
    }

    #[test]
    fn test_items_follow_store_walk_order() {
        let recipes = [recipe(
            "r1",
            None,
            &["1 cup sugar", "2 apples", "1 lb chicken breast", "1 cup milk"],
        )];
        let meals = [meal("m1", Some("r1"), None)];

        let proposal = run(&ids(&["m1"]), &meals, &recipes, &[]).unwrap();
        let names: Vec<&str> = proposal
            .proposed_items
            .iter()
            .map(|i| i.normalized_name.as_str())
            .collect();

        assert_eq!(names, vec!["apple", "milk", "chicken breast", "sugar"]);
        assert_eq!(proposal.proposed_items[0].aisle, "Fresh Produce");
    }
}
