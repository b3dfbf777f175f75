use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::Date;

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Serialize,
    Deserialize,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MealStatus {
    #[default]
    Planned,
    Prepared,
    Completed,
}

/// A scheduled instance of cooking a recipe. Ad-hoc entries have no recipe.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlannedMeal {
    pub id: String,
    pub family_id: String,
    #[serde(default)]
    pub recipe_id: Option<String>,
    pub scheduled_for: Date,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub status: MealStatus,
}
