use serde::{Deserialize, Serialize};

/// A family recipe. Ingredients are free-text lines such as `"2 cups flour"`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub family_id: String,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub servings: Option<u32>,
}
