use serde::{Deserialize, Serialize};

/// Something the family already has on hand.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub id: String,
    pub family_id: String,
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub low_stock: bool,
}
