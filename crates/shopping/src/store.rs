use async_trait::async_trait;
use famplan_shared::Result;
use famplan_shared::family::Family;
use famplan_shared::mealplan::PlannedMeal;
use famplan_shared::pantry::PantryItem;
use famplan_shared::recipe::Recipe;
use famplan_shared::shopping::{ShoppingList, ShoppingListItem};

use crate::engine::ShoppingListItemDraft;

#[async_trait]
pub trait FamilyStore: Send + Sync {
    async fn family(&self, id: &str) -> Result<Option<Family>>;
}

#[async_trait]
pub trait MealStore: Send + Sync {
    /// Meals among `ids`, whatever family they belong to. Ids that do not
    /// exist are simply absent.
    async fn get_by_ids(&self, family_id: &str, ids: &[String]) -> Result<Vec<PlannedMeal>>;
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn get_by_ids(&self, family_id: &str, ids: &[String]) -> Result<Vec<Recipe>>;
}

#[async_trait]
pub trait PantryStore: Send + Sync {
    async fn get_all(&self, family_id: &str) -> Result<Vec<PantryItem>>;
}

#[async_trait]
pub trait ShoppingListStore: Send + Sync {
    async fn list(&self, id: &str) -> Result<Option<ShoppingList>>;

    async fn create_list(&self, list: &ShoppingList) -> Result<()>;

    /// Idempotent on `(shopping_list_id, normalized_name, unit)`. Existing lines
    /// keep their id and completion flag.
    async fn upsert_items(
        &self,
        list_id: &str,
        drafts: &[ShoppingListItemDraft],
    ) -> Result<Vec<ShoppingListItem>>;

    async fn items(&self, list_id: &str) -> Result<Vec<ShoppingListItem>>;

    async fn item(&self, list_id: &str, item_id: &str) -> Result<Option<ShoppingListItem>>;

    async fn set_completed(&self, list_id: &str, item_id: &str, completed: bool) -> Result<()>;

    /// Uncheck every line of the list.
    async fn reset(&self, list_id: &str) -> Result<()>;
}

/// Everything the shopping list service reads and writes.
pub trait Store: FamilyStore + MealStore + RecipeStore + PantryStore + ShoppingListStore {}

impl<T> Store for T where T: FamilyStore + MealStore + RecipeStore + PantryStore + ShoppingListStore
{}
