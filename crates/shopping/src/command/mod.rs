mod generate;
mod list;
mod reset;
mod toggle;

pub use generate::*;
pub use list::*;

use famplan_shared::shopping::ShoppingList;
use time::OffsetDateTime;

use crate::store::Store;

pub const DEFAULT_MAX_MEALS: usize = 50;

/// Shopping list service. Every operation is scoped to a family: lists owned
/// by another family are reported as not found.
#[derive(Clone)]
pub struct Command<S> {
    store: S,
    max_meals: usize,
}

impl<S: Store> Command<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_meals: DEFAULT_MAX_MEALS,
        }
    }

    pub fn with_max_meals(mut self, max_meals: usize) -> Self {
        self.max_meals = max_meals;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn owned_list(
        &self,
        family_id: &str,
        list_id: &str,
    ) -> famplan_shared::Result<ShoppingList> {
        match self.store.list(list_id).await? {
            Some(list) if list.family_id == family_id => Ok(list),
            _ => famplan_shared::not_found!("shopping list {list_id}"),
        }
    }
}

pub(crate) fn now() -> u64 {
    OffsetDateTime::now_utc()
        .unix_timestamp()
        .try_into()
        .unwrap_or(0)
}
