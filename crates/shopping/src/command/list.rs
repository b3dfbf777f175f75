use famplan_shared::shopping::{ShoppingList, ShoppingListItem};
use serde::Deserialize;
use validator::Validate;

use crate::error::ValidationError;
use crate::store::Store;

#[derive(Validate, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateListInput {
    #[validate(length(min = 1))]
    pub family_id: String,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
}

impl<S: Store> super::Command<S> {
    #[tracing::instrument(skip_all, fields(family_id = %input.family_id))]
    pub async fn create_list(
        &self,
        input: CreateListInput,
    ) -> famplan_shared::Result<ShoppingList> {
        input.validate()?;

        if self.store.family(&input.family_id).await?.is_none() {
            return Err(ValidationError::UnknownFamily(input.family_id).into());
        }

        let list = ShoppingList {
            id: ulid::Ulid::new().to_string(),
            family_id: input.family_id,
            name: input.name.trim().to_owned(),
            created_at: super::now(),
        };

        self.store.create_list(&list).await?;

        tracing::info!(list_id = %list.id, "shopping list created");

        Ok(list)
    }

    pub async fn items(
        &self,
        family_id: &str,
        list_id: &str,
    ) -> famplan_shared::Result<Vec<ShoppingListItem>> {
        self.owned_list(family_id, list_id).await?;

        self.store.items(list_id).await
    }
}
