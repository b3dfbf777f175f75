use famplan_shared::shopping::ShoppingListItem;

use crate::store::Store;

impl<S: Store> super::Command<S> {
    /// Flip the completion flag of one line and return it as stored.
    #[tracing::instrument(skip(self))]
    pub async fn toggle(
        &self,
        family_id: &str,
        list_id: &str,
        item_id: &str,
    ) -> famplan_shared::Result<ShoppingListItem> {
        self.owned_list(family_id, list_id).await?;

        let Some(mut item) = self.store.item(list_id, item_id).await? else {
            famplan_shared::not_found!("shopping list item {item_id}");
        };

        item.completed = !item.completed;

        self.store
            .set_completed(list_id, item_id, item.completed)
            .await?;

        Ok(item)
    }
}
