use crate::store::Store;

impl<S: Store> super::Command<S> {
    #[tracing::instrument(skip(self))]
    pub async fn reset(&self, family_id: &str, list_id: &str) -> famplan_shared::Result<()> {
        self.owned_list(family_id, list_id).await?;

        self.store.reset(list_id).await
    }
}
