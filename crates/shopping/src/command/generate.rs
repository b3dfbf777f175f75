use std::collections::HashSet;

use famplan_shared::shopping::ShoppingListItem;
use serde::Deserialize;
use validator::Validate;

use crate::engine::{ConsolidationInput, ShoppingListProposal, generate_shopping_list};
use crate::error::ValidationError;
use crate::store::{MealStore, RecipeStore, Store};

#[derive(Validate, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInput {
    #[validate(length(min = 1))]
    pub family_id: String,
    #[validate(length(min = 1))]
    pub meal_ids: Vec<String>,
}

impl<S: Store> super::Command<S> {
    #[tracing::instrument(
        skip_all,
        fields(family_id = %input.family_id, meals = input.meal_ids.len())
    )]
    pub async fn generate(
        &self,
        input: GenerateInput,
    ) -> famplan_shared::Result<ShoppingListProposal> {
        if input.family_id.trim().is_empty() {
            return Err(ValidationError::MissingFamily.into());
        }

        if input.meal_ids.is_empty() {
            return Err(ValidationError::NoMeals.into());
        }

        input.validate()?;

        if input.meal_ids.len() > self.max_meals {
            famplan_shared::user!(
                "at most {} meals can be consolidated at once",
                self.max_meals
            );
        }

        if self.store.family(&input.family_id).await?.is_none() {
            return Err(ValidationError::UnknownFamily(input.family_id).into());
        }

        let meals = MealStore::get_by_ids(&self.store, &input.family_id, &input.meal_ids).await?;

        let mut seen = HashSet::new();
        let recipe_ids = meals
            .iter()
            .filter_map(|meal| meal.recipe_id.as_deref())
            .filter(|id| !id.trim().is_empty() && seen.insert(*id))
            .map(ToOwned::to_owned)
            .collect::<Vec<_>>();

        let recipes = RecipeStore::get_by_ids(&self.store, &input.family_id, &recipe_ids).await?;
        let pantry = self.store.get_all(&input.family_id).await?;

        let proposal = generate_shopping_list(ConsolidationInput {
            family_id: &input.family_id,
            meal_ids: &input.meal_ids,
            meals: &meals,
            recipes: &recipes,
            pantry: &pantry,
        })?;

        tracing::info!(
            proposed = proposal.proposed_items.len(),
            skipped_for_pantry = proposal.skipped_for_pantry.len(),
            skipped = proposal.skipped.len(),
            unit_conflicts = proposal.unit_conflicts.len(),
            "shopping list generated"
        );

        Ok(proposal)
    }

    /// Generate a proposal and persist it into an existing list of the family.
    /// Lines already on the list are updated in place and keep their state.
    #[tracing::instrument(skip(self, meal_ids))]
    pub async fn generate_into(
        &self,
        family_id: &str,
        list_id: &str,
        meal_ids: Vec<String>,
    ) -> famplan_shared::Result<(ShoppingListProposal, Vec<ShoppingListItem>)> {
        self.owned_list(family_id, list_id).await?;

        let proposal = self
            .generate(GenerateInput {
                family_id: family_id.to_owned(),
                meal_ids,
            })
            .await?;

        let items = self
            .store
            .upsert_items(list_id, &proposal.proposed_items)
            .await?;

        tracing::info!(items = items.len(), "shopping list items saved");

        Ok((proposal, items))
    }
}
