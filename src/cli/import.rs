use std::path::Path;

use anyhow::Result;
use famplan_shared::family::Family;
use famplan_shared::mealplan::PlannedMeal;
use famplan_shared::pantry::PantryItem;
use famplan_shared::recipe::Recipe;
use famplan_shopping::SqliteStore;
use serde::Deserialize;

/// Seed data for a database: families with their recipes, planned meals and pantry.
#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct Fixture {
    pub families: Vec<Family>,
    pub recipes: Vec<Recipe>,
    pub meals: Vec<PlannedMeal>,
    pub pantry: Vec<PantryItem>,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Upserts every record, so importing the same file twice is harmless.
    pub async fn apply(&self, store: &SqliteStore) -> Result<()> {
        for family in &self.families {
            store.upsert_family(family).await?;
        }
        for recipe in &self.recipes {
            store.upsert_recipe(recipe).await?;
        }
        for meal in &self.meals {
            store.upsert_meal(meal).await?;
        }
        for item in &self.pantry {
            store.upsert_pantry_item(item).await?;
        }

        Ok(())
    }
}

#[tracing::instrument(skip(config))]
pub async fn import(config: &crate::config::Config, path: &Path) -> Result<()> {
    let json = tokio::fs::read_to_string(path).await?;
    let fixture = Fixture::from_json(&json)?;

    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    let store = SqliteStore::new(famplan_shared::State {
        read_db: pool.clone(),
        write_db: pool.clone(),
    });

    fixture.apply(&store).await?;
    pool.close().await;

    tracing::info!(
        families = fixture.families.len(),
        recipes = fixture.recipes.len(),
        meals = fixture.meals.len(),
        pantry = fixture.pantry.len(),
        "Fixture imported"
    );

    Ok(())
}
