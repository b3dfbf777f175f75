use std::{path::PathBuf, str::FromStr};

use famplan_shared::family::Family;
use famplan_shared::mealplan::{MealStatus, PlannedMeal};
use famplan_shared::pantry::PantryItem;
use famplan_shared::recipe::Recipe;
use famplan_shopping::{Command, SqliteStore};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use time::macros::date;

pub async fn setup_test_store(path: PathBuf) -> anyhow::Result<SqliteStore> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    famplan_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(SqliteStore::new(famplan_shared::State {
        read_db: pool.clone(),
        write_db: pool,
    }))
}

/// One family with a pancake recipe planned twice and a pantry holding eggs.
#[allow(dead_code)]
pub async fn seed_family(store: &SqliteStore, family_id: &str) -> anyhow::Result<()> {
    store
        .upsert_family(&Family {
            id: family_id.to_owned(),
            name: format!("The {family_id} family"),
        })
        .await?;

    store
        .upsert_recipe(&recipe(
            family_id,
            &format!("{family_id}-pancakes"),
            Some(4),
            &["1 cup flour", "2 eggs", "1 cup milk", "salt to taste"],
        ))
        .await?;

    store
        .upsert_meal(&meal(family_id, &format!("{family_id}-m1"), Some(4)))
        .await?;
    store
        .upsert_meal(&meal(family_id, &format!("{family_id}-m2"), Some(4)))
        .await?;

    store
        .upsert_pantry_item(&PantryItem {
            id: format!("{family_id}-p1"),
            family_id: family_id.to_owned(),
            name: "Eggs".to_owned(),
            quantity: "12".to_owned(),
            unit: String::new(),
            category: "dairy".to_owned(),
            low_stock: false,
        })
        .await?;

    Ok(())
}

#[allow(dead_code)]
pub fn command(store: SqliteStore) -> Command<SqliteStore> {
    Command::new(store)
}

pub fn recipe(family_id: &str, id: &str, servings: Option<u32>, ingredients: &[&str]) -> Recipe {
    Recipe {
        id: id.to_owned(),
        family_id: family_id.to_owned(),
        name: format!("Recipe {id}"),
        ingredients: ingredients.iter().map(|line| line.to_string()).collect(),
        servings,
    }
}

pub fn meal(family_id: &str, id: &str, servings: Option<u32>) -> PlannedMeal {
    PlannedMeal {
        id: id.to_owned(),
        family_id: family_id.to_owned(),
        recipe_id: Some(format!("{family_id}-pancakes")),
        scheduled_for: date!(2024 - 03 - 04),
        servings,
        status: MealStatus::Planned,
    }
}
