use anyhow::Result;
use famplan_shopping::{Command, GenerateInput, SqliteStore};

use crate::routes::shopping::GenerateResponse;

/// Print the proposal for a set of meals as pretty JSON, without saving it.
#[tracing::instrument(skip(config))]
pub async fn generate(
    config: &crate::config::Config,
    family_id: String,
    meal_ids: Vec<String>,
) -> Result<()> {
    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    let store = SqliteStore::new(famplan_shared::State {
        read_db: pool.clone(),
        write_db: pool.clone(),
    });
    let command = Command::new(store).with_max_meals(config.shopping.max_meals_per_request);

    let proposal = command
        .generate(GenerateInput {
            family_id,
            meal_ids,
        })
        .await?;
    pool.close().await;

    let response = GenerateResponse::from(proposal);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
