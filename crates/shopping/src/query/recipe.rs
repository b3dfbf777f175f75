use async_trait::async_trait;
use famplan_db::table::Recipe as RecipeTable;
use famplan_shared::recipe::Recipe;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

use crate::store::RecipeStore;

#[derive(FromRow)]
struct RecipeRow {
    id: String,
    family_id: String,
    name: String,
    ingredients: sqlx::types::Json<Vec<String>>,
    servings: Option<u32>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            family_id: row.family_id,
            name: row.name,
            ingredients: row.ingredients.0,
            servings: row.servings,
        }
    }
}

impl super::SqliteStore {
    pub async fn upsert_recipe(&self, recipe: &Recipe) -> famplan_shared::Result<()> {
        let ingredients = serde_json::to_string(&recipe.ingredients)?;

        let statement = Query::insert()
            .into_table(RecipeTable::Table)
            .columns([
                RecipeTable::Id,
                RecipeTable::FamilyId,
                RecipeTable::Name,
                RecipeTable::Ingredients,
                RecipeTable::Servings,
            ])
            .values_panic([
                recipe.id.to_owned().into(),
                recipe.family_id.to_owned().into(),
                recipe.name.to_owned().into(),
                ingredients.into(),
                recipe.servings.into(),
            ])
            .on_conflict(
                OnConflict::column(RecipeTable::Id)
                    .update_columns([
                        RecipeTable::FamilyId,
                        RecipeTable::Name,
                        RecipeTable::Ingredients,
                        RecipeTable::Servings,
                    ])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }
}

#[async_trait]
impl RecipeStore for super::SqliteStore {
    async fn get_by_ids(
        &self,
        _family_id: &str,
        ids: &[String],
    ) -> famplan_shared::Result<Vec<Recipe>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = Query::select()
            .columns([
                RecipeTable::Id,
                RecipeTable::FamilyId,
                RecipeTable::Name,
                RecipeTable::Ingredients,
                RecipeTable::Servings,
            ])
            .from(RecipeTable::Table)
            .and_where(Expr::col(RecipeTable::Id).is_in(ids.to_vec()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }
}
