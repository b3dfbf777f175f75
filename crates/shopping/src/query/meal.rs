use std::str::FromStr;

use async_trait::async_trait;
use famplan_db::table::PlannedMeal as PlannedMealTable;
use famplan_shared::mealplan::{MealStatus, PlannedMeal};
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;
use time::{Date, macros::format_description};

use crate::store::MealStore;

#[derive(FromRow)]
struct MealRow {
    id: String,
    family_id: String,
    recipe_id: Option<String>,
    scheduled_for: String,
    servings: Option<u32>,
    status: String,
}

impl TryFrom<MealRow> for PlannedMeal {
    type Error = famplan_shared::Error;

    fn try_from(row: MealRow) -> Result<Self, Self::Error> {
        let scheduled_for =
            Date::parse(&row.scheduled_for, format_description!("[year]-[month]-[day]"))?;
        let status = MealStatus::from_str(&row.status).map_err(anyhow::Error::from)?;

        Ok(PlannedMeal {
            id: row.id,
            family_id: row.family_id,
            recipe_id: row.recipe_id,
            scheduled_for,
            servings: row.servings,
            status,
        })
    }
}

impl super::SqliteStore {
    pub async fn upsert_meal(&self, meal: &PlannedMeal) -> famplan_shared::Result<()> {
        let statement = Query::insert()
            .into_table(PlannedMealTable::Table)
            .columns([
                PlannedMealTable::Id,
                PlannedMealTable::FamilyId,
                PlannedMealTable::RecipeId,
                PlannedMealTable::ScheduledFor,
                PlannedMealTable::Servings,
                PlannedMealTable::Status,
            ])
            .values_panic([
                meal.id.to_owned().into(),
                meal.family_id.to_owned().into(),
                meal.recipe_id.to_owned().into(),
                meal.scheduled_for.to_string().into(),
                meal.servings.into(),
                meal.status.to_string().into(),
            ])
            .on_conflict(
                OnConflict::column(PlannedMealTable::Id)
                    .update_columns([
                        PlannedMealTable::FamilyId,
                        PlannedMealTable::RecipeId,
                        PlannedMealTable::ScheduledFor,
                        PlannedMealTable::Servings,
                        PlannedMealTable::Status,
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
impl MealStore for super::SqliteStore {
    // Meals of other families are returned too, so the engine can reject them.
    async fn get_by_ids(
        &self,
        _family_id: &str,
        ids: &[String],
    ) -> famplan_shared::Result<Vec<PlannedMeal>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = Query::select()
            .columns([
                PlannedMealTable::Id,
                PlannedMealTable::FamilyId,
                PlannedMealTable::RecipeId,
                PlannedMealTable::ScheduledFor,
                PlannedMealTable::Servings,
                PlannedMealTable::Status,
            ])
            .from(PlannedMealTable::Table)
            .and_where(Expr::col(PlannedMealTable::Id).is_in(ids.to_vec()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, MealRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        rows.into_iter().map(PlannedMeal::try_from).collect()
    }
}
