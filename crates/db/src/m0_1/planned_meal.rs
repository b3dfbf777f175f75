use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::PlannedMeal;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(PlannedMeal::Table)
        .col(
            ColumnDef::new(PlannedMeal::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(PlannedMeal::FamilyId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(PlannedMeal::RecipeId)
                .string()
                .null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(PlannedMeal::ScheduledFor)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(ColumnDef::new(PlannedMeal::Servings).integer().null())
        .col(
            ColumnDef::new(PlannedMeal::Status)
                .string()
                .not_null()
                .string_len(15),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(PlannedMeal::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateFamilyIdx;

fn create_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_planned_meal_family_id")
        .table(PlannedMeal::Table)
        .col(PlannedMeal::FamilyId)
        .col(PlannedMeal::ScheduledFor)
        .to_owned()
}

fn drop_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_planned_meal_family_id")
        .table(PlannedMeal::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateFamilyIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
