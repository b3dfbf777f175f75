use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::ShoppingListItem;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ShoppingListItem::Table)
        .col(
            ColumnDef::new(ShoppingListItem::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(ShoppingListItem::ShoppingListId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(ShoppingListItem::Name).string().not_null())
        .col(
            ColumnDef::new(ShoppingListItem::NormalizedName)
                .string()
                .not_null(),
        )
        .col(
            ColumnDef::new(ShoppingListItem::Quantity)
                .string()
                .not_null(),
        )
        .col(ColumnDef::new(ShoppingListItem::Unit).string().not_null())
        .col(
            ColumnDef::new(ShoppingListItem::Category)
                .string()
                .not_null(),
        )
        .col(ColumnDef::new(ShoppingListItem::Aisle).string().not_null())
        .col(
            ColumnDef::new(ShoppingListItem::Completed)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(ShoppingListItem::Source)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(
            ColumnDef::new(ShoppingListItem::RecipeId)
                .string()
                .null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(ShoppingListItem::MealIds)
                .text()
                .not_null(),
        )
        .col(
            ColumnDef::new(ShoppingListItem::Priority)
                .integer()
                .not_null()
                .default(1),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ShoppingListItem::Table).to_owned()
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

/// Upsert key: one line per normalized name and unit within a list.
pub struct CreateKeyIdx;

fn create_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_shopping_list_item_key")
        .table(ShoppingListItem::Table)
        .unique()
        .col(ShoppingListItem::ShoppingListId)
        .col(ShoppingListItem::NormalizedName)
        .col(ShoppingListItem::Unit)
        .to_owned()
}

fn drop_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_shopping_list_item_key")
        .table(ShoppingListItem::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateKeyIdx {
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
