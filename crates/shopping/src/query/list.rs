use std::str::FromStr;

use async_trait::async_trait;
use famplan_db::table::{ShoppingList as ShoppingListTable, ShoppingListItem as ItemTable};
use famplan_shared::shopping::{ItemSource, Priority, ShoppingList, ShoppingListItem};
use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

use crate::engine::ShoppingListItemDraft;
use crate::store::ShoppingListStore;

#[derive(FromRow)]
struct ItemRow {
    id: String,
    shopping_list_id: String,
    name: String,
    normalized_name: String,
    quantity: String,
    unit: String,
    category: String,
    aisle: String,
    completed: bool,
    source: String,
    recipe_id: Option<String>,
    meal_ids: sqlx::types::Json<Vec<String>>,
    priority: i32,
}

impl TryFrom<ItemRow> for ShoppingListItem {
    type Error = famplan_shared::Error;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let source = ItemSource::from_str(&row.source).map_err(anyhow::Error::from)?;

        Ok(ShoppingListItem {
            id: row.id,
            shopping_list_id: row.shopping_list_id,
            name: row.name,
            normalized_name: row.normalized_name,
            quantity: row.quantity,
            unit: row.unit,
            category: row.category,
            aisle: row.aisle,
            completed: row.completed,
            source,
            recipe_id: row.recipe_id,
            meal_ids: row.meal_ids.0,
            priority: Priority::from_rank(row.priority),
        })
    }
}

const ITEM_COLUMNS: [ItemTable; 13] = [
    ItemTable::Id,
    ItemTable::ShoppingListId,
    ItemTable::Name,
    ItemTable::NormalizedName,
    ItemTable::Quantity,
    ItemTable::Unit,
    ItemTable::Category,
    ItemTable::Aisle,
    ItemTable::Completed,
    ItemTable::Source,
    ItemTable::RecipeId,
    ItemTable::MealIds,
    ItemTable::Priority,
];

async fn fetch_items(
    pool: &SqlitePool,
    list_id: &str,
    item_id: Option<&str>,
) -> famplan_shared::Result<Vec<ShoppingListItem>> {
    let mut statement = Query::select()
        .columns(ITEM_COLUMNS)
        .from(ItemTable::Table)
        .and_where(Expr::col(ItemTable::ShoppingListId).eq(list_id))
        .order_by_expr(Expr::cust("rowid"), Order::Asc)
        .to_owned();

    if let Some(item_id) = item_id {
        statement.and_where(Expr::col(ItemTable::Id).eq(item_id));
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, ItemRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(ShoppingListItem::try_from).collect()
}

#[async_trait]
impl ShoppingListStore for super::SqliteStore {
    async fn list(&self, id: &str) -> famplan_shared::Result<Option<ShoppingList>> {
        let statement = Query::select()
            .columns([
                ShoppingListTable::Id,
                ShoppingListTable::FamilyId,
                ShoppingListTable::Name,
                ShoppingListTable::CreatedAt,
            ])
            .from(ShoppingListTable::Table)
            .and_where(Expr::col(ShoppingListTable::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String, String, String, u64), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.map(|(id, family_id, name, created_at)| ShoppingList {
            id,
            family_id,
            name,
            created_at,
        }))
    }

    async fn create_list(&self, list: &ShoppingList) -> famplan_shared::Result<()> {
        let statement = Query::insert()
            .into_table(ShoppingListTable::Table)
            .columns([
                ShoppingListTable::Id,
                ShoppingListTable::FamilyId,
                ShoppingListTable::Name,
                ShoppingListTable::CreatedAt,
            ])
            .values_panic([
                list.id.to_owned().into(),
                list.family_id.to_owned().into(),
                list.name.to_owned().into(),
                list.created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    async fn upsert_items(
        &self,
        list_id: &str,
        drafts: &[ShoppingListItemDraft],
    ) -> famplan_shared::Result<Vec<ShoppingListItem>> {
        let mut tx = self.write_db.begin().await?;

        for draft in drafts {
            let meal_ids = serde_json::to_string(&draft.meal_ids)?;
            let recipe_id = Some(draft.recipe_id.to_owned()).filter(|id| !id.is_empty());

            let statement = Query::insert()
                .into_table(ItemTable::Table)
                .columns(ITEM_COLUMNS)
                .values_panic([
                    ulid::Ulid::new().to_string().into(),
                    list_id.to_owned().into(),
                    draft.name.to_owned().into(),
                    draft.normalized_name.to_owned().into(),
                    draft.quantity.display().into(),
                    draft.unit_key().into(),
                    draft.category.as_str().into(),
                    draft.aisle.to_owned().into(),
                    false.into(),
                    draft.source.to_string().into(),
                    recipe_id.into(),
                    meal_ids.into(),
                    draft.priority.rank().into(),
                ])
                .on_conflict(
                    OnConflict::columns([
                        ItemTable::ShoppingListId,
                        ItemTable::NormalizedName,
                        ItemTable::Unit,
                    ])
                    .update_columns([
                        ItemTable::Name,
                        ItemTable::Quantity,
                        ItemTable::Category,
                        ItemTable::Aisle,
                        ItemTable::Source,
                        ItemTable::RecipeId,
                        ItemTable::MealIds,
                        ItemTable::Priority,
                    ])
                    .to_owned(),
                )
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        let items = fetch_items(&self.write_db, list_id, None).await?;

        Ok(items
            .into_iter()
            .filter(|item| {
                drafts.iter().any(|draft| {
                    draft.normalized_name == item.normalized_name && draft.unit_key() == item.unit
                })
            })
            .collect())
    }

    async fn items(&self, list_id: &str) -> famplan_shared::Result<Vec<ShoppingListItem>> {
        fetch_items(&self.read_db, list_id, None).await
    }

    async fn item(
        &self,
        list_id: &str,
        item_id: &str,
    ) -> famplan_shared::Result<Option<ShoppingListItem>> {
        Ok(fetch_items(&self.read_db, list_id, Some(item_id))
            .await?
            .into_iter()
            .next())
    }

    async fn set_completed(
        &self,
        list_id: &str,
        item_id: &str,
        completed: bool,
    ) -> famplan_shared::Result<()> {
        let statement = Query::update()
            .table(ItemTable::Table)
            .value(ItemTable::Completed, completed)
            .and_where(Expr::col(ItemTable::ShoppingListId).eq(list_id))
            .and_where(Expr::col(ItemTable::Id).eq(item_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    async fn reset(&self, list_id: &str) -> famplan_shared::Result<()> {
        let statement = Query::update()
            .table(ItemTable::Table)
            .value(ItemTable::Completed, false)
            .and_where(Expr::col(ItemTable::ShoppingListId).eq(list_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }
}
