use async_trait::async_trait;
use famplan_db::table::PantryItem as PantryItemTable;
use famplan_shared::pantry::PantryItem;
use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

use crate::store::PantryStore;

#[derive(FromRow)]
struct PantryRow {
    id: String,
    family_id: String,
    name: String,
    quantity: String,
    unit: String,
    category: String,
    low_stock: bool,
}

impl From<PantryRow> for PantryItem {
    fn from(row: PantryRow) -> Self {
        PantryItem {
            id: row.id,
            family_id: row.family_id,
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
            category: row.category,
            low_stock: row.low_stock,
        }
    }
}

impl super::SqliteStore {
    pub async fn upsert_pantry_item(&self, item: &PantryItem) -> famplan_shared::Result<()> {
        let statement = Query::insert()
            .into_table(PantryItemTable::Table)
            .columns([
                PantryItemTable::Id,
                PantryItemTable::FamilyId,
                PantryItemTable::Name,
                PantryItemTable::Quantity,
                PantryItemTable::Unit,
                PantryItemTable::Category,
                PantryItemTable::LowStock,
            ])
            .values_panic([
                item.id.to_owned().into(),
                item.family_id.to_owned().into(),
                item.name.to_owned().into(),
                item.quantity.to_owned().into(),
                item.unit.to_owned().into(),
                item.category.to_owned().into(),
                item.low_stock.into(),
            ])
            .on_conflict(
                OnConflict::column(PantryItemTable::Id)
                    .update_columns([
                        PantryItemTable::FamilyId,
                        PantryItemTable::Name,
                        PantryItemTable::Quantity,
                        PantryItemTable::Unit,
                        PantryItemTable::Category,
                        PantryItemTable::LowStock,
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
impl PantryStore for super::SqliteStore {
    async fn get_all(&self, family_id: &str) -> famplan_shared::Result<Vec<PantryItem>> {
        let statement = Query::select()
            .columns([
                PantryItemTable::Id,
                PantryItemTable::FamilyId,
                PantryItemTable::Name,
                PantryItemTable::Quantity,
                PantryItemTable::Unit,
                PantryItemTable::Category,
                PantryItemTable::LowStock,
            ])
            .from(PantryItemTable::Table)
            .and_where(Expr::col(PantryItemTable::FamilyId).eq(family_id))
            .order_by(PantryItemTable::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, PantryRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows.into_iter().map(PantryItem::from).collect())
    }
}
