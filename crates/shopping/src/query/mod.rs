mod list;
mod meal;
mod pantry;
mod recipe;

use std::ops::Deref;

use async_trait::async_trait;
use famplan_db::table::Family as FamilyTable;
use famplan_shared::family::Family;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::command::now;
use crate::store::FamilyStore;

/// Sqlite-backed implementation of every shopping store.
///
/// Reads go through `read_db`; writes, and reads that must observe them, go
/// through `write_db`.
#[derive(Clone)]
pub struct SqliteStore(pub famplan_shared::State);

impl Deref for SqliteStore {
    type Target = famplan_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl SqliteStore {
    pub fn new(state: famplan_shared::State) -> Self {
        Self(state)
    }

    pub async fn upsert_family(&self, family: &Family) -> famplan_shared::Result<()> {
        let statement = Query::insert()
            .into_table(FamilyTable::Table)
            .columns([FamilyTable::Id, FamilyTable::Name, FamilyTable::CreatedAt])
            .values_panic([
                family.id.to_owned().into(),
                family.name.to_owned().into(),
                now().into(),
            ])
            .on_conflict(
                OnConflict::column(FamilyTable::Id)
                    .update_column(FamilyTable::Name)
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }
}

#[async_trait]
impl FamilyStore for SqliteStore {
    async fn family(&self, id: &str) -> famplan_shared::Result<Option<Family>> {
        let statement = Query::select()
            .columns([FamilyTable::Id, FamilyTable::Name])
            .from(FamilyTable::Table)
            .and_where(Expr::col(FamilyTable::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String, String), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.map(|(id, name)| Family { id, name }))
    }
}
