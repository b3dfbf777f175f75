use sqlx_migrator::{Info, Migrator};

mod m0_1;
pub mod table;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0_1::M0_1)])?;

    Ok(migrator)
}

#[cfg(test)]
mod tests {
    use sqlx_migrator::{Migrate, Plan};

    #[tokio::test]
    async fn test_migrations_create_every_table() {
        let pool = sqlx::SqlitePool::connect("sqlite::memory:").await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        super::migrator()
            .unwrap()
            .run(&mut *conn, &Plan::apply_all())
            .await
            .unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&mut *conn)
        .await
        .unwrap();
        let tables = tables.into_iter().map(|(name,)| name).collect::<Vec<_>>();

        for expected in [
            "family",
            "pantry_item",
            "planned_meal",
            "recipe",
            "shopping_list",
            "shopping_list_item",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing {expected}");
        }
    }
}
