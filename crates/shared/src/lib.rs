mod command;
pub mod family;
pub mod mealplan;
pub mod pantry;
pub mod recipe;
pub mod shopping;

pub use command::*;

#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}
