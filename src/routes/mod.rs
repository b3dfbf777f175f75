use axum::{
    Router,
    routing::{get, post},
};
use famplan_shopping::{Command, SqliteStore};
use sqlx::SqlitePool;

mod health;
pub mod shopping;

#[derive(Clone)]
pub struct AppState {
    pub command: Command<SqliteStore>,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(store: SqliteStore, max_meals: usize) -> Self {
        Self {
            pool: store.read_db.clone(),
            command: Command::new(store).with_max_meals(max_meals),
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/shopping-lists/generate", post(shopping::generate))
        .route(
            "/families/{family_id}/shopping-lists",
            post(shopping::create_list),
        )
        .route(
            "/families/{family_id}/shopping-lists/{list_id}/generate",
            post(shopping::generate_into),
        )
        .route(
            "/families/{family_id}/shopping-lists/{list_id}/items",
            get(shopping::items),
        )
        .route(
            "/families/{family_id}/shopping-lists/{list_id}/items/{item_id}/toggle",
            post(shopping::toggle),
        )
        .route(
            "/families/{family_id}/shopping-lists/{list_id}/reset",
            post(shopping::reset),
        )
        .with_state(app_state.clone());

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool)
        .nest("/api", api)
}
