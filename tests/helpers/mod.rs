#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use famplan::cli::Fixture;
use famplan_shopping::SqliteStore;
use http_body_util::BodyExt;
use serde_json::Value;
use temp_dir::TempDir;
use tower::ServiceExt;

pub const FIXTURE: &str = r#"{
    "families": [
        {"id": "f1", "name": "Rivera"},
        {"id": "f2", "name": "Okafor"}
    ],
    "recipes": [
        {"id": "r1", "familyId": "f1", "name": "Pancakes", "servings": 4,
         "ingredients": ["1 cup flour", "2 eggs", "1 cup milk", "salt to taste"]},
        {"id": "r2", "familyId": "f1", "name": "Chicken rice", "servings": 2,
         "ingredients": ["1 lb chicken breast", "1 cup rice"]},
        {"id": "r3", "familyId": "f2", "name": "Jollof", "servings": 4,
         "ingredients": ["2 cups rice"]}
    ],
    "meals": [
        {"id": "m1", "familyId": "f1", "recipeId": "r1", "scheduledFor": "2024-03-04", "servings": 4},
        {"id": "m2", "familyId": "f1", "recipeId": "r1", "scheduledFor": "2024-03-05", "servings": 4},
        {"id": "m3", "familyId": "f1", "recipeId": "r2", "scheduledFor": "2024-03-06", "servings": 2},
        {"id": "m4", "familyId": "f2", "recipeId": "r3", "scheduledFor": "2024-03-06"}
    ],
    "pantry": [
        {"id": "p1", "familyId": "f1", "name": "2 lb chicken breast"},
        {"id": "p2", "familyId": "f1", "name": "Milk", "lowStock": true}
    ]
}"#;

pub struct TestApp {
    pub router: Router,
    _dir: TempDir,
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}?mode=rwc", dir.child("db.sqlite3").display());

    let pool = famplan::db::create_pool(&url, 1).await?;
    famplan::db::run_migrations(&pool).await?;

    let store = SqliteStore::new(famplan_shared::State {
        read_db: pool.clone(),
        write_db: pool,
    });
    Fixture::from_json(FIXTURE)?.apply(&store).await?;

    let router = famplan::router(famplan::AppState::new(store, 10));

    Ok(TestApp { router, _dir: dir })
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> anyhow::Result<(StatusCode, Value)> {
        let request = Request::builder().uri(uri).body(Body::empty())?;

        into_json(self.router.clone().oneshot(request).await?).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))?;

        into_json(self.router.clone().oneshot(request).await?).await
    }
}

async fn into_json(response: Response<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, body))
}
