#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
};
use movie_manager::{
    AppState, app,
    config::Config,
    db,
    models::{NewCategory, NewMovie},
    validation::ClassicMovieRule,
};
use serde_json::Value;
use tower::ServiceExt;

/// Application state over a fresh, migrated in-memory SQLite database.
pub async fn test_state() -> Arc<AppState> {
    let config = Config {
        addr: "127.0.0.1:0".parse().expect("addr"),
        database_url: "sqlite::memory:".to_string(),
        classic_movie_rule: ClassicMovieRule { until_year: 1960, max_duration: 120 },
        reset_database: false,
    };
    let db = db::connect(&config.database_url).await.expect("connect test database");
    let state = Arc::new(AppState { config: Arc::new(config), db });
    state.unit_of_work().migrate_database().await.expect("migrate test database");
    state
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        let state = test_state().await;
        Self { router: app(state.clone()), state }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let resp = self.router.clone().oneshot(req).await.expect("router response");
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn seed_category(&self, name: &str) -> i32 {
        seed_category(&self.state, name).await
    }

    pub async fn seed_movie(&self, title: &str, year: i32, duration: i32, category_id: i32) -> i32 {
        seed_movie(&self.state, title, year, duration, category_id).await
    }
}

pub async fn seed_category(state: &AppState, name: &str) -> i32 {
    let mut uow = state.unit_of_work();
    let key = uow.categories().insert(NewCategory::new(name));
    uow.save_changes().await.expect("save category").id_of(key).expect("category id")
}

pub async fn seed_movie(
    state: &AppState,
    title: &str,
    year: i32,
    duration: i32,
    category_id: i32,
) -> i32 {
    let mut uow = state.unit_of_work();
    let key = uow.movies().insert(NewMovie {
        title: title.to_string(),
        year,
        duration,
        category_id,
    });
    uow.save_changes().await.expect("save movie").id_of(key).expect("movie id")
}
