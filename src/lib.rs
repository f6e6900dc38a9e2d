//! Movie catalog service: categories own movies, a REST API exposes listing, creation,
//! update, deletion and aggregate statistics, and a console client renders the results.

pub mod client;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod error;
pub mod extractor;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod table;
pub mod unit_of_work;
pub mod validation;

#[cfg(test)]
mod test_helpers;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, unit_of_work::UnitOfWork};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DatabaseConnection,
}

impl AppState {
    /// Opens a request-scoped unit of work.
    pub fn unit_of_work(&self) -> UnitOfWork {
        UnitOfWork::new(self.db.clone(), self.config.classic_movie_rule)
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", routes::api_router())
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
