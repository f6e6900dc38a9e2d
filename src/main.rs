use std::sync::Arc;

use movie_manager::{AppState, app, config::Config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movie_manager=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = db::connect(&config.database_url).await?;
    let state = Arc::new(AppState { config: config.clone(), db });

    let uow = state.unit_of_work();
    if config.reset_database {
        tracing::warn!("RESET_DATABASE set, dropping all tables");
        uow.delete_database().await?;
    }
    uow.migrate_database().await?;
    drop(uow);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
