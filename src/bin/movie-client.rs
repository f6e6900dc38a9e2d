use std::time::Duration;

use clap::Parser;
use movie_manager::{client::ApiClient, table};

/// Lists the catalog's categories and the movies of one category.
#[derive(Debug, Parser)]
#[command(name = "movie-client", version)]
struct Args {
    /// Base URL of the movie API.
    #[arg(long, env = "MOVIE_API_URL", default_value = "http://localhost:5000")]
    base_url: String,

    /// Category whose movies are printed as a table.
    #[arg(long, default_value_t = 3)]
    category_id: i32,

    /// Per-request timeout in seconds.
    #[arg(long, env = "MOVIE_API_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = ApiClient::new(args.base_url, Duration::from_secs(args.timeout_secs))?;

    for category in client.categories().await? {
        println!("{}", table::plain_value(&category));
    }

    let movies = client.movies_for_category(args.category_id).await?;
    println!("{}", table::movie_table(&movies));

    Ok(())
}
