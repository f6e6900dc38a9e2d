use std::net::SocketAddr;

use anyhow::Context;

use crate::validation::ClassicMovieRule;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub classic_movie_rule: ClassicMovieRule,
    pub reset_database: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "5000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

        let until_year: i32 = std::env::var("CLASSIC_MOVIE_UNTIL_YEAR")
            .ok()
            .map(|s| s.parse::<i32>())
            .transpose()
            .context("CLASSIC_MOVIE_UNTIL_YEAR")?
            .unwrap_or(ClassicMovieRule::DEFAULT.until_year);

        let max_duration: i32 = std::env::var("CLASSIC_MOVIE_MAX_DURATION")
            .ok()
            .map(|s| s.parse::<i32>())
            .transpose()
            .context("CLASSIC_MOVIE_MAX_DURATION")?
            .unwrap_or(ClassicMovieRule::DEFAULT.max_duration);

        let reset_database = std::env::var("RESET_DATABASE")
            .ok()
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            classic_movie_rule: ClassicMovieRule { until_year, max_duration },
            reset_database,
        })
    }
}
