//! Write-time rules for staged entities.
//!
//! These run inside [`UnitOfWork::save_changes`](crate::unit_of_work::UnitOfWork::save_changes)
//! before anything touches the store, so a single bad entity rejects the whole batch.

use crate::{
    error::{AppError, AppResult},
    models::{NewCategory, NewMovie},
};

/// Movies released on or before `until_year` may not run longer than `max_duration` minutes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassicMovieRule {
    pub until_year: i32,
    pub max_duration: i32,
}

impl ClassicMovieRule {
    pub const DEFAULT: Self = Self { until_year: 1960, max_duration: 120 };

    pub fn check(&self, year: i32, duration: i32) -> AppResult<()> {
        if year <= self.until_year && duration > self.max_duration {
            return Err(AppError::validation(format!(
                "classic movies (released until {}) may not last longer than {} minutes",
                self.until_year, self.max_duration
            )));
        }
        Ok(())
    }
}

impl Default for ClassicMovieRule {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub fn validate_movie(movie: &NewMovie, rule: &ClassicMovieRule) -> AppResult<()> {
    if movie.title.trim().is_empty() {
        return Err(AppError::validation("movie title must not be empty"));
    }
    if movie.duration <= 0 {
        return Err(AppError::validation(format!(
            "movie '{}' must have a positive duration",
            movie.title
        )));
    }
    rule.check(movie.year, movie.duration)
}

pub fn validate_category_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("category name must not be empty"));
    }
    Ok(())
}

pub fn validate_category(category: &NewCategory) -> AppResult<()> {
    validate_category_name(&category.name)
}
