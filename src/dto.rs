//! JSON shapes exchanged with API clients.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::movie,
    models::{CategoryAverageLength, CategoryStatisticEntry, CategoryWithMovies, NewMovie},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieDto {
    pub title: String,
    pub year: i32,
    pub duration: i32,
}

impl From<movie::Model> for MovieDto {
    fn from(m: movie::Model) -> Self {
        Self { title: m.title, year: m.year, duration: m.duration }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryDto {
    #[validate(length(min = 2, message = "the category name must have at least 2 characters"))]
    pub category_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryCreatedDto {
    pub id: i32,
    pub category_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryWithMoviesDto {
    pub category_name: String,
    pub movies: Vec<MovieDto>,
}

impl From<CategoryWithMovies> for CategoryWithMoviesDto {
    fn from(c: CategoryWithMovies) -> Self {
        Self {
            category_name: c.category.name,
            movies: c.movies.into_iter().map(MovieDto::from).collect(),
        }
    }
}

/// A movie including its identity and owning category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieDetailsDto {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub duration: i32,
    pub category_id: i32,
}

impl From<movie::Model> for MovieDetailsDto {
    fn from(m: movie::Model) -> Self {
        Self { id: m.id, title: m.title, year: m.year, duration: m.duration, category_id: m.category_id }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct NewMovieDto {
    #[validate(length(min = 1, message = "the title must not be empty"))]
    pub title: String,
    pub year: i32,
    #[validate(range(min = 1, message = "the duration must be at least 1 minute"))]
    pub duration: i32,
    pub category_id: i32,
}

impl From<NewMovieDto> for NewMovie {
    fn from(dto: NewMovieDto) -> Self {
        Self { title: dto.title, year: dto.year, duration: dto.duration, category_id: dto.category_id }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieCountDto {
    pub count: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryStatisticDto {
    pub category_name: String,
    pub number_of_movies: i64,
    pub total_duration: i64,
}

impl From<CategoryStatisticEntry> for CategoryStatisticDto {
    fn from(e: CategoryStatisticEntry) -> Self {
        Self {
            category_name: e.category.name,
            number_of_movies: e.number_of_movies,
            total_duration: e.total_duration,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryAverageLengthDto {
    pub category_name: String,
    pub average_length: f64,
}

impl From<CategoryAverageLength> for CategoryAverageLengthDto {
    fn from(a: CategoryAverageLength) -> Self {
        Self { category_name: a.category.name, average_length: a.average_length }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopYearDto {
    pub category_name: String,
    pub year: i32,
}
