use crate::entities::{category, movie};

/// A category staged for insertion; it has no identity until the owning save commits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A movie staged for insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub duration: i32,
    pub category_id: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryWithMovies {
    pub category: category::Model,
    pub movies: Vec<movie::Model>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryStatisticEntry {
    pub category: category::Model,
    pub number_of_movies: i64,
    pub total_duration: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryAverageLength {
    pub category: category::Model,
    pub average_length: f64,
}
