use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::info;
use validator::Validate;

use crate::{
    AppState,
    dto::{
        CategoryAverageLengthDto, CategoryCreatedDto, CategoryDto, CategoryStatisticDto,
        CategoryWithMoviesDto, MovieCountDto, MovieDetailsDto, MovieDto, NewMovieDto, TopYearDto,
    },
    error::{AppError, AppResult},
    extractor::AppJson,
    models::NewCategory,
};

pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/categories/{id}/movies", get(get_category_movies))
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/count", get(movie_count))
        .route("/movies/longest", get(longest_movie))
        .route("/movies/{id}", get(get_movie).delete(delete_movie))
        .route("/statistics/categories", get(category_statistics))
        .route("/statistics/categories/most-movies", get(category_with_most_movies))
        .route("/statistics/categories/average-length", get(average_lengths))
        .route("/statistics/categories/{name}/top-year", get(top_year))
}

fn created(location: String, body: impl serde::Serialize) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response()
}

// categories

pub async fn list_categories(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<String>>> {
    let mut uow = state.unit_of_work();
    let categories = uow.categories().get_all().await?;
    Ok(Json(categories.into_iter().map(|c| c.name).collect()))
}

pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<CategoryWithMoviesDto>> {
    let mut uow = state.unit_of_work();
    let category = uow
        .categories()
        .get_by_id_with_movies(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("category {id}")))?;
    Ok(Json(category.into()))
}

pub async fn get_category_movies(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<MovieDto>>> {
    let mut uow = state.unit_of_work();
    let category = uow
        .categories()
        .get_by_id_with_movies(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("category {id}")))?;
    Ok(Json(category.movies.into_iter().map(MovieDto::from).collect()))
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    AppJson(dto): AppJson<CategoryDto>,
) -> AppResult<Response> {
    dto.validate()?;

    let mut uow = state.unit_of_work();
    let key = uow.categories().insert(NewCategory::new(dto.category_name.clone()));
    let receipt = uow.save_changes().await?;
    let id = receipt
        .id_of(key)
        .ok_or_else(|| anyhow::anyhow!("saved category has no id"))?;

    info!(id, name = %dto.category_name, "category created");
    Ok(created(
        format!("/api/categories/{id}"),
        CategoryCreatedDto { id, category_name: dto.category_name },
    ))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    AppJson(dto): AppJson<CategoryDto>,
) -> AppResult<StatusCode> {
    dto.validate()?;

    let mut uow = state.unit_of_work();
    let mut category = uow
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("category {id}")))?;

    category.name = dto.category_name;
    uow.categories().update(category);
    uow.save_changes().await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let mut uow = state.unit_of_work();
    let category = uow
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("category {id}")))?;

    uow.categories().delete(category);
    uow.save_changes().await?;

    info!(id, "category deleted");
    Ok(StatusCode::NO_CONTENT)
}

// movies

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<MovieDetailsDto>>> {
    let mut uow = state.unit_of_work();
    let movies = uow.movies().get_all().await?;
    Ok(Json(movies.into_iter().map(MovieDetailsDto::from).collect()))
}

pub async fn movie_count(State(state): State<Arc<AppState>>) -> AppResult<Json<MovieCountDto>> {
    let mut uow = state.unit_of_work();
    let count = uow.movies().get_count().await?;
    Ok(Json(MovieCountDto { count }))
}

pub async fn longest_movie(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<MovieDetailsDto>> {
    let mut uow = state.unit_of_work();
    let movie = uow.movies().get_longest_movie().await?.ok_or_else(|| AppError::not_found("movie"))?;
    Ok(Json(movie.into()))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<MovieDetailsDto>> {
    let mut uow = state.unit_of_work();
    let movie = uow
        .movies()
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("movie {id}")))?;
    Ok(Json(movie.into()))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    AppJson(dto): AppJson<NewMovieDto>,
) -> AppResult<Response> {
    dto.validate()?;

    let mut uow = state.unit_of_work();
    let key = uow.movies().insert(dto.into());
    let id = uow
        .save_changes()
        .await?
        .id_of(key)
        .ok_or_else(|| anyhow::anyhow!("saved movie has no id"))?;

    let movie = uow
        .movies()
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("movie {id}")))?;

    info!(id, title = %movie.title, "movie created");
    Ok(created(format!("/api/movies/{id}"), MovieDetailsDto::from(movie)))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let mut uow = state.unit_of_work();
    let movie = uow
        .movies()
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("movie {id}")))?;

    uow.movies().delete(movie);
    uow.save_changes().await?;
    Ok(StatusCode::NO_CONTENT)
}

// statistics

pub async fn category_statistics(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<CategoryStatisticDto>>> {
    let mut uow = state.unit_of_work();
    let stats = uow.categories().get_category_statistics().await?;
    Ok(Json(stats.into_iter().map(CategoryStatisticDto::from).collect()))
}

pub async fn category_with_most_movies(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<CategoryStatisticDto>> {
    let mut uow = state.unit_of_work();
    let entry = uow
        .categories()
        .get_category_with_most_movies()
        .await?
        .ok_or_else(|| AppError::not_found("category"))?;
    Ok(Json(entry.into()))
}

pub async fn average_lengths(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<CategoryAverageLengthDto>>> {
    let mut uow = state.unit_of_work();
    let averages = uow.categories().get_categories_with_average_length_of_movies().await?;
    Ok(Json(averages.into_iter().map(CategoryAverageLengthDto::from).collect()))
}

pub async fn top_year(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> AppResult<Json<TopYearDto>> {
    let mut uow = state.unit_of_work();
    let year = uow
        .categories()
        .get_year_with_most_publications_for_category(&name)
        .await?
        .ok_or_else(|| AppError::not_found(format!("movies for category '{name}'")))?;
    Ok(Json(TopYearDto { category_name: name, year }))
}
