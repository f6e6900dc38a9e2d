mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use common::TestApp;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn posted_category_shows_up_in_the_listing() {
    let app = TestApp::new().await;

    let resp =
        app.request(Method::POST, "/api/categories", Some(json!({ "CategoryName": "Horror" }))).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let id = resp.body["Id"].as_i64().unwrap();
    assert_eq!(resp.body["CategoryName"], "Horror");
    assert_eq!(resp.headers[header::LOCATION], format!("/api/categories/{id}").as_str());

    let list = app.get("/api/categories").await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body, json!(["Horror"]));
}

#[tokio::test]
async fn categories_are_listed_by_name() {
    let app = TestApp::new().await;
    app.seed_category("Western").await;
    app.seed_category("Comedy").await;

    assert_eq!(app.get("/api/categories").await.body, json!(["Comedy", "Western"]));
}

#[tokio::test]
async fn short_category_names_are_rejected() {
    let app = TestApp::new().await;

    let resp = app.request(Method::POST, "/api/categories", Some(json!({ "CategoryName": "X" }))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body["error"].as_str().unwrap().contains("at least 2 characters"));

    assert_eq!(app.get("/api/categories").await.body, json!([]));
}

#[tokio::test]
async fn category_by_id_includes_movies() {
    let app = TestApp::new().await;
    let drama = app.seed_category("Drama").await;
    app.seed_movie("Heat", 1995, 170, drama).await;

    let resp = app.get(&format!("/api/categories/{drama}")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.body,
        json!({
            "CategoryName": "Drama",
            "Movies": [{ "Title": "Heat", "Year": 1995, "Duration": 170 }]
        })
    );

    assert_eq!(app.get("/api/categories/999").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn movies_of_a_category() {
    let app = TestApp::new().await;
    let drama = app.seed_category("Drama").await;
    let empty = app.seed_category("Empty").await;
    app.seed_movie("Heat", 1995, 170, drama).await;
    app.seed_movie("Amadeus", 1984, 160, drama).await;

    let resp = app.get(&format!("/api/categories/{drama}/movies")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body.as_array().unwrap().len(), 2);

    assert_eq!(app.get(&format!("/api/categories/{empty}/movies")).await.body, json!([]));
    assert_eq!(app.get("/api/categories/999/movies").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_renames_a_category() {
    let app = TestApp::new().await;
    let id = app.seed_category("Scifi").await;
    let uri = format!("/api/categories/{id}");

    let resp =
        app.request(Method::PUT, &uri, Some(json!({ "CategoryName": "Science Fiction" }))).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get("/api/categories").await.body, json!(["Science Fiction"]));

    let resp = app.request(Method::PUT, &uri, Some(json!({ "CategoryName": "S" }))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = app
        .request(Method::PUT, "/api/categories/999", Some(json!({ "CategoryName": "Noir" })))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_missing_category_changes_nothing() {
    let app = TestApp::new().await;
    app.seed_category("Drama").await;

    let resp = app.request(Method::DELETE, "/api/categories/999", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/categories").await.body, json!(["Drama"]));
}

#[tokio::test]
async fn deleting_categories() {
    let app = TestApp::new().await;
    let drama = app.seed_category("Drama").await;
    let empty = app.seed_category("Empty").await;
    app.seed_movie("Heat", 1995, 170, drama).await;

    let resp = app.request(Method::DELETE, &format!("/api/categories/{drama}"), None).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = app.request(Method::DELETE, &format!("/api/categories/{empty}"), None).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get("/api/categories").await.body, json!(["Drama"]));
}

#[tokio::test]
async fn classic_movie_rule_is_enforced_on_create() {
    let app = TestApp::new().await;
    let drama = app.seed_category("Drama").await;

    let too_long = json!({ "Title": "Epic", "Year": 1950, "Duration": 200, "CategoryId": drama });
    let resp = app.request(Method::POST, "/api/movies", Some(too_long)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let msg = resp.body["error"].as_str().unwrap();
    assert!(msg.contains("1960") && msg.contains("120"), "{msg}");
    assert_eq!(app.get("/api/movies/count").await.body, json!({ "Count": 0 }));

    let ok = json!({ "Title": "Epic", "Year": 1950, "Duration": 100, "CategoryId": drama });
    let resp = app.request(Method::POST, "/api/movies", Some(ok)).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let id = resp.body["Id"].as_i64().unwrap();
    assert_eq!(resp.headers[header::LOCATION], format!("/api/movies/{id}").as_str());
    assert_eq!(app.get("/api/movies/count").await.body, json!({ "Count": 1 }));
}

#[tokio::test]
async fn movie_for_unknown_category_is_rejected() {
    let app = TestApp::new().await;

    let body = json!({ "Title": "Orphan", "Year": 2009, "Duration": 123, "CategoryId": 77 });
    let resp = app.request(Method::POST, "/api/movies", Some(body)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn movie_endpoints() {
    let app = TestApp::new().await;
    assert_eq!(app.get("/api/movies/longest").await.status, StatusCode::NOT_FOUND);

    let drama = app.seed_category("Drama").await;
    let zulu = app.seed_movie("Zulu", 1964, 138, drama).await;
    app.seed_movie("Reds", 1981, 195, drama).await;
    app.seed_movie("Ran", 1985, 162, drama).await;

    let titles: Vec<String> = app.get("/api/movies").await.body.as_array().unwrap()
        .iter()
        .map(|m| m["Title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["Ran", "Reds", "Zulu"]);

    assert_eq!(app.get("/api/movies/longest").await.body["Title"], "Reds");
    assert_eq!(app.get(&format!("/api/movies/{zulu}")).await.body["Year"], 1964);

    let uri = format!("/api/movies/{zulu}");
    assert_eq!(app.request(Method::DELETE, &uri, None).await.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&uri).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.request(Method::DELETE, &uri, None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn statistics_endpoints() {
    let app = TestApp::new().await;
    assert_eq!(
        app.get("/api/statistics/categories/most-movies").await.status,
        StatusCode::NOT_FOUND
    );

    let drama = app.seed_category("Drama").await;
    let action = app.seed_category("Action").await;
    app.seed_category("Empty").await;
    app.seed_movie("A", 1990, 100, drama).await;
    app.seed_movie("B", 1990, 120, drama).await;
    app.seed_movie("C", 1991, 140, drama).await;
    app.seed_movie("D", 2001, 90, action).await;

    let stats = app.get("/api/statistics/categories").await.body;
    assert_eq!(
        stats,
        json!([
            { "CategoryName": "Action", "NumberOfMovies": 1, "TotalDuration": 90 },
            { "CategoryName": "Drama", "NumberOfMovies": 3, "TotalDuration": 360 },
            { "CategoryName": "Empty", "NumberOfMovies": 0, "TotalDuration": 0 }
        ])
    );

    let top = app.get("/api/statistics/categories/most-movies").await.body;
    assert_eq!(top["CategoryName"], "Drama");

    let averages = app.get("/api/statistics/categories/average-length").await.body;
    assert_eq!(
        averages,
        json!([
            { "CategoryName": "Drama", "AverageLength": 120.0 },
            { "CategoryName": "Action", "AverageLength": 90.0 }
        ])
    );

    let year = app.get("/api/statistics/categories/Drama/top-year").await;
    assert_eq!(year.body, json!({ "CategoryName": "Drama", "Year": 1990 }));

    let none = app.get("/api/statistics/categories/Empty/top-year").await;
    assert_eq!(none.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn undecodable_bodies_are_bad_requests_with_json_errors() {
    let app = TestApp::new().await;
    let id = app.seed_category("Drama").await;

    let missing = app.request(Method::POST, "/api/categories", Some(json!({}))).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert!(missing.body["error"].as_str().unwrap().contains("CategoryName"));

    let wrong_type = app
        .request(Method::PUT, &format!("/api/categories/{id}"), Some(json!({ "CategoryName": 5 })))
        .await;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);
    assert!(wrong_type.body["error"].is_string());

    let movie = app.request(Method::POST, "/api/movies", Some(json!({ "Title": "Heat" }))).await;
    assert_eq!(movie.status, StatusCode::BAD_REQUEST);
    assert!(movie.body["error"].is_string());

    assert_eq!(app.get("/api/categories").await.body, json!(["Drama"]));
}

#[tokio::test]
async fn malformed_json_syntax_is_a_bad_request() {
    let app = TestApp::new().await;

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/categories")
        .header("content-type", "application/json")
        .body(Body::from("{\"CategoryName\": "))
        .unwrap();
    let resp = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().contains("syntax"));
}
