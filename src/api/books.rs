//! Book endpoints
//!
//! Books are only created through the composite `POST /detailed-books`
//! route; the raw book insert stays internal to the catalog, as it did in
//! the legacy service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::{created, Created, JsonBody};
use crate::error::ApiResult;
use crate::models::{Book, DetailedBook, NewDetailedBook};
use crate::AppState;

/// GET /books - list all books with raw reference ids
pub async fn list_books(State(state): State<AppState>) -> ApiResult<Json<Vec<Book>>> {
    Ok(Json(state.catalog.list_books().await?))
}

/// GET /detailed-books - list books joined with author, category, publisher
pub async fn list_detailed_books(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DetailedBook>>> {
    Ok(Json(state.catalog.list_detailed_books().await?))
}

/// POST /detailed-books - composite insert with natural-key resolution
pub async fn add_detailed_book(
    State(state): State<AppState>,
    JsonBody(detailed): JsonBody<NewDetailedBook>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    state.catalog.add_detailed_book(&detailed).await?;
    Ok(created("Detailed book"))
}

/// Book API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books))
        .route(
            "/detailed-books",
            get(list_detailed_books).post(add_detailed_book),
        )
}
