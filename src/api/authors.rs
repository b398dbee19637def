//! Author endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::{created, Created, JsonBody};
use crate::error::ApiResult;
use crate::models::{Author, NewAuthor};
use crate::AppState;

/// GET /authors - list all authors
pub async fn list_authors(State(state): State<AppState>) -> ApiResult<Json<Vec<Author>>> {
    Ok(Json(state.catalog.list_authors().await?))
}

/// POST /authors - add an author
pub async fn add_author(
    State(state): State<AppState>,
    JsonBody(author): JsonBody<NewAuthor>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    state.catalog.add_author(&author).await?;
    Ok(created("Author"))
}

/// Author API routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/authors", get(list_authors).post(add_author))
}
