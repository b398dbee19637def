//! Category endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::{created, Created, JsonBody};
use crate::error::ApiResult;
use crate::models::{Category, NewCategory};
use crate::AppState;

/// GET /categories - list all categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.catalog.list_categories().await?))
}

/// POST /categories - add a category
pub async fn add_category(
    State(state): State<AppState>,
    JsonBody(category): JsonBody<NewCategory>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    state.catalog.add_category(&category).await?;
    Ok(created("Category"))
}

/// Category API routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories).post(add_category))
}
