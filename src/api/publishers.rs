//! Publisher endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::{created, Created, JsonBody};
use crate::error::ApiResult;
use crate::models::{NewPublisher, Publisher};
use crate::AppState;

/// GET /publishers - list all publishers
pub async fn list_publishers(State(state): State<AppState>) -> ApiResult<Json<Vec<Publisher>>> {
    Ok(Json(state.catalog.list_publishers().await?))
}

/// POST /publishers - add a publisher
pub async fn add_publisher(
    State(state): State<AppState>,
    JsonBody(publisher): JsonBody<NewPublisher>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    state.catalog.add_publisher(&publisher).await?;
    Ok(created("Publisher"))
}

/// Publisher API routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/publishers", get(list_publishers).post(add_publisher))
}
