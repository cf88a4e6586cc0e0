use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use std::sync::Arc;

use domain::value_objects::plans::PlanCatalog;

pub fn routes() -> Router {
    Router::new()
        .route("/", get(list_plans))
        .with_state(Arc::new(PlanCatalog::standard()))
}

pub async fn list_plans(State(catalog): State<Arc<PlanCatalog>>) -> impl IntoResponse {
    (StatusCode::OK, Json(catalog.list().to_vec())).into_response()
}
