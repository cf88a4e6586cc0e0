use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use infra::db::{
    postgres::postgres_connection::PgPoolSquad, repositories::juices::JuicePostgres,
};
use std::sync::Arc;
use tracing::error;

use domain::repositories::juices::JuiceRepository;

use crate::axum_http::error_responses::internal_error_response;
use crate::usecases::juice_catalog::JuiceCatalogUseCase;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let juice_repository = JuicePostgres::new(Arc::clone(&db_pool));
    let juice_catalog = JuiceCatalogUseCase::new(Arc::new(juice_repository));

    Router::new()
        .route("/", get(list_juices))
        .with_state(Arc::new(juice_catalog))
}

pub async fn list_juices<J>(
    State(juice_catalog): State<Arc<JuiceCatalogUseCase<J>>>,
) -> impl IntoResponse
where
    J: JuiceRepository + Send + Sync + 'static,
{
    match juice_catalog.list_juices().await {
        Ok(juices) => (StatusCode::OK, Json(juices)).into_response(),
        Err(err) => {
            error!(error = ?err, "juices: failed to list catalog");
            internal_error_response()
        }
    }
}
