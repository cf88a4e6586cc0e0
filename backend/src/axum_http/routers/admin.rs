use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use infra::db::{
    postgres::postgres_connection::PgPoolSquad,
    repositories::{juices::JuicePostgres, subscriptions::SubscriptionPostgres},
};
use std::sync::Arc;
use tracing::error;

use domain::repositories::{juices::JuiceRepository, subscriptions::SubscriptionRepository};

use crate::auth::AuthUser;
use crate::axum_http::error_responses::internal_error_response;
use crate::usecases::{admin_overview::AdminOverviewUseCase, juice_catalog::JuiceCatalogUseCase};

pub struct AdminState<S, J>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    J: JuiceRepository + Send + Sync + 'static,
{
    overview: AdminOverviewUseCase<S>,
    juice_catalog: JuiceCatalogUseCase<J>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let juice_repository = JuicePostgres::new(Arc::clone(&db_pool));

    let state = AdminState {
        overview: AdminOverviewUseCase::new(Arc::new(subscription_repository)),
        juice_catalog: JuiceCatalogUseCase::new(Arc::new(juice_repository)),
    };

    Router::new()
        .route("/overview", get(overview))
        .with_state(Arc::new(state))
}

pub async fn overview<S, J>(
    State(state): State<Arc<AdminState<S, J>>>,
    _auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    J: JuiceRepository + Send + Sync + 'static,
{
    let juices = match state.juice_catalog.list_juices().await {
        Ok(juices) => juices,
        Err(err) => {
            error!(error = ?err, "admin: failed to load juice catalog");
            return internal_error_response();
        }
    };

    match state.overview.overview(&juices).await {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(err) => {
            error!(error = ?err, "admin: failed to compute overview");
            internal_error_response()
        }
    }
}
