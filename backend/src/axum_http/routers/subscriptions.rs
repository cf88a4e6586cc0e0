use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use infra::db::{
    postgres::postgres_connection::PgPoolSquad,
    repositories::subscriptions::SubscriptionPostgres,
};
use std::sync::Arc;
use uuid::Uuid;

use domain::repositories::subscriptions::SubscriptionRepository;

use crate::auth::AuthUser;
use crate::axum_http::error_responses::{error_response, internal_error_response};
use crate::usecases::subscriptions::{SubscriptionError, SubscriptionUseCase};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let subscription_usecase = SubscriptionUseCase::new(Arc::new(subscription_repository));

    Router::new()
        .route("/", get(list_my_subscriptions))
        .route("/:subscription_id/cancel", post(cancel_subscription))
        .with_state(Arc::new(subscription_usecase))
}

fn subscription_error_response(err: SubscriptionError) -> Response {
    match err {
        SubscriptionError::Internal(_) => internal_error_response(),
        other => error_response(other.status_code(), other.to_string()),
    }
}

pub async fn list_my_subscriptions<S>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match subscription_usecase.list_for_user(auth.user_id).await {
        Ok(subscriptions) => (StatusCode::OK, Json(subscriptions)).into_response(),
        Err(err) => subscription_error_response(err),
    }
}

pub async fn cancel_subscription<S>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S>>>,
    auth: AuthUser,
    Path(subscription_id): Path<Uuid>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match subscription_usecase
        .cancel(auth.user_id, subscription_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => subscription_error_response(err),
    }
}
