use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use domain::{
    repositories::subscriptions::SubscriptionRepository,
    value_objects::{
        enums::subscription_statuses::SubscriptionStatus, subscriptions::SubscriptionModel,
    },
};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("subscription not found")]
    NotFound,
    #[error("subscription belongs to another user")]
    Forbidden,
    #[error("subscription is already cancelled")]
    AlreadyCancelled,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::NotFound => StatusCode::NOT_FOUND,
            SubscriptionError::Forbidden => StatusCode::FORBIDDEN,
            SubscriptionError::AlreadyCancelled => StatusCode::CONFLICT,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
}

impl<S> SubscriptionUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>) -> Self {
        Self { subscription_repo }
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> UseCaseResult<Vec<SubscriptionModel>> {
        let subscriptions = self
            .subscription_repo
            .list_for_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "subscriptions: failed to list for user");
                SubscriptionError::Internal(err)
            })?;

        info!(
            %user_id,
            subscription_count = subscriptions.len(),
            "subscriptions: listed for user"
        );

        Ok(subscriptions
            .into_iter()
            .map(SubscriptionModel::from)
            .collect())
    }

    /// Cancellation is the only status transition and it is one-way.
    pub async fn cancel(&self, user_id: Uuid, subscription_id: Uuid) -> UseCaseResult<()> {
        let subscription = self
            .subscription_repo
            .find_by_id(subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    %subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to load subscription for cancel"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = SubscriptionError::NotFound;
                warn!(
                    %user_id,
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "subscriptions: cancel target not found"
                );
                err
            })?;

        if subscription.user_id != Some(user_id) {
            let err = SubscriptionError::Forbidden;
            warn!(
                %user_id,
                %subscription_id,
                status = err.status_code().as_u16(),
                "subscriptions: cancel attempted on another user's subscription"
            );
            return Err(err);
        }

        if SubscriptionStatus::from_str(&subscription.status) != Some(SubscriptionStatus::Active) {
            let err = SubscriptionError::AlreadyCancelled;
            warn!(
                %user_id,
                %subscription_id,
                current_status = %subscription.status,
                status = err.status_code().as_u16(),
                "subscriptions: cancel attempted on a non-active subscription"
            );
            return Err(err);
        }

        self.subscription_repo
            .update_status(subscription_id, SubscriptionStatus::Cancelled)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    %subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to mark subscription cancelled"
                );
                SubscriptionError::Internal(err)
            })?;

        info!(%user_id, %subscription_id, "subscriptions: cancelled");

        Ok(())
    }
}
