use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;

use domain::value_objects::{
    customer_info::{CustomerDeliveryInfo, DeliveryFieldErrors},
    enums::delivery_slots::DeliverySlot,
    plans::PlanCatalog,
};
use infra::{
    db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            address_history::AddressHistoryPostgres, juices::JuicePostgres,
            subscriptions::SubscriptionPostgres,
        },
    },
    guest::address_cache::GuestAddressCache,
};

use crate::auth::OptionalAuthUser;
use crate::axum_http::error_responses::{error_response, internal_error_response};
use crate::usecases::checkout_wizard::{CheckoutIdentity, CheckoutWizard, WizardError, WizardStep};
use crate::usecases::juice_catalog::JuiceCatalogUseCase;

type PgCheckoutWizard =
    CheckoutWizard<SubscriptionPostgres, AddressHistoryPostgres, GuestAddressCache>;

/// Sessions live here and nowhere else: dropping an entry abandons the
/// checkout with nothing persisted.
pub struct CheckoutState {
    sessions: Mutex<HashMap<Uuid, PgCheckoutWizard>>,
    subscription_repo: Arc<SubscriptionPostgres>,
    address_history: Arc<AddressHistoryPostgres>,
    guest_addresses: Arc<GuestAddressCache>,
    catalog: Arc<PlanCatalog>,
    juice_catalog: JuiceCatalogUseCase<JuicePostgres>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let state = CheckoutState {
        sessions: Mutex::new(HashMap::new()),
        subscription_repo: Arc::new(SubscriptionPostgres::new(Arc::clone(&db_pool))),
        address_history: Arc::new(AddressHistoryPostgres::new(Arc::clone(&db_pool))),
        guest_addresses: Arc::new(GuestAddressCache::new()),
        catalog: Arc::new(PlanCatalog::standard()),
        juice_catalog: JuiceCatalogUseCase::new(Arc::new(JuicePostgres::new(Arc::clone(
            &db_pool,
        )))),
    };

    Router::new()
        .route("/", post(start_checkout))
        .route("/:checkout_id", get(checkout_state))
        .route("/:checkout_id/plan", put(select_plan))
        .route("/:checkout_id/juice", put(select_juice))
        .route("/:checkout_id/quantity", put(set_quantity))
        .route("/:checkout_id/delivery-slot", put(set_delivery_slot))
        .route("/:checkout_id/customer", put(set_customer_info))
        .route("/:checkout_id/saved-address", put(choose_saved_address))
        .route("/:checkout_id/new-address", put(use_new_address))
        .route("/:checkout_id/next", post(next_step))
        .route("/:checkout_id/back", post(back_step))
        .route("/:checkout_id/submit", post(submit))
        .with_state(Arc::new(state))
}

#[derive(Debug, Deserialize)]
pub struct StartCheckoutRequest {
    pub device_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartCheckoutResponse {
    pub checkout_id: Uuid,
    pub step: WizardStep,
}

#[derive(Debug, Deserialize)]
pub struct SelectPlanRequest {
    pub plan_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectJuiceRequest {
    pub juice_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct SetDeliverySlotRequest {
    pub delivery_slot: DeliverySlot,
}

#[derive(Debug, Deserialize)]
pub struct ChooseSavedAddressRequest {
    pub address_id: usize,
}

#[derive(Debug, Serialize)]
struct ValidationErrorResponse {
    code: u16,
    message: String,
    fields: DeliveryFieldErrors,
}

fn wizard_error_response(err: WizardError) -> Response {
    match err {
        WizardError::Validation(fields) => {
            let status = StatusCode::BAD_REQUEST;
            (
                status,
                Json(ValidationErrorResponse {
                    code: status.as_u16(),
                    message: "Delivery details are incomplete or invalid".to_string(),
                    fields,
                }),
            )
                .into_response()
        }
        WizardError::Internal(ref internal) => {
            error!(error = ?internal, "checkout: internal error");
            internal_error_response()
        }
        other => error_response(other.status_code(), other.to_string()),
    }
}

fn session_not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "Checkout session not found".to_string(),
    )
}

pub async fn start_checkout(
    State(state): State<Arc<CheckoutState>>,
    OptionalAuthUser(auth): OptionalAuthUser,
    Json(request): Json<StartCheckoutRequest>,
) -> impl IntoResponse {
    let (identity, profile_address) = match auth {
        Some(user) => {
            let profile_address = user.profile_address();
            (CheckoutIdentity::User(user.user_id), profile_address)
        }
        None => match request.device_key {
            Some(device_key) if !device_key.trim().is_empty() => {
                (CheckoutIdentity::Guest(device_key), None)
            }
            _ => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "A device key is required for guest checkout".to_string(),
                );
            }
        },
    };

    let juices = match state.juice_catalog.list_juices().await {
        Ok(juices) => juices,
        Err(err) => {
            error!(error = ?err, "checkout: failed to load juice catalog");
            return internal_error_response();
        }
    };

    let wizard = CheckoutWizard::new(
        Arc::clone(&state.subscription_repo),
        Arc::clone(&state.address_history),
        Arc::clone(&state.guest_addresses),
        Arc::clone(&state.catalog),
        juices,
        identity,
        profile_address,
    );

    let checkout_id = Uuid::new_v4();
    let mut sessions = state.sessions.lock().await;
    sessions.insert(checkout_id, wizard);
    info!(%checkout_id, "checkout: session started");

    (
        StatusCode::CREATED,
        Json(StartCheckoutResponse {
            checkout_id,
            step: WizardStep::SelectPlan,
        }),
    )
        .into_response()
}

pub async fn checkout_state(
    State(state): State<Arc<CheckoutState>>,
    Path(checkout_id): Path<Uuid>,
) -> impl IntoResponse {
    let sessions = state.sessions.lock().await;
    match sessions.get(&checkout_id) {
        Some(wizard) => (StatusCode::OK, Json(wizard.state())).into_response(),
        None => session_not_found(),
    }
}

pub async fn select_plan(
    State(state): State<Arc<CheckoutState>>,
    Path(checkout_id): Path<Uuid>,
    Json(request): Json<SelectPlanRequest>,
) -> impl IntoResponse {
    let mut sessions = state.sessions.lock().await;
    let Some(wizard) = sessions.get_mut(&checkout_id) else {
        return session_not_found();
    };

    match wizard.select_plan(&request.plan_id) {
        Ok(()) => (StatusCode::OK, Json(wizard.state())).into_response(),
        Err(err) => wizard_error_response(err),
    }
}

pub async fn select_juice(
    State(state): State<Arc<CheckoutState>>,
    Path(checkout_id): Path<Uuid>,
    Json(request): Json<SelectJuiceRequest>,
) -> impl IntoResponse {
    let mut sessions = state.sessions.lock().await;
    let Some(wizard) = sessions.get_mut(&checkout_id) else {
        return session_not_found();
    };

    match wizard.select_juice(request.juice_id) {
        Ok(()) => (StatusCode::OK, Json(wizard.state())).into_response(),
        Err(err) => wizard_error_response(err),
    }
}

pub async fn set_quantity(
    State(state): State<Arc<CheckoutState>>,
    Path(checkout_id): Path<Uuid>,
    Json(request): Json<SetQuantityRequest>,
) -> impl IntoResponse {
    let mut sessions = state.sessions.lock().await;
    let Some(wizard) = sessions.get_mut(&checkout_id) else {
        return session_not_found();
    };

    match wizard.set_quantity(request.quantity) {
        Ok(()) => (StatusCode::OK, Json(wizard.state())).into_response(),
        Err(err) => wizard_error_response(err),
    }
}

pub async fn set_delivery_slot(
    State(state): State<Arc<CheckoutState>>,
    Path(checkout_id): Path<Uuid>,
    Json(request): Json<SetDeliverySlotRequest>,
) -> impl IntoResponse {
    let mut sessions = state.sessions.lock().await;
    let Some(wizard) = sessions.get_mut(&checkout_id) else {
        return session_not_found();
    };

    match wizard.set_delivery_slot(request.delivery_slot) {
        Ok(()) => (StatusCode::OK, Json(wizard.state())).into_response(),
        Err(err) => wizard_error_response(err),
    }
}

pub async fn set_customer_info(
    State(state): State<Arc<CheckoutState>>,
    Path(checkout_id): Path<Uuid>,
    Json(customer): Json<CustomerDeliveryInfo>,
) -> impl IntoResponse {
    let mut sessions = state.sessions.lock().await;
    let Some(wizard) = sessions.get_mut(&checkout_id) else {
        return session_not_found();
    };

    match wizard.set_customer_info(customer) {
        Ok(()) => (StatusCode::OK, Json(wizard.state())).into_response(),
        Err(err) => wizard_error_response(err),
    }
}

pub async fn choose_saved_address(
    State(state): State<Arc<CheckoutState>>,
    Path(checkout_id): Path<Uuid>,
    Json(request): Json<ChooseSavedAddressRequest>,
) -> impl IntoResponse {
    let mut sessions = state.sessions.lock().await;
    let Some(wizard) = sessions.get_mut(&checkout_id) else {
        return session_not_found();
    };

    match wizard.choose_saved_address(request.address_id) {
        Ok(()) => (StatusCode::OK, Json(wizard.state())).into_response(),
        Err(err) => wizard_error_response(err),
    }
}

pub async fn use_new_address(
    State(state): State<Arc<CheckoutState>>,
    Path(checkout_id): Path<Uuid>,
) -> impl IntoResponse {
    let mut sessions = state.sessions.lock().await;
    let Some(wizard) = sessions.get_mut(&checkout_id) else {
        return session_not_found();
    };

    match wizard.use_new_address() {
        Ok(()) => (StatusCode::OK, Json(wizard.state())).into_response(),
        Err(err) => wizard_error_response(err),
    }
}

pub async fn next_step(
    State(state): State<Arc<CheckoutState>>,
    Path(checkout_id): Path<Uuid>,
) -> impl IntoResponse {
    let mut sessions = state.sessions.lock().await;
    let Some(wizard) = sessions.get_mut(&checkout_id) else {
        return session_not_found();
    };

    match wizard.next().await {
        Ok(_) => (StatusCode::OK, Json(wizard.state())).into_response(),
        Err(err) => wizard_error_response(err),
    }
}

pub async fn back_step(
    State(state): State<Arc<CheckoutState>>,
    Path(checkout_id): Path<Uuid>,
) -> impl IntoResponse {
    let mut sessions = state.sessions.lock().await;
    let Some(wizard) = sessions.get_mut(&checkout_id) else {
        return session_not_found();
    };

    match wizard.back() {
        Ok(_) => (StatusCode::OK, Json(wizard.state())).into_response(),
        Err(err) => wizard_error_response(err),
    }
}

pub async fn submit(
    State(state): State<Arc<CheckoutState>>,
    Path(checkout_id): Path<Uuid>,
) -> impl IntoResponse {
    let mut sessions = state.sessions.lock().await;
    let Some(wizard) = sessions.get_mut(&checkout_id) else {
        return session_not_found();
    };

    match wizard.submit().await {
        Ok(subscription) => {
            // Terminal step: the session cannot be re-entered.
            sessions.remove(&checkout_id);
            (StatusCode::CREATED, Json(subscription)).into_response()
        }
        Err(err) => wizard_error_response(err),
    }
}
