use std::sync::Arc;

use anyhow::anyhow;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use domain::{
    entities::subscriptions::InsertSubscriptionEntity,
    repositories::{
        address_history::AddressHistorySource, guest_addresses::GuestAddressStore,
        subscriptions::SubscriptionRepository,
    },
    value_objects::{
        customer_info::{CustomerDeliveryInfo, DeliveryFieldErrors},
        enums::{
            delivery_slots::DeliverySlot, plan_types::PlanType,
            subscription_statuses::SubscriptionStatus,
        },
        juices::JuiceModel,
        plans::{PlanCatalog, SubscriptionPlan},
        saved_addresses::{PastDelivery, ProfileAddress, SavedAddress},
        subscriptions::SubscriptionModel,
    },
};

use crate::usecases::address_book::{resolve_addresses, resolve_guest_addresses};
use crate::usecases::pricing::{self, MAX_QUANTITY, MIN_QUANTITY, PricingError};

/// The one branch in the flow is the juice step: variety plans skip it and
/// jump straight to delivery details. Everything else moves one step at a
/// time.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    SelectPlan,
    ChooseJuice,
    DeliveryDetails,
    Confirm,
    Submitted,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AddressEntryMode {
    SavedList,
    NewEntry,
}

#[derive(Debug, Clone)]
pub enum CheckoutIdentity {
    User(Uuid),
    Guest(String),
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("a plan must be selected before continuing")]
    PlanRequired,
    #[error("unknown plan: {0}")]
    UnknownPlan(String),
    #[error("a juice must be selected before continuing")]
    JuiceRequired,
    #[error("unknown juice: {0}")]
    UnknownJuice(i32),
    #[error("quantity must be between 1 and 5 juices per day")]
    QuantityOutOfRange,
    #[error("no saved address with id {0}")]
    UnknownSavedAddress(usize),
    #[error("delivery details are incomplete or invalid")]
    Validation(DeliveryFieldErrors),
    #[error("this action is not available on the current step")]
    WrongStep,
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl WizardError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            WizardError::PlanRequired
            | WizardError::JuiceRequired
            | WizardError::QuantityOutOfRange
            | WizardError::Validation(_)
            | WizardError::Pricing(_) => StatusCode::BAD_REQUEST,
            WizardError::UnknownPlan(_)
            | WizardError::UnknownJuice(_)
            | WizardError::UnknownSavedAddress(_) => StatusCode::NOT_FOUND,
            WizardError::WrongStep | WizardError::SubmissionInFlight => StatusCode::CONFLICT,
            WizardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type WizardResult<T> = std::result::Result<T, WizardError>;

/// Everything the confirm screen shows, plus enough to render any earlier
/// step.
#[derive(Debug, Serialize)]
pub struct CheckoutStateDto {
    pub step: WizardStep,
    pub plan: Option<SubscriptionPlan>,
    pub juice: Option<JuiceModel>,
    pub quantity: i32,
    pub delivery_slot: DeliverySlot,
    pub customer: CustomerDeliveryInfo,
    pub address_mode: AddressEntryMode,
    pub saved_addresses: Vec<SavedAddress>,
    pub total: Option<i32>,
}

/// One checkout session. Collaborators are injected; nothing global.
/// Draft state lives only here, so dropping the wizard abandons the
/// checkout with no residue.
pub struct CheckoutWizard<S, H, G>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    H: AddressHistorySource + Send + Sync + 'static,
    G: GuestAddressStore + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    address_history: Arc<H>,
    guest_addresses: Arc<G>,
    catalog: Arc<PlanCatalog>,
    juices: Vec<JuiceModel>,
    identity: CheckoutIdentity,
    profile_address: Option<ProfileAddress>,
    step: WizardStep,
    plan_id: Option<String>,
    juice_id: Option<i32>,
    quantity: i32,
    delivery_slot: DeliverySlot,
    customer: CustomerDeliveryInfo,
    address_mode: AddressEntryMode,
    saved_addresses: Vec<SavedAddress>,
    submitting: bool,
}

impl<S, H, G> CheckoutWizard<S, H, G>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    H: AddressHistorySource + Send + Sync + 'static,
    G: GuestAddressStore + Send + Sync + 'static,
{
    pub fn new(
        subscription_repo: Arc<S>,
        address_history: Arc<H>,
        guest_addresses: Arc<G>,
        catalog: Arc<PlanCatalog>,
        juices: Vec<JuiceModel>,
        identity: CheckoutIdentity,
        profile_address: Option<ProfileAddress>,
    ) -> Self {
        Self {
            subscription_repo,
            address_history,
            guest_addresses,
            catalog,
            juices,
            identity,
            profile_address,
            step: WizardStep::SelectPlan,
            plan_id: None,
            juice_id: None,
            quantity: 1,
            delivery_slot: DeliverySlot::default(),
            customer: CustomerDeliveryInfo::default(),
            address_mode: AddressEntryMode::NewEntry,
            saved_addresses: Vec::new(),
            submitting: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selected_plan(&self) -> Option<&SubscriptionPlan> {
        self.plan_id
            .as_deref()
            .and_then(|plan_id| self.catalog.find(plan_id))
    }

    pub fn selected_juice(&self) -> Option<&JuiceModel> {
        self.juice_id
            .and_then(|juice_id| self.juices.iter().find(|juice| juice.id == juice_id))
    }

    pub fn saved_addresses(&self) -> &[SavedAddress] {
        &self.saved_addresses
    }

    pub fn customer_info(&self) -> &CustomerDeliveryInfo {
        &self.customer
    }

    pub fn select_plan(&mut self, plan_id: &str) -> WizardResult<()> {
        if self.step != WizardStep::SelectPlan {
            return Err(WizardError::WrongStep);
        }
        let plan = self
            .catalog
            .find(plan_id)
            .ok_or_else(|| WizardError::UnknownPlan(plan_id.to_string()))?;

        // A variety plan carries no juice selection at all.
        if plan.plan_type == PlanType::Variety {
            self.juice_id = None;
        }
        self.plan_id = Some(plan.id.clone());
        debug!(plan_id, "checkout: plan selected");

        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: i32) -> WizardResult<()> {
        if self.step != WizardStep::SelectPlan {
            return Err(WizardError::WrongStep);
        }
        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
            return Err(WizardError::QuantityOutOfRange);
        }
        self.quantity = quantity;

        Ok(())
    }

    pub fn select_juice(&mut self, juice_id: i32) -> WizardResult<()> {
        if self.step != WizardStep::ChooseJuice {
            return Err(WizardError::WrongStep);
        }
        if !self.juices.iter().any(|juice| juice.id == juice_id) {
            return Err(WizardError::UnknownJuice(juice_id));
        }
        self.juice_id = Some(juice_id);
        debug!(juice_id, "checkout: juice selected");

        Ok(())
    }

    pub fn set_delivery_slot(&mut self, delivery_slot: DeliverySlot) -> WizardResult<()> {
        if self.step != WizardStep::DeliveryDetails {
            return Err(WizardError::WrongStep);
        }
        self.delivery_slot = delivery_slot;

        Ok(())
    }

    pub fn set_customer_info(&mut self, customer: CustomerDeliveryInfo) -> WizardResult<()> {
        if self.step != WizardStep::DeliveryDetails {
            return Err(WizardError::WrongStep);
        }
        self.customer = customer;

        Ok(())
    }

    /// Copies the chosen address into the draft; the fields stay editable
    /// afterwards.
    pub fn choose_saved_address(&mut self, address_id: usize) -> WizardResult<()> {
        if self.step != WizardStep::DeliveryDetails {
            return Err(WizardError::WrongStep);
        }
        let saved = self
            .saved_addresses
            .iter()
            .find(|address| address.id == address_id)
            .ok_or(WizardError::UnknownSavedAddress(address_id))?;

        self.customer.name = saved.name.clone();
        self.customer.phone = saved.phone.clone();
        self.customer.address = saved.address.clone();
        self.address_mode = AddressEntryMode::SavedList;

        Ok(())
    }

    pub fn use_new_address(&mut self) -> WizardResult<()> {
        if self.step != WizardStep::DeliveryDetails {
            return Err(WizardError::WrongStep);
        }
        self.address_mode = AddressEntryMode::NewEntry;

        Ok(())
    }

    pub async fn next(&mut self) -> WizardResult<WizardStep> {
        match self.step {
            WizardStep::SelectPlan => {
                let plan_type = self
                    .selected_plan()
                    .ok_or(WizardError::PlanRequired)?
                    .plan_type;
                if plan_type == PlanType::Variety {
                    self.enter_delivery_details().await?;
                } else {
                    self.step = WizardStep::ChooseJuice;
                }
            }
            WizardStep::ChooseJuice => {
                if self.juice_id.is_none() {
                    return Err(WizardError::JuiceRequired);
                }
                self.enter_delivery_details().await?;
            }
            WizardStep::DeliveryDetails => {
                let today = Utc::now().date_naive();
                self.customer
                    .validate(today)
                    .map_err(WizardError::Validation)?;
                self.step = WizardStep::Confirm;
            }
            WizardStep::Confirm | WizardStep::Submitted => return Err(WizardError::WrongStep),
        }

        debug!(step = ?self.step, "checkout: advanced");
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardResult<WizardStep> {
        self.step = match self.step {
            WizardStep::ChooseJuice => WizardStep::SelectPlan,
            // Mirror the forward skip: variety plans never saw the juice
            // step on the way in.
            WizardStep::DeliveryDetails => {
                match self.selected_plan().map(|plan| plan.plan_type) {
                    Some(PlanType::Variety) => WizardStep::SelectPlan,
                    _ => WizardStep::ChooseJuice,
                }
            }
            WizardStep::Confirm => WizardStep::DeliveryDetails,
            WizardStep::SelectPlan | WizardStep::Submitted => return Err(WizardError::WrongStep),
        };

        debug!(step = ?self.step, "checkout: stepped back");
        Ok(self.step)
    }

    pub fn total(&self) -> WizardResult<i32> {
        let plan = self.selected_plan().ok_or(WizardError::PlanRequired)?;
        Ok(pricing::compute_total(
            plan,
            self.selected_juice(),
            self.quantity,
            &self.juices,
        )?)
    }

    pub fn state(&self) -> CheckoutStateDto {
        CheckoutStateDto {
            step: self.step,
            plan: self.selected_plan().cloned(),
            juice: self.selected_juice().cloned(),
            quantity: self.quantity,
            delivery_slot: self.delivery_slot,
            customer: self.customer.clone(),
            address_mode: self.address_mode,
            saved_addresses: self.saved_addresses.clone(),
            total: self.total().ok(),
        }
    }

    /// Creates the subscription. On failure the draft and the `Confirm`
    /// step survive untouched and the guard flag is released, so the
    /// caller may retry.
    pub async fn submit(&mut self) -> WizardResult<SubscriptionModel> {
        if self.step != WizardStep::Confirm {
            return Err(WizardError::WrongStep);
        }
        if self.submitting {
            return Err(WizardError::SubmissionInFlight);
        }

        let plan = self.selected_plan().ok_or(WizardError::PlanRequired)?;
        let juice_id = match plan.plan_type {
            PlanType::Variety => None,
            PlanType::Single => Some(self.juice_id.ok_or(WizardError::JuiceRequired)?),
        };
        let plan_id = plan.id.clone();
        let total = pricing::compute_total(plan, self.selected_juice(), self.quantity, &self.juices)?;
        let starts_on = self
            .customer
            .start_date
            .ok_or_else(|| WizardError::Internal(anyhow!("start date missing on confirm")))?;

        let user_id = match &self.identity {
            CheckoutIdentity::User(user_id) => Some(*user_id),
            CheckoutIdentity::Guest(_) => None,
        };

        let insert_subscription = InsertSubscriptionEntity {
            user_id,
            juice_id,
            plan_id: plan_id.clone(),
            quantity: self.quantity,
            delivery_slot: self.delivery_slot.to_string(),
            customer_name: self.customer.name.clone(),
            customer_phone: self.customer.phone.clone(),
            customer_address: self.customer.address.clone(),
            starts_on,
            total,
            status: SubscriptionStatus::Active.to_string(),
        };

        info!(
            plan_id = %plan_id,
            quantity = self.quantity,
            total,
            "checkout: submitting subscription"
        );

        self.submitting = true;
        let created = match self.subscription_repo.create(insert_subscription).await {
            Ok(created) => created,
            Err(err) => {
                self.submitting = false;
                error!(
                    plan_id = %plan_id,
                    db_error = ?err,
                    "checkout: subscription create failed"
                );
                return Err(WizardError::Internal(err));
            }
        };
        self.submitting = false;

        if let CheckoutIdentity::Guest(device_key) = &self.identity {
            let entry = PastDelivery {
                name: self.customer.name.clone(),
                phone: self.customer.phone.clone(),
                address: self.customer.address.clone(),
                created_at: created.created_at,
            };
            // Best effort; a cold cache only costs the guest some typing
            // next time.
            if let Err(err) = self
                .guest_addresses
                .upsert_for_device(device_key, entry)
                .await
            {
                warn!(
                    %device_key,
                    error = ?err,
                    "checkout: failed to cache guest address"
                );
            }
        }

        self.step = WizardStep::Submitted;
        info!(subscription_id = %created.id, "checkout: subscription created");

        Ok(SubscriptionModel::from(created))
    }

    async fn enter_delivery_details(&mut self) -> WizardResult<()> {
        let resolved = match &self.identity {
            CheckoutIdentity::User(user_id) => {
                let orders = self
                    .address_history
                    .list_past_orders(*user_id)
                    .await
                    .map_err(|err| {
                        error!(
                            %user_id,
                            db_error = ?err,
                            "checkout: failed to load address history"
                        );
                        WizardError::Internal(err)
                    })?;
                resolve_addresses(self.profile_address.as_ref(), &orders)
            }
            CheckoutIdentity::Guest(device_key) => {
                let entries = self
                    .guest_addresses
                    .list_for_device(device_key)
                    .await
                    .map_err(|err| {
                        error!(
                            %device_key,
                            error = ?err,
                            "checkout: failed to load guest address cache"
                        );
                        WizardError::Internal(err)
                    })?;
                resolve_guest_addresses(&entries)
            }
        };

        self.address_mode = if resolved.is_empty() {
            AddressEntryMode::NewEntry
        } else {
            AddressEntryMode::SavedList
        };
        self.saved_addresses = resolved;
        self.step = WizardStep::DeliveryDetails;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use domain::entities::subscriptions::SubscriptionEntity;
    use domain::repositories::address_history::MockAddressHistorySource;
    use domain::repositories::guest_addresses::MockGuestAddressStore;
    use domain::repositories::subscriptions::MockSubscriptionRepository;
    use domain::value_objects::juices::seed_juices;

    type TestWizard =
        CheckoutWizard<MockSubscriptionRepository, MockAddressHistorySource, MockGuestAddressStore>;

    fn wizard_with(
        subscription_repo: MockSubscriptionRepository,
        address_history: MockAddressHistorySource,
        guest_addresses: MockGuestAddressStore,
        identity: CheckoutIdentity,
        profile_address: Option<ProfileAddress>,
    ) -> TestWizard {
        CheckoutWizard::new(
            Arc::new(subscription_repo),
            Arc::new(address_history),
            Arc::new(guest_addresses),
            Arc::new(PlanCatalog::standard()),
            seed_juices(),
            identity,
            profile_address,
        )
    }

    fn user_wizard_with_empty_history() -> TestWizard {
        let mut address_history = MockAddressHistorySource::new();
        address_history
            .expect_list_past_orders()
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        wizard_with(
            MockSubscriptionRepository::new(),
            address_history,
            MockGuestAddressStore::new(),
            CheckoutIdentity::User(Uuid::new_v4()),
            None,
        )
    }

    fn valid_customer() -> CustomerDeliveryInfo {
        CustomerDeliveryInfo {
            name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road, Bengaluru".to_string(),
            start_date: Some(Utc::now().date_naive() + Duration::days(1)),
        }
    }

    fn created_entity(insert: InsertSubscriptionEntity) -> SubscriptionEntity {
        SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id: insert.user_id,
            juice_id: insert.juice_id,
            plan_id: insert.plan_id,
            quantity: insert.quantity,
            delivery_slot: insert.delivery_slot,
            customer_name: insert.customer_name,
            customer_phone: insert.customer_phone,
            customer_address: insert.customer_address,
            starts_on: insert.starts_on,
            total: insert.total,
            status: insert.status,
            created_at: Utc::now(),
        }
    }

    async fn drive_to_confirm(wizard: &mut TestWizard) {
        wizard.select_plan("weekly-single").unwrap();
        wizard.set_quantity(2).unwrap();
        wizard.next().await.unwrap();
        wizard.select_juice(1).unwrap();
        wizard.next().await.unwrap();
        wizard.set_customer_info(valid_customer()).unwrap();
        assert_eq!(wizard.next().await.unwrap(), WizardStep::Confirm);
    }

    #[tokio::test]
    async fn variety_plan_skips_the_juice_step_both_ways() {
        let mut wizard = user_wizard_with_empty_history();

        wizard.select_plan("monthly-variety").unwrap();
        let step = wizard.next().await.unwrap();

        assert_eq!(step, WizardStep::DeliveryDetails);
        assert!(wizard.selected_juice().is_none());

        assert_eq!(wizard.back().unwrap(), WizardStep::SelectPlan);
    }

    #[tokio::test]
    async fn single_plan_walks_through_the_juice_step() {
        let mut wizard = user_wizard_with_empty_history();

        wizard.select_plan("weekly-single").unwrap();
        assert_eq!(wizard.next().await.unwrap(), WizardStep::ChooseJuice);

        // A juice is required before delivery details.
        assert!(matches!(
            wizard.next().await,
            Err(WizardError::JuiceRequired)
        ));

        wizard.select_juice(2).unwrap();
        assert_eq!(wizard.next().await.unwrap(), WizardStep::DeliveryDetails);
        assert_eq!(wizard.back().unwrap(), WizardStep::ChooseJuice);
    }

    #[tokio::test]
    async fn advancing_without_a_plan_is_rejected() {
        let mut wizard = user_wizard_with_empty_history();

        assert!(matches!(wizard.next().await, Err(WizardError::PlanRequired)));
        assert_eq!(wizard.step(), WizardStep::SelectPlan);
    }

    #[tokio::test]
    async fn quantity_is_clamped_to_the_allowed_range() {
        let mut wizard = user_wizard_with_empty_history();

        wizard.select_plan("weekly-single").unwrap();
        assert!(matches!(
            wizard.set_quantity(0),
            Err(WizardError::QuantityOutOfRange)
        ));
        assert!(matches!(
            wizard.set_quantity(6),
            Err(WizardError::QuantityOutOfRange)
        ));
        wizard.set_quantity(5).unwrap();
    }

    #[tokio::test]
    async fn unknown_plan_and_juice_ids_are_rejected() {
        let mut wizard = user_wizard_with_empty_history();

        assert!(matches!(
            wizard.select_plan("yearly-mega"),
            Err(WizardError::UnknownPlan(_))
        ));

        wizard.select_plan("weekly-single").unwrap();
        wizard.next().await.unwrap();
        assert!(matches!(
            wizard.select_juice(999),
            Err(WizardError::UnknownJuice(999))
        ));
    }

    #[tokio::test]
    async fn delivery_validation_reports_every_failing_field() {
        let mut wizard = user_wizard_with_empty_history();

        wizard.select_plan("weekly-single").unwrap();
        wizard.next().await.unwrap();
        wizard.select_juice(1).unwrap();
        wizard.next().await.unwrap();

        wizard
            .set_customer_info(CustomerDeliveryInfo {
                name: "X".to_string(),
                phone: "123".to_string(),
                address: "short".to_string(),
                start_date: None,
            })
            .unwrap();

        match wizard.next().await {
            Err(WizardError::Validation(fields)) => {
                assert!(fields.name.is_some());
                assert!(fields.phone.is_some());
                assert!(fields.address.is_some());
                assert!(fields.start_date.is_some());
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(wizard.step(), WizardStep::DeliveryDetails);
    }

    #[tokio::test]
    async fn saved_addresses_are_offered_and_populate_the_draft() {
        let user_id = Uuid::new_v4();
        let mut address_history = MockAddressHistorySource::new();
        address_history.expect_list_past_orders().returning(|_| {
            Box::pin(async {
                Ok(vec![PastDelivery {
                    name: "Asha Rao".to_string(),
                    phone: "9876543210".to_string(),
                    address: "44 Park Street, Kolkata".to_string(),
                    created_at: Utc::now(),
                }])
            })
        });

        let profile = ProfileAddress {
            name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road, Bengaluru".to_string(),
        };

        let mut wizard = wizard_with(
            MockSubscriptionRepository::new(),
            address_history,
            MockGuestAddressStore::new(),
            CheckoutIdentity::User(user_id),
            Some(profile),
        );

        wizard.select_plan("monthly-variety").unwrap();
        wizard.next().await.unwrap();

        assert_eq!(wizard.saved_addresses().len(), 2);
        assert_eq!(wizard.state().address_mode, AddressEntryMode::SavedList);

        wizard.choose_saved_address(1).unwrap();
        assert_eq!(wizard.customer_info().address, "44 Park Street, Kolkata");

        // The escape hatch flips the mode without touching the draft.
        wizard.use_new_address().unwrap();
        assert_eq!(wizard.customer_info().address, "44 Park Street, Kolkata");

        assert!(matches!(
            wizard.choose_saved_address(9),
            Err(WizardError::UnknownSavedAddress(9))
        ));
    }

    #[tokio::test]
    async fn empty_history_defaults_to_blank_entry() {
        let mut wizard = user_wizard_with_empty_history();

        wizard.select_plan("monthly-variety").unwrap();
        wizard.next().await.unwrap();

        assert!(wizard.saved_addresses().is_empty());
        assert_eq!(wizard.state().address_mode, AddressEntryMode::NewEntry);
    }

    #[tokio::test]
    async fn submit_creates_the_subscription_and_terminates_the_flow() {
        let user_id = Uuid::new_v4();

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_create()
            .times(1)
            .returning(|insert| Box::pin(async move { Ok(created_entity(insert)) }));

        let mut address_history = MockAddressHistorySource::new();
        address_history
            .expect_list_past_orders()
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let mut wizard = wizard_with(
            subscription_repo,
            address_history,
            MockGuestAddressStore::new(),
            CheckoutIdentity::User(user_id),
            None,
        );

        drive_to_confirm(&mut wizard).await;

        let subscription = wizard.submit().await.unwrap();
        assert_eq!(wizard.step(), WizardStep::Submitted);
        assert_eq!(subscription.user_id, Some(user_id));
        assert_eq!(subscription.juice_id, Some(1));
        assert_eq!(subscription.plan_id, "weekly-single");
        // 149 * 2 * 7 minus 10%
        assert_eq!(subscription.total, 1877);
        assert_eq!(subscription.status, SubscriptionStatus::Active);

        // Terminal: no re-entry.
        assert!(matches!(wizard.submit().await, Err(WizardError::WrongStep)));
        assert!(matches!(wizard.back(), Err(WizardError::WrongStep)));
    }

    #[tokio::test]
    async fn failed_submission_keeps_the_draft_and_allows_a_retry() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_create()
            .times(1)
            .returning(|_| Box::pin(async { Err(anyhow!("backend unavailable")) }));
        subscription_repo
            .expect_create()
            .times(1)
            .returning(|insert| Box::pin(async move { Ok(created_entity(insert)) }));

        let mut address_history = MockAddressHistorySource::new();
        address_history
            .expect_list_past_orders()
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let mut wizard = wizard_with(
            subscription_repo,
            address_history,
            MockGuestAddressStore::new(),
            CheckoutIdentity::User(Uuid::new_v4()),
            None,
        );

        drive_to_confirm(&mut wizard).await;
        let customer_before = wizard.customer_info().clone();

        let failure = wizard.submit().await;
        assert!(matches!(failure, Err(WizardError::Internal(_))));
        assert_eq!(wizard.step(), WizardStep::Confirm);
        assert_eq!(wizard.customer_info(), &customer_before);

        // The guard released, so the retry goes through.
        let subscription = wizard.submit().await.unwrap();
        assert_eq!(wizard.step(), WizardStep::Submitted);
        assert_eq!(subscription.total, 1877);
    }

    #[tokio::test]
    async fn guest_submission_caches_the_address_for_the_device() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_create()
            .times(1)
            .returning(|insert| Box::pin(async move { Ok(created_entity(insert)) }));

        let mut guest_addresses = MockGuestAddressStore::new();
        guest_addresses
            .expect_list_for_device()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        guest_addresses
            .expect_upsert_for_device()
            .withf(|device_key, entry| {
                device_key == "device-7" && entry.address == "12 MG Road, Bengaluru"
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let mut wizard = wizard_with(
            subscription_repo,
            MockAddressHistorySource::new(),
            guest_addresses,
            CheckoutIdentity::Guest("device-7".to_string()),
            None,
        );

        drive_to_confirm(&mut wizard).await;

        let subscription = wizard.submit().await.unwrap();
        assert_eq!(subscription.user_id, None);
        assert_eq!(wizard.step(), WizardStep::Submitted);
    }

    #[tokio::test]
    async fn confirm_total_matches_the_pricing_calculator() {
        let mut wizard = user_wizard_with_empty_history();

        wizard.select_plan("monthly-variety").unwrap();
        wizard.set_quantity(1).unwrap();
        wizard.next().await.unwrap();

        assert_eq!(wizard.total().unwrap(), 3428);
    }
}
