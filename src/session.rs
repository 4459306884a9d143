use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use mealsub_billing::{PricingBreakdown, price};
use mealsub_catalog::{
    ApplyCouponInput, CouponService, CustomerDirectory, Plan, PlanCatalog, PlanGenerator,
};
use mealsub_db::SqliteDraftRepository;
use mealsub_schedule::{SchedulePivot, pivot};
use mealsub_shared::{Error, Result};
use mealsub_subscription::{SubscriptionGateway, SubscriptionId, assemble};
use mealsub_wizard::{
    DraftStore, Step, WizardAction, WizardController, WizardStore,
};
use validator::Validate;

use crate::config::Config;

/// One operator's pass through the subscription wizard.
///
/// The UI layer holds a session and consumes it in process: steps dispatch
/// actions into the store, the stepper reads the controller, the billing
/// and preview screens call the pricing and pivot helpers, and the final
/// screen submits.
pub struct WizardSession {
    store: WizardStore,
    controller: WizardController,
}

impl WizardSession {
    /// Mount the wizard: load the persisted draft (exactly once), hydrate,
    /// and resume at the step it was saved on.
    pub async fn open(autosave: DraftStore) -> Self {
        let record = autosave.load().await;
        let store = WizardStore::new(autosave);

        let controller = match record {
            Some(record) => {
                let controller = WizardController::starting_at(record.current_step);
                store.dispatch(WizardAction::Hydrate(record.form_data));
                controller
            }
            None => WizardController::new(),
        };

        store.set_persisted_step(controller.current().number());

        Self { store, controller }
    }

    /// Wire a session onto the configured SQLite draft storage.
    pub async fn from_config(pool: sqlx::SqlitePool, config: &Config) -> Self {
        let repository = Arc::new(SqliteDraftRepository::new(
            pool,
            config.wizard.storage_key.clone(),
        ));
        let autosave = DraftStore::with_policy(
            repository,
            Duration::from_millis(config.wizard.autosave_debounce_ms),
            config.wizard.draft_max_age_days,
        );

        Self::open(autosave).await
    }

    pub fn store(&self) -> &WizardStore {
        &self.store
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    pub fn dispatch(&self, action: WizardAction) {
        self.store.dispatch(action);
    }

    /// Validate the current step and advance.
    pub fn next(&mut self, today: NaiveDate) -> bool {
        let advanced = self.controller.next(&self.store.snapshot(), today);
        if advanced {
            self.store
                .set_persisted_step(self.controller.current().number());
            tracing::debug!(step = %self.controller.current(), "wizard advanced");
        }
        advanced
    }

    pub fn previous(&mut self, target: Option<Step>) {
        self.controller.previous(target);
        self.store
            .set_persisted_step(self.controller.current().number());
    }

    pub fn jump(&mut self, step: Step) {
        self.controller.jump(step);
        self.store
            .set_persisted_step(self.controller.current().number());
    }

    /// Price the draft against the selected plan. Pure; the billing step
    /// recomputes it on every input change.
    pub fn breakdown(&self, plan: &Plan) -> PricingBreakdown {
        let draft = self.store.snapshot();
        price(
            plan.price,
            &plan.tax,
            draft.billing.manual_discount,
            draft.coupon_discount(),
            plan.bag_value,
        )
    }

    /// Apply a coupon code against the selected plan. On success the
    /// resolved discount lands in the draft and the amount is returned for
    /// display; `Error::Coupon` carries the inline message for the field.
    pub async fn apply_coupon(
        &self,
        coupons: &dyn CouponService,
        code: impl Into<String>,
    ) -> Result<f64> {
        let code = code.into();
        let draft = self.store.snapshot();
        let Some(plan_id) = draft.plan.plan_id else {
            mealsub_shared::bail!("select a plan before applying a coupon");
        };

        let input = ApplyCouponInput {
            code: code.clone(),
            plan_id,
        };
        input.validate()?;

        let discount = coupons.apply(input).await?;
        let amount = discount.amount;
        self.store
            .dispatch(WizardAction::ApplyCoupon { code, discount });

        Ok(amount)
    }

    /// Run plan generation for the completed plan step and keep the result
    /// in the draft for the preview and summary screens.
    pub async fn generate_plan(&self, generator: &dyn PlanGenerator) -> Result<()> {
        let draft = self.store.snapshot();
        let Some(request) = draft.generate_request() else {
            mealsub_shared::bail!("plan step is incomplete, cannot generate a schedule");
        };

        let plan = generator.generate(&request).await?;
        self.store.dispatch(WizardAction::SetGeneratedPlan(Some(plan)));

        Ok(())
    }

    /// Date × meal-type pivot of the generated plan for the preview grid.
    pub fn preview(&self) -> SchedulePivot {
        let draft = self.store.snapshot();
        match &draft.plan.generated_plan {
            Some(plan) => pivot(&plan.meals),
            None => SchedulePivot::default(),
        }
    }

    /// Assemble and submit the reviewed draft.
    ///
    /// A failed customer-info lookup aborts before anything is sent and
    /// puts the wizard back on the billing step; the caller surfaces the
    /// specific message. On success the draft is destroyed and the wizard
    /// enters its terminal summary display.
    pub async fn submit(
        &mut self,
        customers: &dyn CustomerDirectory,
        catalog: &dyn PlanCatalog,
        gateway: &dyn SubscriptionGateway,
        breakdown: &PricingBreakdown,
    ) -> Result<SubscriptionId> {
        let draft = self.store.snapshot();

        let request = match assemble(&draft, breakdown, customers, catalog).await {
            Ok(request) => request,
            Err(Error::CustomerInfoUnavailable) => {
                self.controller.return_to_billing();
                return Err(Error::CustomerInfoUnavailable);
            }
            Err(err) => return Err(err),
        };

        let id = gateway.create(&request).await?;
        tracing::info!(subscription_id = %id, "subscription created");

        self.store.dispatch(WizardAction::ResetAll);
        self.controller.finish();

        Ok(id)
    }
}
