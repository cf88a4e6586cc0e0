use serde::{Deserialize, Serialize};

use crate::value_objects::enums::{plan_durations::PlanDuration, plan_types::PlanType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    pub duration: PlanDuration,
    pub discount: i32,
    pub plan_type: PlanType,
    pub is_trial: bool,
    pub is_popular: bool,
    pub description: String,
}

/// Ordered set of plan variants. Plans are configuration, loaded once at
/// startup; there is no mutation surface.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    plans: Vec<SubscriptionPlan>,
}

fn plan(
    id: &str,
    name: &str,
    discount: i32,
    plan_type: PlanType,
    is_trial: bool,
    is_popular: bool,
    description: &str,
) -> SubscriptionPlan {
    SubscriptionPlan {
        id: id.to_string(),
        name: name.to_string(),
        duration: PlanDuration::from_plan_id(id),
        discount,
        plan_type,
        is_trial,
        is_popular,
        description: description.to_string(),
    }
}

impl PlanCatalog {
    pub fn standard() -> Self {
        Self {
            plans: vec![
                plan(
                    "trial-weekly-single",
                    "Starter Week",
                    5,
                    PlanType::Single,
                    true,
                    false,
                    "One week, one juice, no commitment",
                ),
                plan(
                    "weekly-single",
                    "Weekly Single",
                    10,
                    PlanType::Single,
                    false,
                    false,
                    "Perfect for trying out our service",
                ),
                plan(
                    "weekly-variety",
                    "Weekly Variety",
                    12,
                    PlanType::Variety,
                    false,
                    false,
                    "A different juice every day for a week",
                ),
                plan(
                    "monthly-single",
                    "Monthly Single",
                    20,
                    PlanType::Single,
                    false,
                    true,
                    "Our most popular plan",
                ),
                plan(
                    "monthly-variety",
                    "Monthly Variety",
                    25,
                    PlanType::Variety,
                    false,
                    true,
                    "The full rotation, best value",
                ),
            ],
        }
    }

    pub fn list(&self) -> &[SubscriptionPlan] {
        &self.plans
    }

    pub fn find(&self, plan_id: &str) -> Option<&SubscriptionPlan> {
        self.plans.iter().find(|plan| plan.id == plan_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_ids_resolve_to_seven_day_cycles() {
        let catalog = PlanCatalog::standard();
        for plan in catalog.list() {
            let expected = if plan.id.contains("weekly") { 7 } else { 30 };
            assert_eq!(plan.duration.days(), expected, "plan {}", plan.id);
        }
    }

    #[test]
    fn find_returns_known_plans_and_rejects_unknown_ids() {
        let catalog = PlanCatalog::standard();

        let monthly_variety = catalog.find("monthly-variety").unwrap();
        assert_eq!(monthly_variety.plan_type, PlanType::Variety);
        assert_eq!(monthly_variety.discount, 25);

        assert!(catalog.find("yearly-single").is_none());
    }

    #[test]
    fn catalog_order_is_stable() {
        let catalog = PlanCatalog::standard();
        let ids: Vec<&str> = catalog.list().iter().map(|plan| plan.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "trial-weekly-single",
                "weekly-single",
                "weekly-variety",
                "monthly-single",
                "monthly-variety",
            ]
        );
    }
}
