use thiserror::Error;

use domain::value_objects::enums::plan_types::PlanType;
use domain::value_objects::{juices::JuiceModel, plans::SubscriptionPlan};

pub const MIN_QUANTITY: i32 = 1;
pub const MAX_QUANTITY: i32 = 5;

/// Malformed input fails loudly instead of pricing to zero; the wizard's
/// guards are supposed to make these unreachable.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("a juice must be selected for single-juice plans")]
    JuiceRequired,
    #[error("cannot price a variety plan against an empty catalog")]
    EmptyCatalog,
    #[error("quantity must be between 1 and 5 juices per day")]
    QuantityOutOfRange,
}

/// Deterministic total for a prospective subscription. Intermediate values
/// stay real-valued; rounding happens once, at the very end.
pub fn compute_total(
    plan: &SubscriptionPlan,
    juice: Option<&JuiceModel>,
    quantity: i32,
    all_juices: &[JuiceModel],
) -> Result<i32, PricingError> {
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
        return Err(PricingError::QuantityOutOfRange);
    }

    let unit_price = match plan.plan_type {
        PlanType::Variety => {
            if all_juices.is_empty() {
                return Err(PricingError::EmptyCatalog);
            }
            let sum: i64 = all_juices.iter().map(|juice| i64::from(juice.price)).sum();
            sum as f64 / all_juices.len() as f64
        }
        PlanType::Single => f64::from(juice.ok_or(PricingError::JuiceRequired)?.price),
    };

    let daily_price = unit_price * f64::from(quantity);
    let subtotal = daily_price * f64::from(plan.duration.days());
    let discount = subtotal * f64::from(plan.discount) / 100.0;

    Ok((subtotal - discount).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::value_objects::enums::plan_durations::PlanDuration;
    use domain::value_objects::juices::seed_juices;
    use domain::value_objects::plans::PlanCatalog;

    fn plan(id: &str, discount: i32, plan_type: PlanType) -> SubscriptionPlan {
        SubscriptionPlan {
            id: id.to_string(),
            name: id.to_string(),
            duration: PlanDuration::from_plan_id(id),
            discount,
            plan_type,
            is_trial: false,
            is_popular: false,
            description: String::new(),
        }
    }

    fn juice_priced(id: i32, price: i32) -> JuiceModel {
        JuiceModel {
            id,
            name: format!("Juice {id}"),
            description: String::new(),
            price,
            category: domain::value_objects::enums::juice_categories::JuiceCategory::Detox,
            calories: 100,
            size_label: "500ml".to_string(),
        }
    }

    #[test]
    fn weekly_single_with_ten_percent_discount() {
        // 149 * 2 * 7 = 2086, minus 10% (208.6) = 1877.4 -> 1877
        let plan = plan("weekly-single", 10, PlanType::Single);
        let juice = juice_priced(1, 149);

        let total = compute_total(&plan, Some(&juice), 2, &seed_juices()).unwrap();
        assert_eq!(total, 1877);
    }

    #[test]
    fn monthly_variety_prices_off_the_catalog_mean() {
        // mean(149,129,179,139,199,119) * 30 = 4570, minus 25% = 3427.5 -> 3428
        let plan = plan("monthly-variety", 25, PlanType::Variety);

        let total = compute_total(&plan, None, 1, &seed_juices()).unwrap();
        assert_eq!(total, 3428);
    }

    #[test]
    fn same_inputs_always_yield_the_same_total() {
        let catalog = PlanCatalog::standard();
        let plan = catalog.find("monthly-single").unwrap();
        let juices = seed_juices();

        let first = compute_total(plan, Some(&juices[2]), 3, &juices).unwrap();
        let second = compute_total(plan, Some(&juices[2]), 3, &juices).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn total_is_monotonic_in_quantity() {
        let plan = plan("weekly-single", 10, PlanType::Single);
        let juices = seed_juices();

        let mut previous = 0;
        for quantity in MIN_QUANTITY..=MAX_QUANTITY {
            let total = compute_total(&plan, Some(&juices[0]), quantity, &juices).unwrap();
            assert!(total >= previous, "quantity {quantity} decreased the total");
            previous = total;
        }
    }

    #[test]
    fn variety_totals_ignore_the_juice_argument() {
        let plan = plan("weekly-variety", 12, PlanType::Variety);
        let juices = seed_juices();
        let expensive = juice_priced(99, 100_000);

        let without = compute_total(&plan, None, 2, &juices).unwrap();
        let with = compute_total(&plan, Some(&expensive), 2, &juices).unwrap();
        assert_eq!(without, with);
    }

    #[test]
    fn single_plan_without_juice_fails_loudly() {
        let plan = plan("weekly-single", 10, PlanType::Single);

        let result = compute_total(&plan, None, 1, &seed_juices());
        assert_eq!(result, Err(PricingError::JuiceRequired));
    }

    #[test]
    fn variety_plan_against_empty_catalog_fails_loudly() {
        let plan = plan("monthly-variety", 25, PlanType::Variety);

        let result = compute_total(&plan, None, 1, &[]);
        assert_eq!(result, Err(PricingError::EmptyCatalog));
    }

    #[test]
    fn quantity_outside_one_to_five_is_rejected() {
        let plan = plan("weekly-single", 10, PlanType::Single);
        let juices = seed_juices();

        assert_eq!(
            compute_total(&plan, Some(&juices[0]), 0, &juices),
            Err(PricingError::QuantityOutOfRange)
        );
        assert_eq!(
            compute_total(&plan, Some(&juices[0]), 6, &juices),
            Err(PricingError::QuantityOutOfRange)
        );
    }

    #[test]
    fn zero_discount_keeps_the_full_subtotal() {
        let plan = plan("weekly-single", 0, PlanType::Single);
        let juice = juice_priced(1, 100);

        let total = compute_total(&plan, Some(&juice), 1, &seed_juices()).unwrap();
        assert_eq!(total, 700);
    }
}
