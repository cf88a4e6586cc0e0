use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanDuration {
    Weekly,
    Monthly,
}

impl PlanDuration {
    /// Plan identities encode their cycle ("weekly-single",
    /// "monthly-variety"). Only used when seeding the catalog; everywhere
    /// else the duration travels as this enum.
    pub fn from_plan_id(plan_id: &str) -> Self {
        if plan_id.contains("weekly") {
            PlanDuration::Weekly
        } else {
            PlanDuration::Monthly
        }
    }

    pub fn days(&self) -> i32 {
        match self {
            PlanDuration::Weekly => 7,
            PlanDuration::Monthly => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanDuration::Weekly => "7 days",
            PlanDuration::Monthly => "30 days",
        }
    }
}

impl Display for PlanDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let duration = match self {
            PlanDuration::Weekly => "weekly",
            PlanDuration::Monthly => "monthly",
        };
        write!(f, "{}", duration)
    }
}
