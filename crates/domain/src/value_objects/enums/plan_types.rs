use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// `Single` delivers one chosen juice daily; `Variety` rotates through the
/// whole catalog and therefore carries no juice selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Single,
    Variety,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Single => "single",
            PlanType::Variety => "variety",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "single" => Some(PlanType::Single),
            "variety" => Some(PlanType::Variety),
            _ => None,
        }
    }
}

impl Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
