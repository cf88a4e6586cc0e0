use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Preferred delivery window. A scheduling label only; no dispatch system
/// consumes it.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliverySlot {
    #[default]
    Morning,
    Afternoon,
    Evening,
}

impl DeliverySlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliverySlot::Morning => "morning",
            DeliverySlot::Afternoon => "afternoon",
            DeliverySlot::Evening => "evening",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "morning" => Some(DeliverySlot::Morning),
            "afternoon" => Some(DeliverySlot::Afternoon),
            "evening" => Some(DeliverySlot::Evening),
            _ => None,
        }
    }

    pub fn window(&self) -> &'static str {
        match self {
            DeliverySlot::Morning => "6:00 AM - 9:00 AM",
            DeliverySlot::Afternoon => "12:00 PM - 3:00 PM",
            DeliverySlot::Evening => "5:00 PM - 8:00 PM",
        }
    }
}

impl Display for DeliverySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
