use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JuiceCategory {
    Detox,
    Energy,
    Immunity,
    Refresh,
    Protein,
}

impl JuiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            JuiceCategory::Detox => "detox",
            JuiceCategory::Energy => "energy",
            JuiceCategory::Immunity => "immunity",
            JuiceCategory::Refresh => "refresh",
            JuiceCategory::Protein => "protein",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "detox" => Some(JuiceCategory::Detox),
            "energy" => Some(JuiceCategory::Energy),
            "immunity" => Some(JuiceCategory::Immunity),
            "refresh" => Some(JuiceCategory::Refresh),
            "protein" => Some(JuiceCategory::Protein),
            _ => None,
        }
    }
}

impl Display for JuiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
