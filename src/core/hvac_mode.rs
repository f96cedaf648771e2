use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Climate operating mode reported by the device.
///
/// Modes outside the known set are preserved verbatim in `Other` so newer
/// devices keep working; they simply get no icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HvacMode {
    Auto,
    HeatCool,
    Heat,
    Cool,
    Off,
    FanOnly,
    Dry,
    Other(String),
}

impl HvacMode {
    /// Every mode the card has an icon for, in display priority order.
    pub const KNOWN: [HvacMode; 7] = [
        HvacMode::Auto,
        HvacMode::HeatCool,
        HvacMode::Heat,
        HvacMode::Cool,
        HvacMode::Dry,
        HvacMode::FanOnly,
        HvacMode::Off,
    ];

    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "auto" => Self::Auto,
            "heat_cool" => Self::HeatCool,
            "heat" => Self::Heat,
            "cool" => Self::Cool,
            "off" => Self::Off,
            "fan_only" => Self::FanOnly,
            "dry" => Self::Dry,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "auto",
            Self::HeatCool => "heat_cool",
            Self::Heat => "heat",
            Self::Cool => "cool",
            Self::Off => "off",
            Self::FanOnly => "fan_only",
            Self::Dry => "dry",
            Self::Other(value) => value,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Display priority rank; unknown modes rank after every known mode.
    #[must_use]
    pub fn priority(&self) -> u8 {
        match self {
            Self::Auto => 1,
            Self::HeatCool => 2,
            Self::Heat => 3,
            Self::Cool => 4,
            Self::Dry => 5,
            Self::FanOnly => 6,
            Self::Off => 7,
            Self::Other(_) => u8::MAX,
        }
    }
}

impl From<String> for HvacMode {
    fn from(value: String) -> Self {
        match Self::parse(&value) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl From<HvacMode> for String {
    fn from(mode: HvacMode) -> Self {
        match mode {
            HvacMode::Other(value) => value,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total order used for the mode-icon row.
#[must_use]
pub fn compare_hvac_modes(left: &HvacMode, right: &HvacMode) -> Ordering {
    left.priority().cmp(&right.priority())
}

/// Returns a display-ordered copy; the sort is stable so unknown modes keep
/// their reported relative order.
#[must_use]
pub fn sorted_hvac_modes(modes: &[HvacMode]) -> Vec<HvacMode> {
    let mut sorted = modes.to_vec();
    sorted.sort_by(compare_hvac_modes);
    sorted
}
