//! Application-level configuration constants.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

// Distances
pub const MARATHON_KM: f64 = 42.195;
pub const HALF_MARATHON_KM: f64 = 21.0975;
pub const DISTANCE_TOLERANCE_KM: f64 = 0.001;

// Default values for input fields
pub const DEFAULT_HOURS: u32 = 4;
pub const DEFAULT_MINUTES: u32 = 0;
pub const DEFAULT_SECONDS: u32 = 0;
pub const DEFAULT_DISTANCE: &str = "42.195";

// Min/Max limits for input fields
pub const MAX_HOURS: i64 = 99;
pub const MAX_MINUTES: i64 = 59;
pub const MAX_SECONDS: i64 = 59;

// Checkpoint sets (km)
pub const RACE_DAY_CHECKPOINTS_KM: [f64; 5] = [5.0, 10.0, HALF_MARATHON_KM, 30.0, 40.0];
pub const KEY_MARKERS_KM: [f64; 9] = [
    5.0,
    10.0,
    15.0,
    20.0,
    HALF_MARATHON_KM,
    25.0,
    30.0,
    35.0,
    40.0,
];

// Reference chart: 2:30:00 to 6:00:00 in 5 minute steps
pub const CHART_START_MIN: u32 = 150;
pub const CHART_END_MIN: u32 = 360;
pub const CHART_STEP_MIN: u32 = 5;

// Page element ids
pub const HOURS_ID: &str = "h";
pub const MINUTES_ID: &str = "m";
pub const SECONDS_ID: &str = "s";
pub const DISTANCE_ID: &str = "dist";
pub const CALCULATE_BUTTON_ID: &str = "calcBtn";
pub const RESET_BUTTON_ID: &str = "resetBtn";
pub const RESULTS_ID: &str = "results";
pub const CHART_ID: &str = "chartTable";

/// Name of the page global holding the goal page settings.
pub const GOAL_PAGE_GLOBAL: &str = "GOAL_PAGE";

/// Settings a goal landing page defines before loading the calculator:
///
/// ```html
/// <script>window.GOAL_PAGE = { goalSeconds: 13800, lockDistanceKm: 42.195 };</script>
/// ```
///
/// Both fields are optional so that a present but incomplete object still
/// marks the page as a goal page. A field holding something other than a
/// number reads as absent without affecting the other one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalPageConfig {
    #[serde(deserialize_with = "lenient_number")]
    pub goal_seconds: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub lock_distance_km: Option<f64>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeNumber {
        Number(f64),
        Other(IgnoredAny),
    }

    Ok(match MaybeNumber::deserialize(deserializer)? {
        MaybeNumber::Number(n) => Some(n),
        MaybeNumber::Other(_) => None,
    })
}

impl GoalPageConfig {
    pub fn new(goal_seconds: f64, lock_distance_km: Option<f64>) -> Self {
        Self {
            goal_seconds: Some(goal_seconds),
            lock_distance_km,
        }
    }

    /// Goal time in seconds, if it is a usable positive number.
    pub fn goal(&self) -> Option<f64> {
        self.goal_seconds.filter(|g| g.is_finite() && *g > 0.0)
    }

    /// Distance to lock the form to, if it is a usable positive number.
    pub fn locked_distance(&self) -> Option<f64> {
        self.lock_distance_km.filter(|d| d.is_finite() && *d > 0.0)
    }
}
