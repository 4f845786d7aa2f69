use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Accepted conversion factors (折算系数).
pub const CONVERSION_FACTOR_RANGE: RangeInclusive<f64> = 0.1..=5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Export-time multiplier (折算系数); values are rounded after scaling.
    #[serde(default = "default_conversion_factor")]
    pub conversion_factor: f64,
}

fn default_conversion_factor() -> f64 {
    1.0
}

impl Default for PlanMetadata {
    fn default() -> Self {
        Self {
            title: "工程劳动力计划".to_string(),
            description: String::new(),
            conversion_factor: default_conversion_factor(),
        }
    }
}
