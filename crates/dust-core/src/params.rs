//! Tunable schedule parameters.
//!
//! Production values come from [`crate::constants`]; tests shrink the
//! durations to small numbers so expected amounts can be worked by hand.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ASSUMED_ACCRUAL_MONTHS, BASE_VESTING_DURATION, COMMUNITY_POOL_VESTING_DURATION, ONE_DAY,
    ONE_MONTH, POWPUNKS_VESTING_DURATION, PROJECTION_ANCHOR, PROJECTION_MONTHS,
};
use crate::error::VestingError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ScheduleParams {
    /// Duration of the base allocation vest before any checkpoint.
    pub base_vesting_duration: u64,
    pub community_pool_vesting_duration: u64,
    pub powpunks_vesting_duration: u64,
    /// Step between projection points.
    pub month_duration: u64,
    /// Alignment unit for the global projection start.
    pub day_duration: u64,
    pub projection_anchor: u64,
    pub projection_months: u32,
    pub assumed_accrual_months: u32,
}

impl Default for ScheduleParams {
    fn default() -> Self {
        Self {
            base_vesting_duration: BASE_VESTING_DURATION,
            community_pool_vesting_duration: COMMUNITY_POOL_VESTING_DURATION,
            powpunks_vesting_duration: POWPUNKS_VESTING_DURATION,
            month_duration: ONE_MONTH,
            day_duration: ONE_DAY,
            projection_anchor: PROJECTION_ANCHOR,
            projection_months: PROJECTION_MONTHS,
            assumed_accrual_months: ASSUMED_ACCRUAL_MONTHS,
        }
    }
}

impl ScheduleParams {
    /// Reject any zero duration or empty window.
    pub fn validate(&self) -> Result<(), VestingError> {
        let checks: [(u64, &'static str); 7] = [
            (self.base_vesting_duration, "base_vesting_duration"),
            (self.community_pool_vesting_duration, "community_pool_vesting_duration"),
            (self.powpunks_vesting_duration, "powpunks_vesting_duration"),
            (self.month_duration, "month_duration"),
            (self.day_duration, "day_duration"),
            (self.projection_months as u64, "projection_months"),
            (self.assumed_accrual_months as u64, "assumed_accrual_months"),
        ];
        match checks.iter().find(|(value, _)| *value == 0) {
            Some((_, name)) => Err(VestingError::ZeroDuration(name)),
            None => Ok(()),
        }
    }
}
