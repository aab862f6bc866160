//! Vesting engine implementing the [`VestingCalculator`] trait.
//!
//! Composes the base schedule and the community stream into one
//! [`VestingResult`] per account. Inputs are validated before any arithmetic
//! runs; the vested amount is checked against the allocation afterwards.

use serde::{Deserialize, Serialize};

use dust_core::decimal;
use dust_core::error::VestingError;
use dust_core::params::ScheduleParams;
use dust_core::traits::VestingCalculator;
use dust_core::types::{Account, AccountId, Checkpoint, Owner};

use crate::community::community_rewards;
use crate::schedule;

/// Vesting state of one account at one timestamp.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VestingResult {
    pub account_id: AccountId,
    pub owner: Owner,
    #[serde(with = "decimal::unsigned")]
    pub total_allocation: u128,
    #[serde(with = "decimal::unsigned")]
    pub released: u128,
    pub start_time: u64,
    /// Base allocation vested at the timestamp.
    #[serde(with = "decimal::unsigned")]
    pub vested: u128,
    #[serde(with = "decimal::unsigned")]
    pub total_community_rewards: u128,
    #[serde(with = "decimal::unsigned")]
    pub community_rewards_claimed: u128,
    /// Community rewards vested before subtracting claims.
    #[serde(with = "decimal::unsigned")]
    pub community_rewards_vested: u128,
    #[serde(with = "decimal::signed")]
    pub community_rewards_claimable: i128,
    pub is_vesting_complete: bool,
    pub vesting_start_time: u64,
    pub checkpoint_count: u32,
    #[serde(with = "decimal::unsigned")]
    pub reward_index: u128,
}

/// The production vesting calculator.
#[derive(Debug, Clone, Copy)]
pub struct VestingEngine {
    params: ScheduleParams,
}

impl Default for VestingEngine {
    fn default() -> Self {
        Self {
            params: ScheduleParams::default(),
        }
    }
}

impl VestingEngine {
    /// Create an engine after rejecting zero durations.
    pub fn new(params: ScheduleParams) -> Result<Self, VestingError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ScheduleParams {
        &self.params
    }

    /// Checkpoint sequence must match the declared count, be strictly
    /// increasing in time, and carry non-zero durations.
    pub fn validate_checkpoints(
        &self,
        account: &Account,
        checkpoints: &[Checkpoint],
    ) -> Result<(), VestingError> {
        if checkpoints.len() != account.checkpoint_count as usize {
            return Err(VestingError::CheckpointCountMismatch {
                account: account.id,
                declared: account.checkpoint_count,
                supplied: checkpoints.len(),
            });
        }
        for (index, checkpoint) in checkpoints.iter().enumerate() {
            if checkpoint.vesting_duration == 0 {
                return Err(VestingError::ZeroCheckpointDuration {
                    account: account.id,
                    index,
                });
            }
            if index > 0 && checkpoint.timestamp <= checkpoints[index - 1].timestamp {
                return Err(VestingError::CheckpointOutOfOrder {
                    account: account.id,
                    index,
                });
            }
        }
        Ok(())
    }

    /// Base allocation vested at `timestamp`, integrity-checked.
    pub fn base_vested(
        &self,
        account: &Account,
        checkpoints: &[Checkpoint],
        timestamp: u64,
    ) -> Result<u128, VestingError> {
        let vested = schedule::vested_amount(
            account.total_allocation,
            account.start_time,
            checkpoints,
            timestamp,
            self.params.base_vesting_duration,
        )
        .map_err(|source| VestingError::Arithmetic {
            account: account.id,
            source,
        })?;

        if vested > account.total_allocation {
            return Err(VestingError::VestedExceedsAllocation {
                account: account.id,
                vested,
                allocation: account.total_allocation,
            });
        }
        Ok(vested)
    }
}

impl VestingCalculator for VestingEngine {
    type Output = VestingResult;

    fn compute_vesting(
        &self,
        account: &Account,
        checkpoints: &[Checkpoint],
        timestamp: u64,
        global_reward_index: u128,
    ) -> Result<VestingResult, VestingError> {
        self.validate_checkpoints(account, checkpoints)?;

        let vested = self.base_vested(account, checkpoints, timestamp)?;
        let community = community_rewards(
            account,
            timestamp,
            global_reward_index,
            self.params.community_pool_vesting_duration,
        )?;

        Ok(VestingResult {
            account_id: account.id,
            owner: account.owner.clone(),
            total_allocation: account.total_allocation,
            released: account.released,
            start_time: account.start_time,
            vested,
            total_community_rewards: community.total,
            community_rewards_claimed: community.claimed,
            community_rewards_vested: community.vested,
            community_rewards_claimable: community.claimable,
            is_vesting_complete: vested == account.total_allocation,
            vesting_start_time: account.vesting_start_time,
            checkpoint_count: account.checkpoint_count,
            reward_index: account.reward_index,
        })
    }
}
