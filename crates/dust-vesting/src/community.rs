//! Community reward stream.
//!
//! An account's share of the community pool is its allocation scaled by the
//! growth of the global reward index since the account last synced. That
//! share vests linearly over the community pool duration, starting only once
//! `vesting_start_time` has been set on chain.

use serde::{Deserialize, Serialize};
use tracing::debug;

use dust_core::decimal;
use dust_core::error::{ArithmeticError, VestingError};
use dust_core::fixed::{apply_index, linear_fraction, signed_diff};
use dust_core::types::Account;

/// Community reward figures for one account at one timestamp.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommunityRewards {
    /// Accrued since the account's reward index snapshot.
    #[serde(with = "decimal::unsigned")]
    pub total: u128,
    /// Portion of `total` vested at the timestamp.
    #[serde(with = "decimal::unsigned")]
    pub vested: u128,
    #[serde(with = "decimal::unsigned")]
    pub claimed: u128,
    /// `vested - claimed`. Negative if claims ran ahead of the schedule.
    #[serde(with = "decimal::signed")]
    pub claimable: i128,
}

/// `allocation * (global_index - account_index) / 10^18`.
pub fn total_rewards(account: &Account, global_reward_index: u128) -> Result<u128, VestingError> {
    let delta = global_reward_index
        .checked_sub(account.reward_index)
        .ok_or(VestingError::RewardIndexAhead {
            account: account.id,
            account_index: account.reward_index,
            global_index: global_reward_index,
        })?;
    apply_index(account.total_allocation, delta).map_err(|source| VestingError::Arithmetic {
        account: account.id,
        source,
    })
}

/// Vested portion of `total` at `timestamp`. Zero until the sub-vest starts.
pub fn vested_rewards(
    total: u128,
    vesting_start_time: u64,
    timestamp: u64,
    duration: u64,
) -> Result<u128, ArithmeticError> {
    if vesting_start_time == 0 || timestamp < vesting_start_time {
        return Ok(0);
    }
    linear_fraction(total, timestamp - vesting_start_time, duration)
}

/// Full community figures for `account` at `timestamp`.
pub fn community_rewards(
    account: &Account,
    timestamp: u64,
    global_reward_index: u128,
    duration: u64,
) -> Result<CommunityRewards, VestingError> {
    let arithmetic = |source| VestingError::Arithmetic {
        account: account.id,
        source,
    };

    let total = total_rewards(account, global_reward_index)?;
    let vested = vested_rewards(total, account.vesting_start_time, timestamp, duration)
        .map_err(arithmetic)?;
    if vested > total {
        return Err(VestingError::CommunityRewardsExceedTotal {
            account: account.id,
            vested,
            total,
        });
    }

    let claimable = signed_diff(vested, account.community_rewards_claimed).map_err(arithmetic)?;
    if claimable < 0 {
        debug!(
            account = %account.id,
            vested = %vested,
            claimed = %account.community_rewards_claimed,
            timestamp,
            "community claims ahead of schedule"
        );
    }

    Ok(CommunityRewards {
        total,
        vested,
        claimed: account.community_rewards_claimed,
        claimable,
    })
}
