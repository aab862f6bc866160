//! Portfolio-level aggregation over many accounts.
//!
//! Checkpoints are grouped by account once into a [`CheckpointIndex`] so the
//! projection can reuse the grouping across all of its month boundaries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use dust_core::decimal;
use dust_core::error::{ArithmeticError, VestingError};
use dust_core::traits::VestingCalculator;
use dust_core::types::{Account, AccountId, Checkpoint, Owner};

use crate::engine::{VestingEngine, VestingResult};

/// Checkpoints grouped by account, each group ascending by checkpoint id.
#[derive(Debug, Clone, Default)]
pub struct CheckpointIndex {
    by_account: HashMap<AccountId, Vec<Checkpoint>>,
}

impl CheckpointIndex {
    /// Group `checkpoints` by account. With `owner`, checkpoints belonging to
    /// anyone else are dropped before grouping.
    pub fn build<I>(checkpoints: I, owner: Option<&Owner>) -> Self
    where
        I: IntoIterator<Item = Checkpoint>,
    {
        let mut by_account: HashMap<AccountId, Vec<Checkpoint>> = HashMap::new();
        for checkpoint in checkpoints {
            if owner.is_some_and(|o| &checkpoint.owner != o) {
                continue;
            }
            by_account
                .entry(checkpoint.account_id)
                .or_default()
                .push(checkpoint);
        }
        for group in by_account.values_mut() {
            group.sort_by_key(|c| c.checkpoint_id);
        }
        Self { by_account }
    }

    /// Checkpoints of `id`; empty if it has none.
    pub fn get(&self, id: AccountId) -> &[Checkpoint] {
        self.by_account.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of accounts with at least one checkpoint.
    pub fn len(&self) -> usize {
        self.by_account.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_account.is_empty()
    }
}

/// Summed figures across a set of accounts.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AggregateTotals {
    #[serde(with = "decimal::unsigned")]
    pub total_community_rewards: u128,
    #[serde(with = "decimal::unsigned")]
    pub total_community_rewards_claimed: u128,
    #[serde(with = "decimal::signed")]
    pub total_community_rewards_claimable: i128,
    /// Sum of allocations.
    #[serde(with = "decimal::unsigned")]
    pub total_allocation: u128,
    /// Base vest already withdrawn.
    #[serde(with = "decimal::unsigned")]
    pub total_released: u128,
    /// Allocations of fully vested accounts that never withdrew anything.
    #[serde(with = "decimal::unsigned")]
    pub total_vested_unclaimed: u128,
}

impl AggregateTotals {
    /// Fold one account result into the totals.
    pub fn add(&mut self, result: &VestingResult) -> Result<(), ArithmeticError> {
        fn add_u(acc: &mut u128, v: u128) -> Result<(), ArithmeticError> {
            *acc = acc.checked_add(v).ok_or(ArithmeticError::Overflow)?;
            Ok(())
        }

        add_u(&mut self.total_community_rewards, result.total_community_rewards)?;
        add_u(
            &mut self.total_community_rewards_claimed,
            result.community_rewards_claimed,
        )?;
        self.total_community_rewards_claimable = self
            .total_community_rewards_claimable
            .checked_add(result.community_rewards_claimable)
            .ok_or(ArithmeticError::Overflow)?;
        add_u(&mut self.total_allocation, result.total_allocation)?;
        add_u(&mut self.total_released, result.released)?;
        if result.is_vesting_complete && result.released == 0 {
            add_u(&mut self.total_vested_unclaimed, result.total_allocation)?;
        }
        Ok(())
    }
}

/// Per-account detail alongside the totals.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateResult {
    pub accounts: Vec<VestingResult>,
    #[serde(flatten)]
    pub totals: AggregateTotals,
}

impl AggregateResult {
    /// Ids of accounts whose base vesting is complete.
    pub fn completed_account_ids(&self) -> Vec<AccountId> {
        self.accounts
            .iter()
            .filter(|r| r.is_vesting_complete)
            .map(|r| r.account_id)
            .collect()
    }
}

/// Run the engine over every account using a prebuilt checkpoint index.
///
/// Any per-account error fails the whole batch: partial totals would be
/// silently wrong.
pub fn aggregate_indexed(
    engine: &VestingEngine,
    accounts: &[Account],
    index: &CheckpointIndex,
    timestamp: u64,
    global_reward_index: u128,
) -> Result<AggregateResult, VestingError> {
    let mut totals = AggregateTotals::default();
    let mut details = Vec::with_capacity(accounts.len());

    for account in accounts {
        let result =
            engine.compute_vesting(account, index.get(account.id), timestamp, global_reward_index)?;
        totals.add(&result).map_err(VestingError::TotalsOverflow)?;
        details.push(result);
    }

    debug!(
        accounts = details.len(),
        timestamp,
        allocation = %totals.total_allocation,
        claimable = %totals.total_community_rewards_claimable,
        "aggregated vesting"
    );

    Ok(AggregateResult {
        accounts: details,
        totals,
    })
}

/// Group `checkpoints` (optionally restricted to `owner`) and aggregate.
pub fn aggregate(
    engine: &VestingEngine,
    accounts: &[Account],
    checkpoints: &[Checkpoint],
    timestamp: u64,
    global_reward_index: u128,
    owner: Option<&Owner>,
) -> Result<AggregateResult, VestingError> {
    let index = CheckpointIndex::build(checkpoints.iter().cloned(), owner);
    aggregate_indexed(engine, accounts, &index, timestamp, global_reward_index)
}
