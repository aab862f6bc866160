//! The projector: evaluates aggregate vesting at each month boundary of a
//! projection window and reports one merged total per month.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use dust_core::decimal;
use dust_core::error::{ArithmeticError, VestingError};
use dust_core::fixed::to_signed;
use dust_core::types::{Account, AccountId, Owner, PowPunksRecord};
use dust_vesting::aggregate::aggregate_indexed;
use dust_vesting::powpunks::aggregate_powpunks;
use dust_vesting::{AggregateResult, AggregateTotals, CheckpointIndex, PowPunksTotals, VestingEngine};

use crate::assumption::assumed_claimable;
use crate::cache::ProjectionCache;
use crate::calendar::{format_timestamp, month_boundaries};

/// Totals at one month boundary.
///
/// `total_community_rewards_claimable` already includes
/// `assumed_community_rewards_claimable`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MonthlySnapshot {
    pub month_index: u32,
    pub timestamp: u64,
    #[serde(flatten)]
    pub totals: AggregateTotals,
    #[serde(with = "decimal::unsigned")]
    pub assumed_community_rewards_claimable: u128,
    #[serde(flatten)]
    pub powpunks: PowPunksTotals,
    /// Claimable + claimed + released + vested-unclaimed + PowPunks vesting.
    ///
    /// Signed because the claimable term is. Where claims ran ahead of the
    /// community schedule that term is negative, and this total is smaller
    /// than the sum of the other, unsigned terms. It does not go below zero:
    /// claimable plus claimed is the gross vested community amount.
    #[serde(with = "decimal::signed")]
    pub total_vested: i128,
}

/// Per-owner projection window.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnerProjection {
    pub snapshots: Vec<MonthlySnapshot>,
    /// Accounts whose base vesting is complete at month 0.
    pub completed_account_ids: Vec<AccountId>,
}

/// Loaded data a projection runs over.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionInput<'a> {
    pub accounts: &'a [Account],
    pub checkpoints: &'a CheckpointIndex,
    pub powpunks: &'a [PowPunksRecord],
    pub reward_index: u128,
    /// Restricts PowPunks records; accounts and checkpoints arrive pre-filtered.
    pub owner: Option<&'a Owner>,
}

pub struct Projector {
    engine: VestingEngine,
    cache: Arc<ProjectionCache>,
}

impl Projector {
    pub fn new(engine: VestingEngine, cache: Arc<ProjectionCache>) -> Self {
        Self { engine, cache }
    }

    pub fn engine(&self) -> &VestingEngine {
        &self.engine
    }

    pub fn cache(&self) -> &Arc<ProjectionCache> {
        &self.cache
    }

    /// Month boundaries of the window starting at `reference`.
    pub fn timestamps(&self, reference: u64) -> Vec<u64> {
        let params = self.engine.params();
        month_boundaries(reference, params.projection_months, params.month_duration)
    }

    /// Snapshot for month `month_index` at `timestamp`.
    pub fn snapshot_at(
        &self,
        input: &ProjectionInput<'_>,
        month_index: u32,
        timestamp: u64,
    ) -> Result<MonthlySnapshot, VestingError> {
        self.evaluate(input, month_index, timestamp).map(|(snapshot, _)| snapshot)
    }

    /// Aggregate totals at an arbitrary timestamp, with no assumed accrual.
    pub fn totals_at(&self, input: &ProjectionInput<'_>, timestamp: u64) -> Result<MonthlySnapshot, VestingError> {
        self.snapshot_at(input, 0, timestamp)
    }

    /// Uncached projection over the full window.
    pub fn project(&self, input: &ProjectionInput<'_>, reference: u64) -> Result<Vec<MonthlySnapshot>, VestingError> {
        self.timestamps(reference)
            .into_iter()
            .zip(0u32..)
            .map(|(timestamp, i)| self.snapshot_at(input, i, timestamp))
            .collect()
    }

    /// Projection for one owner, plus the accounts complete at month 0.
    pub fn project_owner(&self, input: &ProjectionInput<'_>, reference: u64) -> Result<OwnerProjection, VestingError> {
        let mut snapshots = Vec::new();
        let mut completed_account_ids = Vec::new();

        for (timestamp, i) in self.timestamps(reference).into_iter().zip(0u32..) {
            let (snapshot, details) = self.evaluate(input, i, timestamp)?;
            if i == 0 {
                completed_account_ids = details.completed_account_ids();
            }
            snapshots.push(snapshot);
        }

        info!(
            owner = input.owner.map(Owner::as_str).unwrap_or("*"),
            start = %format_timestamp(reference),
            accounts = input.accounts.len(),
            completed = completed_account_ids.len(),
            "owner projection"
        );

        Ok(OwnerProjection {
            snapshots,
            completed_account_ids,
        })
    }

    /// The full global window if every month is cached.
    pub fn cached_global(&self, reference: u64) -> Option<Vec<MonthlySnapshot>> {
        self.cache.lookup_window(reference, &self.timestamps(reference))
    }

    /// Global projection backed by the cache.
    ///
    /// Opening the run at index 0 clears entries from any other reference,
    /// including a run whose later month falls on this reference. Months
    /// already cached for this same reference are reused.
    pub fn project_global(
        &self,
        input: &ProjectionInput<'_>,
        reference: u64,
    ) -> Result<Vec<MonthlySnapshot>, VestingError> {
        let ticket = self.cache.begin_run(reference);
        let timestamps = self.timestamps(reference);
        let mut snapshots = Vec::with_capacity(timestamps.len());
        let mut hits = 0usize;

        for (timestamp, i) in timestamps.into_iter().zip(0u32..) {
            if ticket.reused() {
                if let Some(snapshot) = self.cache.lookup_for(&ticket, timestamp) {
                    hits += 1;
                    snapshots.push(snapshot);
                    continue;
                }
            }
            let snapshot = self.snapshot_at(input, i, timestamp)?;
            self.cache.insert(&ticket, timestamp, snapshot.clone());
            snapshots.push(snapshot);
        }

        info!(
            start = %format_timestamp(reference),
            generation = ticket.generation(),
            accounts = input.accounts.len(),
            cached = hits,
            computed = snapshots.len() - hits,
            "global projection"
        );
        Ok(snapshots)
    }

    fn evaluate(
        &self,
        input: &ProjectionInput<'_>,
        month_index: u32,
        timestamp: u64,
    ) -> Result<(MonthlySnapshot, AggregateResult), VestingError> {
        let params = self.engine.params();
        let details = aggregate_indexed(
            &self.engine,
            input.accounts,
            input.checkpoints,
            timestamp,
            input.reward_index,
        )?;
        let powpunks = aggregate_powpunks(
            input.powpunks,
            timestamp,
            params.powpunks_vesting_duration,
            input.owner,
        )?;
        let assumed = assumed_claimable(&details.accounts, month_index, params.assumed_accrual_months)
            .map_err(VestingError::TotalsOverflow)?;

        let mut totals = details.totals;
        totals.total_community_rewards_claimable = to_signed(assumed)
            .and_then(|a| {
                totals
                    .total_community_rewards_claimable
                    .checked_add(a)
                    .ok_or(ArithmeticError::Overflow)
            })
            .map_err(VestingError::TotalsOverflow)?;
        let total_vested = total_vested(&totals, &powpunks).map_err(VestingError::TotalsOverflow)?;

        let snapshot = MonthlySnapshot {
            month_index,
            timestamp,
            totals,
            assumed_community_rewards_claimable: assumed,
            powpunks,
            total_vested,
        };
        Ok((snapshot, details))
    }
}

fn total_vested(totals: &AggregateTotals, powpunks: &PowPunksTotals) -> Result<i128, ArithmeticError> {
    [
        totals.total_community_rewards_claimed,
        totals.total_released,
        totals.total_vested_unclaimed,
        powpunks.total_vesting,
    ]
    .into_iter()
    .try_fold(totals.total_community_rewards_claimable, |acc, v| {
        acc.checked_add(to_signed(v)?).ok_or(ArithmeticError::Overflow)
    })
}
