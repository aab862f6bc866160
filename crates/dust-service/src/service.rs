//! Query operations over a [`VestingStore`].
//!
//! Store reads for one operation are independent and issued concurrently;
//! the computation that follows is synchronous and never touches the store.

use std::sync::Arc;

use tracing::{debug, info};

use dust_core::error::{DustError, VestingError};
use dust_core::traits::{VestingCalculator, VestingStore};
use dust_core::types::{Account, AccountId, Owner, PowPunksRecord};
use dust_projection::calendar::day_aligned_start;
use dust_projection::{MonthlySnapshot, OwnerProjection, ProjectionCache, ProjectionInput, Projector};
use dust_vesting::{CheckpointIndex, VestingEngine, VestingResult};

/// Records loaded for one computation.
struct Loaded {
    accounts: Vec<Account>,
    checkpoints: CheckpointIndex,
    powpunks: Vec<PowPunksRecord>,
    reward_index: u128,
}

impl Loaded {
    fn input<'a>(&'a self, owner: Option<&'a Owner>) -> ProjectionInput<'a> {
        ProjectionInput {
            accounts: &self.accounts,
            checkpoints: &self.checkpoints,
            powpunks: &self.powpunks,
            reward_index: self.reward_index,
            owner,
        }
    }
}

pub struct VestingService<S> {
    store: Arc<S>,
    projector: Projector,
}

impl<S: VestingStore> VestingService<S> {
    pub fn new(store: Arc<S>, engine: VestingEngine, cache: Arc<ProjectionCache>) -> Self {
        Self {
            store,
            projector: Projector::new(engine, cache),
        }
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Vesting detail of one account at `now`.
    pub async fn account_vesting(&self, id: AccountId, now: u64) -> Result<VestingResult, DustError> {
        let (found, reward_index) =
            tokio::join!(self.store.account_with_checkpoints(id), self.store.reward_index());
        let (account, checkpoints) = found?.ok_or(VestingError::AccountNotFound(id))?;
        let result = self
            .projector
            .engine()
            .compute_vesting(&account, &checkpoints, now, reward_index?)?;
        debug!(account = %id, vested = %result.vested, complete = result.is_vesting_complete, "account vesting");
        Ok(result)
    }

    /// Projection of `owner`'s holdings starting exactly at `now`.
    pub async fn owner_projection(&self, owner: &Owner, now: u64) -> Result<OwnerProjection, DustError> {
        let loaded = self.load(Some(owner)).await?;
        Ok(self.projector.project_owner(&loaded.input(Some(owner)), now)?)
    }

    /// Projection of every holding, starting at the day boundary at or
    /// before `now`. Storage is read only when the window is not cached.
    pub async fn global_projection(&self, now: u64) -> Result<Vec<MonthlySnapshot>, DustError> {
        let params = self.projector.engine().params();
        let reference = day_aligned_start(now, params.projection_anchor, params.day_duration);
        if let Some(cached) = self.projector.cached_global(reference) {
            debug!(reference, "global projection served from cache");
            return Ok(cached);
        }

        let loaded = self.load(None).await?;
        Ok(self.projector.project_global(&loaded.input(None), reference)?)
    }

    /// Totals across every holding at `timestamp`, with no assumed accrual.
    pub async fn totals_at(&self, timestamp: u64) -> Result<MonthlySnapshot, DustError> {
        let loaded = self.load(None).await?;
        Ok(self.projector.totals_at(&loaded.input(None), timestamp)?)
    }

    async fn load(&self, owner: Option<&Owner>) -> Result<Loaded, DustError> {
        let (accounts, checkpoints, powpunks, reward_index) = tokio::join!(
            self.store.accounts(owner),
            self.store.checkpoints(owner),
            self.store.powpunks(owner),
            self.store.reward_index(),
        );
        let loaded = Loaded {
            accounts: accounts?,
            checkpoints: CheckpointIndex::build(checkpoints?, owner),
            powpunks: powpunks?,
            reward_index: reward_index?,
        };
        info!(
            owner = owner.map(Owner::as_str).unwrap_or("*"),
            accounts = loaded.accounts.len(),
            with_checkpoints = loaded.checkpoints.len(),
            powpunks = loaded.powpunks.len(),
            "loaded vesting records"
        );
        Ok(loaded)
    }
}
