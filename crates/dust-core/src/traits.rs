//! Trait interfaces for the Dust engine.
//!
//! - [`VestingStore`]: read-only query surface over indexed records
//!   (dust-service implements an in-memory snapshot store)
//! - [`VestingCalculator`]: per-account vesting math (dust-vesting implements)

use async_trait::async_trait;

use crate::error::{StoreError, VestingError};
use crate::types::{Account, AccountId, Checkpoint, Owner, PowPunksRecord};

/// Read-only view of the indexer's storage.
///
/// Every call returns an independent snapshot; the engine never writes.
#[async_trait]
pub trait VestingStore: Send + Sync {
    /// Look up one account. `None` if unknown.
    async fn account(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// All accounts, or only those held by `owner`.
    async fn accounts(&self, owner: Option<&Owner>) -> Result<Vec<Account>, StoreError>;

    /// Checkpoints of one account, ascending by checkpoint id.
    async fn account_checkpoints(&self, id: AccountId) -> Result<Vec<Checkpoint>, StoreError>;

    /// All checkpoints, or only those of `owner`, ascending by checkpoint id.
    async fn checkpoints(&self, owner: Option<&Owner>) -> Result<Vec<Checkpoint>, StoreError>;

    /// Current global community reward index (scaled by 10^18).
    async fn reward_index(&self) -> Result<u128, StoreError>;

    /// All PowPunks records, or only those of `owner`.
    async fn powpunks(&self, owner: Option<&Owner>) -> Result<Vec<PowPunksRecord>, StoreError>;

    /// An account together with its checkpoints. `None` if the account is unknown.
    async fn account_with_checkpoints(
        &self,
        id: AccountId,
    ) -> Result<Option<(Account, Vec<Checkpoint>)>, StoreError> {
        let Some(account) = self.account(id).await? else {
            return Ok(None);
        };
        let checkpoints = self.account_checkpoints(id).await?;
        Ok(Some((account, checkpoints)))
    }
}

/// Pure per-account vesting computation.
///
/// All arithmetic is integer-only and truncating. Implemented by the
/// vesting engine (dust-vesting).
pub trait VestingCalculator: Send + Sync {
    /// The per-account result type.
    type Output;

    /// Vesting state of `account` at `timestamp` given its ordered
    /// checkpoints and the current global reward index.
    fn compute_vesting(
        &self,
        account: &Account,
        checkpoints: &[Checkpoint],
        timestamp: u64,
        global_reward_index: u128,
    ) -> Result<Self::Output, VestingError>;
}
