//! In-memory [`VestingStore`] loaded from a JSON snapshot of indexed records.
//!
//! The snapshot is immutable once loaded; every query clones out of it. No
//! persistence, no incremental updates: reload the file to pick up new data.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use dust_core::decimal;
use dust_core::error::StoreError;
use dust_core::traits::VestingStore;
use dust_core::types::{Account, AccountId, Checkpoint, Owner, PowPunksRecord};

/// On-disk snapshot layout.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    pub checkpoints: Vec<Checkpoint>,
    pub powpunks: Vec<PowPunksRecord>,
    #[serde(with = "decimal::unsigned")]
    pub reward_index: u128,
}

pub struct MemoryStore {
    accounts: HashMap<AccountId, Account>,
    /// Account ids in snapshot order, so listings are stable.
    order: Vec<AccountId>,
    /// Ascending by checkpoint id.
    checkpoints: Vec<Checkpoint>,
    powpunks: Vec<PowPunksRecord>,
    reward_index: u128,
}

impl MemoryStore {
    /// Index `snapshot`. Duplicate account ids are rejected.
    pub fn new(snapshot: Snapshot) -> Result<Self, StoreError> {
        let mut accounts = HashMap::with_capacity(snapshot.accounts.len());
        let mut order = Vec::with_capacity(snapshot.accounts.len());
        for account in snapshot.accounts {
            let id = account.id;
            if accounts.insert(id, account).is_some() {
                return Err(StoreError::Malformed(format!("duplicate account id {id}")));
            }
            order.push(id);
        }

        let mut checkpoints = snapshot.checkpoints;
        checkpoints.sort_by_key(|c| c.checkpoint_id);

        Ok(Self {
            accounts,
            order,
            checkpoints,
            powpunks: snapshot.powpunks,
            reward_index: snapshot.reward_index,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let snapshot: Snapshot =
            serde_json::from_str(json).map_err(|e| StoreError::Malformed(e.to_string()))?;
        Self::new(snapshot)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("{}: {e}", path.display())))?;
        let store = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            accounts = store.order.len(),
            checkpoints = store.checkpoints.len(),
            powpunks = store.powpunks.len(),
            "loaded snapshot"
        );
        Ok(store)
    }

    pub fn account_count(&self) -> usize {
        self.order.len()
    }
}

fn owned_by(owner: Option<&Owner>, candidate: &Owner) -> bool {
    owner.is_none_or(|o| o == candidate)
}

#[async_trait]
impl VestingStore for MemoryStore {
    async fn account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(&id).cloned())
    }

    async fn accounts(&self, owner: Option<&Owner>) -> Result<Vec<Account>, StoreError> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.accounts.get(id))
            .filter(|a| owned_by(owner, &a.owner))
            .cloned()
            .collect())
    }

    async fn account_checkpoints(&self, id: AccountId) -> Result<Vec<Checkpoint>, StoreError> {
        Ok(self
            .checkpoints
            .iter()
            .filter(|c| c.account_id == id)
            .cloned()
            .collect())
    }

    async fn checkpoints(&self, owner: Option<&Owner>) -> Result<Vec<Checkpoint>, StoreError> {
        Ok(self
            .checkpoints
            .iter()
            .filter(|c| owned_by(owner, &c.owner))
            .cloned()
            .collect())
    }

    async fn reward_index(&self) -> Result<u128, StoreError> {
        Ok(self.reward_index)
    }

    async fn powpunks(&self, owner: Option<&Owner>) -> Result<Vec<PowPunksRecord>, StoreError> {
        Ok(self
            .powpunks
            .iter()
            .filter(|r| owned_by(owner, &r.owner))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "reward_index": "2000000000000000000",
        "accounts": [
            {"id": 7, "owner": "0xAbC", "total_allocation": "1000", "start_time": 0,
             "released": "0", "reward_index": "1000000000000000000",
             "community_rewards_claimed": "0", "vesting_start_time": 0, "checkpoint_count": 2},
            {"id": 3, "owner": "0xdef", "total_allocation": "500", "start_time": 10,
             "released": "0", "reward_index": "0",
             "community_rewards_claimed": "0", "vesting_start_time": 0, "checkpoint_count": 0}
        ],
        "checkpoints": [
            {"checkpoint_id": 9, "account_id": 7, "owner": "0xabc", "timestamp": 90, "vesting_duration": 10},
            {"checkpoint_id": 4, "account_id": 7, "owner": "0xabc", "timestamp": 40, "vesting_duration": 20}
        ],
        "powpunks": [
            {"owner": "0xdef", "gg_amount": "300", "timestamp": 5}
        ]
    }"#;

    fn store() -> MemoryStore {
        MemoryStore::from_json_str(SNAPSHOT).unwrap()
    }

    #[tokio::test]
    async fn account_lookup() {
        let s = store();
        let a = s.account(AccountId(7)).await.unwrap().unwrap();
        assert_eq!(a.total_allocation, 1000);
        assert_eq!(a.owner.as_str(), "0xabc");
        assert!(s.account(AccountId(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listing_keeps_snapshot_order() {
        let ids: Vec<_> = store().accounts(None).await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![AccountId(7), AccountId(3)]);
    }

    #[tokio::test]
    async fn owner_filters_are_case_insensitive() {
        let s = store();
        let owner = Owner::new("0xABC");
        assert_eq!(s.accounts(Some(&owner)).await.unwrap().len(), 1);
        assert_eq!(s.checkpoints(Some(&owner)).await.unwrap().len(), 2);
        assert!(s.powpunks(Some(&owner)).await.unwrap().is_empty());
        assert_eq!(s.powpunks(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn checkpoints_sorted_by_id() {
        let ids: Vec<u64> = store()
            .account_checkpoints(AccountId(7))
            .await
            .unwrap()
            .iter()
            .map(|c| c.checkpoint_id)
            .collect();
        assert_eq!(ids, vec![4, 9]);
    }

    #[tokio::test]
    async fn account_with_checkpoints_default_method() {
        let (account, checkpoints) = store()
            .account_with_checkpoints(AccountId(7))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.checkpoint_count as usize, checkpoints.len());
    }

    #[tokio::test]
    async fn reward_index_parsed() {
        assert_eq!(store().reward_index().await.unwrap(), 2_000_000_000_000_000_000);
    }

    #[test]
    fn duplicate_account_rejected() {
        let snapshot = Snapshot {
            accounts: vec![
                serde_json::from_str(
                    r#"{"id": 1, "owner": "0xa", "total_allocation": "1", "start_time": 0,
                        "released": "0", "reward_index": "0", "community_rewards_claimed": "0",
                        "vesting_start_time": 0, "checkpoint_count": 0}"#,
                )
                .unwrap();
                2
            ],
            ..Snapshot::default()
        };
        assert!(matches!(MemoryStore::new(snapshot), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn numeric_amounts_rejected() {
        let json = r#"{"reward_index": 5}"#;
        assert!(matches!(MemoryStore::from_json_str(json), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        let s = MemoryStore::from_json_file(file.path()).unwrap();
        assert_eq!(s.account_count(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = MemoryStore::from_json_file(Path::new("/nonexistent/snapshot.json")).err();
        assert!(matches!(err, Some(StoreError::Io(_))));
    }
}
