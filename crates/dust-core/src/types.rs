//! Snapshot records read from the indexer's store.
//!
//! All monetary values are `u128` in base units and serialize as decimal
//! strings. Timestamps are unix seconds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decimal;

/// Token id of a dust vesting position.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AccountId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Holder address. Stored lowercased so `0xAB..` and `0xab..` compare equal.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(from = "String", into = "String")]
pub struct Owner(String);

impl Owner {
    pub fn new(address: impl AsRef<str>) -> Self {
        Self(address.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Owner {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

impl From<&str> for Owner {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<Owner> for String {
    fn from(owner: Owner) -> Self {
        owner.0
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dust vesting position.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub owner: Owner,
    /// Amount that ultimately vests.
    #[serde(with = "decimal::unsigned")]
    pub total_allocation: u128,
    /// Base schedule start.
    pub start_time: u64,
    /// Base allocation already withdrawn. Never exceeds `total_allocation`.
    #[serde(with = "decimal::unsigned")]
    pub released: u128,
    /// Global reward index at the account's last sync, scaled by 10^18.
    #[serde(with = "decimal::unsigned")]
    pub reward_index: u128,
    #[serde(with = "decimal::unsigned")]
    pub community_rewards_claimed: u128,
    /// Start of the community reward sub-vest, or 0 if not yet triggered.
    pub vesting_start_time: u64,
    /// Number of checkpoints attached to this account.
    pub checkpoint_count: u32,
}

impl Account {
    /// Whether the community sub-vest has been started on chain.
    pub fn community_vest_started(&self) -> bool {
        self.vesting_start_time != 0
    }
}

/// A rate change applied to the remaining unvested balance of one account.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    /// Ascending insertion key; insertion order is chronological order.
    pub checkpoint_id: u64,
    pub account_id: AccountId,
    pub owner: Owner,
    /// When the new duration takes effect.
    pub timestamp: u64,
    /// Seconds over which the remaining balance vests from `timestamp`.
    pub vesting_duration: u64,
}

/// A PowPunks allocation on a single fixed-duration linear vest.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PowPunksRecord {
    pub owner: Owner,
    #[serde(with = "decimal::unsigned")]
    pub gg_amount: u128,
    /// Vest start.
    pub timestamp: u64,
}
