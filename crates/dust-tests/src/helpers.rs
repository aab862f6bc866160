//! Shared builders for integration tests.

use dust_core::constants::TOKEN;
use dust_core::types::{Account, AccountId, Checkpoint, Owner, PowPunksRecord};
use dust_service::Snapshot;

/// Start of every schedule built here: 2025-04-01T00:00:00Z.
pub const T0: u64 = 1_743_465_600;

/// Deterministic owner address from a seed.
pub fn owner(seed: u8) -> Owner {
    Owner::new(format!("0x{:040x}", seed))
}

/// Account with no checkpoints and no community activity.
pub fn account(id: u64, holder: &Owner, tokens: u128, start_time: u64) -> Account {
    Account {
        id: AccountId(id),
        owner: holder.clone(),
        total_allocation: tokens * TOKEN,
        start_time,
        released: 0,
        reward_index: 0,
        community_rewards_claimed: 0,
        vesting_start_time: 0,
        checkpoint_count: 0,
    }
}

/// Append a checkpoint to `account`, bumping its declared count.
pub fn add_checkpoint(
    account: &mut Account,
    checkpoint_id: u64,
    timestamp: u64,
    vesting_duration: u64,
) -> Checkpoint {
    account.checkpoint_count += 1;
    Checkpoint {
        checkpoint_id,
        account_id: account.id,
        owner: account.owner.clone(),
        timestamp,
        vesting_duration,
    }
}

pub fn powpunks(holder: &Owner, tokens: u128, timestamp: u64) -> PowPunksRecord {
    PowPunksRecord {
        owner: holder.clone(),
        gg_amount: tokens * TOKEN,
        timestamp,
    }
}

/// Serialize `snapshot` the way the indexer export writes it.
pub fn snapshot_json(snapshot: &Snapshot) -> String {
    serde_json::to_string_pretty(snapshot).unwrap_or_default()
}
