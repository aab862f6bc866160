//! End-to-end tests: a snapshot file on disk is loaded into the memory
//! store and queried through the service, exactly as the CLI does.

use std::io::Write;
use std::sync::Arc;

use dust_core::constants::{ONE_DAY, ONE_YEAR, REWARD_INDEX_PRECISION, TOKEN};
use dust_core::error::ErrorKind;
use dust_core::types::AccountId;
use dust_projection::ProjectionCache;
use dust_service::{MemoryStore, Snapshot, VestingService};
use dust_tests::helpers::*;
use dust_vesting::VestingEngine;

/// Two holders:
/// - owner 1: accounts 1 and 2 starting at T0, account 2 with a checkpoint
///   at day 100 moving to a 200-day duration;
/// - owner 2: account 3, long complete and never started its community
///   sub-vest, plus a PowPunks record from T0.
///
/// The global reward index gives every account 0.1 token per allocated token.
fn fixture() -> Snapshot {
    let a = owner(1);
    let b = owner(2);

    let first = account(1, &a, 1000, T0);
    let mut second = account(2, &a, 1000, T0);
    let checkpoint = add_checkpoint(&mut second, 1, T0 + 100 * ONE_DAY, 200 * ONE_DAY);
    let third = account(3, &b, 500, T0 - 3 * ONE_YEAR);

    Snapshot {
        accounts: vec![first, second, third],
        checkpoints: vec![checkpoint],
        powpunks: vec![powpunks(&b, 120, T0)],
        reward_index: REWARD_INDEX_PRECISION / 10,
    }
}

fn service_from_file() -> (VestingService<MemoryStore>, tempfile::NamedTempFile) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(snapshot_json(&fixture()).as_bytes()).unwrap();
    let store = MemoryStore::from_json_file(file.path()).unwrap();
    let service = VestingService::new(
        Arc::new(store),
        VestingEngine::default(),
        Arc::new(ProjectionCache::new()),
    );
    (service, file)
}

#[tokio::test]
async fn account_vesting_follows_schedule() {
    let (svc, _file) = service_from_file();

    let at_start = svc.account_vesting(AccountId(1), T0).await.unwrap();
    assert_eq!(at_start.vested, 250 * TOKEN);
    assert!(!at_start.is_vesting_complete);

    let one_year = svc.account_vesting(AccountId(1), T0 + ONE_YEAR).await.unwrap();
    assert_eq!(one_year.vested, 625 * TOKEN);

    let done = svc.account_vesting(AccountId(1), T0 + 2 * ONE_YEAR).await.unwrap();
    assert_eq!(done.vested, 1000 * TOKEN);
    assert!(done.is_vesting_complete);
    assert_eq!(done.total_community_rewards, 100 * TOKEN);
    // Sub-vest never started.
    assert_eq!(done.community_rewards_claimable, 0);
}

#[tokio::test]
async fn checkpoint_accelerates_completion() {
    let (svc, _file) = service_from_file();
    let cp = T0 + 100 * ONE_DAY;

    let plain = svc.account_vesting(AccountId(1), cp).await.unwrap();
    let with_cp = svc.account_vesting(AccountId(2), cp).await.unwrap();
    // The checkpoint changes the rate, not the amount already vested.
    assert_eq!(plain.vested, with_cp.vested);

    let later = svc.account_vesting(AccountId(2), cp + 200 * ONE_DAY).await.unwrap();
    assert!(later.is_vesting_complete);
    let plain_later = svc.account_vesting(AccountId(1), cp + 200 * ONE_DAY).await.unwrap();
    assert!(!plain_later.is_vesting_complete);
}

#[tokio::test]
async fn missing_account() {
    let (svc, _file) = service_from_file();
    let err = svc.account_vesting(AccountId(42), T0).await.unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn global_projection_applies_assumption() {
    let (svc, _file) = service_from_file();
    let now = T0 + 10 * ONE_DAY + 5;

    let snapshots = svc.global_projection(now).await.unwrap();
    assert_eq!(snapshots.len(), 24);
    assert_eq!(snapshots[0].timestamp, T0 + 10 * ONE_DAY);

    // Month 0: only account 3 is complete, and the assumption is still 0.
    assert_eq!(snapshots[0].assumed_community_rewards_claimable, 0);
    assert_eq!(snapshots[0].totals.total_vested_unclaimed, 500 * TOKEN);

    // Month 6: half of account 3's 50 token rewards.
    assert_eq!(snapshots[6].assumed_community_rewards_claimable, 25 * TOKEN);

    // From month 12 account 2 is complete as well: 50 + 100 tokens.
    assert_eq!(snapshots[12].assumed_community_rewards_claimable, 150 * TOKEN);
    assert_eq!(snapshots[23].assumed_community_rewards_claimable, 150 * TOKEN);
    assert_eq!(
        snapshots[12].totals.total_vested_unclaimed,
        1500 * TOKEN,
        "accounts 2 and 3 complete and untouched"
    );

    for s in &snapshots {
        let t = &s.totals;
        let expected = t.total_community_rewards_claimable
            + t.total_community_rewards_claimed as i128
            + t.total_released as i128
            + t.total_vested_unclaimed as i128
            + s.powpunks.total_vesting as i128;
        assert_eq!(s.total_vested, expected, "month {}", s.month_index);
    }
}

#[tokio::test]
async fn global_projection_is_cached_per_day() {
    let (svc, _file) = service_from_file();
    let now = T0 + 10 * ONE_DAY + 5;

    let first = svc.global_projection(now).await.unwrap();
    let same_day = svc.global_projection(now + 3_600).await.unwrap();
    assert_eq!(first, same_day);

    let next_day = svc.global_projection(now + ONE_DAY).await.unwrap();
    assert_eq!(next_day[0].timestamp, first[0].timestamp + ONE_DAY);
    let cache = svc.projector().cache();
    assert_eq!(cache.len(), 24);
    assert!(cache.lookup(first[0].timestamp).is_none());
}

#[tokio::test]
async fn owner_projection_reports_completed_accounts() {
    let (svc, _file) = service_from_file();
    let now = T0 + 10 * ONE_DAY;

    let a = svc.owner_projection(&owner(1), now).await.unwrap();
    assert!(a.completed_account_ids.is_empty());
    assert_eq!(a.snapshots[0].timestamp, now);
    assert_eq!(a.snapshots[0].totals.total_allocation, 2000 * TOKEN);
    assert_eq!(a.snapshots[0].powpunks.total_value, 0);

    let b = svc.owner_projection(&owner(2), now).await.unwrap();
    assert_eq!(b.completed_account_ids, vec![AccountId(3)]);
    assert_eq!(b.snapshots[0].powpunks.total_value, 120 * TOKEN);
    assert_eq!(b.snapshots[12].assumed_community_rewards_claimable, 50 * TOKEN);
}

#[tokio::test]
async fn totals_without_assumption() {
    let (svc, _file) = service_from_file();
    let totals = svc.totals_at(T0 + ONE_YEAR).await.unwrap();

    assert_eq!(totals.assumed_community_rewards_claimable, 0);
    assert_eq!(totals.totals.total_allocation, 2500 * TOKEN);
    assert_eq!(totals.totals.total_community_rewards, 250 * TOKEN);
    assert_eq!(totals.powpunks.total_vesting, 120 * TOKEN);
    assert_eq!(totals.powpunks.total_value, 120 * TOKEN);
}
