//! Unclaimed-completion assumption.
//!
//! An account that has finished base vesting but never triggered its
//! community sub-vest is assumed to start that sub-vest at the projection
//! start. At month `i` it contributes `total * min(i, cap) / cap` of its
//! community rewards to that month's claimable figure. This is an
//! approximation: the real start lies somewhere between completion and now.

use dust_core::error::ArithmeticError;
use dust_core::fixed::mul_div;
use dust_vesting::VestingResult;

/// Whether `result` qualifies for the assumption.
pub fn qualifies(result: &VestingResult) -> bool {
    result.is_vesting_complete && result.vesting_start_time == 0
}

/// Assumed claimable for one qualifying account at `month_index`.
pub fn assumed_for(total_community_rewards: u128, month_index: u32, cap_months: u32) -> Result<u128, ArithmeticError> {
    let months = month_index.min(cap_months);
    mul_div(total_community_rewards, months as u128, cap_months as u128)
}

/// Sum of the assumption over every qualifying account.
pub fn assumed_claimable(
    results: &[VestingResult],
    month_index: u32,
    cap_months: u32,
) -> Result<u128, ArithmeticError> {
    results
        .iter()
        .filter(|r| qualifies(r))
        .try_fold(0u128, |acc, r| {
            let assumed = assumed_for(r.total_community_rewards, month_index, cap_months)?;
            acc.checked_add(assumed).ok_or(ArithmeticError::Overflow)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dust_core::types::{AccountId, Owner};
    use proptest::prelude::*;

    fn result(complete: bool, vesting_start_time: u64, total_community_rewards: u128) -> VestingResult {
        VestingResult {
            account_id: AccountId(1),
            owner: Owner::new("0x01"),
            total_allocation: 1000,
            released: 0,
            start_time: 0,
            vested: if complete { 1000 } else { 500 },
            total_community_rewards,
            community_rewards_claimed: 0,
            community_rewards_vested: 0,
            community_rewards_claimable: 0,
            is_vesting_complete: complete,
            vesting_start_time,
            checkpoint_count: 0,
            reward_index: 0,
        }
    }

    #[test]
    fn ramps_over_twelve_months_then_holds() {
        let expected = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120, 120, 120];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(assumed_for(120, i as u32, 12).unwrap(), *want, "month {i}");
        }
        assert_eq!(assumed_for(120, 23, 12).unwrap(), 120);
    }

    #[test]
    fn truncates_per_account() {
        // 100 * 1 / 12 = 8.33 -> 8, per account, then summed.
        let rs = [result(true, 0, 100), result(true, 0, 100)];
        assert_eq!(assumed_claimable(&rs, 1, 12).unwrap(), 16);
    }

    #[test]
    fn only_complete_unstarted_accounts_count() {
        let rs = [
            result(true, 0, 120),
            result(false, 0, 120),
            result(true, 1_000, 120),
        ];
        assert_eq!(assumed_claimable(&rs, 6, 12).unwrap(), 60);
        assert!(qualifies(&rs[0]));
        assert!(!qualifies(&rs[1]));
        assert!(!qualifies(&rs[2]));
    }

    #[test]
    fn month_zero_assumes_nothing() {
        let rs = [result(true, 0, 1_000_000)];
        assert_eq!(assumed_claimable(&rs, 0, 12).unwrap(), 0);
    }

    proptest! {
        #[test]
        fn bounded_by_total_and_non_decreasing(total in 0u128..u128::MAX / 24, month in 0u32..30) {
            let here = assumed_for(total, month, 12).unwrap();
            let next = assumed_for(total, month + 1, 12).unwrap();
            prop_assert!(here <= total);
            prop_assert!(next >= here);
            if month >= 12 {
                prop_assert_eq!(here, total);
            }
        }
    }
}
