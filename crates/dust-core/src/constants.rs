//! Schedule constants. All durations in seconds, all amounts in the token's
//! smallest unit (18 decimals).

/// One token in base units.
pub const TOKEN: u128 = 1_000_000_000_000_000_000;

/// Fixed-point denominator of the global community reward index.
pub const REWARD_INDEX_PRECISION: u128 = 1_000_000_000_000_000_000;

pub const ONE_DAY: u64 = 86_400;
pub const ONE_YEAR: u64 = 365 * ONE_DAY;

/// Fixed projection month. Not a calendar month.
pub const ONE_MONTH: u64 = 30 * ONE_DAY;

/// Base allocation vests over two years from the account's start time.
pub const BASE_VESTING_DURATION: u64 = 2 * ONE_YEAR;

pub const COMMUNITY_POOL_VESTING_DURATION: u64 = ONE_YEAR;
pub const POWPUNKS_VESTING_DURATION: u64 = ONE_YEAR;

/// 2025-04-01T00:00:00Z. Global projections start on a day boundary
/// counted from here.
pub const PROJECTION_ANCHOR: u64 = 1_743_465_600;

/// Number of month boundaries in one projection run.
pub const PROJECTION_MONTHS: u32 = 24;

/// Upper bound on the months of community accrual assumed for accounts
/// that completed base vesting but never started the community vest.
pub const ASSUMED_ACCRUAL_MONTHS: u32 = 12;

/// Share of the allocation vested at `start_time`, as a divisor (1/4).
pub const INITIAL_VEST_DIVISOR: u128 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_match_calendar_units() {
        assert_eq!(BASE_VESTING_DURATION, 63_072_000);
        assert_eq!(COMMUNITY_POOL_VESTING_DURATION, 31_536_000);
        assert_eq!(POWPUNKS_VESTING_DURATION, 31_536_000);
        assert_eq!(ONE_MONTH, 2_592_000);
    }

    #[test]
    fn anchor_is_day_aligned() {
        assert_eq!(PROJECTION_ANCHOR % ONE_DAY, 0);
    }

    #[test]
    fn assumed_accrual_fits_projection_window() {
        assert!(ASSUMED_ACCRUAL_MONTHS < PROJECTION_MONTHS);
    }
}
