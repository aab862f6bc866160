//! Projection time axis.
//!
//! Months here are a fixed number of seconds, not calendar months.

use chrono::{DateTime, Utc};

/// Current unix time in seconds. Clamped to 0 for pre-epoch clocks.
pub fn now_unix() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Latest day boundary at or before `now`, counted from `anchor`.
///
/// Returns `anchor` itself when `now` precedes it.
pub fn day_aligned_start(now: u64, anchor: u64, day: u64) -> u64 {
    if now <= anchor || day == 0 {
        return anchor;
    }
    let days = (now - anchor) / day;
    anchor + days * day
}

/// `start + i * month` for `i in 0..months`, saturating at `u64::MAX`.
pub fn month_boundaries(start: u64, months: u32, month: u64) -> Vec<u64> {
    (0..months as u64)
        .map(|i| start.saturating_add(i.saturating_mul(month)))
        .collect()
}

/// RFC 3339 rendering for logs. Falls back to the raw number.
pub fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|t| DateTime::<Utc>::from_timestamp(t, 0))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dust_core::constants::{ONE_DAY, ONE_MONTH, PROJECTION_ANCHOR};

    #[test]
    fn aligned_start_before_anchor() {
        assert_eq!(day_aligned_start(0, PROJECTION_ANCHOR, ONE_DAY), PROJECTION_ANCHOR);
        assert_eq!(
            day_aligned_start(PROJECTION_ANCHOR, PROJECTION_ANCHOR, ONE_DAY),
            PROJECTION_ANCHOR
        );
    }

    #[test]
    fn aligned_start_truncates_to_day() {
        let now = PROJECTION_ANCHOR + 10 * ONE_DAY + 3_600;
        assert_eq!(
            day_aligned_start(now, PROJECTION_ANCHOR, ONE_DAY),
            PROJECTION_ANCHOR + 10 * ONE_DAY
        );
        // Same result for every second of the day.
        assert_eq!(
            day_aligned_start(now + ONE_DAY - 3_601, PROJECTION_ANCHOR, ONE_DAY),
            PROJECTION_ANCHOR + 10 * ONE_DAY
        );
    }

    #[test]
    fn boundaries_step_by_month() {
        let b = month_boundaries(1_000, 24, ONE_MONTH);
        assert_eq!(b.len(), 24);
        assert_eq!(b[0], 1_000);
        assert_eq!(b[1], 1_000 + ONE_MONTH);
        assert_eq!(b[23], 1_000 + 23 * ONE_MONTH);
    }

    #[test]
    fn boundaries_saturate() {
        let b = month_boundaries(u64::MAX - 1, 3, 10);
        assert_eq!(b, vec![u64::MAX - 1, u64::MAX, u64::MAX]);
    }

    #[test]
    fn anchor_formats_as_april_first() {
        assert_eq!(format_timestamp(PROJECTION_ANCHOR), "2025-04-01T00:00:00+00:00");
    }

    #[test]
    fn now_is_after_anchor() {
        assert!(now_unix() > PROJECTION_ANCHOR);
    }
}
