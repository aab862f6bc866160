//! PowPunks linear vest: one fixed duration, no checkpoints, no claims.

use serde::{Deserialize, Serialize};

use dust_core::decimal;
use dust_core::error::{ArithmeticError, VestingError};
use dust_core::fixed::linear_fraction;
use dust_core::types::{Owner, PowPunksRecord};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PowPunksTotals {
    /// Vested at the timestamp.
    #[serde(with = "decimal::unsigned")]
    pub total_vesting: u128,
    /// Sum of all `gg_amount`s.
    #[serde(with = "decimal::unsigned")]
    pub total_value: u128,
}

/// Vested part of one record at `timestamp`.
pub fn vested(record: &PowPunksRecord, timestamp: u64, duration: u64) -> Result<u128, ArithmeticError> {
    if timestamp < record.timestamp {
        return Ok(0);
    }
    linear_fraction(record.gg_amount, timestamp - record.timestamp, duration)
}

/// Sum vesting and value across `records`, optionally only those of `owner`.
pub fn aggregate_powpunks(
    records: &[PowPunksRecord],
    timestamp: u64,
    duration: u64,
    owner: Option<&Owner>,
) -> Result<PowPunksTotals, VestingError> {
    if duration == 0 {
        return Err(VestingError::ZeroDuration("powpunks_vesting_duration"));
    }

    let mut totals = PowPunksTotals::default();
    for record in records {
        if owner.is_some_and(|o| &record.owner != o) {
            continue;
        }
        let amount = vested(record, timestamp, duration).map_err(VestingError::TotalsOverflow)?;
        totals.total_vesting = totals
            .total_vesting
            .checked_add(amount)
            .ok_or(VestingError::TotalsOverflow(ArithmeticError::Overflow))?;
        totals.total_value = totals
            .total_value
            .checked_add(record.gg_amount)
            .ok_or(VestingError::TotalsOverflow(ArithmeticError::Overflow))?;
    }
    Ok(totals)
}
