//! Base allocation schedule.
//!
//! A quarter of the allocation vests at `start_time`. The remaining three
//! quarters vest linearly over the base duration until the first checkpoint;
//! each checkpoint then sets the duration used for the next segment. Segment
//! contributions are `remaining * elapsed / duration`, summed and capped at
//! the allocation.

use dust_core::constants::INITIAL_VEST_DIVISOR;
use dust_core::error::ArithmeticError;
use dust_core::fixed::mul_div;
use dust_core::types::Checkpoint;

/// Portion vested unconditionally at `start_time`.
pub fn initial_vest(allocation: u128) -> u128 {
    allocation / INITIAL_VEST_DIVISOR
}

/// Portion subject to the piecewise-linear schedule.
pub fn remaining_vest(allocation: u128) -> u128 {
    allocation - initial_vest(allocation)
}

/// Carried state of the checkpoint walk.
#[derive(Debug, Clone, Copy)]
struct Segment {
    cumulative: u128,
    boundary: u64,
    duration: u64,
}

impl Segment {
    /// Accrue `remaining` from the current boundary up to `to` at the
    /// current duration, then move the boundary.
    fn advance(&mut self, remaining: u128, to: u64) -> Result<(), ArithmeticError> {
        let elapsed = to.saturating_sub(self.boundary);
        let accrued = mul_div(remaining, elapsed as u128, self.duration as u128)?;
        self.cumulative = self
            .cumulative
            .checked_add(accrued)
            .ok_or(ArithmeticError::Overflow)?;
        self.boundary = self.boundary.max(to);
        Ok(())
    }
}

/// Base amount vested at `timestamp`.
///
/// `checkpoints` must already be validated: strictly increasing timestamps
/// and non-zero durations. Checkpoints after `timestamp` have not taken
/// effect and are ignored. Before `start_time` nothing is vested.
pub fn vested_amount(
    allocation: u128,
    start_time: u64,
    checkpoints: &[Checkpoint],
    timestamp: u64,
    base_duration: u64,
) -> Result<u128, ArithmeticError> {
    if base_duration == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    if timestamp < start_time {
        return Ok(0);
    }

    let initial = initial_vest(allocation);
    let remaining = remaining_vest(allocation);

    if checkpoints.is_empty() && timestamp >= start_time.saturating_add(base_duration) {
        return Ok(allocation);
    }

    let mut segment = Segment {
        cumulative: initial,
        boundary: start_time,
        duration: base_duration,
    };

    for checkpoint in checkpoints {
        if checkpoint.timestamp > timestamp {
            break;
        }
        segment.advance(remaining, checkpoint.timestamp)?;
        if segment.cumulative >= allocation {
            return Ok(allocation);
        }
        segment.duration = checkpoint.vesting_duration;
    }

    segment.advance(remaining, timestamp)?;
    Ok(segment.cumulative.min(allocation))
}
