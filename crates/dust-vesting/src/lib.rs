//! # dust-vesting: Per-account vesting and portfolio aggregation.
//!
//! All calculations use truncating integer arithmetic for determinism.
//!
//! - **Base schedule**: 25% of the allocation vests at `start_time`, the
//!   remaining 75% linearly. Checkpoints replace the duration applied to the
//!   remaining balance from their timestamp forward.
//! - **Community stream**: reward-index accrual since the account's last
//!   sync, vested linearly from an explicit start event.
//! - **Aggregation**: portfolio totals over many accounts, failing the whole
//!   batch on any per-account error.
//! - **PowPunks**: single-duration linear vest over a separate population.

pub mod aggregate;
pub mod community;
pub mod engine;
pub mod powpunks;
pub mod schedule;

pub use aggregate::{AggregateResult, AggregateTotals, CheckpointIndex};
pub use community::CommunityRewards;
pub use engine::{VestingEngine, VestingResult};
pub use powpunks::PowPunksTotals;
