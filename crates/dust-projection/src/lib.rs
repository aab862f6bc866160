//! # dust-projection: Forward-looking monthly vesting projection.
//!
//! Evaluates the vesting engine at successive fixed-length month boundaries
//! and merges base vesting, community rewards, and PowPunks into a single
//! reported total per month.
//!
//! - [`calendar`]: projection start alignment and month boundaries
//! - [`assumption`]: community accrual assumed for completed, unstarted accounts
//! - [`cache`]: per-timestamp memo holding at most one run generation
//! - [`engine::Projector`]: drives the aggregators across a window

pub mod assumption;
pub mod cache;
pub mod calendar;
pub mod engine;

pub use cache::ProjectionCache;
pub use engine::{MonthlySnapshot, OwnerProjection, ProjectionInput, Projector};
