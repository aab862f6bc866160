//! # dust-core
//! Foundation types, fixed-point arithmetic, and storage traits for the
//! Dust vesting engine.

pub mod constants;
pub mod decimal;
pub mod error;
pub mod fixed;
pub mod params;
pub mod traits;
pub mod types;
