//! Integration and property test suite for the Dust vesting engine.
//!
//! Tests here drive the public crate APIs end to end: snapshot file to
//! store to service to projection. Per-module unit tests live beside the
//! code they cover.

pub mod helpers;
