//! # dust-service: Query surface over the vesting and projection engines.
//!
//! - [`config::ServiceConfig`]: layered file/environment configuration
//! - [`storage::MemoryStore`]: [`VestingStore`](dust_core::traits::VestingStore)
//!   backed by a JSON snapshot
//! - [`service::VestingService`]: account, owner, and global queries

pub mod config;
pub mod service;
pub mod storage;

pub use config::ServiceConfig;
pub use service::VestingService;
pub use storage::{MemoryStore, Snapshot};
