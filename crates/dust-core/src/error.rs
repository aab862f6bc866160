//! Error types for the Dust vesting engine.
use thiserror::Error;

use crate::types::AccountId;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("division by zero")] DivisionByZero,
    #[error("arithmetic overflow")] Overflow,
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested record does not exist.
    NotFound,
    /// A computed amount broke its bound; the input data is corrupt.
    IntegrityViolation,
    /// Rejected before any computation started.
    InvalidInput,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VestingError {
    #[error("account not found: {0}")] AccountNotFound(AccountId),
    #[error("account {account}: vested {vested} exceeds allocation {allocation}")] VestedExceedsAllocation { account: AccountId, vested: u128, allocation: u128 },
    #[error("account {account}: community rewards vested {vested} exceed total {total}")] CommunityRewardsExceedTotal { account: AccountId, vested: u128, total: u128 },
    #[error("account {account}: reward index {account_index} is ahead of global index {global_index}")] RewardIndexAhead { account: AccountId, account_index: u128, global_index: u128 },
    #[error("account {account}: declares {declared} checkpoints, got {supplied}")] CheckpointCountMismatch { account: AccountId, declared: u32, supplied: usize },
    #[error("account {account}: checkpoint {index} is not after its predecessor")] CheckpointOutOfOrder { account: AccountId, index: usize },
    #[error("account {account}: checkpoint {index} has zero vesting duration")] ZeroCheckpointDuration { account: AccountId, index: usize },
    #[error("zero duration: {0}")] ZeroDuration(&'static str),
    #[error("account {account}: {source}")] Arithmetic { account: AccountId, source: ArithmeticError },
    #[error("totals: {0}")] TotalsOverflow(ArithmeticError),
}

impl VestingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AccountNotFound(_) => ErrorKind::NotFound,
            Self::VestedExceedsAllocation { .. }
            | Self::CommunityRewardsExceedTotal { .. }
            | Self::RewardIndexAhead { .. }
            | Self::TotalsOverflow(_) => ErrorKind::IntegrityViolation,
            Self::Arithmetic { source, .. } => match source {
                ArithmeticError::DivisionByZero => ErrorKind::InvalidInput,
                ArithmeticError::Overflow => ErrorKind::IntegrityViolation,
            },
            Self::CheckpointCountMismatch { .. }
            | Self::CheckpointOutOfOrder { .. }
            | Self::ZeroCheckpointDuration { .. }
            | Self::ZeroDuration(_) => ErrorKind::InvalidInput,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("io: {0}")] Io(String),
    #[error("malformed snapshot: {0}")] Malformed(String),
    #[error("backend: {0}")] Backend(String),
}

#[derive(Error, Debug)]
pub enum DustError {
    #[error(transparent)] Vesting(#[from] VestingError),
    #[error(transparent)] Store(#[from] StoreError),
    #[error("config: {0}")] Config(String),
}

impl DustError {
    /// Kind of the underlying vesting error, if this is one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Vesting(e) => Some(e.kind()),
            _ => None,
        }
    }
}
