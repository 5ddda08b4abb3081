// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Error taxonomy for the synchronization primitives.

use std::io;

use thiserror::Error;

/// Errors surfaced when constructing a primitive.
///
/// Blocking operations never fail; misuse (unmatched release, use after
/// destroy) is a precondition violation and is not reported here.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The OS refused to initialise a mutex or condition variable.
    #[error("synchronization resource exhausted: {0}")]
    ResourceExhausted(#[source] io::Error),

    /// A bounded buffer was requested with zero slots.
    #[error("invalid buffer capacity {0}: must be greater than zero")]
    InvalidCapacity(usize),
}

pub type Result<T> = std::result::Result<T, SyncError>;

impl SyncError {
    pub(crate) fn from_errno(eno: i32) -> Self {
        SyncError::ResourceExhausted(io::Error::from_raw_os_error(eno))
    }
}
