// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Process-private mutex owning the state it protects.
// Delegates locking to platform::PlatformMutex.

use std::cell::UnsafeCell;
use std::fmt;

use crate::error::Result;
use crate::platform::PlatformMutex;
use crate::ScopedAccess;

/// A mutex around a value of type `T`.
///
/// The value is only reachable through the [`ScopedAccess`] guard returned
/// by [`lock`](Mutex::lock), so every read or write of the protected state
/// happens with the underlying `pthread_mutex_t` held.
pub struct Mutex<T> {
    inner: PlatformMutex,
    data: UnsafeCell<T>,
}

// Safety: access to `data` is serialised by `inner`.
unsafe impl<T: Send> Send for Mutex<T> {}
unsafe impl<T: Send> Sync for Mutex<T> {}

impl<T> Mutex<T> {
    /// Create a mutex protecting `value`.
    ///
    /// # Errors
    /// `ResourceExhausted` if the OS cannot initialise the mutex.
    pub fn new(value: T) -> Result<Self> {
        Ok(Self {
            inner: PlatformMutex::new()?,
            data: UnsafeCell::new(value),
        })
    }

    /// Lock the mutex (blocking). Unlocks when the guard drops.
    ///
    /// Not re-entrant: locking twice from the same thread deadlocks.
    pub fn lock(&self) -> ScopedAccess<'_, T> {
        self.inner.lock();
        ScopedAccess::new(self)
    }

    /// Try to lock the mutex without blocking.
    pub fn try_lock(&self) -> Option<ScopedAccess<'_, T>> {
        if self.inner.try_lock() {
            Some(ScopedAccess::new(self))
        } else {
            None
        }
    }

    /// Mutable access without locking; `&mut self` proves exclusivity.
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }

    /// Consume the mutex and return the protected value.
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }

    pub(crate) fn platform(&self) -> &PlatformMutex {
        &self.inner
    }

    pub(crate) fn data_ptr(&self) -> *mut T {
        self.data.get()
    }
}

impl<T: fmt::Debug> fmt::Debug for Mutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Mutex");
        match self.try_lock() {
            Some(guard) => d.field("data", &&*guard),
            None => d.field("data", &format_args!("<locked>")),
        };
        d.finish_non_exhaustive()
    }
}
