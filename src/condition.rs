// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Process-private condition variable paired with a Mutex guard.
// Delegates to platform::PlatformCondition.

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::platform::PlatformCondition;
use crate::ScopedAccess;

/// A condition variable.
///
/// Every wait takes the [`ScopedAccess`] guard of the mutex protecting the
/// predicate; the mutex is released while blocked and re-acquired before
/// the wait returns. A given condition must always be used with the same
/// mutex.
pub struct Condition {
    inner: PlatformCondition,
}

impl Condition {
    /// Create a condition variable.
    ///
    /// # Errors
    /// `ResourceExhausted` if `pthread_cond_init` fails.
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: PlatformCondition::new()?,
        })
    }

    /// Block until notified. May wake spuriously.
    pub fn wait<T>(&self, guard: &mut ScopedAccess<'_, T>) {
        self.inner.wait(guard.mutex().platform());
    }

    /// Block while `cond` returns `true`, re-checking after every wakeup.
    pub fn wait_while<T, F>(&self, guard: &mut ScopedAccess<'_, T>, mut cond: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        while cond(&mut **guard) {
            self.wait(guard);
        }
    }

    /// Block until notified or `timeout` elapses.
    /// Returns `false` on timeout, `true` otherwise.
    pub fn wait_timeout<T>(&self, guard: &mut ScopedAccess<'_, T>, timeout: Duration) -> bool {
        self.inner.wait_timeout(guard.mutex().platform(), timeout)
    }

    /// Block while `cond` returns `true`, giving up after `timeout`.
    /// Returns `true` if the predicate cleared, `false` on timeout.
    pub fn wait_timeout_while<T, F>(
        &self,
        guard: &mut ScopedAccess<'_, T>,
        timeout: Duration,
        mut cond: F,
    ) -> bool
    where
        F: FnMut(&mut T) -> bool,
    {
        let deadline = Instant::now().checked_add(timeout);
        while cond(&mut **guard) {
            let remaining = match deadline {
                Some(d) => d.saturating_duration_since(Instant::now()),
                None => timeout,
            };
            if remaining.is_zero() {
                return false;
            }
            if !self.wait_timeout(guard, remaining) {
                return !cond(&mut **guard);
            }
        }
        true
    }

    /// Wake one waiter.
    pub fn notify(&self) {
        self.inner.notify();
    }

    /// Wake all waiters.
    pub fn broadcast(&self) {
        self.inner.broadcast();
    }
}
