// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Counting semaphore built from a Mutex-protected count and a Condition.
// Portable replacement for unnamed sem_t, which macOS does not implement.

use std::time::Duration;

use crate::error::Result;
use crate::{Condition, Mutex};

/// A counting semaphore.
///
/// `wait` decrements the count, blocking while it is zero; `post` increments
/// it and wakes waiters. Waits re-check the count after every wakeup, so
/// spurious wakeups never let a waiter through on a zero count.
pub struct Semaphore {
    count: Mutex<usize>,
    available: Condition,
}

impl Semaphore {
    /// Create a semaphore holding `initial` permits.
    pub fn new(initial: usize) -> Result<Self> {
        Ok(Self {
            count: Mutex::new(initial)?,
            available: Condition::new()?,
        })
    }

    /// Take one permit, blocking until one is available.
    pub fn wait(&self) {
        let mut count = self.count.lock();
        self.available.wait_while(&mut count, |c| *c == 0);
        *count -= 1;
    }

    /// Take one permit if one is available right now.
    pub fn try_wait(&self) -> bool {
        let mut count = self.count.lock();
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Take one permit, giving up after `timeout`.
    /// Returns `true` if a permit was taken.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut count = self.count.lock();
        if !self
            .available
            .wait_timeout_while(&mut count, timeout, |c| *c == 0)
        {
            return false;
        }
        *count -= 1;
        true
    }

    /// Release `n` permits.
    pub fn post(&self, n: usize) {
        if n == 0 {
            return;
        }
        let mut count = self.count.lock();
        *count += n;
        if n == 1 {
            self.available.notify();
        } else {
            self.available.broadcast();
        }
    }

    /// Current number of permits. Only a hint once the lock is released.
    pub fn value(&self) -> usize {
        *self.count.lock()
    }
}
