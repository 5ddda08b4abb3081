// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Writer-priority reader-writer lock.
// - One Mutex protects all counters; nothing is read or written outside it.
// - Readers block on `ok_to_read` while a writer is active or queued.
// - Writers block on `ok_to_write` while a writer or any reader is active.
// - `release_write` hands the lock to the whole cohort of waiting readers at
//   once by counting them active before waking them.

use std::fmt;

use tracing::{debug, trace};

use crate::error::Result;
use crate::{Condition, Mutex};

#[derive(Debug, Default)]
struct RwState {
    readers_active: usize,
    readers_waiting: usize,
    writers_waiting: usize,
    writer_active: bool,
    // Bumped on every reader hand-off; a queued reader leaves its wait loop
    // once the epoch it recorded has passed.
    read_epoch: u64,
}

/// A copy of the lock's counters taken under its internal mutex.
///
/// Diagnostics and tests only. The fields are plain values detached from
/// the lock: changing them changes nothing, and they are stale as soon as
/// [`WriterPriorityRwLock::snapshot`] returns. Never use one to make an
/// admission decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RwLockSnapshot {
    pub readers_active: usize,
    pub readers_waiting: usize,
    pub writers_waiting: usize,
    pub writer_active: bool,
}

impl RwLockSnapshot {
    /// No holder and no waiter.
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// A reader-writer lock that favours writers.
///
/// Any number of readers may hold the lock together, or exactly one writer.
/// A reader arriving while a writer holds the lock *or is waiting for it*
/// queues behind that writer, even if other readers are currently inside.
/// When the last writer in a burst releases, every reader queued at that
/// instant is admitted together.
///
/// The lock guards nothing by itself; see [`RwCell`](crate::RwCell) for a
/// typed wrapper. Every `acquire_*` must be paired with exactly one matching
/// `release_*` (or use the RAII [`read`](Self::read)/[`write`](Self::write)
/// guards). Unmatched releases and re-entrant acquisition are undefined by
/// contract; debug builds assert on the cases that are detectable.
pub struct WriterPriorityRwLock {
    state: Mutex<RwState>,
    ok_to_read: Condition,
    ok_to_write: Condition,
}

impl WriterPriorityRwLock {
    /// Create an idle lock.
    ///
    /// # Errors
    /// `ResourceExhausted` if the internal mutex or condition variables
    /// cannot be initialised.
    pub fn new() -> Result<Self> {
        let lock = Self {
            state: Mutex::new(RwState::default())?,
            ok_to_read: Condition::new()?,
            ok_to_write: Condition::new()?,
        };
        debug!("writer-priority rw lock initialised");
        Ok(lock)
    }

    /// Acquire shared access, blocking while a writer is active or waiting.
    pub fn acquire_read(&self) {
        let mut st = self.state.lock();
        if !st.writer_active && st.writers_waiting == 0 {
            st.readers_active += 1;
            return;
        }

        st.readers_waiting += 1;
        trace!(
            readers_waiting = st.readers_waiting,
            writers_waiting = st.writers_waiting,
            writer_active = st.writer_active,
            "reader queued behind writer"
        );
        let epoch = st.read_epoch;
        self.ok_to_read.wait_while(&mut st, |s| s.read_epoch == epoch);
        // release_write already moved us into readers_active.
        debug_assert!(!st.writer_active && st.readers_active > 0);
    }

    /// Release shared access. The last reader out wakes one waiting writer.
    pub fn release_read(&self) {
        let mut st = self.state.lock();
        debug_assert!(
            st.readers_active > 0,
            "release_read without a matching acquire_read"
        );
        st.readers_active -= 1;
        if st.readers_active == 0 && st.writers_waiting > 0 {
            trace!(
                writers_waiting = st.writers_waiting,
                "last reader out, waking a writer"
            );
            self.ok_to_write.notify();
        }
    }

    /// Acquire exclusive access.
    ///
    /// Registers as waiting immediately, which holds back every reader that
    /// arrives afterwards, then blocks until no reader and no writer is
    /// inside.
    pub fn acquire_write(&self) {
        let mut st = self.state.lock();
        st.writers_waiting += 1;
        if st.writer_active || st.readers_active > 0 {
            trace!(
                readers_active = st.readers_active,
                writer_active = st.writer_active,
                writers_waiting = st.writers_waiting,
                "writer waiting"
            );
        }
        self.ok_to_write
            .wait_while(&mut st, |s| s.writer_active || s.readers_active > 0);
        st.writers_waiting -= 1;
        st.writer_active = true;
    }

    /// Release exclusive access.
    ///
    /// A waiting writer takes priority; otherwise all queued readers are
    /// admitted as one batch.
    pub fn release_write(&self) {
        let mut st = self.state.lock();
        debug_assert!(
            st.writer_active,
            "release_write without a matching acquire_write"
        );
        st.writer_active = false;

        if st.writers_waiting > 0 {
            self.ok_to_write.notify();
        } else if st.readers_waiting > 0 {
            let batch = st.readers_waiting;
            st.readers_active += batch;
            st.readers_waiting = 0;
            st.read_epoch = st.read_epoch.wrapping_add(1);
            trace!(batch, "handing lock to queued readers");
            self.ok_to_read.broadcast();
        }
    }

    /// Acquire shared access for the lifetime of the returned guard.
    pub fn read(&self) -> RwReadGuard<'_> {
        self.acquire_read();
        RwReadGuard { lock: self }
    }

    /// Acquire exclusive access for the lifetime of the returned guard.
    pub fn write(&self) -> RwWriteGuard<'_> {
        self.acquire_write();
        RwWriteGuard { lock: self }
    }

    /// Copy the current counters.
    pub fn snapshot(&self) -> RwLockSnapshot {
        let st = self.state.lock();
        RwLockSnapshot {
            readers_active: st.readers_active,
            readers_waiting: st.readers_waiting,
            writers_waiting: st.writers_waiting,
            writer_active: st.writer_active,
        }
    }

    /// Tear the lock down.
    ///
    /// Taking `self` by value means no other thread can still hold or await
    /// it. Debug builds additionally assert that no access was leaked.
    pub fn destroy(self) {
        debug_assert!(
            self.snapshot().is_idle(),
            "rw lock destroyed while held: {:?}",
            self.snapshot()
        );
        debug!("writer-priority rw lock destroyed");
    }
}

impl fmt::Debug for WriterPriorityRwLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterPriorityRwLock")
            .field("state", &self.snapshot())
            .finish()
    }
}

/// Shared access to a [`WriterPriorityRwLock`]; released on drop.
#[must_use = "the read lock is released as soon as the guard is dropped"]
pub struct RwReadGuard<'a> {
    lock: &'a WriterPriorityRwLock,
}

impl Drop for RwReadGuard<'_> {
    fn drop(&mut self) {
        self.lock.release_read();
    }
}

/// Exclusive access to a [`WriterPriorityRwLock`]; released on drop.
#[must_use = "the write lock is released as soon as the guard is dropped"]
pub struct RwWriteGuard<'a> {
    lock: &'a WriterPriorityRwLock,
}

impl Drop for RwWriteGuard<'_> {
    fn drop(&mut self) {
        self.lock.release_write();
    }
}
