// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// A value guarded by a WriterPriorityRwLock, reachable only through guards.

use std::cell::UnsafeCell;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::{RwLockSnapshot, WriterPriorityRwLock};

/// A value of type `T` behind a writer-priority reader-writer lock.
///
/// ```no_run
/// use confsync::RwCell;
///
/// let schedule = RwCell::new(0u32).unwrap();
/// *schedule.write() += 1;
/// assert_eq!(*schedule.read(), 1);
/// ```
pub struct RwCell<T> {
    lock: WriterPriorityRwLock,
    value: UnsafeCell<T>,
}

// Safety: readers share `&T` concurrently (needs Sync), a writer gets
// `&mut T` from whichever thread acquired it (needs Send).
unsafe impl<T: Send> Send for RwCell<T> {}
unsafe impl<T: Send + Sync> Sync for RwCell<T> {}

impl<T> RwCell<T> {
    pub fn new(value: T) -> Result<Self> {
        Ok(Self {
            lock: WriterPriorityRwLock::new()?,
            value: UnsafeCell::new(value),
        })
    }

    /// Shared access; blocks while a writer is active or waiting.
    pub fn read(&self) -> ReadGuard<'_, T> {
        self.lock.acquire_read();
        ReadGuard { cell: self }
    }

    /// Exclusive access.
    pub fn write(&self) -> WriteGuard<'_, T> {
        self.lock.acquire_write();
        WriteGuard { cell: self }
    }

    pub fn snapshot(&self) -> RwLockSnapshot {
        self.lock.snapshot()
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.lock.destroy();
        self.value.into_inner()
    }
}

impl<T: fmt::Debug> fmt::Debug for RwCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RwCell")
            .field("lock", &self.lock.snapshot())
            .finish_non_exhaustive()
    }
}

#[must_use = "the read lock is released as soon as the guard is dropped"]
pub struct ReadGuard<'a, T> {
    cell: &'a RwCell<T>,
}

impl<T> Deref for ReadGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Safety: shared access is held, so no writer exists.
        unsafe { &*self.cell.value.get() }
    }
}

impl<T> Drop for ReadGuard<'_, T> {
    fn drop(&mut self) {
        self.cell.lock.release_read();
    }
}

#[must_use = "the write lock is released as soon as the guard is dropped"]
pub struct WriteGuard<'a, T> {
    cell: &'a RwCell<T>,
}

impl<T> Deref for WriteGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Safety: exclusive access is held.
        unsafe { &*self.cell.value.get() }
    }
}

impl<T> DerefMut for WriteGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.cell.value.get() }
    }
}

impl<T> Drop for WriteGuard<'_, T> {
    fn drop(&mut self) {
        self.cell.lock.release_write();
    }
}
