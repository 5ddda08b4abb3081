// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// RAII guard that holds a Mutex for the lifetime of the access,
// providing read/write access to the protected state.

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use crate::Mutex;

/// RAII guard: the mutex is locked when this is created, unlocked on drop.
///
/// Dereferences to the protected value. The guard must be dropped on the
/// thread that locked it, so it is neither `Send` nor `Sync`.
pub struct ScopedAccess<'a, T> {
    mtx: &'a Mutex<T>,
    _not_send: PhantomData<*const ()>,
}

impl<'a, T> ScopedAccess<'a, T> {
    /// Wrap an already-locked mutex.
    pub(crate) fn new(mtx: &'a Mutex<T>) -> Self {
        Self {
            mtx,
            _not_send: PhantomData,
        }
    }

    /// The mutex this guard holds. Used by `Condition` to wait on it.
    pub(crate) fn mutex(&self) -> &'a Mutex<T> {
        self.mtx
    }
}

impl<T> Deref for ScopedAccess<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Safety: the mutex is held for as long as the guard lives.
        unsafe { &*self.mtx.data_ptr() }
    }
}

impl<T> DerefMut for ScopedAccess<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.mtx.data_ptr() }
    }
}

impl<T> Drop for ScopedAccess<'_, T> {
    fn drop(&mut self) {
        self.mtx.platform().unlock();
    }
}
