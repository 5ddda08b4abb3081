// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// POSIX implementation of the process-private mutex and condition variable.
// Each object is boxed so the pthread structure never moves after
// pthread_*_init; moving an initialised pthread object is undefined.

use std::cell::UnsafeCell;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::{Result, SyncError};

// Error-checking mutexes in debug builds turn a foreign unlock or a
// self-deadlock into an error code that the debug assertions below catch.
#[cfg(debug_assertions)]
const MUTEX_KIND: libc::c_int = libc::PTHREAD_MUTEX_ERRORCHECK;
#[cfg(not(debug_assertions))]
const MUTEX_KIND: libc::c_int = libc::PTHREAD_MUTEX_NORMAL;

// ---------------------------------------------------------------------------
// PlatformMutex - pthread_mutex_t, PTHREAD_PROCESS_PRIVATE
// ---------------------------------------------------------------------------

pub struct PlatformMutex {
    raw: Box<UnsafeCell<libc::pthread_mutex_t>>,
}

// Safety: pthread mutexes are designed to be shared between threads; the
// boxed storage gives every thread the same stable address.
unsafe impl Send for PlatformMutex {}
unsafe impl Sync for PlatformMutex {}

impl PlatformMutex {
    /// Create and initialise a process-private mutex.
    ///
    /// Returns `ResourceExhausted` when `pthread_mutex_init` fails
    /// (`EAGAIN`, `ENOMEM`).
    pub fn new() -> Result<Self> {
        let raw = Box::new(UnsafeCell::new(libc::PTHREAD_MUTEX_INITIALIZER));
        unsafe {
            let mut attr: libc::pthread_mutexattr_t = std::mem::zeroed();
            let mut eno = libc::pthread_mutexattr_init(&mut attr);
            if eno != 0 {
                return Err(SyncError::from_errno(eno));
            }

            eno = libc::pthread_mutexattr_settype(&mut attr, MUTEX_KIND);
            if eno != 0 {
                libc::pthread_mutexattr_destroy(&mut attr);
                return Err(SyncError::from_errno(eno));
            }

            eno = libc::pthread_mutex_init(raw.get(), &attr);
            libc::pthread_mutexattr_destroy(&mut attr);
            if eno != 0 {
                return Err(SyncError::from_errno(eno));
            }
        }
        Ok(Self { raw })
    }

    /// Lock the mutex (blocking).
    pub fn lock(&self) {
        let eno = unsafe { libc::pthread_mutex_lock(self.raw.get()) };
        debug_assert_eq!(eno, 0, "pthread_mutex_lock failed");
    }

    /// Try to lock the mutex without blocking.
    pub fn try_lock(&self) -> bool {
        let eno = unsafe { libc::pthread_mutex_trylock(self.raw.get()) };
        match eno {
            0 => true,
            libc::EBUSY => false,
            _ => {
                debug_assert!(false, "pthread_mutex_trylock failed: {eno}");
                false
            }
        }
    }

    /// Unlock the mutex. The caller must hold it.
    pub fn unlock(&self) {
        let eno = unsafe { libc::pthread_mutex_unlock(self.raw.get()) };
        debug_assert_eq!(eno, 0, "pthread_mutex_unlock failed");
    }

    /// Raw pointer to the underlying `pthread_mutex_t`.
    /// Used by `PlatformCondition` for `pthread_cond_wait`.
    pub(crate) fn native_ptr(&self) -> *mut libc::pthread_mutex_t {
        self.raw.get()
    }
}

impl Drop for PlatformMutex {
    fn drop(&mut self) {
        // `&mut self` proves no thread holds or waits on the mutex.
        let eno = unsafe { libc::pthread_mutex_destroy(self.raw.get()) };
        debug_assert_eq!(eno, 0, "pthread_mutex_destroy failed");
    }
}

// ---------------------------------------------------------------------------
// PlatformCondition - pthread_cond_t, PTHREAD_PROCESS_PRIVATE
// ---------------------------------------------------------------------------

pub struct PlatformCondition {
    raw: Box<UnsafeCell<libc::pthread_cond_t>>,
}

unsafe impl Send for PlatformCondition {}
unsafe impl Sync for PlatformCondition {}

impl PlatformCondition {
    /// Create and initialise a process-private condition variable.
    pub fn new() -> Result<Self> {
        let raw = Box::new(UnsafeCell::new(libc::PTHREAD_COND_INITIALIZER));
        let eno = unsafe { libc::pthread_cond_init(raw.get(), std::ptr::null()) };
        if eno != 0 {
            return Err(SyncError::from_errno(eno));
        }
        Ok(Self { raw })
    }

    /// Wait on the condition variable. The caller must hold `mtx` locked.
    /// The mutex is atomically released and re-acquired around the wait.
    /// May return spuriously; callers re-check their predicate.
    pub fn wait(&self, mtx: &PlatformMutex) {
        let eno = unsafe { libc::pthread_cond_wait(self.raw.get(), mtx.native_ptr()) };
        debug_assert_eq!(eno, 0, "pthread_cond_wait failed");
    }

    /// Wait with a relative timeout.
    /// Returns `true` if woken (or spuriously returned), `false` on timeout.
    pub fn wait_timeout(&self, mtx: &PlatformMutex, timeout: Duration) -> bool {
        let ts = deadline_timespec(timeout);
        let eno =
            unsafe { libc::pthread_cond_timedwait(self.raw.get(), mtx.native_ptr(), &ts) };
        match eno {
            0 => true,
            libc::ETIMEDOUT => false,
            _ => {
                debug_assert!(false, "pthread_cond_timedwait failed: {eno}");
                true
            }
        }
    }

    /// Wake one waiter.
    pub fn notify(&self) {
        let eno = unsafe { libc::pthread_cond_signal(self.raw.get()) };
        debug_assert_eq!(eno, 0, "pthread_cond_signal failed");
    }

    /// Wake all waiters.
    pub fn broadcast(&self) {
        let eno = unsafe { libc::pthread_cond_broadcast(self.raw.get()) };
        debug_assert_eq!(eno, 0, "pthread_cond_broadcast failed");
    }
}

impl Drop for PlatformCondition {
    fn drop(&mut self) {
        let eno = unsafe { libc::pthread_cond_destroy(self.raw.get()) };
        debug_assert_eq!(eno, 0, "pthread_cond_destroy failed");
    }
}

/// Absolute CLOCK_REALTIME deadline `timeout` from now, saturating on overflow.
fn deadline_timespec(timeout: Duration) -> libc::timespec {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let deadline = now.checked_add(timeout).unwrap_or(Duration::MAX);
    let secs = libc::time_t::try_from(deadline.as_secs()).unwrap_or(libc::time_t::MAX);
    libc::timespec {
        tv_sec: secs,
        tv_nsec: deadline.subsec_nanos() as libc::c_long,
    }
}
