// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// In-process synchronization primitives on process-private POSIX threads
// objects: a writer-priority reader-writer lock and a bounded
// producer-consumer buffer, plus the conference simulation that drives them.

mod error;
pub use error::{Result, SyncError};

mod platform;

mod mutex;
pub use mutex::Mutex;

mod scoped_access;
pub use scoped_access::ScopedAccess;

mod condition;
pub use condition::Condition;

mod semaphore;
pub use semaphore::Semaphore;

mod rw_lock;
pub use rw_lock::{RwLockSnapshot, RwReadGuard, RwWriteGuard, WriterPriorityRwLock};

mod rw_cell;
pub use rw_cell::{ReadGuard, RwCell, WriteGuard};

mod bounded_buffer;
pub use bounded_buffer::BoundedBuffer;

pub mod item;
pub use item::{dispose_item, make_item, WorkItem};

pub mod sim;
