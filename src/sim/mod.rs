// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Conference simulation driving both primitives under load:
// - `schedule`: attendees read the schedule board while organizers update it.
// - `snacks`: cooks fill a bounded counter with trays that attendees take.
// The harness owns all bookkeeping; nothing here reaches inside a primitive.

use std::io;
use std::path::PathBuf;
use std::thread::{self, Scope, ScopedJoinHandle};

use thiserror::Error;

use crate::{Mutex, SyncError};

mod config;
pub use config::{JitterRange, ScheduleConfig, SimConfig, SnackConfig};

pub mod schedule;
pub use schedule::ScheduleReport;

pub mod snacks;
pub use snacks::SnackReport;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to spawn thread {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("thread {0} panicked")]
    ThreadPanicked(String),
}

/// Spawn a named thread inside `scope`.
pub(crate) fn spawn_named<'scope, 'env, F, T>(
    scope: &'scope Scope<'scope, 'env>,
    name: String,
    f: F,
) -> Result<ScopedJoinHandle<'scope, T>, SimError>
where
    F: FnOnce() -> T + Send + 'scope,
    T: Send + 'scope,
{
    thread::Builder::new()
        .name(name.clone())
        .spawn_scoped(scope, f)
        .map_err(|source| SimError::Spawn { name, source })
}

/// Join every handle, reporting the first thread that panicked.
pub(crate) fn join_all<T>(handles: Vec<ScopedJoinHandle<'_, T>>) -> Result<Vec<T>, SimError> {
    let mut out = Vec::with_capacity(handles.len());
    let mut panicked = None;
    for h in handles {
        let name = h.thread().name().unwrap_or("<unnamed>").to_string();
        match h.join() {
            Ok(v) => out.push(v),
            Err(_) => {
                panicked.get_or_insert(name);
            }
        }
    }
    match panicked {
        Some(name) => Err(SimError::ThreadPanicked(name)),
        None => Ok(out),
    }
}

#[derive(Debug, Default)]
struct CsCounters {
    readers_in_cs: usize,
    writers_in_cs: usize,
    violations: usize,
}

/// Critical-section occupancy tracker for the reader-writer run.
///
/// Kept entirely outside the lock under its own mutex. Each thread calls
/// `enter_*` right after acquiring the lock under test and `exit_*` right
/// before releasing it; any overlap the lock should have prevented is
/// counted as a violation.
pub struct Instrumentation {
    counters: Mutex<CsCounters>,
}

impl Instrumentation {
    pub fn new() -> Result<Self, SyncError> {
        Ok(Self {
            counters: Mutex::new(CsCounters::default())?,
        })
    }

    pub fn enter_reader(&self) {
        let mut c = self.counters.lock();
        c.readers_in_cs += 1;
        if c.writers_in_cs > 0 {
            c.violations += 1;
        }
    }

    pub fn exit_reader(&self) {
        let mut c = self.counters.lock();
        c.readers_in_cs -= 1;
    }

    pub fn enter_writer(&self) {
        let mut c = self.counters.lock();
        c.writers_in_cs += 1;
        if c.writers_in_cs > 1 || c.readers_in_cs > 0 {
            c.violations += 1;
        }
    }

    pub fn exit_writer(&self) {
        let mut c = self.counters.lock();
        c.writers_in_cs -= 1;
    }

    pub fn violations(&self) -> usize {
        self.counters.lock().violations
    }
}
