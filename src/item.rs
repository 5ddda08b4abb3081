// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// The unit of work handed from producers to consumers through a
// BoundedBuffer: a food tray with an id, what is on it, and who made it.

use std::fmt;

/// An immutable work item ("tray").
///
/// Deliberately not `Clone`: a tray is moved from its producer into the
/// buffer and from the buffer to exactly one consumer, which disposes of it.
#[derive(PartialEq, Eq, Hash)]
pub struct WorkItem {
    id: u64,
    payload: String,
    origin: u32,
}

impl WorkItem {
    /// Build a tray. `payload` is copied into an owned string.
    pub fn new(id: u64, payload: impl Into<String>, origin: u32) -> Self {
        Self {
            id,
            payload: payload.into(),
            origin,
        }
    }

    /// Unique tray identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// What is on the tray.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Id of the producer that prepared it.
    pub fn origin(&self) -> u32 {
        self.origin
    }

    /// Consume the tray.
    pub fn dispose(self) {}
}

impl fmt::Debug for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkItem")
            .field("id", &self.id)
            .field("payload", &self.payload)
            .field("origin", &self.origin)
            .finish()
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tray #{} ({}, by cook {})", self.id, self.payload, self.origin)
    }
}

/// Build a tray for a producer to hand to [`BoundedBuffer::put`](crate::BoundedBuffer::put).
pub fn make_item(id: u64, payload: &str, origin: u32) -> WorkItem {
    WorkItem::new(id, payload, origin)
}

/// Release a tray once its consumer is done with it.
pub fn dispose_item(item: WorkItem) {
    item.dispose();
}
