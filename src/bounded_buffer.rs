// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Fixed-capacity blocking ring queue for producer/consumer hand-off.
// - `empty_slots` starts at capacity and gates producers.
// - `full_slots` starts at zero and gates consumers.
// - The index mutex covers only head/tail arithmetic and the slot access;
//   semaphore waits always happen outside it.

use std::fmt;

use tracing::debug;

use crate::error::{Result, SyncError};
use crate::{Mutex, Semaphore};

struct Ring<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    // Pushes minus pops. Never consulted for indexing, so a push onto an
    // occupied slot shows up here as a count above capacity.
    held: usize,
}

impl<T> Ring<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            tail: 0,
            held: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupancy derived from the indices. `head == tail` is either empty or
    /// full; the slot at `head` tells which. That holds only while every
    /// `push` is preceded by an `empty_slots` permit and every `pop` by a
    /// `full_slots` permit, with both running under the index mutex: a push
    /// without a free slot leaves the indices looking exactly full.
    fn len(&self) -> usize {
        let cap = self.capacity();
        let diff = (self.tail + cap - self.head) % cap;
        if diff == 0 && self.slots[self.head].is_some() {
            cap
        } else {
            diff
        }
    }

    fn push(&mut self, item: T) {
        self.slots[self.tail] = Some(item);
        self.tail = (self.tail + 1) % self.capacity();
        self.held += 1;
    }

    fn pop(&mut self) -> Option<T> {
        let item = self.slots[self.head].take()?;
        self.head = (self.head + 1) % self.capacity();
        self.held -= 1;
        Some(item)
    }
}

/// A bounded, blocking FIFO queue.
///
/// [`put`](Self::put) blocks while the buffer is full and
/// [`take`](Self::take) blocks while it is empty. Any number of producers
/// and consumers may use it concurrently; each item is delivered to exactly
/// one consumer, in insertion order. Which of several blocked threads is
/// woken first is unspecified.
///
/// Items are moved in and moved out: the producer gives up ownership on
/// `put` and the consumer receives full ownership from `take`.
pub struct BoundedBuffer<T> {
    ring: Mutex<Ring<T>>,
    empty_slots: Semaphore,
    full_slots: Semaphore,
    capacity: usize,
}

impl<T> BoundedBuffer<T> {
    /// Create an empty buffer holding at most `capacity` items.
    ///
    /// # Errors
    /// `InvalidCapacity` if `capacity` is zero; `ResourceExhausted` if the
    /// internal mutex or semaphores cannot be created.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SyncError::InvalidCapacity(capacity));
        }
        let buffer = Self {
            ring: Mutex::new(Ring::with_capacity(capacity))?,
            empty_slots: Semaphore::new(capacity)?,
            full_slots: Semaphore::new(0)?,
            capacity,
        };
        debug!(capacity, "bounded buffer initialised");
        Ok(buffer)
    }

    /// Insert `item` at the tail, blocking while the buffer is full.
    pub fn put(&self, item: T) {
        self.empty_slots.wait();
        self.ring.lock().push(item);
        self.full_slots.post(1);
    }

    /// Remove the oldest item, blocking while the buffer is empty.
    pub fn take(&self) -> T {
        self.full_slots.wait();
        let item = self.ring.lock().pop();
        self.empty_slots.post(1);
        match item {
            Some(item) => item,
            // A full_slots permit is only ever posted after a push.
            None => unreachable!("full_slots permit without a queued item"),
        }
    }

    /// Insert `item` if a slot is free right now; otherwise hand it back.
    pub fn try_put(&self, item: T) -> std::result::Result<(), T> {
        if !self.empty_slots.try_wait() {
            return Err(item);
        }
        self.ring.lock().push(item);
        self.full_slots.post(1);
        Ok(())
    }

    /// Remove the oldest item if one is queued right now.
    pub fn try_take(&self) -> Option<T> {
        if !self.full_slots.try_wait() {
            return None;
        }
        let item = self.ring.lock().pop();
        self.empty_slots.post(1);
        debug_assert!(item.is_some(), "full_slots permit without a queued item");
        item
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Items currently stored, computed under the index mutex.
    ///
    /// A producer that has claimed a slot but not yet written it is not
    /// counted; the value is always within `0..=capacity`.
    pub fn len(&self) -> usize {
        self.ring.lock().len()
    }

    /// Items inserted and not yet removed, counted independently of the
    /// ring indices.
    ///
    /// Equals [`len`](Self::len) whenever the semaphores are doing their job;
    /// a value above [`capacity`](Self::capacity) means a producer wrote over
    /// an item that was never taken.
    pub fn occupied(&self) -> usize {
        self.ring.lock().held
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    /// Tear the buffer down, returning the items still queued, oldest first.
    ///
    /// Taking `self` by value means no thread can still be blocked in `put`
    /// or `take`.
    pub fn destroy(self) -> Vec<T> {
        let mut ring = self.ring.into_inner();
        let mut remaining = Vec::with_capacity(ring.len());
        while let Some(item) = ring.pop() {
            remaining.push(item);
        }
        debug!(
            capacity = self.capacity,
            drained = remaining.len(),
            "bounded buffer destroyed"
        );
        remaining
    }
}

impl<T> fmt::Debug for BoundedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedBuffer")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_len_tracks_wraparound() {
        let mut r = Ring::with_capacity(3);
        r.push(1);
        r.push(2);
        assert_eq!(r.pop(), Some(1));
        r.push(3);
        r.push(4);
        assert_eq!(r.len(), 3);
        assert_eq!(r.held, 3);
        assert_eq!(r.pop(), Some(2));
        assert_eq!(r.len(), 2);
        assert_eq!(r.held, 2);
    }

    #[test]
    fn overrun_is_visible_in_held_count() {
        // A third push with no free slot, as an unguarded producer would do.
        let mut r = Ring::with_capacity(2);
        r.push(1);
        r.push(2);
        r.push(3);
        assert_eq!(r.len(), r.capacity(), "indices cannot see the overrun");
        assert!(r.held > r.capacity());
    }

    #[test]
    fn occupied_matches_len_through_put_and_take() {
        let buf = BoundedBuffer::new(2).unwrap();
        assert_eq!(buf.occupied(), 0);
        buf.put('a');
        buf.put('b');
        assert_eq!(buf.occupied(), 2);
        assert_eq!(buf.occupied(), buf.len());
        assert_eq!(buf.take(), 'a');
        assert_eq!(buf.occupied(), 1);
        assert_eq!(buf.try_take(), Some('b'));
        assert_eq!(buf.occupied(), 0);
    }
}
