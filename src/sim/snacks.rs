// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Snack line: cooks put food trays on a bounded counter, attendees take
// them. Cooks make exactly as many trays as attendees will eat so every
// thread finishes and the counter ends empty.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;

use rand::seq::SliceRandom;
use tracing::{info, warn};

use super::{join_all, spawn_named, SimConfig, SimError, SnackConfig};
use crate::{dispose_item, make_item, BoundedBuffer, WorkItem};

pub const FOOD_NAMES: &[&str] = &[
    "Pizza Slice",
    "Sandwich",
    "Salad Bowl",
    "Fruit Plate",
    "Pasta Bowl",
    "Burger",
    "Wrap",
    "Sushi Roll",
];

/// Outcome of one snack-line run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnackReport {
    pub produced: usize,
    pub consumed: usize,
    /// Sum of tray ids put on the counter.
    pub produced_checksum: u64,
    /// Sum of tray ids taken off the counter.
    pub consumed_checksum: u64,
    /// Times a thread saw the counter hold more trays than it has slots.
    pub occupancy_violations: usize,
    /// Trays still on the counter after everyone left.
    pub leftover: usize,
}

impl SnackReport {
    /// Nothing lost, nothing duplicated, capacity never exceeded.
    pub fn is_clean(&self) -> bool {
        self.produced == self.consumed
            && self.produced_checksum == self.consumed_checksum
            && self.occupancy_violations == 0
            && self.leftover == 0
    }
}

struct Counters {
    next_tray: AtomicU64,
    produced_checksum: AtomicU64,
    consumed_checksum: AtomicU64,
    occupancy_violations: AtomicUsize,
}

/// Run the producer-consumer simulation to completion.
pub fn run(config: &SimConfig) -> Result<SnackReport, SimError> {
    config.validate()?;
    let cfg = &config.snacks;
    let counter: BoundedBuffer<WorkItem> = BoundedBuffer::new(cfg.buffer_capacity)?;
    let totals = Counters {
        next_tray: AtomicU64::new(0),
        produced_checksum: AtomicU64::new(0),
        consumed_checksum: AtomicU64::new(0),
        occupancy_violations: AtomicUsize::new(0),
    };

    let trays = cfg.total_trays();
    info!(
        cooks = cfg.cooks,
        attendees = cfg.attendees,
        capacity = cfg.buffer_capacity,
        trays,
        "snack line open"
    );

    let (produced, consumed) = thread::scope(|s| -> Result<(usize, usize), SimError> {
        let mut cooks = Vec::with_capacity(cfg.cooks);
        for id in 0..cfg.cooks {
            let quota = share(trays, cfg.cooks, id);
            let (counter, totals) = (&counter, &totals);
            cooks.push(spawn_named(s, format!("cook-{id}"), move || {
                cook(id as u32, quota, cfg, counter, totals)
            })?);
        }
        let mut attendees = Vec::with_capacity(cfg.attendees);
        for id in 0..cfg.attendees {
            let (counter, totals) = (&counter, &totals);
            attendees.push(spawn_named(s, format!("attendee-{id}"), move || {
                attendee(id, cfg, counter, totals)
            })?);
        }
        let produced = join_all(cooks)?.into_iter().sum();
        let consumed = join_all(attendees)?.into_iter().sum();
        Ok((produced, consumed))
    })?;

    let leftover = counter.destroy();
    let report = SnackReport {
        produced,
        consumed,
        produced_checksum: totals.produced_checksum.load(Ordering::Relaxed),
        consumed_checksum: totals.consumed_checksum.load(Ordering::Relaxed),
        occupancy_violations: totals.occupancy_violations.load(Ordering::Relaxed),
        leftover: leftover.len(),
    };
    if !leftover.is_empty() {
        warn!(leftover = leftover.len(), "trays left on the counter");
    }
    info!(
        produced = report.produced,
        consumed = report.consumed,
        "snacks module complete (all attendees served)"
    );
    Ok(report)
}

/// Items assigned to worker `idx` when `total` is split across `workers`;
/// the first `total % workers` workers take one extra.
fn share(total: usize, workers: usize, idx: usize) -> usize {
    total / workers + usize::from(idx < total % workers)
}

fn check_occupancy(counter: &BoundedBuffer<WorkItem>, totals: &Counters) {
    let occupied = counter.occupied();
    if occupied > counter.capacity() {
        warn!(occupied, capacity = counter.capacity(), "counter over capacity");
        totals.occupancy_violations.fetch_add(1, Ordering::Relaxed);
    }
}

fn cook(
    id: u32,
    quota: usize,
    cfg: &SnackConfig,
    counter: &BoundedBuffer<WorkItem>,
    totals: &Counters,
) -> usize {
    let mut rng = rand::thread_rng();
    for _ in 0..quota {
        cfg.cook_delay.pause();
        let tray_id = totals.next_tray.fetch_add(1, Ordering::Relaxed);
        let food = FOOD_NAMES.choose(&mut rng).copied().unwrap_or("Mystery Tray");
        check_occupancy(counter, totals);
        counter.put(make_item(tray_id, food, id));
        totals.produced_checksum.fetch_add(tray_id, Ordering::Relaxed);
        info!(cook = id, tray = tray_id, food, "kitchen produced tray");
    }
    quota
}

fn attendee(
    id: usize,
    cfg: &SnackConfig,
    counter: &BoundedBuffer<WorkItem>,
    totals: &Counters,
) -> usize {
    for _ in 0..cfg.snacks_per_attendee {
        check_occupancy(counter, totals);
        let tray = counter.take();
        totals.consumed_checksum.fetch_add(tray.id(), Ordering::Relaxed);
        info!(
            attendee = id,
            tray = tray.id(),
            food = tray.payload(),
            cook = tray.origin(),
            "attendee took tray"
        );
        cfg.attendee_hold.pause();
        dispose_item(tray);
    }
    cfg.snacks_per_attendee
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_splits_remainder_across_first_workers() {
        let parts: Vec<_> = (0..3).map(|i| share(10, 3, i)).collect();
        assert_eq!(parts, vec![4, 3, 3]);
        assert_eq!((0..7).map(|i| share(40, 7, i)).sum::<usize>(), 40);
        assert_eq!(share(0, 2, 1), 0);
    }
}
