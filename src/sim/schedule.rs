// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Schedule board: attendees read the current schedule version while
// organizers bump it, all through one writer-priority RwCell.

use std::thread;

use tracing::info;

use super::{join_all, spawn_named, Instrumentation, ScheduleConfig, SimConfig, SimError};
use crate::RwCell;

/// Outcome of one schedule-board run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleReport {
    /// Version left on the board; equals the number of updates.
    pub final_version: u64,
    pub reads: usize,
    pub writes: usize,
    /// Critical-section overlaps seen by the instrumentation.
    pub violations: usize,
}

impl ScheduleReport {
    /// Every update landed and the lock never let roles overlap.
    pub fn is_clean(&self) -> bool {
        self.violations == 0 && self.final_version == self.writes as u64
    }
}

/// Run the readers-writers simulation to completion.
pub fn run(config: &SimConfig) -> Result<ScheduleReport, SimError> {
    config.validate()?;
    let cfg = &config.schedule;
    let board = RwCell::new(0u64)?;
    let inst = Instrumentation::new()?;

    info!(
        readers = cfg.readers,
        writers = cfg.writers,
        "schedule board open"
    );

    let (reads, writes) = thread::scope(|s| -> Result<(Vec<usize>, Vec<usize>), SimError> {
        let mut readers = Vec::with_capacity(cfg.readers);
        for id in 0..cfg.readers {
            let (board, inst) = (&board, &inst);
            readers.push(spawn_named(s, format!("attendee-{id}"), move || {
                attendee(id, cfg, board, inst)
            })?);
        }
        let mut writers = Vec::with_capacity(cfg.writers);
        for id in 0..cfg.writers {
            let (board, inst) = (&board, &inst);
            writers.push(spawn_named(s, format!("organizer-{id}"), move || {
                organizer(id, cfg, board, inst)
            })?);
        }
        Ok((join_all(readers)?, join_all(writers)?))
    })?;

    let report = ScheduleReport {
        final_version: board.into_inner(),
        reads: reads.iter().sum(),
        writes: writes.iter().sum(),
        violations: inst.violations(),
    };
    info!(
        version = report.final_version,
        violations = report.violations,
        "schedule (readers-writers) complete"
    );
    Ok(report)
}

fn attendee(id: usize, cfg: &ScheduleConfig, board: &RwCell<u64>, inst: &Instrumentation) -> usize {
    for _ in 0..cfg.reads_per_reader {
        cfg.reader_delay.pause();
        let schedule = board.read();
        inst.enter_reader();
        info!(attendee = id, version = *schedule, "attendee reads schedule");
        cfg.read_hold.pause();
        inst.exit_reader();
        drop(schedule);
    }
    cfg.reads_per_reader
}

fn organizer(id: usize, cfg: &ScheduleConfig, board: &RwCell<u64>, inst: &Instrumentation) -> usize {
    for _ in 0..cfg.writes_per_writer {
        cfg.writer_delay.pause();
        let mut schedule = board.write();
        inst.enter_writer();
        *schedule += 1;
        info!(organizer = id, version = *schedule, "organizer updates schedule");
        cfg.write_hold.pause();
        inst.exit_writer();
        drop(schedule);
    }
    cfg.writes_per_writer
}
