// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Simulation parameters. Defaults reproduce the conference program:
// 8 attendees reading the schedule board 5 times each while 2 organizers
// update it 3 times each, and 40 attendees taking one snack each from an
// 8-slot counter filled by 2 cooks.

use std::path::Path;
use std::time::Duration;

use rand::Rng;
use serde::Deserialize;

use super::SimError;

/// A uniformly random pause in `[min_us, max_us)` microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JitterRange {
    pub min_us: u64,
    pub max_us: u64,
}

impl JitterRange {
    /// No pause at all.
    pub const NONE: JitterRange = JitterRange::new(0, 0);

    pub const fn new(min_us: u64, max_us: u64) -> Self {
        Self { min_us, max_us }
    }

    /// Draw a pause length. A degenerate range always yields `min_us`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let us = if self.max_us > self.min_us {
            rng.gen_range(self.min_us..self.max_us)
        } else {
            self.min_us
        };
        Duration::from_micros(us)
    }

    /// Sleep the calling thread for a sampled pause.
    pub fn pause(&self) {
        let d = self.sample(&mut rand::thread_rng());
        if !d.is_zero() {
            std::thread::sleep(d);
        }
    }
}

/// Schedule board (reader-writer) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    pub readers: usize,
    pub reads_per_reader: usize,
    pub writers: usize,
    pub writes_per_writer: usize,
    /// Pause before each read.
    pub reader_delay: JitterRange,
    /// Time spent holding the read lock.
    pub read_hold: JitterRange,
    /// Pause before each update.
    pub writer_delay: JitterRange,
    /// Time spent holding the write lock.
    pub write_hold: JitterRange,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            readers: 8,
            reads_per_reader: 5,
            writers: 2,
            writes_per_writer: 3,
            reader_delay: JitterRange::new(500, 4000),
            read_hold: JitterRange::new(200, 800),
            writer_delay: JitterRange::new(2000, 6000),
            write_hold: JitterRange::new(200, 800),
        }
    }
}

/// Snack line (producer-consumer) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnackConfig {
    pub attendees: usize,
    pub cooks: usize,
    pub buffer_capacity: usize,
    pub snacks_per_attendee: usize,
    /// Cooking time per tray.
    pub cook_delay: JitterRange,
    /// Eating time per tray.
    pub attendee_hold: JitterRange,
}

impl Default for SnackConfig {
    fn default() -> Self {
        Self {
            attendees: 40,
            cooks: 2,
            buffer_capacity: 8,
            snacks_per_attendee: 1,
            cook_delay: JitterRange::new(500, 5000),
            attendee_hold: JitterRange::new(500, 3000),
        }
    }
}

impl SnackConfig {
    /// Trays needed to serve every attendee.
    pub fn total_trays(&self) -> usize {
        self.attendees * self.snacks_per_attendee
    }
}

/// Full simulation configuration, as read from TOML:
///
/// ```toml
/// [schedule]
/// readers = 8
/// reader_delay = { min_us = 500, max_us = 4000 }
///
/// [snacks]
/// buffer_capacity = 8
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub schedule: ScheduleConfig,
    pub snacks: SnackConfig,
}

impl SimConfig {
    /// Load from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| SimError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Strip every pause, for fast deterministic-length runs.
    pub fn without_jitter(mut self) -> Self {
        let s = &mut self.schedule;
        s.reader_delay = JitterRange::NONE;
        s.read_hold = JitterRange::NONE;
        s.writer_delay = JitterRange::NONE;
        s.write_hold = JitterRange::NONE;
        self.snacks.cook_delay = JitterRange::NONE;
        self.snacks.attendee_hold = JitterRange::NONE;
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let sn = &self.snacks;
        if sn.buffer_capacity == 0 {
            return Err(SimError::InvalidConfig(
                "snacks.buffer_capacity must be greater than zero".into(),
            ));
        }
        if sn.cooks == 0 && sn.total_trays() > 0 {
            return Err(SimError::InvalidConfig(
                "snacks.cooks must be non-zero when attendees expect snacks".into(),
            ));
        }

        let ranges = [
            ("schedule.reader_delay", self.schedule.reader_delay),
            ("schedule.read_hold", self.schedule.read_hold),
            ("schedule.writer_delay", self.schedule.writer_delay),
            ("schedule.write_hold", self.schedule.write_hold),
            ("snacks.cook_delay", sn.cook_delay),
            ("snacks.attendee_hold", sn.attendee_hold),
        ];
        for (name, r) in ranges {
            if r.min_us > r.max_us {
                return Err(SimError::InvalidConfig(format!(
                    "{name}: min_us {} exceeds max_us {}",
                    r.min_us, r.max_us
                )));
            }
        }
        Ok(())
    }
}
