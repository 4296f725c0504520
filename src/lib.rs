//! Memory-hierarchy latency sweep.
//!
//! One large buffer is allocated up front; for each power-of-two working-set
//! size, a tight read-modify-write loop is confined to a window of that size
//! via a bitmask and timed as a whole. Per-read latency steps upward as the
//! window outgrows each level of the cache hierarchy. Stride and multiplier
//! are redrawn per trial from a shared pseudorandom source so no fixed access
//! pattern survives for the prefetcher to learn across trials.

mod config;
mod error;
mod schedule;
mod trial;
mod working_set;

pub mod plot;
pub mod report;

pub use config::SweepConfig;
pub use error::SweepError;
pub use report::{CsvFile, Plain, Reading, Report, Summary, console_from_env};
pub use schedule::{ScheduleEntry, SizeSchedule};
pub use trial::TrialParams;
pub use working_set::{CELL_BYTES, Cell, WorkingSet};

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Draw range for the one-off filler the buffer is initialized with. The
/// value's identity is irrelevant; cells only need to be readable and
/// writable.
const FILLER_RANGE: std::ops::RangeInclusive<Cell> = 0..=1_000_000;

/// The measurement harness: configuration, precomputed size schedule, and the
/// single pseudorandom source behind every draw of the run.
#[derive(Debug)]
pub struct LatencySweep {
    config: SweepConfig,
    schedule: SizeSchedule,
    rng: SmallRng,
}

impl LatencySweep {
    /// Validates `config`, builds the schedule, and seeds the generator from
    /// system entropy.
    pub fn new(config: SweepConfig) -> Result<Self, SweepError> {
        Self::with_rng(config, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Like [`new`](Self::new) with a caller-supplied generator, so a fixed
    /// seed gives a reproducible stride/multiplier sequence.
    pub fn with_rng(config: SweepConfig, rng: SmallRng) -> Result<Self, SweepError> {
        let schedule = SizeSchedule::build(&config)?;
        Ok(LatencySweep {
            config,
            schedule,
            rng,
        })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn schedule(&self) -> &SizeSchedule {
        &self.schedule
    }

    /// Runs the full sweep, pushing one reading per schedule entry to
    /// `report` in schedule order and finishing the sink afterwards.
    ///
    /// The working set lives exactly as long as this call.
    pub fn run(&mut self, report: &mut dyn Report) -> Result<(), SweepError> {
        let Self {
            config,
            schedule,
            rng,
        } = self;
        let filler = rng.random_range(FILLER_RANGE);
        let mut working_set = WorkingSet::allocate(config.buffer_bytes, filler)?;
        log::info!(
            "sweeping {} sizes, {} x {} reads each, over a {} KiB buffer",
            schedule.len(),
            config.trials_per_size,
            config.reads_per_trial,
            config.buffer_bytes / 1024,
        );
        for entry in schedule.entries() {
            let ns_per_read = trial::measure_entry(working_set.cells_mut(), entry, config, rng);
            report.push(&Reading {
                size_kib: entry.size_kib(),
                ns_per_read,
            })?;
        }
        report.finish()
    }
}
