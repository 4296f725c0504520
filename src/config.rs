use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::error::SweepError;
use crate::working_set::{CELL_BYTES, Cell};

/// Run configuration.
///
/// All tunables are fixed at startup; none are read from the command line or
/// the environment. The defaults sweep 1 KiB through 64 MiB out of a 1 GiB
/// buffer, a billion reads per trial, twenty trials per size.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Total size of the backing buffer in bytes. Every schedule entry is a
    /// window into this one allocation.
    pub buffer_bytes: usize,
    /// Smallest working set, as a power-of-two exponent in KiB (0 = 1 KiB).
    pub min_exponent: u32,
    /// Largest working set, inclusive, same unit.
    pub max_exponent: u32,
    /// Read-modify-write operations per timed pass. Kept large to amortize
    /// timer-call overhead and scheduling noise.
    pub reads_per_trial: u64,
    /// Timed passes averaged per working-set size.
    pub trials_per_size: u32,
    /// Uniform draw range for the per-trial index stride, in cells.
    pub stride_range: RangeInclusive<usize>,
    /// Uniform draw range for the per-trial multiplier.
    pub mult_range: RangeInclusive<Cell>,
    /// Where the size→latency table is written.
    pub results_path: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            buffer_bytes: 1 << 30,
            min_exponent: 0,
            max_exponent: 16,
            reads_per_trial: 1_000_000_000,
            trials_per_size: 20,
            stride_range: 16..=128,
            mult_range: 1..=1_048_576,
            results_path: PathBuf::from("results.csv"),
        }
    }
}

impl SweepConfig {
    /// Byte size of the largest schedule entry, if it fits in 64 bits.
    pub(crate) fn max_byte_size(&self) -> Option<u64> {
        1u64.checked_shl(self.max_exponent)?.checked_mul(1024)
    }

    /// Checks every invariant the measurement loop relies on.
    ///
    /// Runs before any buffer is touched; a violation here is a configuration
    /// error, not a runtime fault, and must never surface as an out-of-range
    /// access later.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.min_exponent > self.max_exponent {
            return Err(SweepError::EmptyExponentRange {
                min: self.min_exponent,
                max: self.max_exponent,
            });
        }
        if self.reads_per_trial == 0 {
            return Err(SweepError::ZeroReads);
        }
        if self.trials_per_size == 0 {
            return Err(SweepError::ZeroTrials);
        }
        if self.stride_range.is_empty() {
            return Err(SweepError::EmptyRange { what: "stride" });
        }
        if self.mult_range.is_empty() {
            return Err(SweepError::EmptyRange { what: "multiplier" });
        }
        if !CELL_BYTES.is_power_of_two() || 1024 % CELL_BYTES != 0 {
            return Err(SweepError::CellWidth { cell_bytes: CELL_BYTES });
        }
        let need = self.max_byte_size().ok_or(SweepError::ExponentOverflow {
            exponent: self.max_exponent,
        })?;
        if need > self.buffer_bytes as u64 {
            return Err(SweepError::BufferTooSmall {
                need,
                have: self.buffer_bytes as u64,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        SweepConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_inverted_exponent_range() {
        let config = SweepConfig {
            min_exponent: 4,
            max_exponent: 2,
            ..SweepConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            SweepError::EmptyExponentRange { min: 4, max: 2 }
        ));
    }

    #[test]
    fn rejects_schedule_larger_than_buffer() {
        let config = SweepConfig {
            buffer_bytes: 1 << 20,
            max_exponent: 11, // 2 MiB
            ..SweepConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            SweepError::BufferTooSmall { .. }
        ));
    }

    #[test]
    fn largest_size_may_fill_the_buffer_exactly() {
        let config = SweepConfig {
            buffer_bytes: 1 << 20,
            max_exponent: 10, // exactly 1 MiB
            ..SweepConfig::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn rejects_zero_reads_and_zero_trials() {
        let config = SweepConfig {
            reads_per_trial: 0,
            ..SweepConfig::default()
        };
        assert!(matches!(config.validate().unwrap_err(), SweepError::ZeroReads));

        let config = SweepConfig {
            trials_per_size: 0,
            ..SweepConfig::default()
        };
        assert!(matches!(config.validate().unwrap_err(), SweepError::ZeroTrials));
    }

    #[test]
    fn rejects_empty_draw_ranges() {
        let config = SweepConfig {
            stride_range: 128..=16,
            ..SweepConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            SweepError::EmptyRange { what: "stride" }
        ));
    }

    #[test]
    fn rejects_exponent_that_overflows() {
        let config = SweepConfig {
            max_exponent: 64,
            ..SweepConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            SweepError::ExponentOverflow { exponent: 64 }
        ));
    }
}
