//! Error type for the sweep.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that abort a run.
///
/// Plotter failures are deliberately absent: the result file is already
/// durable by the time the plotter starts, so those are only logged.
#[derive(Debug, Error)]
pub enum SweepError {
    /// The exponent range selects no sizes at all.
    #[error("exponent range is empty: min {min} > max {max}")]
    EmptyExponentRange { min: u32, max: u32 },

    /// A timed pass must execute at least one read.
    #[error("reads per trial must be at least 1")]
    ZeroReads,

    /// Every size needs at least one trial to average.
    #[error("trials per size must be at least 1")]
    ZeroTrials,

    /// A stride or multiplier range with nothing to draw from.
    #[error("{what} range is empty")]
    EmptyRange { what: &'static str },

    /// The cell width must divide 1 KiB exactly, otherwise the power-of-two
    /// window sizes stop mapping to power-of-two cell counts and the index
    /// mask no longer emulates modulo.
    #[error("cell width of {cell_bytes} bytes does not divide 1 KiB evenly")]
    CellWidth { cell_bytes: usize },

    /// `2^exponent` KiB does not fit in 64 bits.
    #[error("size exponent {exponent} overflows the addressable range")]
    ExponentOverflow { exponent: u32 },

    /// The largest scheduled working set would index past the buffer.
    #[error("largest working set needs {need} bytes but the buffer holds {have}")]
    BufferTooSmall { need: u64, have: u64 },

    /// The working-set buffer could not be allocated. Nothing is measured.
    #[error("working set allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// The result sink rejected a row.
    #[error("result sink: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}
