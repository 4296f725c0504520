//! Trial parameters, the timed hot loop, and per-size aggregation.

use std::hint::black_box;
use std::time::Instant;

use rand::{Rng, rngs::SmallRng};

use crate::config::SweepConfig;
use crate::schedule::ScheduleEntry;
use crate::working_set::Cell;

/// Per-trial access-pattern parameters, drawn fresh for every timed pass so
/// neither the compiler nor the prefetcher can rely on the pattern repeating
/// across trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialParams {
    /// Step between successive indices, in cells.
    pub stride: usize,
    /// Multiplier applied to each visited cell.
    pub mult: Cell,
}

impl TrialParams {
    pub fn draw(rng: &mut SmallRng, config: &SweepConfig) -> Self {
        TrialParams {
            stride: rng.random_range(config.stride_range.clone()),
            mult: rng.random_range(config.mult_range.clone()),
        }
    }
}

/// Runs exactly `reads` read-modify-write operations confined to the first
/// `index_mask + 1` cells and returns the mean wall-clock nanoseconds per
/// operation.
///
/// The timed region holds nothing but the index arithmetic and the
/// load-multiply-store. The bitwise AND emulates wrap-around modulo; it is
/// only correct because the window length is a power of two.
#[inline(never)]
pub fn timed_reads(cells: &mut [Cell], index_mask: usize, params: &TrialParams, reads: u64) -> f64 {
    let window = &mut cells[..index_mask + 1];
    let stride = params.stride as u64;
    let mult = params.mult;

    let start = Instant::now();
    for k in 0..reads {
        let index = k.wrapping_mul(stride) as usize & index_mask;
        window[index] = window[index].wrapping_mul(mult);
    }
    let elapsed = start.elapsed();

    black_box(window);
    elapsed.as_nanos() as f64 / reads as f64
}

/// Averages `trials_per_size` timed passes over one schedule entry, each with
/// freshly drawn parameters. Reports a single scalar per size; no outlier
/// rejection, no variance, and no monotonicity enforcement across sizes.
pub fn measure_entry(
    cells: &mut [Cell],
    entry: &ScheduleEntry,
    config: &SweepConfig,
    rng: &mut SmallRng,
) -> f64 {
    let mut total_ns = 0.0;
    for trial in 0..config.trials_per_size {
        let params = TrialParams::draw(rng, config);
        let ns = timed_reads(cells, entry.index_mask, &params, config.reads_per_trial);
        log::debug!(
            "{} KiB trial {}/{}: stride {} mult {} -> {ns:.3} ns/read",
            entry.size_kib(),
            trial + 1,
            config.trials_per_size,
            params.stride,
            params.mult,
        );
        total_ns += ns;
    }
    total_ns / f64::from(config.trials_per_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::SizeSchedule;
    use crate::working_set::CELL_BYTES;
    use rand::SeedableRng;

    fn small_config() -> SweepConfig {
        SweepConfig {
            buffer_bytes: 64 * 1024,
            min_exponent: 0,
            max_exponent: 2,
            reads_per_trial: 10_000,
            trials_per_size: 3,
            ..SweepConfig::default()
        }
    }

    #[test]
    fn drawn_parameters_stay_in_range() {
        let config = small_config();
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..256 {
            let params = TrialParams::draw(&mut rng, &config);
            assert!(config.stride_range.contains(&params.stride));
            assert!(config.mult_range.contains(&params.mult));
        }
    }

    #[test]
    fn timed_pass_is_positive_and_finite() {
        let mut cells = vec![5u32; 1024];
        let params = TrialParams { stride: 16, mult: 3 };
        let ns = timed_reads(&mut cells, 255, &params, 10_000);
        assert!(ns.is_finite());
        assert!(ns > 0.0);
    }

    #[test]
    fn hot_loop_never_touches_cells_beyond_the_window() {
        let mut cells = vec![5u32; 1024];
        let params = TrialParams { stride: 7, mult: 3 };
        timed_reads(&mut cells, 127, &params, 5_000);
        assert!(cells[128..].iter().all(|&c| c == 5));
        assert!(cells[..128].iter().any(|&c| c != 5));
    }

    #[test]
    fn mean_of_trials_is_positive_and_finite() {
        let config = small_config();
        let mut rng = SmallRng::seed_from_u64(9);
        let schedule = SizeSchedule::build(&config).unwrap();
        let mut cells = vec![1u32; config.buffer_bytes / CELL_BYTES];
        for entry in schedule.entries() {
            let ns = measure_entry(&mut cells, entry, &config, &mut rng);
            assert!(ns.is_finite() && ns > 0.0);
        }
    }
}
