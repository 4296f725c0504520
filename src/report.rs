//! Result sinks.
//!
//! A sweep pushes one reading per schedule entry, in schedule order, then
//! calls [`finish`](Report::finish) exactly once after the last one.

mod csv_file;
mod plain;
mod summary;

pub use csv_file::CsvFile;
pub use plain::Plain;
pub use summary::Summary;

use crate::error::SweepError;

/// One row of the size→latency table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Working-set size in KiB.
    pub size_kib: u64,
    /// Mean wall-clock nanoseconds per read-modify-write.
    pub ns_per_read: f64,
}

pub trait Report {
    /// Accepts the next reading.
    fn push(&mut self, reading: &Reading) -> Result<(), SweepError>;
    /// Flushes whatever the sink buffered.
    fn finish(&mut self) -> Result<(), SweepError>;
}

impl Report for Box<dyn Report> {
    fn push(&mut self, reading: &Reading) -> Result<(), SweepError> {
        (**self).push(reading)
    }

    fn finish(&mut self) -> Result<(), SweepError> {
        (**self).finish()
    }
}

/// Pushes every reading to A, then B.
impl<A: Report, B: Report> Report for (A, B) {
    fn push(&mut self, reading: &Reading) -> Result<(), SweepError> {
        self.0.push(reading)?;
        self.1.push(reading)
    }

    fn finish(&mut self) -> Result<(), SweepError> {
        self.0.finish()?;
        self.1.finish()
    }
}

/// Latency formatting shared by the console line and the CSV field, so the
/// console output mirrors the file.
pub(crate) fn fmt_latency(ns_per_read: f64) -> String {
    format!("{ns_per_read:.6}")
}

/// Picks the console format from `MEMSWEEP_FORMAT`.
///
/// `md` collects the run into one markdown table printed at the end;
/// anything else falls back to the default line-per-reading format.
pub fn console_from_env() -> Box<dyn Report> {
    match std::env::var("MEMSWEEP_FORMAT").as_deref() {
        Ok("md") => Box::new(Summary::new()),
        x => {
            if let Ok(requested) = x {
                eprintln!(
                    "unrecognized value for MEMSWEEP_FORMAT: {requested:?}.\nSupported values: md"
                );
            }
            Box::new(Plain::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_sink_pushes_to_both() {
        let dir = tempfile::tempdir().unwrap();
        let a_path = dir.path().join("a.csv");
        let b_path = dir.path().join("b.csv");
        let mut sink = (
            CsvFile::create(&a_path).unwrap(),
            CsvFile::create(&b_path).unwrap(),
        );
        sink.push(&Reading { size_kib: 4, ns_per_read: 3.0 }).unwrap();
        sink.finish().unwrap();
        drop(sink);
        let a = std::fs::read_to_string(&a_path).unwrap();
        let b = std::fs::read_to_string(&b_path).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "4,3.000000\n");
    }

    #[test]
    fn latency_format_is_fixed_precision() {
        assert_eq!(fmt_latency(1.5), "1.500000");
        assert_eq!(fmt_latency(12.3456789), "12.345679");
    }
}
