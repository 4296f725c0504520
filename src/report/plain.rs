use std::io::{Write, stdout};

use super::{Reading, Report, fmt_latency};
use crate::error::SweepError;

/// Default console format: one `<size KiB>, <ns per read>` line per reading,
/// written and flushed as soon as the size finishes aggregating.
pub struct Plain {
    out: Box<dyn Write>,
}

impl Plain {
    pub fn new() -> Self {
        Self::from_writer(Box::new(stdout()))
    }

    pub fn from_writer(out: Box<dyn Write>) -> Self {
        Plain { out }
    }
}

impl Default for Plain {
    fn default() -> Self {
        Self::new()
    }
}

impl Report for Plain {
    fn push(&mut self, reading: &Reading) -> Result<(), SweepError> {
        writeln!(
            self.out,
            "{}, {}",
            reading.size_kib,
            fmt_latency(reading.ns_per_read)
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SweepError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn mirrors_the_file_row_with_a_space_separator() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.txt");
        let mut sink = Plain::from_writer(Box::new(File::create(&path).unwrap()));
        sink.push(&Reading { size_kib: 1, ns_per_read: 1.25 }).unwrap();
        sink.push(&Reading { size_kib: 2, ns_per_read: 7.0 }).unwrap();
        sink.finish().unwrap();
        drop(sink);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "1, 1.250000\n2, 7.000000\n");
    }
}
