use std::fs::File;
use std::io::Write;
use std::iter;
use std::path::Path;

use super::{Reading, Report, fmt_latency};
use crate::error::SweepError;

/// The durable result sink: headerless two-field rows, one per reading, in
/// push order, every row newline-terminated including the last. The file is
/// created (or truncated) at open time.
pub struct CsvFile {
    writer: csv::Writer<Box<dyn Write>>,
}

impl CsvFile {
    pub fn create(path: &Path) -> Result<Self, SweepError> {
        Ok(Self::from_writer(Box::new(File::create(path)?)))
    }

    pub fn from_writer(out: Box<dyn Write>) -> Self {
        CsvFile {
            writer: csv::Writer::from_writer(out),
        }
    }
}

impl Report for CsvFile {
    fn push(&mut self, reading: &Reading) -> Result<(), SweepError> {
        self.writer.write_field(reading.size_kib.to_string())?;
        self.writer.write_field(fmt_latency(reading.ns_per_read))?;
        self.writer.write_record(iter::empty::<&[u8]>())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SweepError> {
        self.writer.flush()?;
        Ok(())
    }
}
