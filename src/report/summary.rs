use tabled::settings::Style;

use super::{Reading, Report, fmt_latency};
use crate::error::SweepError;

/// Opt-in console format: collects the whole run and prints one markdown
/// table when it finishes. Trades the default format's immediacy for output
/// that pastes straight into a report.
pub struct Summary {
    readings: Vec<Reading>,
}

impl Summary {
    pub fn new() -> Self {
        Summary { readings: Vec::new() }
    }
}

impl Default for Summary {
    fn default() -> Self {
        Self::new()
    }
}

impl Report for Summary {
    fn push(&mut self, reading: &Reading) -> Result<(), SweepError> {
        self.readings.push(*reading);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SweepError> {
        let mut table = tabled::builder::Builder::new();
        table.push_record(["size (KiB)", "latency (ns/read)"]);
        for reading in &self.readings {
            table.push_record([
                reading.size_kib.to_string(),
                fmt_latency(reading.ns_per_read),
            ]);
        }
        let mut table = table.build();
        table.with(Style::markdown());
        println!("{table}");
        Ok(())
    }
}
