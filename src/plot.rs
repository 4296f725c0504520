//! Fire-and-forget gnuplot invocation over the finished result file.

use std::path::Path;
use std::process::Command;

/// Plots the result file as a line+point series.
///
/// The display directives are fixed: logarithmic base-2 size axis, linear
/// latency axis, titled and axis-labeled. Best-effort: a missing or failing
/// gnuplot is logged and ignored; the result file is already written.
pub fn spawn_gnuplot(results: &Path) {
    let script = format!(
        "set autoscale; \
         set title 'Memory hierarchy latency sweep'; \
         set xlabel 'Buffer size (KiB)'; \
         set ylabel 'Latency per memory read (ns)'; \
         set logscale x 2; \
         set datafile separator ','; \
         plot '{}' with linespoints lc rgb 'red'",
        results.display()
    );
    match Command::new("gnuplot").arg("-p").arg("-e").arg(&script).status() {
        Ok(status) if status.success() => {}
        Ok(status) => log::warn!("gnuplot exited with {status}"),
        Err(err) => log::warn!("could not launch gnuplot: {err}"),
    }
}
