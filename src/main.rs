use memsweep::{CsvFile, LatencySweep, SweepConfig, SweepError, plot, report};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("memsweep: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), SweepError> {
    let config = SweepConfig::default();
    let results_path = config.results_path.clone();
    let mut sweep = LatencySweep::new(config)?;
    let mut sink = (report::console_from_env(), CsvFile::create(&results_path)?);
    sweep.run(&mut sink)?;
    // The plotter reads the file, so the sink must be closed first.
    drop(sink);
    plot::spawn_gnuplot(&results_path);
    Ok(())
}
