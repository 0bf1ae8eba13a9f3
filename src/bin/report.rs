//! One-shot report driver: load the extract, derive the variables, fit
//! both models, and write the report artifacts.

use std::env;
use std::time::Instant;

use anyhow::Context;

use net_mobility::utils::logging;
use net_mobility::{build_report, load_respondents, write_report, AnalysisConfig};
use net_mobility::RespondentCollection;

fn main() -> anyhow::Result<()> {
    logging::init();

    // Positional overrides: extract path, then output directory
    let mut args = env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => AnalysisConfig::new(path),
        None => AnalysisConfig::default(),
    };
    if let Some(dir) = args.next() {
        config = config.with_output_dir(dir);
    }

    let started = Instant::now();
    logging::stage_start("load", &config.input_path);

    let respondents = load_respondents(&config)
        .with_context(|| format!("loading extract {}", config.input_path.display()))?;
    logging::stage_complete("load", respondents.len(), started.elapsed());

    let collection = RespondentCollection::from_respondents(respondents);
    log::info!(
        "Derived variables: {} respondents, {} with network data, {} with mobility data",
        collection.len(),
        collection.with_network_data().len(),
        collection.with_mobility_data().len()
    );

    let report = build_report(&config, &collection).context("building report")?;
    let report_path = write_report(&config, &report).context("writing report artifacts")?;

    log::info!(
        "Report written to {} ({} figures) in {:?}",
        report_path.display(),
        report.figures.len(),
        started.elapsed()
    );

    Ok(())
}
