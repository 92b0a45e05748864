use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use report::format_report;
use scheduler::{Schedule, Summary};

mod config;
mod logging;
mod workload;

use config::{Config, OutputFormat};
use workload::Workload;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    schedule: &'a Schedule,
    summary: Summary,
}

fn main() -> Result<()> {
    logging::init();

    let config = Config::from_env()?;
    let workload = match &config.workload {
        Some(path) => Workload::load(path)?,
        None => Workload::demo(),
    };
    let quantum = config.quantum_or(workload.quantum);

    let schedule = scheduler::run(&workload.processes, quantum).context("simulation failed")?;
    info!(
        quantum,
        processes = schedule.processes.len(),
        makespan = schedule.makespan(),
        "simulation finished"
    );

    match config.output {
        OutputFormat::Text => print!("{}", format_report(&schedule)),
        OutputFormat::Json => {
            let report = JsonReport {
                schedule: &schedule,
                summary: schedule.summary(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

// Do not delete this line
#[cfg(test)]
mod tests;
