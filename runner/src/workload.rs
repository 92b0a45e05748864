//! Workload input: the JSON file format and its validation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use scheduler::{ProcessSpec, Ticks};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_QUANTUM: Ticks = 2;

/// A problem with user supplied input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Number of processes must be positive.")]
    NoProcesses,

    #[error("Time quantum must be a number.")]
    QuantumNotANumber,

    #[error("Time quantum must be positive.")]
    QuantumNotPositive,

    #[error("Arrival time for P{0} must be non-negative.")]
    NegativeArrival(usize),

    #[error("Burst time for P{0} must be positive.")]
    BurstNotPositive(usize),
}

/// One process as written in the workload file.
///
/// Times are signed so that negative values can be reported properly.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessInput {
    #[serde(default)]
    pub pid: Option<usize>,
    pub arrival_time: i64,
    pub burst_time: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkloadFile {
    #[serde(default)]
    pub quantum: Option<i64>,
    pub processes: Vec<ProcessInput>,
}

/// A validated workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub quantum: Option<Ticks>,
    pub processes: Vec<ProcessSpec>,
}

impl Workload {
    pub fn load(path: &Path) -> Result<Workload> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read workload {}", path.display()))?;
        let workload = Workload::parse(&json)
            .with_context(|| format!("invalid workload {}", path.display()))?;
        info!(path = %path.display(), processes = workload.processes.len(), "workload loaded");
        Ok(workload)
    }

    pub fn parse(json: &str) -> Result<Workload> {
        let file: WorkloadFile = serde_json::from_str(json)?;
        Ok(Workload::try_from(file)?)
    }

    /// The three process workload used when no file is given.
    pub fn demo() -> Workload {
        Workload {
            quantum: Some(DEFAULT_QUANTUM),
            processes: vec![
                ProcessSpec::new(0, 0, 5),
                ProcessSpec::new(1, 1, 3),
                ProcessSpec::new(2, 2, 1),
            ],
        }
    }
}

impl TryFrom<WorkloadFile> for Workload {
    type Error = InputError;

    fn try_from(file: WorkloadFile) -> Result<Self, Self::Error> {
        if file.processes.is_empty() {
            return Err(InputError::NoProcesses);
        }

        let quantum = file.quantum.map(positive_quantum).transpose()?;

        let processes = file
            .processes
            .iter()
            .enumerate()
            .map(|(index, input)| -> Result<ProcessSpec, InputError> {
                let pid = input.pid.unwrap_or(index);
                let arrival_time =
                    Ticks::try_from(input.arrival_time).map_err(|_| InputError::NegativeArrival(pid))?;
                let burst_time = match Ticks::try_from(input.burst_time) {
                    Ok(burst) if burst > 0 => burst,
                    _ => return Err(InputError::BurstNotPositive(pid)),
                };
                Ok(ProcessSpec::new(pid, arrival_time, burst_time))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Workload { quantum, processes })
    }
}

/// Parses a quantum given as text.
pub fn parse_quantum(value: &str) -> Result<Ticks, InputError> {
    let quantum = value
        .trim()
        .parse::<i64>()
        .map_err(|_| InputError::QuantumNotANumber)?;
    positive_quantum(quantum)
}

fn positive_quantum(quantum: i64) -> Result<Ticks, InputError> {
    match Ticks::try_from(quantum) {
        Ok(quantum) if quantum > 0 => Ok(quantum),
        _ => Err(InputError::QuantumNotPositive),
    }
}
