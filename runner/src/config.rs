//! Runner configuration, read from the environment.
//!
//! * `QUANTUM` - the time quantum, overrides the one in the workload file
//! * `WORKLOAD` - path to a JSON workload, the first argument works too
//! * `OUTPUT` - `text` (default) or `json`

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};
use scheduler::Ticks;

use crate::workload::{parse_quantum, DEFAULT_QUANTUM};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub quantum: Option<Ticks>,
    pub workload: Option<PathBuf>,
    pub output: OutputFormat,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| env::var(key).ok(), env::args().nth(1))
    }

    /// Builds the configuration from a variable lookup and the optional
    /// first command line argument.
    pub fn from_lookup<F>(lookup: F, argument: Option<String>) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let quantum = lookup("QUANTUM")
            .map(|value| parse_quantum(&value))
            .transpose()?;

        let workload = argument.or_else(|| lookup("WORKLOAD")).map(PathBuf::from);

        let output = match lookup("OUTPUT").as_deref() {
            None | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => bail!("Unknown output format {other:?}, expected \"text\" or \"json\"."),
        };

        Ok(Config {
            quantum,
            workload,
            output,
        })
    }

    /// The quantum to use when the workload does not set one either.
    pub fn quantum_or(&self, workload: Option<Ticks>) -> Ticks {
        self.quantum.or(workload).unwrap_or(DEFAULT_QUANTUM)
    }
}
