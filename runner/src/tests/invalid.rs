use pretty_assertions::assert_eq;
use scheduler::{Error, Pid, ProcessSpec};

use crate::config::{Config, OutputFormat};
use crate::workload::{parse_quantum, InputError, Workload};

fn input_error(json: &str) -> InputError {
    Workload::parse(json)
        .unwrap_err()
        .downcast::<InputError>()
        .unwrap()
}

#[test]
fn empty_workload_is_rejected() {
    assert_eq!(scheduler::run(&[], 2), Err(Error::EmptyWorkload));
}

#[test]
fn zero_quantum_is_rejected() {
    let processes = [ProcessSpec::new(0, 0, 1)];

    assert_eq!(scheduler::run(&processes, 0), Err(Error::ZeroQuantum));
    assert!(scheduler::round_robin(0).is_err());
}

#[test]
fn zero_burst_is_rejected() {
    let processes = [ProcessSpec::new(0, 0, 1), ProcessSpec::new(1, 2, 0)];

    assert_eq!(
        scheduler::run(&processes, 2),
        Err(Error::ZeroBurst { pid: Pid::new(1) })
    );
}

#[test]
fn duplicate_pid_is_rejected() {
    let processes = [ProcessSpec::new(3, 0, 1), ProcessSpec::new(3, 2, 1)];

    assert_eq!(
        scheduler::run(&processes, 2),
        Err(Error::DuplicatePid { pid: Pid::new(3) })
    );
}

#[test]
fn error_messages_name_the_problem() {
    assert_eq!(
        Error::ZeroBurst { pid: Pid::new(4) }.to_string(),
        "invalid argument: burst time of P4 must be positive"
    );
    assert_eq!(
        Error::ZeroQuantum.to_string(),
        "invalid argument: the time quantum must be positive"
    );
}

#[test]
fn workload_file_defaults_pids_to_positions() {
    let workload = Workload::parse(
        r#"{ "quantum": 3,
             "processes": [ { "arrival_time": 0, "burst_time": 5 },
                            { "pid": 7, "arrival_time": 1, "burst_time": 3 },
                            { "arrival_time": 2, "burst_time": 1 } ] }"#,
    )
    .unwrap();

    assert_eq!(workload.quantum, Some(3));
    assert_eq!(
        workload.processes,
        vec![
            ProcessSpec::new(0, 0, 5),
            ProcessSpec::new(7, 1, 3),
            ProcessSpec::new(2, 2, 1),
        ]
    );
}

#[test]
fn workload_file_validation_messages() {
    assert_eq!(
        input_error(r#"{ "processes": [] }"#).to_string(),
        "Number of processes must be positive."
    );
    assert_eq!(
        input_error(r#"{ "processes": [ { "arrival_time": 0, "burst_time": 1 },
                                        { "arrival_time": -1, "burst_time": 1 } ] }"#),
        InputError::NegativeArrival(1)
    );
    assert_eq!(
        input_error(r#"{ "processes": [ { "arrival_time": 0, "burst_time": 0 } ] }"#).to_string(),
        "Burst time for P0 must be positive."
    );
    assert_eq!(
        input_error(r#"{ "quantum": 0, "processes": [ { "arrival_time": 0, "burst_time": 1 } ] }"#),
        InputError::QuantumNotPositive
    );
}

#[test]
fn workload_file_rejects_unknown_fields() {
    let result = Workload::parse(
        r#"{ "processes": [ { "arrival_time": 0, "burst_time": 1, "priority": 3 } ] }"#,
    );

    assert!(result.is_err());
}

#[test]
fn quantum_text_validation() {
    assert_eq!(parse_quantum(" 4 "), Ok(4));
    assert_eq!(parse_quantum("-2"), Err(InputError::QuantumNotPositive));
    assert_eq!(parse_quantum("two"), Err(InputError::QuantumNotANumber));
}

#[test]
fn config_from_variables() {
    let config = Config::from_lookup(
        |key| match key {
            "QUANTUM" => Some("3".to_string()),
            "WORKLOAD" => Some("ignored.json".to_string()),
            "OUTPUT" => Some("json".to_string()),
            _ => None,
        },
        Some("workload.json".to_string()),
    )
    .unwrap();

    assert_eq!(config.quantum, Some(3));
    assert_eq!(config.workload.as_deref(), Some(std::path::Path::new("workload.json")));
    assert_eq!(config.output, OutputFormat::Json);
    assert_eq!(config.quantum_or(Some(5)), 3);
}

#[test]
fn config_defaults() {
    let config = Config::from_lookup(|_| None, None).unwrap();

    assert_eq!(config.quantum, None);
    assert_eq!(config.workload, None);
    assert_eq!(config.output, OutputFormat::Text);
    assert_eq!(config.quantum_or(Some(5)), 5);
    assert_eq!(config.quantum_or(None), 2);
}

#[test]
fn config_rejects_bad_values() {
    assert!(Config::from_lookup(|key| (key == "OUTPUT").then(|| "xml".to_string()), None).is_err());
    assert!(Config::from_lookup(|key| (key == "QUANTUM").then(|| "0".to_string()), None).is_err());
}

#[test]
fn demo_workload_runs() {
    let workload = Workload::demo();
    let schedule = scheduler::run(&workload.processes, workload.quantum.unwrap()).unwrap();

    assert_eq!(schedule.makespan(), 9);
}
