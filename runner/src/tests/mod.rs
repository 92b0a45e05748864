use scheduler::{ProcessSpec, Schedule, Ticks};

use std::env;
use std::fs;

use report::format_report;

mod invalid;

static SCHEDULER: &str = "round-robin";

fn write_logs(folder: &str, name: &str, logs: &str) {
    let quantum = quantum();
    fs::create_dir_all(format!("../outputs/{SCHEDULER}/{folder}")).unwrap();
    fs::write(
        format!("../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"),
        logs,
    )
    .unwrap();
}

fn read_logs(folder: &str, name: &str) -> String {
    let quantum = quantum();
    fs::read_to_string(format!(
        "../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"
    ))
    .unwrap()
}

/// Compares the report of `schedule` with the stored one, or stores it
/// when `WRITE_OUTPUT` is set.
fn run(folder: &str, name: &str, schedule: &Schedule) {
    let output = format_report(schedule);

    if env::var("WRITE_OUTPUT").is_ok() {
        write_logs(folder, name, &output);
    } else {
        let reference = read_logs(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

fn quantum() -> Ticks {
    env::var("QUANTUM")
        .unwrap_or("2".to_string())
        .parse::<Ticks>()
        .unwrap()
}

/// Runs `(pid, arrival, burst)` triples with the quantum from the environment.
fn schedule(processes: &[(usize, Ticks, Ticks)]) -> Schedule {
    schedule_with(processes, quantum())
}

fn schedule_with(processes: &[(usize, Ticks, Ticks)], quantum: Ticks) -> Schedule {
    let processes: Vec<ProcessSpec> = processes
        .iter()
        .map(|&(pid, arrival, burst)| ProcessSpec::new(pid, arrival, burst))
        .collect();
    scheduler::run(&processes, quantum).unwrap()
}

/// The timeline as `(label, start, end)` triples.
fn timeline(schedule: &Schedule) -> Vec<(String, Ticks, Ticks)> {
    schedule
        .timeline
        .iter()
        .map(|entry| (entry.slot.to_string(), entry.start, entry.end))
        .collect()
}

/// The metrics of a process as `(completion, turnaround, waiting, response)`.
fn metrics(schedule: &Schedule, pid: usize) -> (Ticks, Ticks, Ticks, Ticks) {
    let p = schedule.process(scheduler::Pid::new(pid)).unwrap();
    (
        p.completion_time,
        p.turnaround_time,
        p.waiting_time,
        p.response_time,
    )
}

fn entries(expected: &[(&str, Ticks, Ticks)]) -> Vec<(String, Ticks, Ticks)> {
    expected
        .iter()
        .map(|&(label, start, end)| (label.to_string(), start, end))
        .collect()
}
