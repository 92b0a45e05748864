//! A CPU scheduling simulation library.
//!
//! This library simulates preemptive round robin scheduling over a set of
//! processes whose arrivals are known in advance. A run produces a
//! [`Schedule`]: the Gantt chart of the CPU and the completion, turnaround,
//! waiting and response times of every process.
//!
//! ```rust
//! use scheduler::{ProcessSpec, Slot, Pid};
//!
//! let processes = [ProcessSpec::new(0, 0, 3), ProcessSpec::new(1, 1, 1)];
//! let schedule = scheduler::run(&processes, 2).unwrap();
//!
//! assert_eq!(schedule.timeline[1].slot, Slot::Process(Pid::new(1)));
//! assert_eq!(schedule.processes[0].completion_time, 4);
//! ```

use std::num::NonZeroU64;

mod scheduler;

pub use crate::scheduler::{
    Error, Pid, ProcessRecord, ProcessSpec, Schedule, Slot, Summary, Ticks, TimelineEntry,
};

mod schedulers;

pub use schedulers::RoundRobin;

/// Returns a round robin scheduler
///
/// * `quantum` - the time units that a process can run before it is preempted.
///               Fails with [`Error::ZeroQuantum`] if it is `0`.
pub fn round_robin(quantum: Ticks) -> Result<RoundRobin, Error> {
    NonZeroU64::new(quantum)
        .map(RoundRobin::new)
        .ok_or(Error::ZeroQuantum)
}

/// Runs the round robin simulation of `processes` with the given `quantum`.
///
/// * `processes` - the workload; must be non-empty, with positive bursts and
///                 unique PIDs.
/// * `quantum` - the time slice, must be positive.
pub fn run(processes: &[ProcessSpec], quantum: Ticks) -> Result<Schedule, Error> {
    round_robin(quantum)?.run(processes)
}
