use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point or a duration on the simulated clock.
pub type Ticks = u64;

/// The identifier of a process.
///
/// Unlike a kernel PID, `0` is a valid identifier; ids only have to be
/// unique within one run.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Pid(usize);

impl Pid {
    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A process as supplied by the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// The process identifier.
    pub pid: Pid,

    /// The tick at which the process becomes eligible to run.
    pub arrival_time: Ticks,

    /// The total CPU time the process needs. Must be positive.
    pub burst_time: Ticks,
}

impl ProcessSpec {
    pub fn new(pid: usize, arrival_time: Ticks, burst_time: Ticks) -> ProcessSpec {
        ProcessSpec {
            pid: Pid::new(pid),
            arrival_time,
            burst_time,
        }
    }
}

/// A process after the simulation, carrying its final metrics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,

    /// The clock value at which the last unit of work finished.
    pub completion_time: Ticks,

    /// `completion_time - arrival_time`
    pub turnaround_time: Ticks,

    /// `turnaround_time - burst_time`
    pub waiting_time: Ticks,

    /// Delay between arrival and the first dispatch.
    pub response_time: Ticks,
}

/// What occupied the CPU during a timeline interval.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// The process with this PID was running.
    Process(Pid),

    /// No process was ready.
    Idle,
}

impl Slot {
    pub fn is_idle(&self) -> bool {
        matches!(self, Slot::Idle)
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Process(pid) => write!(f, "P{}", pid),
            Slot::Idle => write!(f, "Idle"),
        }
    }
}

/// One bar of the Gantt chart, covering `[start, end)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub slot: Slot,
    pub start: Ticks,
    pub end: Ticks,
}

impl TimelineEntry {
    pub fn new(slot: Slot, start: Ticks, end: Ticks) -> TimelineEntry {
        debug_assert!(start < end, "empty timeline entry {slot} [{start}, {end})");
        TimelineEntry { slot, start, end }
    }

    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

impl Display for TimelineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {})", self.slot, self.start, self.end)
    }
}

/// Average metrics over all the processes of a [`Schedule`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub turnaround: f64,
    pub waiting: f64,
    pub response: f64,
}

/// The result of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// The time quantum the run used.
    pub quantum: Ticks,

    /// Contiguous, chronological execution and idle intervals.
    pub timeline: Vec<TimelineEntry>,

    /// One record per input process, in input order.
    pub processes: Vec<ProcessRecord>,
}

impl Schedule {
    /// Returns the mean turnaround, waiting and response times.
    pub fn summary(&self) -> Summary {
        let count = self.processes.len().max(1) as f64;
        let mean = |metric: fn(&ProcessRecord) -> Ticks| {
            self.processes.iter().map(metric).sum::<Ticks>() as f64 / count
        };

        Summary {
            turnaround: mean(|p| p.turnaround_time),
            waiting: mean(|p| p.waiting_time),
            response: mean(|p| p.response_time),
        }
    }

    /// Time spent running processes.
    pub fn busy_time(&self) -> Ticks {
        self.timeline
            .iter()
            .filter(|entry| !entry.slot.is_idle())
            .map(TimelineEntry::duration)
            .sum()
    }

    /// Time spent with an empty ready queue.
    pub fn idle_time(&self) -> Ticks {
        self.timeline
            .iter()
            .filter(|entry| entry.slot.is_idle())
            .map(TimelineEntry::duration)
            .sum()
    }

    /// The clock value when the last process completed.
    pub fn makespan(&self) -> Ticks {
        self.timeline.last().map_or(0, |entry| entry.end)
    }

    /// Looks up the record of a process.
    pub fn process(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

/// Reasons a workload cannot be scheduled.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// There are no processes to run.
    #[error("invalid argument: the workload has no processes")]
    EmptyWorkload,

    /// The time quantum is zero.
    #[error("invalid argument: the time quantum must be positive")]
    ZeroQuantum,

    /// A process does not need any CPU time.
    #[error("invalid argument: burst time of P{pid} must be positive")]
    ZeroBurst { pid: Pid },

    /// Two processes share the same PID.
    #[error("invalid argument: PID {pid} is used by more than one process")]
    DuplicatePid { pid: Pid },
}
