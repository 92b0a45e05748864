use std::collections::{HashSet, VecDeque};
use std::num::NonZeroU64;

use tracing::{debug, instrument, trace};

use crate::{Error, Pid, ProcessRecord, ProcessSpec, Schedule, Slot, Ticks, TimelineEntry};

/// Process control block: the engine's private, mutable view of a process.
#[derive(Copy, Clone, PartialEq)]
struct PCB {
    spec: ProcessSpec,
    remaining: Ticks,
    response: Option<Ticks>,
    completion: Option<Ticks>,
}

impl PCB {
    fn new(spec: ProcessSpec) -> Self {
        PCB {
            spec,
            remaining: spec.burst_time,
            response: None,
            completion: None,
        }
    }

    fn record(&self) -> ProcessRecord {
        let (Some(completion_time), Some(response_time)) = (self.completion, self.response) else {
            unreachable!("P{} was never completed", self.spec.pid);
        };
        let turnaround_time = completion_time - self.spec.arrival_time;

        ProcessRecord {
            pid: self.spec.pid,
            arrival_time: self.spec.arrival_time,
            burst_time: self.spec.burst_time,
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time - self.spec.burst_time,
            response_time,
        }
    }
}

/// A preemptive round robin scheduler over a fixed set of processes.
///
/// Processes are served from a FIFO ready queue for at most `quantum` ticks
/// at a time. When a quantum expires at the same tick as new arrivals, the
/// arrivals are queued ahead of the preempted process.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RoundRobin {
    quantum: NonZeroU64,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroU64) -> Self {
        RoundRobin { quantum }
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum.get()
    }

    /// Simulates the workload to completion.
    ///
    /// The input is left untouched; the returned [`Schedule`] carries the
    /// timeline and one [`ProcessRecord`] per input process, in input order.
    #[instrument(skip_all, fields(quantum = self.quantum.get(), processes = processes.len()))]
    pub fn run(&self, processes: &[ProcessSpec]) -> Result<Schedule, Error> {
        validate(processes)?;

        let quantum = self.quantum.get();
        let mut pcbs: Vec<PCB> = processes.iter().copied().map(PCB::new).collect();

        // stable, so simultaneous arrivals keep their input order
        let mut arrivals: Vec<usize> = (0..pcbs.len()).collect();
        arrivals.sort_by_key(|&index| processes[index].arrival_time);

        let mut ready_queue: VecDeque<usize> = VecDeque::with_capacity(pcbs.len());
        let mut timeline = Vec::new();
        let mut admitted = 0;
        let mut pending = pcbs.len();
        let mut now: Ticks = 0;

        while pending > 0 {
            admit(processes, &arrivals, &mut admitted, now, &mut ready_queue);

            let Some(index) = ready_queue.pop_front() else {
                let Some(&next) = arrivals.get(admitted) else {
                    unreachable!("ready queue is empty with {pending} processes left and no arrivals");
                };
                let next_arrival = processes[next].arrival_time;
                debug!(from = now, until = next_arrival, "idle");
                timeline.push(TimelineEntry::new(Slot::Idle, now, next_arrival));
                now = next_arrival;
                continue;
            };

            let process = &mut pcbs[index];
            let pid = process.spec.pid;
            if process.response.is_none() {
                process.response = Some(now - process.spec.arrival_time);
            }

            let run_for = quantum.min(process.remaining);
            debug!(%pid, start = now, run_for, "dispatch");
            timeline.push(TimelineEntry::new(Slot::Process(pid), now, now + run_for));
            now += run_for;
            process.remaining -= run_for;
            let finished = process.remaining == 0;
            if finished {
                process.completion = Some(now);
                pending -= 1;
            }

            // arrivals during the slice go in before the preempted process
            admit(processes, &arrivals, &mut admitted, now, &mut ready_queue);

            if finished {
                debug!(%pid, completion = now, "completed");
            } else {
                trace!(%pid, remaining = pcbs[index].remaining, "requeued");
                ready_queue.push_back(index);
            }
        }

        Ok(Schedule {
            quantum,
            timeline,
            processes: pcbs.iter().map(PCB::record).collect(),
        })
    }
}

/// Moves every process that has arrived by `now` to the tail of the ready queue.
fn admit(
    processes: &[ProcessSpec],
    arrivals: &[usize],
    admitted: &mut usize,
    now: Ticks,
    ready_queue: &mut VecDeque<usize>,
) {
    while let Some(&index) = arrivals.get(*admitted) {
        if processes[index].arrival_time > now {
            break;
        }
        trace!(pid = %processes[index].pid, now, "admitted");
        ready_queue.push_back(index);
        *admitted += 1;
    }
}

fn validate(processes: &[ProcessSpec]) -> Result<(), Error> {
    if processes.is_empty() {
        return Err(Error::EmptyWorkload);
    }

    let mut seen: HashSet<Pid> = HashSet::with_capacity(processes.len());
    for process in processes {
        if process.burst_time == 0 {
            return Err(Error::ZeroBurst { pid: process.pid });
        }
        if !seen.insert(process.pid) {
            return Err(Error::DuplicatePid { pid: process.pid });
        }
    }

    Ok(())
}
