//! Text rendering of scheduling results
//!
//! This turns a [`Schedule`] from the [`scheduler`] crate into the results
//! table, the average metrics and a Gantt chart.

use std::fmt::{self, Display};

use scheduler::{ProcessRecord, Schedule, Summary, TimelineEntry};

/// One line of the results table.
pub struct ProcessRow<'a>(pub &'a ProcessRecord);

impl Display for ProcessRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.0;
        write!(
            f,
            "P{}\t{}\t{}\t{}\t{}\t{}\t{}",
            p.pid,
            p.arrival_time,
            p.burst_time,
            p.completion_time,
            p.turnaround_time,
            p.waiting_time,
            p.response_time
        )
    }
}

/// The average metrics block.
pub struct Averages(pub Summary);

impl Display for Averages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Turnaround Time: {:.2}", self.0.turnaround)?;
        writeln!(f, "Average Waiting Time: {:.2}", self.0.waiting)?;
        writeln!(f, "Average Response Time: {:.2}", self.0.response)
    }
}

/// The Gantt chart: one row per interval, then a bar with its time axis.
pub struct GanttChart<'a>(pub &'a [TimelineEntry]);

impl Display for GanttChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "START\tEND\tSLOT")?;
        for entry in self.0 {
            writeln!(f, "{}\t{}\t{}", entry.start, entry.end, entry.slot)?;
        }

        let Some(first) = self.0.first() else {
            return Ok(());
        };

        writeln!(f)?;
        write!(f, "|")?;
        for entry in self.0 {
            write!(f, "{}|", entry.slot)?;
        }
        writeln!(f)?;

        write!(f, "{}", first.start)?;
        for entry in self.0 {
            write!(f, " {}", entry.end)?;
        }
        writeln!(f)
    }
}

/// A full report of a simulation run.
pub struct Report<'a>(pub &'a Schedule);

impl Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schedule = self.0;

        writeln!(f, "Time Quantum: {}", schedule.quantum)?;
        writeln!(f)?;
        writeln!(f, "===== Process Results =====")?;
        writeln!(
            f,
            "PID\tARRIVAL\tBURST\tCOMPLETION\tTURNAROUND\tWAITING\tRESPONSE"
        )?;
        for process in &schedule.processes {
            writeln!(f, "{}", ProcessRow(process))?;
        }
        writeln!(f)?;

        writeln!(f, "===== Average Metrics =====")?;
        write!(f, "{}", Averages(schedule.summary()))?;
        writeln!(f)?;

        writeln!(f, "===== Gantt Chart =====")?;
        write!(f, "{}", GanttChart(&schedule.timeline))?;
        writeln!(
            f,
            "Busy {} / Idle {} / Total {}",
            schedule.busy_time(),
            schedule.idle_time(),
            schedule.makespan()
        )
    }
}

/// Format a [`Schedule`] to a [`String`].
///
/// ## Example
///
/// ```rust
/// use report::format_report;
/// use scheduler::ProcessSpec;
///
/// let schedule = scheduler::run(&[ProcessSpec::new(0, 0, 5)], 2).unwrap();
///
/// println!("{}", format_report(&schedule));
/// ```
pub fn format_report(schedule: &Schedule) -> String {
    Report(schedule).to_string()
}
