//! Post-run reporting. The table renderer writes to any `impl
//! std::io::Write`, following `cli::output::OutputFormatter`'s shape of
//! formatting a table to a writer rather than building a `String` directly
//! — so the exact same code path backs both the CLI's stdout table and
//! unit tests that assert on report contents without scraping formatted
//! strings.

use std::io::{self, Write};

use crate::process::{Pid, ProcessRecord};

pub struct Summary {
    pub scheduler_name: String,
    pub final_clock: u32,
    pub context_switches: u32,
    pub rows: Vec<ReportRow>,
}

pub struct ReportRow {
    pub pid: Pid,
    pub name: String,
    pub cpu_time_us: u64,
    pub turnaround_time: u32,
    pub waiting_time: u32,
    pub priority: u32,
    pub executed_steps: u32,
    pub return_value: Option<String>,
}

impl Summary {
    pub fn build(
        scheduler_name: &str,
        final_clock: u32,
        context_switches: u32,
        terminated_order: &[Pid],
        terminated: &std::collections::HashMap<Pid, ProcessRecord>,
    ) -> Self {
        let rows = terminated_order
            .iter()
            .filter_map(|pid| terminated.get(pid).map(|r| ReportRow {
                pid: *pid,
                name: r.name.clone(),
                cpu_time_us: r.cpu_time_us,
                turnaround_time: r.turnaround_time.unwrap_or(0),
                waiting_time: r.waiting_time,
                priority: r.priority,
                executed_steps: r.executed_steps,
                return_value: r.return_value.clone(),
            }))
            .collect();

        Summary {
            scheduler_name: scheduler_name.to_string(),
            final_clock,
            context_switches,
            rows,
        }
    }

    pub fn average_turnaround(&self) -> f64 {
        average(self.rows.iter().map(|r| r.turnaround_time))
    }

    pub fn average_waiting(&self) -> f64 {
        average(self.rows.iter().map(|r| r.waiting_time))
    }

    pub fn print_table(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "scheduler: {}  final clock: {}  context switches: {}",
            self.scheduler_name, self.final_clock, self.context_switches
        )?;
        writeln!(
            out,
            "{:<5} {:<20} {:>10} {:>12} {:>10} {:>9} {:>6}  return value",
            "pid", "name", "cpu_us", "turnaround", "waiting", "priority", "steps"
        )?;
        for row in &self.rows {
            writeln!(
                out,
                "{:<5} {:<20} {:>10} {:>12} {:>10} {:>9} {:>6}  {}",
                row.pid.0,
                row.name,
                row.cpu_time_us,
                row.turnaround_time,
                row.waiting_time,
                row.priority,
                row.executed_steps,
                row.return_value.as_deref().unwrap_or("-"),
            )?;
        }
        writeln!(
            out,
            "averages: turnaround={:.2} waiting={:.2}",
            self.average_turnaround(),
            self.average_waiting()
        )?;
        Ok(())
    }
}

fn average(values: impl Iterator<Item = u32>) -> f64 {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), v| (sum + v as u64, count + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
