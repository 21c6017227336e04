//! Process control block: identity, scheduling attributes, and accounting
//! counters. `Pid` follows the `VmId` newtype shape (`hypervisor/core.rs`),
//! generalized from a hypervisor guest identifier to a scheduler-simulator
//! process identifier.

use std::fmt;

use rand::Rng;

use crate::clock::SimRng;
use crate::task::Task;

/// Monotonically assigned process identifier, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `Waiting` is reserved by the data model but never entered by this core
/// (no blocking I/O is simulated); it is omitted as a variant rather than
/// carried as dead state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Ready,
    Running,
    Terminated,
}

/// Clock value at first dispatch, or not yet reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartTime {
    Unset,
    At(u32),
}

pub struct ProcessRecord {
    pub pid: Pid,
    pub name: String,
    pub task: Box<dyn Task>,
    pub state: ProcessState,
    pub priority: u32,
    pub arrival_time: u32,
    pub start_time: StartTime,
    pub end_time: Option<u32>,
    pub estimated_burst_time: u32,
    pub current_burst: u32,
    pub current_slice: u32,
    pub quantum_remaining: u32,
    pub waiting_time: u32,
    pub turnaround_time: Option<u32>,
    pub executed_steps: u32,
    pub return_value: Option<String>,
    pub run_history: Vec<(u32, u32)>,
    /// Set while a run-history segment is open (between dispatch and the
    /// next yield/terminate/quantum-expiry close).
    pub current_run_start: Option<u32>,
    /// Wall-clock microseconds spent inside `Task::step()` calls (reporter
    /// CPU-time column, mirroring a hypervisor scheduling entry's `cpu_time`).
    pub cpu_time_us: u64,
}

impl ProcessRecord {
    /// `priority_or_none`: caller-supplied priority, or `None` to draw
    /// uniformly from 1..=10. `estimated_burst_time` is always drawn
    /// uniformly from 3..=10, regardless of priority source.
    pub fn new(
        pid: Pid,
        name: String,
        task: Box<dyn Task>,
        priority_or_none: Option<u32>,
        arrival_time: u32,
        rng: &mut SimRng,
    ) -> Self {
        let priority = priority_or_none.unwrap_or_else(|| rng.inner().gen_range(1..=10));
        let estimated_burst_time = rng.inner().gen_range(3..=10);
        ProcessRecord {
            pid,
            name,
            task,
            state: ProcessState::Ready,
            priority,
            arrival_time,
            start_time: StartTime::Unset,
            end_time: None,
            estimated_burst_time,
            current_burst: 0,
            current_slice: 0,
            quantum_remaining: 0,
            waiting_time: 0,
            turnaround_time: None,
            executed_steps: 0,
            return_value: None,
            run_history: Vec::new(),
            current_run_start: None,
            cpu_time_us: 0,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.state, ProcessState::Terminated)
    }

    /// Remaining work in the current burst if it has started, else the
    /// process's fixed estimate. Used by SRTF's "remaining time" ranking.
    pub fn remaining_time(&self) -> u32 {
        if self.current_burst > 0 {
            self.current_burst
        } else {
            self.estimated_burst_time
        }
    }
}

impl fmt::Debug for ProcessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessRecord")
            .field("pid", &self.pid)
            .field("name", &self.name)
            .field("state", &self.state)
            .field("priority", &self.priority)
            .field("arrival_time", &self.arrival_time)
            .field("estimated_burst_time", &self.estimated_burst_time)
            .field("executed_steps", &self.executed_steps)
            .finish()
    }
}
