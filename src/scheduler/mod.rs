//! Scheduler policies, realized as a single tagged `SchedulerKind`
//! dispatched from one `Scheduler` struct that owns the ready queue plus
//! each policy's extra state. Follows `hypervisor::scheduler::VmScheduler`:
//! one struct holding `entries`/`run_queue`/policy config and a
//! `SchedulerPolicy` enum (`RoundRobin | FairShare | Priority | Cfs |
//! RealTime`) matched inside `schedule()`, rather than one type per policy.
//! None of this state sits behind a lock, since dispatch here is strictly
//! single-threaded.

mod edf;
mod fair_share;
mod fcfs;
mod mlfq;
mod priority;
mod round_robin;
mod sjf;
mod srtf;

use std::collections::HashMap;

use crate::process::{Pid, ProcessRecord};
use crate::ready_queue::ReadyQueue;

pub use fair_share::Group;
pub use mlfq::LEVEL_QUANTA;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerKind {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin,
    Srtf,
    Mlfq,
    Edf,
    FairShare,
}

impl SchedulerKind {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "fcfs" => SchedulerKind::Fcfs,
            "sjf" => SchedulerKind::Sjf,
            "priority" => SchedulerKind::Priority,
            "round_robin" => SchedulerKind::RoundRobin,
            "srtf" => SchedulerKind::Srtf,
            "mlfq" => SchedulerKind::Mlfq,
            "edf" => SchedulerKind::Edf,
            "fair" => SchedulerKind::FairShare,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SchedulerKind::Fcfs => "fcfs",
            SchedulerKind::Sjf => "sjf",
            SchedulerKind::Priority => "priority",
            SchedulerKind::RoundRobin => "round_robin",
            SchedulerKind::Srtf => "srtf",
            SchedulerKind::Mlfq => "mlfq",
            SchedulerKind::Edf => "edf",
            SchedulerKind::FairShare => "fair",
        }
    }

    /// Whether this policy uses quantum-based forced requeue (the
    /// `quantum_remaining` field is meaningful). Priority/SRTF/EDF preempt
    /// via `should_preempt`-style ranking instead, checked by the
    /// dispatcher's yield-condition (b) via `pick_next` alone.
    pub fn uses_quantum(&self) -> bool {
        matches!(self, SchedulerKind::RoundRobin | SchedulerKind::Mlfq)
    }
}

pub struct Scheduler {
    kind: SchedulerKind,
    ready: ReadyQueue,
    quantum: u32,
    mlfq: mlfq::MlfqState,
    edf: edf::EdfState,
    fair: fair_share::FairShareState,
}

impl Scheduler {
    pub fn new(kind: SchedulerKind, quantum: u32) -> Self {
        Scheduler {
            kind,
            ready: ReadyQueue::new(),
            quantum,
            mlfq: mlfq::MlfqState::new(),
            edf: edf::EdfState::new(),
            fair: fair_share::FairShareState::new(),
        }
    }

    pub fn kind(&self) -> SchedulerKind {
        self.kind
    }

    pub fn ready(&self) -> &ReadyQueue {
        &self.ready
    }

    /// MLFQ level of a tracked pid (diagnostic accessor; other policies
    /// have no notion of "level" and always return `None`).
    pub fn mlfq_level(&self, pid: Pid) -> Option<u8> {
        match self.kind {
            SchedulerKind::Mlfq => self.mlfq.level_of(pid),
            _ => None,
        }
    }

    /// Every currently non-terminated pid this policy knows about,
    /// regardless of which internal structure holds it (the shared
    /// `ready` queue for every policy but MLFQ, whose three level queues
    /// are private). Used by the dispatcher's waiting-time bookkeeping.
    pub fn all_ready_pids(&self, processes: &HashMap<Pid, ProcessRecord>) -> Vec<Pid> {
        match self.kind {
            SchedulerKind::Mlfq => self.mlfq.all_pids(processes),
            _ => self.ready.iter().filter(|pid| processes.contains_key(pid)).collect(),
        }
    }

    /// The quantum a freshly arriving (or freshly demoted, for MLFQ)
    /// process should start with.
    pub fn initial_quantum(&self) -> u32 {
        match self.kind {
            SchedulerKind::RoundRobin => self.quantum,
            SchedulerKind::Mlfq => LEVEL_QUANTA[0],
            _ => 0,
        }
    }

    /// Called once per process, at registration. Default: append to the
    /// shared ready structure; MLFQ instead enters its own L0 queue.
    pub fn on_arrival(&mut self, pid: Pid) {
        match self.kind {
            SchedulerKind::Mlfq => self.mlfq.on_arrival(pid),
            _ => self.ready.push_back(pid),
        }
    }

    /// Removes a terminated pid from whichever structure the active
    /// policy keeps it in.
    pub fn on_terminate(&mut self, pid: Pid) {
        match self.kind {
            SchedulerKind::Mlfq => self.mlfq.remove(pid),
            _ => {
                self.ready.remove(pid);
            }
        }
    }

    pub fn pick_next(
        &mut self,
        processes: &HashMap<Pid, ProcessRecord>,
        last_dispatched: Option<Pid>,
        clock: u32,
    ) -> Option<Pid> {
        match self.kind {
            SchedulerKind::Fcfs => fcfs::pick_next(&self.ready),
            SchedulerKind::Sjf => sjf::pick_next(&self.ready, processes, last_dispatched),
            SchedulerKind::Priority => priority::pick_next(&self.ready, processes),
            SchedulerKind::RoundRobin => round_robin::pick_next(&self.ready),
            SchedulerKind::Srtf => srtf::pick_next(&self.ready, processes, last_dispatched),
            SchedulerKind::Mlfq => self.mlfq.pick_next(processes),
            SchedulerKind::Edf => self.edf.pick_next(&self.ready, processes, clock),
            SchedulerKind::FairShare => self.fair.pick_next(&self.ready, processes),
        }
    }

    /// Diagnostic hook exposed for invariants 7/8; not consulted by the
    /// dispatcher's control flow (`pick_next` alone reproduces "keep
    /// running unless a better candidate exists" for every policy here).
    pub fn should_preempt(
        &self,
        processes: &HashMap<Pid, ProcessRecord>,
        running: Pid,
    ) -> bool {
        match self.kind {
            SchedulerKind::Priority => priority::should_preempt(&self.ready, processes, running),
            SchedulerKind::Srtf => srtf::should_preempt(&self.ready, processes, running),
            _ => false,
        }
    }

    /// Round-Robin/MLFQ quantum expiry: remove the pid from its current
    /// position and requeue it at the (possibly demoted) tail.
    pub fn requeue_after_quantum_expiry(
        &mut self,
        pid: Pid,
        processes: &mut HashMap<Pid, ProcessRecord>,
    ) {
        match self.kind {
            SchedulerKind::RoundRobin => {
                self.ready.move_to_back(pid);
                if let Some(p) = processes.get_mut(&pid) {
                    p.quantum_remaining = self.quantum;
                }
            }
            SchedulerKind::Mlfq => {
                let new_quantum = self.mlfq.demote(pid);
                if let Some(p) = processes.get_mut(&pid) {
                    p.quantum_remaining = new_quantum;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_cli_name() {
        for s in [
            "fcfs",
            "sjf",
            "priority",
            "round_robin",
            "srtf",
            "mlfq",
            "edf",
            "fair",
        ] {
            assert!(SchedulerKind::parse(s).is_some());
        }
        assert!(SchedulerKind::parse("bogus").is_none());
    }

    #[test]
    fn round_trips_through_name() {
        for s in ["fcfs", "round_robin", "mlfq", "fair"] {
            assert_eq!(SchedulerKind::parse(s).unwrap().name(), s);
        }
    }
}
