//! The ready structure: a FIFO sequence of pids inspected by every policy.
//!
//! Implementation note, recorded in full in `DESIGN.md`: this structure
//! holds every registered, not-yet-terminated pid, not strictly only
//! `state == Ready` pids at every instant. A pid's `state` flips to
//! `Running` for the duration of its own dispatch without leaving this
//! queue; only termination removes a pid, and only Round-Robin/MLFQ
//! quantum expiry reorders one. This is what makes FCFS/SJF/Round-Robin
//! "keep running the same process across its own yields" fall out of
//! `pick_next` alone, with no separate "sticky current process" shortcut
//! in the dispatcher — exactly how the distilled source's own
//! `ready_queue` behaves (entries are removed only on termination or
//! explicit Round-Robin demotion-requeue, never on an ordinary yield).

use std::collections::VecDeque;

use crate::process::Pid;

#[derive(Debug, Default)]
pub struct ReadyQueue(VecDeque<Pid>);

impl ReadyQueue {
    pub fn new() -> Self {
        ReadyQueue(VecDeque::new())
    }

    pub fn push_back(&mut self, pid: Pid) {
        self.0.push_back(pid);
    }

    pub fn front(&self) -> Option<Pid> {
        self.0.front().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Removes a pid wherever it sits. Used for termination and for
    /// Round-Robin/MLFQ requeue (remove, then `push_back` to the new
    /// position).
    pub fn remove(&mut self, pid: Pid) -> bool {
        if let Some(idx) = self.0.iter().position(|&p| p == pid) {
            self.0.remove(idx);
            true
        } else {
            false
        }
    }

    pub fn move_to_back(&mut self, pid: Pid) {
        if self.remove(pid) {
            self.0.push_back(pid);
        }
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.0.iter().any(|&p| p == pid)
    }
}
