use std::collections::{HashMap, VecDeque};

use crate::process::{Pid, ProcessRecord};

/// Quantum per level, L0 (highest) .. L2. Priority boosting (periodically
/// promoting starved low-level processes back to L0) is intentionally not
/// implemented.
pub const LEVEL_QUANTA: [u32; 3] = [1, 2, 4];
const MAX_LEVEL: u8 = 2;

/// Three FIFO level queues plus a side table recording each pid's current
/// level. Kept as its own policy-private state bag rather than stored on
/// `ProcessRecord`, since no other policy needs a notion of "level".
pub struct MlfqState {
    levels: [VecDeque<Pid>; 3],
    level_of: HashMap<Pid, u8>,
}

impl MlfqState {
    pub fn new() -> Self {
        MlfqState {
            levels: [VecDeque::new(), VecDeque::new(), VecDeque::new()],
            level_of: HashMap::new(),
        }
    }

    /// Every newly arriving process enters L0.
    pub fn on_arrival(&mut self, pid: Pid) {
        self.levels[0].push_back(pid);
        self.level_of.insert(pid, 0);
    }

    pub fn remove(&mut self, pid: Pid) {
        if let Some(level) = self.level_of.remove(&pid) {
            if let Some(idx) = self.levels[level as usize].iter().position(|&p| p == pid) {
                self.levels[level as usize].remove(idx);
            }
        }
    }

    /// Scans L0, then L1, then L2, returning the head Ready pid; stale
    /// (terminated) entries encountered along the way are discarded.
    pub fn pick_next(&mut self, processes: &HashMap<Pid, ProcessRecord>) -> Option<Pid> {
        for level in self.levels.iter_mut() {
            while let Some(&front) = level.front() {
                if processes.contains_key(&front) {
                    return Some(front);
                }
                level.pop_front();
            }
        }
        None
    }

    /// Demotes a pid one level (clamped at L2), moving it to the tail of
    /// its new level, and returns that level's quantum.
    pub fn demote(&mut self, pid: Pid) -> u32 {
        let current = self.level_of.get(&pid).copied().unwrap_or(0);
        if let Some(idx) = self.levels[current as usize].iter().position(|&p| p == pid) {
            self.levels[current as usize].remove(idx);
        }
        let new_level = (current + 1).min(MAX_LEVEL);
        self.levels[new_level as usize].push_back(pid);
        self.level_of.insert(pid, new_level);
        LEVEL_QUANTA[new_level as usize]
    }

    pub fn all_pids(&self, processes: &HashMap<Pid, ProcessRecord>) -> Vec<Pid> {
        self.levels
            .iter()
            .flat_map(|level| level.iter().copied())
            .filter(|pid| processes.contains_key(pid))
            .collect()
    }

    /// Current level of a tracked pid, for diagnostics/tests; `None` once
    /// the pid has terminated and been removed.
    pub fn level_of(&self, pid: Pid) -> Option<u8> {
        self.level_of.get(&pid).copied()
    }
}
