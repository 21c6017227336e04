use std::collections::HashMap;

use crate::process::{Pid, ProcessRecord};
use crate::ready_queue::ReadyQueue;

/// Earliest-deadline-first. Deadlines are assigned lazily the first time a
/// pid is observed (on the scheduler's first `pick_next` call for existing
/// processes, or on a later arrival's first appearance), as explicit
/// per-policy state rather than the source's implicit
/// lazy-init-on-first-scheduler-call pattern.
pub struct EdfState {
    deadlines: HashMap<Pid, u32>,
}

impl EdfState {
    pub fn new() -> Self {
        EdfState {
            deadlines: HashMap::new(),
        }
    }

    pub fn pick_next(
        &mut self,
        ready: &ReadyQueue,
        processes: &HashMap<Pid, ProcessRecord>,
        clock: u32,
    ) -> Option<Pid> {
        for pid in ready.iter() {
            if let (false, Some(p)) = (self.deadlines.contains_key(&pid), processes.get(&pid)) {
                self.deadlines.insert(pid, clock + p.priority * 5);
            }
        }
        ready
            .iter()
            .filter(|pid| processes.contains_key(pid))
            .filter_map(|pid| self.deadlines.get(&pid).map(|&d| (pid, d)))
            .min_by_key(|(pid, deadline)| (*deadline, pid.0))
            .map(|(pid, _)| pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimRng;
    use crate::demos::ShortTask;

    fn record(pid: Pid, priority: u32) -> ProcessRecord {
        let mut rng = SimRng::from_seed(1);
        ProcessRecord::new(
            pid,
            "t".into(),
            Box::new(ShortTask::new()),
            Some(priority),
            0,
            &mut rng,
        )
    }

    #[test]
    fn assigns_deadlines_lazily_and_picks_earliest() {
        let mut ready = ReadyQueue::new();
        ready.push_back(Pid(1));
        ready.push_back(Pid(2));
        let mut procs = HashMap::new();
        procs.insert(Pid(1), record(Pid(1), 5)); // deadline 0 + 25 = 25
        procs.insert(Pid(2), record(Pid(2), 1)); // deadline 0 + 5 = 5
        let mut edf = EdfState::new();
        assert_eq!(edf.pick_next(&ready, &procs, 0), Some(Pid(2)));
    }
}
