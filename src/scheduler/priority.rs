use std::collections::HashMap;

use crate::process::{Pid, ProcessRecord};
use crate::ready_queue::ReadyQueue;

/// Preemptive priority scheduling: lowest priority number wins, ties by
/// pid. Re-scanning the whole pool every dispatch reproduces "keep
/// running while still lowest-priority" for free.
pub fn pick_next(ready: &ReadyQueue, processes: &HashMap<Pid, ProcessRecord>) -> Option<Pid> {
    ready
        .iter()
        .filter_map(|pid| processes.get(&pid).map(|p| (pid, p.priority)))
        .min_by_key(|(pid, priority)| (*priority, pid.0))
        .map(|(pid, _)| pid)
}

/// True iff some other ready pid strictly outranks (lower number than)
/// `running`'s priority.
pub fn should_preempt(
    ready: &ReadyQueue,
    processes: &HashMap<Pid, ProcessRecord>,
    running: Pid,
) -> bool {
    let running_priority = match processes.get(&running) {
        Some(p) => p.priority,
        None => return false,
    };
    ready
        .iter()
        .filter(|&pid| pid != running)
        .filter_map(|pid| processes.get(&pid))
        .any(|p| p.priority < running_priority)
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
    fn lowest_priority_number_wins() {
        let mut ready = ReadyQueue::new();
        ready.push_back(Pid(1));
        ready.push_back(Pid(2));
        let mut procs = HashMap::new();
        procs.insert(Pid(1), record(Pid(1), 5));
        procs.insert(Pid(2), record(Pid(2), 1));
        assert_eq!(pick_next(&ready, &procs), Some(Pid(2)));
        assert!(should_preempt(&ready, &procs, Pid(1)));
        assert!(!should_preempt(&ready, &procs, Pid(2)));
    }
}
