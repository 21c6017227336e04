use std::collections::HashMap;

use crate::process::{Pid, ProcessRecord};
use crate::ready_queue::ReadyQueue;

/// Shortest-job-first, non-preemptive. If the last-dispatched pid has not
/// yet terminated, it is kept outright — an explicit "keep" clause, unlike
/// FCFS/Round-Robin, which get the same effect implicitly from
/// ready-structure ordering. Otherwise the shortest `estimated_burst_time`
/// among the pool wins, ties by pid.
pub fn pick_next(
    ready: &ReadyQueue,
    processes: &HashMap<Pid, ProcessRecord>,
    last_dispatched: Option<Pid>,
) -> Option<Pid> {
    if let Some(last) = last_dispatched {
        if let Some(p) = processes.get(&last) {
            if !p.is_terminated() {
                return Some(last);
            }
        }
    }
    ready
        .iter()
        .filter_map(|pid| processes.get(&pid).map(|p| (pid, p.estimated_burst_time)))
        .min_by_key(|(pid, burst)| (*burst, pid.0))
        .map(|(pid, _)| pid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::ShortTask;
    use crate::clock::SimRng;

    fn record(pid: Pid, burst: u32) -> ProcessRecord {
        let mut rng = SimRng::from_seed(1);
        let mut r = ProcessRecord::new(pid, "t".into(), Box::new(ShortTask::new()), Some(1), 0, &mut rng);
        r.estimated_burst_time = burst;
        r
    }

    #[test]
    fn keeps_last_dispatched_while_not_terminated() {
        let mut ready = ReadyQueue::new();
        ready.push_back(Pid(1));
        ready.push_back(Pid(2));
        let mut procs = HashMap::new();
        procs.insert(Pid(1), record(Pid(1), 9));
        procs.insert(Pid(2), record(Pid(2), 3));
        assert_eq!(pick_next(&ready, &procs, Some(Pid(1))), Some(Pid(1)));
    }

    #[test]
    fn picks_shortest_burst_when_no_current() {
        let mut ready = ReadyQueue::new();
        ready.push_back(Pid(1));
        ready.push_back(Pid(2));
        let mut procs = HashMap::new();
        procs.insert(Pid(1), record(Pid(1), 9));
        procs.insert(Pid(2), record(Pid(2), 3));
        assert_eq!(pick_next(&ready, &procs, None), Some(Pid(2)));
    }

    #[test]
    fn ties_break_by_smaller_pid() {
        let mut ready = ReadyQueue::new();
        ready.push_back(Pid(2));
        ready.push_back(Pid(1));
        let mut procs = HashMap::new();
        procs.insert(Pid(1), record(Pid(1), 5));
        procs.insert(Pid(2), record(Pid(2), 5));
        assert_eq!(pick_next(&ready, &procs, None), Some(Pid(1)));
    }
}
