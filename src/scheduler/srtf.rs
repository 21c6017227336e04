use std::collections::HashMap;

use crate::process::{Pid, ProcessRecord};
use crate::ready_queue::ReadyQueue;

/// Preemptive shortest-remaining-time-first. Picks the minimum
/// `remaining_time()` in the pool; switches away from the last-dispatched
/// pid only when the challenger is *strictly* smaller, otherwise (including
/// ties) keeps the current one running.
pub fn pick_next(
    ready: &ReadyQueue,
    processes: &HashMap<Pid, ProcessRecord>,
    last_dispatched: Option<Pid>,
) -> Option<Pid> {
    let challenger = ready
        .iter()
        .filter_map(|pid| processes.get(&pid).map(|p| (pid, p.remaining_time())))
        .min_by_key(|(pid, remaining)| (*remaining, pid.0))
        .map(|(pid, _)| pid);

    // A terminated last-dispatched pid is already absent from `processes`
    // (the dispatcher removes it on termination), so `last_dispatched`
    // resolving to `None` here is exactly the "no running process" case.
    match (last_dispatched.and_then(|lr| processes.get(&lr).map(|p| (lr, p))), challenger) {
        (Some((lr, lr_rec)), Some(c)) => {
            let lr_remaining = lr_rec.remaining_time();
            let c_remaining = processes.get(&c).map(|p| p.remaining_time()).unwrap_or(u32::MAX);
            if c_remaining < lr_remaining {
                Some(c)
            } else {
                Some(lr)
            }
        }
        (None, c) => c,
        (Some((lr, _)), None) => Some(lr),
    }
}

pub fn should_preempt(
    ready: &ReadyQueue,
    processes: &HashMap<Pid, ProcessRecord>,
    running: Pid,
) -> bool {
    let running_remaining = match processes.get(&running) {
        Some(p) => p.remaining_time(),
        None => return false,
    };
    ready
        .iter()
        .filter(|&pid| pid != running)
        .filter_map(|pid| processes.get(&pid))
        .any(|p| p.remaining_time() < running_remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimRng;
    use crate::demos::ShortTask;

    fn record(pid: Pid, current_burst: u32, estimated: u32) -> ProcessRecord {
        let mut rng = SimRng::from_seed(1);
        let mut r = ProcessRecord::new(
            pid,
            "t".into(),
            Box::new(ShortTask::new()),
            Some(1),
            0,
            &mut rng,
        );
        r.current_burst = current_burst;
        r.estimated_burst_time = estimated;
        r
    }

    #[test]
    fn ties_keep_the_running_process() {
        let mut ready = ReadyQueue::new();
        ready.push_back(Pid(1));
        ready.push_back(Pid(2));
        let mut procs = HashMap::new();
        procs.insert(Pid(1), record(Pid(1), 4, 4));
        procs.insert(Pid(2), record(Pid(2), 4, 4));
        assert_eq!(pick_next(&ready, &procs, Some(Pid(1))), Some(Pid(1)));
    }

    #[test]
    fn strictly_shorter_challenger_preempts() {
        let mut ready = ReadyQueue::new();
        ready.push_back(Pid(1));
        ready.push_back(Pid(2));
        let mut procs = HashMap::new();
        procs.insert(Pid(1), record(Pid(1), 9, 9));
        procs.insert(Pid(2), record(Pid(2), 2, 2));
        assert_eq!(pick_next(&ready, &procs, Some(Pid(1))), Some(Pid(2)));
    }
}
