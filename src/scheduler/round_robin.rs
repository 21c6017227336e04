use crate::process::Pid;
use crate::ready_queue::ReadyQueue;

/// Non-preemptive within a quantum: same head-of-queue rule as FCFS. The
/// quantum-expiry requeue that distinguishes Round-Robin from FCFS is
/// handled by the dispatcher via `Scheduler::requeue_after_quantum_expiry`,
/// not here.
pub fn pick_next(ready: &ReadyQueue) -> Option<Pid> {
    ready.front()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_head() {
        let mut q = ReadyQueue::new();
        q.push_back(Pid(3));
        q.push_back(Pid(1));
        assert_eq!(pick_next(&q), Some(Pid(3)));
    }
}
