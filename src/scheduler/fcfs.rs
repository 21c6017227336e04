use crate::process::Pid;
use crate::ready_queue::ReadyQueue;

/// First-come, first-served: always the head of the ready structure.
/// Non-preemptive; since a plain yield never reorders the ready structure
/// (only termination and explicit Round-Robin/MLFQ requeue do), the head
/// naturally stays the same pid across its own repeated yields until it
/// terminates, with no special "sticky running process" logic needed in
/// the dispatcher.
pub fn pick_next(ready: &ReadyQueue) -> Option<Pid> {
    ready.front()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_head_and_nothing_when_empty() {
        let mut q = ReadyQueue::new();
        assert_eq!(pick_next(&q), None);
        q.push_back(Pid(1));
        q.push_back(Pid(2));
        assert_eq!(pick_next(&q), Some(Pid(1)));
    }
}
