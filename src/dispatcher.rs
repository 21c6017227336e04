//! The run loop. Follows `hypervisor::scheduler::VmScheduler::schedule()`'s
//! run-queue bookkeeping, generalized from multi-threaded hypervisor
//! dispatch (locks, atomics) to a single-threaded, strictly sequential
//! model — this struct owns its `HashMap<Pid, ProcessRecord>` and
//! `Scheduler` directly, with no synchronization.

use std::collections::HashMap;

use crate::clock::{BurstModel, SimRng};
use crate::process::{Pid, ProcessRecord, ProcessState, StartTime};
use crate::scheduler::Scheduler;
use crate::task::{Step, Task};

pub struct Dispatcher {
    processes: HashMap<Pid, ProcessRecord>,
    terminated: HashMap<Pid, ProcessRecord>,
    terminated_order: Vec<Pid>,
    scheduler: Scheduler,
    clock: u32,
    time_slice: u32,
    /// The most recently chosen pid. Deliberately **not** cleared on
    /// termination — see `finish_termination` for why, and `DESIGN.md`
    /// for the full resolution.
    last_dispatched: Option<Pid>,
    context_switches: u32,
    next_pid: u32,
    rng: SimRng,
    burst_model: Box<dyn BurstModel>,
}

impl Dispatcher {
    pub fn new(scheduler: Scheduler, time_slice: u32, seed: u64, burst_model: Box<dyn BurstModel>) -> Self {
        Dispatcher {
            processes: HashMap::new(),
            terminated: HashMap::new(),
            terminated_order: Vec::new(),
            scheduler,
            clock: 0,
            time_slice,
            last_dispatched: None,
            context_switches: 0,
            next_pid: 1,
            rng: SimRng::from_seed(seed),
            burst_model,
        }
    }

    pub fn register(&mut self, name: String, task: Box<dyn Task>, priority: Option<u32>) -> Pid {
        let pid = Pid(self.next_pid);
        self.next_pid += 1;
        let mut record = ProcessRecord::new(pid, name, task, priority, self.clock, &mut self.rng);
        record.quantum_remaining = self.scheduler.initial_quantum();
        self.processes.insert(pid, record);
        self.scheduler.on_arrival(pid);
        log::info!("registered pid {pid} at clock {}", self.clock);
        pid
    }

    pub fn clock(&self) -> u32 {
        self.clock
    }

    pub fn context_switches(&self) -> u32 {
        self.context_switches
    }

    pub fn terminated(&self) -> &HashMap<Pid, ProcessRecord> {
        &self.terminated
    }

    pub fn terminated_order(&self) -> &[Pid] {
        &self.terminated_order
    }

    pub fn scheduler_name(&self) -> &'static str {
        self.scheduler.kind().name()
    }

    pub fn last_dispatched(&self) -> Option<Pid> {
        self.last_dispatched
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn live_processes(&self) -> &HashMap<Pid, ProcessRecord> {
        &self.processes
    }

    /// Runs the full loop to completion (no Ready process remains).
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// One dispatcher iteration. Returns `false` when `pick_next` found
    /// nothing left to run.
    pub fn step(&mut self) -> bool {
        let chosen = match self
            .scheduler
            .pick_next(&self.processes, self.last_dispatched, self.clock)
        {
            Some(c) => c,
            None => return false,
        };

        if let Some(last) = self.last_dispatched {
            if last != chosen {
                self.context_switches += 1;
                log::trace!("context switch: pid {last} -> pid {chosen}");
            }
        }

        let ready_pids = self.scheduler.all_ready_pids(&self.processes);
        for pid in ready_pids {
            if pid != chosen {
                if let Some(p) = self.processes.get_mut(&pid) {
                    p.waiting_time += self.time_slice;
                }
            }
        }

        let clock = self.clock;
        let time_slice = self.time_slice;
        let uses_quantum = self.scheduler.kind().uses_quantum();

        let closing = {
            let record = self
                .processes
                .get_mut(&chosen)
                .expect("pick_next returned a registered pid");

            let entering_fresh =
                !matches!(record.state, ProcessState::Running) || self.last_dispatched != Some(chosen);
            if entering_fresh {
                if matches!(record.start_time, StartTime::Unset) {
                    record.start_time = StartTime::At(clock);
                }
                record.current_run_start = Some(clock);
                record.state = ProcessState::Running;
                if record.current_burst == 0 {
                    record.current_burst = self.burst_model.sample(&mut self.rng, &record.name);
                }
            }

            record.current_slice += time_slice;
            record.current_burst = record.current_burst.saturating_sub(time_slice);
            let quantum_expired = if uses_quantum {
                record.quantum_remaining = record.quantum_remaining.saturating_sub(time_slice);
                record.quantum_remaining == 0
            } else {
                false
            };
            let burst_exhausted = record.current_burst == 0;

            if !burst_exhausted && !quantum_expired {
                None
            } else {
                let seg_start = record.current_run_start.take().unwrap_or(clock);
                let seg_end = clock + time_slice;
                record.run_history.push((seg_start, seg_end));
                Some((burst_exhausted, quantum_expired, seg_end))
            }
        };

        self.last_dispatched = Some(chosen);

        match closing {
            None => {
                self.clock += time_slice;
                self.maybe_emit_periodic_status();
                true
            }
            Some((burst_exhausted, quantum_expired, seg_end)) => {
                if burst_exhausted {
                    self.advance_task(chosen, clock, seg_end);
                }
                if quantum_expired {
                    if self.processes.contains_key(&chosen) {
                        println!("[Clock:{clock}] pid {chosen} quantum expired, requeued");
                        self.scheduler
                            .requeue_after_quantum_expiry(chosen, &mut self.processes);
                        if let Some(p) = self.processes.get_mut(&chosen) {
                            p.state = ProcessState::Ready;
                        }
                    }
                }
                self.clock += time_slice;
                self.maybe_emit_periodic_status();
                true
            }
        }
    }

    fn advance_task(&mut self, chosen: Pid, clock: u32, seg_end: u32) {
        let (pid_name, arrival_time) = {
            let record = self.processes.get(&chosen).expect("chosen pid must exist");
            (record.name.clone(), record.arrival_time)
        };

        let started = std::time::Instant::now();
        let step_result = self
            .processes
            .get_mut(&chosen)
            .expect("chosen pid must exist")
            .task
            .step();
        let elapsed_us = started.elapsed().as_micros() as u64;
        if let Some(record) = self.processes.get_mut(&chosen) {
            record.cpu_time_us += elapsed_us;
        }

        match step_result {
            Ok(Step::Yield(value)) => {
                println!("[Clock:{clock}] pid {chosen} ({pid_name}) yield: {value}");
                let record = self.processes.get_mut(&chosen).expect("chosen pid must exist");
                record.executed_steps += 1;
                record.state = ProcessState::Ready;
                record.current_burst = 0;
            }
            Ok(Step::Done(value)) => {
                println!("[Clock:{clock}] pid {chosen} ({pid_name}) terminated, return value: {value:?}");
                {
                    let record = self.processes.get_mut(&chosen).expect("chosen pid must exist");
                    record.state = ProcessState::Terminated;
                    record.end_time = Some(seg_end);
                    record.turnaround_time = Some(seg_end - arrival_time);
                    record.return_value = value;
                }
                self.finish_termination(chosen);
            }
            Err(e) => {
                log::error!("{e}");
                {
                    let record = self.processes.get_mut(&chosen).expect("chosen pid must exist");
                    record.state = ProcessState::Terminated;
                    record.end_time = Some(seg_end);
                    record.turnaround_time = Some(seg_end - arrival_time);
                    record.return_value = None;
                }
                self.finish_termination(chosen);
            }
        }
    }

    /// Moves a just-terminated process out of the live table. Intentionally
    /// leaves `last_dispatched` pointing at `pid` rather than clearing it:
    /// clearing it would make the context-switch guard ("last-running pid
    /// is not None") silently skip the very next switch, undercounting the
    /// transition from a just-terminated process to whatever is dispatched
    /// next. `last_dispatched` is kept purely as a historical marker for
    /// switch detection; it is never dereferenced into `self.processes`
    /// after this point.
    fn finish_termination(&mut self, pid: Pid) {
        self.scheduler.on_terminate(pid);
        if let Some(record) = self.processes.remove(&pid) {
            self.terminated_order.push(pid);
            self.terminated.insert(pid, record);
        }
    }

    fn maybe_emit_periodic_status(&self) {
        if self.clock > 0 && self.clock % 20 == 0 {
            println!(
                "[Clock:{}] status: {} running, {} terminated, {} context switches",
                self.clock,
                self.processes.len(),
                self.terminated.len(),
                self.context_switches
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedBurstModel;
    use crate::demos::{HelloWorld, ShortTask};
    use crate::scheduler::SchedulerKind;

    fn fcfs_dispatcher(time_slice: u32) -> Dispatcher {
        Dispatcher::new(
            Scheduler::new(SchedulerKind::Fcfs, 5),
            time_slice,
            1,
            Box::new(FixedBurstModel(1)),
        )
    }

    #[test]
    fn single_process_runs_to_completion_with_no_context_switches() {
        let mut d = fcfs_dispatcher(1);
        d.register("hello".to_string(), Box::new(HelloWorld::new()), Some(1));
        d.run();
        assert_eq!(d.clock(), 11);
        assert_eq!(d.context_switches(), 0);
        let rec = d.terminated().values().next().unwrap();
        assert_eq!(rec.return_value, Some("Final result: 45".to_string()));
    }

    #[test]
    fn second_process_starts_only_after_the_first_terminates_under_fcfs() {
        let mut d = fcfs_dispatcher(1);
        d.register("hello".to_string(), Box::new(HelloWorld::new()), Some(1));
        d.register("short_task".to_string(), Box::new(ShortTask::new()), Some(1));
        d.run();
        assert_eq!(d.context_switches(), 1);
        assert_eq!(d.terminated_order().len(), 2);
        let first = d.terminated().get(&d.terminated_order()[0]).unwrap();
        assert_eq!(first.name, "hello");
        let second = d.terminated().get(&d.terminated_order()[1]).unwrap();
        assert_eq!(second.name, "short_task");
    }

    #[test]
    fn waiting_time_plus_run_history_equals_turnaround() {
        let mut d = fcfs_dispatcher(1);
        d.register("hello".to_string(), Box::new(HelloWorld::new()), Some(1));
        d.register("short_task".to_string(), Box::new(ShortTask::new()), Some(1));
        d.run();
        for record in d.terminated().values() {
            let run_total: u32 = record.run_history.iter().map(|(s, e)| e - s).sum();
            let turnaround = record.turnaround_time.unwrap();
            assert_eq!(record.waiting_time + run_total, turnaround);
        }
    }

    struct EndlessTask;
    impl Task for EndlessTask {
        fn step(&mut self) -> Result<Step, crate::task::TaskError> {
            Ok(Step::Yield("tick".to_string()))
        }
    }

    struct OneShotTask;
    impl Task for OneShotTask {
        fn step(&mut self) -> Result<Step, crate::task::TaskError> {
            Ok(Step::Done(None))
        }
    }

    /// A process preempted while its burst is only partway spent must resume
    /// into a *new* run-history segment anchored at the resume tick, not the
    /// tick its very first segment began. Without the `last_dispatched`
    /// disjunct in `entering_fresh`, the resumed process's `state` is still
    /// `Running` from before the preemption, so the check is skipped and
    /// `current_run_start` keeps pointing at the original (now stale) start,
    /// stretching the eventual segment across the ticks the preempting
    /// process actually ran.
    #[test]
    fn resumed_process_gets_a_fresh_run_history_segment_anchored_at_the_resume_tick() {
        let mut d = Dispatcher::new(
            Scheduler::new(SchedulerKind::Srtf, 5),
            1,
            1,
            Box::new(FixedBurstModel(1)),
        );

        let a = d.register("long".to_string(), Box::new(EndlessTask), Some(1));
        d.processes.get_mut(&a).unwrap().current_burst = 5;

        assert!(d.step()); // clock 0->1: a dispatched, burst 5->4.
        assert_eq!(d.last_dispatched(), Some(a));

        let b = d.register("short".to_string(), Box::new(OneShotTask), Some(1));
        {
            let rec = d.processes.get_mut(&b).unwrap();
            rec.current_burst = 2;
            rec.estimated_burst_time = 2;
        }

        assert!(d.step()); // clock 1->2: b's remaining (2) beats a's (4), preempts.
        assert_eq!(d.last_dispatched(), Some(b));
        assert!(matches!(d.processes.get(&a).unwrap().state, ProcessState::Running));

        assert!(d.step()); // clock 2->3: b's burst exhausts and it terminates.
        assert!(d.terminated().contains_key(&b));
        let b_rec = d.terminated().get(&b).unwrap();
        assert_eq!(b_rec.run_history, vec![(1, 3)]);
        let b_run_total: u32 = b_rec.run_history.iter().map(|(s, e)| e - s).sum();
        assert_eq!(b_rec.waiting_time + b_run_total, b_rec.turnaround_time.unwrap());

        assert!(d.step()); // clock 3->4: a resumes after being preempted mid-burst.
        assert_eq!(d.last_dispatched(), Some(a));
        assert_eq!(d.processes.get(&a).unwrap().current_run_start, Some(3));

        assert!(d.step()); // clock 4->5
        assert!(d.step()); // clock 5->6
        assert!(d.step()); // clock 6->7: a's burst exhausts, closing its second segment.
        let a_rec = d.processes.get(&a).unwrap();
        assert_eq!(a_rec.run_history, vec![(3, 7)]);
    }
}
