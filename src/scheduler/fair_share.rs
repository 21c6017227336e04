use std::collections::HashMap;

use crate::process::{Pid, ProcessRecord};
use crate::ready_queue::ReadyQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Cpu,
    Io,
    Other,
}

impl Group {
    /// First-match-wins substring classification, mirroring the burst
    /// model's own name-keyed table.
    pub fn of(name: &str) -> Self {
        if name.contains("cpu_bound") {
            Group::Cpu
        } else if name.contains("io_bound") {
            Group::Io
        } else {
            Group::Other
        }
    }
}

pub struct FairShareState {
    usage: HashMap<Group, u32>,
}

impl FairShareState {
    pub fn new() -> Self {
        let mut usage = HashMap::new();
        usage.insert(Group::Cpu, 0);
        usage.insert(Group::Io, 0);
        usage.insert(Group::Other, 0);
        FairShareState { usage }
    }

    #[cfg(test)]
    pub fn usage(&self, group: Group) -> u32 {
        self.usage.get(&group).copied().unwrap_or(0)
    }

    /// Selects the least-used group with any Ready member, then the lowest
    /// pid within it, incrementing that group's usage counter on
    /// selection. Falls back to plain FCFS ordering if, somehow, no group
    /// classification finds a member (every name always falls into some
    /// group, so this is defensive rather than reachable in practice).
    pub fn pick_next(
        &mut self,
        ready: &ReadyQueue,
        processes: &HashMap<Pid, ProcessRecord>,
    ) -> Option<Pid> {
        let mut by_group: HashMap<Group, Vec<Pid>> = HashMap::new();
        for pid in ready.iter() {
            if let Some(p) = processes.get(&pid) {
                by_group.entry(Group::of(&p.name)).or_default().push(pid);
            }
        }

        let chosen_group = [Group::Cpu, Group::Io, Group::Other]
            .into_iter()
            .filter(|g| by_group.get(g).is_some_and(|v| !v.is_empty()))
            .min_by_key(|g| self.usage.get(g).copied().unwrap_or(0));

        match chosen_group {
            Some(group) => {
                let pid = *by_group[&group].iter().min_by_key(|p| p.0)?;
                *self.usage.entry(group).or_insert(0) += 1;
                Some(pid)
            }
            None => ready.front(),
        }
    }
}
