//! The cooperative-task boundary. The dispatcher advances a task by
//! calling `step()` exactly once per burst exhaustion; nothing else in
//! this crate depends on how a task keeps its internal state.

/// One advancement of a cooperative task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The task produced an intermediate value and suspended itself.
    Yield(String),
    /// The task reached its terminal return. `step()` must not be called
    /// again after this.
    Done(Option<String>),
}

/// An unexpected failure while advancing a task. Built-in demo tasks never
/// produce this; the trait carries it so a misbehaving task cannot violate
/// dispatcher invariants silently.
#[derive(Debug, Clone, thiserror::Error)]
#[error("task `{name}` (pid {pid}) failed to advance: {reason}")]
pub struct TaskError {
    pub pid: u32,
    pub name: String,
    pub reason: String,
}

/// A cooperative program: a uniform iterator of yield events terminated by
/// a final return value.
pub trait Task {
    fn step(&mut self) -> Result<Step, TaskError>;
}
