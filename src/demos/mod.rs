//! Built-in cooperative demo programs, one `Task` state machine per program
//! in `original_source/os_sim/*.py`. They are this simulator's primary
//! payload — without them there is nothing to schedule. Each hand-rolled
//! state machine tracks its own loop counter rather than depending on any
//! language-level coroutine mechanism.

mod cpu_bound;
mod fibonacci;
mod hello_world;
mod high_priority_task;
mod io_bound;
mod short_task;

pub use cpu_bound::CpuBound;
pub use fibonacci::Fibonacci;
pub use hello_world::HelloWorld;
pub use high_priority_task::HighPriorityTask;
pub use io_bound::IoBound;
pub use short_task::ShortTask;
