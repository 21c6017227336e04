//! Task loader. There is no language-level plugin loading here; a
//! "loadable program" resolves a CLI-supplied identifier against the
//! built-in demo registry by file stem.

use std::path::Path;

use crate::demos::{CpuBound, Fibonacci, HelloWorld, HighPriorityTask, IoBound, ShortTask};
use crate::error::LoadError;
use crate::task::Task;

/// Resolves a program identifier (bare name or path) to a boxed `Task` and
/// its display name. Loader failures are reported by the caller and the
/// program is skipped; they never abort the simulator.
pub fn load(identifier: &str) -> Result<(String, Box<dyn Task>), LoadError> {
    let stem = Path::new(identifier)
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| LoadError::InvalidIdentifier(Path::new(identifier).to_path_buf()))?;

    let task: Box<dyn Task> = match stem {
        "hello_world" | "hello" => Box::new(HelloWorld::new()),
        "short_task" => Box::new(ShortTask::new()),
        "cpu_bound" => Box::new(CpuBound::new()),
        "io_bound" => Box::new(IoBound::new()),
        "high_priority_task" => Box::new(HighPriorityTask::new()),
        "fibonacci" => Box::new(Fibonacci::new()),
        other => return Err(LoadError::NotFound(other.to_string())),
    };

    Ok((stem.to_string(), task))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_registry_entry() {
        for name in [
            "hello_world",
            "short_task",
            "cpu_bound",
            "io_bound",
            "high_priority_task",
            "fibonacci",
        ] {
            assert!(load(name).is_ok(), "{name} should resolve");
        }
    }

    #[test]
    fn resolves_by_path_stem() {
        let (name, _) = load("/usr/local/programs/short_task.py").unwrap();
        assert_eq!(name, "short_task");
    }

    #[test]
    fn unknown_program_is_load_error() {
        assert!(matches!(load("does_not_exist"), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn hello_alias_resolves_to_hello_world() {
        let (name, _) = load("hello").unwrap();
        assert_eq!(name, "hello");
    }
}
