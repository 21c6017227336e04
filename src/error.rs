//! Typed errors for the three non-task error kinds from the error handling
//! design: load failures, configuration failures, and renderer failures.
//! Task-step failures live next to the `Task` trait in `task.rs`.

use std::path::PathBuf;

/// A requested program could not be resolved to a built-in task.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("no built-in program matches `{0}`")]
    NotFound(String),

    #[error("program identifier `{0}` has no file stem")]
    InvalidIdentifier(PathBuf),
}

/// Configuration is invalid enough that the run loop must not start.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown scheduler `{0}`; expected one of fcfs, sjf, priority, round_robin, srtf, mlfq, edf, fair")]
    UnknownScheduler(String),

    #[error("time quantum must be >= 1, got {0}")]
    NonPositiveQuantum(i64),

    #[error("time slice must be >= 1, got {0}")]
    NonPositiveTimeSlice(i64),

    #[error("no programs were specified")]
    NoPrograms,

    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// The Gantt renderer failed; never fatal to the simulation itself.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no terminated processes to render")]
    NothingToRender,

    #[error("drawing backend failed: {0}")]
    Backend(String),

    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
