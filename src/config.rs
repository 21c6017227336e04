//! Configuration assembly. CLI flags build a `SimConfig`; an optional
//! `--config <file>.toml` supplies defaults that CLI flags then override,
//! following `cli::config`'s `load_config`/`save_config` pair and
//! `oscamp-cli`'s `exercises.toml` loader.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::scheduler::SchedulerKind;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub scheduler: Option<String>,
    pub quantum: Option<i64>,
    pub time_slice: Option<i64>,
    pub visualize: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub programs: Vec<String>,
    pub priorities: Vec<Option<u32>>,
    pub scheduler: SchedulerKind,
    pub quantum: u32,
    pub time_slice: u32,
    pub visualize: bool,
    pub seed: u64,
}

impl SimConfig {
    pub fn validate(
        scheduler_str: &str,
        quantum: i64,
        time_slice: i64,
        programs: &[String],
    ) -> Result<(), ConfigError> {
        if SchedulerKind::parse(scheduler_str).is_none() {
            return Err(ConfigError::UnknownScheduler(scheduler_str.to_string()));
        }
        if quantum < 1 {
            return Err(ConfigError::NonPositiveQuantum(quantum));
        }
        if time_slice < 1 {
            return Err(ConfigError::NonPositiveTimeSlice(time_slice));
        }
        if programs.is_empty() {
            return Err(ConfigError::NoPrograms);
        }
        Ok(())
    }
}

/// Loads a `FileConfig` from disk. A missing file is not an error at this
/// layer — the caller only invokes this when `--config` is explicitly
/// given, so an explicit path that can't be read is a real `ConfigError`.
pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Layers CLI-supplied overrides on top of an optional file config. `None`
/// CLI fields fall back to the file's value, then to the hard-coded
/// default.
pub struct Overrides {
    pub scheduler: Option<String>,
    pub quantum: Option<i64>,
    pub time_slice: Option<i64>,
    pub visualize: bool,
    pub config_path: Option<PathBuf>,
    pub programs: Vec<String>,
    pub priorities: Vec<Option<u32>>,
    pub seed: u64,
}

pub fn assemble(overrides: Overrides) -> Result<SimConfig, ConfigError> {
    let file_cfg = match &overrides.config_path {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };

    let scheduler_str = overrides
        .scheduler
        .or(file_cfg.scheduler)
        .unwrap_or_else(|| "fcfs".to_string());
    let quantum = overrides.quantum.or(file_cfg.quantum).unwrap_or(5);
    let time_slice = overrides.time_slice.or(file_cfg.time_slice).unwrap_or(1);
    let visualize = overrides.visualize || file_cfg.visualize.unwrap_or(false);

    SimConfig::validate(&scheduler_str, quantum, time_slice, &overrides.programs)?;

    Ok(SimConfig {
        programs: overrides.programs,
        priorities: overrides.priorities,
        scheduler: SchedulerKind::parse(&scheduler_str).expect("validated above"),
        quantum: quantum as u32,
        time_slice: time_slice as u32,
        visualize,
        seed: overrides.seed,
    })
}
