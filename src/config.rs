use crate::error::{LfResult, LineForgeError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub search: SearchParams,
    #[command(flatten)]
    #[serde(default)]
    pub data: DataPaths,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Diagnostics {
    Enabled,
    #[default]
    Disabled,
}

impl Diagnostics {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Diagnostics::Enabled)
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchParams {
    /// Stop after this many accepted swaps even if not converged
    #[arg(long)]
    pub max_passes: Option<usize>,

    /// Wall-clock budget for the search, in milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Dump the ranked candidate queue after every pass
    #[arg(long, default_value_t = Diagnostics::Disabled)]
    pub diagnostics: Diagnostics,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_passes: None,
            time_limit_ms: None,
            diagnostics: Diagnostics::Disabled,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataPaths {
    /// Two-row CSV: job identifiers, then their indices
    #[arg(long, default_value = "data/job_index.csv")]
    pub jobs: PathBuf,

    /// JxJ changeover cost matrix (row = from, column = to)
    #[arg(long, default_value = "data/changeover.csv")]
    pub changeover: PathBuf,

    /// Single-row CSV of processing times, by job index
    #[arg(long, default_value = "data/durations.csv")]
    pub durations: PathBuf,

    /// Single-row CSV of job identifiers in production order
    #[arg(long, default_value = "data/sequence.csv")]
    pub sequence: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            jobs: PathBuf::from("data/job_index.csv"),
            changeover: PathBuf::from("data/changeover.csv"),
            durations: PathBuf::from("data/durations.csv"),
            sequence: PathBuf::from("data/sequence.csv"),
        }
    }
}

impl DataPaths {
    /// The conventional file names inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            jobs: dir.join("job_index.csv"),
            changeover: dir.join("changeover.csv"),
            durations: dir.join("durations.csv"),
            sequence: dir.join("sequence.csv"),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LineForgeError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overlays every argument the user actually typed on the command line.
    /// Values that merely came from clap defaults leave `self` untouched.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(search.max_passes);
        update_if_present!(search.time_limit_ms);
        update_if_present!(search.diagnostics);

        update_if_present!(data.jobs);
        update_if_present!(data.changeover);
        update_if_present!(data.durations);
        update_if_present!(data.sequence);
    }
}
