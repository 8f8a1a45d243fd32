//! Errors of the program.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Everything that can go wrong outside of the argument parsing.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Sim(#[from] rlifesim_lib::Error),
    #[error("Unable to access {path:?}: {source}")]
    File { path: PathBuf, source: io::Error },
    #[error("Unknown file format: {0:?}. Please use .json, .yaml, .yml or .toml.")]
    Format(PathBuf),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid TOML: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("Unable to write TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Nothing can stop an unbounded run without the TUI. Please give a positive number of steps.")]
    Unbounded,
    #[error("The simulation thread panicked.")]
    Panicked,
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),
}
