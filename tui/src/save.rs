//! Reading and writing files.
//!
//! The format is chosen by the extension of the file:
//! `.json`, `.yaml` / `.yml` or `.toml`.

use crate::error::AppError;
use rlifesim_lib::{Config, History, HistorySer};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{fs, path::Path};

/// Supported file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Guesses the format from the extension.
    pub(crate) fn from_path(path: &Path) -> Result<Self, AppError> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml" | "yml") => Ok(Format::Yaml),
            Some("toml") => Ok(Format::Toml),
            _ => Err(AppError::Format(path.to_owned())),
        }
    }

    pub(crate) fn to_string<T: Serialize>(self, value: &T) -> Result<String, AppError> {
        Ok(match self {
            Format::Json => serde_json::to_string_pretty(value)?,
            Format::Yaml => serde_yaml::to_string(value)?,
            Format::Toml => toml::to_string(value)?,
        })
    }

    pub(crate) fn from_str<T: DeserializeOwned>(self, input: &str) -> Result<T, AppError> {
        Ok(match self {
            Format::Json => serde_json::from_str(input)?,
            Format::Yaml => serde_yaml::from_str(input)?,
            Format::Toml => toml::from_str(input)?,
        })
    }
}

/// A saved session: the rule and the recorded frames.
///
/// The rule is kept so that a replay shows the dying states properly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SaveFile {
    pub(crate) rule: String,
    pub(crate) history: HistorySer,
}

fn read<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let format = Format::from_path(path)?;
    let input = fs::read_to_string(path).map_err(|source| AppError::File {
        path: path.to_owned(),
        source,
    })?;
    format.from_str(&input)
}

fn write<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let output = Format::from_path(path)?.to_string(value)?;
    fs::write(path, output).map_err(|source| AppError::File {
        path: path.to_owned(),
        source,
    })
}

/// Reads a configuration file. Missing fields take their default values.
pub(crate) fn load_config(path: &Path) -> Result<Config, AppError> {
    read(path)
}

/// Reads a saved session, and returns the rule string and the history.
pub(crate) fn load_history(path: &Path) -> Result<(String, History), AppError> {
    let SaveFile { rule, history } = read(path)?;
    Ok((rule, history.history()?))
}

/// Saves a session.
pub(crate) fn save_history(path: &Path, rule: &str, history: &History) -> Result<(), AppError> {
    let save = SaveFile {
        rule: rule.to_owned(),
        history: history.ser(),
    };
    write(path, &save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlifesim_lib::{Cancel, Seeding};

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("dir/a.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.toml")).unwrap(), Format::Toml);
        assert!(matches!(
            Format::from_path(Path::new("a.txt")),
            Err(AppError::Format(_))
        ));
        assert!(Format::from_path(Path::new("json")).is_err());
    }

    #[test]
    fn session_in_every_format() {
        let mut simulator = Config::new(6, 5)
            .set_rule_string("345/2/4")
            .set_rng_seed(7)
            .simulator()
            .unwrap();
        let history = simulator.run(4, true, &Cancel::new()).unwrap().unwrap().clone();
        let save = SaveFile {
            rule: String::from("345/2/4"),
            history: history.ser(),
        };
        for format in [Format::Json, Format::Yaml, Format::Toml] {
            let text = format.to_string(&save).unwrap();
            let loaded: SaveFile = format.from_str(&text).unwrap();
            assert_eq!(loaded.rule, "345/2/4");
            assert_eq!(loaded.history.history().unwrap(), history);
        }
    }

    #[test]
    fn partial_config() {
        let config: Config = Format::Toml
            .from_str("rows = 20\nrule_string = \"/2/3\"\nseeding = \"Block\"\n")
            .unwrap();
        assert_eq!(config.rows, 20);
        assert_eq!(config.columns, 100);
        assert_eq!(config.rule_string, "/2/3");
        assert_eq!(config.seeding, Seeding::Block);

        let config: Config = Format::Json.from_str(r#"{"steps": -1}"#).unwrap();
        assert_eq!(config.steps, -1);
        assert!(config.record);
    }
}
