use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "db-prefixer";
pub const ENV_PREFIX: &str = "DB_PREFIXER";
pub const DEFAULT_TABLE_PREFIX: &str = "wp_";

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("No database URL given, pass --database-url or set DB_PREFIXER_DATABASE_URL")]
    MissingDatabaseUrl,
    #[error("The {0} prefix is empty")]
    EmptyPrefix(&'static str),
    #[error("Prefix '{0}' can only contain numbers, letters, and underscores")]
    InvalidPrefix(String),
    #[error("Old and new prefix are both '{0}'")]
    SamePrefix(String),
}

/// Settings read from the config file and the environment.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub database_url: Option<String>,
    /// The prefix the schema currently uses
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
    #[serde(default)]
    pub allow_empty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            table_prefix: default_table_prefix(),
            allow_empty: false,
        }
    }
}

fn default_table_prefix() -> String {
    DEFAULT_TABLE_PREFIX.to_string()
}

/// Values given on the command line, taking precedence over [`Config`].
#[derive(Debug, Default)]
pub struct Overrides {
    pub old_prefix: Option<String>,
    pub new_prefix: String,
    pub database_url: Option<String>,
    pub allow_empty: bool,
}

/// Everything a run needs, validated.
#[derive(Debug, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub old_prefix: String,
    pub new_prefix: String,
    pub allow_empty: bool,
}

impl Config {
    /// Loads the config file, then layers `DB_PREFIXER_*` environment variables on top.
    ///
    /// Without an explicit `path`, `db-prefixer.toml` (or any other format the `config`
    /// crate recognises) in the working directory is read if it exists.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Merges command-line values over this config and validates the result.
    pub fn resolve(self, overrides: Overrides) -> Result<Settings, Error> {
        let old_prefix = overrides.old_prefix.unwrap_or(self.table_prefix);
        validate_prefix("old", &old_prefix)?;
        validate_prefix("new", &overrides.new_prefix)?;
        if old_prefix == overrides.new_prefix {
            return Err(Error::SamePrefix(old_prefix));
        }

        let database_url = overrides
            .database_url
            .or(self.database_url)
            .filter(|url| !url.is_empty())
            .ok_or(Error::MissingDatabaseUrl)?;

        Ok(Settings {
            database_url,
            old_prefix,
            new_prefix: overrides.new_prefix,
            allow_empty: overrides.allow_empty || self.allow_empty,
        })
    }
}

/// Accepts non-empty prefixes made of ASCII letters, digits and underscores.
pub fn validate_prefix(which: &'static str, prefix: &str) -> Result<(), Error> {
    if prefix.is_empty() {
        return Err(Error::EmptyPrefix(which));
    }
    if !prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(Error::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}
