//! Data acquisition: synthetic generation or CSV load.

pub mod generator;
pub mod loader;
pub mod roster;

use crate::error::DataError;
use crate::models::CallRecord;
use generator::GeneratorSettings;
use loader::LoadOptions;
use std::fmt;
use std::path::PathBuf;

/// Where the session's table comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    Synthetic(GeneratorSettings),
    Csv { path: PathBuf, options: LoadOptions },
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Synthetic(settings) => write!(
                f,
                "synthetic ({} rows, seed {})",
                settings.rows, settings.seed
            ),
            DataSource::Csv { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

impl DataSource {
    /// Build the table once. The result is read-only for the rest of the session.
    pub fn acquire(&self) -> Result<Vec<CallRecord>, DataError> {
        match self {
            DataSource::Synthetic(settings) => generator::generate(settings),
            DataSource::Csv { path, options } => {
                loader::load_csv(path, *options).map(|table| table.records)
            }
        }
    }
}
