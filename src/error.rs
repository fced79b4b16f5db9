//! Setup failures
//!
//! Everything here is raised before or between rounds. Mid-round misuse
//! (re-triggering an attack, hitting a dead enemy) is a silent no-op instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot place {requested} enemies: only {available} free cells")]
    TooManyEnemies { requested: usize, available: usize },
    #[error("spawn grid has no free cells")]
    EmptyGrid,
    #[error("sheet layout must have non-zero columns and rows (got {columns}x{rows})")]
    InvalidSheet { columns: u32, rows: u32 },
    #[error("unknown enemy archetype '{0}'")]
    UnknownArchetype(String),
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
