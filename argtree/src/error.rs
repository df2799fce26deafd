//! Error types

use std::path::PathBuf;

use thiserror::Error;

use crate::node::NodeId;

/// Failure reported by a [`TreeMutator`](crate::mutate::TreeMutator) when a
/// move request cannot be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("node {0} cannot hold children")]
    InvalidDestination(NodeId),
    #[error("destination index {index} is out of range (at most {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("moving node {0} would place it inside its own subtree")]
    WouldCreateCycle(NodeId),
    #[error("nothing to move")]
    Empty,
}

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Logging setup error type.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("a logger is already installed")]
    AlreadyInitialized(#[from] log::SetLoggerError),
    #[error("no log file path configured and no cache directory available")]
    NoLogPath,
}
