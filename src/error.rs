//! Error types for model queries, class construction, the hierarchy pool and
//! configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// A model query that could not be answered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("{what} not found in {owner}")]
    NotFound { what: String, owner: String },
    #[error("invalid descriptor `{descriptor}`: {reason}")]
    InvalidDescriptor { descriptor: String, reason: String },
}

/// A construction step that could not be completed. Every variant is
/// recovered by skipping the step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("no eligible candidate for {slot}")]
    NoCandidate { slot: &'static str },
    #[error("body synthesis failed for {member}: {reason}")]
    BodySynthesisFailed { member: String, reason: String },
    #[error("name `{name}` already declared in {owner}")]
    NameCollision { name: String, owner: String },
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Inserts refused by the hierarchy pool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("class `{0}` is already registered")]
    DuplicateName(String),
    #[error("class `{name}` has inheritance depth {depth}, max is {max}")]
    DepthExceeded { name: String, depth: usize, max: usize },
    #[error("class `{0}` appears as its own ancestor")]
    SelfAncestor(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("`{name}` has min {min} greater than max {max}")]
    InvalidRange {
        name: &'static str,
        min: usize,
        max: usize,
    },
}
