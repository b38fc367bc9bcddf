//! Error types for classmap operations.
//!
//! This module provides the main error type [`ClassmapError`] which wraps
//! the error conditions that can stop a build. Recoverable problems are not
//! errors; they are collected as diagnostics on the diagram.

use std::{io, path::PathBuf};

use thiserror::Error;

use classmap_core::error::ModelError;
use classmap_doc::DocError;

/// The main error type for classmap operations.
#[derive(Debug, Error)]
pub enum ClassmapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Missing configuration file: {}", .0.display())]
    MissingConfig(PathBuf),

    #[error("Failed to parse TOML configuration: {0}")]
    Config(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Documentation error: {0}")]
    Doc(#[from] DocError),
}
