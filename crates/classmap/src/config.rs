//! Configuration types for the classmap pipeline.
//!
//! This module provides configuration structures that control which passes
//! run and how they behave. All types implement [`serde::Deserialize`] so
//! they can be loaded from TOML, see [`load_config`].
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`AssociationConfig`] - Controls association inference.
//! - [`PassConfig`] - Enables the optional refinement passes.
//! - [`DocConfig`] - Controls how documentation blocks are read.
//!
//! # Example
//!
//! ```
//! # use classmap::config::AppConfig;
//! let config: AppConfig = toml::from_str("[association]\nmax_roles = 2").unwrap();
//! assert!(config.association().merge());
//! assert_eq!(config.association().max_roles(), 2);
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;

use classmap_doc::DocPolicy;

use crate::ClassmapError;

/// Top-level configuration combining every section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Association inference section.
    #[serde(default)]
    association: AssociationConfig,

    /// Optional passes section.
    #[serde(default)]
    passes: PassConfig,

    /// Documentation reading section.
    #[serde(default)]
    doc: DocConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(association: AssociationConfig, passes: PassConfig, doc: DocConfig) -> Self {
        Self {
            association,
            passes,
            doc,
        }
    }

    /// Returns the association inference configuration.
    pub fn association(&self) -> &AssociationConfig {
        &self.association
    }

    /// Returns the optional passes configuration.
    pub fn passes(&self) -> &PassConfig {
        &self.passes
    }

    /// Returns the documentation configuration.
    pub fn doc(&self) -> &DocConfig {
        &self.doc
    }
}

fn default_merge() -> bool {
    true
}

fn default_max_roles() -> i64 {
    -1
}

/// Association inference configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AssociationConfig {
    /// Combine every inferred role towards one target into a single relation.
    #[serde(default = "default_merge")]
    merge: bool,

    /// Largest number of merged roles still written as a label; `-1` means
    /// no limit.
    #[serde(default = "default_max_roles")]
    max_roles: i64,
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            merge: default_merge(),
            max_roles: default_max_roles(),
        }
    }
}

impl AssociationConfig {
    /// Creates a new [`AssociationConfig`].
    ///
    /// # Arguments
    ///
    /// * `merge` - Emit one relation per target instead of one per role.
    /// * `max_roles` - Role count above which a merged label is dropped, `-1` for no limit.
    pub fn new(merge: bool, max_roles: i64) -> Self {
        Self { merge, max_roles }
    }

    pub fn merge(&self) -> bool {
        self.merge
    }

    pub fn max_roles(&self) -> i64 {
        self.max_roles
    }

    /// Returns `true` if a merged label with `count` roles may be shown.
    pub fn allows_roles(&self, count: usize) -> bool {
        self.max_roles < 0 || count as u64 <= self.max_roles as u64
    }
}

fn default_importance() -> bool {
    true
}

/// Switches for the optional passes that run after association inference.
#[derive(Debug, Clone, Deserialize)]
pub struct PassConfig {
    /// Synthesize getters for private attributes.
    #[serde(default)]
    getters: bool,

    /// Mark objects and members tagged `@important`.
    #[serde(default = "default_importance")]
    importance: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            getters: false,
            importance: default_importance(),
        }
    }
}

impl PassConfig {
    pub fn new(getters: bool, importance: bool) -> Self {
        Self {
            getters,
            importance,
        }
    }

    pub fn getters(&self) -> bool {
        self.getters
    }

    pub fn importance(&self) -> bool {
        self.importance
    }
}

/// Documentation reading configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocConfig {
    /// Report malformed documentation blocks instead of ignoring them.
    #[serde(default)]
    strict: bool,
}

impl DocConfig {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// The [`DocPolicy`] matching this configuration.
    pub fn policy(&self) -> DocPolicy {
        if self.strict {
            DocPolicy::Strict
        } else {
            DocPolicy::Lenient
        }
    }
}

/// Find and load configuration from various locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (`classmap/config.toml`)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but the file doesn't exist
/// - A config file exists but cannot be read or parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ClassmapError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("classmap/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "classmap", "classmap") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file.
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ClassmapError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ClassmapError::MissingConfig(PathBuf::from(path)));
    }

    let content = fs::read_to_string(path)?;

    toml::from_str(&content).map_err(|err| ClassmapError::Config(err.to_string()))
}
