//! Layered configuration loader.
//!
//! Discovers configuration layers (user/project/cwd/runtime), validates each
//! against the schema, merges them in precedence order, and produces a final
//! `MnemeConfig`.

mod layer_io;
mod merge;
mod schema;
mod utils;

#[cfg(test)]
mod tests;

use crate::{ConfigError, MnemeConfig};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config filename in local layers.
const DEFAULT_CONFIG_FILE: &str = "mneme.json5";
/// Default config directory under user or project roots.
const DEFAULT_CONFIG_DIR: &str = ".mneme";
/// Marker files/dirs that identify a project root.
const DEFAULT_PROJECT_ROOT_MARKERS: &[&str] = &[".git"];

/// Effective config plus metadata about which layers were loaded.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// The merged, validated config.
    pub config: MnemeConfig,
    /// Metadata for each layer that contributed to the config.
    pub layers: Vec<ConfigLayer>,
}

/// Origin for a single config layer in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// User-specific configuration.
    User,
    /// Project root configuration (`<root>/.mneme/mneme.json5`).
    Project,
    /// Current working directory configuration.
    Cwd,
    /// Runtime overrides (highest precedence).
    Runtime,
}

/// Metadata about a loaded config layer.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    /// Layer origin.
    pub source: ConfigLayerSource,
    /// Location on disk.
    pub path: PathBuf,
}

/// Options controlling layered config discovery and overrides.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Working directory used to resolve local layers.
    pub cwd: PathBuf,
    /// Optional user config path (defaults to `~/.mneme/mneme.json5`).
    pub user_config_path: Option<PathBuf>,
    /// Runtime override config paths applied last.
    pub runtime_paths: Vec<PathBuf>,
    /// Marker files/dirs used to detect the project root.
    pub project_root_markers: Vec<String>,
}

impl LayeredConfigOptions {
    /// Create options with default layer locations for the provided cwd.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            user_config_path: layer_io::default_user_config_path(),
            runtime_paths: Vec::new(),
            project_root_markers: DEFAULT_PROJECT_ROOT_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
        }
    }

    /// Add a runtime override config path that is applied last.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl MnemeConfig {
    /// Load a single config from a path (no layering).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        let value: Value = json5::from_str(&contents)?;
        config_from_value(value, "config")
    }

    /// Load a single config from JSON5 contents (no layering).
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        config_from_value(value, "config")
    }

    /// Load a layered config stack using the default layer locations.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        info!(
            "loading layered config with defaults (cwd={})",
            cwd.as_ref().display()
        );
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Load a layered config stack using explicit layer locations.
    ///
    /// Layer precedence (low -> high): user, project, cwd, runtime overrides.
    /// Objects merge recursively; scalars and arrays in a later layer replace
    /// earlier ones.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let cwd = utils::normalize_path(&options.cwd)?;
        debug!("normalized cwd for config load: {}", cwd.display());

        let mut candidates = Vec::new();
        if let Some(path) = options.user_config_path.clone() {
            candidates.push((ConfigLayerSource::User, path));
        }
        match utils::find_project_root(&cwd, &options.project_root_markers) {
            Some(root) => {
                debug!("resolved project root: {}", root.display());
                candidates.push((
                    ConfigLayerSource::Project,
                    root.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE),
                ));
            }
            None => debug!("project root not found; skipping project layer"),
        }
        candidates.push((ConfigLayerSource::Cwd, cwd.join(DEFAULT_CONFIG_FILE)));

        let mut layers = Vec::new();
        let mut merged = Value::Object(serde_json::Map::new());
        for (source, path) in candidates {
            if let Some(value) = layer_io::load_optional_layer(source, &path)? {
                merge::merge_json_values(&mut merged, &value);
                layers.push(ConfigLayer { source, path });
            }
        }
        for path in &options.runtime_paths {
            let value = layer_io::load_required_layer(ConfigLayerSource::Runtime, path)?;
            merge::merge_json_values(&mut merged, &value);
            layers.push(ConfigLayer {
                source: ConfigLayerSource::Runtime,
                path: path.clone(),
            });
        }

        let config = config_from_value(merged, "effective")?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(auto_recall) = &self.memory.auto_recall {
            validate_auto_recall(auto_recall, "memory.auto_recall")?;
        }
        for (idx, agent) in self.agents.list.iter().enumerate() {
            if agent.id.trim().is_empty() {
                return Err(ConfigError::InvalidField {
                    path: format!("agents.list[{idx}].id"),
                    message: "agent id must not be empty".to_string(),
                });
            }
            let auto_recall = agent
                .memory
                .as_ref()
                .and_then(|memory| memory.auto_recall.as_ref());
            if let Some(auto_recall) = auto_recall {
                validate_auto_recall(
                    auto_recall,
                    &format!("agents.list[{idx}].memory.auto_recall"),
                )?;
            }
        }
        Ok(())
    }
}

/// Range checks for an auto-recall section.
fn validate_auto_recall(
    config: &crate::AutoRecallConfig,
    path: &str,
) -> Result<(), ConfigError> {
    if config.max_results == 0 {
        return Err(ConfigError::InvalidField {
            path: format!("{path}.max_results"),
            message: "must be at least 1".to_string(),
        });
    }
    if config.max_tokens == 0 {
        return Err(ConfigError::InvalidField {
            path: format!("{path}.max_tokens"),
            message: "must be at least 1".to_string(),
        });
    }
    if !(0.0..=1.0).contains(&config.min_score) {
        return Err(ConfigError::InvalidField {
            path: format!("{path}.min_score"),
            message: "must be within [0, 1]".to_string(),
        });
    }
    Ok(())
}

fn config_from_value(mut value: Value, label: &str) -> Result<MnemeConfig, ConfigError> {
    schema::validate_layer_schema(&value, label)?;
    merge::canonicalize_keys(&mut value);
    let config: MnemeConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
