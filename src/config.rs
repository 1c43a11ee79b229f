use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::FamtreeError;
use crate::kinship::KinshipRuleEngine;
use crate::tree::{RenderOptions, DEFAULT_COLOR, DEFAULT_PALETTE};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub famtree: FamtreeConfig,
    #[serde(default)]
    pub traversal: TraversalConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub kinship: KinshipConfig,
}

/// famtree-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FamtreeConfig {
    /// Dataset file used when a command gets no `--data` argument.
    #[serde(default)]
    pub data_path: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for FamtreeConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            log_level: default_log_level(),
        }
    }
}

/// Cost-control knobs for the extractors
#[derive(Debug, Clone, Deserialize)]
pub struct TraversalConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
    #[serde(default = "default_max_relationships")]
    pub max_relationships: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_nodes: default_max_nodes(),
            max_relationships: default_max_relationships(),
        }
    }
}

/// Diagram rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    #[serde(default = "default_color")]
    pub default_color: String,
    #[serde(default = "default_rankdir")]
    pub rankdir: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            default_color: default_color(),
            rankdir: default_rankdir(),
        }
    }
}

/// Kinship term configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KinshipConfig {
    /// Canonical term -> displayed term
    #[serde(default)]
    pub term_overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_depth() -> usize {
    6
}

fn default_max_nodes() -> usize {
    100
}

fn default_max_relationships() -> usize {
    200
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_rankdir() -> String {
    "TB".to_string()
}

const CONFIG_ENV: &str = "FAMTREE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in FAMTREE_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();

        let config_path = std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self::from_file(&config_path)
    }

    /// Like [`Config::load`], but falls back to defaults when neither
    /// FAMTREE_CONFIG is set nor ./config.toml exists.
    pub fn load_or_default() -> Result<Self> {
        let _ = dotenv::dotenv();

        if std::env::var(CONFIG_ENV).is_err() && !Path::new(DEFAULT_CONFIG_FILE).exists() {
            log::debug!("No configuration file found, using defaults");
            return Ok(Self::default());
        }
        Self::load()
    }

    /// Read, parse and validate a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .map_err(FamtreeError::from)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> crate::error::Result<()> {
        let invalid = |msg: String| Err(FamtreeError::Config(msg));

        if self.traversal.max_depth == 0 {
            return invalid("traversal.max_depth must be greater than 0".to_string());
        }

        if self.traversal.max_nodes == 0 {
            return invalid("traversal.max_nodes must be greater than 0".to_string());
        }

        if self.traversal.max_relationships == 0 {
            return invalid("traversal.max_relationships must be greater than 0".to_string());
        }

        if self.render.palette.iter().any(|c| c.trim().is_empty()) {
            return invalid("render.palette must not contain empty colors".to_string());
        }

        if self.render.default_color.trim().is_empty() {
            return invalid("render.default_color must not be empty".to_string());
        }

        if !matches!(self.render.rankdir.as_str(), "TB" | "BT" | "LR" | "RL") {
            return invalid(format!(
                "render.rankdir must be one of TB, BT, LR, RL (got {})",
                self.render.rankdir
            ));
        }

        Ok(())
    }

    pub fn data_path(&self) -> Option<&Path> {
        self.famtree.data_path.as_deref()
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            palette: self.render.palette.clone(),
            default_color: self.render.default_color.clone(),
            rankdir: self.render.rankdir.clone(),
            ..RenderOptions::default()
        }
    }

    pub fn kinship_engine(&self) -> KinshipRuleEngine {
        KinshipRuleEngine::default().with_term_overrides(self.kinship.term_overrides.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphEdge, RelationshipPath};
    use crate::model::{PersonId, RelationKind};
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide cwd and env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    const FULL_CONFIG: &str = r##"
[famtree]
data_path = "family.json"
log_level = "debug"

[traversal]
max_depth = 3
max_nodes = 50
max_relationships = 80

[render]
palette = ["#000001", "#000002"]
default_color = "#FFFFFF"
rankdir = "LR"

[kinship.term_overrides]
"first cousin" = "cousin"
"##;

    fn write_config(temp_dir: &TempDir, content: &str) -> PathBuf {
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    /// Restores cwd when dropped (e.g. on panic).
    struct CwdGuard(PathBuf);
    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.0);
        }
    }

    fn with_config_env(config_path: Option<&Path>, f: impl FnOnce()) {
        let original = std::env::var(CONFIG_ENV).ok();
        match config_path {
            Some(p) => std::env::set_var(CONFIG_ENV, p),
            None => std::env::remove_var(CONFIG_ENV),
        }
        f();
        std::env::remove_var(CONFIG_ENV);
        if let Some(val) = original {
            std::env::set_var(CONFIG_ENV, val);
        }
    }

    #[test]
    fn test_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, FULL_CONFIG);
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.famtree.log_level, "debug");
        assert_eq!(config.data_path(), Some(Path::new("family.json")));
        assert_eq!(config.traversal.max_depth, 3);
        assert_eq!(config.traversal.max_relationships, 80);
        assert_eq!(config.render.rankdir, "LR");
        assert_eq!(config.kinship.term_overrides["first cousin"], "cousin");

        let options = config.render_options();
        assert_eq!(options.color_for(1), "#000002");
        assert_eq!(options.color_for(2), "#FFFFFF");
    }

    #[test]
    fn test_sections_default_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[traversal]\nmax_depth = 2\n");
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.traversal.max_depth, 2);
        assert_eq!(config.traversal.max_nodes, 100);
        assert_eq!(config.render.palette.len(), DEFAULT_PALETTE.len());
        assert_eq!(config.famtree.log_level, "info");
        assert!(config.data_path().is_none());
    }

    #[test]
    fn test_config_rejects_zero_limits() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[traversal]\nmax_nodes = 0\n");
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("max_nodes"));
        assert!(matches!(
            err.downcast_ref::<FamtreeError>(),
            Some(FamtreeError::Config(_))
        ));
    }

    #[test]
    fn test_config_malformed_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[traversal\nmax_depth = ");
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
        assert!(matches!(
            err.downcast_ref::<FamtreeError>(),
            Some(FamtreeError::Toml(_))
        ));
    }

    #[test]
    fn test_config_rejects_bad_rankdir() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[render]\nrankdir = \"diagonal\"\n");
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("rankdir"));
    }

    #[test]
    fn test_term_overrides_reach_engine() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, FULL_CONFIG);
        let config = Config::from_file(&path).unwrap();
        let engine = config.kinship_engine();
        let kinds = [
            RelationKind::ChildOfFather,
            RelationKind::ChildOfFather,
            RelationKind::Father,
            RelationKind::Mother,
        ];
        let nodes: Vec<PersonId> = (0..5).map(PersonId).collect();
        let edges = kinds
            .iter()
            .enumerate()
            .map(|(i, &k)| GraphEdge::new(nodes[i], nodes[i + 1], k))
            .collect();
        let path = RelationshipPath { nodes, edges };
        assert_eq!(engine.infer(&path, &HashMap::new()), "cousin");
        assert_eq!(engine.infer(&RelationshipPath::empty(), &HashMap::new()), "unknown");
    }

    #[test]
    fn test_config_load_from_env() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, FULL_CONFIG);
        with_config_env(Some(&path), || {
            let config = Config::load();
            assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
            assert_eq!(config.unwrap().traversal.max_nodes, 50);
        });
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        with_config_env(Some(Path::new("nonexistent.toml")), || {
            let config = Config::load();
            assert!(config.is_err());
        });
    }

    #[test]
    fn test_load_or_default_without_file() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        let _cwd = CwdGuard(original_dir);
        std::env::set_current_dir(temp_dir.path()).unwrap();
        with_config_env(None, || {
            let config = Config::load_or_default().unwrap();
            assert_eq!(config.traversal.max_depth, 6);
            assert_eq!(config.render.rankdir, "TB");
        });
    }
}
