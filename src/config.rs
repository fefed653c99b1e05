//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a sparse user file in the content root.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [discovery]
//! source = "scan"                  # "scan" (filesystem) or "declarative" (catalog lists)
//! images_dir = "images/projects"   # Project folders, relative to the content root
//! url_prefix = "/images/projects"  # Site-relative URL prefix for image paths
//! catalog = "projects.toml"        # Project catalog, relative to the content root
//!
//! [dimensions]
//! hero = [1200, 1600]              # Display hint for the primary image
//! detail = [800, 1200]             # Display hint for all other images
//!
//! [viewer]
//! transition_ms = 600              # Slide transition duration
//! edge_delay_ms = 500              # Delay before an edge scroll commits
//! sensitivity = 0.08               # Offset percent per unit of wheel delta
//! band_start = 15.0                # Warn when scrolling back at or below this
//! band_end = 85.0                  # Warn when scrolling forward at or above this
//! edge_start = 2.0                 # Go to previous image at or below this
//! edge_end = 98.0                  # Go to next image at or above this
//!
//! [processing]
//! max_processes = 4                # Parallel discovery workers (omit for auto)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [viewer]
//! transition_ms = 400
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::Dimensions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where project images come from and how their URLs are built.
    pub discovery: DiscoveryConfig,
    /// Width/height hints attached to discovered images.
    pub dimensions: DimensionsConfig,
    /// Fullscreen viewer timings and scroll thresholds.
    pub viewer: ViewerConfig,
    /// Parallel discovery settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discovery.url_prefix.is_empty() {
            return Err(ConfigError::Validation(
                "discovery.url_prefix must not be empty".into(),
            ));
        }
        for (name, size) in [
            ("dimensions.hero", self.dimensions.hero),
            ("dimensions.detail", self.dimensions.detail),
        ] {
            if size[0] == 0 || size[1] == 0 {
                return Err(ConfigError::Validation(format!(
                    "{name} values must be non-zero"
                )));
            }
        }
        self.viewer.validate()
    }
}

/// Which [`crate::discovery::ImageSource`] implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// List the project's image folder on disk.
    #[default]
    Scan,
    /// Use the explicit filename lists from the catalog.
    Declarative,
}

/// Image discovery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    pub source: SourceKind,
    /// Directory holding one folder per project, relative to the content root.
    pub images_dir: String,
    /// URL prefix joined with `<project-id>/<filename>` to form image paths.
    ///
    /// Usually site-relative (`/images/projects`). An absolute prefix such as
    /// `https://cdn.example.com/portfolio` is accepted for images served from
    /// another host; only an empty prefix is rejected.
    pub url_prefix: String,
    /// Project catalog file, relative to the content root.
    pub catalog: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Scan,
            images_dir: "images/projects".to_string(),
            url_prefix: "/images/projects".to_string(),
            catalog: "projects.toml".to_string(),
        }
    }
}

impl DiscoveryConfig {
    pub fn images_path(&self, root: &Path) -> PathBuf {
        root.join(&self.images_dir)
    }

    pub fn catalog_path(&self, root: &Path) -> PathBuf {
        root.join(&self.catalog)
    }
}

/// Display size hints as `[width, height]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DimensionsConfig {
    pub hero: [u32; 2],
    pub detail: [u32; 2],
}

impl Default for DimensionsConfig {
    fn default() -> Self {
        Self {
            hero: [Dimensions::HERO.width, Dimensions::HERO.height],
            detail: [Dimensions::DETAIL.width, Dimensions::DETAIL.height],
        }
    }
}

impl DimensionsConfig {
    pub fn hero(&self) -> Dimensions {
        Dimensions {
            width: self.hero[0],
            height: self.hero[1],
        }
    }

    pub fn detail(&self) -> Dimensions {
        Dimensions {
            width: self.detail[0],
            height: self.detail[1],
        }
    }
}

/// Fullscreen viewer tuning.
///
/// Scroll offset is a percentage in `[0, 100]`. The band thresholds only raise
/// a boundary warning; the edge thresholds schedule navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// How long a slide transition blocks further navigation.
    pub transition_ms: u64,
    /// Delay between reaching a scroll edge and navigating.
    pub edge_delay_ms: u64,
    /// Multiplier from raw wheel delta to offset percentage.
    pub sensitivity: f64,
    pub band_start: f64,
    pub band_end: f64,
    pub edge_start: f64,
    pub edge_end: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            transition_ms: 600,
            edge_delay_ms: 500,
            sensitivity: 0.08,
            band_start: 15.0,
            band_end: 85.0,
            edge_start: 2.0,
            edge_end: 98.0,
        }
    }
}

impl ViewerConfig {
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn edge_delay(&self) -> Duration {
        Duration::from_millis(self.edge_delay_ms)
    }

    /// Thresholds must be ordered `0 <= edge_start < band_start < band_end < edge_end <= 100`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sensitivity.is_finite() && self.sensitivity > 0.0) {
            return Err(ConfigError::Validation(
                "viewer.sensitivity must be a positive number".into(),
            ));
        }
        let ordered = 0.0 <= self.edge_start
            && self.edge_start < self.band_start
            && self.band_start < self.band_end
            && self.band_end < self.edge_end
            && self.edge_end <= 100.0;
        if !ordered {
            return Err(ConfigError::Validation(
                "viewer thresholds must satisfy 0 <= edge_start < band_start < band_end < edge_end <= 100"
                    .into(),
            ));
        }
        Ok(())
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel discovery workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(root = %root.display(), source = ?config.discovery.source, "config loaded");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Portfolio Gal Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the content root. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Image discovery
# ---------------------------------------------------------------------------
[discovery]
# "scan" lists each project folder on disk; "declarative" uses the explicit
# image lists from the project catalog.
source = "scan"

# One folder per project id lives here, relative to the content root.
images_dir = "images/projects"

# Image URLs are built as <url_prefix>/<project-id>/<filename>.
# Site-relative by default; an absolute URL (e.g. a CDN) also works.
url_prefix = "/images/projects"

# Project catalog (titles, categories, declarative image lists).
catalog = "projects.toml"

# ---------------------------------------------------------------------------
# Display size hints
# ---------------------------------------------------------------------------
[dimensions]
# [width, height] attached to the primary image of each project.
hero = [1200, 1600]

# [width, height] attached to every other image.
detail = [800, 1200]

# ---------------------------------------------------------------------------
# Fullscreen viewer
# ---------------------------------------------------------------------------
[viewer]
# Slide transition duration in milliseconds. Navigation is ignored meanwhile.
transition_ms = 600

# Delay between a scroll reaching an edge and the slide change, in milliseconds.
edge_delay_ms = 500

# Offset percentage gained per unit of raw wheel delta.
sensitivity = 0.08

# Boundary warning bands (percent of scroll offset).
band_start = 15.0
band_end = 85.0

# Edge thresholds that trigger navigation (percent of scroll offset).
edge_start = 2.0
edge_end = 98.0

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel discovery workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_discovery() {
        let config = SiteConfig::default();
        assert_eq!(config.discovery.source, SourceKind::Scan);
        assert_eq!(config.discovery.images_dir, "images/projects");
        assert_eq!(config.discovery.url_prefix, "/images/projects");
        assert_eq!(config.discovery.catalog, "projects.toml");
    }

    #[test]
    fn default_config_dimensions() {
        let config = SiteConfig::default();
        assert_eq!(config.dimensions.hero(), Dimensions::HERO);
        assert_eq!(config.dimensions.detail(), Dimensions::DETAIL);
    }

    #[test]
    fn default_config_viewer() {
        let viewer = ViewerConfig::default();
        assert_eq!(viewer.transition_duration(), Duration::from_millis(600));
        assert_eq!(viewer.edge_delay(), Duration::from_millis(500));
        assert_eq!(viewer.sensitivity, 0.08);
        assert_eq!(
            (viewer.edge_start, viewer.band_start, viewer.band_end, viewer.edge_end),
            (2.0, 15.0, 85.0, 98.0)
        );
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[viewer]
transition_ms = 400
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.viewer.transition_ms, 400);
        // Defaults preserved
        assert_eq!(config.viewer.edge_delay_ms, 500);
        assert_eq!(config.discovery.source, SourceKind::Scan);
    }

    #[test]
    fn parse_declarative_source() {
        let toml = r#"
[discovery]
source = "declarative"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.discovery.source, SourceKind::Declarative);
    }

    #[test]
    fn integer_thresholds_accepted() {
        let toml = r#"
[viewer]
band_start = 20
band_end = 80
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.viewer.band_start, 20.0);
        assert_eq!(config.viewer.band_end, 80.0);
    }

    #[test]
    fn paths_join_content_root() {
        let config = DiscoveryConfig::default();
        let root = Path::new("/site");
        assert_eq!(
            config.images_path(root),
            PathBuf::from("/site/images/projects")
        );
        assert_eq!(config.catalog_path(root), PathBuf::from("/site/projects.toml"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[discovery]
images_dir = "public/images/projects"

[dimensions]
hero = [1000, 1500]
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.discovery.images_dir, "public/images/projects");
        assert_eq!(config.dimensions.hero, [1000, 1500]);
        // Unspecified values should be defaults
        assert_eq!(config.dimensions.detail, [800, 1200]);
        assert_eq!(config.discovery.url_prefix, "/images/projects");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Processing config tests
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let config = ProcessingConfig {
            max_processes: None,
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_zero_means_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"transition_ms = 600"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"transition_ms = 300"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("transition_ms").unwrap().as_integer(), Some(300));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r#"
[viewer]
transition_ms = 600
edge_delay_ms = 500
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[viewer]
edge_delay_ms = 250
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let viewer = merged.get("viewer").unwrap();
        assert_eq!(viewer.get("edge_delay_ms").unwrap().as_integer(), Some(250));
        assert_eq!(viewer.get("transition_ms").unwrap().as_integer(), Some(600));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str(r#"hero = [1200, 1600]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"hero = [900]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("hero").unwrap().as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
[viewer]
transiton_ms = 600
"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r##"
[colors.light]
background = "#fff"
"##,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_source_kind_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
[discovery]
source = "database"
"#,
        );
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_dimension() {
        let mut config = SiteConfig::default();
        config.dimensions.detail = [0, 1200];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dimensions.detail"));
    }

    #[test]
    fn validate_sensitivity_positive() {
        let mut config = SiteConfig::default();
        config.viewer.sensitivity = 0.0;
        assert!(config.validate().is_err());
        config.viewer.sensitivity = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_threshold_order() {
        let mut config = SiteConfig::default();
        config.viewer.band_start = 90.0;
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.viewer.edge_end = 101.0;
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.viewer.edge_start = 15.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_url_prefix() {
        let mut config = SiteConfig::default();
        config.discovery.url_prefix = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_absolute_url_prefix() {
        let mut config = SiteConfig::default();
        config.discovery.url_prefix = "https://cdn.example.com/portfolio".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[viewer]
edge_end = 50
"#,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in ["[discovery]", "[dimensions]", "[viewer]", "[processing]"] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        for key in ["discovery", "dimensions", "viewer", "processing"] {
            assert!(val.get(key).is_some(), "missing {key}");
        }
    }
}
