//! Routing configuration management for `routing.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── webspace   # [[webspaces]]
//! │   ├── portal     # [[webspaces.portals]]
//! │   └── cleanup    # [cleanup]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # RoutingIndexHandle
//! ├── util.rs        # Config file discovery
//! └── mod.rs         # RoutingConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section                  | Purpose                                          |
//! |--------------------------|--------------------------------------------------|
//! | `[[webspaces]]`          | Tenants: localizations, segments, templates      |
//! | `[[webspaces.portals]]`  | Portals with environments, urls and custom urls  |
//! | `[cleanup]`              | Resource locator separator and replacer tables   |
//!
//! Both TOML and JSON files are accepted; the format follows the extension.

pub mod section;
pub mod types;
mod util;

pub use util::find_config_file;

// Re-export from section/
pub use section::{
    CleanupConfig, CustomUrlConfig, DEFAULT_REPLACERS, EnvironmentConfig, ErrorTemplateConfig,
    LocalizationConfig, Metadata, NavigationConfig, NavigationContextConfig, PortalConfig,
    PortalLocalizationConfig, Replacers, ResourceLocatorConfig, ResourceLocatorStrategy,
    SecurityConfig, SegmentConfig, SlugSeparator, UrlConfig, WebspaceConfig,
};

// Re-export from types/
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath, RoutingIndexHandle};

use crate::index::{ConfigurationError, RoutingIndex, WebspaceRoutingIndexBuilder};
use crate::log;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "routing.toml";

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Detect from the file extension; files without one are read as TOML.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            None => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(_) => Err(ConfigError::Format(path.to_path_buf())),
        }
    }
}

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing routing.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Webspaces in declaration order
    #[serde(default)]
    pub webspaces: Vec<WebspaceConfig>,

    /// Resource locator cleanup settings
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

impl RoutingConfig {
    /// Load configuration from a file, reporting unknown fields as warnings.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content, format)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse configuration from JSON string
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse content, collecting any unknown fields.
    pub fn parse_with_ignored(
        content: &str,
        format: ConfigFormat,
    ) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let on_ignored = |path: serde_ignored::Path| ignored.push(path.to_string());

        let config = match format {
            ConfigFormat::Toml => {
                let deserializer = toml::Deserializer::new(content);
                serde_ignored::deserialize(deserializer, on_ignored)?
            }
            ConfigFormat::Json => {
                let mut deserializer = serde_json::Deserializer::from_str(content);
                serde_ignored::deserialize(&mut deserializer, on_ignored)?
            }
        };
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} (ignored):", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Shallow structural validation before the index builder runs.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if self.webspaces.is_empty() {
            diag.warn(FieldPath::new("webspaces"), "no webspace configured");
        }
        for (i, webspace) in self.webspaces.iter().enumerate() {
            webspace.validate(i, &mut diag);
        }

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Compile the webspaces into a routing index.
    pub fn build_index(&self) -> Result<RoutingIndex, ConfigurationError> {
        WebspaceRoutingIndexBuilder::new(&self.webspaces).build()
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse a TOML config snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> RoutingConfig {
    let (parsed, ignored) = RoutingConfig::parse_with_ignored(content, ConfigFormat::Toml).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
[[webspaces]]
key = "sulu_io"

[[webspaces.localizations]]
language = "en"

[webspaces.default_templates]
page = "default"
home = "overview"

[[webspaces.portals]]
key = "sulu_io_portal"

[[webspaces.portals.environments]]
type = "prod"

[[webspaces.portals.environments.urls]]
value = "sulu.io"
"#;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = RoutingConfig::from_str("[[webspaces]\nkey = \"a\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_default_config() {
        let config = RoutingConfig::default();
        assert!(config.webspaces.is_empty());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.cleanup.separator, SlugSeparator::Dash);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = format!("{MINIMAL}\n[unknown_section]\nfield = \"value\"");
        let (config, ignored) =
            RoutingConfig::parse_with_ignored(&content, ConfigFormat::Toml).unwrap();

        assert_eq!(config.webspaces[0].key, "sulu_io");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let (_, ignored) = RoutingConfig::parse_with_ignored(MINIMAL, ConfigFormat::Toml).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_json_with_camel_case_aliases() {
        let json = r#"{
            "webspaces": [{
                "key": "sulu_io",
                "security": { "system": "website", "permissionCheck": true },
                "resourceLocator": { "strategy": "short" },
                "portals": [{
                    "key": "p",
                    "environments": [{
                        "type": "prod",
                        "urls": [{ "url": "sulu.io" }],
                        "customUrls": [{ "url": "*.sulu.io" }]
                    }]
                }]
            }]
        }"#;
        let (config, ignored) =
            RoutingConfig::parse_with_ignored(json, ConfigFormat::Json).unwrap();
        assert!(ignored.is_empty(), "{ignored:?}");

        let webspace = &config.webspaces[0];
        assert!(webspace.security.as_ref().is_some_and(|s| s.permission_check));
        assert_eq!(webspace.resource_locator.strategy, ResourceLocatorStrategy::Short);
        let environment = &webspace.portals[0].environments[0];
        assert_eq!(environment.urls[0].value, "sulu.io");
        assert_eq!(environment.custom_urls[0].url, "*.sulu.io");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("routing.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("routing.JSON")).unwrap(),
            ConfigFormat::Json
        );
        assert!(matches!(
            ConfigFormat::from_path(Path::new("routing.yaml")),
            Err(ConfigError::Format(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = RoutingConfig::load(file.path()).unwrap();
        assert_eq!(config.config_path, file.path());
        assert_eq!(config.webspaces.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RoutingConfig::load(&dir.path().join("routing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }

    #[test]
    fn test_validate_collects_errors() {
        let config = test_parse_config(
            "[[webspaces]]\nkey = \"\"\n[[webspaces.portals]]\nkey = \"\"\n",
        );
        let Err(ConfigError::Diagnostics(diag)) = config.validate() else {
            panic!("expected diagnostics");
        };
        assert!(diag.len() >= 3);
    }

    #[test]
    fn test_build_index() {
        let config = test_parse_config(MINIMAL);
        config.validate().unwrap();
        let index = config.build_index().unwrap();
        assert!(index.portal_information("prod", "sulu.io").is_some());
    }
}
