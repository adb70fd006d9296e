//! `[[webspaces]]` section configuration.
//!
//! One entry per tenant. The list order is the order in which webspaces are
//! built and indexed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::portal::PortalConfig;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Free-form metadata (titles per locale and similar).
pub type Metadata = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebspaceConfig {
    /// Unique webspace key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Security policy, absent when the webspace is public.
    pub security: Option<SecurityConfig>,
    /// Localization tree roots.
    pub localizations: Vec<LocalizationConfig>,
    /// Content segments.
    pub segments: Vec<SegmentConfig>,
    pub theme: Option<String>,
    /// Template type -> template id.
    pub templates: BTreeMap<String, String>,
    /// Template type -> default template id (`page` and `home` are required).
    pub default_templates: BTreeMap<String, String>,
    pub error_templates: Vec<ErrorTemplateConfig>,
    pub excluded_templates: Vec<String>,
    pub navigation: NavigationConfig,
    #[serde(alias = "resourceLocator")]
    pub resource_locator: ResourceLocatorConfig,
    pub portals: Vec<PortalConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SecurityConfig {
    pub system: String,
    #[serde(alias = "permissionCheck")]
    pub permission_check: bool,
}

/// A localization node; `children` inherit fallback behavior from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    pub language: String,
    pub country: Option<String>,
    pub shadow: Option<String>,
    pub default: bool,
    pub children: Vec<LocalizationConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    pub key: String,
    pub metadata: Metadata,
    pub default: bool,
}

/// Error template: either coded (`code = 404`) or the default one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorTemplateConfig {
    pub code: Option<u16>,
    pub default: bool,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub contexts: Vec<NavigationContextConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationContextConfig {
    pub key: String,
    pub metadata: Metadata,
}

/// How resource locators of a webspace are edited and regenerated.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceLocatorStrategy {
    /// Editors change only the last segment; moves regenerate routes (default).
    #[default]
    TreeLeafEdit,
    /// Editors change the whole path; moves keep stored paths.
    TreeFullEdit,
    /// Flat paths built from the title only.
    Short,
}

impl ResourceLocatorStrategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TreeLeafEdit => "tree_leaf_edit",
            Self::TreeFullEdit => "tree_full_edit",
            Self::Short => "short",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResourceLocatorConfig {
    pub strategy: ResourceLocatorStrategy,
}

impl WebspaceConfig {
    /// Shallow field checks that do not need the full build.
    ///
    /// Structural invariants (templates, defaults, custom urls) are enforced
    /// by the index builder, this only catches empty identifiers early.
    pub fn validate(&self, index: usize, diag: &mut ConfigDiagnostics) {
        let base = if self.key.is_empty() {
            format!("webspaces[{index}]")
        } else {
            format!("webspaces[{}]", self.key)
        };

        if self.key.is_empty() {
            diag.error_with_hint(
                FieldPath::owned(format!("{base}.key")),
                "webspace key must not be empty",
                "set `key = \"my_webspace\"`",
            );
        }

        if self.localizations.is_empty() {
            diag.error(
                FieldPath::owned(format!("{base}.localizations")),
                "webspace needs at least one localization",
            );
        }

        for (i, segment) in self.segments.iter().enumerate() {
            if segment.key.is_empty() {
                diag.error(
                    FieldPath::owned(format!("{base}.segments[{i}].key")),
                    "segment key must not be empty",
                );
            }
        }

        for (i, portal) in self.portals.iter().enumerate() {
            portal.validate(&format!("{base}.portals[{i}]"), diag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_strategy_parsing() {
        for (input, expected) in [
            ("tree_leaf_edit", ResourceLocatorStrategy::TreeLeafEdit),
            ("tree_full_edit", ResourceLocatorStrategy::TreeFullEdit),
            ("short", ResourceLocatorStrategy::Short),
        ] {
            let config = test_parse_config(&format!(
                "[[webspaces]]\nkey = \"a\"\n[webspaces.resource_locator]\nstrategy = \"{input}\""
            ));
            assert_eq!(config.webspaces[0].resource_locator.strategy, expected);
            assert_eq!(expected.as_str(), input);
        }
    }

    #[test]
    fn test_camel_case_aliases() {
        let config = test_parse_config(
            r#"
[[webspaces]]
key = "sulu_io"
[webspaces.security]
system = "website"
permissionCheck = true
[webspaces.resourceLocator]
strategy = "tree_full_edit"
"#,
        );
        let webspace = &config.webspaces[0];
        assert_eq!(
            webspace.security,
            Some(SecurityConfig {
                system: "website".into(),
                permission_check: true
            })
        );
        assert_eq!(
            webspace.resource_locator.strategy,
            ResourceLocatorStrategy::TreeFullEdit
        );
    }

    #[test]
    fn test_nested_localizations() {
        let config = test_parse_config(
            r#"
[[webspaces]]
key = "a"
[[webspaces.localizations]]
language = "de"
default = true
[[webspaces.localizations.children]]
language = "de"
country = "at"
"#,
        );
        let root = &config.webspaces[0].localizations[0];
        assert!(root.default);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].country.as_deref(), Some("at"));
    }

    #[test]
    fn test_validate_empty_key() {
        let webspace = WebspaceConfig::default();
        let mut diag = ConfigDiagnostics::new();
        webspace.validate(0, &mut diag);
        assert!(diag.has_errors());
        assert!(
            diag.errors()
                .iter()
                .any(|e| e.field.as_str() == "webspaces[0].key")
        );
    }
}
