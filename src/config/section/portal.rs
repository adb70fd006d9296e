//! Portal, environment and URL configuration.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub key: String,
    pub name: String,
    /// Portal localizations; empty means "all webspace localizations".
    pub localizations: Vec<PortalLocalizationConfig>,
    pub environments: Vec<EnvironmentConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalLocalizationConfig {
    pub language: String,
    pub country: Option<String>,
    pub default: bool,
}

/// Deployment context such as `prod` or `dev`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub urls: Vec<UrlConfig>,
    #[serde(alias = "customUrls")]
    pub custom_urls: Vec<CustomUrlConfig>,
}

/// Inbound URL. `value` may contain `{localization}`, `{language}`,
/// `{country}` and `{segment}` placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlConfig {
    #[serde(alias = "url")]
    pub value: String,
    pub language: Option<String>,
    pub country: Option<String>,
    pub segment: Option<String>,
    pub redirect: Option<String>,
    pub main: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomUrlConfig {
    pub url: String,
}

impl PortalConfig {
    pub(super) fn validate(&self, base: &str, diag: &mut ConfigDiagnostics) {
        if self.key.is_empty() {
            diag.error(
                FieldPath::owned(format!("{base}.key")),
                "portal key must not be empty",
            );
        }

        if self.environments.is_empty() {
            diag.error_with_hint(
                FieldPath::owned(format!("{base}.environments")),
                "portal has no environments and will never receive requests",
                "add `[[webspaces.portals.environments]]` with `type = \"prod\"`",
            );
        }

        for (i, env) in self.environments.iter().enumerate() {
            if env.kind.is_empty() {
                diag.error(
                    FieldPath::owned(format!("{base}.environments[{i}].type")),
                    "environment type must not be empty",
                );
            }
            for (j, url) in env.urls.iter().enumerate() {
                if url.value.trim_end_matches('/').is_empty() {
                    diag.error(
                        FieldPath::owned(format!("{base}.environments[{i}].urls[{j}].value")),
                        "url must not be empty",
                    );
                }
            }
        }
    }
}
