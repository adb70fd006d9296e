//! Portals, environments and inbound URLs.

use serde::Serialize;

use super::{Localization, WebspaceId};

/// Placeholders accepted inside [`Url::url`].
pub const PLACEHOLDERS: [&str; 4] = ["{localization}", "{language}", "{country}", "{segment}"];

/// Wildcard token required in custom urls.
pub const WILDCARD: char = '*';

/// Index of a portal inside the routing index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PortalId(pub(crate) usize);

impl PortalId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Addressable instance of a webspace (e.g. one per market).
#[derive(Debug, Clone, Serialize)]
pub struct Portal {
    pub key: String,
    pub name: String,
    /// Owning webspace.
    pub webspace: WebspaceId,
    /// Flat list; inherited from the webspace when not configured.
    pub localizations: Vec<Localization>,
    pub environments: Vec<Environment>,
}

impl Portal {
    pub fn environment(&self, kind: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.kind == kind)
    }

    /// Localization marked default, falling back to the first one.
    pub fn default_localization(&self) -> Option<&Localization> {
        self.localizations
            .iter()
            .find(|l| l.default)
            .or_else(|| self.localizations.first())
    }

    pub fn has_localization(&self, code: &str) -> bool {
        let code = code.to_lowercase().replace('-', "_");
        self.localizations.iter().any(|l| l.code() == code)
    }
}

/// Deployment context (`prod`, `stage`, `dev`, ...).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Environment {
    #[serde(rename = "type")]
    pub kind: String,
    pub urls: Vec<Url>,
    pub custom_urls: Vec<CustomUrl>,
}

impl Environment {
    /// Url marked `main`, if any.
    pub fn main_url(&self) -> Option<&Url> {
        self.urls.iter().find(|u| u.main)
    }
}

/// A concrete inbound url pattern (`host[/path]`, without trailing slash).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Url {
    pub url: String,
    pub language: Option<String>,
    pub country: Option<String>,
    pub segment: Option<String>,
    pub redirect: Option<String>,
    pub main: bool,
}

impl Url {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// True when the url serves the given locale, or serves every locale.
    pub fn is_valid_locale(&self, language: &str, country: Option<&str>) -> bool {
        (self.language.as_deref() == Some(language) && self.country.as_deref() == country)
            || (self.language.as_deref().is_none_or(str::is_empty)
                && self.country.as_deref().is_none_or(str::is_empty))
    }

    pub fn has_placeholders(&self) -> bool {
        PLACEHOLDERS.iter().any(|p| self.url.contains(p))
    }
}

/// Wildcard url (`*.sulu.io/*`) claimed by custom-url content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomUrl {
    pub url: String,
}

impl CustomUrl {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn has_wildcard(&self) -> bool {
        self.url.contains(WILDCARD)
    }
}
