//! Webspace model: the compiled, immutable view of one tenant.
//!
//! ```text
//! Webspace ──┬── LocalizationTree (arena, parent indices)
//!            ├── Segment[]
//!            ├── templates / default templates / excluded templates
//!            ├── NavigationContext[]
//!            └── PortalId[] ──> Portal ──> Environment[] ──> Url[] / CustomUrl[]
//! ```
//!
//! Webspaces and portals live in the [`RoutingIndex`](crate::index::RoutingIndex)
//! arenas and reference each other through [`WebspaceId`] / [`PortalId`].

mod localization;
mod portal;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

pub use localization::{Localization, LocalizationId, LocalizationTree};
pub use portal::{CustomUrl, Environment, PLACEHOLDERS, Portal, PortalId, Url, WILDCARD};

use crate::config::section::{Metadata, ResourceLocatorStrategy};

/// Default template types every webspace must define.
pub const REQUIRED_DEFAULT_TEMPLATES: [&str; 2] = ["page", "home"];

/// Index of a webspace inside the routing index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WebspaceId(pub(crate) usize);

impl WebspaceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Index of a segment inside its webspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SegmentId(pub(crate) usize);

impl SegmentId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Security {
    pub system: String,
    pub permission_check: bool,
}

/// Named content partition (audience split, campaign, ...).
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub key: String,
    pub metadata: Metadata,
    pub default: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavigationContext {
    pub key: String,
    pub metadata: Metadata,
}

/// Root tenant unit.
#[derive(Debug, Clone, Serialize)]
pub struct Webspace {
    pub key: String,
    pub name: String,
    pub security: Option<Security>,
    pub localizations: LocalizationTree,
    pub segments: Vec<Segment>,
    pub theme: Option<String>,
    /// Template type -> template id, including `error` / `error-<code>`.
    pub templates: BTreeMap<String, String>,
    pub default_templates: BTreeMap<String, String>,
    pub excluded_templates: BTreeSet<String>,
    pub navigation: Vec<NavigationContext>,
    pub resource_locator_strategy: ResourceLocatorStrategy,
    pub portals: Vec<PortalId>,
}

impl Webspace {
    pub fn localization(&self, code: &str) -> Option<&Localization> {
        self.localizations
            .find(code)
            .and_then(|id| self.localizations.get(id))
    }

    pub fn default_localization(&self) -> Option<&Localization> {
        self.localizations
            .default_localization()
            .and_then(|id| self.localizations.get(id))
    }

    pub fn segment_id(&self, key: &str) -> Option<SegmentId> {
        self.segments
            .iter()
            .position(|s| s.key == key)
            .map(SegmentId)
    }

    pub fn segment(&self, key: &str) -> Option<&Segment> {
        self.segment_id(key).map(|id| &self.segments[id.0])
    }

    /// Segment marked default, falling back to the first one.
    pub fn default_segment(&self) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|s| s.default)
            .or_else(|| self.segments.first())
    }

    pub fn template(&self, kind: &str) -> Option<&str> {
        self.templates.get(kind).map(String::as_str)
    }

    pub fn default_template(&self, kind: &str) -> Option<&str> {
        self.default_templates.get(kind).map(String::as_str)
    }

    /// Template for an http error code, falling back to the default `error`.
    pub fn error_template(&self, code: u16) -> Option<&str> {
        self.template(&format!("error-{code}"))
            .or_else(|| self.template("error"))
    }

    pub fn is_excluded_template(&self, template: &str) -> bool {
        self.excluded_templates.contains(template)
    }

    pub fn navigation_context(&self, key: &str) -> Option<&NavigationContext> {
        self.navigation.iter().find(|c| c.key == key)
    }
}
