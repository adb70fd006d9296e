//! Routing index - compiled lookup from `(environment, url)` to webspace,
//! portal, localization and segment.
//!
//! # Architecture
//!
//! ```text
//! WebspaceConfig[] ──> WebspaceRoutingIndexBuilder ──> RoutingIndex
//!                                                       ├── webspaces: Vec<Webspace>
//!                                                       ├── portals:   Vec<Portal>
//!                                                       └── environments
//!                                                            └── "prod" -> [PortalInformation]
//!                                                                          (by url, insertion order)
//! ```
//!
//! # Module Structure
//!
//! - [`builder`]: configuration -> index compilation and validation
//! - [`entry`]: [`PortalInformation`] tagged entries and priorities
//! - [`expand`]: `{localization}` style placeholder expansion
//! - [`matcher`]: request url normalization and custom-url expressions
//!
//! The index is immutable after [`WebspaceRoutingIndexBuilder::build`]; share
//! it behind an `Arc` (see [`RoutingIndexHandle`](crate::config::RoutingIndexHandle)).

mod builder;
mod entry;
mod error;
mod expand;
mod matcher;

use rustc_hash::FxHashMap;

pub use builder::WebspaceRoutingIndexBuilder;
pub use entry::{
    EntryKind, PRIORITY_CUSTOM_URL, PRIORITY_FULL, PRIORITY_LOCALE_AGNOSTIC, PRIORITY_PARTIAL,
    PRIORITY_REDIRECT, PortalInformation,
};
pub use error::ConfigurationError;
pub use expand::{Expansion, expand_url, strip_placeholders};
pub use matcher::{UrlExpression, normalize_request_url};

use crate::webspace::{Localization, Portal, PortalId, Segment, Webspace, WebspaceId};

/// Entries of one environment, unique by url.
#[derive(Debug, Default)]
pub(crate) struct EnvironmentIndex {
    entries: Vec<PortalInformation>,
    by_url: FxHashMap<String, usize>,
}

impl EnvironmentIndex {
    /// Insert unless the url is already taken. Returns whether it was inserted.
    fn insert(&mut self, entry: PortalInformation) -> bool {
        if self.by_url.contains_key(&entry.url) {
            return false;
        }
        self.by_url.insert(entry.url.clone(), self.entries.len());
        self.entries.push(entry);
        true
    }

    fn get(&self, url: &str) -> Option<&PortalInformation> {
        self.by_url.get(url).map(|&i| &self.entries[i])
    }
}

/// A request resolved against the index.
#[derive(Debug, Clone)]
pub struct RequestMatch<'a> {
    pub entry: &'a PortalInformation,
    pub webspace: &'a Webspace,
    pub portal: &'a Portal,
    pub localization: Option<&'a Localization>,
    pub segment: Option<&'a Segment>,
    /// Path below the matched url, always starting with `/`.
    pub resource_locator: String,
}

/// Immutable multi-tenant routing index.
#[derive(Debug, Default)]
pub struct RoutingIndex {
    pub(crate) webspaces: Vec<Webspace>,
    pub(crate) portals: Vec<Portal>,
    pub(crate) environments: FxHashMap<String, EnvironmentIndex>,
    pub(crate) webspace_keys: FxHashMap<String, WebspaceId>,
    pub(crate) portal_keys: FxHashMap<String, PortalId>,
}

impl RoutingIndex {
    /// Index without any webspace.
    pub fn empty() -> Self {
        Self::default()
    }

    // ========================================================================
    // webspaces and portals
    // ========================================================================

    pub fn webspace(&self, key: &str) -> Option<&Webspace> {
        self.webspace_keys
            .get(key)
            .and_then(|id| self.webspaces.get(id.0))
    }

    pub fn get_webspace(&self, id: WebspaceId) -> Option<&Webspace> {
        self.webspaces.get(id.0)
    }

    /// Webspaces in configuration order.
    pub fn webspaces(&self) -> impl Iterator<Item = &Webspace> {
        self.webspaces.iter()
    }

    pub fn portal(&self, key: &str) -> Option<&Portal> {
        self.portal_keys
            .get(key)
            .and_then(|id| self.portals.get(id.0))
    }

    pub fn get_portal(&self, id: PortalId) -> Option<&Portal> {
        self.portals.get(id.0)
    }

    pub fn portals(&self) -> impl Iterator<Item = &Portal> {
        self.portals.iter()
    }

    /// Portals of a webspace in configuration order.
    pub fn portals_of<'a>(&'a self, webspace: &'a Webspace) -> impl Iterator<Item = &'a Portal> {
        webspace
            .portals
            .iter()
            .filter_map(|id| self.portals.get(id.0))
    }

    pub fn localization(&self, webspace_key: &str, code: &str) -> Option<&Localization> {
        self.webspace(webspace_key)?.localization(code)
    }

    pub fn segment(&self, webspace_key: &str, segment_key: &str) -> Option<&Segment> {
        self.webspace(webspace_key)?.segment(segment_key)
    }

    // ========================================================================
    // portal informations
    // ========================================================================

    /// Environment names, sorted.
    pub fn environments(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.environments.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Entries of one environment in insertion order.
    pub fn portal_informations(&self, environment: &str) -> &[PortalInformation] {
        self.environments
            .get(environment)
            .map(|env| env.entries.as_slice())
            .unwrap_or_default()
    }

    /// Exact `(environment, url)` lookup.
    pub fn portal_information(&self, environment: &str, url: &str) -> Option<&PortalInformation> {
        self.environments
            .get(environment)?
            .get(&normalize_request_url(url))
    }

    pub fn portal_informations_by_webspace(
        &self,
        environment: &str,
        webspace_key: &str,
    ) -> Vec<&PortalInformation> {
        let Some(&id) = self.webspace_keys.get(webspace_key) else {
            return Vec::new();
        };
        self.portal_informations(environment)
            .iter()
            .filter(|e| e.webspace == id)
            .collect()
    }

    /// Keys of webspaces that serve `url` in `environment`.
    pub fn webspace_keys_for_url(&self, environment: &str, url: &str) -> Vec<&str> {
        let request = normalize_request_url(url);
        let mut ids: Vec<WebspaceId> = self
            .portal_informations(environment)
            .iter()
            .filter(|e| e.match_request(&request).is_some())
            .map(|e| e.webspace)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.into_iter()
            .filter_map(|id| self.webspaces.get(id.0))
            .map(|w| w.key.as_str())
            .collect()
    }

    /// Urls of one environment in insertion order.
    pub fn urls_for_environment(&self, environment: &str) -> Vec<&str> {
        self.portal_informations(environment)
            .iter()
            .map(|e| e.url.as_str())
            .collect()
    }

    /// Total number of entries across all environments.
    pub fn len(&self) -> usize {
        self.environments.values().map(|e| e.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Localization an entry resolved to, if any.
    pub fn entry_localization(&self, entry: &PortalInformation) -> Option<&Localization> {
        let webspace = self.webspaces.get(entry.webspace.0)?;
        webspace.localizations.get(entry.localization()?)
    }

    pub fn entry_segment(&self, entry: &PortalInformation) -> Option<&Segment> {
        let webspace = self.webspaces.get(entry.webspace.0)?;
        webspace.segments.get(entry.segment()?.0)
    }

    // ========================================================================
    // request resolution
    // ========================================================================

    /// Resolve an incoming request url.
    ///
    /// The candidate matching the longest part of the request wins, then the
    /// higher priority, then the earliest entry.
    pub fn match_request(&self, environment: &str, url: &str) -> Option<RequestMatch<'_>> {
        let request = normalize_request_url(url);

        let mut best: Option<((usize, u8), &PortalInformation, String)> = None;
        for entry in self.portal_informations(environment) {
            let Some(rest) = entry.match_request(&request) else {
                continue;
            };
            let matched = if rest == "/" {
                request.len()
            } else {
                request.len() - rest.len()
            };
            let rank = (matched, entry.priority);
            if best.as_ref().is_none_or(|(current, _, _)| rank > *current) {
                best = Some((rank, entry, rest));
            }
        }

        let (_, entry, resource_locator) = best?;
        Some(RequestMatch {
            entry,
            webspace: self.webspaces.get(entry.webspace.0)?,
            portal: self.portals.get(entry.portal().0)?,
            localization: self.entry_localization(entry),
            segment: self.entry_segment(entry),
            resource_locator,
        })
    }

    /// All public urls of a resource locator for one locale.
    ///
    /// Locale-specific portal entries come before locale-agnostic ones, `main`
    /// entries first within each group.
    pub fn find_urls_by_resource_locator(
        &self,
        resource_locator: &str,
        environment: &str,
        locale: &str,
        webspace_key: &str,
    ) -> Vec<String> {
        let locale = locale.to_lowercase().replace('-', "_");

        let mut ranked: Vec<(u8, &PortalInformation)> = self
            .portal_informations_by_webspace(environment, webspace_key)
            .into_iter()
            .filter(|e| e.is_portal())
            .filter_map(|e| {
                let rank = match self.entry_localization(e) {
                    Some(l) if l.code() == locale => 0,
                    Some(_) => return None,
                    None => 2,
                };
                Some((if e.is_main() { rank } else { rank + 1 }, e))
            })
            .collect();
        // Stable sort keeps insertion order within a rank.
        ranked.sort_by_key(|(rank, _)| *rank);

        ranked
            .into_iter()
            .map(|(_, e)| join_url(&e.url, resource_locator))
            .collect()
    }

    /// Preferred public url of a resource locator for one locale.
    pub fn find_url_by_resource_locator(
        &self,
        resource_locator: &str,
        environment: &str,
        locale: &str,
        webspace_key: &str,
    ) -> Option<String> {
        self.find_urls_by_resource_locator(resource_locator, environment, locale, webspace_key)
            .into_iter()
            .next()
    }
}

fn join_url(base: &str, resource_locator: &str) -> String {
    let rl = resource_locator.trim_end_matches('/');
    if rl.is_empty() {
        base.to_string()
    } else if rl.starts_with('/') {
        format!("{base}{rl}")
    } else {
        format!("{base}/{rl}")
    }
}
