//! Routing index entries.

use serde::Serialize;

use super::matcher::UrlExpression;
use crate::webspace::{LocalizationId, PortalId, SegmentId, WebspaceId};

/// Url with explicit or expanded locale.
pub const PRIORITY_FULL: u8 = 10;
/// Url that serves every locale.
pub const PRIORITY_LOCALE_AGNOSTIC: u8 = 9;
/// Configured redirect url.
pub const PRIORITY_REDIRECT: u8 = 8;
/// Placeholder url with the placeholders removed, redirecting to the default locale.
pub const PRIORITY_PARTIAL: u8 = 5;
/// Wildcard custom url.
pub const PRIORITY_CUSTOM_URL: u8 = 3;

/// What a matched url resolves to.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    /// Serve content of a portal.
    Portal {
        portal: PortalId,
        localization: Option<LocalizationId>,
        segment: Option<SegmentId>,
        main: bool,
    },
    /// Answer with a redirect.
    Redirect {
        portal: PortalId,
        localization: Option<LocalizationId>,
        redirect: String,
    },
    /// Hand the request to custom-url content.
    CustomUrl {
        portal: PortalId,
        expression: UrlExpression,
    },
}

/// Resolved unit of the routing index, keyed by `(environment, url)`.
#[derive(Debug, Clone, Serialize)]
pub struct PortalInformation {
    pub url: String,
    pub webspace: WebspaceId,
    pub priority: u8,
    #[serde(flatten)]
    pub kind: EntryKind,
}

impl PortalInformation {
    pub fn portal(&self) -> PortalId {
        match &self.kind {
            EntryKind::Portal { portal, .. }
            | EntryKind::Redirect { portal, .. }
            | EntryKind::CustomUrl { portal, .. } => *portal,
        }
    }

    pub fn localization(&self) -> Option<LocalizationId> {
        match &self.kind {
            EntryKind::Portal { localization, .. } | EntryKind::Redirect { localization, .. } => {
                *localization
            }
            EntryKind::CustomUrl { .. } => None,
        }
    }

    pub fn segment(&self) -> Option<SegmentId> {
        match &self.kind {
            EntryKind::Portal { segment, .. } => *segment,
            _ => None,
        }
    }

    pub fn redirect(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Redirect { redirect, .. } => Some(redirect),
            _ => None,
        }
    }

    pub fn is_main(&self) -> bool {
        matches!(self.kind, EntryKind::Portal { main: true, .. })
    }

    pub fn is_portal(&self) -> bool {
        matches!(self.kind, EntryKind::Portal { .. })
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.kind, EntryKind::Redirect { .. })
    }

    pub fn is_custom_url(&self) -> bool {
        matches!(self.kind, EntryKind::CustomUrl { .. })
    }

    /// Short type name used in CLI output.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            EntryKind::Portal { .. } => "portal",
            EntryKind::Redirect { .. } => "redirect",
            EntryKind::CustomUrl { .. } => "custom_url",
        }
    }

    /// Resource locator part of `request` when this entry serves it.
    ///
    /// Plain entries match the exact url or a `/`-bounded prefix of it,
    /// custom urls match through their wildcard expression.
    pub fn match_request(&self, request: &str) -> Option<String> {
        if let EntryKind::CustomUrl { expression, .. } = &self.kind {
            return expression.match_remainder(request);
        }

        let rest = request.strip_prefix(self.url.as_str())?;
        if rest.is_empty() {
            Some("/".to_string())
        } else if rest.starts_with('/') {
            Some(rest.to_string())
        } else {
            None
        }
    }
}
