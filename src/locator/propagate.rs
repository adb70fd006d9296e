//! Route propagation for tree mutations.
//!
//! | Event   | Draft segment | Live segment | Route     |
//! |---------|---------------|--------------|-----------|
//! | move    | regenerated   | regenerated  | re-saved  |
//! | copy    | regenerated   | -            | -         |
//! | publish | -             | := draft     | saved     |

use serde::Serialize;

use super::resolver::{ResourceLocatorResolver, ResourceSegmentDocument};
use super::store::{PathStore, RouteScope};
use super::tree::{ContentNode, ContentTree, RedirectType, Workspace};
use super::ResourceLocatorError;
use crate::config::ResourceLocatorStrategy;
use crate::debug;

type Result<T> = std::result::Result<T, ResourceLocatorError>;

/// Locales touched by one propagation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropagationReport {
    /// Locales whose segments were rewritten.
    pub updated: Vec<String>,
    /// Routes saved along the way.
    pub routes: Vec<String>,
    /// Locales left alone (redirects, missing segments).
    pub skipped: Vec<String>,
}

impl PropagationReport {
    pub fn is_noop(&self) -> bool {
        self.updated.is_empty() && self.routes.is_empty()
    }

    fn skip(&mut self, uuid: &str, locale: &str, reason: &str) {
        debug!("route"; "skip {} ({}): {}", uuid, locale, reason);
        self.skipped.push(locale.to_string());
    }
}

/// Recompute the segments of a node that got a new parent.
pub fn on_move<T: ContentTree, S: PathStore>(
    resolver: &ResourceLocatorResolver<T, S>,
    uuid: &str,
    locale: &str,
) -> Result<PropagationReport> {
    let node = load(resolver, uuid, locale)?;
    let Some(webspace) = node.webspace.as_deref() else {
        return Ok(PropagationReport::default());
    };
    if resolver.strategy(webspace) != ResourceLocatorStrategy::TreeLeafEdit {
        debug!("route"; "{} keeps its paths ({:?})", uuid, resolver.strategy(webspace));
        return Ok(PropagationReport::default());
    }
    update_routes(resolver, &node, webspace, true)
}

/// Recompute the draft segments of a freshly copied node.
pub fn on_copy<T: ContentTree, S: PathStore>(
    resolver: &ResourceLocatorResolver<T, S>,
    copy_uuid: &str,
    locale: &str,
) -> Result<PropagationReport> {
    let node = load(resolver, copy_uuid, locale)?;
    let Some(webspace) = node.webspace.as_deref() else {
        return Ok(PropagationReport::default());
    };
    update_routes(resolver, &node, webspace, false)
}

/// Save the draft segment as public route and copy it to the live workspace.
pub fn on_publish<T: ContentTree, S: PathStore>(
    resolver: &ResourceLocatorResolver<T, S>,
    uuid: &str,
    locale: &str,
) -> Result<PropagationReport> {
    let node = load(resolver, uuid, locale)?;
    let mut report = PropagationReport::default();
    let Some(webspace) = node.webspace.as_deref() else {
        return Ok(report);
    };
    if node.is_home {
        report.skip(uuid, locale, "home");
        return Ok(report);
    }
    if node.redirect != RedirectType::None {
        report.skip(uuid, locale, "redirect");
        return Ok(report);
    }

    let tree = resolver.tree();
    let Some(draft) = tree.resource_segment(Workspace::Draft, uuid, locale) else {
        report.skip(uuid, locale, "no resource segment");
        return Ok(report);
    };

    let scope = RouteScope::new(webspace, locale);
    resolver.save(&ResourceSegmentDocument::new(uuid, scope, draft.as_str()))?;
    tree.set_resource_segment(Workspace::Live, uuid, locale, &draft)?;

    report.updated.push(locale.to_string());
    report.routes.push(draft);
    Ok(report)
}

fn load<T: ContentTree, S: PathStore>(
    resolver: &ResourceLocatorResolver<T, S>,
    uuid: &str,
    locale: &str,
) -> Result<ContentNode> {
    resolver
        .tree()
        .find_node(uuid, locale)
        .ok_or_else(|| ResourceLocatorError::NotFound(uuid.to_string()))
}

fn update_routes<T: ContentTree, S: PathStore>(
    resolver: &ResourceLocatorResolver<T, S>,
    node: &ContentNode,
    webspace: &str,
    generate_routes: bool,
) -> Result<PropagationReport> {
    let tree = resolver.tree();
    let uuid = node.uuid.as_str();
    let parent = node.parent.as_deref();
    let mut report = PropagationReport::default();

    for locale in &node.locales {
        let localized = load(resolver, uuid, locale)?;
        if localized.redirect != RedirectType::None {
            report.skip(uuid, locale, "redirect");
            continue;
        }
        let Some(draft) = tree.resource_segment(Workspace::Draft, uuid, locale) else {
            report.skip(uuid, locale, "no resource segment");
            continue;
        };

        let scope = RouteScope::new(webspace, locale.as_str());
        let child = ResourceLocatorResolver::<T, S>::child_part(&draft);
        let path = resolver.generate(child, parent, &scope, Some(uuid))?;
        tree.set_resource_segment(Workspace::Draft, uuid, locale, &path)?;
        report.updated.push(locale.clone());

        if !generate_routes {
            continue;
        }
        let Some(live) = tree.resource_segment(Workspace::Live, uuid, locale) else {
            continue;
        };
        let child = ResourceLocatorResolver::<T, S>::child_part(&live);
        let path = resolver.generate(child, parent, &scope, Some(uuid))?;
        tree.set_resource_segment(Workspace::Live, uuid, locale, &path)?;
        if resolver.save(&ResourceSegmentDocument::new(uuid, scope, path.as_str()))? {
            report.routes.push(path);
        }
    }

    Ok(report)
}
