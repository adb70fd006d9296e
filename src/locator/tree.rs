//! Content tree access needed for resource locator resolution.
//!
//! The resolver only reads the tree structure (parents, locales, redirects)
//! and the resource segment stored on each node per workspace:
//!
//! ```text
//! Draft workspace  ── unpublished resource segment (edited)
//! Live workspace   ── published resource segment (served)
//! ```

use std::collections::BTreeMap;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::ResourceLocatorError;

/// Representation of a content node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workspace {
    /// Unpublished draft.
    Draft,
    /// Published representation.
    Live,
}

/// Redirect setting of a localized node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RedirectType {
    #[default]
    None,
    /// Redirects to another node.
    Internal,
    /// Redirects to an external url.
    External,
}

/// A content node loaded in one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentNode {
    pub uuid: String,
    /// Tree path, e.g. `/sulu_io/about/team`.
    pub path: String,
    pub parent: Option<String>,
    /// Owning webspace. Nodes outside any webspace are never routed.
    pub webspace: Option<String>,
    /// Locale the node was loaded in.
    pub locale: String,
    /// Every locale the node has content for.
    pub locales: Vec<String>,
    /// Redirect of the loaded locale.
    pub redirect: RedirectType,
    pub is_home: bool,
}

/// Read/write access to the content tree.
pub trait ContentTree: Send + Sync {
    /// Load a node in `locale`; `None` when the uuid is unknown.
    fn find_node(&self, uuid: &str, locale: &str) -> Option<ContentNode>;

    /// Parent node loaded in the same locale.
    fn parent(&self, node: &ContentNode) -> Option<ContentNode> {
        node.parent
            .as_deref()
            .and_then(|uuid| self.find_node(uuid, &node.locale))
    }

    fn resource_segment(&self, workspace: Workspace, uuid: &str, locale: &str) -> Option<String>;

    fn set_resource_segment(
        &self,
        workspace: Workspace,
        uuid: &str,
        locale: &str,
        segment: &str,
    ) -> Result<(), ResourceLocatorError>;
}

// ============================================================================
// In-memory tree
// ============================================================================

/// Node definition for [`MemoryContentTree::insert`].
#[derive(Debug, Clone, Default)]
pub struct TreeNode {
    uuid: String,
    parent: Option<String>,
    webspace: Option<String>,
    locales: BTreeMap<String, Localized>,
    is_home: bool,
}

#[derive(Debug, Clone, Default)]
struct Localized {
    redirect: RedirectType,
    draft: Option<String>,
    live: Option<String>,
}

impl TreeNode {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_webspace(mut self, webspace: impl Into<String>) -> Self {
        self.webspace = Some(webspace.into());
        self
    }

    /// Add a locale with an optional draft resource segment.
    pub fn with_locale(mut self, locale: impl Into<String>, draft: Option<&str>) -> Self {
        self.locales.insert(
            locale.into(),
            Localized {
                draft: draft.map(str::to_string),
                ..Default::default()
            },
        );
        self
    }

    /// Mark a locale as published with the given live segment.
    pub fn with_live(mut self, locale: &str, live: &str) -> Self {
        self.locales.entry(locale.to_string()).or_default().live = Some(live.to_string());
        self
    }

    pub fn with_redirect(mut self, locale: &str, redirect: RedirectType) -> Self {
        self.locales.entry(locale.to_string()).or_default().redirect = redirect;
        self
    }

    pub fn home(mut self) -> Self {
        self.is_home = true;
        self
    }
}

/// Thread-safe in-memory [`ContentTree`].
#[derive(Debug, Default)]
pub struct MemoryContentTree {
    nodes: RwLock<FxHashMap<String, TreeNode>>,
}

impl MemoryContentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, node: TreeNode) {
        self.nodes.write().insert(node.uuid.clone(), node);
    }

    pub fn contains(&self, uuid: &str) -> bool {
        self.nodes.read().contains_key(uuid)
    }

    /// Re-parent a node.
    ///
    /// Returns false when either node is unknown or `new_parent` is the node
    /// itself or one of its descendants.
    pub fn move_node(&self, uuid: &str, new_parent: &str) -> bool {
        let mut nodes = self.nodes.write();
        if !nodes.contains_key(new_parent) || Self::is_ancestor_or_self(&nodes, uuid, new_parent) {
            return false;
        }
        match nodes.get_mut(uuid) {
            Some(node) => {
                node.parent = Some(new_parent.to_string());
                true
            }
            None => false,
        }
    }

    /// Copy a node below `new_parent` as `new_uuid`.
    ///
    /// The copy keeps the draft segments and is unpublished.
    pub fn copy_node(&self, uuid: &str, new_uuid: &str, new_parent: &str) -> bool {
        let mut nodes = self.nodes.write();
        if !nodes.contains_key(new_parent) {
            return false;
        }
        let Some(source) = nodes.get(uuid) else {
            return false;
        };

        let mut copy = source.clone();
        copy.uuid = new_uuid.to_string();
        copy.parent = Some(new_parent.to_string());
        copy.is_home = false;
        for localized in copy.locales.values_mut() {
            localized.live = None;
        }
        nodes.insert(copy.uuid.clone(), copy);
        true
    }

    /// Whether `ancestor` is `uuid` or lies on its parent chain.
    fn is_ancestor_or_self(nodes: &FxHashMap<String, TreeNode>, ancestor: &str, uuid: &str) -> bool {
        let mut seen = Vec::new();
        let mut current = Some(uuid);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            if seen.contains(&id) {
                return false;
            }
            seen.push(id);
            current = nodes.get(id).and_then(|n| n.parent.as_deref());
        }
        false
    }

    /// Tree path built from the uuids of the ancestors.
    fn path_of(nodes: &FxHashMap<String, TreeNode>, uuid: &str) -> String {
        let mut parts = vec![uuid];
        let mut current = nodes.get(uuid).and_then(|n| n.parent.as_deref());
        while let Some(parent) = current {
            // Cyclic parents are cut at the first repetition.
            if parts.contains(&parent) {
                break;
            }
            parts.push(parent);
            current = nodes.get(parent).and_then(|n| n.parent.as_deref());
        }
        parts.reverse();
        format!("/{}", parts.join("/"))
    }
}

impl ContentTree for MemoryContentTree {
    fn find_node(&self, uuid: &str, locale: &str) -> Option<ContentNode> {
        let nodes = self.nodes.read();
        let node = nodes.get(uuid)?;
        Some(ContentNode {
            uuid: node.uuid.clone(),
            path: Self::path_of(&nodes, uuid),
            parent: node.parent.clone(),
            webspace: node.webspace.clone(),
            locale: locale.to_string(),
            locales: node.locales.keys().cloned().collect(),
            redirect: node
                .locales
                .get(locale)
                .map(|l| l.redirect)
                .unwrap_or_default(),
            is_home: node.is_home,
        })
    }

    fn resource_segment(&self, workspace: Workspace, uuid: &str, locale: &str) -> Option<String> {
        let nodes = self.nodes.read();
        let localized = nodes.get(uuid)?.locales.get(locale)?;
        match workspace {
            Workspace::Draft => localized.draft.clone(),
            Workspace::Live => localized.live.clone(),
        }
    }

    fn set_resource_segment(
        &self,
        workspace: Workspace,
        uuid: &str,
        locale: &str,
        segment: &str,
    ) -> Result<(), ResourceLocatorError> {
        let mut nodes = self.nodes.write();
        let node = nodes
            .get_mut(uuid)
            .ok_or_else(|| ResourceLocatorError::NotFound(uuid.to_string()))?;
        let localized = node.locales.entry(locale.to_string()).or_default();
        let slot = match workspace {
            Workspace::Draft => &mut localized.draft,
            Workspace::Live => &mut localized.live,
        };
        *slot = Some(segment.to_string());
        Ok(())
    }
}
