//! Generation, persistence and lookup of resource locators.
//!
//! A node's route moves through these states:
//!
//! ```text
//! Unrouted ──generate──> Generated ──save──> Persisted ──┬── Moved      (re-saved below a new parent)
//!                                                        ├── Copied     (draft regenerated, no route)
//!                                                        └── Superseded (old path kept as history)
//! ```

use rustc_hash::{FxHashMap, FxHashSet};

use super::cleanup::{PathCleaner, PathCleanup};
use super::generator::{ResourceLocatorGenerator, generator_for};
use super::store::{PathStore, RouteRecord, RouteScope};
use super::tree::ContentTree;
use super::ResourceLocatorError;
use crate::config::ResourceLocatorStrategy;
use crate::debug;
use crate::index::RoutingIndex;

type Result<T> = std::result::Result<T, ResourceLocatorError>;

/// A node's resource segment about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSegmentDocument {
    pub uuid: String,
    pub scope: RouteScope,
    pub resource_segment: String,
}

impl ResourceSegmentDocument {
    pub fn new(uuid: impl Into<String>, scope: RouteScope, resource_segment: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            scope,
            resource_segment: resource_segment.into(),
        }
    }
}

/// Resolves resource locators against a content tree and a path store.
pub struct ResourceLocatorResolver<T, S> {
    tree: T,
    store: S,
    cleaner: Box<dyn PathCleanup>,
    /// Replaces the strategy's generator when set.
    generator: Option<Box<dyn ResourceLocatorGenerator>>,
    strategies: FxHashMap<String, ResourceLocatorStrategy>,
}

impl<T: ContentTree, S: PathStore> ResourceLocatorResolver<T, S> {
    pub fn new(tree: T, store: S) -> Self {
        Self {
            tree,
            store,
            cleaner: Box::new(PathCleaner::default()),
            generator: None,
            strategies: FxHashMap::default(),
        }
    }

    pub fn with_cleaner(mut self, cleaner: impl PathCleanup + 'static) -> Self {
        self.cleaner = Box::new(cleaner);
        self
    }

    pub fn with_generator(mut self, generator: impl ResourceLocatorGenerator + 'static) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }

    pub fn with_strategy(mut self, webspace: &str, strategy: ResourceLocatorStrategy) -> Self {
        self.strategies.insert(webspace.to_string(), strategy);
        self
    }

    /// Take the strategy of every webspace in the index.
    pub fn with_index(mut self, index: &RoutingIndex) -> Self {
        for webspace in index.webspaces() {
            self.strategies
                .insert(webspace.key.clone(), webspace.resource_locator_strategy);
        }
        self
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Strategy of a webspace (`tree_leaf_edit` when not configured).
    pub fn strategy(&self, webspace: &str) -> ResourceLocatorStrategy {
        self.strategies.get(webspace).copied().unwrap_or_default()
    }

    // ========================================================================
    // generation
    // ========================================================================

    /// Generate a unique resource locator for `title` below `parent_uuid`.
    ///
    /// `uuid` is the node being routed; its own current route never counts
    /// as a collision.
    pub fn generate(
        &self,
        title: &str,
        parent_uuid: Option<&str>,
        scope: &RouteScope,
        uuid: Option<&str>,
    ) -> Result<String> {
        let title = title.replace('/', "-");
        let parent_path = self.closest_resource_locator(parent_uuid, scope)?;

        let path = match &self.generator {
            Some(generator) => generator.generate(&title, parent_path.as_deref()),
            None => generator_for(self.strategy(&scope.webspace))
                .generate(&title, parent_path.as_deref()),
        };
        let path = self.cleaner.cleanup(&path, &scope.locale);

        let base = parent_path.as_deref().unwrap_or_default().trim_end_matches('/');
        if path.trim_end_matches('/') == base {
            return Err(ResourceLocatorError::Generator {
                title,
                parent: parent_path,
            });
        }

        Ok(self.unique_path(&path, scope, uuid))
    }

    /// Route of the nearest routed ancestor, starting at `uuid` itself.
    ///
    /// A home node stands for `/`. Reaching a node without parent (or a
    /// node already visited on a cyclic chain) yields `None`; an unknown
    /// start node is an error.
    fn closest_resource_locator(
        &self,
        uuid: Option<&str>,
        scope: &RouteScope,
    ) -> Result<Option<String>> {
        let Some(uuid) = uuid else {
            return Ok(None);
        };
        let mut node = self
            .tree
            .find_node(uuid, &scope.locale)
            .ok_or_else(|| ResourceLocatorError::NotFound(uuid.to_string()))?;

        let mut visited = FxHashSet::default();
        loop {
            if !visited.insert(node.uuid.clone()) {
                debug!("route"; "cyclic parent chain at {}", node.uuid);
                return Ok(None);
            }
            if let Some(route) = self.store.load_by_uuid(scope, &node.uuid) {
                return Ok(Some(route.path));
            }
            if node.is_home {
                return Ok(Some("/".to_string()));
            }
            match self.tree.parent(&node) {
                Some(parent) => node = parent,
                None => return Ok(None),
            }
        }
    }

    /// Append `-1`, `-2`, ... until the path is free in `scope`.
    fn unique_path(&self, path: &str, scope: &RouteScope, uuid: Option<&str>) -> String {
        if self.store.is_unique(scope, path, uuid) {
            return path.to_string();
        }
        (1u32..)
            .map(|i| format!("{path}-{i}"))
            .find(|candidate| self.store.is_unique(scope, candidate, uuid))
            .unwrap_or_else(|| path.to_string())
    }

    // ========================================================================
    // persistence
    // ========================================================================

    /// Persist the document's resource segment as its current route.
    ///
    /// Returns `false` when nothing changed.
    pub fn save(&self, document: &ResourceSegmentDocument) -> Result<bool> {
        let scope = &document.scope;
        let path = document.resource_segment.as_str();

        let current = self.store.load_by_uuid(scope, &document.uuid);
        if current.as_ref().is_some_and(|route| route.path == path) {
            return Ok(false);
        }

        if !self.is_valid(path) {
            return Err(ResourceLocatorError::Validation(path.to_string()));
        }

        if !self.store.is_unique(scope, path, None)
            && let Some(owner) = self.store.load_by_path(scope, path)
            && !owner.history
        {
            if owner.uuid == document.uuid {
                return Ok(false);
            }
            return Err(ResourceLocatorError::Conflict {
                path: path.to_string(),
                owner: owner.uuid,
            });
        }

        let previous = self.store.save(scope, path, &document.uuid)?;
        match previous {
            Some(previous) => {
                debug!("route"; "{} -> {} ({}, history kept)", previous, path, document.uuid)
            }
            None => debug!("route"; "{} saved for {}", path, document.uuid),
        }
        Ok(true)
    }

    pub fn delete_by_id(&self, uuid: &str, locale: &str, segment: Option<&str>) -> usize {
        let removed = self.store.delete_by_id(uuid, locale, segment);
        debug!("route"; "removed {} route(s) of {}", removed, uuid);
        removed
    }

    // ========================================================================
    // lookups
    // ========================================================================

    pub fn load_by_content_uuid(&self, uuid: &str, scope: &RouteScope) -> Result<String> {
        self.store
            .load_by_uuid(scope, uuid)
            .map(|route| route.path)
            .ok_or_else(|| ResourceLocatorError::NotFound(uuid.to_string()))
    }

    /// Owner of a path. A history path answers with where it moved to.
    pub fn load_by_resource_locator(&self, path: &str, scope: &RouteScope) -> Result<String> {
        let route = self
            .store
            .load_by_path(scope, path)
            .ok_or_else(|| ResourceLocatorError::NotFound(path.to_string()))?;

        match (route.history, route.target) {
            (false, _) => Ok(route.uuid),
            (true, Some(target)) => Err(ResourceLocatorError::Moved {
                path: path.to_string(),
                target,
            }),
            (true, None) => Err(ResourceLocatorError::NotFound(path.to_string())),
        }
    }

    /// History routes of a node, newest first (empty when none).
    pub fn load_history_by_content_uuid(&self, uuid: &str, scope: &RouteScope) -> Vec<RouteRecord> {
        self.store.load_history(scope, uuid)
    }

    pub fn is_valid(&self, path: &str) -> bool {
        !path.is_empty() && path != "/" && self.cleaner.validate(path)
    }

    /// Last segment of a resource locator (`/about/team` -> `team`).
    pub fn child_part(path: &str) -> &str {
        let path = path.trim_end_matches('/');
        path.rsplit('/').next().unwrap_or(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::{MemoryContentTree, MemoryPathStore, ShortGenerator, TreeNode};

    type Resolver = ResourceLocatorResolver<MemoryContentTree, MemoryPathStore>;

    fn scope() -> RouteScope {
        RouteScope::new("sulu_io", "en")
    }

    /// home
    /// ├── about       (/about)
    /// │   └── folder  (no route)
    /// └── orphan-root (no parent, no route)
    fn resolver() -> Resolver {
        let tree = MemoryContentTree::new();
        tree.insert(TreeNode::new("home").with_webspace("sulu_io").with_locale("en", None).home());
        tree.insert(
            TreeNode::new("about")
                .with_parent("home")
                .with_webspace("sulu_io")
                .with_locale("en", Some("/about")),
        );
        tree.insert(
            TreeNode::new("folder")
                .with_parent("about")
                .with_webspace("sulu_io")
                .with_locale("en", None),
        );
        tree.insert(TreeNode::new("orphan").with_webspace("sulu_io").with_locale("en", None));

        let resolver = ResourceLocatorResolver::new(tree, MemoryPathStore::new());
        resolver
            .save(&ResourceSegmentDocument::new("about", scope(), "/about"))
            .unwrap();
        resolver
    }

    #[test]
    fn test_generate_root_level() {
        let resolver = resolver();
        assert_eq!(resolver.generate("Contact Us", None, &scope(), None).unwrap(), "/contact-us");
        assert_eq!(
            resolver.generate("Contact", Some("home"), &scope(), None).unwrap(),
            "/contact"
        );
    }

    #[test]
    fn test_generate_below_parent_and_skip_unrouted_ancestor() {
        let resolver = resolver();
        assert_eq!(
            resolver.generate("Team", Some("about"), &scope(), None).unwrap(),
            "/about/team"
        );
        assert_eq!(
            resolver.generate("Jobs", Some("folder"), &scope(), None).unwrap(),
            "/about/jobs"
        );
        assert_eq!(
            resolver.generate("Lost", Some("orphan"), &scope(), None).unwrap(),
            "/lost"
        );
    }

    #[test]
    fn test_generate_replaces_slash_in_title() {
        let resolver = resolver();
        assert_eq!(
            resolver.generate("Q&A / FAQ", None, &scope(), None).unwrap(),
            "/qanda-faq"
        );
    }

    #[test]
    fn test_generate_disambiguates_siblings() {
        let resolver = resolver();
        let mut paths = Vec::new();
        for uuid in ["news-a", "news-b", "news-c"] {
            let path = resolver.generate("News", Some("about"), &scope(), Some(uuid)).unwrap();
            assert!(resolver.is_valid(&path), "{path}");
            assert!(
                resolver
                    .save(&ResourceSegmentDocument::new(uuid, scope(), path.as_str()))
                    .unwrap()
            );
            paths.push(path);
        }
        assert_eq!(paths, vec!["/about/news", "/about/news-1", "/about/news-2"]);

        // The node's own route is not a collision.
        assert_eq!(
            resolver.generate("News", Some("about"), &scope(), Some("news-a")).unwrap(),
            "/about/news"
        );
    }

    #[test]
    fn test_generate_fails_without_new_segment() {
        let resolver = resolver();
        assert_eq!(
            resolver.generate("!!!", Some("about"), &scope(), None),
            Err(ResourceLocatorError::Generator {
                title: "!!!".into(),
                parent: Some("/about".into()),
            })
        );
        assert!(matches!(
            resolver.generate("", None, &scope(), None),
            Err(ResourceLocatorError::Generator { parent: None, .. })
        ));
    }

    #[test]
    fn test_generate_terminates_on_cyclic_parents() {
        let resolver = resolver();
        resolver
            .tree()
            .insert(TreeNode::new("a").with_parent("b").with_locale("en", None));
        resolver
            .tree()
            .insert(TreeNode::new("b").with_parent("a").with_locale("en", None));

        assert_eq!(resolver.generate("x", Some("a"), &scope(), None).unwrap(), "/x");
    }

    #[test]
    fn test_generate_unknown_parent() {
        let resolver = resolver();
        assert_eq!(
            resolver.generate("x", Some("missing"), &scope(), None),
            Err(ResourceLocatorError::NotFound("missing".into()))
        );
    }

    #[test]
    fn test_short_strategy_and_custom_generator() {
        let resolver = resolver().with_strategy("sulu_io", ResourceLocatorStrategy::Short);
        assert_eq!(
            resolver.generate("Team", Some("about"), &scope(), None).unwrap(),
            "/team"
        );

        let resolver = self::resolver().with_generator(ShortGenerator);
        assert_eq!(
            resolver.generate("Team", Some("about"), &scope(), None).unwrap(),
            "/team"
        );
    }

    #[test]
    fn test_save_is_idempotent() {
        let resolver = resolver();
        let doc = ResourceSegmentDocument::new("about", scope(), "/about");
        assert!(!resolver.save(&doc).unwrap());
        assert!(!resolver.save(&doc).unwrap());
        assert_eq!(resolver.load_by_content_uuid("about", &scope()).unwrap(), "/about");
    }

    #[test]
    fn test_save_rejects_invalid_paths() {
        let resolver = resolver();
        for path in ["/", "", "about", "/About"] {
            assert_eq!(
                resolver.save(&ResourceSegmentDocument::new("x", scope(), path)),
                Err(ResourceLocatorError::Validation(path.into()))
            );
        }
    }

    #[test]
    fn test_save_conflict() {
        let resolver = resolver();
        assert_eq!(
            resolver.save(&ResourceSegmentDocument::new("other", scope(), "/about")),
            Err(ResourceLocatorError::Conflict {
                path: "/about".into(),
                owner: "about".into(),
            })
        );
    }

    #[test]
    fn test_save_keeps_history_and_reports_moved() {
        let resolver = resolver();
        assert!(
            resolver
                .save(&ResourceSegmentDocument::new("about", scope(), "/about-us"))
                .unwrap()
        );

        assert_eq!(
            resolver.load_by_resource_locator("/about", &scope()),
            Err(ResourceLocatorError::Moved {
                path: "/about".into(),
                target: "/about-us".into(),
            })
        );
        assert_eq!(
            resolver.load_by_resource_locator("/about-us", &scope()).unwrap(),
            "about"
        );
        let history = resolver.load_history_by_content_uuid("about", &scope());
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].path, "/about");
    }

    #[test]
    fn test_lookups_not_found() {
        let resolver = resolver();
        assert_eq!(
            resolver.load_by_content_uuid("folder", &scope()),
            Err(ResourceLocatorError::NotFound("folder".into()))
        );
        assert!(matches!(
            resolver.load_by_resource_locator("/nothing", &scope()),
            Err(ResourceLocatorError::NotFound(_))
        ));
        assert!(resolver.load_history_by_content_uuid("folder", &scope()).is_empty());
    }

    #[test]
    fn test_delete_by_id() {
        let resolver = resolver();
        resolver
            .save(&ResourceSegmentDocument::new("about", scope(), "/about-us"))
            .unwrap();
        assert_eq!(resolver.delete_by_id("about", "en", None), 2);
        assert!(resolver.load_by_content_uuid("about", &scope()).is_err());
        assert!(resolver.store().is_empty());
    }

    #[test]
    fn test_is_valid_and_child_part() {
        let resolver = resolver();
        assert!(resolver.is_valid("/about/team"));
        assert!(!resolver.is_valid("/"));
        assert!(!resolver.is_valid(""));

        assert_eq!(Resolver::child_part("/about/team"), "team");
        assert_eq!(Resolver::child_part("/about/"), "about");
        assert_eq!(Resolver::child_part("team"), "team");
    }
}
