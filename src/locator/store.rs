//! Persisted resource locators and their history.
//!
//! Routes are scoped by `(webspace, locale, segment)`. Within a scope a path
//! is owned by at most one node; every node has at most one current path.
//! Replaced paths stay as history and answer with the node's current path.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::Serialize;

use super::StoreError;

/// Uniqueness scope of a resource locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RouteScope {
    pub webspace: String,
    pub locale: String,
    pub segment: Option<String>,
}

impl RouteScope {
    pub fn new(webspace: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            webspace: webspace.into(),
            locale: locale.into(),
            segment: None,
        }
    }

    pub fn with_segment(mut self, segment: Option<&str>) -> Self {
        self.segment = segment.map(str::to_string);
        self
    }
}

/// A stored path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
    pub path: String,
    /// Node owning the path.
    pub uuid: String,
    pub history: bool,
    /// Current path of the owner when this is a history record.
    pub target: Option<String>,
}

/// Persistence and uniqueness of resource locators.
pub trait PathStore: Send + Sync {
    /// Whether no current route other than `except`'s owns `path`.
    fn is_unique(&self, scope: &RouteScope, path: &str, except: Option<&str>) -> bool;

    /// Make `path` the current route of `uuid`.
    ///
    /// Check and write are atomic. Returns the previous current path, which
    /// becomes history.
    fn save(&self, scope: &RouteScope, path: &str, uuid: &str) -> Result<Option<String>, StoreError>;

    fn load_by_path(&self, scope: &RouteScope, path: &str) -> Option<RouteRecord>;

    /// Current route of a node.
    fn load_by_uuid(&self, scope: &RouteScope, uuid: &str) -> Option<RouteRecord>;

    /// History routes of a node, newest first.
    fn load_history(&self, scope: &RouteScope, uuid: &str) -> Vec<RouteRecord>;

    /// Remove current and historic routes of `uuid` in every webspace.
    /// Returns the number of removed routes.
    fn delete_by_id(&self, uuid: &str, locale: &str, segment: Option<&str>) -> usize;
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Clone)]
struct Route {
    uuid: String,
    history: bool,
    /// Write sequence, orders history.
    sequence: u64,
}

#[derive(Debug, Default)]
struct ScopeTable {
    /// path -> route
    routes: FxHashMap<String, Route>,
    /// uuid -> current path
    current: FxHashMap<String, String>,
}

impl ScopeTable {
    fn record(&self, path: &str, route: &Route) -> RouteRecord {
        RouteRecord {
            path: path.to_string(),
            uuid: route.uuid.clone(),
            history: route.history,
            target: route
                .history
                .then(|| self.current.get(&route.uuid).cloned())
                .flatten(),
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    scopes: FxHashMap<RouteScope, ScopeTable>,
    sequence: u64,
}

/// Thread-safe in-memory [`PathStore`].
///
/// One lock guards all tables, so the uniqueness check and the write of
/// [`PathStore::save`] form a single critical section.
#[derive(Debug, Default)]
pub struct MemoryPathStore {
    tables: Mutex<Tables>,
}

impl MemoryPathStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of current routes across all scopes.
    pub fn len(&self) -> usize {
        self.tables
            .lock()
            .scopes
            .values()
            .map(|t| t.current.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PathStore for MemoryPathStore {
    fn is_unique(&self, scope: &RouteScope, path: &str, except: Option<&str>) -> bool {
        let tables = self.tables.lock();
        let Some(table) = tables.scopes.get(scope) else {
            return true;
        };
        table
            .routes
            .get(path)
            .is_none_or(|route| route.history || Some(route.uuid.as_str()) == except)
    }

    fn save(&self, scope: &RouteScope, path: &str, uuid: &str) -> Result<Option<String>, StoreError> {
        let mut tables = self.tables.lock();
        tables.sequence += 1;
        let sequence = tables.sequence;
        let table = tables.scopes.entry(scope.clone()).or_default();

        if let Some(route) = table.routes.get(path)
            && !route.history
            && route.uuid != uuid
        {
            return Err(StoreError::Conflict {
                path: path.to_string(),
                owner: route.uuid.clone(),
            });
        }

        let previous = table.current.get(uuid).cloned();
        if previous.as_deref() == Some(path) {
            return Ok(None);
        }
        if let Some(previous) = &previous
            && let Some(route) = table.routes.get_mut(previous)
        {
            route.history = true;
            route.sequence = sequence;
        }

        // A history path is taken over by the new owner.
        table.routes.insert(
            path.to_string(),
            Route {
                uuid: uuid.to_string(),
                history: false,
                sequence,
            },
        );
        table.current.insert(uuid.to_string(), path.to_string());

        Ok(previous)
    }

    fn load_by_path(&self, scope: &RouteScope, path: &str) -> Option<RouteRecord> {
        let tables = self.tables.lock();
        let table = tables.scopes.get(scope)?;
        table.routes.get(path).map(|route| table.record(path, route))
    }

    fn load_by_uuid(&self, scope: &RouteScope, uuid: &str) -> Option<RouteRecord> {
        let tables = self.tables.lock();
        let table = tables.scopes.get(scope)?;
        let path = table.current.get(uuid)?;
        table.routes.get(path).map(|route| table.record(path, route))
    }

    fn load_history(&self, scope: &RouteScope, uuid: &str) -> Vec<RouteRecord> {
        let tables = self.tables.lock();
        let Some(table) = tables.scopes.get(scope) else {
            return Vec::new();
        };

        let mut history: Vec<(&String, &Route)> = table
            .routes
            .iter()
            .filter(|(_, route)| route.history && route.uuid == uuid)
            .collect();
        history.sort_by(|a, b| b.1.sequence.cmp(&a.1.sequence));
        history
            .into_iter()
            .map(|(path, route)| table.record(path, route))
            .collect()
    }

    fn delete_by_id(&self, uuid: &str, locale: &str, segment: Option<&str>) -> usize {
        let mut tables = self.tables.lock();
        let mut removed = 0;
        for (scope, table) in tables.scopes.iter_mut() {
            if scope.locale != locale || scope.segment.as_deref() != segment {
                continue;
            }
            let before = table.routes.len();
            table.routes.retain(|_, route| route.uuid != uuid);
            removed += before - table.routes.len();
            table.current.remove(uuid);
        }
        removed
    }
}
