//! Shared routing index with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic index replacement. Readers
//! keep the `Arc` they loaded; a rebuild never disturbs in-flight requests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;

use crate::config::{ConfigError, RoutingConfig, WebspaceConfig};
use crate::index::{ConfigurationError, RoutingIndex, WebspaceRoutingIndexBuilder};
use crate::{debug, log};

/// Explicitly constructed holder of the current [`RoutingIndex`].
#[derive(Debug)]
pub struct RoutingIndexHandle {
    index: ArcSwap<RoutingIndex>,
    /// Hash of the config source the current index was built from (0 = unknown).
    source_hash: AtomicU64,
}

impl Default for RoutingIndexHandle {
    fn default() -> Self {
        Self::new(RoutingIndex::empty())
    }
}

impl RoutingIndexHandle {
    pub fn new(index: RoutingIndex) -> Self {
        Self {
            index: ArcSwap::from_pointee(index),
            source_hash: AtomicU64::new(0),
        }
    }

    /// Build from parsed configuration.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, ConfigurationError> {
        Ok(Self::new(config.build_index()?))
    }

    /// Current index snapshot.
    #[inline]
    pub fn load(&self) -> Arc<RoutingIndex> {
        self.index.load_full()
    }

    /// Build a new index and swap it in. The old index stays on failure.
    ///
    /// The swapped-in index no longer matches any recorded source, so the
    /// next [`reload_if_changed`](Self::reload_if_changed) always rebuilds.
    pub fn rebuild(&self, webspaces: &[WebspaceConfig]) -> Result<(), ConfigurationError> {
        self.swap(webspaces)?;
        self.source_hash.store(0, Ordering::Relaxed);
        Ok(())
    }

    fn swap(&self, webspaces: &[WebspaceConfig]) -> Result<(), ConfigurationError> {
        let index = WebspaceRoutingIndexBuilder::new(webspaces).build()?;
        self.index.store(Arc::new(index));
        Ok(())
    }

    /// Rebuild from TOML source if its content changed.
    ///
    /// Returns `Ok(true)` if the index was replaced, `Ok(false)` if unchanged.
    pub fn reload_if_changed(&self, source: &str) -> Result<bool, ConfigError> {
        let new_hash = crate::utils::hash::compute(source);
        if new_hash == self.source_hash.load(Ordering::Relaxed) {
            debug!("index"; "config unchanged, skipping rebuild");
            return Ok(false);
        }

        let config = RoutingConfig::from_str(source)?;
        config.validate()?;
        self.swap(&config.webspaces)?;
        self.source_hash.store(new_hash, Ordering::Relaxed);

        log!("index"; "routing index reloaded");
        Ok(true)
    }
}
