//! Localization tree stored as an arena.
//!
//! Children keep an explicit parent index instead of a back-reference, so the
//! tree is plain data: cloneable, serializable and `Send + Sync`.

use serde::Serialize;

use crate::config::section::LocalizationConfig;

/// Index of a localization inside its webspace's [`LocalizationTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LocalizationId(pub(crate) usize);

impl LocalizationId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A language (+ optional country) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Localization {
    pub language: String,
    pub country: Option<String>,
    /// Locale whose content is shown in place of this one.
    pub shadow: Option<String>,
    pub default: bool,
    pub parent: Option<LocalizationId>,
    pub children: Vec<LocalizationId>,
}

impl Localization {
    pub fn new(language: impl Into<String>, country: Option<String>) -> Self {
        Self {
            language: language.into(),
            country,
            shadow: None,
            default: false,
            parent: None,
            children: Vec::new(),
        }
    }

    fn from_config(config: &LocalizationConfig, parent: Option<LocalizationId>) -> Self {
        Self {
            language: config.language.clone(),
            country: config.country.clone().filter(|c| !c.is_empty()),
            shadow: config.shadow.clone(),
            default: config.default,
            parent,
            children: Vec::new(),
        }
    }

    /// Locale code joined with `_`, e.g. `de_at` or `en`.
    pub fn code(&self) -> String {
        self.code_with('_')
    }

    /// Locale code joined with the given separator, lower-cased.
    pub fn code_with(&self, separator: char) -> String {
        match &self.country {
            Some(country) => format!(
                "{}{}{}",
                self.language.to_lowercase(),
                separator,
                country.to_lowercase()
            ),
            None => self.language.to_lowercase(),
        }
    }
}

impl std::fmt::Display for Localization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code())
    }
}

/// Localizations of one webspace, roots in configuration order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LocalizationTree {
    nodes: Vec<Localization>,
    roots: Vec<LocalizationId>,
}

impl LocalizationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root localization and its whole subtree.
    pub fn push_root(&mut self, config: &LocalizationConfig) -> LocalizationId {
        let id = self.build_subtree(config, None);
        self.roots.push(id);
        id
    }

    /// Depth-first descent: the parent index is fixed before recursing into
    /// the children, each child is attached to its parent after its own
    /// subtree is complete.
    fn build_subtree(
        &mut self,
        config: &LocalizationConfig,
        parent: Option<LocalizationId>,
    ) -> LocalizationId {
        let id = LocalizationId(self.nodes.len());
        self.nodes.push(Localization::from_config(config, parent));

        for child in &config.children {
            let child_id = self.build_subtree(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }

        id
    }

    pub fn get(&self, id: LocalizationId) -> Option<&Localization> {
        self.nodes.get(id.0)
    }

    pub fn roots(&self) -> &[LocalizationId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All localizations in depth-first (pre-order) order.
    pub fn iter(&self) -> impl Iterator<Item = (LocalizationId, &Localization)> {
        self.flatten()
            .into_iter()
            .map(move |id| (id, &self.nodes[id.0]))
    }

    /// Ids in depth-first pre-order starting from the roots.
    pub fn flatten(&self) -> Vec<LocalizationId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<LocalizationId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    /// Find a localization by `language_country` code.
    pub fn find(&self, code: &str) -> Option<LocalizationId> {
        let code = code.to_lowercase().replace('-', "_");
        self.nodes
            .iter()
            .position(|l| l.code() == code)
            .map(LocalizationId)
    }

    /// First localization marked default, falling back to the first root.
    pub fn default_localization(&self) -> Option<LocalizationId> {
        self.nodes
            .iter()
            .position(|l| l.default)
            .map(LocalizationId)
            .or_else(|| self.roots.first().copied())
    }
}
