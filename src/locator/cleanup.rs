//! Resource locator cleanup and validation.
//!
//! ```text
//! "/Über uns & Team"  --de-->  "/ueber-uns-und-team"
//! "/Crème Brûlée!"    --fr-->  "/creme-brulee"
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{CleanupConfig, DEFAULT_REPLACERS, Replacers, SlugSeparator};

/// Structural rule every stored resource locator must pass.
static RE_VALID_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(/[a-z0-9][a-z0-9\-_]*)+$").unwrap());

/// Characters left after transliteration that never appear in a path.
static RE_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9/\-_]").unwrap());

/// Turns free text into a resource locator and checks stored ones.
pub trait PathCleanup: Send + Sync {
    /// Normalize `path` for `locale` (`de`, `de_at`, ...).
    fn cleanup(&self, path: &str, locale: &str) -> String;

    /// Whether `path` is structurally valid.
    fn validate(&self, path: &str) -> bool;
}

/// [`PathCleanup`] driven by the `[cleanup]` config section.
#[derive(Debug, Clone)]
pub struct PathCleaner {
    separator: char,
    replacers: BTreeMap<String, Replacers>,
}

impl Default for PathCleaner {
    fn default() -> Self {
        Self::new(&CleanupConfig::default())
    }
}

impl PathCleaner {
    pub fn new(config: &CleanupConfig) -> Self {
        Self {
            separator: config.separator.as_char(),
            replacers: config.replacers.clone(),
        }
    }

    pub fn with_separator(mut self, separator: SlugSeparator) -> Self {
        self.separator = separator.as_char();
        self
    }

    /// Locale table, then its language table, then the default table.
    fn tables<'a>(&'a self, locale: &str) -> Vec<&'a Replacers> {
        let locale = locale.to_lowercase().replace('-', "_");
        let language = locale.split('_').next().unwrap_or_default();

        let mut keys = vec![locale.as_str()];
        if language != locale {
            keys.push(language);
        }
        keys.push(DEFAULT_REPLACERS);

        keys.into_iter()
            .filter_map(|key| self.replacers.get(key))
            .collect()
    }

    /// Collapse separator runs and slashes, trim separators around `/`.
    fn tidy(&self, path: &str) -> String {
        let mut out = String::with_capacity(path.len());
        for segment in path.split('/') {
            let mut cleaned = String::with_capacity(segment.len());
            let mut pending = false;
            for c in segment.chars() {
                if c == self.separator {
                    pending = !cleaned.is_empty();
                    continue;
                }
                if pending {
                    cleaned.push(self.separator);
                    pending = false;
                }
                cleaned.push(c);
            }
            if cleaned.is_empty() {
                continue;
            }
            out.push('/');
            out.push_str(&cleaned);
        }

        if !path.starts_with('/') {
            return out.trim_start_matches('/').to_string();
        }
        if out.is_empty() {
            out.push('/');
        }
        out
    }
}

impl PathCleanup for PathCleaner {
    fn cleanup(&self, path: &str, locale: &str) -> String {
        let mut clean = path.to_lowercase();

        for table in self.tables(locale) {
            for (from, to) in table {
                let to = if to == "-" {
                    self.separator.to_string()
                } else {
                    to.clone()
                };
                clean = clean.replace(from.as_str(), &to);
            }
        }

        let clean = clean
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(&self.separator.to_string());
        let clean = deunicode::deunicode(&clean)
            .to_lowercase()
            .replace(char::is_whitespace, &self.separator.to_string());
        let clean = RE_DISALLOWED.replace_all(&clean, "");

        self.tidy(&clean)
    }

    fn validate(&self, path: &str) -> bool {
        RE_VALID_PATH.is_match(path)
    }
}
