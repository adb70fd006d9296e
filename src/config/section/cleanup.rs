//! `[cleanup]` section: resource locator normalization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Separator character used for whitespace and punctuation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugSeparator {
    /// Dash separator (`-`) (default).
    #[default]
    Dash,
    /// Underscore separator (`_`).
    Underscore,
}

impl SlugSeparator {
    /// Get the character representation.
    pub const fn as_char(&self) -> char {
        match self {
            Self::Dash => '-',
            Self::Underscore => '_',
        }
    }
}

/// Replacement table: search text -> replacement.
pub type Replacers = BTreeMap<String, String>;

/// Key of the replacer table applied to every locale.
pub const DEFAULT_REPLACERS: &str = "default";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CleanupConfig {
    /// Separator character for spaces and punctuation.
    pub separator: SlugSeparator,
    /// Locale (language part) -> replacers. `default` applies to all locales,
    /// locale tables run first.
    pub replacers: BTreeMap<String, Replacers>,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        let table = |pairs: &[(&str, &str)]| -> Replacers {
            pairs
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect()
        };

        let mut replacers = BTreeMap::new();
        replacers.insert(
            DEFAULT_REPLACERS.to_string(),
            table(&[(" ", "-"), ("+", "-"), (".", "-")]),
        );
        replacers.insert(
            "de".to_string(),
            table(&[
                ("ä", "ae"),
                ("ö", "oe"),
                ("ü", "ue"),
                ("Ä", "ae"),
                ("Ö", "oe"),
                ("Ü", "ue"),
                ("ß", "ss"),
                ("&", "und"),
            ]),
        );
        replacers.insert("en".to_string(), table(&[("&", "and")]));
        replacers.insert("fr".to_string(), table(&[("&", "et")]));

        Self {
            separator: SlugSeparator::Dash,
            replacers,
        }
    }
}
