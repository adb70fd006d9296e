//! Build-time configuration errors.

use thiserror::Error;

/// Fatal error that aborts routing index construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("webspace `{webspace}` is missing default templates: expected {expected:?}, found {found:?}")]
    MissingDefaultTemplates {
        webspace: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("webspace `{webspace}` defines more than one default error template")]
    AmbiguousDefaultErrorTemplate { webspace: String },

    #[error("error template `{template}` in webspace `{webspace}` has neither a code nor the default flag")]
    InvalidErrorTemplate { webspace: String, template: String },

    #[error("custom url `{url}` in webspace `{webspace}` does not contain a `*` wildcard")]
    InvalidCustomUrl { webspace: String, url: String },

    #[error("portal `{portal}` in webspace `{webspace}` has multiple default localizations")]
    MultipleDefaultLocalizations { webspace: String, portal: String },

    #[error("webspace `{webspace}` marks more than one segment as default")]
    MultipleDefaultSegments { webspace: String },

    #[error("url `{url}` in webspace `{webspace}` references unknown segment `{segment}`")]
    UnknownSegment {
        webspace: String,
        url: String,
        segment: String,
    },

    #[error("webspace `{0}` is defined more than once")]
    DuplicateWebspace(String),

    #[error("portal `{portal}` in webspace `{webspace}` is already defined by webspace `{existing}`")]
    DuplicatePortal {
        webspace: String,
        portal: String,
        existing: String,
    },
}

impl ConfigurationError {
    /// Key of the webspace the error was raised for.
    pub fn webspace(&self) -> &str {
        match self {
            Self::MissingDefaultTemplates { webspace, .. }
            | Self::AmbiguousDefaultErrorTemplate { webspace }
            | Self::InvalidErrorTemplate { webspace, .. }
            | Self::InvalidCustomUrl { webspace, .. }
            | Self::MultipleDefaultLocalizations { webspace, .. }
            | Self::MultipleDefaultSegments { webspace }
            | Self::UnknownSegment { webspace, .. }
            | Self::DuplicatePortal { webspace, .. } => webspace,
            Self::DuplicateWebspace(webspace) => webspace,
        }
    }
}
