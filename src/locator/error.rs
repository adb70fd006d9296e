//! Resource locator errors.

use thiserror::Error;

/// Failure of a resource locator operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceLocatorError {
    #[error("no resource locator could be generated for `{title}` below `{}`", parent.as_deref().unwrap_or("/"))]
    Generator {
        title: String,
        parent: Option<String>,
    },

    #[error("resource locator `{0}` is not valid")]
    Validation(String),

    #[error("resource locator `{path}` already belongs to `{owner}`")]
    Conflict { path: String, owner: String },

    #[error("no resource locator found for `{0}`")]
    NotFound(String),

    #[error("resource locator `{path}` has moved to `{target}`")]
    Moved { path: String, target: String },
}

/// Failure reported by a [`PathStore`](super::PathStore) write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Another node took the path between the uniqueness check and the write.
    #[error("path `{path}` is already taken by `{owner}`")]
    Conflict { path: String, owner: String },
}

impl From<StoreError> for ResourceLocatorError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { path, owner } => Self::Conflict { path, owner },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_conflict_converts() {
        let err: ResourceLocatorError = StoreError::Conflict {
            path: "/news".into(),
            owner: "123".into(),
        }
        .into();
        assert_eq!(
            err,
            ResourceLocatorError::Conflict {
                path: "/news".into(),
                owner: "123".into()
            }
        );
    }

    #[test]
    fn test_generator_message_without_parent() {
        let err = ResourceLocatorError::Generator {
            title: "".into(),
            parent: None,
        };
        assert_eq!(
            err.to_string(),
            "no resource locator could be generated for `` below `/`"
        );
    }
}
