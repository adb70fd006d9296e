//! Candidate resource locators from a title and the closest parent path.

use crate::config::ResourceLocatorStrategy;

/// Produces the raw (not yet cleaned) resource locator for a title.
pub trait ResourceLocatorGenerator: Send + Sync {
    fn generate(&self, title: &str, parent_path: Option<&str>) -> String;
}

/// `parent/title`, used by the tree strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeGenerator;

impl ResourceLocatorGenerator for TreeGenerator {
    fn generate(&self, title: &str, parent_path: Option<&str>) -> String {
        let parent = parent_path.unwrap_or_default().trim_end_matches('/');
        format!("{parent}/{title}")
    }
}

/// `/title`, ignoring the parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortGenerator;

impl ResourceLocatorGenerator for ShortGenerator {
    fn generate(&self, title: &str, _parent_path: Option<&str>) -> String {
        format!("/{title}")
    }
}

/// Generator matching a webspace strategy.
pub fn generator_for(strategy: ResourceLocatorStrategy) -> Box<dyn ResourceLocatorGenerator> {
    match strategy {
        ResourceLocatorStrategy::TreeLeafEdit | ResourceLocatorStrategy::TreeFullEdit => {
            Box::new(TreeGenerator)
        }
        ResourceLocatorStrategy::Short => Box::new(ShortGenerator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_generator() {
        assert_eq!(TreeGenerator.generate("Team", Some("/about")), "/about/Team");
        assert_eq!(TreeGenerator.generate("Team", Some("/")), "/Team");
        assert_eq!(TreeGenerator.generate("Team", None), "/Team");
    }

    #[test]
    fn test_short_generator_ignores_parent() {
        assert_eq!(ShortGenerator.generate("Team", Some("/about")), "/Team");
    }

    #[test]
    fn test_generator_for_strategy() {
        let short = generator_for(ResourceLocatorStrategy::Short);
        assert_eq!(short.generate("a", Some("/b")), "/a");
        let tree = generator_for(ResourceLocatorStrategy::TreeFullEdit);
        assert_eq!(tree.generate("a", Some("/b")), "/b/a");
    }
}
