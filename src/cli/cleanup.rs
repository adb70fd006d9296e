//! Cleanup command implementation.

use anyhow::Result;

use webspace_routing::config::RoutingConfig;
use webspace_routing::locator::{PathCleaner, PathCleanup};
use webspace_routing::log;

/// Execute cleanup command
pub fn run_cleanup(text: &str, locale: &str, config: &RoutingConfig) -> Result<()> {
    let cleaner = PathCleaner::new(&config.cleanup);
    let path = cleaner.cleanup(text, locale);

    if !cleaner.validate(&path) {
        log!("warning"; "`{}` is not a valid resource locator", path);
    }
    println!("{path}");
    Ok(())
}
