//! Check command implementation.

use anyhow::Result;

use webspace_routing::config::RoutingConfig;
use webspace_routing::log;
use webspace_routing::utils::plural_count;

/// Execute check command
///
/// The config is already validated, this compiles the index and reports
/// per-webspace and per-environment counts.
pub fn run_check(config: &RoutingConfig) -> Result<()> {
    let index = config.build_index()?;

    for webspace in index.webspaces() {
        log!(
            "check";
            "{}: {}, {}, {}",
            webspace.key,
            plural_count(webspace.localizations.len(), "localization"),
            plural_count(webspace.segments.len(), "segment"),
            plural_count(index.portals_of(webspace).count(), "portal")
        );
    }
    for environment in index.environments() {
        log!(
            "check";
            "{}: {}",
            environment,
            plural_count(index.portal_informations(environment).len(), "url")
        );
    }

    log!("check"; "{} is valid", config.config_path.display());
    Ok(())
}
