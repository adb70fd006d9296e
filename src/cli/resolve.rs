//! Resolve command implementation.

use anyhow::{Result, bail};
use serde::Serialize;

use super::index::EntryView;
use webspace_routing::config::RoutingConfig;
use webspace_routing::debug;

#[derive(Debug, Serialize)]
struct ResolveResult<'a> {
    #[serde(flatten)]
    entry: EntryView<'a>,
    resource_locator: String,
}

/// Execute resolve command
pub fn run_resolve(environment: &str, url: &str, pretty: bool, config: &RoutingConfig) -> Result<()> {
    let index = config.build_index()?;

    let Some(matched) = index.match_request(environment, url) else {
        bail!("no portal serves `{url}` in environment `{environment}`");
    };
    debug!("resolve"; "{} -> {} ({})", url, matched.entry.url, matched.entry.type_name());

    let result = ResolveResult {
        entry: EntryView::new(&index, matched.entry),
        resource_locator: matched.resource_locator,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");
    Ok(())
}
