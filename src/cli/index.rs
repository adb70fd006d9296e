//! Index command implementation.
//!
//! Dumps the compiled routing index as JSON, grouped by environment.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use serde::Serialize;

use crate::cli::IndexArgs;
use webspace_routing::config::RoutingConfig;
use webspace_routing::index::{PortalInformation, RoutingIndex};
use webspace_routing::log;
use webspace_routing::utils::plural_count;

/// One portal information with ids resolved to keys.
#[derive(Debug, Serialize)]
pub struct EntryView<'a> {
    pub url: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub priority: u8,
    pub webspace: &'a str,
    pub portal: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'a str>,
    pub main: bool,
}

impl<'a> EntryView<'a> {
    pub fn new(index: &'a RoutingIndex, entry: &'a PortalInformation) -> Self {
        Self {
            url: &entry.url,
            kind: entry.type_name(),
            priority: entry.priority,
            webspace: index
                .get_webspace(entry.webspace)
                .map_or("", |w| w.key.as_str()),
            portal: index.get_portal(entry.portal()).map_or("", |p| p.key.as_str()),
            localization: index.entry_localization(entry).map(|l| l.code()),
            segment: index.entry_segment(entry).map(|s| s.key.as_str()),
            redirect: entry.redirect(),
            main: entry.is_main(),
        }
    }
}

/// Execute index command
pub fn run_index(args: &IndexArgs, config: &RoutingConfig) -> Result<()> {
    let index = config.build_index()?;

    let environments: Vec<&str> = match &args.environment {
        Some(env) if index.portal_informations(env).is_empty() => {
            bail!("unknown environment `{env}` (known: {})", index.environments().join(", "))
        }
        Some(env) => vec![env.as_str()],
        None => index.environments(),
    };

    let dump: BTreeMap<&str, Vec<EntryView>> = environments
        .into_iter()
        .map(|env| {
            let entries = index
                .portal_informations(env)
                .iter()
                .map(|entry| EntryView::new(&index, entry))
                .collect();
            (env, entries)
        })
        .collect();

    let total: usize = dump.values().map(Vec::len).sum();
    log!("index"; "{} in {}", plural_count(total, "url"), plural_count(dump.len(), "environment"));

    let json = if args.pretty {
        serde_json::to_string_pretty(&dump)?
    } else {
        serde_json::to_string(&dump)?
    };
    println!("{json}");
    Ok(())
}
