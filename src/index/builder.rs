//! Configuration -> [`RoutingIndex`] compilation.
//!
//! Build runs in two phases:
//!
//! 1. **Model**: every webspace is validated and compiled into a
//!    [`Webspace`] plus its [`Portal`]s; cross-reference tables are filled.
//! 2. **Entries**: one pass over all portals produces the
//!    [`PortalInformation`] entries per environment.
//!
//! Any validation failure aborts the whole build.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use super::entry::{
    EntryKind, PRIORITY_CUSTOM_URL, PRIORITY_FULL, PRIORITY_LOCALE_AGNOSTIC, PRIORITY_PARTIAL,
    PRIORITY_REDIRECT, PortalInformation,
};
use super::error::ConfigurationError;
use super::expand::{expand_url, strip_placeholders};
use super::matcher::{UrlExpression, normalize_request_url};
use super::{EnvironmentIndex, RoutingIndex};
use crate::config::section::{PortalConfig, WebspaceConfig};
use crate::utils::plural_count;
use crate::webspace::{
    CustomUrl, Environment, Localization, LocalizationId, LocalizationTree, NavigationContext,
    Portal, PortalId, REQUIRED_DEFAULT_TEMPLATES, Security, Segment, SegmentId, Url, WILDCARD,
    Webspace, WebspaceId,
};
use crate::{debug, log};

/// Legacy name of the `home` default template.
const LEGACY_HOME_TEMPLATE: &str = "homepage";

/// Compiles webspace configurations into a [`RoutingIndex`].
pub struct WebspaceRoutingIndexBuilder<'a> {
    configs: &'a [WebspaceConfig],
}

impl<'a> WebspaceRoutingIndexBuilder<'a> {
    pub fn new(configs: &'a [WebspaceConfig]) -> Self {
        Self { configs }
    }

    pub fn build(self) -> Result<RoutingIndex, ConfigurationError> {
        let mut index = RoutingIndex::default();
        let mut refs = BuildRefs::default();

        for config in self.configs {
            if index.webspace_keys.contains_key(&config.key) {
                return Err(ConfigurationError::DuplicateWebspace(config.key.clone()));
            }

            let id = WebspaceId(index.webspaces.len());
            let mut webspace = compile_webspace(config)?;
            refs.register(&webspace);

            for portal_config in &config.portals {
                let portal = compile_portal(config, &webspace, id, portal_config)?;

                if let Some(existing) = index.portal_keys.get(&portal.key) {
                    let owner = index.portals[existing.0].webspace;
                    let existing = index
                        .webspaces
                        .get(owner.0)
                        .map_or_else(|| config.key.clone(), |w| w.key.clone());
                    return Err(ConfigurationError::DuplicatePortal {
                        webspace: config.key.clone(),
                        portal: portal.key,
                        existing,
                    });
                }

                let portal_id = PortalId(index.portals.len());
                index.portal_keys.insert(portal.key.clone(), portal_id);
                index.portals.push(portal);
                webspace.portals.push(portal_id);
            }

            index.webspace_keys.insert(webspace.key.clone(), id);
            index.webspaces.push(webspace);
        }

        let mut environments: FxHashMap<String, EnvironmentIndex> = FxHashMap::default();
        for (i, portal) in index.portals.iter().enumerate() {
            let Some(webspace) = index.webspaces.get(portal.webspace.0) else {
                continue;
            };
            let ctx = EntryContext {
                refs: &refs,
                webspace,
                portal,
                portal_id: PortalId(i),
            };
            for environment in &portal.environments {
                let target = environments.entry(environment.kind.clone()).or_default();
                ctx.push_environment(environment, target);
            }
        }
        index.environments = environments;

        log!(
            "index";
            "{}, {}, {} in {}",
            plural_count(index.webspaces.len(), "webspace"),
            plural_count(index.portals.len(), "portal"),
            plural_count(index.len(), "url"),
            plural_count(index.environments.len(), "environment"),
        );

        Ok(index)
    }
}

// ============================================================================
// Model phase
// ============================================================================

fn compile_webspace(config: &WebspaceConfig) -> Result<Webspace, ConfigurationError> {
    let default_templates = normalize_default_templates(config)?;
    let templates = collect_templates(config)?;

    if config.segments.iter().filter(|s| s.default).count() > 1 {
        return Err(ConfigurationError::MultipleDefaultSegments {
            webspace: config.key.clone(),
        });
    }

    let mut localizations = LocalizationTree::new();
    for root in &config.localizations {
        localizations.push_root(root);
    }

    Ok(Webspace {
        key: config.key.clone(),
        name: config.name.clone(),
        security: config.security.as_ref().map(|s| Security {
            system: s.system.clone(),
            permission_check: s.permission_check,
        }),
        localizations,
        segments: config
            .segments
            .iter()
            .map(|s| Segment {
                key: s.key.clone(),
                metadata: s.metadata.clone(),
                default: s.default,
            })
            .collect(),
        theme: config.theme.clone(),
        templates,
        default_templates,
        excluded_templates: config.excluded_templates.iter().cloned().collect(),
        navigation: config
            .navigation
            .contexts
            .iter()
            .map(|c| NavigationContext {
                key: c.key.clone(),
                metadata: c.metadata.clone(),
            })
            .collect(),
        resource_locator_strategy: config.resource_locator.strategy,
        portals: Vec::new(),
    })
}

/// Map `homepage` to `home` and require every default template type.
fn normalize_default_templates(
    config: &WebspaceConfig,
) -> Result<BTreeMap<String, String>, ConfigurationError> {
    let mut templates = BTreeMap::new();
    for (kind, template) in &config.default_templates {
        let kind = if kind == LEGACY_HOME_TEMPLATE { "home" } else { kind.as_str() };
        // An explicit `home` wins over the legacy name.
        if kind == "home" && templates.contains_key("home") {
            continue;
        }
        templates.insert(kind.to_string(), template.clone());
    }

    let missing = REQUIRED_DEFAULT_TEMPLATES
        .iter()
        .any(|required| !templates.contains_key(*required));
    if missing {
        return Err(ConfigurationError::MissingDefaultTemplates {
            webspace: config.key.clone(),
            expected: REQUIRED_DEFAULT_TEMPLATES.iter().map(|s| s.to_string()).collect(),
            found: templates.keys().cloned().collect(),
        });
    }

    Ok(templates)
}

/// Plain templates plus error templates registered as `error` / `error-<code>`.
fn collect_templates(
    config: &WebspaceConfig,
) -> Result<BTreeMap<String, String>, ConfigurationError> {
    let mut templates = config.templates.clone();
    let mut has_default = false;

    for error in &config.error_templates {
        let kind = match error.code {
            Some(code) => format!("error-{code}"),
            None if !error.default => {
                return Err(ConfigurationError::InvalidErrorTemplate {
                    webspace: config.key.clone(),
                    template: error.value.clone(),
                });
            }
            None if has_default => {
                return Err(ConfigurationError::AmbiguousDefaultErrorTemplate {
                    webspace: config.key.clone(),
                });
            }
            None => {
                has_default = true;
                "error".to_string()
            }
        };
        templates.insert(kind, error.value.clone());
    }

    Ok(templates)
}

fn compile_portal(
    config: &WebspaceConfig,
    webspace: &Webspace,
    webspace_id: WebspaceId,
    portal_config: &PortalConfig,
) -> Result<Portal, ConfigurationError> {
    let localizations: Vec<Localization> = if portal_config.localizations.is_empty() {
        inherit_localizations(&webspace.localizations)
    } else {
        portal_config
            .localizations
            .iter()
            .map(|l| {
                let mut localization =
                    Localization::new(&l.language, l.country.clone().filter(|c| !c.is_empty()));
                localization.default = l.default;
                localization
            })
            .collect()
    };

    // Inherited localizations count as the portal's own.
    if localizations.iter().filter(|l| l.default).count() > 1 {
        return Err(ConfigurationError::MultipleDefaultLocalizations {
            webspace: config.key.clone(),
            portal: portal_config.key.clone(),
        });
    }

    for environment in &portal_config.environments {
        if let Some(custom) = environment.custom_urls.iter().find(|c| !c.url.contains(WILDCARD)) {
            return Err(ConfigurationError::InvalidCustomUrl {
                webspace: config.key.clone(),
                url: custom.url.clone(),
            });
        }
    }

    let mut environments = Vec::with_capacity(portal_config.environments.len());
    for environment in &portal_config.environments {
        let mut urls = Vec::with_capacity(environment.urls.len());
        for url_config in &environment.urls {
            let segment = url_config.segment.clone().filter(|s| !s.is_empty());
            if let Some(segment) = &segment
                && webspace.segment_id(segment).is_none()
            {
                return Err(ConfigurationError::UnknownSegment {
                    webspace: config.key.clone(),
                    url: url_config.value.clone(),
                    segment: segment.clone(),
                });
            }

            let mut url = Url::new(&url_config.value);
            url.language = url_config.language.clone().filter(|s| !s.is_empty());
            url.country = url_config.country.clone().filter(|s| !s.is_empty());
            url.segment = segment;
            url.redirect = url_config.redirect.clone().filter(|s| !s.is_empty());
            url.main = url_config.main;
            urls.push(url);
        }

        environments.push(Environment {
            kind: environment.kind.clone(),
            urls,
            custom_urls: environment
                .custom_urls
                .iter()
                .map(|c| CustomUrl::new(&c.url))
                .collect(),
        });
    }

    Ok(Portal {
        key: portal_config.key.clone(),
        name: portal_config.name.clone(),
        webspace: webspace_id,
        localizations,
        environments,
    })
}

/// Portal without own localizations: the webspace tree, flattened.
fn inherit_localizations(tree: &LocalizationTree) -> Vec<Localization> {
    tree.iter()
        .map(|(_, l)| Localization {
            parent: None,
            children: Vec::new(),
            ..l.clone()
        })
        .collect()
}

// ============================================================================
// Cross references
// ============================================================================

/// `webspace_code` / `webspace_segment` lookup tables used by the entry phase.
#[derive(Debug, Default)]
struct BuildRefs {
    localizations: FxHashMap<String, LocalizationId>,
    segments: FxHashMap<String, SegmentId>,
}

impl BuildRefs {
    /// Register every localization of the tree (not only roots) and every segment.
    fn register(&mut self, webspace: &Webspace) {
        for (id, localization) in webspace.localizations.iter() {
            self.localizations
                .entry(format!("{}_{}", webspace.key, localization.code()))
                .or_insert(id);
        }
        for (i, segment) in webspace.segments.iter().enumerate() {
            self.segments
                .entry(format!("{}_{}", webspace.key, segment.key))
                .or_insert(SegmentId(i));
        }
    }

    fn localization(&self, webspace: &str, localization: &Localization) -> Option<LocalizationId> {
        self.localizations
            .get(&format!("{webspace}_{}", localization.code()))
            .copied()
    }

    fn segment(&self, webspace: &str, key: &str) -> Option<SegmentId> {
        self.segments.get(&format!("{webspace}_{key}")).copied()
    }
}

// ============================================================================
// Entry phase
// ============================================================================

struct EntryContext<'a> {
    refs: &'a BuildRefs,
    webspace: &'a Webspace,
    portal: &'a Portal,
    portal_id: PortalId,
}

impl EntryContext<'_> {
    fn push_environment(&self, environment: &Environment, target: &mut EnvironmentIndex) {
        for url in &environment.urls {
            self.push_url(environment, url, target);
        }

        for custom in &environment.custom_urls {
            let url = normalize_request_url(&custom.url);
            let expression = match UrlExpression::from_custom_url(&url) {
                Ok(expression) => expression,
                Err(e) => {
                    debug!("index"; "skipping custom url `{}`: {}", custom.url, e);
                    continue;
                }
            };
            self.insert(
                environment,
                target,
                PortalInformation {
                    url,
                    webspace: self.portal.webspace,
                    priority: PRIORITY_CUSTOM_URL,
                    kind: EntryKind::CustomUrl {
                        portal: self.portal_id,
                        expression,
                    },
                },
            );
        }
    }

    fn push_url(&self, environment: &Environment, url: &Url, target: &mut EnvironmentIndex) {
        let segment = url
            .segment
            .as_deref()
            .and_then(|key| self.refs.segment(&self.webspace.key, key));

        if let Some(language) = url.language.as_deref() {
            let locale = Localization::new(language, url.country.clone());
            let localization = self.refs.localization(&self.webspace.key, &locale);
            if localization.is_none() {
                debug!(
                    "index";
                    "url `{}` names locale `{}` unknown to webspace `{}`",
                    url.url, locale.code(), self.webspace.key
                );
            }
            let entry = self.explicit_entry(url, localization, segment, PRIORITY_FULL);
            self.insert(environment, target, entry);
        } else if url.has_placeholders() {
            self.push_expanded(environment, url, segment, target);
        } else {
            let entry = self.explicit_entry(url, None, segment, PRIORITY_LOCALE_AGNOSTIC);
            self.insert(environment, target, entry);
        }
    }

    /// Entry for a url that is not expanded; a redirect target makes it a redirect.
    fn explicit_entry(
        &self,
        url: &Url,
        localization: Option<LocalizationId>,
        segment: Option<SegmentId>,
        priority: u8,
    ) -> PortalInformation {
        let (priority, kind) = match &url.redirect {
            Some(redirect) => (
                PRIORITY_REDIRECT,
                EntryKind::Redirect {
                    portal: self.portal_id,
                    localization,
                    redirect: redirect.clone(),
                },
            ),
            None => (
                priority,
                EntryKind::Portal {
                    portal: self.portal_id,
                    localization,
                    segment,
                    main: url.main,
                },
            ),
        };
        PortalInformation {
            url: normalize_request_url(&url.url),
            webspace: self.portal.webspace,
            priority,
            kind,
        }
    }

    /// One entry per portal localization (and segment), plus the partial
    /// redirect to the default expansion.
    fn push_expanded(
        &self,
        environment: &Environment,
        url: &Url,
        fixed_segment: Option<SegmentId>,
        target: &mut EnvironmentIndex,
    ) {
        let expansions = expand_url(
            &url.url,
            &self.portal.localizations,
            &self.webspace.segments,
        );

        let default_localization = self.portal.default_localization();
        let default_segment = self.webspace.default_segment().map(|s| s.key.as_str());
        let mut default_url: Option<String> = None;

        for expansion in &expansions {
            let localization = self
                .refs
                .localization(&self.webspace.key, expansion.localization);
            let segment = expansion
                .segment
                .and_then(|s| self.refs.segment(&self.webspace.key, &s.key))
                .or(fixed_segment);
            let expanded = normalize_request_url(&expansion.url);

            let is_default_localization =
                default_localization.is_some_and(|d| d.code() == expansion.localization.code());
            let is_default_segment = expansion
                .segment
                .is_none_or(|s| Some(s.key.as_str()) == default_segment);
            if default_url.is_none() && is_default_localization && is_default_segment {
                default_url = Some(expanded.clone());
            }

            self.insert(
                environment,
                target,
                PortalInformation {
                    url: expanded,
                    webspace: self.portal.webspace,
                    priority: PRIORITY_FULL,
                    kind: EntryKind::Portal {
                        portal: self.portal_id,
                        localization,
                        segment,
                        main: url.main,
                    },
                },
            );
        }

        let Some(redirect) = default_url else {
            return;
        };
        let partial = normalize_request_url(&strip_placeholders(&url.url));
        if partial.is_empty() || partial == redirect {
            return;
        }
        let localization =
            default_localization.and_then(|l| self.refs.localization(&self.webspace.key, l));
        self.insert(
            environment,
            target,
            PortalInformation {
                url: partial,
                webspace: self.portal.webspace,
                priority: PRIORITY_PARTIAL,
                kind: EntryKind::Redirect {
                    portal: self.portal_id,
                    localization,
                    redirect,
                },
            },
        );
    }

    fn insert(
        &self,
        environment: &Environment,
        target: &mut EnvironmentIndex,
        entry: PortalInformation,
    ) {
        let url = entry.url.clone();
        if !target.insert(entry) {
            debug!(
                "index";
                "skipping duplicate url `{}` in environment `{}` (portal `{}`)",
                url, environment.kind, self.portal.key
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::webspace::SegmentId;

    const SULU: &str = r#"
[[webspaces]]
key = "sulu_io"
name = "Sulu CMF"

[[webspaces.localizations]]
language = "en"
default = true

[[webspaces.localizations]]
language = "de"

[[webspaces.localizations.children]]
language = "de"
country = "at"

[webspaces.default_templates]
page = "default"
homepage = "overview"

[[webspaces.error_templates]]
code = 404
value = "error404"

[[webspaces.error_templates]]
default = true
value = "error"

[[webspaces.portals]]
key = "sulucmf_at"
name = "Sulu CMF AT"

[[webspaces.portals.environments]]
type = "prod"

[[webspaces.portals.environments.urls]]
value = "sulu.at/{localization}"
main = true

[[webspaces.portals.environments.urls]]
value = "www.sulu.at"
redirect = "sulu.at"

[[webspaces.portals.environments.urls]]
value = "sulu.io/de"
language = "de"

[[webspaces.portals.environments.urls]]
value = "agnostic.sulu.io"

[[webspaces.portals.environments.custom_urls]]
url = "sulu.at/campaign/*"

[[webspaces.portals.environments]]
type = "dev"

[[webspaces.portals.environments.urls]]
value = "sulu.lo"
"#;

    fn build(toml: &str) -> Result<RoutingIndex, ConfigurationError> {
        let config = test_parse_config(toml);
        WebspaceRoutingIndexBuilder::new(&config.webspaces).build()
    }

    fn with_default_templates(body: &str) -> String {
        format!(
            "[[webspaces]]\nkey = \"w\"\n[[webspaces.localizations]]\nlanguage = \"en\"\n{body}"
        )
    }

    #[test]
    fn test_build_sulu_webspace() {
        let index = build(SULU).unwrap();
        let webspace = index.webspace("sulu_io").unwrap();

        assert_eq!(webspace.localizations.len(), 3);
        assert_eq!(webspace.default_template("home"), Some("overview"));
        assert_eq!(webspace.default_template("homepage"), None);
        assert_eq!(webspace.template("error-404"), Some("error404"));
        assert_eq!(webspace.error_template(500), Some("error"));
        assert_eq!(index.portals_of(webspace).count(), 1);
        assert_eq!(index.environments(), vec!["dev", "prod"]);
    }

    #[test]
    fn test_homepage_normalized_to_home() {
        let toml = with_default_templates(
            "[webspaces.default_templates]\npage = \"default\"\nhomepage = \"overview\"\n",
        );
        let index = build(&toml).unwrap();
        let webspace = index.webspace("w").unwrap();
        assert_eq!(webspace.default_template("home"), Some("overview"));
    }

    #[test]
    fn test_missing_default_templates() {
        let toml = with_default_templates("[webspaces.default_templates]\npage = \"default\"\n");
        let err = build(&toml).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingDefaultTemplates {
                webspace: "w".into(),
                expected: vec!["page".into(), "home".into()],
                found: vec!["page".into()],
            }
        );
    }

    #[test]
    fn test_error_template_without_code_or_default() {
        let toml = with_default_templates(
            "[webspaces.default_templates]\npage = \"p\"\nhome = \"h\"\n\
             [[webspaces.error_templates]]\nvalue = \"broken\"\n",
        );
        assert_eq!(
            build(&toml).unwrap_err(),
            ConfigurationError::InvalidErrorTemplate {
                webspace: "w".into(),
                template: "broken".into(),
            }
        );
    }

    #[test]
    fn test_two_default_error_templates() {
        let toml = with_default_templates(
            "[webspaces.default_templates]\npage = \"p\"\nhome = \"h\"\n\
             [[webspaces.error_templates]]\ndefault = true\nvalue = \"a\"\n\
             [[webspaces.error_templates]]\ndefault = true\nvalue = \"b\"\n",
        );
        assert!(matches!(
            build(&toml).unwrap_err(),
            ConfigurationError::AmbiguousDefaultErrorTemplate { .. }
        ));
    }

    #[test]
    fn test_custom_url_requires_wildcard() {
        let toml = SULU.replace("sulu.at/campaign/*", "sulu.at/campaign");
        assert_eq!(
            build(&toml).unwrap_err(),
            ConfigurationError::InvalidCustomUrl {
                webspace: "sulu_io".into(),
                url: "sulu.at/campaign".into(),
            }
        );
    }

    #[test]
    fn test_multiple_default_localizations() {
        let toml = with_default_templates(
            "[webspaces.default_templates]\npage = \"p\"\nhome = \"h\"\n\
             [[webspaces.portals]]\nkey = \"p\"\n\
             [[webspaces.portals.localizations]]\nlanguage = \"en\"\ndefault = true\n\
             [[webspaces.portals.localizations]]\nlanguage = \"de\"\ndefault = true\n",
        );
        assert_eq!(
            build(&toml).unwrap_err(),
            ConfigurationError::MultipleDefaultLocalizations {
                webspace: "w".into(),
                portal: "p".into(),
            }
        );
    }

    #[test]
    fn test_inherited_localizations_with_two_defaults() {
        let toml = with_default_templates(
            "default = true\n\
             [[webspaces.localizations]]\nlanguage = \"de\"\ndefault = true\n\
             [webspaces.default_templates]\npage = \"p\"\nhome = \"h\"\n\
             [[webspaces.portals]]\nkey = \"p\"\n",
        );
        assert_eq!(
            build(&toml).unwrap_err(),
            ConfigurationError::MultipleDefaultLocalizations {
                webspace: "w".into(),
                portal: "p".into(),
            }
        );
    }

    #[test]
    fn test_unknown_segment() {
        let toml = with_default_templates(
            "[webspaces.default_templates]\npage = \"p\"\nhome = \"h\"\n\
             [[webspaces.portals]]\nkey = \"p\"\n\
             [[webspaces.portals.environments]]\ntype = \"prod\"\n\
             [[webspaces.portals.environments.urls]]\nvalue = \"sulu.io\"\nsegment = \"winter\"\n",
        );
        assert!(matches!(
            build(&toml).unwrap_err(),
            ConfigurationError::UnknownSegment { segment, .. } if segment == "winter"
        ));
    }

    #[test]
    fn test_duplicate_webspace_and_portal() {
        let twice = format!("{SULU}\n{}", SULU);
        assert_eq!(
            build(&twice).unwrap_err(),
            ConfigurationError::DuplicateWebspace("sulu_io".into())
        );

        let other = SULU.replace("key = \"sulu_io\"", "key = \"other\"");
        let err = build(&format!("{SULU}\n{other}")).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicatePortal {
                webspace: "other".into(),
                portal: "sulucmf_at".into(),
                existing: "sulu_io".into(),
            }
        );
    }

    #[test]
    fn test_portal_inherits_flattened_localizations() {
        let index = build(SULU).unwrap();
        let portal = index.portal("sulucmf_at").unwrap();
        let codes: Vec<_> = portal.localizations.iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec!["en", "de", "de_at"]);
        assert!(portal.localizations.iter().all(|l| l.parent.is_none()));
        assert_eq!(portal.default_localization().map(|l| l.code()).as_deref(), Some("en"));
    }

    #[test]
    fn test_placeholder_expansion_and_partial_redirect() {
        let index = build(SULU).unwrap();

        let urls = index.urls_for_environment("prod");
        for url in ["sulu.at/en", "sulu.at/de", "sulu.at/de-at", "sulu.at"] {
            assert!(urls.contains(&url), "missing {url}");
        }

        let expanded = index.portal_information("prod", "sulu.at/de-at").unwrap();
        assert_eq!(expanded.priority, PRIORITY_FULL);
        assert!(expanded.is_main());
        assert_eq!(
            index.entry_localization(expanded).map(|l| l.code()).as_deref(),
            Some("de_at")
        );

        let partial = index.portal_information("prod", "sulu.at").unwrap();
        assert_eq!(partial.priority, PRIORITY_PARTIAL);
        assert_eq!(partial.redirect(), Some("sulu.at/en"));
    }

    #[test]
    fn test_entry_types_and_priorities() {
        let index = build(SULU).unwrap();

        let redirect = index.portal_information("prod", "www.sulu.at").unwrap();
        assert!(redirect.is_redirect());
        assert_eq!(redirect.priority, PRIORITY_REDIRECT);

        let explicit = index.portal_information("prod", "sulu.io/de").unwrap();
        assert_eq!(explicit.priority, PRIORITY_FULL);
        assert_eq!(
            index.entry_localization(explicit).map(|l| l.code()).as_deref(),
            Some("de")
        );

        let agnostic = index.portal_information("prod", "agnostic.sulu.io").unwrap();
        assert_eq!(agnostic.priority, PRIORITY_LOCALE_AGNOSTIC);
        assert_eq!(agnostic.localization(), None);

        let custom = index.portal_information("prod", "sulu.at/campaign/*").unwrap();
        assert!(custom.is_custom_url());
        assert_eq!(custom.priority, PRIORITY_CUSTOM_URL);
    }

    #[test]
    fn test_unknown_locale_resolves_to_none() {
        let toml = SULU.replace(
            "value = \"sulu.io/de\"\nlanguage = \"de\"",
            "value = \"sulu.io/fr\"\nlanguage = \"fr\"",
        );
        let index = build(&toml).unwrap();
        let entry = index.portal_information("prod", "sulu.io/fr").unwrap();
        assert!(entry.is_portal());
        assert_eq!(entry.localization(), None);
    }

    #[test]
    fn test_first_duplicate_entry_wins() {
        let toml = SULU.replace(
            "value = \"agnostic.sulu.io\"",
            "value = \"sulu.at/en\"\nredirect = \"sulu.at/de\"",
        );
        let index = build(&toml).unwrap();
        let entry = index.portal_information("prod", "sulu.at/en").unwrap();
        assert!(entry.is_portal());
    }

    #[test]
    fn test_match_request_prefers_most_specific() {
        let index = build(SULU).unwrap();

        let m = index.match_request("prod", "https://sulu.at/de-at/news/").unwrap();
        assert_eq!(m.entry.url, "sulu.at/de-at");
        assert_eq!(m.resource_locator, "/news");
        assert_eq!(m.localization.map(|l| l.code()).as_deref(), Some("de_at"));
        assert_eq!(m.webspace.key, "sulu_io");

        let m = index.match_request("prod", "sulu.at/about").unwrap();
        assert_eq!(m.entry.priority, PRIORITY_PARTIAL);
        assert_eq!(m.resource_locator, "/about");

        let m = index.match_request("prod", "sulu.at/campaign/summer/terms").unwrap();
        assert!(m.entry.is_custom_url());
        assert_eq!(m.resource_locator, "/terms");

        assert!(index.match_request("prod", "unknown.io").is_none());
        assert!(index.match_request("stage", "sulu.at").is_none());
    }

    #[test]
    fn test_find_url_by_resource_locator() {
        let index = build(SULU).unwrap();
        assert_eq!(
            index
                .find_url_by_resource_locator("/news", "prod", "de_at", "sulu_io")
                .as_deref(),
            Some("sulu.at/de-at/news")
        );
        assert_eq!(
            index
                .find_url_by_resource_locator("/", "dev", "en", "sulu_io")
                .as_deref(),
            Some("sulu.lo")
        );

        let urls = index.find_urls_by_resource_locator("/news", "prod", "de", "sulu_io");
        assert_eq!(urls[0], "sulu.at/de/news");
        assert!(urls.contains(&"sulu.io/de/news".to_string()));
        assert!(urls.contains(&"agnostic.sulu.io/news".to_string()));
    }

    #[test]
    fn test_segment_expansion() {
        let toml = with_default_templates(
            "[webspaces.default_templates]\npage = \"p\"\nhome = \"h\"\n\
             [[webspaces.segments]]\nkey = \"w\"\n\
             [[webspaces.segments]]\nkey = \"s\"\ndefault = true\n\
             [[webspaces.portals]]\nkey = \"p\"\n\
             [[webspaces.portals.environments]]\ntype = \"prod\"\n\
             [[webspaces.portals.environments.urls]]\nvalue = \"sulu.io/{segment}\"\n",
        );
        let index = build(&toml).unwrap();

        let winter = index.portal_information("prod", "sulu.io/w").unwrap();
        assert_eq!(winter.segment(), Some(SegmentId(0)));
        assert_eq!(
            index.portal_information("prod", "sulu.io").and_then(|e| e.redirect()),
            Some("sulu.io/s")
        );
    }

    #[test]
    fn test_multiple_default_segments() {
        let toml = with_default_templates(
            "[webspaces.default_templates]\npage = \"p\"\nhome = \"h\"\n\
             [[webspaces.segments]]\nkey = \"a\"\ndefault = true\n\
             [[webspaces.segments]]\nkey = \"b\"\ndefault = true\n",
        );
        assert_eq!(
            build(&toml).unwrap_err(),
            ConfigurationError::MultipleDefaultSegments { webspace: "w".into() }
        );
    }

    #[test]
    fn test_webspace_keys_for_url() {
        let index = build(SULU).unwrap();
        assert_eq!(index.webspace_keys_for_url("prod", "sulu.at/en/x"), vec!["sulu_io"]);
        assert!(index.webspace_keys_for_url("prod", "nothing.io").is_empty());
    }
}
