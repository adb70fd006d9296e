//! Placeholder expansion for portal urls.
//!
//! ```text
//! sulu.io/{localization}  ->  sulu.io/en, sulu.io/de-at   (one per portal localization)
//!                         ->  sulu.io                      (partial, redirects to default)
//! {language}.sulu.io      ->  en.sulu.io, de.sulu.io
//! ```

use crate::webspace::{Localization, Segment};

/// One concrete url produced from a placeholder url.
#[derive(Debug, Clone)]
pub struct Expansion<'a> {
    pub url: String,
    pub localization: &'a Localization,
    pub segment: Option<&'a Segment>,
}

/// Expand `url` for every localization (and every segment when the url uses
/// `{segment}`).
pub fn expand_url<'a>(
    url: &str,
    localizations: &'a [Localization],
    segments: &'a [Segment],
) -> Vec<Expansion<'a>> {
    let segment_options: Vec<Option<&Segment>> = if url.contains("{segment}") && !segments.is_empty()
    {
        segments.iter().map(Some).collect()
    } else {
        vec![None]
    };

    let mut out = Vec::with_capacity(localizations.len() * segment_options.len());
    for localization in localizations {
        for segment in &segment_options {
            out.push(Expansion {
                url: substitute(url, localization, *segment),
                localization,
                segment: *segment,
            });
        }
    }
    out
}

/// Replace placeholders for one localization / segment.
pub fn substitute(url: &str, localization: &Localization, segment: Option<&Segment>) -> String {
    let replaced = url
        .replace("{localization}", &localization.code_with('-'))
        .replace("{language}", &localization.language.to_lowercase())
        .replace(
            "{country}",
            &localization
                .country
                .as_deref()
                .unwrap_or_default()
                .to_lowercase(),
        )
        .replace("{segment}", segment.map_or("", |s| s.key.as_str()));
    tidy(&replaced)
}

/// Remove every placeholder, leaving the partial url.
pub fn strip_placeholders(url: &str) -> String {
    let mut stripped = url.to_string();
    for placeholder in crate::webspace::PLACEHOLDERS {
        stripped = stripped.replace(placeholder, "");
    }
    tidy(&stripped)
}

/// Collapse empty path segments and stray separators left by empty
/// substitutions (`sulu.io//news/` -> `sulu.io/news`, `.sulu.io` -> `sulu.io`).
fn tidy(url: &str) -> String {
    let (host, path) = match url.find('/') {
        Some(idx) => (&url[..idx], &url[idx..]),
        None => (url, ""),
    };

    let host = host
        .split('.')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".");

    let mut out = host;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        let segment = segment.trim_matches('-');
        if segment.is_empty() {
            continue;
        }
        out.push('/');
        out.push_str(segment);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(key: &str) -> Segment {
        Segment {
            key: key.into(),
            metadata: Default::default(),
            default: false,
        }
    }

    #[test]
    fn test_expand_localization() {
        let locs = vec![
            Localization::new("en", None),
            Localization::new("de", Some("at".into())),
        ];
        let urls: Vec<_> = expand_url("sulu.io/{localization}", &locs, &[])
            .into_iter()
            .map(|e| e.url)
            .collect();
        assert_eq!(urls, vec!["sulu.io/en", "sulu.io/de-at"]);
    }

    #[test]
    fn test_expand_language_and_country() {
        let locs = vec![Localization::new("de", Some("AT".into()))];
        let expanded = expand_url("{language}.sulu.io/{country}", &locs, &[]);
        assert_eq!(expanded[0].url, "de.sulu.io/at");
    }

    #[test]
    fn test_missing_country_collapses() {
        let locs = vec![Localization::new("en", None)];
        let expanded = expand_url("sulu.io/{country}/news", &locs, &[]);
        assert_eq!(expanded[0].url, "sulu.io/news");
    }

    #[test]
    fn test_expand_segments() {
        let locs = vec![Localization::new("en", None)];
        let segs = vec![segment("winter"), segment("summer")];
        let expanded = expand_url("sulu.io/{localization}/{segment}", &locs, &segs);
        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[1].url, "sulu.io/en/summer");
        assert_eq!(expanded[1].segment.map(|s| s.key.as_str()), Some("summer"));
    }

    #[test]
    fn test_strip_placeholders() {
        assert_eq!(strip_placeholders("sulu.io/{localization}"), "sulu.io");
        assert_eq!(strip_placeholders("{language}.sulu.io"), "sulu.io");
        assert_eq!(
            strip_placeholders("sulu.io/{language}-{country}/blog"),
            "sulu.io/blog"
        );
    }
}
