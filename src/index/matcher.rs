//! Request url normalization and wildcard expressions.
//!
//! Index keys and incoming requests share one shape: lower-cased host
//! (with non-default port), decoded path, no query, no trailing slash.
//!
//! ```text
//! https://Sulu.IO:443/en/news/?page=2  ->  sulu.io/en/news
//! sulu.io:8080/de/                     ->  sulu.io:8080/de
//! ```

use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::webspace::WILDCARD;

/// Normalize a request or configured url into index-key form.
pub fn normalize_request_url(input: &str) -> String {
    let trimmed = input.trim();

    let (host, path) = match trimmed.split_once("://") {
        Some((_, rest)) => match url::Url::parse(trimmed) {
            Ok(parsed) => {
                let host = parsed.host_str().unwrap_or_default();
                let host = match parsed.port() {
                    Some(port) => format!("{host}:{port}"),
                    None => host.to_string(),
                };
                (host, parsed.path().to_string())
            }
            Err(_) => split_host_path(rest),
        },
        None => split_host_path(trimmed),
    };

    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = percent_decode_str(path)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string());

    let mut normalized = host.to_lowercase();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        normalized.push('/');
        normalized.push_str(segment);
    }
    normalized
}

fn split_host_path(input: &str) -> (String, String) {
    match input.find('/') {
        Some(idx) => (input[..idx].to_string(), input[idx..].to_string()),
        None => (input.to_string(), String::new()),
    }
}

/// Compiled custom-url pattern.
///
/// Every `*` matches one non-empty run without `/`; anything after the
/// pattern (starting at a `/`) is the resource locator.
#[derive(Debug, Clone)]
pub struct UrlExpression {
    source: String,
    regex: Regex,
}

impl UrlExpression {
    pub fn from_custom_url(url: &str) -> Result<Self, regex::Error> {
        let body = url
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("([^/]+)");
        let regex = Regex::new(&format!("^{body}(?P<rest>/.*)?$"))?;
        Ok(Self {
            source: url.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, request: &str) -> bool {
        self.regex.is_match(request)
    }

    /// Resource locator after the matched pattern (`/` when nothing follows).
    pub fn match_remainder(&self, request: &str) -> Option<String> {
        let captures = self.regex.captures(request)?;
        Some(
            captures
                .name("rest")
                .map_or_else(|| "/".to_string(), |m| m.as_str().to_string()),
        )
    }
}

impl Serialize for UrlExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_with_scheme() {
        assert_eq!(
            normalize_request_url("https://Sulu.IO:443/en/news/?page=2"),
            "sulu.io/en/news"
        );
        assert_eq!(
            normalize_request_url("http://sulu.io:8080/de/"),
            "sulu.io:8080/de"
        );
    }

    #[test]
    fn test_normalize_without_scheme() {
        assert_eq!(normalize_request_url("sulu.io/"), "sulu.io");
        assert_eq!(normalize_request_url("sulu.io//en///about"), "sulu.io/en/about");
        assert_eq!(normalize_request_url("sulu.io/caf%C3%A9#top"), "sulu.io/café");
    }

    #[test]
    fn test_expression_escapes_dots() {
        let expr = UrlExpression::from_custom_url("*.sulu.io").unwrap();
        assert!(expr.is_match("blog.sulu.io"));
        assert!(!expr.is_match("blogXsulu.io"));
        assert!(!expr.is_match(".sulu.io"));
    }

    #[test]
    fn test_expression_remainder() {
        let expr = UrlExpression::from_custom_url("*.sulu.io/landing/*").unwrap();
        assert_eq!(
            expr.match_remainder("shop.sulu.io/landing/summer/terms").as_deref(),
            Some("/terms")
        );
        assert_eq!(
            expr.match_remainder("shop.sulu.io/landing/summer").as_deref(),
            Some("/")
        );
        assert_eq!(expr.match_remainder("sulu.io/landing/summer"), None);
    }
}
