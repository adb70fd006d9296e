//! Pluralization utilities.

/// Return "s" suffix for plural counts
///
/// # Examples
///
/// - `plural_s(0)` -> `"s"` (0 entries)
/// - `plural_s(1)` -> `""` (1 entry)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(1, "portal")` -> `"1 portal"`
/// - `plural_count(3, "portal")` -> `"3 portals"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "url"), "0 urls");
        assert_eq!(plural_count(1, "url"), "1 url");
        assert_eq!(plural_count(2, "webspace"), "2 webspaces");
    }
}
