//! Splitting a URL into request target and query.

use crate::error::{ProbeError, Result};

/// URL split at its first `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    /// Everything before the first `?`; the URL actually requested.
    pub base_url: String,
    /// Everything from the first `?` on, including the `?` itself.
    pub query: String,
}

/// Splits `url` at the first `?`.
///
/// A URL with no `?` is rejected: the direct fetch has nothing to put in its
/// headers and the firmware proxy would refuse the request anyway.
pub fn split_target(url: &str) -> Result<RequestTarget> {
    let idx = url.find('?').ok_or_else(|| {
        ProbeError::InvalidInput(format!("URL has no '?' query component: {}", url))
    })?;
    let (base, query) = url.split_at(idx);
    if base.is_empty() {
        return Err(ProbeError::InvalidInput(
            "URL has nothing before '?'".to_string(),
        ));
    }
    Ok(RequestTarget {
        base_url: base.to_string(),
        query: query.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_first_question_mark() {
        let t = split_target("https://example.com/fw?abc").unwrap();
        assert_eq!(t.base_url, "https://example.com/fw");
        assert_eq!(t.query, "?abc");
    }

    #[test]
    fn later_question_marks_stay_in_query() {
        let t = split_target("https://example.com/fw?a=1?b=2").unwrap();
        assert_eq!(t.base_url, "https://example.com/fw");
        assert_eq!(t.query, "?a=1?b=2");
    }

    #[test]
    fn bare_question_mark_is_a_query() {
        let t = split_target("https://example.com/fw?").unwrap();
        assert_eq!(t.query, "?");
    }

    #[test]
    fn query_whitespace_is_preserved() {
        let t = split_target("https://example.com/fw?a=1 ").unwrap();
        assert_eq!(t.query, "?a=1 ");
    }

    #[test]
    fn missing_question_mark_is_invalid_input() {
        let err = split_target("https://example.com/fw").unwrap_err();
        assert!(matches!(err, ProbeError::InvalidInput(_)));
    }

    #[test]
    fn empty_base_is_invalid_input() {
        assert!(matches!(
            split_target("?abc"),
            Err(ProbeError::InvalidInput(_))
        ));
    }
}
