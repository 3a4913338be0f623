//! Query-string assembly.
//!
//! Parameters keep insertion order, which the API does not require but which
//! keeps generated URLs stable for tests and logs. Values are percent-encoded
//! with everything except `A-Z a-z 0-9 - _ . ~` escaped.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Ordered list of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Push only when `value` is present and non-empty.
    pub fn push_opt(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.push(key, v);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_VALUE),
                    utf8_percent_encode(v, QUERY_VALUE)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Encode a facet selection as `parent:child,child|parent:child`.
pub fn encode_attributes(selection: &[(i64, Vec<i64>)]) -> String {
    selection
        .iter()
        .map(|(parent, children)| {
            let children: Vec<String> = children.iter().map(i64::to_string).collect();
            format!("{parent}:{}", children.join(","))
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Replace the value of `client-token` in a URL, for logging.
pub fn redact_token(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let query: Vec<String> = query
        .split('&')
        .map(|pair| {
            if pair.starts_with("client-token=") {
                "client-token=REDACTED".to_string()
            } else {
                pair.to_string()
            }
        })
        .collect();
    format!("{base}?{}", query.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_keeps_insertion_order() {
        let mut q = QueryString::new();
        q.push("query", "shoes").push("client-token", "abc").push("limit", 30);
        assert_eq!(q.encode(), "query=shoes&client-token=abc&limit=30");
    }

    #[test]
    fn encode_escapes_reserved_characters() {
        let mut q = QueryString::new();
        q.push("query", "red & blue dress")
            .push("attributes", "10:101,102|20:201");
        assert_eq!(
            q.encode(),
            "query=red%20%26%20blue%20dress&attributes=10%3A101%2C102%7C20%3A201"
        );
    }

    #[test]
    fn encode_handles_utf8() {
        let mut q = QueryString::new();
        q.push("query", "çanta");
        assert_eq!(q.encode(), "query=%C3%A7anta");
    }

    #[test]
    fn push_opt_skips_none_and_empty() {
        let mut q = QueryString::new();
        q.push_opt("segments", None)
            .push_opt("negative_segments", Some(""))
            .push_opt("after", Some("XYZ"));
        assert_eq!(q.encode(), "after=XYZ");
        assert_eq!(q.get("after"), Some("XYZ"));
        assert_eq!(q.get("segments"), None);
    }

    #[test]
    fn attributes_use_pipe_and_comma() {
        let selection = vec![(10, vec![101, 102]), (20, vec![201])];
        assert_eq!(encode_attributes(&selection), "10:101,102|20:201");
        assert_eq!(encode_attributes(&[]), "");
    }

    #[test]
    fn redact_token_hides_only_the_token() {
        let url = "https://api.aisearch.app/sites/1/v1/settings?client-token=secret&user_id=u1";
        assert_eq!(
            redact_token(url),
            "https://api.aisearch.app/sites/1/v1/settings?client-token=REDACTED&user_id=u1"
        );
        assert_eq!(redact_token("http://x/no-query"), "http://x/no-query");
    }
}
