//! Fully planned HTTP requests.
//!
//! Each operation first turns operator input into a [`RequestSpec`]; the
//! transport only executes specs and knows nothing about where they came from.

/// `Content-Type` sent with every request; the proxy routes on it.
pub const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Minimal request specification needed by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
    /// Headers in send order.
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl RequestSpec {
    /// GET with the JSON content type already set.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string())],
            body: None,
        }
    }

    /// POST of a raw body with the JSON content type already set.
    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::Post,
            body: Some(body),
            ..Self::get(url)
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_carries_json_content_type() {
        let spec = RequestSpec::get("https://example.com/fw");
        assert_eq!(spec.method, Method::Get);
        assert_eq!(spec.header("content-type"), Some("application/json"));
        assert!(spec.body.is_none());
    }

    #[test]
    fn post_keeps_body_and_header_order() {
        let spec = RequestSpec::post("https://proxy.example.com", b"raw".to_vec())
            .with_header("p0", "?a")
            .with_header("p1", "bc");
        assert_eq!(spec.method.as_str(), "POST");
        assert_eq!(spec.body.as_deref(), Some(&b"raw"[..]));
        let names: Vec<&str> = spec.headers.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["Content-Type", "p0", "p1"]);
    }
}
