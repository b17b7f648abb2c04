//! Package metadata lookup against the FOTA REST API.

use crate::config::ProbeConfig;
use crate::error::Result;
use crate::request::RequestSpec;
use crate::transport::{self, TransportOptions};
use crate::unescape::unescape;

/// The four operator-supplied fields of a package query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataQuery {
    pub version: String,
    pub model: String,
    pub host_device_type: String,
    pub host_identifier: String,
}

impl MetadataQuery {
    fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("sw_pkg_version", self.version.as_str()),
            ("model", self.model.as_str()),
            ("host_device_type", self.host_device_type.as_str()),
            ("host_device_identifier", self.host_identifier.as_str()),
        ]
    }

    /// Query string without the leading `?`.
    ///
    /// With `raw` the values are interpolated untouched, exactly as the legacy
    /// tester did; otherwise they are form-urlencoded.
    pub fn query_string(&self, raw: bool) -> String {
        if raw {
            self.pairs()
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&")
        } else {
            url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.pairs())
                .finish()
        }
    }

    pub fn url(&self, base_url: &str, raw: bool) -> String {
        format!("{}?{}", base_url, self.query_string(raw))
    }

    pub fn plan(&self, base_url: &str, raw: bool) -> RequestSpec {
        RequestSpec::get(self.url(base_url, raw))
    }
}

/// Unescaped response lines, in the order the server sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataResponse {
    pub status: u32,
    pub lines: Vec<String>,
}

impl MetadataResponse {
    /// Lines concatenated with no separator (what the legacy display showed).
    pub fn joined(&self) -> String {
        self.lines.concat()
    }

    pub fn joined_with_newlines(&self) -> String {
        self.lines.join("\n")
    }

    /// Pretty-printed JSON if the joined text parses as JSON.
    pub fn pretty_json(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.joined()).ok()?;
        serde_json::to_string_pretty(&value).ok()
    }
}

/// Splits on `\n`, `\r\n` or a lone `\r`. A trailing terminator does not
/// produce an empty last line.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Decodes a response body (UTF-8, invalid sequences replaced, leading BOM
/// dropped) into unescaped lines.
pub fn parse_body(body: &[u8]) -> Result<Vec<String>> {
    let text = String::from_utf8_lossy(body);
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);
    split_lines(text).into_iter().map(unescape).collect()
}

/// Runs the metadata lookup described by `query`.
pub fn lookup(query: &MetadataQuery, cfg: &ProbeConfig) -> Result<MetadataResponse> {
    let spec = query.plan(&cfg.metadata_base_url, cfg.raw_query);
    let opts = TransportOptions::from(cfg);

    let mut body = Vec::new();
    let status = transport::execute(&spec, &opts, "response buffer", |data| {
        body.extend_from_slice(data);
        Ok(())
    })?;
    transport::ensure_success(&spec.url, status)?;

    let lines = parse_body(&body)?;
    tracing::info!(
        url = %spec.url,
        status,
        bytes = body.len(),
        lines = lines.len(),
        "metadata lookup complete"
    );
    Ok(MetadataResponse { status, lines })
}
