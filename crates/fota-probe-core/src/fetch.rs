//! Firmware download operations.
//!
//! - Direct fetch: GET the URL up to `?`, carrying the query in `p<N>` headers.
//! - Proxied fetch: POST an (unescaped) giant URL to a relay that downloads it.
//!
//! Both stream the response body into the configured output file.

use crate::checksum::{self, ArtifactDigest};
use crate::config::ProbeConfig;
use crate::error::{ProbeError, Result};
use crate::header_chunk::{chunk_query, split_target};
use crate::request::RequestSpec;
use crate::sink::{self, OutputSink};
use crate::transport::{self, TransportOptions};
use crate::unescape::unescape;
use std::path::{Path, PathBuf};

/// Outcome of a completed fetch.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub path: PathBuf,
    pub status: u32,
    pub bytes_written: u64,
    pub digest: ArtifactDigest,
}

/// Plans the direct fetch: target is everything before the first `?`, the
/// rest (with the `?`) is split into `p0..pN` headers of `chunk_len` chars.
pub fn plan_direct(url: &str, chunk_len: usize) -> Result<RequestSpec> {
    let target = split_target(url)?;
    let chunks = chunk_query(&target.query, chunk_len)?;
    tracing::debug!(
        base = %target.base_url,
        query_len = target.query.len(),
        chunks = chunks.len(),
        "planned direct fetch"
    );
    Ok(chunks
        .into_iter()
        .fold(RequestSpec::get(target.base_url), |spec, chunk| {
            spec.with_header(chunk.name(), chunk.value)
        }))
}

/// Plans the proxied fetch: the giant URL is unescaped and becomes the raw
/// POST body.
pub fn plan_proxied(proxy_url: &str, giant_url: &str) -> Result<RequestSpec> {
    let proxy_url = proxy_url.trim();
    if proxy_url.is_empty() {
        return Err(ProbeError::InvalidInput(
            "proxy URL must not be empty".to_string(),
        ));
    }
    if giant_url.trim().is_empty() {
        return Err(ProbeError::InvalidInput(
            "giant URL must not be empty".to_string(),
        ));
    }
    let body = unescape(giant_url)?;
    tracing::debug!(proxy = %proxy_url, body_len = body.len(), "planned proxied fetch");
    Ok(RequestSpec::post(proxy_url, body.into_bytes()))
}

/// Direct firmware fetch into `output`.
pub fn fetch_direct(url: &str, output: &Path, cfg: &ProbeConfig) -> Result<FetchReport> {
    let spec = plan_direct(url, cfg.header_chunk_len)?;
    download_to(&spec, output, cfg)
}

/// Proxied giant-URL fetch into `output`.
pub fn fetch_via_proxy(
    proxy_url: &str,
    giant_url: &str,
    output: &Path,
    cfg: &ProbeConfig,
) -> Result<FetchReport> {
    let spec = plan_proxied(proxy_url, giant_url)?;
    download_to(&spec, output, cfg)
}

/// Runs `spec` with `output` as the body sink. Input is already validated, so
/// the previous file is only removed once the request is about to go out.
fn download_to(spec: &RequestSpec, output: &Path, cfg: &ProbeConfig) -> Result<FetchReport> {
    let opts = TransportOptions::from(cfg);
    let _guard = sink::lock();

    let mut out = OutputSink::replace(output)?;
    let sink_name = out.path().display().to_string();
    let status = match transport::execute(spec, &opts, &sink_name, |data| out.write(data))
        .and_then(|status| transport::ensure_success(&spec.url, status).map(|()| status))
    {
        Ok(status) => status,
        Err(e) => {
            out.discard();
            return Err(e);
        }
    };

    let bytes_written = out.finish()?;
    let digest = match checksum::digest_path(output) {
        Ok(d) => d,
        Err(e) => {
            sink::remove_artifact(output);
            return Err(e);
        }
    };
    tracing::info!(
        url = %spec.url,
        status,
        bytes = bytes_written,
        sha256 = %digest.sha256,
        "firmware written to {}",
        output.display()
    );
    Ok(FetchReport {
        path: output.to_path_buf(),
        status,
        bytes_written,
        digest,
    })
}
