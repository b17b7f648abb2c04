//! Executes a [`RequestSpec`] with libcurl.
//!
//! Blocking; runs in the current thread. Call from `spawn_blocking` if used
//! from async code.

use crate::config::ProbeConfig;
use crate::error::{ProbeError, Result};
use crate::request::{Method, RequestSpec};
use std::io;
use std::time::Duration;

/// Timeouts applied to a single request.
#[derive(Debug, Clone, Copy)]
pub struct TransportOptions {
    /// Longest wait for the response, and longest a body may stall.
    pub stall_timeout: Duration,
    pub connect_timeout: Duration,
    /// Safety net for the whole transfer.
    pub max_transfer_time: Duration,
}

impl From<&ProbeConfig> for TransportOptions {
    fn from(cfg: &ProbeConfig) -> Self {
        Self {
            stall_timeout: cfg.timeout(),
            connect_timeout: cfg.connect_timeout(),
            max_transfer_time: cfg.max_transfer_time(),
        }
    }
}

/// Performs `spec`, handing each body chunk to `on_data` in arrival order.
///
/// Returns the final HTTP status (after redirects). The status is not checked
/// here; see [`ensure_success`]. If `on_data` fails the transfer is aborted and
/// its error is returned as [`ProbeError::Io`] against `sink_name`.
pub fn execute<F>(
    spec: &RequestSpec,
    opts: &TransportOptions,
    sink_name: &str,
    mut on_data: F,
) -> Result<u32>
where
    F: FnMut(&[u8]) -> io::Result<()>,
{
    let transport_err = |source: curl::Error| ProbeError::Transport {
        url: spec.url.clone(),
        source,
    };

    let mut easy = curl::easy::Easy::new();
    easy.url(&spec.url).map_err(transport_err)?;
    easy.follow_location(true).map_err(transport_err)?;
    easy.max_redirections(10).map_err(transport_err)?;
    easy.connect_timeout(opts.connect_timeout)
        .map_err(transport_err)?;
    // Abort when nothing arrives for `stall_timeout`, whether waiting for the
    // response or mid-body. A slow but live firmware download keeps going.
    easy.low_speed_limit(1).map_err(transport_err)?;
    easy.low_speed_time(opts.stall_timeout)
        .map_err(transport_err)?;
    // Safety net: hard cap so a trickling transfer eventually fails.
    easy.timeout(opts.max_transfer_time)
        .map_err(transport_err)?;

    let mut list = curl::easy::List::new();
    for (k, v) in &spec.headers {
        list.append(&format!("{}: {}", k.trim(), v)).map_err(transport_err)?;
    }

    match spec.method {
        Method::Get => easy.get(true).map_err(transport_err)?,
        Method::Post => {
            easy.post(true).map_err(transport_err)?;
            let body = spec.body.as_deref().unwrap_or_default();
            easy.post_fields_copy(body).map_err(transport_err)?;
            // Send the body right away instead of waiting on 100-continue.
            list.append("Expect:").map_err(transport_err)?;
        }
    }
    easy.http_headers(list).map_err(transport_err)?;

    tracing::debug!(
        method = spec.method.as_str(),
        url = %spec.url,
        headers = spec.headers.len(),
        "sending request"
    );

    let mut write_error: Option<io::Error> = None;
    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match on_data(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    write_error = Some(e);
                    Ok(0) // abort transfer
                }
            })
            .map_err(transport_err)?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(ProbeError::io(sink_name, e));
    }
    performed.map_err(transport_err)?;

    let code = easy.response_code().map_err(transport_err)?;
    tracing::debug!(url = %spec.url, status = code, "response complete");
    Ok(code)
}

/// Maps a non-2xx status to [`ProbeError::Http`].
pub fn ensure_success(url: &str, status: u32) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ProbeError::Http {
            url: url.to_string(),
            status,
        })
    }
}
