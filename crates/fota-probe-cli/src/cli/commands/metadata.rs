//! `fota-probe metadata` – package metadata lookup.

use anyhow::{Context, Result};
use fota_probe_core::config::ProbeConfig;
use fota_probe_core::metadata::{self, MetadataQuery, MetadataResponse};

/// Query fields plus display options.
#[derive(Debug, Clone)]
pub struct MetadataArgs {
    pub version: String,
    pub model: String,
    pub host_device_type: String,
    pub host_identifier: String,
    pub keep_newlines: bool,
    pub pretty: bool,
}

fn render(resp: &MetadataResponse, keep_newlines: bool, pretty: bool) -> String {
    if pretty {
        if let Some(p) = resp.pretty_json() {
            return p;
        }
        tracing::debug!("response is not JSON; printing as-is");
    }
    if keep_newlines {
        resp.joined_with_newlines()
    } else {
        resp.joined()
    }
}

pub async fn run_metadata(cfg: &ProbeConfig, args: MetadataArgs) -> Result<()> {
    let query = MetadataQuery {
        version: args.version,
        model: args.model,
        host_device_type: args.host_device_type,
        host_identifier: args.host_identifier,
    };
    let resp = tokio::task::spawn_blocking({
        let cfg = cfg.clone();
        move || metadata::lookup(&query, &cfg)
    })
    .await
    .context("metadata task join")??;
    println!("{}", render(&resp, args.keep_newlines, args.pretty));
    Ok(())
}
