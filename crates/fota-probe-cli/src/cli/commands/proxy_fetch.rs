//! `fota-probe proxy-fetch <giant-url>` – download through the proxy relay.

use anyhow::{Context, Result};
use fota_probe_core::config::ProbeConfig;
use fota_probe_core::fetch;
use std::path::Path;

use super::fetch::print_report;

pub async fn run_proxy_fetch(
    cfg: &ProbeConfig,
    proxy: &str,
    giant_url: &str,
    output: &Path,
) -> Result<()> {
    let report = tokio::task::spawn_blocking({
        let cfg = cfg.clone();
        let proxy = proxy.to_string();
        let giant_url = giant_url.to_string();
        let output = output.to_path_buf();
        move || fetch::fetch_via_proxy(&proxy, &giant_url, &output, &cfg)
    })
    .await
    .context("proxy fetch task join")??;
    print_report(&report);
    Ok(())
}
