//! `fota-probe fetch <url>` – direct firmware download.

use anyhow::{Context, Result};
use fota_probe_core::config::ProbeConfig;
use fota_probe_core::fetch::{self, FetchReport};
use std::path::Path;

pub(super) fn print_report(report: &FetchReport) {
    println!("Firmware written to {}", report.path.display());
    println!("  status:   {}", report.status);
    println!("  bytes:    {}", report.bytes_written);
    println!("  sha256:   {}", report.digest.sha256);
    println!(
        "  checksum: {} (size {})",
        report.digest.byte_sum, report.digest.size
    );
}

pub async fn run_fetch(cfg: &ProbeConfig, url: &str, output: &Path) -> Result<()> {
    let report = tokio::task::spawn_blocking({
        let cfg = cfg.clone();
        let url = url.to_string();
        let output = output.to_path_buf();
        move || fetch::fetch_direct(&url, &output, &cfg)
    })
    .await
    .context("fetch task join")??;
    print_report(&report);
    Ok(())
}
