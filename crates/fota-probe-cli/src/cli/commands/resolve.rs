//! `fota-probe resolve [host]` – hostname resolution.

use anyhow::{Context, Result};
use fota_probe_core::resolve;

pub async fn run_resolve(host: &str) -> Result<()> {
    let entry = tokio::task::spawn_blocking({
        let host = host.to_string();
        move || resolve::resolve_host(&host)
    })
    .await
    .context("resolve task join")??;
    match entry.display_name() {
        Some(name) => println!("Resolved to {}", name),
        None => println!("Resolved {} (no canonical name)", entry.query),
    }
    for addr in &entry.addresses {
        println!("  {}", addr);
    }
    Ok(())
}
