//! `fota-probe config-path` – show where config.toml lives.

use anyhow::Result;
use fota_probe_core::config;

pub fn run_config_path() -> Result<()> {
    println!("{}", config::config_path()?.display());
    Ok(())
}
