//! CLI for fota-probe. Each subcommand triggers one request operation.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fota_probe_core::config;
use std::path::PathBuf;

use commands::{run_config_path, run_fetch, run_metadata, run_proxy_fetch, run_resolve, MetadataArgs};

/// Top-level CLI for fota-probe.
#[derive(Debug, Parser)]
#[command(name = "fota-probe")]
#[command(about = "Exercise a FOTA distribution proxy and package metadata API", long_about = None)]
pub struct Cli {
    /// Override the request timeout from config.toml, in seconds.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download firmware directly; the query string travels in p0..pN headers.
    Fetch {
        /// Signed firmware URL; must contain a '?' query component.
        url: String,

        /// Write the firmware here instead of the configured output path.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// POST a (possibly escaped) giant URL to the proxy relay and save the result.
    ProxyFetch {
        /// URL for the proxy to fetch; backslash escapes are decoded first.
        giant_url: String,

        /// Proxy relay address (defaults to proxy_url from config.toml).
        #[arg(long)]
        proxy: Option<String>,

        /// Write the firmware here instead of the configured output path.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Query the package metadata API.
    Metadata {
        /// Software package version.
        #[arg(long, default_value = "10008")]
        pkg_version: String,

        /// Device model.
        #[arg(long, default_value = "es-2")]
        model: String,

        /// Host device type.
        #[arg(long, default_value = "ag")]
        device_type: String,

        /// Host device identifier.
        #[arg(long, default_value = "ATY-GP0-FF2")]
        host_id: String,

        /// Send field values without percent-encoding.
        #[arg(long)]
        raw_query: bool,

        /// Keep the response's line breaks.
        #[arg(long)]
        keep_newlines: bool,

        /// Pretty-print the response if it is JSON.
        #[arg(long)]
        pretty: bool,
    },

    /// Resolve a hostname and print its canonical name.
    Resolve {
        /// Hostname to resolve.
        #[arg(default_value = "iot.keeptruckin.com")]
        host: String,
    },

    /// Print the location of config.toml.
    ConfigPath,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::ConfigPath = cli.command {
            return run_config_path();
        }

        let mut cfg = config::load_or_init().context("loading config")?;
        if let Some(secs) = cli.timeout {
            cfg.timeout_secs = secs;
            cfg.validate()?;
        }
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch { url, output } => {
                let output = output.unwrap_or_else(|| cfg.output_path.clone());
                run_fetch(&cfg, &url, &output).await?;
            }
            CliCommand::ProxyFetch {
                giant_url,
                proxy,
                output,
            } => {
                let proxy = proxy.unwrap_or_else(|| cfg.proxy_url.clone());
                let output = output.unwrap_or_else(|| cfg.output_path.clone());
                run_proxy_fetch(&cfg, &proxy, &giant_url, &output).await?;
            }
            CliCommand::Metadata {
                pkg_version,
                model,
                device_type,
                host_id,
                raw_query,
                keep_newlines,
                pretty,
            } => {
                if raw_query {
                    cfg.raw_query = true;
                }
                let args = MetadataArgs {
                    version: pkg_version,
                    model,
                    host_device_type: device_type,
                    host_identifier: host_id,
                    keep_newlines,
                    pretty,
                };
                run_metadata(&cfg, args).await?;
            }
            CliCommand::Resolve { host } => run_resolve(&host).await?,
            CliCommand::ConfigPath => run_config_path()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
