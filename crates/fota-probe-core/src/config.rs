use crate::error::{ProbeError, Result};
use crate::header_chunk::DEFAULT_CHUNK_LEN;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Package metadata endpoint queried by the metadata lookup.
pub const DEFAULT_METADATA_BASE_URL: &str = "https://p.k2labs.org/api/d1/packages";

/// Proxy relay that accepts a raw URL in a POST body.
pub const DEFAULT_PROXY_URL: &str = "https://ag-pxy.p.k2labs.org";

/// File name of the download sink inside the temp directory.
pub const DEFAULT_OUTPUT_FILE: &str = "downloaded_from_aws.bin";

/// Global configuration loaded from `~/.config/fota-probe/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Download sink shared by the direct and proxied fetch. The parent
    /// directory must already exist.
    pub output_path: PathBuf,
    /// Seconds allowed to get a response, and the longest a body may stall
    /// before the transfer is aborted.
    pub timeout_secs: u64,
    /// TCP/TLS connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Hard cap on a whole transfer in seconds, body included.
    #[serde(default = "default_max_transfer_secs")]
    pub max_transfer_secs: u64,
    /// Maximum characters per `p<N>` header.
    #[serde(default = "default_header_chunk_len")]
    pub header_chunk_len: usize,
    /// Proxy used by `proxy-fetch` when none is given on the command line.
    pub proxy_url: String,
    /// Base of the package metadata REST query.
    pub metadata_base_url: String,
    /// Interpolate metadata fields without percent-encoding (byte-for-byte
    /// compatible with the legacy tester).
    #[serde(default)]
    pub raw_query: bool,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_transfer_secs() -> u64 {
    3600
}

fn default_header_chunk_len() -> usize {
    DEFAULT_CHUNK_LEN
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            output_path: std::env::temp_dir().join(DEFAULT_OUTPUT_FILE),
            timeout_secs: 20,
            connect_timeout_secs: default_connect_timeout_secs(),
            max_transfer_secs: default_max_transfer_secs(),
            header_chunk_len: DEFAULT_CHUNK_LEN,
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            metadata_base_url: DEFAULT_METADATA_BASE_URL.to_string(),
            raw_query: false,
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn max_transfer_time(&self) -> Duration {
        Duration::from_secs(self.max_transfer_secs)
    }

    /// Rejects values that would make every request fail in a confusing way.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(ProbeError::InvalidInput(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ProbeError::InvalidInput(
                "connect_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_transfer_secs < self.timeout_secs {
            return Err(ProbeError::InvalidInput(
                "max_transfer_secs must not be less than timeout_secs".to_string(),
            ));
        }
        if self.header_chunk_len == 0 {
            return Err(ProbeError::InvalidInput(
                "header_chunk_len must be greater than 0".to_string(),
            ));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ProbeError::InvalidInput(
                "output_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors from locating, reading or writing the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot locate config directory: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),
    #[error("config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Invalid(#[from] ProbeError),
}

pub fn config_path() -> std::result::Result<PathBuf, ConfigError> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fota-probe")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> std::result::Result<ProbeConfig, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ProbeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ProbeConfig = toml::from_str(&data)?;
    cfg.validate()?;
    Ok(cfg)
}
