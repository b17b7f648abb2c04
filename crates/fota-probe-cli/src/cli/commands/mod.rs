//! CLI command handlers, one file per subcommand.
//!
//! Operations are blocking, so each handler runs its operation on the
//! blocking pool and only prints the result.

mod config_path;
mod fetch;
mod metadata;
mod proxy_fetch;
mod resolve;

pub use config_path::run_config_path;
pub use fetch::run_fetch;
pub use metadata::{run_metadata, MetadataArgs};
pub use proxy_fetch::run_proxy_fetch;
pub use resolve::run_resolve;
