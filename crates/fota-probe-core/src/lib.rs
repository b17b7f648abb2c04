//! Request operations for exercising a FOTA distribution proxy and its
//! package metadata API.
//!
//! Four independent operations, each a blocking call returning
//! [`error::Result`]:
//!
//! - [`fetch::fetch_direct`]: GET with the query carried in `p<N>` headers.
//! - [`fetch::fetch_via_proxy`]: POST a giant URL to a relay.
//! - [`metadata::lookup`]: package metadata REST query.
//! - [`resolve::resolve_host`]: canonical hostname resolution.

pub mod config;
pub mod error;
pub mod logging;

pub mod checksum;
pub mod fetch;
pub mod header_chunk;
pub mod metadata;
pub mod request;
pub mod resolve;
pub mod sink;
pub mod transport;
pub mod unescape;
