//! Query-string-to-header splitting for the direct firmware fetch.
//!
//! The fetch target is the URL up to the first `?`; everything from the `?`
//! on is carried in numbered `p0`, `p1`, ... headers so the request line stays
//! short no matter how long the signed query is.

mod chunk;
mod target;

pub use chunk::{chunk_query, HeaderChunk};
pub use target::{split_target, RequestTarget};

/// Longest value carried by a single `p<N>` header.
pub const DEFAULT_CHUNK_LEN: usize = 63;
