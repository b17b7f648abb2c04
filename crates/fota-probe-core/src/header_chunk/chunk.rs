//! Fixed-width chunking of a query string into `p<N>` header values.

use crate::error::{ProbeError, Result};

/// One header-sized piece of the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderChunk {
    /// Position of this piece; the header is named `p{index}`.
    pub index: usize,
    /// At most `max_len` characters of the query, in original order.
    pub value: String,
}

impl HeaderChunk {
    /// Header name for this chunk (`p0`, `p1`, ...).
    pub fn name(&self) -> String {
        format!("p{}", self.index)
    }
}

/// Splits `query` into consecutive pieces of at most `max_len` characters.
///
/// Pieces are cut on character boundaries, so concatenating every `value` in
/// index order gives back `query` byte for byte. An empty query yields no
/// chunks. CR and LF cannot travel in a header value and are rejected.
pub fn chunk_query(query: &str, max_len: usize) -> Result<Vec<HeaderChunk>> {
    if max_len == 0 {
        return Err(ProbeError::InvalidInput(
            "header chunk length must be at least 1".to_string(),
        ));
    }
    if let Some(pos) = query.find(['\r', '\n']) {
        return Err(ProbeError::InvalidInput(format!(
            "query contains a line break at offset {}",
            pos
        )));
    }

    let mut chunks = Vec::with_capacity(query.len().div_ceil(max_len));
    let mut start = 0usize;
    let mut count = 0usize;
    for (offset, _) in query.char_indices() {
        if count == max_len {
            chunks.push(HeaderChunk {
                index: chunks.len(),
                value: query[start..offset].to_string(),
            });
            start = offset;
            count = 0;
        }
        count += 1;
    }
    if start < query.len() {
        chunks.push(HeaderChunk {
            index: chunks.len(),
            value: query[start..].to_string(),
        });
    }
    Ok(chunks)
}
