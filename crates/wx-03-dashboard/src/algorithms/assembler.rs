//! # Blog List Assembler
//!
//! Rebuilds the ordered content record list from the two parallel sequences
//! returned by `getBlogs()`.

use shared_types::{ContentRecord, RecordSequences};

use crate::domain::DashboardError;

/// Zip titles and content pointers into records.
///
/// Record *i* is `{ titles[i], pointers[i] }`. The sequences must have the
/// same length; otherwise the response is malformed and nothing is returned.
///
/// # Returns
/// * `Ok(records)` - index-aligned records, empty for two empty inputs
/// * `Err(MalformedResponse)` - the lengths differ
pub fn assemble(
    titles: Vec<String>,
    pointers: Vec<String>,
) -> Result<Vec<ContentRecord>, DashboardError> {
    if titles.len() != pointers.len() {
        return Err(DashboardError::MalformedResponse {
            titles: titles.len(),
            pointers: pointers.len(),
        });
    }

    Ok(titles
        .into_iter()
        .zip(pointers)
        .map(|(title, content_pointer)| ContentRecord {
            title,
            content_pointer,
        })
        .collect())
}

/// [`assemble`] over a raw `getBlogs()` result.
pub fn assemble_sequences(sequences: RecordSequences) -> Result<Vec<ContentRecord>, DashboardError> {
    assemble(sequences.titles, sequences.pointers)
}
