//! Strict-parser error taxonomy for the track-data files.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading one track-data file.
///
/// These surface only from the strict parsers; the absorbing loaders in
/// [`crate::TrackData`] turn every variant into an empty, degraded dataset.
#[derive(Debug, Error)]
pub enum TrackDataError {
    /// The file could not be read at all.
    #[error("failed to read {}", path.display())]
    Io {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The XML structure itself is broken.
    #[error("malformed XML")]
    Xml(#[from] quick_xml::Error),

    /// A record element lacks one of its required fields.
    #[error("record {index} is missing field {field}")]
    MissingField {
        /// Zero-based record position within the file.
        index: usize,
        /// Name of the absent field element.
        field: &'static str,
    },

    /// A numeric field holds text that does not parse.
    #[error("record {index} field {field} has unparsable number {value:?}")]
    InvalidNumber {
        /// Zero-based record position within the file.
        index: usize,
        /// Name of the offending field element.
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },

    /// A direction field holds neither of the two known labels.
    #[error("record {index} has unknown direction label {value:?}")]
    UnknownDirection {
        /// Zero-based record position within the file.
        index: usize,
        /// The raw label text.
        value: String,
    },
}
