//! Upload-and-generate pipeline
//!
//! Drives one upload end to end: media type gate, text extraction, flash
//! card generation, then persistence of the document and its cards as one
//! logical unit with compensating cleanup on partial failure.

mod pipeline;

pub use pipeline::{ingest_upload, IngestOutcome};
