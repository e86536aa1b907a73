//! Text extraction from uploaded files
//!
//! Maps a declared media type to an extraction strategy and returns plain
//! text. Unrecognized media types are rejected before any parsing; parser
//! failures are wrapped so raw library errors never reach the caller.

mod parser;

pub use parser::{MediaType, TextExtractor};
