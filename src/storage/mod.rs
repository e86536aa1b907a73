//! In-memory record stores
//!
//! One store per record type, keyed by UUID. The stores implement the
//! create/find/update/delete surface the handlers and the ingest pipeline
//! need; referential consistency across stores is maintained by the callers,
//! not by the stores themselves.

mod memory;

pub use memory::MemoryStore;
