//! Durable storage adapters
//!
//! - [`MemoryStorage`]: process lifetime only; tests and server-side
//!   rendering
//! - [`FileStorage`]: a single JSON object file that survives restarts

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;
