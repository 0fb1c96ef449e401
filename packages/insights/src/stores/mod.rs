//! Storage implementations.

pub mod fs;
pub mod memory;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use fs::FsObjectStore;
pub use memory::MemoryStore;

#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;
