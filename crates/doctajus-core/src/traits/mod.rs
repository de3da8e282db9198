//! Core traits defined in `doctajus-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;
