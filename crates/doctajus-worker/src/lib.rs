//! Background text extraction for stored documents.
//!
//! This crate provides:
//! - A bounded job queue the document service pushes into without blocking
//! - A runner that reads stored files, extracts text and records it
//! - A reporter that drains the failure channel into the log

pub mod extractor;
pub mod job;
pub mod queue;
pub mod reporter;
pub mod runner;

pub use job::{IndexFailure, IndexJob};
pub use queue::{IndexQueue, index_channel};
pub use reporter::FailureReporter;
pub use runner::{IndexSink, IndexingRunner};
