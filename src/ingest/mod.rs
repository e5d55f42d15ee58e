//! # Ingestion Engine
//!
//! Bulk and single-row entry. A request is validated in full before
//! anything is written: every faulty line is reported, and a batch
//! commits atomically or not at all.

pub mod engine;
pub mod errors;
pub mod parse;
pub mod report;

pub use engine::Engine;
pub use errors::{BatchError, IngestResult};
pub use report::{BatchReceipt, IssueKind, RowIssue};
