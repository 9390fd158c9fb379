//! Models Module
//!
//! Read-only snapshot and report types exposed to observability callers.

pub mod report;

pub use report::{CacheReport, StoreSnapshot};
