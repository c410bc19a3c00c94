//! bankview-ingest: client for the statement backend (bulk load, PDF upload,
//! category save) and its wire types.

pub mod client;
pub mod types;

pub use client::{DEFAULT_BASE_URL, StatementClient};
pub use types::{AllTransactions, CategoryUpdate, UploadResponse};
