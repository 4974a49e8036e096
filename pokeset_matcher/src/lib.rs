//! PokeSet Matcher - want-list matching service
//!
//! Serves the inventory, catalog and order APIs over an Airtable base and
//! matches pasted or uploaded want-lists against the shop's live stock.

pub mod config;
pub mod error;
pub mod orders;
pub mod report;
pub mod snapshot;
pub mod store;
pub mod web;

pub use config::{Args, Resource, StoreConfig, TableConfig};
pub use error::{Result, StoreError};
pub use orders::{stamp_order, submit_order_request};
pub use report::format_match_report;
pub use snapshot::Snapshot;
pub use store::{AirtableClient, AirtableRecord, Fields, RecordPages};
pub use web::{create_router, serve, ApiError, AppState};
