//! Transaction routes - listing, search, sorting, pagination
//!
//! Structure:
//! - api.rs: JSON endpoints

pub mod api;

pub use api::{api_recent_transactions, api_transaction_detail, api_transactions, api_validate_transactions};
