//! Route modules for the API server
//!
//! - transactions: listing, search, sorting, lookup and batch validation
//! - dashboard: summary totals and the dashboard cards
//! - settings: effective configuration
//!
//! Each module keeps its handlers in `api.rs`.

pub mod dashboard;
pub mod settings;
pub mod transactions;
