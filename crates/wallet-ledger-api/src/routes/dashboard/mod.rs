//! Dashboard routes - summary totals and cards

pub mod api;

pub use api::{api_dashboard, api_summary};
