//! Display formatting and pagination helpers

pub mod amount;
pub mod pagination;

pub use amount::{format_amount, safe_format_amount, AmountStyle};
pub use pagination::{paginate, Page};

use chrono::{DateTime, NaiveDate};

/// Group the digits of an integer string with `separator`
pub fn format_number<T: ToString>(n: T, separator: &str) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let mut groups = Vec::new();
    let mut end = digits.len();
    while end > 3 {
        groups.push(&digits[end - 3..end]);
        end -= 3;
    }
    groups.push(&digits[..end]);
    groups.reverse();

    format!("{}{}", sign, groups.join(separator))
}

/// Render a date as `MM/DD/YYYY`.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; anything else renders as
/// `"Invalid Date"`.
pub fn safe_format_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));

    match date {
        Some(date) => date.format("%m/%d/%Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Shorten a message to `max_chars` characters plus `...`
pub fn truncate_message(message: &str, max_chars: usize) -> String {
    if message.chars().count() <= max_chars {
        return message.to_string();
    }
    let head: String = message.chars().take(max_chars).collect();
    format!("{}...", head)
}

/// Which view a status message is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewContext {
    Transactions,
    Search,
    Filtered,
    Other,
}

impl std::str::FromStr for ViewContext {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "transactions" => ViewContext::Transactions,
            "search" => ViewContext::Search,
            "filtered" => ViewContext::Filtered,
            _ => ViewContext::Other,
        })
    }
}

/// Message shown when a view has nothing to list
pub fn empty_state_message(context: ViewContext, search_term: Option<&str>) -> String {
    if let Some(term) = search_term.filter(|t| !t.trim().is_empty()) {
        return format!("No transactions found matching \"{}\"", term);
    }

    match context {
        ViewContext::Transactions => "No transactions available",
        ViewContext::Search => "No search results found",
        ViewContext::Filtered => "No transactions match the current filters",
        _ => "No data available",
    }
    .to_string()
}
