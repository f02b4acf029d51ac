//! Built-in sample transactions
//!
//! `sample()` is the nine-record wallet used by the transactions view,
//! `extended()` the twenty-record month used by the dashboard demo.

use serde_json::{json, Value};

fn record(id: &str, date: &str, remark: &str, amount: i64, kind: &str) -> Value {
    json!({
        "id": id,
        "date": date,
        "remark": remark,
        "amount": amount,
        "currency": "USD",
        "type": kind,
    })
}

/// Nine transactions: one salary credit followed by eight debits
pub fn sample() -> Vec<Value> {
    vec![
        record("1", "2023-10-01", "Salary", 3000, "Credit"),
        record("2", "2023-10-02", "Groceries", -150, "Debit"),
        record("3", "2023-10-03", "Gym Membership", -50, "Debit"),
        record("4", "2023-10-04", "Dinner", -40, "Debit"),
        record("5", "2023-10-05", "Movie Tickets", -30, "Debit"),
        record("6", "2023-10-06", "Rent", -1200, "Debit"),
        record("7", "2023-10-07", "Utilities", -100, "Debit"),
        record("8", "2023-10-08", "Car Payment", -400, "Debit"),
        record("9", "2023-10-09", "Insurance", -200, "Debit"),
    ]
}

/// Twenty transactions covering 2023-10-01 through 2023-10-20
pub fn extended() -> Vec<Value> {
    vec![
        record("1", "2023-10-01", "Salary", 3000, "Credit"),
        record("2", "2023-10-02", "Groceries", -150, "Debit"),
        record("3", "2023-10-03", "Gym Membership", -50, "Debit"),
        record("4", "2023-10-04", "Freelance Project", 1000, "Credit"),
        record("5", "2023-10-05", "Restaurant", -75, "Debit"),
        record("6", "2023-10-06", "Gas Station", -45, "Debit"),
        record("7", "2023-10-07", "Online Shopping", -200, "Debit"),
        record("8", "2023-10-08", "Consulting Fee", 2500, "Credit"),
        record("9", "2023-10-09", "Movie Tickets", -30, "Debit"),
        record("10", "2023-10-10", "Coffee Shop", -12, "Debit"),
        record("11", "2023-10-11", "Book Purchase", -25, "Debit"),
        record("12", "2023-10-12", "Investment Dividend", 150, "Credit"),
        record("13", "2023-10-13", "Pharmacy", -35, "Debit"),
        record("14", "2023-10-14", "Haircut", -40, "Debit"),
        record("15", "2023-10-15", "Side Gig", 800, "Credit"),
        record("16", "2023-10-16", "Electric Bill", -120, "Debit"),
        record("17", "2023-10-17", "Internet Bill", -80, "Debit"),
        record("18", "2023-10-18", "Gift Purchase", -60, "Debit"),
        record("19", "2023-10-19", "Car Maintenance", -300, "Debit"),
        record("20", "2023-10-20", "Bonus", 1500, "Credit"),
    ]
}
