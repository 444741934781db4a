//! Display dates in the "Jun 14, 2023" style used across the UI

use chrono::{Local, NaiveDate};

pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
