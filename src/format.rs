//! Display formatting
//!
//! Grouped counts and locale-style dates for the dashboard text. Dates are
//! rendered in UTC.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Format a count with thousands separators (`1234567` -> `1,234,567`)
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Signed variant of [`format_count`]
pub fn format_signed(n: i64) -> String {
    if n < 0 {
        format!("-{}", format_count(n.unsigned_abs()))
    } else {
        format_count(n as u64)
    }
}

/// Date display conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "ko-KR")]
    KoKr,
}

impl Locale {
    /// Short date for list rows: `1/3/2021` or `2021. 1. 3`
    pub fn list_date(&self, dt: &DateTime<Utc>) -> String {
        match self {
            Locale::EnUs => format!("{}/{}/{}", dt.month(), dt.day(), dt.year()),
            Locale::KoKr => format!("{}. {}. {}", dt.year(), dt.month(), dt.day()),
        }
    }

    /// Month/day label for chart axes: `1/3` or `1. 3`
    pub fn chart_label(&self, dt: &DateTime<Utc>) -> String {
        match self {
            Locale::EnUs => format!("{}/{}", dt.month(), dt.day()),
            Locale::KoKr => format!("{}. {}", dt.month(), dt.day()),
        }
    }

    /// Full date and time for the "last updated" label
    pub fn timestamp(&self, dt: &DateTime<Utc>) -> String {
        let (pm, hour) = dt.hour12();
        match self {
            Locale::EnUs => format!(
                "{}/{}/{}, {}:{:02}:{:02} {}",
                dt.month(),
                dt.day(),
                dt.year(),
                hour,
                dt.minute(),
                dt.second(),
                if pm { "PM" } else { "AM" }
            ),
            Locale::KoKr => format!(
                "{}. {}. {}. {} {}:{:02}:{:02}",
                dt.year(),
                dt.month(),
                dt.day(),
                if pm { "오후" } else { "오전" },
                hour,
                dt.minute(),
                dt.second()
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::KoKr => "ko-KR",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en-us" | "en" => Ok(Locale::EnUs),
            "ko-kr" | "ko" => Ok(Locale::KoKr),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}
