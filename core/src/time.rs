use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub const MONTHS_SHORT: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

pub const MONTHS_LABELS: [&str; 12] = [
    "JANEIRO", "FEVEREIRO", "MARÇO", "ABRIL", "MAIO", "JUNHO",
    "JULHO", "AGOSTO", "SETEMBRO", "OUTUBRO", "NOVEMBRO", "DEZEMBRO",
];

/// A calendar month, stored as "YYYY-MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Month out of range: {}", month));
        }
        if !(0..=9999).contains(&year) {
            return Err(anyhow!("Year out of range: {}", year));
        }
        Ok(Self { year, month })
    }

    /// January of `year`. Used for the seed report.
    pub fn first_of(year: i32) -> Self {
        Self { year, month: 1 }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn short_label(&self) -> &'static str {
        MONTHS_SHORT[self.month as usize - 1]
    }

    pub fn long_label(&self) -> &'static str {
        MONTHS_LABELS[self.month as usize - 1]
    }

    /// The twelve months of `year`, January first.
    pub fn months_of(year: i32) -> impl Iterator<Item = YearMonth> {
        (1..=12).map(move |month| YearMonth { year, month })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let input = input.trim();
        // Reuse chrono's validation by anchoring the month on its first day.
        let date = NaiveDate::parse_from_str(&format!("{}-01", input), "%Y-%m-%d")
            .map_err(|_| anyhow!("Could not parse month '{}', expected YYYY-MM", input))?;
        if input.len() != 7 {
            return Err(anyhow!("Could not parse month '{}', expected YYYY-MM", input));
        }
        YearMonth::new(date.year(), date.month())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

pub fn current_year() -> i32 {
    Local::now().year()
}

pub fn parse_year(input: &str) -> Result<i32> {
    let input = input.trim();
    if input.len() != 4 {
        return Err(anyhow!("Year must have four digits: {}", input));
    }
    input.parse().map_err(|_| anyhow!("Invalid year: {}", input))
}
