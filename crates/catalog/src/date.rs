use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Calendar date carried as `YYYYMMDD` in manifests and archive names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompactDate(NaiveDate);

/// Buckets last modified before this date are flagged as outdated.
pub const DEFAULT_STALENESS_CUTOFF: CompactDate = match NaiveDate::from_ymd_opt(2024, 1, 8) {
    Some(date) => CompactDate(date),
    None => panic!("invalid staleness cutoff"),
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    Format(String),
    /// Well-formed digits that name no calendar day, e.g. `20230229`.
    Invalid(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::Format(raw) => write!(f, "expected YYYYMMDD, got {raw:?}"),
            DateError::Invalid(raw) => write!(f, "no such calendar date: {raw:?}"),
        }
    }
}

impl std::error::Error for DateError {}

impl CompactDate {
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
            .map(CompactDate)
            .ok_or_else(|| DateError::Invalid(format!("{year:04}{month:02}{day:02}")))
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// `YYYYMMDD`.
    pub fn compact(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }

    /// `YYYY-MM-DD`.
    pub fn iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.0.year(), self.0.month(), self.0.day())
    }
}

impl fmt::Display for CompactDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso())
    }
}

impl FromStr for CompactDate {
    type Err = DateError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::Format(raw.to_string()));
        }
        // Fields are split by position; `%Y` alone would also take a wider year.
        let field = |range: std::ops::Range<usize>| {
            raw[range]
                .parse::<u32>()
                .map_err(|_| DateError::Format(raw.to_string()))
        };
        let (year, month, day) = (field(0..4)?, field(4..6)?, field(6..8)?);
        NaiveDate::from_ymd_opt(year as i32, month, day)
            .map(CompactDate)
            .ok_or_else(|| DateError::Invalid(raw.to_string()))
    }
}

impl Serialize for CompactDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.compact())
    }
}

impl<'de> Deserialize<'de> for CompactDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// How current a bucket is relative to the staleness cutoff.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Freshness {
    Fresh,
    Stale,
}

impl Freshness {
    /// A date strictly before `cutoff` is stale.
    pub fn classify(date: CompactDate, cutoff: CompactDate) -> Self {
        if date < cutoff {
            Freshness::Stale
        } else {
            Freshness::Fresh
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::Fresh => "fresh",
            Freshness::Stale => "stale",
        }
    }
}
