use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    /// Parses the `owner/repo` form.
    pub fn parse(value: &str) -> AppResult<Self> {
        let mut parts = value.trim().split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(AppError::InvalidArguments(format!(
                "repository must be in owner/repo format, got '{value}'"
            ))),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A half-open UTC day: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    pub fn for_date(date: NaiveDate) -> Self {
        let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
        Self {
            date,
            start,
            end: start + Duration::days(1),
        }
    }

    /// Uses the given `YYYY-MM-DD` date, or today (UTC) when absent.
    pub fn resolve(date: Option<&str>) -> AppResult<Self> {
        let date = match date.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|err| {
                AppError::InvalidArguments(format!("date must be YYYY-MM-DD, got '{value}': {err}"))
            })?,
            None => Utc::now().date_naive(),
        };
        Ok(Self::for_date(date))
    }

    /// The last instant inside the window, for sources with an inclusive upper bound.
    pub fn inclusive_end(&self) -> DateTime<Utc> {
        self.end - Duration::seconds(1)
    }

    pub fn label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
