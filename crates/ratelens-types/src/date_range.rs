//! Date range and request window validation.

use chrono::NaiveDate;

use crate::DateRangeError;

/// Earliest date served by the upstream rate source.
pub const EARLIEST_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1999, 1, 4) {
    Some(date) => date,
    None => panic!("invalid earliest date"),
};

/// Date format used on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A range of dates for data retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range for an analysis request.
    ///
    /// The start must lie strictly before the end, the end must not be after
    /// `today`, and the start must not precede [`EARLIEST_DATE`].
    ///
    /// # Errors
    ///
    /// Returns the first violated condition.
    pub fn for_request(
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, DateRangeError> {
        if start >= end {
            return Err(DateRangeError::NotIncreasing { start, end });
        }
        if end > today {
            return Err(DateRangeError::EndInFuture { end });
        }
        if start < EARLIEST_DATE {
            return Err(DateRangeError::BeforeEarliest {
                start,
                earliest: EARLIEST_DATE,
            });
        }
        Ok(Self { start, end })
    }

    /// Parses a `YYYY-MM-DD` pair into a request range.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed dates or any [`Self::for_request`] violation.
    pub fn parse_request(start: &str, end: &str, today: NaiveDate) -> Result<Self, DateRangeError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Self::for_request(start, end, today)
    }

    /// Returns true if the range contains the given date.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`DateRangeError::InvalidFormat`] when the token does not parse.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateRangeError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| DateRangeError::InvalidFormat(s.to_string()))
}
