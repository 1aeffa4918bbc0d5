//! Calendar utilities shared by filtering and aggregation.
//!
//! # Responsibility
//! - Define the inclusive date interval used by expense/task filters.
//! - Provide month navigation with calendar-aware day clamping.
//! - Fix one definition of "today" via [`Clock`].
//!
//! # Invariants
//! - `DateInterval` always satisfies `start <= end`.
//! - Calendar days are evaluated in the clock's UTC offset, for both list
//!   filters and counters.
//! - Lenient parsers return `None` on malformed input; they never fail loudly.

use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})$").expect("valid month regex"));

/// Point in time used to evaluate day-relative predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    now: DateTime<FixedOffset>,
}

impl Clock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    /// Clock pinned to a UTC instant with a zero offset.
    pub fn at_utc(now: DateTime<Utc>) -> Self {
        Self {
            now: now.fixed_offset(),
        }
    }

    /// Current system time viewed in `offset`.
    pub fn system(offset: FixedOffset) -> Self {
        Self {
            now: Utc::now().with_timezone(&offset),
        }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    pub fn now_utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }

    pub fn offset(&self) -> FixedOffset {
        *self.now.offset()
    }

    /// Current calendar day in the clock's offset.
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Calendar day of `instant` in the clock's offset.
    pub fn local_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset()).date_naive()
    }

    /// Month containing today.
    pub fn current_month(&self) -> MonthCursor {
        MonthCursor::containing(self.today())
    }
}

/// Closed calendar interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    /// Returns `None` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Single-day interval.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Whole calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        MonthCursor::containing(date).interval()
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive at both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Display for DateInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Month navigation state for month-scoped views.
///
/// The cursor keeps an anchor day; shifting uses chrono's month arithmetic,
/// which clamps the day to the target month's last day (Jan 31 + 1 month =
/// Feb 28/29).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthCursor {
    anchor: NaiveDate,
}

impl MonthCursor {
    pub fn containing(date: NaiveDate) -> Self {
        Self { anchor: date }
    }

    /// Cursor at the first day of `year`/`month`; `None` for invalid months.
    pub fn from_year_month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::containing)
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn year(&self) -> i32 {
        self.anchor.year()
    }

    pub fn month(&self) -> u32 {
        self.anchor.month()
    }

    /// Moves by `months` whole months (negative moves backwards).
    ///
    /// Shifts past chrono's representable range leave the cursor unchanged.
    pub fn shift(&self, months: i32) -> Self {
        let magnitude = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.anchor.checked_add_months(magnitude)
        } else {
            self.anchor.checked_sub_months(magnitude)
        };
        shifted.map_or(*self, Self::containing)
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn previous(&self) -> Self {
        self.shift(-1)
    }

    /// First through last day of the cursor's month.
    pub fn interval(&self) -> DateInterval {
        let start = self.anchor.with_day(1).unwrap_or(self.anchor);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        DateInterval { start, end }
    }

    /// Human label such as `January 2024`.
    pub fn label(&self) -> String {
        self.anchor.format("%B %Y").to_string()
    }
}

/// Parses `YYYY-MM` into a month cursor.
pub fn parse_month(text: &str) -> Option<MonthCursor> {
    let caps = MONTH_RE.captures(text.trim())?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    MonthCursor::from_year_month(year, month)
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar date.
pub fn parse_date_lenient(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|value| value.date_naive())
        })
}

/// Parses an RFC 3339 timestamp, or a bare date interpreted as local
/// midnight in `offset`.
pub fn parse_instant_lenient(text: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(value.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    date.and_time(NaiveTime::MIN)
        .and_local_timezone(offset)
        .single()
        .map(|value| value.with_timezone(&Utc))
}
