use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
    Utc,
};
use chrono_tz::Tz;
use vitals_types::{DateRange, VitalsError};

/// Calendar used to cut time into local days.
///
/// Parsed from an IANA zone name (`Europe/Berlin`), `UTC`/`Z`, or a fixed
/// offset such as `+05:30` or `UTC-08:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarConfig {
    /// A named timezone with DST rules.
    Zone(Tz),
    /// A constant UTC offset.
    Fixed(FixedOffset),
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for CalendarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zone(tz) => f.write_str(tz.name()),
            Self::Fixed(off) => write!(f, "{off}"),
        }
    }
}

impl FromStr for CalendarConfig {
    type Err = VitalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Probe step when local midnight falls into a DST gap.
const GAP_PROBE: TimeDelta = TimeDelta::minutes(15);
const GAP_PROBE_LIMIT: i32 = 4 * 4;

impl CalendarConfig {
    /// The UTC calendar.
    #[must_use]
    pub const fn utc() -> Self {
        Self::Zone(Tz::UTC)
    }

    /// Parse a calendar identifier.
    ///
    /// # Errors
    /// Returns `InvalidCalendarConfig` when the identifier is neither a known
    /// IANA zone nor a well-formed offset.
    pub fn parse(id: &str) -> Result<Self, VitalsError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(VitalsError::InvalidCalendarConfig(
                "empty calendar identifier".into(),
            ));
        }
        if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }
        if let Ok(tz) = trimmed.parse::<Tz>() {
            return Ok(Self::Zone(tz));
        }
        parse_offset(trimmed).map(Self::Fixed).ok_or_else(|| {
            VitalsError::InvalidCalendarConfig(format!("unknown timezone or offset '{id}'"))
        })
    }

    /// Local calendar date containing `ts`.
    #[must_use]
    pub fn date_of(&self, ts: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Zone(tz) => ts.with_timezone(tz).date_naive(),
            Self::Fixed(off) => ts.with_timezone(off).date_naive(),
        }
    }

    /// First instant of `date` in UTC.
    ///
    /// An ambiguous midnight resolves to the earlier instant; a midnight
    /// skipped by a DST transition rolls forward to the first valid local time.
    #[must_use]
    pub fn day_start(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        match self {
            Self::Zone(tz) => first_valid_instant(tz, midnight),
            Self::Fixed(off) => first_valid_instant(off, midnight),
        }
    }

    /// `[start, end)` of `date` in UTC. Not always 24h long.
    #[must_use]
    pub fn day_bounds(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.day_start(date);
        let end = date
            .succ_opt()
            .map_or(start + TimeDelta::days(1), |next| self.day_start(next));
        (start, end)
    }

    /// UTC window covering every day of `range`.
    #[must_use]
    pub fn range_bounds(&self, range: &DateRange) -> (DateTime<Utc>, DateTime<Utc>) {
        let (start, _) = self.day_bounds(range.start());
        let (_, end) = self.day_bounds(range.end());
        (start, end)
    }
}

fn first_valid_instant<T: TimeZone>(tz: &T, local: NaiveDateTime) -> DateTime<Utc> {
    let mut probe = local;
    for _ in 0..=GAP_PROBE_LIMIT {
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                return dt.with_timezone(&Utc);
            }
            LocalResult::None => probe += GAP_PROBE,
        }
    }
    // No zone skips four hours; treat the wall clock as UTC as a last resort.
    local.and_utc()
}

// `+05:30`, `-0800`, `+09`, optionally prefixed by `UTC` or `GMT`.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let upper = s.to_ascii_uppercase();
    let rest = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper);
    let (sign, digits) = match rest.as_bytes().first()? {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };
    let (hh, mm) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None if digits.len() == 4 => digits.split_at(2),
        None => (digits, "0"),
    };
    if hh.is_empty() || hh.len() > 2 || mm.is_empty() || mm.len() > 2 {
        return None;
    }
    let hours: i32 = hh.parse().ok()?;
    let minutes: i32 = mm.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
