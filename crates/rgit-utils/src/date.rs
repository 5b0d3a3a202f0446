use bstr::{BStr, BString, ByteSlice, ByteVec};
use chrono::{DateTime, FixedOffset, Local, TimeZone};

use crate::error::UtilError;
use crate::Result;

/// A commit timestamp with timezone information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GitDate {
    /// Seconds since Unix epoch.
    pub timestamp: i64,
    /// Timezone offset in minutes from UTC (e.g., -300 for EST).
    pub tz_offset: i32,
}

/// Git stores the timezone as a decimal `±HHMM` (e.g. -0500 for EST).
fn tz_offset_to_minutes(tz: i32) -> i32 {
    let sign = if tz < 0 { -1 } else { 1 };
    let abs = tz.unsigned_abs() as i32;
    sign * ((abs / 100) * 60 + abs % 100)
}

/// Convert minutes offset to the git-style decimal representation.
fn minutes_to_tz_offset(minutes: i32) -> i32 {
    let sign = if minutes < 0 { -1 } else { 1 };
    let abs = minutes.unsigned_abs() as i32;
    sign * ((abs / 60) * 100 + abs % 60)
}

impl GitDate {
    /// Create a GitDate from a Unix timestamp and timezone offset in minutes.
    pub fn new(timestamp: i64, tz_offset_minutes: i32) -> Self {
        Self {
            timestamp,
            tz_offset: tz_offset_minutes,
        }
    }

    /// The current time with the local timezone offset.
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            timestamp: now.timestamp(),
            tz_offset: now.offset().local_minus_utc() / 60,
        }
    }

    /// Parse the raw git format: `"<epoch-seconds> ±HHMM"`.
    pub fn parse_raw(input: &str) -> Result<Self> {
        let mut parts = input.split_whitespace();
        let ts_str = parts
            .next()
            .ok_or_else(|| UtilError::DateParse(format!("missing timestamp in '{input}'")))?;
        let tz_str = parts
            .next()
            .ok_or_else(|| UtilError::DateParse(format!("missing timezone in '{input}'")))?;

        let timestamp: i64 = ts_str
            .parse()
            .map_err(|_| UtilError::DateParse(format!("invalid timestamp '{ts_str}'")))?;

        if !tz_str.starts_with('+') && !tz_str.starts_with('-') {
            return Err(UtilError::DateParse(format!(
                "timezone must start with '+' or '-': '{tz_str}'"
            )));
        }
        let tz: i32 = tz_str
            .parse()
            .map_err(|_| UtilError::DateParse(format!("invalid timezone '{tz_str}'")))?;

        Ok(Self {
            timestamp,
            tz_offset: tz_offset_to_minutes(tz),
        })
    }

    /// Render as `"<epoch-seconds> ±HHMM"`.
    pub fn to_raw_string(&self) -> String {
        format!(
            "{} {:+05}",
            self.timestamp,
            minutes_to_tz_offset(self.tz_offset)
        )
    }

    /// Render in git's default log format in the recorded timezone:
    /// `"Sat May 16 19:26:38 2020 -0700"`.
    pub fn format_default(&self) -> String {
        let offset = FixedOffset::east_opt(self.tz_offset * 60)
            .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
        let dt: DateTime<FixedOffset> = match offset.timestamp_opt(self.timestamp, 0) {
            chrono::LocalResult::Single(dt) => dt,
            _ => offset.timestamp_opt(0, 0).unwrap(),
        };
        format!(
            "{} {:+05}",
            dt.format("%a %b %d %H:%M:%S %Y"),
            minutes_to_tz_offset(self.tz_offset)
        )
    }
}

/// An identity plus timestamp: one `author`/`committer` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: BString,
    pub email: BString,
    pub date: GitDate,
}

impl Signature {
    /// Parse from git format: `Name <email> timestamp tz`.
    ///
    /// Fields are split from the right: the last token is the timezone,
    /// the one before it the epoch seconds, before that the `<email>`,
    /// and everything remaining is the name.
    pub fn parse(input: &BStr) -> Result<Self> {
        let input = input.as_bytes();

        let gt_pos = input
            .iter()
            .rposition(|&b| b == b'>')
            .ok_or_else(|| UtilError::SignatureParse("missing '>' in signature".into()))?;
        let lt_pos = input[..gt_pos]
            .iter()
            .rposition(|&b| b == b'<')
            .ok_or_else(|| UtilError::SignatureParse("missing '<' in signature".into()))?;

        let name = input[..lt_pos].trim();
        let email = &input[lt_pos + 1..gt_pos];

        let date_str = input[gt_pos + 1..].trim();
        let date_str = std::str::from_utf8(date_str)
            .map_err(|_| UtilError::SignatureParse("non-UTF-8 date in signature".into()))?;
        let date = GitDate::parse_raw(date_str)?;

        Ok(Self {
            name: BString::from(name),
            email: BString::from(email),
            date,
        })
    }

    /// Format in git's canonical form: `Name <email> timestamp tz`.
    pub fn to_bytes(&self) -> BString {
        let mut out = BString::new(Vec::new());
        out.push_str(&self.name);
        out.push_str(b" <");
        out.push_str(&self.email);
        out.push_str(b"> ");
        out.push_str(self.date.to_raw_string().as_bytes());
        out
    }
}

/// A configured committer identity, threaded into commit synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: BString,
    pub email: BString,
}

impl Identity {
    pub fn new(name: impl Into<BString>, email: impl Into<BString>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Combine with a timestamp into a full signature.
    pub fn at(&self, date: GitDate) -> Signature {
        Signature {
            name: self.name.clone(),
            email: self.email.clone(),
            date,
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new("A U Thor", "author@example.com")
    }
}
