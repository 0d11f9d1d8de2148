use std::sync::LazyLock;

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use dateguess_core::{Accuracy, Guess};
use guess_logging::guess_trace;
use regex::Regex;

/// Dates outside this range of years are treated as parse accidents.
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

static LEADING_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:first\s+|originally\s+)?published|updated|last\s+updated|last\s+modified|posted|created|date)\b\s*(?:on|at)?\s*[:\-|]?\s*",
    )
    .expect("valid label regex")
});
static ORDINAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("valid ordinal regex"));
static SEPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsept\b").expect("valid month regex"));
static TRAILING_ZULU: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)Z$").expect("valid zulu regex"));

/// How a [`DateFormat`] pattern is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Rfc3339,
    Rfc2822,
    /// Date-time with an explicit offset, which is kept.
    Zoned,
    /// Date-time without offset, read as UTC.
    NaiveDateTime,
    /// Ten-digit Unix timestamp in seconds.
    UnixSeconds,
    Date,
    /// Year and month; the day is set to the first.
    YearMonth,
}

impl FormatKind {
    pub fn accuracy(self) -> Accuracy {
        match self {
            FormatKind::Rfc3339
            | FormatKind::Rfc2822
            | FormatKind::Zoned
            | FormatKind::NaiveDateTime
            | FormatKind::UnixSeconds => Accuracy::DateTime,
            FormatKind::Date => Accuracy::Date,
            FormatKind::YearMonth => Accuracy::Partial,
        }
    }
}

/// One entry of the parser's format table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pub pattern: String,
    pub kind: FormatKind,
}

impl DateFormat {
    pub fn new(pattern: impl Into<String>, kind: FormatKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
        }
    }

    /// Infers the kind from the accuracy a configured pattern should yield.
    ///
    /// Returns `None` for [`Accuracy::None`], which no format can produce.
    pub fn for_accuracy(pattern: impl Into<String>, accuracy: Accuracy) -> Option<Self> {
        let pattern = pattern.into();
        let kind = match accuracy {
            Accuracy::None => return None,
            Accuracy::Partial => FormatKind::YearMonth,
            Accuracy::Date => FormatKind::Date,
            Accuracy::DateTime if has_offset(&pattern) => FormatKind::Zoned,
            Accuracy::DateTime => FormatKind::NaiveDateTime,
        };
        Some(Self { pattern, kind })
    }

    pub fn accuracy(&self) -> Accuracy {
        self.kind.accuracy()
    }

    fn apply(&self, text: &str) -> Option<DateTime<FixedOffset>> {
        let pattern = self.pattern.as_str();
        match self.kind {
            FormatKind::Rfc3339 => DateTime::parse_from_rfc3339(text).ok(),
            FormatKind::Rfc2822 => DateTime::parse_from_rfc2822(text).ok(),
            FormatKind::Zoned => {
                let (dt, rest) = DateTime::parse_and_remainder(text, pattern).ok()?;
                accept_remainder(rest).then_some(dt)
            }
            FormatKind::NaiveDateTime => {
                let (dt, rest) = NaiveDateTime::parse_and_remainder(text, pattern).ok()?;
                accept_remainder(rest).then(|| dt.and_utc().fixed_offset())
            }
            FormatKind::UnixSeconds => {
                if text.len() != 10
                    || !text.bytes().all(|b| b.is_ascii_digit())
                    || starts_with_compact_date(text)
                {
                    return None;
                }
                DateTime::from_timestamp(text.parse().ok()?, 0).map(|dt| dt.fixed_offset())
            }
            FormatKind::Date => {
                let (date, rest) = NaiveDate::parse_and_remainder(text, pattern).ok()?;
                accept_remainder(rest).then(|| midnight(date))?
            }
            FormatKind::YearMonth => {
                let mut parsed = Parsed::new();
                let rest =
                    format::parse_and_remainder(&mut parsed, text, StrftimeItems::new(pattern))
                        .ok()?;
                if !accept_remainder(rest) {
                    return None;
                }
                parsed.set_day(1).ok()?;
                midnight(parsed.to_naive_date().ok()?)
            }
        }
    }
}

fn has_offset(pattern: &str) -> bool {
    ["%z", "%:z", "%::z", "%#z", "%Z"]
        .iter()
        .any(|spec| pattern.contains(spec))
}

fn midnight(date: NaiveDate) -> Option<DateTime<FixedOffset>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().fixed_offset())
}

/// `YYYYMMDD…` digit runs are dates with a suffix, not epoch seconds.
fn starts_with_compact_date(digits: &str) -> bool {
    digits
        .get(..8)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y%m%d").ok())
        .is_some_and(|date| (MIN_YEAR..=MAX_YEAR).contains(&date.year()))
}

/// Trailing text is tolerated unless it continues the matched token.
fn accept_remainder(rest: &str) -> bool {
    rest.chars().next().is_none_or(|c| !c.is_alphanumeric())
}

/// The built-in format table, most specific first.
pub fn default_formats() -> Vec<DateFormat> {
    use FormatKind::*;

    let mut formats = vec![
        DateFormat::new("rfc3339", Rfc3339),
        DateFormat::new("rfc2822", Rfc2822),
    ];
    let table: &[(&str, FormatKind)] = &[
        ("%Y-%m-%dT%H:%M:%S%.f%z", Zoned),
        ("%Y-%m-%d %H:%M:%S%.f%z", Zoned),
        ("%Y-%m-%dT%H:%M%z", Zoned),
        ("%Y%m%dT%H%M%S%z", Zoned),
        ("%a, %d %b %Y %H:%M:%S %z", Zoned),
        ("%Y-%m-%dT%H:%M:%S%.f", NaiveDateTime),
        ("%Y-%m-%d %H:%M:%S%.f", NaiveDateTime),
        ("%Y-%m-%dT%H:%M", NaiveDateTime),
        ("%Y-%m-%d %H:%M", NaiveDateTime),
        ("%Y/%m/%d %H:%M:%S", NaiveDateTime),
        ("%B %d, %Y %I:%M %p", NaiveDateTime),
        ("%B %d, %Y %H:%M", NaiveDateTime),
        ("%d %B %Y %H:%M", NaiveDateTime),
        ("unix", UnixSeconds),
        ("%Y-%m-%d", Date),
        ("%Y/%m/%d", Date),
        ("%Y.%m.%d", Date),
        ("%Y%m%d", Date),
        ("%A, %B %d, %Y", Date),
        ("%a, %d %b %Y", Date),
        ("%B %d, %Y", Date),
        ("%B %d %Y", Date),
        ("%d %B %Y", Date),
        ("%d %B, %Y", Date),
        ("%m/%d/%Y", Date),
        ("%d.%m.%Y", Date),
        ("%Y-%m", YearMonth),
        ("%Y/%m", YearMonth),
        ("%B %Y", YearMonth),
        ("%B, %Y", YearMonth),
    ];
    formats.extend(
        table
            .iter()
            .map(|(pattern, kind)| DateFormat::new(*pattern, *kind)),
    );
    formats
}

/// Parses free-text date strings by trying every configured format in order.
#[derive(Debug, Clone)]
pub struct MultiFormatParser {
    formats: Vec<DateFormat>,
}

impl Default for MultiFormatParser {
    fn default() -> Self {
        Self::new(default_formats())
    }
}

impl MultiFormatParser {
    pub fn new(formats: Vec<DateFormat>) -> Self {
        Self { formats }
    }

    pub fn formats(&self) -> &[DateFormat] {
        &self.formats
    }

    /// Returns the first format match as a guess, or [`Guess::none`].
    pub fn parse(&self, text: Option<&str>) -> Guess {
        let Some(raw) = text else {
            return Guess::none();
        };
        let cleaned = normalize(raw);
        if cleaned.is_empty() {
            return Guess::none();
        }

        for format in &self.formats {
            let Some(ts) = format.apply(&cleaned) else {
                continue;
            };
            if !(MIN_YEAR..=MAX_YEAR).contains(&ts.year()) {
                guess_trace!("format {} gave implausible year for {:?}", format.pattern, raw);
                continue;
            }
            return Guess::new(ts, format.accuracy());
        }
        guess_trace!("no date format matched {:?}", raw);
        Guess::none()
    }
}

/// Strips labels and noise that commonly surround dates in page markup.
pub fn normalize(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let unlabelled = LEADING_LABEL.replace(&collapsed, "");
    let no_ordinals = ORDINAL_SUFFIX.replace_all(&unlabelled, "$1");
    let months = SEPT.replace_all(&no_ordinals, "Sep");
    TRAILING_ZULU.replace(&months, "${1}+00:00").trim().to_string()
}
