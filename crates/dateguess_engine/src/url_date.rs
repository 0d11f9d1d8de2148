use std::sync::LazyLock;

use chrono::NaiveDate;
use dateguess_core::{Accuracy, Guess};
use guess_logging::guess_trace;
use regex::{Captures, Regex};
use url::Url;

use crate::config::ConfigError;

const MONTH_NAMES: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

static DEFAULT_EXTRACTOR: LazyLock<UrlDateExtractor> = LazyLock::new(UrlDateExtractor::default);

/// A named regex with `year` and `month` groups and an optional `day` group.
///
/// `month` may capture digits or an English month name.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    name: String,
    regex: Regex,
}

impl UrlPattern {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, ConfigError> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|err| ConfigError::InvalidUrlPattern {
            name: name.clone(),
            message: err.to_string(),
        })?;
        let groups: Vec<&str> = regex.capture_names().flatten().collect();
        for required in ["year", "month"] {
            if !groups.contains(&required) {
                return Err(ConfigError::InvalidUrlPattern {
                    name,
                    message: format!("missing named group `{required}`"),
                });
            }
        }
        Ok(Self { name, regex })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Boundary characters belong to the match, so after a rejected match
    /// the search resumes one character in rather than past the match.
    fn find(&self, haystack: &str) -> Option<(NaiveDate, Accuracy, String)> {
        let mut start = 0;
        while let Some(caps) = self.regex.captures_at(haystack, start) {
            let whole = caps.get(0)?;
            if let Some((date, accuracy)) = date_from_captures(&caps) {
                return Some((date, accuracy, whole.as_str().to_string()));
            }
            let step = haystack[whole.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            start = whole.start() + step;
            if start > haystack.len() {
                break;
            }
        }
        None
    }
}

fn date_from_captures(caps: &Captures) -> Option<(NaiveDate, Accuracy)> {
    let year: i32 = caps.name("year")?.as_str().parse().ok()?;
    let month = month_number(caps.name("month")?.as_str())?;
    match caps.name("day") {
        Some(day) => {
            let day: u32 = day.as_str().parse().ok()?;
            Some((NaiveDate::from_ymd_opt(year, month, day)?, Accuracy::Date))
        }
        None => Some((NaiveDate::from_ymd_opt(year, month, 1)?, Accuracy::Partial)),
    }
}

fn month_number(token: &str) -> Option<u32> {
    if let Ok(number) = token.parse::<u32>() {
        return (1..=12).contains(&number).then_some(number);
    }
    const ABBREVIATIONS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let prefix = token.get(..3)?.to_ascii_lowercase();
    ABBREVIATIONS
        .iter()
        .position(|abbr| *abbr == prefix)
        .map(|idx| idx as u32 + 1)
}

/// The built-in URL patterns, strongest first.
pub fn default_url_patterns() -> Vec<UrlPattern> {
    let sep = r"[/_.\-]";
    let year = r"(?P<year>(?:19|20)\d{2})";
    let sources = [
        (
            "year-month-day",
            format!(r"(?:^|\D){year}{sep}(?P<month>\d{{1,2}}){sep}(?P<day>\d{{1,2}})(?:\D|$)"),
        ),
        (
            "year-monthname-day",
            format!(
                r"(?i)(?:^|[^a-z0-9]){year}{sep}(?P<month>{MONTH_NAMES}){sep}(?P<day>\d{{1,2}})(?:\D|$)"
            ),
        ),
        (
            "compact-date",
            format!(r"(?:^|{sep}){year}(?P<month>\d{{2}})(?P<day>\d{{2}})(?:{sep}|$)"),
        ),
        (
            "year-month",
            format!(r"(?:^|\D){year}{sep}(?P<month>\d{{1,2}})(?:\D|$)"),
        ),
        (
            "year-monthname",
            format!(r"(?i)(?:^|[^a-z0-9]){year}{sep}(?P<month>{MONTH_NAMES})(?:[^a-z0-9]|$)"),
        ),
    ];
    sources
        .into_iter()
        .map(|(name, source)| UrlPattern::new(name, &source).expect("valid built-in url pattern"))
        .collect()
}

/// Finds date-shaped segments in the path and query of a URL.
#[derive(Debug, Clone)]
pub struct UrlDateExtractor {
    patterns: Vec<UrlPattern>,
}

impl Default for UrlDateExtractor {
    fn default() -> Self {
        Self::new(default_url_patterns())
    }
}

impl UrlDateExtractor {
    pub fn new(patterns: Vec<UrlPattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[UrlPattern] {
        &self.patterns
    }

    /// Returns the first pattern match as a guess, or [`Guess::none`].
    pub fn extract(&self, url: &str) -> Guess {
        let haystack = searchable_part(url);
        for pattern in &self.patterns {
            if let Some((date, accuracy, matched)) = pattern.find(&haystack) {
                let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
                    continue;
                };
                guess_trace!("url pattern {} matched {:?} in {}", pattern.name, matched, url);
                return Guess::new(midnight.and_utc(), accuracy)
                    .with_method(format!("found {:?} in url ({})", matched.trim(), pattern.name));
            }
        }
        Guess::none()
    }
}

/// Path and query of an absolute URL; the raw text otherwise.
fn searchable_part(url: &str) -> String {
    match Url::parse(url.trim()) {
        Ok(parsed) if parsed.has_host() => match parsed.query() {
            Some(query) => format!("{}?{}", parsed.path(), query),
            None => parsed.path().to_string(),
        },
        _ => url.trim().to_string(),
    }
}

/// Runs the built-in URL patterns against `url`.
pub fn parse_url_for_date(url: &str) -> Guess {
    DEFAULT_EXTRACTOR.extract(url)
}
