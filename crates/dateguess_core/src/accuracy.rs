use std::fmt;
use std::str::FromStr;

/// Confidence of a date guess, ordered from weakest to strongest.
///
/// The derived ordering is the ranking used by the arbiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Accuracy {
    /// No usable signal.
    #[default]
    None,
    /// Year and month resolved, day unknown.
    Partial,
    /// Full calendar date without time-of-day confidence.
    Date,
    /// Fully resolved date and time.
    DateTime,
}

impl Accuracy {
    pub const ALL: [Accuracy; 4] = [
        Accuracy::None,
        Accuracy::Partial,
        Accuracy::Date,
        Accuracy::DateTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Accuracy::None => "none",
            Accuracy::Partial => "partial",
            Accuracy::Date => "date",
            Accuracy::DateTime => "datetime",
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAccuracy(pub String);

impl fmt::Display for UnknownAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown accuracy {:?} (expected none, partial, date or datetime)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAccuracy {}

impl FromStr for Accuracy {
    type Err = UnknownAccuracy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Accuracy::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownAccuracy(s.to_string()))
    }
}
