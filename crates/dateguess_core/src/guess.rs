use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::Accuracy;

/// A candidate publication date together with its confidence.
///
/// A guess without a timestamp always has [`Accuracy::None`] and every
/// stronger guess carries a timestamp; the constructors are the only way to
/// build one.
///
/// The timestamp keeps the offset it was published with, so [`Guess::date`]
/// is the calendar date as written on the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Guess {
    timestamp: Option<DateTime<FixedOffset>>,
    accuracy: Accuracy,
    method: Option<String>,
}

impl Guess {
    /// The "no confident date available" guess.
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds a guess; `Accuracy::None` discards the timestamp.
    pub fn new(timestamp: impl Into<DateTime<FixedOffset>>, accuracy: Accuracy) -> Self {
        if accuracy == Accuracy::None {
            return Self::none();
        }
        Self {
            timestamp: Some(timestamp.into()),
            accuracy,
            method: None,
        }
    }

    /// Attaches a description of where the date was found.
    ///
    /// Ignored on a guess without a date.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        if self.accuracy != Accuracy::None {
            self.method = Some(method.into());
        }
        self
    }

    /// The instant in UTC.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp.map(|ts| ts.with_timezone(&Utc))
    }

    pub fn local_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.timestamp
    }

    pub fn accuracy(&self) -> Accuracy {
        self.accuracy
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Calendar date in the timestamp's own offset.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date_naive())
    }

    pub fn is_none(&self) -> bool {
        self.accuracy == Accuracy::None
    }

    pub fn is_at_least(&self, threshold: Accuracy) -> bool {
        self.accuracy >= threshold
    }
}
