use chrono::SecondsFormat;
use dateguess_engine::{Accuracy, Guess};
use serde::{Serialize, Serializer};

/// What the CLI prints for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessReport {
    pub url: String,
    pub date: Option<String>,
    #[serde(serialize_with = "accuracy_name")]
    pub accuracy: Accuracy,
    pub method: Option<String>,
}

impl GuessReport {
    /// Guesses weaker than `min_accuracy` are reported as no date.
    pub fn new(url: &str, guess: &Guess, min_accuracy: Accuracy) -> Self {
        if !guess.is_at_least(min_accuracy) || guess.is_none() {
            return Self {
                url: url.to_string(),
                date: None,
                accuracy: Accuracy::None,
                method: None,
            };
        }
        Self {
            url: url.to_string(),
            date: guess
                .local_timestamp()
                .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
            accuracy: guess.accuracy(),
            method: guess.method().map(str::to_owned),
        }
    }

    /// Tab-separated `date accuracy method` line.
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}",
            self.date.as_deref().unwrap_or("none"),
            self.accuracy,
            self.method.as_deref().unwrap_or("-")
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn accuracy_name<S: Serializer>(accuracy: &Accuracy, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(accuracy.as_str())
}
