use dateguess_core::{Accuracy, UnknownAccuracy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::DateFormat;
use crate::tags::TagRule;
use crate::url_date::UrlPattern;

/// Setup-time failure while building extractor tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tag rule {name:?}: invalid selector {selector:?}: {message}")]
    InvalidSelector {
        name: String,
        selector: String,
        message: String,
    },
    #[error("url pattern {name:?}: {message}")]
    InvalidUrlPattern { name: String, message: String },
    #[error("date format {format:?}: {source}")]
    UnknownAccuracy {
        format: String,
        #[source]
        source: UnknownAccuracy,
    },
    #[error("date format {format:?} cannot yield accuracy none")]
    UnusableAccuracy { format: String },
    #[error("date format must not be empty")]
    EmptyFormat,
}

/// A user-supplied date format and the accuracy it yields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRule {
    pub format: String,
    pub accuracy: String,
}

impl FormatRule {
    pub fn to_date_format(&self) -> Result<DateFormat, ConfigError> {
        if self.format.trim().is_empty() {
            return Err(ConfigError::EmptyFormat);
        }
        let accuracy: Accuracy =
            self.accuracy
                .parse()
                .map_err(|source| ConfigError::UnknownAccuracy {
                    format: self.format.clone(),
                    source,
                })?;
        DateFormat::for_accuracy(self.format.clone(), accuracy).ok_or_else(|| {
            ConfigError::UnusableAccuracy {
                format: self.format.clone(),
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPatternRule {
    pub name: String,
    pub pattern: String,
}

impl UrlPatternRule {
    pub fn to_pattern(&self) -> Result<UrlPattern, ConfigError> {
        UrlPattern::new(self.name.clone(), &self.pattern)
    }
}

/// Extractor tables layered on top of the built-in defaults.
///
/// Extra tag rules, formats and URL patterns run after the built-in ones, so
/// built-ins keep priority on accuracy ties. `replace_default_tags` drops the
/// built-in tag list entirely; non-empty `image_rules` replace the built-in
/// image rules.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuesserConfig {
    pub tag_rules: Vec<TagRule>,
    pub replace_default_tags: bool,
    pub image_rules: Vec<TagRule>,
    pub extra_formats: Vec<FormatRule>,
    pub url_patterns: Vec<UrlPatternRule>,
}
