//! Date guesser engine: extractors, the date string parser and the arbiter.
mod config;
mod decode;
mod guesser;
mod parser;
mod tags;
mod url_date;

pub use config::{ConfigError, FormatRule, GuesserConfig, UrlPatternRule};
pub use dateguess_core::{Accuracy, Guess};
pub use decode::{decode_html, DecodedHtml};
pub use guesser::DateGuesser;
pub use parser::{default_formats, normalize, DateFormat, FormatKind, MultiFormatParser};
pub use tags::{
    build_tag_extractors, default_image_rules, default_tag_rules, ImageUrlExtractor,
    TagExtractor, TagRule,
};
pub use url_date::{default_url_patterns, parse_url_for_date, UrlDateExtractor, UrlPattern};
