use dateguess_core::{judge, Guess, Verdict};
use guess_logging::guess_debug;
use scraper::Html;

use crate::config::{ConfigError, GuesserConfig};
use crate::parser::{default_formats, MultiFormatParser};
use crate::tags::{
    build_tag_extractors, default_image_rules, default_tag_rules, ImageUrlExtractor, TagExtractor,
};
use crate::url_date::{default_url_patterns, UrlDateExtractor};

/// Guesses the publication date of a page from its URL and markup.
///
/// Holds immutable extractor tables; one guesser can serve any number of
/// concurrent calls.
#[derive(Debug)]
pub struct DateGuesser {
    url_extractor: UrlDateExtractor,
    tag_extractors: Vec<TagExtractor>,
    image_extractor: ImageUrlExtractor,
    parser: MultiFormatParser,
}

impl Default for DateGuesser {
    fn default() -> Self {
        Self::from_config(&GuesserConfig::default()).expect("built-in extractor tables are valid")
    }
}

impl DateGuesser {
    pub fn new(
        url_extractor: UrlDateExtractor,
        tag_extractors: Vec<TagExtractor>,
        image_extractor: ImageUrlExtractor,
        parser: MultiFormatParser,
    ) -> Self {
        Self {
            url_extractor,
            tag_extractors,
            image_extractor,
            parser,
        }
    }

    /// Builds the built-in tables extended by `config`.
    pub fn from_config(config: &GuesserConfig) -> Result<Self, ConfigError> {
        let mut tag_rules = if config.replace_default_tags {
            Vec::new()
        } else {
            default_tag_rules()
        };
        tag_rules.extend(config.tag_rules.iter().cloned());

        let image_rules = if config.image_rules.is_empty() {
            default_image_rules()
        } else {
            config.image_rules.clone()
        };

        let mut formats = default_formats();
        for rule in &config.extra_formats {
            formats.push(rule.to_date_format()?);
        }

        let mut patterns = default_url_patterns();
        for rule in &config.url_patterns {
            patterns.push(rule.to_pattern()?);
        }

        Ok(Self::new(
            UrlDateExtractor::new(patterns),
            build_tag_extractors(&tag_rules)?,
            ImageUrlExtractor::from_rules(&image_rules)?,
            MultiFormatParser::new(formats),
        ))
    }

    pub fn tag_extractors(&self) -> &[TagExtractor] {
        &self.tag_extractors
    }

    /// Parses `html` and guesses its publication date.
    pub fn guess_date(&self, url: &str, html: &str) -> Guess {
        let doc = Html::parse_document(html);
        self.guess_date_in_document(url, &doc)
    }

    /// Evaluates every extractor, in order, against an already parsed page.
    pub fn guess_date_in_document(&self, url: &str, doc: &Html) -> Guess {
        let mut best = Guess::none();

        best = fold_step(best, self.url_extractor.extract(url), "url");

        for extractor in &self.tag_extractors {
            let raw = extractor.extract(doc);
            let candidate = self.parser.parse(raw.as_deref());
            let candidate = match raw {
                Some(raw) => candidate.with_method(format!(
                    "found {:?} in {} tag",
                    raw,
                    extractor.name()
                )),
                None => candidate,
            };
            best = fold_step(best, candidate, extractor.name());
        }

        if let Some((image_url, rule)) = self.image_extractor.extract(doc) {
            let candidate = self.url_extractor.extract(&image_url);
            let candidate = match candidate.method().map(str::to_owned) {
                Some(method) => candidate.with_method(format!("{method} of {rule} image")),
                None => candidate,
            };
            best = fold_step(best, candidate, rule);
        }

        guess_debug!(
            "guess for {}: {} {:?}",
            url,
            best.accuracy(),
            best.local_timestamp()
        );
        best
    }
}

fn fold_step(best: Guess, candidate: Guess, source: &str) -> Guess {
    if candidate.is_none() {
        return best;
    }
    match judge(&best, &candidate) {
        Verdict::Accepted => {
            guess_debug!(
                "{}: accepted {} {:?}",
                source,
                candidate.accuracy(),
                candidate.local_timestamp()
            );
            candidate
        }
        Verdict::NotStronger => {
            guess_debug!(
                "{}: kept {} over {} candidate",
                source,
                best.accuracy(),
                candidate.accuracy()
            );
            best
        }
        Verdict::OutsidePlausibilityWindow { days, window } => {
            guess_debug!(
                "{}: rejected {:?}, {} days from current guess (window {})",
                source,
                candidate.local_timestamp(),
                days,
                window
            );
            best
        }
    }
}
