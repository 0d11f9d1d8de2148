use std::fmt;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

type FindFn = Box<dyn Fn(&Html) -> Option<String> + Send + Sync>;

/// Where to look for a candidate string: a CSS selector and the attribute to
/// read, or the element text when `attribute` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRule {
    pub name: String,
    pub selector: String,
    #[serde(default)]
    pub attribute: Option<String>,
}

impl TagRule {
    pub fn attr(name: &str, selector: &str, attribute: &str) -> Self {
        Self {
            name: name.to_string(),
            selector: selector.to_string(),
            attribute: Some(attribute.to_string()),
        }
    }

    pub fn text(name: &str, selector: &str) -> Self {
        Self {
            name: name.to_string(),
            selector: selector.to_string(),
            attribute: None,
        }
    }
}

/// Locates one raw date-like string in a document. Never parses dates.
pub struct TagExtractor {
    name: String,
    find: FindFn,
}

impl fmt::Debug for TagExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagExtractor")
            .field("name", &self.name)
            .field("find", &"<function>")
            .finish()
    }
}

impl TagExtractor {
    pub fn new<F>(name: impl Into<String>, find: F) -> Self
    where
        F: Fn(&Html) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            find: Box::new(find),
        }
    }

    pub fn from_rule(rule: &TagRule) -> Result<Self, ConfigError> {
        let selector =
            Selector::parse(&rule.selector).map_err(|err| ConfigError::InvalidSelector {
                name: rule.name.clone(),
                selector: rule.selector.clone(),
                message: err.to_string(),
            })?;
        let attribute = rule.attribute.clone();
        Ok(Self::new(rule.name.clone(), move |doc: &Html| {
            doc.select(&selector)
                .find_map(|element| element_value(element, attribute.as_deref()))
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extract(&self, doc: &Html) -> Option<String> {
        (self.find)(doc)
    }
}

fn element_value(element: ElementRef, attribute: Option<&str>) -> Option<String> {
    let value = match attribute {
        Some(attr) => element.value().attr(attr)?.trim().to_string(),
        None => element.text().collect::<String>(),
    };
    let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
    (!value.is_empty()).then_some(value)
}

/// Built-in tag rules in priority order.
pub fn default_tag_rules() -> Vec<TagRule> {
    vec![
        TagRule::attr(
            "article:published_time",
            r#"meta[property="article:published_time"], meta[name="article:published_time"]"#,
            "content",
        ),
        TagRule::attr(
            "itemprop datePublished",
            r#"meta[itemprop="datePublished"]"#,
            "content",
        ),
        TagRule::attr(
            "itemprop datePublished datetime",
            r#"[itemprop="datePublished"][datetime]"#,
            "datetime",
        ),
        TagRule::attr(
            "og:published_time",
            r#"meta[property="og:published_time"]"#,
            "content",
        ),
        TagRule::attr(
            "pubdate meta",
            r#"meta[name="pubdate"], meta[name="publishdate"], meta[name="publish-date"], meta[name="publish_date"], meta[name="PublishDate"]"#,
            "content",
        ),
        TagRule::attr(
            "dublin core issued",
            r#"meta[name="DC.date.issued"], meta[name="dc.date.issued"], meta[name="dcterms.issued"], meta[name="DC.date"], meta[name="dcterms.created"]"#,
            "content",
        ),
        TagRule::attr("sailthru.date", r#"meta[name="sailthru.date"]"#, "content"),
        TagRule::attr(
            "parsely-pub-date",
            r#"meta[name="parsely-pub-date"]"#,
            "content",
        ),
        TagRule::attr(
            "rnews:datePublished",
            r#"meta[property="rnews:datePublished"]"#,
            "content",
        ),
        TagRule::attr(
            "OriginalPublicationDate",
            r#"meta[name="OriginalPublicationDate"]"#,
            "content",
        ),
        TagRule::attr("date meta", r#"meta[name="date"]"#, "content"),
        TagRule::attr("time pubdate", "time[pubdate]", "datetime"),
        TagRule::attr("time datetime", "time[datetime]", "datetime"),
        TagRule::attr("abbr published", "abbr.published", "title"),
        TagRule::text(
            "itemprop datePublished text",
            r#"[itemprop="datePublished"]"#,
        ),
    ]
}

/// Built-in social preview image rules in priority order.
pub fn default_image_rules() -> Vec<TagRule> {
    vec![
        TagRule::attr("og:image", r#"meta[property="og:image"]"#, "content"),
        TagRule::attr(
            "twitter:image",
            r#"meta[name="twitter:image"], meta[property="twitter:image"]"#,
            "content",
        ),
    ]
}

pub fn build_tag_extractors(rules: &[TagRule]) -> Result<Vec<TagExtractor>, ConfigError> {
    rules.iter().map(TagExtractor::from_rule).collect()
}

/// Finds the URL of the page's social preview image.
#[derive(Debug)]
pub struct ImageUrlExtractor {
    rules: Vec<TagExtractor>,
}

impl ImageUrlExtractor {
    pub fn new(rules: Vec<TagExtractor>) -> Self {
        Self { rules }
    }

    pub fn from_rules(rules: &[TagRule]) -> Result<Self, ConfigError> {
        build_tag_extractors(rules).map(Self::new)
    }

    /// First non-empty image URL, with the name of the rule that found it.
    pub fn extract(&self, doc: &Html) -> Option<(String, &str)> {
        self.rules
            .iter()
            .find_map(|rule| rule.extract(doc).map(|url| (url, rule.name())))
    }
}
