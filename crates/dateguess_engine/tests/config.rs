use chrono::NaiveDate;
use dateguess_engine::{
    Accuracy, ConfigError, DateGuesser, FormatRule, GuesserConfig, TagRule, UrlPatternRule,
};
use pretty_assertions::assert_eq;

#[test]
fn configured_tag_rule_runs_after_builtins() {
    let config = GuesserConfig {
        tag_rules: vec![TagRule::text("byline", "p.byline")],
        ..GuesserConfig::default()
    };
    let guesser = DateGuesser::from_config(&config).unwrap();
    assert_eq!(guesser.tag_extractors().last().unwrap().name(), "byline");

    let html = r#"<body><p class="byline">Posted on January 3rd, 2020</p></body>"#;
    let guess = guesser.guess_date("https://example.com/x", html);
    assert_eq!(guess.accuracy(), Accuracy::Date);
    assert_eq!(guess.date(), NaiveDate::from_ymd_opt(2020, 1, 3));
}

#[test]
fn extra_format_is_consulted() {
    let html = r#"<head><meta name="date" content="03|01|2020"></head>"#;
    assert_eq!(
        DateGuesser::default().guess_date("https://example.com/x", html).accuracy(),
        Accuracy::None
    );

    let config = GuesserConfig {
        extra_formats: vec![FormatRule {
            format: "%d|%m|%Y".into(),
            accuracy: "date".into(),
        }],
        ..GuesserConfig::default()
    };
    let guess = DateGuesser::from_config(&config)
        .unwrap()
        .guess_date("https://example.com/x", html);
    assert_eq!(guess.date(), NaiveDate::from_ymd_opt(2020, 1, 3));
}

#[test]
fn extra_url_pattern_is_consulted() {
    let config = GuesserConfig {
        url_patterns: vec![UrlPatternRule {
            name: "archive id".into(),
            pattern: r"archive-(?P<year>\d{4})q(?P<month>\d{2})".into(),
        }],
        ..GuesserConfig::default()
    };
    let guess = DateGuesser::from_config(&config)
        .unwrap()
        .guess_date("https://example.com/archive-2016q07", "");
    assert_eq!(guess.accuracy(), Accuracy::Partial);
    assert_eq!(guess.date(), NaiveDate::from_ymd_opt(2016, 7, 1));
}

#[test]
fn custom_image_rules_replace_defaults() {
    let config = GuesserConfig {
        image_rules: vec![TagRule::attr("hero", "img.hero", "src")],
        ..GuesserConfig::default()
    };
    let guesser = DateGuesser::from_config(&config).unwrap();
    let html = r#"<head><meta property="og:image" content="/2001/01/01/a.jpg"></head>
        <body><img class="hero" src="/uploads/2018/11/05/hero.jpg"></body>"#;
    let guess = guesser.guess_date("https://example.com/x", html);
    assert_eq!(guess.date(), NaiveDate::from_ymd_opt(2018, 11, 5));
}

#[test]
fn invalid_tables_fail_at_construction() {
    let bad_selector = GuesserConfig {
        tag_rules: vec![TagRule::text("broken", "p[")],
        ..GuesserConfig::default()
    };
    assert!(matches!(
        DateGuesser::from_config(&bad_selector),
        Err(ConfigError::InvalidSelector { .. })
    ));

    let bad_pattern = GuesserConfig {
        url_patterns: vec![UrlPatternRule {
            name: "no groups".into(),
            pattern: r"\d{4}".into(),
        }],
        ..GuesserConfig::default()
    };
    assert!(matches!(
        DateGuesser::from_config(&bad_pattern),
        Err(ConfigError::InvalidUrlPattern { .. })
    ));
}
