use std::sync::Once;

use chrono::{NaiveDate, TimeZone, Utc};
use dateguess_engine::{
    Accuracy, DateGuesser, Guess, ImageUrlExtractor, MultiFormatParser, TagExtractor,
    UrlDateExtractor,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(guess_logging::initialize_for_tests);
}

fn page(head: &str) -> String {
    format!("<html><head>{head}</head><body><p>story</p></body></html>")
}

fn fixed(name: &'static str, value: &'static str) -> TagExtractor {
    TagExtractor::new(name, move |_| Some(value.to_string()))
}

fn injected(tags: Vec<TagExtractor>) -> DateGuesser {
    DateGuesser::new(
        UrlDateExtractor::default(),
        tags,
        ImageUrlExtractor::new(Vec::new()),
        MultiFormatParser::default(),
    )
}

#[test]
fn dated_url_without_tags_gives_date() {
    init_logging();
    let guess = DateGuesser::default().guess_date("https://example.com/2019/01/15/story", &page(""));
    assert_eq!(guess.accuracy(), Accuracy::Date);
    assert_eq!(guess.date(), NaiveDate::from_ymd_opt(2019, 1, 15));
}

#[test]
fn iso_tag_gives_full_datetime() {
    init_logging();
    let html = page(r#"<meta property="article:published_time" content="2019-01-01T12:00:00Z">"#);
    let guess = DateGuesser::default().guess_date("https://example.com/about/story", &html);
    assert_eq!(guess.accuracy(), Accuracy::DateTime);
    assert_eq!(
        guess.timestamp(),
        Some(Utc.with_ymd_and_hms(2019, 1, 1, 12, 0, 0).unwrap())
    );
    assert!(guess.method().unwrap().contains("article:published_time"));
}

#[test]
fn distant_tag_date_does_not_override_partial_url() {
    init_logging();
    let html = page(r#"<meta property="article:published_time" content="2019-03-01">"#);
    let guess = DateGuesser::default().guess_date("https://example.com/2019/01/story", &html);
    assert_eq!(guess.accuracy(), Accuracy::Partial);
    assert_eq!(guess.date(), NaiveDate::from_ymd_opt(2019, 1, 1));
    assert!(guess.method().unwrap().contains("url"));
}

#[test]
fn nearby_tag_date_refines_partial_url() {
    init_logging();
    let html = page(r#"<meta property="article:published_time" content="2019-01-20T10:00:00Z">"#);
    let guess = DateGuesser::default().guess_date("https://example.com/2019/01/story", &html);
    assert_eq!(guess.accuracy(), Accuracy::DateTime);
    assert_eq!(guess.date(), NaiveDate::from_ymd_opt(2019, 1, 20));
}

#[test]
fn image_url_is_used_as_fallback() {
    init_logging();
    let html = page(r#"<meta property="og:image" content="https://cdn.example.com/2019/01/15/thumb.jpg">"#);
    let guess = DateGuesser::default().guess_date("https://example.com/story/abc", &html);
    assert_eq!(guess.accuracy(), Accuracy::Date);
    assert_eq!(guess.date(), NaiveDate::from_ymd_opt(2019, 1, 15));
    assert!(guess.method().unwrap().contains("og:image"));
}

#[test]
fn later_tag_with_time_refines_earlier_date() {
    init_logging();
    let html = page(
        r#"<meta name="pubdate" content="2019-01-15">
        <time datetime="2019-01-15T09:30:00-05:00">Jan 15</time>"#,
    );
    let guess = DateGuesser::default().guess_date("https://example.com/story", &html);
    assert_eq!(guess.accuracy(), Accuracy::DateTime);
    assert_eq!(
        guess.timestamp(),
        Some(Utc.with_ymd_and_hms(2019, 1, 15, 14, 30, 0).unwrap())
    );
}

#[test]
fn late_evening_timestamp_west_of_utc_refines_previous_day_url() {
    init_logging();
    let html = page(r#"<meta property="article:published_time" content="2019-01-15T23:30:00-05:00">"#);
    let guess = DateGuesser::default().guess_date("https://example.com/2019/01/14/story", &html);
    assert_eq!(guess.accuracy(), Accuracy::DateTime);
    assert_eq!(guess.date(), NaiveDate::from_ymd_opt(2019, 1, 15));
    assert_eq!(
        guess.timestamp(),
        Some(Utc.with_ymd_and_hms(2019, 1, 16, 4, 30, 0).unwrap())
    );
}

#[test]
fn early_morning_timestamp_east_of_utc_keeps_its_local_date() {
    init_logging();
    let html = page(r#"<meta property="article:published_time" content="2019-01-15T00:30:00+09:00">"#);
    let guess = DateGuesser::default().guess_date("https://www.example.jp/2019/01/15/", &html);
    assert_eq!(guess.accuracy(), Accuracy::DateTime);
    assert_eq!(guess.date(), NaiveDate::from_ymd_opt(2019, 1, 15));
}

#[test]
fn comment_timestamp_far_from_url_date_is_ignored() {
    init_logging();
    let html = page(r#"<time datetime="2021-06-01T10:00:00Z">comment</time>"#);
    let guess = DateGuesser::default().guess_date("https://example.com/2019/01/15/story", &html);
    assert_eq!(guess.accuracy(), Accuracy::Date);
    assert_eq!(guess.date(), NaiveDate::from_ymd_opt(2019, 1, 15));
}

#[test]
fn first_tag_wins_on_equal_accuracy() {
    init_logging();
    let first = injected(vec![fixed("a", "2019-01-02"), fixed("b", "2019-01-05")]);
    assert_eq!(
        first.guess_date("https://example.com/x", "").date(),
        NaiveDate::from_ymd_opt(2019, 1, 2)
    );

    let swapped = injected(vec![fixed("b", "2019-01-05"), fixed("a", "2019-01-02")]);
    assert_eq!(
        swapped.guess_date("https://example.com/x", "").date(),
        NaiveDate::from_ymd_opt(2019, 1, 5)
    );
}

#[test]
fn every_extractor_is_evaluated_once() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    init_logging();
    let calls = Arc::new(AtomicUsize::new(0));
    let tags = (0..3)
        .map(|i| {
            let calls = Arc::clone(&calls);
            TagExtractor::new(format!("counting-{i}"), move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                Some("2019-01-01T00:00:00Z".to_string())
            })
        })
        .collect();
    let guesser = injected(tags);

    let guess = guesser.guess_date("https://example.com/2019/01/01/", "");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(guess.accuracy(), Accuracy::DateTime);
}

#[test]
fn unparseable_tag_values_degrade_to_none() {
    init_logging();
    let guesser = injected(vec![fixed("junk", "sometime last week"), fixed("empty", "")]);
    assert_eq!(guesser.guess_date("https://example.com/about", ""), Guess::none());
}

#[test]
fn timestamp_is_present_exactly_when_accuracy_is_not_none() {
    init_logging();
    let guesser = DateGuesser::default();
    let cases = [
        ("https://example.com/", page("")),
        ("https://example.com/2019/01/", page("")),
        ("https://example.com/2019/01/15/", page("")),
        (
            "https://example.com/",
            page(r#"<meta name="date" content="March 2018">"#),
        ),
        (
            "https://example.com/",
            page(r#"<meta name="date" content="not a date">"#),
        ),
        ("", "<<<garbage".to_string()),
    ];
    for (url, html) in cases {
        let guess = guesser.guess_date(url, &html);
        assert_eq!(
            guess.timestamp().is_none(),
            guess.accuracy() == Accuracy::None,
            "{url} {html}"
        );
    }
}

#[test]
fn guesser_is_shareable_across_threads() {
    init_logging();
    let guesser = std::sync::Arc::new(DateGuesser::default());
    let handles: Vec<_> = (1..=4)
        .map(|day| {
            let guesser = std::sync::Arc::clone(&guesser);
            std::thread::spawn(move || {
                guesser
                    .guess_date(&format!("https://example.com/2019/01/0{day}/x"), "")
                    .date()
            })
        })
        .collect();
    for (day, handle) in (1..=4).zip(handles) {
        assert_eq!(handle.join().unwrap(), NaiveDate::from_ymd_opt(2019, 1, day));
    }
}
