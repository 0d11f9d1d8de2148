use std::sync::LazyLock;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use guess_logging::{guess_debug, guess_warn};
use regex::bytes::Regex;
use url::Url;

/// How far into the document a `<meta charset>` declaration is looked for.
const META_SNIFF_BYTES: usize = 1024;

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?\s*([a-z0-9_\-:.]+)"#)
        .expect("valid meta charset regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Malformed sequences were replaced with U+FFFD.
    pub had_replacements: bool,
}

/// Decode raw page bytes into UTF-8.
///
/// Order: BOM, Content-Type charset, `<meta charset>` in the first kilobyte,
/// then `chardetng` detection hinted by the page's top-level domain.
/// Malformed input is decoded lossily rather than rejected.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>, page_url: Option<&str>) -> DecodedHtml {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding, "bom");
    }

    if let Some(enc) = content_type
        .and_then(header_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, enc, "content-type");
    }

    if let Some(enc) = meta_charset(bytes) {
        return decode_with(bytes, enc, "meta");
    }

    let tld = page_url.and_then(top_level_domain);
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(tld.as_deref().map(str::as_bytes), true);
    decode_with(bytes, enc, "detected")
}

fn header_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_BYTES)];
    let label = META_CHARSET.captures(head)?.get(1)?.as_bytes();
    Encoding::for_label(label)
}

fn top_level_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let tld = host.rsplit('.').next()?;
    (!tld.is_empty() && tld.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| tld.to_ascii_lowercase())
}

fn decode_with(bytes: &[u8], enc: &'static Encoding, source: &str) -> DecodedHtml {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        guess_warn!("malformed {} input replaced while decoding", enc.name());
    }
    guess_debug!("decoded {} bytes as {} ({})", bytes.len(), enc.name(), source);
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: enc.name().to_string(),
        had_replacements: had_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_accepts_quotes_and_case() {
        assert_eq!(
            header_charset("text/html; Charset=\"ISO-8859-1\""),
            Some("ISO-8859-1".to_string())
        );
        assert_eq!(header_charset("text/html"), None);
    }

    #[test]
    fn meta_charset_is_sniffed() {
        let bytes = b"<html><head><meta charset=\"windows-1252\"></head><body>caf\xe9</body></html>";
        let decoded = decode_html(bytes, None, None);
        assert_eq!(decoded.encoding_label, "windows-1252");
        assert!(decoded.html.contains("caf\u{e9}"));
    }

    #[test]
    fn tld_is_extracted_for_detection() {
        assert_eq!(top_level_domain("https://www.example.de/a"), Some("de".to_string()));
        assert_eq!(top_level_domain("http://127.0.0.1/"), None);
        assert_eq!(top_level_domain("not a url"), None);
    }
}
