use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use dateguess_engine::{decode_html, DecodedHtml};

/// Reads page bytes from `path`, or stdin for `None`, and decodes them.
pub fn read_page(path: Option<&Path>, content_type: Option<&str>, url: &str) -> Result<DecodedHtml> {
    let bytes = match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read html {}", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("failed to read html from stdin")?;
            buf
        }
    };
    Ok(decode_html(&bytes, content_type, Some(url)))
}
