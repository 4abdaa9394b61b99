use crate::fetcher::types::{Charset, PageResponse};
use bytes::Bytes;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::{StatusCode, header::HeaderMap};
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// Decodes a fully read body into a [`PageResponse`].
///
/// Runs for every status code: the connectivity check needs the body of
/// maintenance pages, which are not served with 200. Malformed byte
/// sequences become U+FFFD so the rest of the page stays usable.
pub fn process_response(
    url_final: Url,
    status: StatusCode,
    headers: HeaderMap,
    body_bytes: Bytes,
) -> PageResponse {
    let content_type = headers
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    let charset = detect_charset(&content_type, &body_bytes);
    let body_utf8 = decode_to_utf8(&body_bytes, &charset);

    PageResponse {
        url_final,
        status,
        headers,
        body_utf8,
        charset,
    }
}

fn charset_from_captures(captures: Option<regex::Captures<'_>>) -> Option<Charset> {
    let name = captures?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(name.as_bytes()).map(Charset::from_encoding)
}

fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    // Content-Type header wins
    if let Some(charset) = charset_from_captures(CHARSET_REGEX.captures(content_type)) {
        return charset;
    }

    // Then <meta> declarations in the first 4KB
    let search_bytes = &body_bytes[..body_bytes.len().min(4096)];
    let search_str = String::from_utf8_lossy(search_bytes);

    if let Some(charset) = charset_from_captures(META_CHARSET_REGEX.captures(&search_str)) {
        return charset;
    }
    if let Some(charset) = charset_from_captures(META_HTTP_EQUIV_REGEX.captures(&search_str)) {
        return charset;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    Charset::from_encoding(detector.guess(None, true))
}

fn decode_to_utf8(body_bytes: &[u8], charset: &Charset) -> String {
    let encoding = charset.encoding();
    let (decoded, used, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        warn!(
            encoding = used.name(),
            "body has malformed byte sequences, replaced with U+FFFD"
        );
    }

    decoded.into_owned()
}
