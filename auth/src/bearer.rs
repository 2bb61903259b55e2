//! Bearer token extraction from `Authorization` headers.
//!
//! Extraction is deliberately relaxed: the header value is split on a single
//! space and the second part is taken as the token, whatever the scheme word
//! is. `"Token abc"` yields `"abc"` just like `"Bearer abc"` does. An empty
//! result always means "no token present".

use std::collections::{BTreeMap, HashMap};

/// Default header carrying the credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Anything that can look up a request header by name.
pub trait HeaderSource {
    /// Value of header `name`, if present and valid text.
    fn header(&self, name: &str) -> Option<&str>;
}

impl HeaderSource for http::HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }
}

impl<B> HeaderSource for http::Request<B> {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers().header(name)
    }
}

impl HeaderSource for HashMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name)
            .map(String::as_str)
            .or_else(|| find_ignore_case(self.iter(), name))
    }
}

impl HeaderSource for BTreeMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name)
            .map(String::as_str)
            .or_else(|| find_ignore_case(self.iter(), name))
    }
}

/// Case-insensitive lookup. When several keys differ only in case and none
/// matches exactly, the first one found in iteration order wins.
fn find_ignore_case<'a>(
    mut entries: impl Iterator<Item = (&'a String, &'a String)>,
    name: &str,
) -> Option<&'a str> {
    entries
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Extract the token from a `<scheme> <token>` header value.
///
/// Returns `""` unless the value splits on `' '` into exactly two parts.
pub fn extract_token(header_value: &str) -> &str {
    let mut parts = header_value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_scheme), Some(token), None) => token,
        _ => "",
    }
}

/// Extract the token from header `key`, or `""` if the header is absent.
pub fn extract_from_header<'a, H>(headers: &'a H, key: &str) -> &'a str
where
    H: HeaderSource + ?Sized,
{
    headers.header(key).map(extract_token).unwrap_or_default()
}

/// Extract the token from the `Authorization` header.
pub fn extract_from_headers<H>(headers: &H) -> &str
where
    H: HeaderSource + ?Sized,
{
    extract_from_header(headers, AUTHORIZATION_HEADER)
}
