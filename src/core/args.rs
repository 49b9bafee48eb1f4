//! Decoded key/value arguments (query string, form body, cookies).

use std::borrow::Cow;

/// Ordered multi-map of decoded arguments.
///
/// Lookups are linear scans. Argument lists on a single request are short,
/// so this beats hashing and keeps document order for `peek_multi`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pairs: Vec<(String, String)>,
}

impl Args {
    /// Create an empty argument list.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// First value for `name`, if any.
    #[inline]
    pub fn peek(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value for `name`, in document order.
    pub fn peek_multi(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Whether `name` appears at least once.
    #[inline]
    pub fn has(&self, name: &str) -> bool {
        self.pairs.iter().any(|(key, _)| key == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over all pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn push(&mut self, key: String, value: String) {
        self.pairs.push((key, value));
    }
}

/// Percent-decode a single component.
///
/// Returns a borrowed slice when nothing needs decoding. With
/// `plus_as_space`, `+` decodes to a space as in form encoding.
#[inline]
pub fn decode_component(s: &str, plus_as_space: bool) -> Cow<'_, str> {
    let has_plus = plus_as_space && s.contains('+');
    if !has_plus && !s.contains('%') {
        return Cow::Borrowed(s);
    }

    if has_plus {
        let replaced = s.replace('+', " ");
        Cow::Owned(
            percent_encoding::percent_decode_str(&replaced)
                .decode_utf8_lossy()
                .into_owned(),
        )
    } else {
        percent_encoding::percent_decode_str(s).decode_utf8_lossy()
    }
}

/// Parse a query string (or form-encoded body) into arguments.
#[inline]
pub fn parse_query_string(query: &str) -> Args {
    let pair_count = query.matches('&').count() + 1;
    let mut args = Args {
        pairs: Vec::with_capacity(pair_count.min(16)),
    };

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }

        let (key, value) = match pair.find('=') {
            Some(pos) => (&pair[..pos], &pair[pos + 1..]),
            None => (pair, ""),
        };

        if !key.is_empty() {
            args.push(
                decode_component(key, true).into_owned(),
                decode_component(value, true).into_owned(),
            );
        }
    }

    args
}

/// Parse a Cookie header into name/value arguments.
///
/// Pairs without `=` are skipped. Values are percent-decoded, `+` is kept.
#[inline]
pub fn parse_cookies(cookie_header: &str) -> Args {
    let cookie_count = cookie_header.matches(';').count() + 1;
    let mut args = Args {
        pairs: Vec::with_capacity(cookie_count.min(16)),
    };
    append_cookies(&mut args, cookie_header);
    args
}

/// Append cookies from one more `Cookie` header line.
pub(crate) fn append_cookies(args: &mut Args, cookie_header: &str) {
    for cookie in cookie_header.split(';') {
        let cookie = cookie.trim();
        if cookie.is_empty() {
            continue;
        }

        let (name, value) = match cookie.find('=') {
            Some(pos) => (cookie[..pos].trim(), cookie[pos + 1..].trim()),
            None => continue,
        };

        if !name.is_empty() {
            args.push(name.to_string(), decode_component(value, false).into_owned());
        }
    }
}
