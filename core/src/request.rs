use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use http::Method;

use crate::Result;

/// The request description that canonicalization works on.
///
/// It is detached from `http::Request`: building one never mutates the
/// original request, and the query list holds exactly the parameters that
/// will be signed.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP path, as sent on the wire (not percent decoded).
    pub path: String,
    /// HTTP query parameters.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Create an empty signing request for the given method with path `/`.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            path: "/".to_string(),
            query: Vec::new(),
            headers: HeaderMap::new(),
        }
    }

    /// Build a signing request from http::request::Parts.
    ///
    /// The query string is split with `form_urlencoded`, so values are
    /// percent decoded.
    pub fn build(parts: &http::request::Parts) -> Result<Self> {
        let path = match parts.uri.path() {
            "" => "/".to_string(),
            v => v.to_string(),
        };

        Ok(SigningRequest {
            method: parts.method.clone(),
            path,
            query: parts
                .uri
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),
            headers: parts.headers.clone(),
        })
    }

    /// Set path from URI segments.
    ///
    /// Segments are concatenated as-is, each one is expected to carry its
    /// own slashes: `["/", "container/", "blob"]` => `/container/blob`.
    pub fn with_path_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.path = segments.into_iter().fold(String::new(), |mut acc, s| {
            acc.push_str(s.as_ref());
            acc
        });
        self
    }

    /// Append a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        self.headers
            .append(HeaderName::from_bytes(name.as_bytes())?, HeaderValue::from_str(value)?);
        Ok(self)
    }

    /// Push a query pair.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_push(key, value);
        self
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Convert query to string, sorted by key.
    ///
    /// Values are kept even when empty, and pairs sharing a key keep their
    /// relative order.
    ///
    /// ```shell
    /// [(c, d), (a, b)] => "a:b\nc:d"
    /// ```
    pub fn query_to_string(mut query: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        // Sort via query key only.
        query.sort_by(|a, b| a.0.cmp(&b.0));

        for (idx, (k, v)) in query.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            s.push_str(sep);
            s.push_str(&v);
        }

        s
    }

    /// Get header value by name.
    ///
    /// Returns empty string if header not found.
    #[inline]
    pub fn header_get_or_default(&self, key: &HeaderName) -> Result<&str> {
        match self.headers.get(key) {
            Some(v) => Ok(v.to_str()?),
            None => Ok(""),
        }
    }

    /// Render every header whose name starts with `prefix` as `name:value`.
    ///
    /// Values are used verbatim, no trimming or folding happens.
    pub fn header_to_vec_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        self.headers
            .iter()
            .filter(|(k, _)| k.as_str().starts_with(prefix))
            .map(|(k, v)| Ok(format!("{}:{}", k.as_str(), v.to_str()?)))
            .collect()
    }

    /// Convert rendered headers to string, sorted on the full rendered value.
    ///
    /// ```shell
    /// ["c:d", "a:b"] => "a:b\nc:d"
    /// ```
    pub fn header_to_string(mut headers: Vec<String>, join: &str) -> String {
        headers.sort_unstable();
        headers.join(join)
    }
}
