use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use http::request::Parts;
use http::{header, HeaderValue};
use log::debug;
use storsign_core::hash::base64_hmac_sha256;
use storsign_core::time::{format_http_date, now, DateTime};
use storsign_core::{Context, Error, Result, SignRequest, SigningRequest};

/// Compute the Shared Key signature of a request.
///
/// `content_length` is only used when the request carries no
/// `Content-Length` header.
///
/// The account key must be the raw decoded key. An empty key is rejected
/// before any hashing happens, nothing else is validated: an empty account
/// name still yields a signature, which the service will reject.
pub fn sign(
    req: &SigningRequest,
    account_name: &str,
    account_key: &[u8],
    content_length: Option<&str>,
) -> Result<String> {
    if account_key.is_empty() {
        return Err(Error::credential_invalid("account key must not be empty")
            .with_context(format!("account_name: {account_name}")));
    }

    let string_to_sign = string_to_sign(req, account_name, content_length)?;
    Ok(base64_hmac_sha256(account_key, string_to_sign.as_bytes()))
}

/// Render the value of the `Authorization` header.
pub fn format_authorization(account_name: &str, signature: &str) -> String {
    format!("{SHARED_KEY_SCHEME} {account_name}:{signature}")
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-Encoding + "\n" +
/// Content-Language + "\n" +
/// Content-Length + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +
/// If-Modified-Since + "\n" +
/// If-Match + "\n" +
/// If-None-Match + "\n" +
/// If-Unmodified-Since + "\n" +
/// Range + "\n" +
/// CanonicalizedHeaders + "\n" +
/// CanonicalizedResource;
/// ```
///
/// Only the verb and Content-Length are ever filled, the other standard
/// headers are always signed as empty lines. Content-Length comes from the
/// request header if present (`"0"` included), then from `content_length`.
///
/// ## Reference
///
/// - [Blob, Queue, and File Services (Shared Key authorization)](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key)
pub fn string_to_sign(
    req: &SigningRequest,
    account_name: &str,
    content_length: Option<&str>,
) -> Result<String> {
    let content_length = match req.header_get_or_default(&header::CONTENT_LENGTH)? {
        "" => content_length.unwrap_or_default(),
        v => v,
    };
    let canonicalized_headers = canonicalize_header(req)?;
    let canonicalized_resource = canonicalize_resource(req, account_name);

    let s = [
        req.method.as_str(),
        // Content-Encoding
        "",
        // Content-Language
        "",
        content_length,
        // Content-MD5
        "",
        // Content-Type
        "",
        // Date
        "",
        // If-Modified-Since
        "",
        // If-Match
        "",
        // If-None-Match
        "",
        // If-Unmodified-Since
        "",
        // Range
        "",
        canonicalized_headers.as_str(),
        canonicalized_resource.as_str(),
    ]
    .join("\n");

    debug!("string to sign: {}", &s);

    Ok(s)
}

/// Headers starting with `x-ms-`, rendered as `name:value` and sorted on
/// the whole rendered string.
///
/// ## Reference
///
/// - [Constructing the canonicalized headers string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-headers-string)
fn canonicalize_header(req: &SigningRequest) -> Result<String> {
    Ok(SigningRequest::header_to_string(
        req.header_to_vec_with_prefix(X_MS_PREFIX)?,
        "\n",
    ))
}

/// `/` + account + path, then one `key:value` line per query parameter.
///
/// The newline after the path is always present, even without query.
///
/// ## Reference
///
/// - [Constructing the canonicalized resource string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-resource-string)
fn canonicalize_resource(req: &SigningRequest, account_name: &str) -> String {
    format!(
        "/{}{}\n{}",
        account_name,
        req.path,
        SigningRequest::query_to_string(req.query.clone(), ":", "\n")
    )
}

/// Length of the body a request will be sent with.
///
/// `http::request::Parts` doesn't know about the body, so requests that rely
/// on the client to set `Content-Length` carry it as an extension instead:
///
/// ```
/// use storsign_azure_storage::ContentLength;
///
/// let body = "<QueueMessage><MessageText>hello</MessageText></QueueMessage>";
/// let mut parts = http::Request::post("http://127.0.0.1:10001/devstoreaccount1/q/messages")
///     .body(())
///     .unwrap()
///     .into_parts()
///     .0;
/// parts.extensions.insert(ContentLength(body.len() as u64));
/// ```
///
/// A `Content-Length` header on the request takes precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLength(pub u64);

/// RequestSigner that implement Shared Key Authorization on `http` requests.
///
/// It fills `x-ms-date` (and `x-ms-version` when configured) if the request
/// doesn't carry them, then inserts the `Authorization` header. No other
/// header is touched.
///
/// Requests with a body but no `Content-Length` header must carry a
/// [`ContentLength`] extension, otherwise the length is signed as empty.
///
/// - [Authorize with Shared Key](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key)
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
    service_version: Option<String>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `x-ms-version` sent with requests that don't specify one.
    pub fn with_service_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Err(Error::request_invalid("credential is required"));
        };

        if !req.headers.contains_key(X_MS_DATE) {
            let now_time = self.time.unwrap_or_else(now);
            req.headers
                .insert(X_MS_DATE, format_http_date(now_time).parse()?);
        }
        if let Some(version) = &self.service_version {
            if !req.headers.contains_key(X_MS_VERSION) {
                req.headers.insert(X_MS_VERSION, version.parse()?);
            }
        }

        let content_length = req
            .extensions
            .get::<ContentLength>()
            .map(|v| v.0.to_string());

        let ctx = SigningRequest::build(req)?;
        let signature = sign(
            &ctx,
            &cred.account_name,
            &cred.account_key,
            content_length.as_deref(),
        )?;

        req.headers.insert(header::AUTHORIZATION, {
            let mut value: HeaderValue = format_authorization(&cred.account_name, &signature)
                .parse()
                .map_err(|e| {
                    Error::request_invalid("failed to build authorization header")
                        .with_source(e)
                        .with_context(format!("account_name: {}", cred.account_name))
                })?;
            value.set_sensitive(true);
            value
        });

        Ok(())
    }
}
