use quick_xml::de;
use serde::Deserialize;
use storsign_core::{Error, Result};

/// Error code the service returns when a Shared Key signature doesn't match.
pub const AUTHENTICATION_FAILED: &str = "AuthenticationFailed";

/// Error body returned by the storage service on failed requests.
///
/// ```xml
/// <?xml version="1.0" encoding="utf-8"?>
/// <Error>
///   <Code>ContainerNotFound</Code>
///   <Message>The specified container does not exist.</Message>
/// </Error>
/// ```
///
/// The signer never reads responses, this is for callers that want to
/// report why a signed request was rejected.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct StorageErrorResponse {
    /// Machine readable error code, such as `AuthenticationFailed`.
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// Present on authentication failures, usually echoes the string to sign
    /// the service computed.
    pub authentication_error_detail: Option<String>,
}

impl StorageErrorResponse {
    /// Parse an XML error body.
    pub fn parse(body: &str) -> Result<Self> {
        de::from_str(body).map_err(|e| {
            Error::unexpected("failed to parse storage error response")
                .with_source(e)
                .with_context(format!("response_length: {}", body.len()))
        })
    }

    /// Whether the service rejected the request's signature.
    pub fn is_authentication_failure(&self) -> bool {
        self.code == AUTHENTICATION_FAILED
    }
}
