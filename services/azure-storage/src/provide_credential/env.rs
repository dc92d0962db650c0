use async_trait::async_trait;
use storsign_core::{Context, ProvideCredential, Result};

use crate::{Config, Credential, Service};

/// Load credential from environment variables.
///
/// - `AZURE_STORAGE_ACCOUNT_NAME` and `AZURE_STORAGE_ACCOUNT_KEY`
/// - otherwise `AccountName`/`AccountKey` of `AZURE_STORAGE_CONNECTION_STRING`
#[derive(Clone, Debug, Default)]
pub struct EnvCredentialProvider {}

impl EnvCredentialProvider {
    /// Create a new env provider.
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        // The service only matters for endpoints, which credentials don't use.
        let config = Config::default().from_env(ctx, Service::Blob)?;

        match (config.account_name, config.account_key) {
            (Some(account_name), Some(account_key)) => {
                Credential::from_base64_key(account_name, &account_key).map(Some)
            }
            _ => Ok(None),
        }
    }
}
