use std::fmt::{Debug, Formatter};

use async_trait::async_trait;
use storsign_core::utils::Redact;
use storsign_core::{Context, ProvideCredential, Result};

use crate::{Config, Credential};

/// Load credential from configuration.
///
/// Both the account name and the Base64 account key must be set, otherwise
/// nothing is provided. A key that isn't valid Base64 is an error.
#[derive(Default, Clone)]
pub struct ConfigCredentialProvider {
    account_name: Option<String>,
    account_key: Option<String>,
}

impl Debug for ConfigCredentialProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigCredentialProvider")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&self.account_key))
            .finish()
    }
}

impl ConfigCredentialProvider {
    /// Create a new config provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            account_name: config.account_name.clone(),
            account_key: config.account_key.clone(),
        }
    }

    /// Set account name.
    pub fn with_account_name(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = Some(account_name.into());
        self
    }

    /// Set Base64 encoded account key.
    pub fn with_account_key(mut self, account_key: impl Into<String>) -> Self {
        self.account_key = Some(account_key.into());
        self
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let (Some(account_name), Some(account_key)) = (&self.account_name, &self.account_key)
        else {
            return Ok(None);
        };
        if account_name.is_empty() || account_key.is_empty() {
            return Ok(None);
        }

        Credential::from_base64_key(account_name.clone(), account_key).map(Some)
    }
}
