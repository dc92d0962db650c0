use storsign_core::{Context, Result};

use crate::connection_string;
use crate::constants::*;

/// Storage service addressed by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Blob service.
    Blob,
    /// Queue service.
    Queue,
    /// Table service.
    Table,
    /// File service.
    File,
}

impl Service {
    /// Name used in the service host, as in `<account>.<name>.core.windows.net`.
    pub fn endpoint_name(&self) -> &'static str {
        match self {
            Service::Blob => "blob",
            Service::Queue => "queue",
            Service::Table => "table",
            Service::File => "file",
        }
    }

    /// Connection string key carrying an explicit endpoint for this service.
    pub(crate) fn endpoint_key(&self) -> &'static str {
        match self {
            Service::Blob => "BlobEndpoint",
            Service::Queue => "QueueEndpoint",
            Service::Table => "TableEndpoint",
            Service::File => "FileEndpoint",
        }
    }

    /// Port the storage emulator listens on, if it serves this service.
    pub(crate) fn development_port(&self) -> Option<u16> {
        match self {
            Service::Blob => Some(10000),
            Service::Queue => Some(10001),
            Service::Table => Some(10002),
            Service::File => None,
        }
    }
}

/// Config carries all the configuration for a storage account.
#[derive(Clone, Default)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Config {
    /// `account_name` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_ACCOUNT_NAME`]
    /// - connection string: `AccountName`
    pub account_name: Option<String>,
    /// Base64 encoded account key, loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_ACCOUNT_KEY`]
    /// - connection string: `AccountKey`
    pub account_key: Option<String>,
    /// Service endpoint such as `http://127.0.0.1:10001/devstoreaccount1`, loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_ENDPOINT`]
    /// - connection string: `<Service>Endpoint` or the endpoint parts
    pub endpoint: Option<String>,
    /// Value sent as `x-ms-version` when a request doesn't carry one, loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_SERVICE_VERSION`]
    pub service_version: Option<String>,
}

impl Config {
    /// Load config from env.
    ///
    /// Values already set on the config are kept. Explicit variables win over
    /// the ones found in [`AZURE_STORAGE_CONNECTION_STRING`].
    pub fn from_env(mut self, ctx: &Context, service: Service) -> Result<Self> {
        let envs = ctx.env_vars();

        if let Some(v) = envs.get(AZURE_STORAGE_ACCOUNT_NAME) {
            self.account_name.get_or_insert_with(|| v.to_string());
        }
        if let Some(v) = envs.get(AZURE_STORAGE_ACCOUNT_KEY) {
            self.account_key.get_or_insert_with(|| v.to_string());
        }
        if let Some(v) = envs.get(AZURE_STORAGE_ENDPOINT) {
            self.endpoint.get_or_insert_with(|| v.to_string());
        }
        if let Some(v) = envs.get(AZURE_STORAGE_SERVICE_VERSION) {
            self.service_version.get_or_insert_with(|| v.to_string());
        }

        if let Some(conn_str) = envs.get(AZURE_STORAGE_CONNECTION_STRING) {
            let parsed = Self::try_from_connection_string(conn_str, service)?;
            self = self.merge(parsed);
        }

        Ok(self)
    }

    /// Parses a [storage connection string][1] into a configuration object.
    ///
    /// The connection string doesn't have to specify all required parameters
    /// because the user is still allowed to set them later directly on the object.
    ///
    /// ```txt
    /// AccountName=devstoreaccount1;
    /// AccountKey=Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==;
    /// QueueEndpoint=http://127.0.0.1:10001/devstoreaccount1
    /// ```
    ///
    /// [1]: https://learn.microsoft.com/en-us/azure/storage/common/storage-configure-connection-string
    pub fn try_from_connection_string(conn_str: &str, service: Service) -> Result<Self> {
        connection_string::parse(conn_str, service)
    }

    /// Fill every unset field from `other`.
    fn merge(self, other: Self) -> Self {
        Self {
            account_name: self.account_name.or(other.account_name),
            account_key: self.account_key.or(other.account_key),
            endpoint: self.endpoint.or(other.endpoint),
            service_version: self.service_version.or(other.service_version),
        }
    }
}
