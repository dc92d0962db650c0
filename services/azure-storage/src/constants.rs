// Headers used in shared key signing.
pub const X_MS_PREFIX: &str = "x-ms-";
pub const X_MS_DATE: &str = "x-ms-date";
pub const X_MS_VERSION: &str = "x-ms-version";
pub const SHARED_KEY_SCHEME: &str = "SharedKey";

// Env values used to configure the storage account.
pub const AZURE_STORAGE_ACCOUNT_NAME: &str = "AZURE_STORAGE_ACCOUNT_NAME";
pub const AZURE_STORAGE_ACCOUNT_KEY: &str = "AZURE_STORAGE_ACCOUNT_KEY";
pub const AZURE_STORAGE_ENDPOINT: &str = "AZURE_STORAGE_ENDPOINT";
pub const AZURE_STORAGE_SERVICE_VERSION: &str = "AZURE_STORAGE_SERVICE_VERSION";
pub const AZURE_STORAGE_CONNECTION_STRING: &str = "AZURE_STORAGE_CONNECTION_STRING";

// Storage emulator defaults.
pub const DEVELOPMENT_ACCOUNT_NAME: &str = "devstoreaccount1";
pub const DEVELOPMENT_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
pub const DEVELOPMENT_PROXY_URI: &str = "http://127.0.0.1";
