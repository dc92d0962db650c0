use std::collections::HashMap;

use storsign_core::{Error, Result};

use crate::constants::{DEVELOPMENT_ACCOUNT_KEY, DEVELOPMENT_ACCOUNT_NAME, DEVELOPMENT_PROXY_URI};
use crate::{Config, Service};

/// Parses a [storage connection string][1].
///
/// [1]: https://learn.microsoft.com/en-us/azure/storage/common/storage-configure-connection-string
pub(crate) fn parse(conn_str: &str, service: Service) -> Result<Config> {
    let key_values = parse_into_key_values(conn_str)?;

    if key_values.get("UseDevelopmentStorage").map(String::as_str) == Some("true") {
        // The emulator has no file service, fall through to the regular fields.
        if let Some(config) = collect_development_config(&key_values, service) {
            return Ok(config);
        }
    }

    Ok(Config {
        account_name: key_values.get("AccountName").cloned(),
        account_key: key_values.get("AccountKey").cloned(),
        endpoint: collect_endpoint(&key_values, service)?,
        ..Default::default()
    })
}

fn parse_into_key_values(conn_str: &str) -> Result<HashMap<String, String>> {
    conn_str
        .trim()
        .replace('\n', "")
        .split(';')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            let (key, value) = field.split_once('=').ok_or_else(|| {
                Error::config_invalid("invalid connection string, expected '=' in field")
                    .with_context(format!("field: {field}"))
            })?;
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

fn collect_development_config(
    key_values: &HashMap<String, String>,
    service: Service,
) -> Option<Config> {
    let port = service.development_port()?;

    let account_name = key_values
        .get("AccountName")
        .cloned()
        .unwrap_or_else(|| DEVELOPMENT_ACCOUNT_NAME.to_string());
    let account_key = key_values
        .get("AccountKey")
        .cloned()
        .unwrap_or_else(|| DEVELOPMENT_ACCOUNT_KEY.to_string());
    let proxy_uri = key_values
        .get("DevelopmentStorageProxyUri")
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEVELOPMENT_PROXY_URI.to_string());

    Some(Config {
        endpoint: Some(format!("{proxy_uri}:{port}/{account_name}")),
        account_name: Some(account_name),
        account_key: Some(account_key),
        ..Default::default()
    })
}

/// Parses an endpoint from the key-value pairs if possible.
///
/// Users are still able to later supplement configuration with an endpoint,
/// so endpoint-related fields aren't enforced.
fn collect_endpoint(key_values: &HashMap<String, String>, service: Service) -> Result<Option<String>> {
    if let Some(endpoint) = key_values.get(service.endpoint_key()) {
        return Ok(Some(endpoint.clone()));
    }

    let (account_name, endpoint_suffix) = match (
        key_values.get("AccountName"),
        key_values.get("EndpointSuffix"),
    ) {
        (Some(name), Some(suffix)) => (name, suffix),
        _ => return Ok(None),
    };

    let protocol = key_values
        .get("DefaultEndpointsProtocol")
        .map(String::as_str)
        .unwrap_or("https");
    if protocol != "http" && protocol != "https" {
        return Err(Error::config_invalid("invalid DefaultEndpointsProtocol")
            .with_context(format!("protocol: {protocol}")));
    }

    Ok(Some(format!(
        "{protocol}://{account_name}.{}.{endpoint_suffix}",
        service.endpoint_name()
    )))
}
