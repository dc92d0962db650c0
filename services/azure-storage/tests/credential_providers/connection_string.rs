use http::header;
use pretty_assertions::assert_eq;
use storsign_azure_storage::{
    format_authorization, sign, Config, Credential, DefaultCredentialProvider, RequestSigner,
    Service,
};
use storsign_core::{Context, SigningRequest, Signer, StaticEnv};

const EMULATOR_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";

fn emulator_ctx() -> Context {
    Context::new().with_env(StaticEnv::from_pairs([
        ("AZURE_STORAGE_CONNECTION_STRING", "UseDevelopmentStorage=true"),
        ("AZURE_STORAGE_SERVICE_VERSION", "2014-02-14"),
    ]))
}

#[tokio::test]
async fn test_sign_with_development_storage() {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = emulator_ctx();
    let config = Config::default().from_env(&ctx, Service::Queue).unwrap();
    let endpoint = config.endpoint.clone().unwrap();
    assert_eq!(endpoint, "http://127.0.0.1:10001/devstoreaccount1");

    let builder = RequestSigner::new().with_service_version(config.service_version.clone().unwrap());
    let signer = Signer::new(ctx, DefaultCredentialProvider::new(&config), builder);

    let (mut parts, _) = http::Request::get(format!("{endpoint}/test-queue/messages?numofmessages=32"))
        .header("x-ms-date", "Wed, 01 Jan 2014 00:00:00 GMT")
        .body(())
        .unwrap()
        .into_parts();
    signer.sign(&mut parts).await.unwrap();

    let cred = Credential::from_base64_key("devstoreaccount1", EMULATOR_KEY).unwrap();
    let req = SigningRequest::new(http::Method::GET)
        .with_path_segments(["/devstoreaccount1/test-queue/messages"])
        .with_header("x-ms-date", "Wed, 01 Jan 2014 00:00:00 GMT")
        .unwrap()
        .with_header("x-ms-version", "2014-02-14")
        .unwrap()
        .with_query("numofmessages", "32");
    let expected = sign(&req, &cred.account_name, &cred.account_key, None).unwrap();

    assert_eq!(
        parts.headers[header::AUTHORIZATION].to_str().unwrap(),
        format_authorization("devstoreaccount1", &expected)
    );
}

#[tokio::test]
async fn test_explicit_account_overrides_connection_string() {
    let ctx = Context::new().with_env(StaticEnv::from_pairs([
        (
            "AZURE_STORAGE_CONNECTION_STRING",
            "DefaultEndpointsProtocol=https;AccountName=fromconn;AccountKey=Y29ubg==;EndpointSuffix=core.windows.net",
        ),
        ("AZURE_STORAGE_ACCOUNT_NAME", "fromenv"),
        ("AZURE_STORAGE_ACCOUNT_KEY", "ZW52"),
    ]));

    let config = Config::default().from_env(&ctx, Service::Blob).unwrap();
    assert_eq!(
        config.endpoint.as_deref(),
        Some("https://fromconn.blob.core.windows.net")
    );

    let signer = Signer::new(
        ctx,
        DefaultCredentialProvider::new(&config),
        RequestSigner::new(),
    );
    let (mut parts, _) = http::Request::put("https://fromconn.blob.core.windows.net/c?restype=container")
        .body(())
        .unwrap()
        .into_parts();
    signer.sign(&mut parts).await.unwrap();

    let authorization = parts.headers[header::AUTHORIZATION].to_str().unwrap();
    assert!(authorization.starts_with("SharedKey fromenv:"), "{authorization}");
    assert!(parts.headers.contains_key("x-ms-date"));
    assert!(!parts.headers.contains_key("x-ms-version"));
}

#[tokio::test]
async fn test_missing_credential_fails_to_sign() {
    let signer = Signer::new(
        Context::new(),
        DefaultCredentialProvider::default(),
        RequestSigner::new(),
    );
    let (mut parts, _) = http::Request::get("http://127.0.0.1:10000/devstoreaccount1/c")
        .body(())
        .unwrap()
        .into_parts();

    let err = signer.sign(&mut parts).await.unwrap_err();
    assert_eq!(err.kind(), storsign_core::ErrorKind::RequestInvalid);
    assert!(!parts.headers.contains_key(header::AUTHORIZATION));
}
