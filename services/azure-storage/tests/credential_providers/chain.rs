use http::header;
use storsign_azure_storage::{
    ConfigCredentialProvider, Credential, EnvCredentialProvider, RequestSigner,
    StaticCredentialProvider,
};
use storsign_core::{Context, ProvideCredential, ProvideCredentialChain, Signer, StaticEnv};

#[tokio::test]
async fn test_chain_skips_incomplete_config() {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new().with_env(StaticEnv::from_pairs([
        ("AZURE_STORAGE_ACCOUNT_NAME", "fromenv"),
        ("AZURE_STORAGE_ACCOUNT_KEY", "ZW52"),
    ]));
    let chain = ProvideCredentialChain::new()
        .push(ConfigCredentialProvider::new().with_account_name("fromconfig"))
        .push(EnvCredentialProvider::new())
        .push(StaticCredentialProvider::new("static", b"static".to_vec()));
    assert_eq!(chain.len(), 3);

    let cred = chain.provide_credential(&ctx).await.unwrap().unwrap();
    assert_eq!(cred.account_name, "fromenv");
    assert_eq!(cred.account_key, b"env");
}

#[tokio::test]
async fn test_chain_skips_failing_provider() {
    let chain = ProvideCredentialChain::new()
        .push(
            ConfigCredentialProvider::new()
                .with_account_name("broken")
                .with_account_key("not base64!"),
        )
        .push(StaticCredentialProvider::new("static", b"static".to_vec()));

    let cred = chain
        .provide_credential(&Context::new())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cred, Credential::with_shared_key("static", b"static".to_vec()));
}

#[tokio::test]
async fn test_signer_reuses_credential() {
    let chain = ProvideCredentialChain::new()
        .push(StaticCredentialProvider::new("devstoreaccount1", vec![1u8; 32]));
    let signer = Signer::new(Context::new(), chain, RequestSigner::new());

    let mut authorizations = Vec::new();
    for _ in 0..2 {
        let (mut parts, _) = http::Request::get("http://127.0.0.1:10000/devstoreaccount1/c")
            .header("x-ms-date", "Wed, 01 Jan 2014 00:00:00 GMT")
            .body(())
            .unwrap()
            .into_parts();
        signer.sign(&mut parts).await.unwrap();
        authorizations.push(parts.headers[header::AUTHORIZATION].clone());
    }

    assert_eq!(authorizations[0], authorizations[1]);
}
