use http::Method;
use pretty_assertions::assert_eq;
use rand::seq::SliceRandom;
use rand::Rng;
use storsign_azure_storage::{
    format_authorization, sign, string_to_sign, ContentLength, RequestSigner,
    StaticCredentialProvider,
};
use storsign_core::{Context, ErrorKind, Signer, SigningRequest};

const ACCOUNT_NAME: &str = "devstoreaccount1";

fn key() -> Vec<u8> {
    (0u8..32).collect()
}

fn container_request() -> SigningRequest {
    SigningRequest::new(Method::GET)
        .with_path_segments(["/", "nonexistent-container"])
        .with_header("x-ms-version", "2014-02-14")
        .unwrap()
        .with_header("x-ms-date", "Wed, 01 Jan 2014 00:00:00 GMT")
        .unwrap()
        .with_query("restype", "container")
}

#[test]
fn test_pinned_signature() {
    let _ = env_logger::builder().is_test(true).try_init();

    let signature = sign(&container_request(), ACCOUNT_NAME, &key(), None).unwrap();
    assert_eq!(signature, "fOHGXXOCj91Qljm2nsLr1hlYUdnWBqYecNaDglfJzB8=");
    assert_eq!(
        format_authorization(ACCOUNT_NAME, &signature),
        "SharedKey devstoreaccount1:fOHGXXOCj91Qljm2nsLr1hlYUdnWBqYecNaDglfJzB8="
    );
}

#[test]
fn test_signature_is_deterministic() {
    let req = container_request();
    let first = sign(&req, ACCOUNT_NAME, &key(), None).unwrap();
    for _ in 0..16 {
        assert_eq!(sign(&req, ACCOUNT_NAME, &key(), None).unwrap(), first);
    }
}

#[test]
fn test_signature_changes_with_any_key_byte() {
    let req = container_request();
    let expected = sign(&req, ACCOUNT_NAME, &key(), None).unwrap();

    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let mut key = key();
        let idx = rng.gen_range(0..key.len());
        key[idx] ^= rng.gen_range(1..=u8::MAX);

        let actual = sign(&req, ACCOUNT_NAME, &key, None).unwrap();
        assert_ne!(actual, expected, "mutated key at byte {idx} kept the signature");
    }
}

#[test]
fn test_signature_changes_with_account_name() {
    let req = container_request();
    assert_ne!(
        sign(&req, ACCOUNT_NAME, &key(), None).unwrap(),
        sign(&req, "devstoreaccount2", &key(), None).unwrap()
    );
}

#[test]
fn test_content_type_is_not_signed() {
    let expected = sign(&container_request(), ACCOUNT_NAME, &key(), None).unwrap();

    for content_type in ["application/xml", "text/plain; charset=utf-8", ""] {
        let req = container_request()
            .with_header("content-type", content_type)
            .unwrap();
        assert_eq!(sign(&req, ACCOUNT_NAME, &key(), None).unwrap(), expected);
    }
}

#[test]
fn test_non_prefixed_custom_headers_are_not_signed() {
    let req = container_request()
        .with_header("x-client-name", "storsign")
        .unwrap()
        .with_header("user-agent", "storsign/0.1")
        .unwrap();

    assert_eq!(
        sign(&req, ACCOUNT_NAME, &key(), None).unwrap(),
        sign(&container_request(), ACCOUNT_NAME, &key(), None).unwrap()
    );
}

#[test]
fn test_prefixed_headers_are_signed() {
    let req = container_request()
        .with_header("x-ms-client-request-id", "42")
        .unwrap();

    assert_ne!(
        sign(&req, ACCOUNT_NAME, &key(), None).unwrap(),
        sign(&container_request(), ACCOUNT_NAME, &key(), None).unwrap()
    );
}

#[test]
fn test_query_order_does_not_matter() {
    let mut query = vec![
        ("restype", "container"),
        ("comp", "list"),
        ("prefix", "logs"),
        ("maxresults", "10"),
        ("include", "metadata"),
    ];

    let build = |query: &[(&str, &str)]| {
        query
            .iter()
            .fold(SigningRequest::new(Method::GET).with_path_segments(["/", "c"]), |req, (k, v)| {
                req.with_query(*k, *v)
            })
    };
    let expected = sign(&build(&query), ACCOUNT_NAME, &key(), None).unwrap();

    let mut rng = rand::thread_rng();
    for _ in 0..32 {
        query.shuffle(&mut rng);
        assert_eq!(sign(&build(&query), ACCOUNT_NAME, &key(), None).unwrap(), expected);
    }
}

#[test]
fn test_header_order_does_not_matter() {
    let mut headers = vec![
        ("x-ms-version", "2014-02-14"),
        ("x-ms-date", "Wed, 01 Jan 2014 00:00:00 GMT"),
        ("x-ms-lease-action", "acquire"),
        ("x-ms-lease-duration", "15"),
        ("content-type", "application/xml"),
    ];

    let build = |headers: &[(&str, &str)]| {
        headers.iter().fold(
            SigningRequest::new(Method::PUT).with_path_segments(["/", "c"]),
            |req, (k, v)| req.with_header(k, v).unwrap(),
        )
    };
    let expected = string_to_sign(&build(&headers), ACCOUNT_NAME, None).unwrap();

    let mut rng = rand::thread_rng();
    for _ in 0..32 {
        headers.shuffle(&mut rng);
        assert_eq!(string_to_sign(&build(&headers), ACCOUNT_NAME, None).unwrap(), expected);
    }
}

#[test]
fn test_empty_query_ends_with_newline() {
    let req = SigningRequest::new(Method::DELETE)
        .with_path_segments(["/", "test-queue/", "messages"])
        .with_header("x-ms-date", "Wed, 01 Jan 2014 00:00:00 GMT")
        .unwrap();

    let s = string_to_sign(&req, ACCOUNT_NAME, None).unwrap();
    assert_eq!(
        s,
        "DELETE\n\n\n\n\n\n\n\n\n\n\n\n\
         x-ms-date:Wed, 01 Jan 2014 00:00:00 GMT\n\
         /devstoreaccount1/test-queue/messages\n"
    );
}

#[test]
fn test_empty_key_is_rejected() {
    let err = sign(&container_request(), ACCOUNT_NAME, b"", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    assert!(err.is_credential_error());
}

#[tokio::test]
async fn test_signer_signs_body_length() {
    let body = "<QueueMessage><MessageText>aGVsbG8=</MessageText></QueueMessage>";
    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new(ACCOUNT_NAME, key()),
        RequestSigner::new().with_service_version("2014-02-14"),
    );

    let (mut parts, _) =
        http::Request::post("http://127.0.0.1:10001/devstoreaccount1/test-queue/messages")
            .header("x-ms-date", "Wed, 01 Jan 2014 00:00:00 GMT")
            .body(body)
            .unwrap()
            .into_parts();
    parts.extensions.insert(ContentLength(body.len() as u64));
    signer.sign(&mut parts).await.unwrap();

    let req = SigningRequest::build(&parts).unwrap();
    let length = body.len().to_string();
    let with_length = sign(&req, ACCOUNT_NAME, &key(), Some(length.as_str())).unwrap();
    let without_length = sign(&req, ACCOUNT_NAME, &key(), None).unwrap();
    assert_ne!(with_length, without_length);

    let authorization = parts.headers[http::header::AUTHORIZATION].to_str().unwrap();
    assert_eq!(authorization, format_authorization(ACCOUNT_NAME, &with_length));
}
