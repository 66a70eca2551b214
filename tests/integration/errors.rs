//! Status interpretation across every verb.

use super::common::{leads, LEADS_PATH};
use brush::{
    json, Attributes, BindingConfig, ErrorKind, RemoteObject, ResourceBinding, Result, Value,
};
use wiremock::matchers::{any, method};
use wiremock::{Mock, ResponseTemplate};

const STATUSES: [u16; 6] = [200, 401, 403, 404, 422, 500];

fn persisted() -> RemoteObject {
    match json!({"id": 1, "name": "Ada"}) {
        Value::Object(map) => RemoteObject::from_attributes(map),
        _ => unreachable!(),
    }
}

/// Run one operation per verb against a server that always answers `status`.
async fn run_verb(verb: &str, status: u16) -> Result<()> {
    let (server, leads) = leads().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;

    match verb {
        "GET" => leads.find(1u64).await.map(drop),
        "POST" => leads.create(Attributes::new()).await.map(drop),
        "PATCH" => leads.save(&mut persisted()).await,
        "DELETE" => leads.destroy(&mut persisted()).await,
        other => panic!("unsupported verb {other}"),
    }
}

#[tokio::test]
async fn test_status_table() {
    for verb in ["GET", "POST", "PATCH", "DELETE"] {
        for status in STATUSES {
            let result = run_verb(verb, status).await;

            match (status, result) {
                (200, Ok(())) => {}
                (401, Err(err)) => {
                    assert!(
                        matches!(err.kind, ErrorKind::Unauthorized(_)),
                        "{verb} {status}: {err}"
                    );
                    assert!(err.is_auth_error());
                }
                (403, Err(err)) => match &err.kind {
                    ErrorKind::Forbidden { method, url } => {
                        assert_eq!(method, verb);
                        assert!(url.contains(LEADS_PATH), "{verb}: {url}");
                        assert!(err.to_string().contains(verb));
                    }
                    other => panic!("{verb} 403: unexpected {other:?}"),
                },
                (404, Err(err)) => assert!(err.is_not_found(), "{verb} 404: {err}"),
                (422 | 500, Err(err)) => {
                    assert!(
                        matches!(err.kind, ErrorKind::Remote { status: s, .. } if s == status),
                        "{verb} {status}: {err}"
                    );
                }
                (status, result) => panic!("{verb} {status}: unexpected {result:?}"),
            }
        }
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let (server, leads) = leads().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = leads.find(1u64).await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Remote { status: 200, .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn test_missing_token_fails_before_any_request() {
    let (server, _) = leads().await;

    let result = BindingConfig::new(format!("{}{}", server.uri(), LEADS_PATH), "")
        .and_then(ResourceBinding::<RemoteObject>::from_config);

    let err = result.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Config(_)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let leads: ResourceBinding =
        ResourceBinding::new("http://127.0.0.1:9/api/v1/leads", "t").unwrap();

    let err = leads.find(1u64).await.unwrap_err();
    assert!(
        matches!(err.kind, ErrorKind::Transport(_) | ErrorKind::Timeout),
        "unexpected {err:?}"
    );
    assert_eq!(err.status(), None);
}
