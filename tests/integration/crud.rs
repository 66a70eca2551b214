//! Finder and persistence round trips.

use super::common::{leads, AUTH_HEADER, LEADS_PATH, TOKEN};
use brush::{
    json, Attributes, BindingConfig, Record, RemoteObject, ResourceBinding, Value,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn attrs(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn test_find_returns_remote_attributes() {
    let (server, leads) = leads().await;
    let remote = json!({"id": 42, "name": "Ada", "score": 9.5, "tags": ["vip"]});

    Mock::given(method("GET"))
        .and(path(format!("{LEADS_PATH}/42")))
        .and(header("Authorization", AUTH_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(&remote))
        .expect(1)
        .mount(&server)
        .await;

    let lead = leads.find(42u64).await.expect("find should succeed");

    assert_eq!(lead.id().map(|id| id.as_str()), Some("42"));
    assert_eq!(Value::Object(lead.attributes().unwrap().clone()), remote);
    assert_eq!(lead.get_as::<Vec<String>>("tags").unwrap(), Some(vec!["vip".to_string()]));
}

#[tokio::test]
async fn test_reload_refreshes_attributes() {
    let (server, leads) = leads().await;

    Mock::given(method("GET"))
        .and(path(format!("{LEADS_PATH}/7")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "stage": "won"})))
        .mount(&server)
        .await;

    let mut lead = RemoteObject::from_attributes(attrs(json!({"id": 7, "stage": "new"})));
    leads.reload(&mut lead).await.unwrap();

    assert_eq!(lead.get("stage").unwrap(), Some(&json!("won")));
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_create_then_save_patches() {
    let (server, leads) = leads().await;

    Mock::given(method("POST"))
        .and(path(LEADS_PATH))
        .and(body_json(json!({"lead": {"name": "Ada"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5, "name": "Ada"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{LEADS_PATH}/5")))
        .and(body_json(json!({"lead": {"id": 5, "name": "Ada Lovelace"}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 5, "name": "Ada Lovelace"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut lead = leads.create(attrs(json!({"name": "Ada"}))).await.unwrap();
    assert_eq!(lead.id().map(|id| id.as_str()), Some("5"));

    lead.set("name", "Ada Lovelace").unwrap();
    leads.save(&mut lead).await.unwrap();

    assert_eq!(lead.get("name").unwrap(), Some(&json!("Ada Lovelace")));
}

#[tokio::test]
async fn test_batch_create_is_one_request() {
    let (server, leads) = leads().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/batch_create"))
        .and(body_json(json!({"lead": [{"name": "a"}, {"name": "b"}, {"name": "c"}]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "entries": [
                {"id": 1, "name": "a"},
                {"id": 2, "name": "b"},
                {"id": 3, "name": "c"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = leads
        .batch_create(vec![
            attrs(json!({"name": "a"})),
            attrs(json!({"name": "b"})),
            attrs(json!({"name": "c"})),
        ])
        .await
        .unwrap();

    let names: Vec<_> = created
        .iter()
        .map(|lead| lead.get_as::<String>("name").unwrap().unwrap())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[tokio::test]
async fn test_update_from_array_patches_batch_endpoint() {
    let (server, leads) = leads().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/batch_update"))
        .and(body_json(json!({"lead": [{"id": 1, "stage": "won"}, {"id": 2, "stage": "lost"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "stage": "won"},
            {"id": 2, "stage": "lost"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let updated = leads
        .update_from(json!([{"id": 1, "stage": "won"}, {"id": 2, "stage": "lost"}]))
        .await
        .unwrap()
        .into_many();

    assert_eq!(updated.len(), 2);
}

#[tokio::test]
async fn test_find_or_create_by_creates_on_miss() {
    let (server, leads) = leads().await;

    Mock::given(method("GET"))
        .and(path(LEADS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entries": []})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(LEADS_PATH))
        .and(body_json(json!({"lead": {"email": "ada@example.com"}})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 9, "email": "ada@example.com"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let lead = leads
        .find_or_create_by(json!({"email": "ada@example.com"}))
        .await
        .unwrap();

    assert_eq!(lead.id().map(|id| id.as_str()), Some("9"));
}

#[tokio::test]
async fn test_destroy_clears_object() {
    let (server, leads) = leads().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{LEADS_PATH}/3")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut lead = RemoteObject::from_attributes(attrs(json!({"id": 3, "name": "Ada"})));
    leads.delete(&mut lead).await.unwrap();

    assert!(lead.is_destroyed());
    assert!(lead.get("name").unwrap_err().is_destroyed());
    assert!(lead.set("name", "Grace").unwrap_err().is_destroyed());
}

#[tokio::test]
async fn test_destroy_accepts_plain_text_confirmation() {
    let (server, leads) = leads().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{LEADS_PATH}/8")))
        .respond_with(ResponseTemplate::new(200).set_body_string("deleted"))
        .expect(1)
        .mount(&server)
        .await;

    let mut lead = RemoteObject::from_attributes(attrs(json!({"id": 8, "name": "Ada"})));
    leads.destroy(&mut lead).await.unwrap();

    assert!(lead.is_destroyed());
    assert!(lead.attributes().unwrap_err().is_destroyed());
}

// ============================================================================
// Custom record types
// ============================================================================

#[derive(Debug)]
struct Lead(RemoteObject);

impl Lead {
    fn email(&self) -> Option<String> {
        self.0.get_as("email").ok().flatten()
    }
}

impl Record for Lead {
    fn from_remote(object: RemoteObject) -> Self {
        Lead(object)
    }

    fn remote(&self) -> &RemoteObject {
        &self.0
    }

    fn remote_mut(&mut self) -> &mut RemoteObject {
        &mut self.0
    }
}

#[tokio::test]
async fn test_collection_hydrates_custom_records() {
    let (server, _) = leads().await;

    Mock::given(method("GET"))
        .and(path(LEADS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [{"id": 1, "email": "a@x.io"}, {"id": 2, "email": "b@x.io"}]
        })))
        .mount(&server)
        .await;

    let config = BindingConfig::new(format!("{}{}", server.uri(), LEADS_PATH), TOKEN).unwrap();
    let typed: ResourceBinding<Lead> = ResourceBinding::from_config(config).unwrap();

    let all = typed.all(brush::Params::new()).await.unwrap();
    let emails: Vec<_> = all.iter().filter_map(Lead::email).collect();

    assert_eq!(emails, ["a@x.io", "b@x.io"]);
}
