//! HTTP-level tests against an in-memory store

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use titan_api::{build_router, AppState, ServerConfig};
use titan_forms::{sample, FormStore, InMemoryFormStore};

fn server_with(config: ServerConfig) -> TestServer {
    let store: Arc<dyn FormStore> = Arc::new(InMemoryFormStore::with_sample());
    TestServer::new(build_router(AppState::new(store, config))).unwrap()
}

fn server() -> TestServer {
    server_with(ServerConfig::default())
}

fn valid_contact() -> Value {
    json!({
        "data": {
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "contact_method": "email",
            "message": "I would like to hear more about the engine."
        }
    })
}

#[tokio::test]
async fn health_and_banner() {
    let server = server();
    let health = server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(health.json::<Value>()["status"], json!("healthy"));

    let banner = server.get("/api/").await;
    assert_eq!(banner.json::<Value>()["message"], json!("Form-Titan API is running!"));
}

#[tokio::test]
async fn get_known_and_unknown_forms() {
    let server = server();
    let found = server.get("/api/forms/contact-us-v1").await;
    assert_eq!(found.status_code(), StatusCode::OK);
    let body = found.json::<Value>();
    assert_eq!(body["formId"], json!("contact-us-v1"));
    assert_eq!(body["layoutDefinition"]["component"], json!("container"));

    let missing = server.get("/api/forms/nope").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["code"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn save_then_load_definition() {
    let server = server();
    let mut definition = serde_json::to_value(sample::contact_form()).unwrap();
    definition["formId"] = json!("contact-us-v2");
    definition["name"] = json!("Contact Us v2");

    let saved = server.put("/api/forms/contact-us-v2").json(&definition).await;
    assert_eq!(saved.status_code(), StatusCode::OK);
    assert_eq!(saved.json::<Value>()["status"], json!("success"));

    let loaded = server.get("/api/forms/contact-us-v2").await.json::<Value>();
    assert_eq!(loaded, definition);
}

#[tokio::test]
async fn save_rejects_malformed_definition() {
    let server = server();
    let mut definition = serde_json::to_value(sample::contact_form()).unwrap();
    definition["fields"][0]["validation"] = json!({"minLength": 9, "maxLength": 2});

    let response = server.put("/api/forms/contact-us-v1").json(&definition).await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["code"], json!("INVALID_BODY"));
}

#[tokio::test]
async fn save_rejects_mismatched_form_id() {
    let server = server();
    let definition = serde_json::to_value(sample::contact_form()).unwrap();
    let response = server.put("/api/forms/someone-else").json(&definition).await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["code"], json!("VALIDATION_FAILED"));
}

#[tokio::test]
async fn submit_valid_data_is_recorded() {
    let server = server();
    let response = server.post("/api/forms/contact-us-v1/submissions").json(&valid_contact()).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let receipt = response.json::<Value>();
    assert_eq!(receipt["status"], json!("success"));
    let submission_id = receipt["submissionId"].as_str().unwrap().to_string();

    let listed = server.get("/api/forms/contact-us-v1/submissions").await.json::<Value>();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["submissionId"], json!(submission_id));
    assert_eq!(listed[0]["data"]["first_name"], json!("Ada"));
}

#[tokio::test]
async fn submit_invalid_data_is_rejected_with_report() {
    let server = server();
    let response = server
        .post("/api/forms/contact-us-v1/submissions")
        .json(&json!({"data": {"email": "not-an-email", "contact_method": "email"}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.json::<Value>();
    assert_eq!(body["code"], json!("VALIDATION_FAILED"));
    let email_codes: Vec<_> = body["validation"]["errors"]["email"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["code"].clone())
        .collect();
    assert!(email_codes.contains(&json!("PATTERN_MISMATCH")));
    assert!(!email_codes.contains(&json!("REQUIRED")));
    assert_eq!(body["validation"]["hidden"], json!(["phone"]));

    let listed = server.get("/api/forms/contact-us-v1/submissions").await.json::<Value>();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn submit_to_unknown_form() {
    let response = server().post("/api/forms/nope/submissions").json(&valid_contact()).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validate_endpoint_records_nothing() {
    let server = server();
    let report = server
        .post("/api/forms/contact-us-v1/validate")
        .json(&json!({"data": {}}))
        .await
        .json::<Value>();
    assert_eq!(report["valid"], json!(false));
    assert_eq!(report["errors"]["first_name"][0]["code"], json!("REQUIRED"));
    assert_eq!(report["errors"]["phone"], json!([]));

    let listed = server.get("/api/forms/contact-us-v1/submissions").await.json::<Value>();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn listing_respects_limit() {
    let server = server_with(ServerConfig { submission_list_limit: 3, ..Default::default() });
    for _ in 0..5 {
        let response = server.post("/api/forms/contact-us-v1/submissions").json(&valid_contact()).await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let two = server.get("/api/forms/contact-us-v1/submissions").add_query_param("limit", 2).await;
    assert_eq!(two.status_code(), StatusCode::OK);
    assert_eq!(two.json::<Value>().as_array().unwrap().len(), 2);

    let clamped = server.get("/api/forms/contact-us-v1/submissions").add_query_param("limit", 50).await;
    assert_eq!(clamped.status_code(), StatusCode::OK);
    assert_eq!(clamped.json::<Value>().as_array().unwrap().len(), 3);

    let default = server.get("/api/forms/contact-us-v1/submissions").await.json::<Value>();
    assert_eq!(default.as_array().unwrap().len(), 3);
}
