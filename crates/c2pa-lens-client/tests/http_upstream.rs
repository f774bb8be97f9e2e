//! Integration Tests for the HTTP backend
//!
//! These tests run the backend against an in-process stand-in for the
//! upstream core API and verify:
//! - multipart field names and file names sent to `/verify` and `/sign`
//! - optional AI-usage fields are only sent when declared
//! - transport, status and payload failures map to distinct error kinds

use axum::{extract::Multipart, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use c2pa_lens_client::{
    AiUsageDeclaration, ClientError, HttpProvenanceService, ImageUpload, ProvenanceService,
    SignRequest,
};
use c2pa_lens_core::TrainingUse;

// =============================================================================
// Test Helpers
// =============================================================================

/// Serve `router` on an ephemeral port and return its base URL
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Collect multipart fields as `name -> description`
async fn collect_fields(mut multipart: Multipart) -> Map<String, Value> {
    let mut fields = Map::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        let value = match file_name {
            Some(file_name) => {
                let bytes = field.bytes().await.unwrap();
                json!({
                    "file_name": file_name,
                    "content_type": content_type,
                    "size": bytes.len(),
                })
            }
            None => Value::String(field.text().await.unwrap()),
        };
        fields.insert(name, value);
    }
    fields
}

async fn verify_stub(multipart: Multipart) -> Json<Value> {
    let fields = collect_fields(multipart).await;
    let file_name = fields["image"]["file_name"].clone();

    Json(json!({
        "active_manifest": "urn:c2pa:1",
        "manifests": {
            "urn:c2pa:1": {
                "label": "urn:c2pa:1",
                "title": file_name,
                "signature_info": { "common_name": "Upstream Test Signer" }
            }
        },
        "validation_state": "Valid"
    }))
}

async fn sign_stub(multipart: Multipart) -> Vec<u8> {
    let fields = collect_fields(multipart).await;
    serde_json::to_vec(&fields).unwrap()
}

fn upstream_router() -> Router {
    Router::new()
        .route("/verify", post(verify_stub))
        .route("/sign", post(sign_stub))
}

fn upload() -> ImageUpload {
    ImageUpload::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "photo.jpg").with_content_type("image/jpeg")
}

// =============================================================================
// Verify
// =============================================================================

#[tokio::test]
async fn test_verify_parses_upstream_result() {
    let base_url = spawn_upstream(upstream_router()).await;
    let service = HttpProvenanceService::new(base_url).unwrap();

    let result = service.verify(upload()).await.unwrap();

    assert_eq!(result.validation_state.as_deref(), Some("Valid"));
    let active = result.active_manifest().unwrap();
    assert_eq!(active.title.as_deref(), Some("photo.jpg"));
    assert_eq!(
        active
            .signature_info
            .as_ref()
            .and_then(|s| s.common_name.as_deref()),
        Some("Upstream Test Signer")
    );
}

#[tokio::test]
async fn test_verify_non_success_status_is_rejected() {
    let router = Router::new().route(
        "/verify",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = spawn_upstream(router).await;
    let service = HttpProvenanceService::new(base_url).unwrap();

    match service.verify(upload()).await.unwrap_err() {
        ClientError::Rejected { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("Expected Rejected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_truncated_error_body_is_still_rejected() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Hand-written upstream that promises more error body than it sends
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        while !(request.ends_with(b"--\r\n") || request.ends_with(b"0\r\n\r\n")) {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 100\r\n\r\npartial")
            .await
            .unwrap();
    });

    let service = HttpProvenanceService::new(format!("http://{}", addr)).unwrap();

    match service.verify(upload()).await.unwrap_err() {
        ClientError::Rejected { status, body } => {
            assert_eq!(status, 503);
            assert!(body.starts_with("<unreadable body"), "got body {:?}", body);
        }
        other => panic!("Expected Rejected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_verify_garbage_body_is_malformed() {
    let router = Router::new().route("/verify", post(|| async { "definitely not json" }));
    let base_url = spawn_upstream(router).await;
    let service = HttpProvenanceService::new(base_url).unwrap();

    let err = service.verify(upload()).await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedPayload(_)));
}

#[tokio::test]
async fn test_unreachable_upstream_is_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = HttpProvenanceService::new(format!("http://{}", addr)).unwrap();

    let err = service.verify(upload()).await.unwrap_err();
    assert!(matches!(err, ClientError::Unavailable(_)));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let router = Router::new().route(
        "/verify",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "{}"
        }),
    );
    let base_url = spawn_upstream(router).await;
    let service =
        HttpProvenanceService::with_timeout(base_url, Duration::from_millis(200)).unwrap();

    let err = service.verify(upload()).await.unwrap_err();
    assert!(matches!(err, ClientError::Unavailable(_)));
}

// =============================================================================
// Sign
// =============================================================================

#[tokio::test]
async fn test_sign_sends_declared_fields() {
    let base_url = spawn_upstream(upstream_router()).await;
    let service = HttpProvenanceService::new(base_url).unwrap();

    let request = SignRequest::new("Sunset", upload())
        .with_ai_inference(
            AiUsageDeclaration::new(TrainingUse::Constrained)
                .with_constraints_info("no facial data"),
        )
        .with_ai_generative_training(AiUsageDeclaration::new(TrainingUse::NotAllowed));

    let signed = service.sign(request).await.unwrap();
    let fields: Map<String, Value> = serde_json::from_slice(&signed).unwrap();

    assert_eq!(fields["title"], "Sunset");
    assert_eq!(fields["image"]["file_name"], "photo.jpg");
    assert_eq!(fields["image"]["content_type"], "image/jpeg");
    assert_eq!(fields["image"]["size"], 4);
    assert_eq!(fields["ai_inference"], "constrained");
    assert_eq!(fields["ai_inference_constraints_info"], "no facial data");
    assert_eq!(fields["ai_generative_training"], "notAllowed");
    assert!(!fields.contains_key("ai_generative_training_constraints_info"));
}

#[tokio::test]
async fn test_sign_omits_undeclared_fields() {
    let base_url = spawn_upstream(upstream_router()).await;
    let service = HttpProvenanceService::new(base_url).unwrap();

    let signed = service
        .sign(SignRequest::new("Plain", ImageUpload::new(vec![1, 2], "plain.png")))
        .await
        .unwrap();
    let fields: Map<String, Value> = serde_json::from_slice(&signed).unwrap();

    let mut names: Vec<_> = fields.keys().cloned().collect();
    names.sort();
    assert_eq!(names, vec!["image", "title"]);
}
