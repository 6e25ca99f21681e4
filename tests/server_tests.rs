//! End-to-end tests for the HTTP API.
//!
//! Requests go through the axum router with `oneshot`; fal.ai is replaced by
//! a wiremock server so the exact payload sent per mode can be asserted.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fal_studio::fal::FalClient;
use fal_studio::generation::GenerationService;
use fal_studio::server::{router, router_with_body_limit};

fn app_for(mock_server: &MockServer) -> Router {
    let client = FalClient::with_base_url("test-api-key".to_string(), mock_server.uri()).unwrap();
    router(GenerationService::new(Some(client)))
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    post_raw(app, body.to_string()).await
}

async fn post_raw(app: Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

// === Happy paths, one per mode ===

#[tokio::test]
async fn test_text_to_image_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fal-ai/flux/dev"))
        .and(header("Authorization", "Key test-api-key"))
        .and(body_json(json!({
            "prompt": "a red fox, watercolor painting, soft edges, flowing colors, paper texture",
            "image_size": {"width": 1344, "height": 768},
            "num_inference_steps": 28,
            "guidance_scale": 3.5,
            "num_images": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": [{"url": "https://fal.media/fox.png"}, {"url": "https://fal.media/other.png"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = post_json(
        app_for(&mock_server),
        json!({
            "mediaType": "text-to-image",
            "prompt": "a red fox",
            "aspectRatio": "16:9",
            "style": "watercolor"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "https://fal.media/fox.png"}));
}

#[tokio::test]
async fn test_image_to_image_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fal-ai/flux/dev/image-to-image"))
        .and(body_json(json!({
            "prompt": "make it night",
            "image_url": "data:image/png;base64,iVBORw0KGgo=",
            "image_size": {"width": 1024, "height": 1024},
            "num_inference_steps": 28,
            "guidance_scale": 3.5,
            "strength": 0.75,
            "num_images": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": [{"url": "https://fal.media/night.png"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = post_json(
        app_for(&mock_server),
        json!({
            "mediaType": "image-to-image",
            "prompt": "make it night",
            "aspectRatio": "1:1",
            "style": "unknown-style",
            "sourceImage": "data:image/png;base64,iVBORw0KGgo="
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "https://fal.media/night.png");
}

#[tokio::test]
async fn test_text_to_video_request_high_motion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fal-ai/fast-svd/text-to-video"))
        .and(body_json(json!({
            "prompt": "surfers at dawn, dynamic motion, energetic movement, seamless loop, continuous motion",
            "video_size": "landscape_16_9",
            "motion_bucket_id": 255,
            "fps": 24
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "video": {"url": "https://fal.media/surf.mp4"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = post_json(
        app_for(&mock_server),
        json!({
            "mediaType": "text-to-video",
            "prompt": "surfers at dawn",
            "aspectRatio": "16:9",
            "style": "",
            "motionStrength": "high",
            "loopable": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "https://fal.media/surf.mp4"}));
}

#[tokio::test]
async fn test_image_to_video_without_prompt_is_accepted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fal-ai/fast-svd-lcm"))
        .and(body_json(json!({
            "image_url": "https://example.com/cat.png",
            "prompt": "smooth natural motion",
            "video_size": "portrait_9_16",
            "motion_bucket_id": 180,
            "fps": 24
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "video": {"url": "https://fal.media/cat.mp4"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = post_json(
        app_for(&mock_server),
        json!({
            "mediaType": "image-to-video",
            "aspectRatio": "9:16",
            "style": "",
            "sourceImage": "https://example.com/cat.png"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "https://fal.media/cat.mp4");
}

#[tokio::test]
async fn test_large_data_url_source_image_is_accepted() {
    let mock_server = MockServer::start().await;
    let source_image = format!("data:image/jpeg;base64,{}", "A".repeat(3 * 1024 * 1024));

    Mock::given(method("POST"))
        .and(path("/fal-ai/fast-svd-lcm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "video": {"url": "https://fal.media/photo.mp4"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = post_json(
        app_for(&mock_server),
        json!({"mediaType": "image-to-video", "sourceImage": source_image}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "https://fal.media/photo.mp4"}));

    let received = mock_server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent["image_url"], source_image.as_str());
}

#[tokio::test]
async fn test_body_over_limit_is_413() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = FalClient::with_base_url("test-api-key".to_string(), mock_server.uri()).unwrap();
    let app = router_with_body_limit(GenerationService::new(Some(client)), 1024);

    let (status, body) = post_json(
        app,
        json!({
            "mediaType": "image-to-image",
            "prompt": "brighter",
            "sourceImage": format!("data:image/png;base64,{}", "A".repeat(4096))
        }),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body, json!({"error": "Request body too large"}));
}

// === Validation errors never reach the provider ===

#[tokio::test]
async fn test_missing_prompt_is_400() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, body) = post_json(
        app_for(&mock_server),
        json!({"mediaType": "text-to-image", "aspectRatio": "1:1", "style": "anime"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Prompt is required"}));
}

#[tokio::test]
async fn test_image_to_image_without_source_is_400() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, body) = post_json(
        app_for(&mock_server),
        json!({"mediaType": "image-to-image", "prompt": "sketch", "aspectRatio": "1:1"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Source image is required for this media type"})
    );
}

#[tokio::test]
async fn test_unsupported_media_type_is_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, body) = post_json(
        app_for(&mock_server),
        json!({"mediaType": "text-to-audio", "prompt": "a song"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Unsupported media type"}));
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let mock_server = MockServer::start().await;

    let (status, body) = post_raw(app_for(&mock_server), "{not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

// === Configuration and provider failures ===

#[tokio::test]
async fn test_missing_credential_is_generic_500() {
    let app = router(GenerationService::new(None));

    let (status, body) = post_json(
        app,
        json!({"mediaType": "text-to-image", "prompt": "a boat"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to generate media"}));
}

#[tokio::test]
async fn test_missing_credential_still_validates_first() {
    let app = router(GenerationService::new(None));

    let (status, body) = post_json(app, json!({"mediaType": "text-to-image"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Prompt is required");
}

#[tokio::test]
async fn test_provider_error_message_passes_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fal-ai/flux/dev"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"detail": "No GPUs available"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = post_json(
        app_for(&mock_server),
        json!({"mediaType": "text-to-image", "prompt": "a boat"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "No GPUs available"}));
}

#[tokio::test]
async fn test_rate_limit_message_passes_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "10")
                .set_body_json(json!({"detail": "Too many concurrent requests"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = post_json(
        app_for(&mock_server),
        json!({"mediaType": "text-to-video", "prompt": "a storm"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Too many concurrent requests"}));
}

#[tokio::test]
async fn test_empty_image_list_is_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"images": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = post_json(
        app_for(&mock_server),
        json!({"mediaType": "text-to-image", "prompt": "a boat"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "No media URL in provider response");
}

// === Health ===

#[tokio::test]
async fn test_health_reports_provider_configuration() {
    let mock_server = MockServer::start().await;

    for (app, configured) in [
        (app_for(&mock_server), true),
        (router(GenerationService::new(None)), false),
    ] {
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({"status": "ok", "provider_configured": configured})
        );
    }
}
