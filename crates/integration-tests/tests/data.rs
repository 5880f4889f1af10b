//! Export and import through the admin API.

#![allow(clippy::unwrap_used)]

use bikesdeal_integration_tests::TestContext;
use reqwest::{StatusCode, header};
use serde_json::{Value, json};

#[tokio::test]
async fn test_export_content_then_import_elsewhere() {
    let source = TestContext::new().await;
    source.login().await;
    source
        .client
        .put(source.url("/api/admin/content/footer"))
        .json(&json!({ "title": "Ride safe" }))
        .send()
        .await
        .unwrap();

    let resp = source
        .client
        .get(source.url("/api/admin/export?type=content"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_owned();
    assert!(disposition.starts_with("attachment; filename=\"bikesdeal-content-"));
    let bundle: Value = resp.json().await.unwrap();
    assert_eq!(bundle["type"], "content");
    assert!(bundle.get("bikeSubmissions").is_none());

    let target = TestContext::new().await;
    target.login().await;
    let resp = target
        .client
        .post(target.url("/api/admin/import"))
        .json(&bundle)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Successfully imported:")
    );

    let footer: Value = target
        .client
        .get(target.url("/api/content/footer"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(footer["title"], "Ride safe");
}

#[tokio::test]
async fn test_import_without_metadata_rejected() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/admin/import"))
        .json(&json!({ "contentSections": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_unknown_export_type_rejected() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let resp = ctx
        .client
        .get(ctx.url("/api/admin/export?type=everything"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_settings_and_background_video() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let resp = ctx
        .client
        .put(ctx.url("/api/admin/background-video"))
        .json(&json!({ "url": "/uploads/videos/bg-video.mp4", "isEnabled": true, "opacity": 3.5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["backgroundVideo"]["opacity"], 1.0);

    let resp = ctx
        .client
        .put(ctx.url("/api/admin/settings"))
        .json(&json!({ "siteName": "BikesDeal Pune" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let settings: Value = ctx
        .client
        .get(ctx.url("/api/settings"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(settings["siteName"], "BikesDeal Pune");
}
