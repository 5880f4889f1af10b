//! Content editing and resolution through the HTTP API.

#![allow(clippy::unwrap_used)]

use bikesdeal_integration_tests::TestContext;
use bikesdeal_site::db::{Storage, keys};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_content_edit_survives_reload() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let resp = ctx
        .client
        .put(ctx.url("/api/admin/content/hero"))
        .json(&json!({
            "title": "Hero",
            "fields": { "mainTitle": "Sell your Royal Enfield today" }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let site: Value = ctx
        .client
        .get(ctx.url("/api/site"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        site["hero"]["fields"]["mainTitle"],
        "Sell your Royal Enfield today"
    );
    // Fields without an override keep their defaults
    assert_eq!(site["hero"]["fields"]["bannerTitle"], "Just Instant Payment");

    let section: Value = ctx
        .client
        .get(ctx.url("/api/content/hero"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(section["title"], "Hero");
}

#[tokio::test]
async fn test_section_title_becomes_services_heading() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let resp = ctx
        .client
        .put(ctx.url("/api/admin/content/services"))
        .json(&json!({ "title": "Sell Fast", "content": "Cash today" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let site: Value = ctx
        .client
        .get(ctx.url("/api/site"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(site["services"]["fields"]["title"], "Sell Fast");
    assert_eq!(site["services"]["fields"]["description"], "Cash today");
}

#[tokio::test]
async fn test_hidden_section_marked_and_filtered() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    ctx.client
        .put(ctx.url("/api/admin/content/testimonials"))
        .json(&json!({ "isVisible": false }))
        .send()
        .await
        .unwrap();

    let site: Value = ctx
        .client
        .get(ctx.url("/api/site"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(site["testimonials"]["visible"], false);

    let visible: Vec<Value> = ctx
        .client
        .get(ctx.url("/api/content?visible=true"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(visible.iter().all(|s| s["id"] != "testimonials"));
}

#[tokio::test]
async fn test_legacy_content_key_is_read() {
    let storage = Storage::memory();
    storage
        .set(
            keys::LEGACY_CONTENT_SECTIONS,
            json!([{ "id": "1", "title": "Old hero", "isVisible": true, "order": 1 }]),
        )
        .await
        .unwrap();
    let ctx = TestContext::with_storage(storage).await;

    let sections: Vec<Value> = ctx
        .client
        .get(ctx.url("/api/content"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["title"], "Old hero");

    let site: Value = ctx
        .client
        .get(ctx.url("/api/site"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(site["hero"]["sectionId"], "1");
}

#[tokio::test]
async fn test_admin_content_requires_session() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .post(ctx.url("/api/admin/content/reset"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not authenticated");
}
