//! Admin media uploads.

#![allow(clippy::unwrap_used)]

use bikesdeal_core::media::MAX_IMAGE_BYTES;
use bikesdeal_integration_tests::TestContext;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

fn image_form(name: &str, mime: &str, bytes: Vec<u8>) -> Form {
    Form::new().text("type", "image").part(
        "file",
        Part::bytes(bytes)
            .file_name(name.to_owned())
            .mime_str(mime)
            .unwrap(),
    )
}

#[tokio::test]
async fn test_upload_list_and_serve() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/upload"))
        .multipart(image_form("my-logo.png", "image/png", b"\x89PNG".to_vec()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["filename"], "logo.png");
    assert_eq!(body["id"], "logo.png");
    assert_eq!(body["type"], "image/png");
    let url = body["url"].as_str().unwrap().to_owned();

    let list: Value = ctx
        .client
        .get(ctx.url("/api/upload?type=image"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["files"].as_array().unwrap().len(), 1);
    assert_eq!(list["files"][0]["type"], "image/png");

    let served = ctx.client.get(ctx.url(&url)).send().await.unwrap();
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.bytes().await.unwrap().as_ref(), b"\x89PNG");
}

#[tokio::test]
async fn test_oversized_upload_writes_nothing() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/upload"))
        .multipart(image_form(
            "bike.jpg",
            "image/jpeg",
            vec![0_u8; MAX_IMAGE_BYTES + 1],
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);

    assert!(!ctx.uploads.path().join("images").exists());
}

#[tokio::test]
async fn test_disallowed_type_rejected() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/upload"))
        .multipart(image_form("notes.txt", "text/plain", b"hello".to_vec()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_image_with_html_extension_rejected() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/upload"))
        .multipart(image_form("promo.html", "image/png", b"<script>".to_vec()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(!ctx.uploads.path().join("images").exists());
}

#[tokio::test]
async fn test_delete_missing_upload_is_not_found() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let resp = ctx
        .client
        .delete(ctx.url("/api/upload?filename=ghost.png&type=image"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "File not found");

    let resp = ctx
        .client
        .delete(ctx.url("/api/upload?type=image"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_requires_session() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .post(ctx.url("/api/upload"))
        .multipart(image_form("logo.png", "image/png", b"png".to_vec()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
