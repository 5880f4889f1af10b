//! Lead submission and review, and the contact form.

#![allow(clippy::unwrap_used)]

use bikesdeal_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::{Value, json};

fn lead_payload() -> Value {
    json!({
        "ownerInfo": {
            "name": "Ravi Kumar",
            "email": "Ravi@Example.com ",
            "phone": "+91 98765 43210",
            "address": "Pune"
        },
        "bikeDetails": {
            "brand": "Royal Enfield",
            "model": "Classic 350",
            "year": 2020,
            "kmDriven": 18000,
            "fuelType": "Petrol",
            "registrationState": "MH",
            "expectedPrice": 145000.0
        }
    })
}

async fn submit_lead(ctx: &TestContext) -> Value {
    let resp = ctx
        .client
        .post(ctx.url("/api/leads"))
        .json(&lead_payload())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    body["lead"].clone()
}

#[tokio::test]
async fn test_approve_twice_is_idempotent() {
    let ctx = TestContext::new().await;
    let lead = submit_lead(&ctx).await;
    let id = lead["id"].as_str().unwrap();
    assert_eq!(lead["status"], "pending");
    assert_eq!(lead["ownerInfo"]["email"], "ravi@example.com");

    ctx.login().await;
    let mut results = Vec::new();
    for _ in 0..2 {
        let resp = ctx
            .client
            .put(ctx.url(&format!("/api/admin/leads/{id}/status")))
            .json(&json!({ "status": "approved" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.unwrap();
        results.push(body["lead"].clone());
    }
    assert_eq!(results[0], results[1]);
    assert_eq!(results[1]["status"], "approved");

    let dashboard: Value = ctx
        .client
        .get(ctx.url("/api/admin/dashboard"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(dashboard["leads"]["approved"], 1);
    assert_eq!(dashboard["leads"]["pending"], 0);
    assert_eq!(dashboard["analytics"]["thisMonth"], 1);
    assert_eq!(dashboard["analytics"]["averagePrice"], 145_000.0);
    assert_eq!(dashboard["analytics"]["topBrands"][0]["brand"], "Royal Enfield");
}

#[tokio::test]
async fn test_lead_with_text_numbers_accepted() {
    let ctx = TestContext::new().await;
    let mut payload = lead_payload();
    payload["bikeDetails"]["year"] = json!("2020");
    payload["bikeDetails"]["kmDriven"] = json!("15000");
    payload["bikeDetails"]["expectedPrice"] = json!("95000");

    let resp = ctx
        .client
        .post(ctx.url("/api/leads"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["lead"]["bikeDetails"]["kmDriven"], 15_000);
    assert_eq!(body["lead"]["bikeDetails"]["year"], 2020);
}

#[tokio::test]
async fn test_lead_filters_and_delete() {
    let ctx = TestContext::new().await;
    let lead = submit_lead(&ctx).await;
    let id = lead["id"].as_str().unwrap().to_owned();
    ctx.login().await;

    let list: Value = ctx
        .client
        .get(ctx.url("/api/admin/leads?status=pending&search=classic"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["total"], 1);

    let resp = ctx
        .client
        .get(ctx.url("/api/admin/leads?status=sold"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = ctx
        .client
        .delete(ctx.url(&format!("/api/admin/leads/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .get(ctx.url(&format!("/api/admin/leads/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_lead_rejected() {
    let ctx = TestContext::new().await;
    let mut payload = lead_payload();
    payload["bikeDetails"]["brand"] = json!("  ");

    let resp = ctx
        .client
        .post(ctx.url("/api/leads"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_contact_submission_reaches_admin() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .post(ctx.url("/api/contact"))
        .json(&json!({
            "name": "Asha",
            "email": "asha@example.com",
            "message": "Do you buy scooters?"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    let id = body["submissionId"].as_str().unwrap().to_owned();

    let resp = ctx
        .client
        .post(ctx.url("/api/contact"))
        .json(&json!({ "name": "Asha", "email": "not an email", "message": "hi" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    ctx.login().await;
    let resp = ctx
        .client
        .put(ctx.url(&format!("/api/admin/contacts/{id}/status")))
        .json(&json!({ "status": "read" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let list: Value = ctx
        .client
        .get(ctx.url("/api/admin/contacts"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["total"], 1);
    assert_eq!(list["submissions"][0]["status"], "read");
}
