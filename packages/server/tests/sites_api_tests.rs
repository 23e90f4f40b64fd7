//! Integration tests for the site HTTP API.
//!
//! Covers:
//! - POST/GET/PUT /sites status codes and error bodies
//! - GET /sites summary projection
//! - GET /sites/:slug/render
//! - Legacy records already on disk

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use cardsite::MemoryStorage;
use serde_json::json;
use test_context::test_context;

use crate::common::{create_site, full_site, legacy_site, listed_slugs, minimal_site, TestHarness};

// =============================================================================
// Create / Get
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn create_get_then_duplicate_conflicts(ctx: &TestHarness) {
    let client = ctx.http();
    let payload = json!({"name": "Test", "slug": "test", "status": "draft", "cards": []});

    let created = client.post("/sites", &payload).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["slug"], "test");
    assert!(created.body["id"].as_str().unwrap().starts_with("site-"));
    assert!(created.body["meta"]["createdAt"].is_string());

    let fetched = client.get("/sites/test").await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created.body);

    let duplicate = client.post("/sites", &payload).await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body, json!({"error": "Slug already exists"}));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_slug_is_not_found(ctx: &TestHarness) {
    let result = ctx.http().get("/sites/nope").await;

    assert_eq!(result.status, StatusCode::NOT_FOUND);
    assert_eq!(result.body, json!({"error": "Site not found"}));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn slug_lookup_is_case_sensitive(ctx: &TestHarness) {
    let client = ctx.http();
    create_site(&client, &minimal_site("mixed")).await;

    assert_eq!(client.get("/sites/MIXED").await.status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn invalid_payload_reports_every_issue(ctx: &TestHarness) {
    let result = ctx
        .http()
        .post(
            "/sites",
            &json!({"slug": "Not Valid", "status": "archived", "cards": [{"type": "gallery", "content": {"images": [{}]}}]}),
        )
        .await;

    assert_eq!(result.status, StatusCode::BAD_REQUEST);
    assert_eq!(result.body["error"], "Invalid site payload");

    let paths: Vec<&str> = result.body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&""), "missing name not reported: {:?}", paths);
    assert!(paths.contains(&"/slug"), "{:?}", paths);
    assert!(paths.contains(&"/status"), "{:?}", paths);
    assert!(paths.contains(&"/cards/0/content/images/0"), "{:?}", paths);
    assert!(!ctx.sites_file.exists());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn malformed_json_is_a_bad_request(ctx: &TestHarness) {
    let result = ctx.http().post_raw("/sites", "{\"name\": ").await;

    assert_eq!(result.status, StatusCode::BAD_REQUEST);
    assert_eq!(result.body["error"], "Invalid site payload");
    assert_eq!(result.body["details"][0]["path"], "");
    assert!(result.body["details"][0]["message"].is_string());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn legacy_payload_is_normalized_on_create(ctx: &TestHarness) {
    let client = ctx.http();
    let created = create_site(&client, &legacy_site("imported")).await;

    assert_eq!(created["slug"], "imported");
    assert_eq!(created["cards"][0]["content"]["headline"], "Old headline");
    assert!(created["cards"][0].get("data").is_none());

    let raw = ctx.read_raw().unwrap();
    assert_eq!(raw[0]["slug"], "imported");
    assert!(raw[0]["cards"][0].get("data").is_none());
}

// =============================================================================
// List
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn list_returns_summaries_in_stored_order(ctx: &TestHarness) {
    let client = ctx.http();
    create_site(&client, &full_site("zeta")).await;
    create_site(&client, &minimal_site("alpha")).await;

    let result = client.get("/sites").await;
    assert_eq!(result.status, StatusCode::OK);

    let first = result.body[0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["id", "name", "slug", "status"]);
    assert_eq!(result.body[0]["status"], "published");
    assert_eq!(result.body[1]["status"], "draft");

    assert_eq!(listed_slugs(&client).await, vec!["zeta", "alpha"]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn empty_collection_lists_nothing(ctx: &TestHarness) {
    let result = ctx.http().get("/sites").await;
    assert_eq!(result.status, StatusCode::OK);
    assert_eq!(result.body, json!([]));
}

// =============================================================================
// Replace
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn replace_keeps_position_and_drops_old_fields(ctx: &TestHarness) {
    let client = ctx.http();
    create_site(&client, &minimal_site("a")).await;
    create_site(&client, &full_site("b")).await;
    create_site(&client, &minimal_site("c")).await;

    let result = client
        .put("/sites/b", &json!({"name": "B2", "slug": "b", "cards": []}))
        .await;
    assert_eq!(result.status, StatusCode::OK);
    assert_eq!(result.body["name"], "B2");
    assert!(result.body.get("theme").is_none());
    assert_eq!(result.body["cards"], json!([]));

    assert_eq!(listed_slugs(&client).await, vec!["a", "b", "c"]);
    assert_eq!(client.get("/sites/b").await.body["name"], "B2");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn replace_can_rename_to_a_free_slug(ctx: &TestHarness) {
    let client = ctx.http();
    create_site(&client, &minimal_site("old-name")).await;

    let result = client.put("/sites/old-name", &minimal_site("new-name")).await;
    assert_eq!(result.status, StatusCode::OK);

    assert_eq!(client.get("/sites/old-name").await.status, StatusCode::NOT_FOUND);
    assert_eq!(client.get("/sites/new-name").await.status, StatusCode::OK);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn replace_errors(ctx: &TestHarness) {
    let client = ctx.http();
    create_site(&client, &minimal_site("a")).await;
    create_site(&client, &minimal_site("b")).await;

    let missing = client.put("/sites/nope", &minimal_site("nope")).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let taken = client.put("/sites/a", &minimal_site("b")).await;
    assert_eq!(taken.status, StatusCode::CONFLICT);

    let invalid = client.put("/sites/a", &json!({"slug": "a"})).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.body["details"][0]["path"], "");

    // Nothing changed
    assert_eq!(client.get("/sites/a").await.body["name"], "Site a");
}

// =============================================================================
// Render
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn render_orders_cards_and_resolves_theme(ctx: &TestHarness) {
    let client = ctx.http();
    create_site(
        &client,
        &json!({
            "name": "Ordered",
            "slug": "ordered",
            "theme": {"primary": "#111"},
            "cards": [
                {"id": "A", "type": "text", "order": 2, "content": {"body": "a"}},
                {"id": "B", "type": "quote", "order": 0, "content": {"quote": "b"}},
                {"id": "C", "type": "slideshow", "order": 1}
            ]
        }),
    )
    .await;

    let result = client.get("/sites/ordered/render").await;
    assert_eq!(result.status, StatusCode::OK);

    let ids: Vec<&str> = result.body["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["B", "C", "A"]);
    assert_eq!(result.body["blocks"][1]["type"], "unsupported");
    assert_eq!(result.body["theme"]["bg"], "#111");
    assert_eq!(result.body["theme"]["secondary"], "#111");
    assert_eq!(result.body["theme"]["highlight"], "#2563eb");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn render_unknown_site_is_not_found(ctx: &TestHarness) {
    let result = ctx.http().get("/sites/missing/render").await;
    assert_eq!(result.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Legacy data on disk
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn legacy_records_on_disk_are_served_normalized(ctx: &TestHarness) {
    ctx.seed_raw(&json!([legacy_site("from-disk")])).unwrap();
    let client = ctx.http();

    let result = client.get("/sites/from-disk").await;
    assert_eq!(result.status, StatusCode::OK);
    assert_eq!(result.body["slug"], "from-disk");
    assert_eq!(result.body["cards"][1]["content"]["body"], "Old body");

    // The meta.slug alias still counts for uniqueness
    let duplicate = client.post("/sites", &minimal_site("from-disk")).await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn out_of_band_edits_are_visible(ctx: &TestHarness) {
    let client = ctx.http();
    create_site(&client, &minimal_site("first")).await;

    ctx.seed_raw(&json!([minimal_site("replaced-on-disk")])).unwrap();

    assert_eq!(listed_slugs(&client).await, vec!["replaced-on-disk"]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unreadable_record_on_disk_does_not_block_other_sites(ctx: &TestHarness) {
    ctx.seed_raw(&json!([
        {"slug": "old", "cards": [{"type": "text", "content": "legacy string body"}]},
        minimal_site("b"),
    ]))
    .unwrap();
    let client = ctx.http();

    assert_eq!(client.get("/sites/b").await.status, StatusCode::OK);
    assert_eq!(listed_slugs(&client).await, vec!["b"]);
    create_site(&client, &minimal_site("c")).await;

    let on_disk = ctx.read_raw().unwrap();
    assert_eq!(on_disk[0]["cards"][0]["content"], "legacy string body");
    assert_eq!(on_disk[2]["slug"], "c");

    let result = client.get("/sites/old").await;
    assert_eq!(result.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn integral_float_order_is_accepted(ctx: &TestHarness) {
    let client = ctx.http();
    let payload = json!({"name": "F", "slug": "floaty", "cards": [{"type": "text", "order": 1.0}]});

    let created = create_site(&client, &payload).await;
    assert_eq!(created["cards"][0]["order"], 1);
}

// =============================================================================
// Failures, liveness, CORS
// =============================================================================

#[tokio::test]
async fn storage_failure_is_a_server_error() {
    let storage = Arc::new(MemoryStorage::new());
    let ctx = TestHarness::with_memory(storage.clone()).unwrap();
    let client = ctx.http();

    storage.set_failing(true);

    let result = client.post("/sites", &minimal_site("x")).await;
    assert_eq!(result.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(result.body, json!({"error": "Storage failure"}));

    let health = client.get("/health").await;
    assert_eq!(health.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(health.body["status"], "unhealthy");

    storage.set_failing(false);
    assert_eq!(client.get("/health").await.status, StatusCode::OK);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn corrupt_site_file_is_a_server_error(ctx: &TestHarness) {
    std::fs::create_dir_all(ctx.sites_file.parent().unwrap()).unwrap();
    std::fs::write(&ctx.sites_file, "{ not json").unwrap();

    let result = ctx.http().get("/sites").await;
    assert_eq!(result.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn liveness_and_health(ctx: &TestHarness) {
    let client = ctx.http();

    let api = client.get("/api").await;
    assert_eq!(api.status, StatusCode::OK);
    assert_eq!(api.body, json!({"status": "API running"}));

    create_site(&client, &minimal_site("one")).await;
    let health = client.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "healthy");
    assert_eq!(health.body["storage"]["sites"], 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn cors_allows_any_origin(ctx: &TestHarness) {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/sites/test")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let result = ctx.http().request(request).await;

    assert!(result.status.is_success());
    assert_eq!(
        result.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
