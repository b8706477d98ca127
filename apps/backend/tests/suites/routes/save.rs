use std::sync::Arc;

use actix_web::test;
use backend_test_support::envelope::{assert_error_envelope, assert_ok_envelope};
use backend_test_support::unique_helpers::{unique_alias, unique_url};
use serde_json::json;
use url_shortener::http::request::MAX_BODY_BYTES;
use url_shortener::services::aliases::SAVE_FAILED;
use uuid::Uuid;

use crate::support::auth::{bearer, valid_token};
use crate::support::create_test_app;
use crate::support::fake_permissions::FakePermissions;
use crate::support::fake_store::FakeStore;

fn admin_header() -> (&'static str, String) {
    bearer(&valid_token(Uuid::new_v4()))
}

#[actix_web::test]
async fn test_save_with_requested_alias() {
    let store = Arc::new(FakeStore::new());
    let app = create_test_app(store.clone())
        .with_permissions(Arc::new(FakePermissions::admin()))
        .with_prod_routes()
        .build()
        .await;
    let alias = unique_alias("save");
    let url = unique_url("save");

    let req = test::TestRequest::post()
        .uri("/save")
        .insert_header(admin_header())
        .set_json(json!({"url": url, "alias": alias}))
        .to_request();
    assert_ok_envelope(test::call_service(&app, req).await).await;

    assert_eq!(store.url_of(&alias), Some(url));
}

#[actix_web::test]
async fn test_save_generates_alias_of_configured_length() {
    let store = Arc::new(FakeStore::new());
    let app = create_test_app(store.clone())
        .with_permissions(Arc::new(FakePermissions::admin()))
        .with_alias_length(12)
        .with_prod_routes()
        .build()
        .await;

    for body in [
        json!({"url": "https://example.com/a"}),
        json!({"url": "https://example.com/b", "alias": ""}),
    ] {
        let req = test::TestRequest::post()
            .uri("/save")
            .insert_header(admin_header())
            .set_json(body)
            .to_request();
        assert_ok_envelope(test::call_service(&app, req).await).await;
    }

    let req = test::TestRequest::get().uri("/").to_request();
    let records: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(records.len(), 2);
    for record in records {
        let alias = record["alias"].as_str().unwrap();
        assert_eq!(alias.len(), 12);
        assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}

#[actix_web::test]
async fn test_save_duplicate_alias_keeps_first_mapping() {
    let store = Arc::new(FakeStore::new());
    store.insert("taken", "https://example.com/first");
    let app = create_test_app(store.clone())
        .with_permissions(Arc::new(FakePermissions::admin()))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/save")
        .insert_header(admin_header())
        .set_json(json!({"url": "https://example.com/second", "alias": "taken"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_envelope(resp, 200, &["alias already exists"]).await;
    assert_eq!(store.url_of("taken").as_deref(), Some("https://example.com/first"));
}

#[actix_web::test]
async fn test_save_rejects_bad_bodies() {
    let store = Arc::new(FakeStore::new());
    let app = create_test_app(store.clone())
        .with_permissions(Arc::new(FakePermissions::admin()))
        .with_prod_routes()
        .build()
        .await;

    let cases: Vec<(&[u8], Vec<&str>)> = vec![
        (b"", vec!["empty request"]),
        (b"   \n", vec!["empty request"]),
        (b"{not json", vec!["failed to decode request"]),
        (b"{\"url\": 42}", vec!["failed to decode request"]),
        (b"{}", vec!["field Url is a required field"]),
        (
            b"{\"url\": \"nope\", \"alias\": \"has space\"}",
            vec![
                "field Url is not a valid URL",
                "field Alias is not a valid alphanumeric string",
            ],
        ),
    ];

    for (body, expected) in cases {
        let req = test::TestRequest::post()
            .uri("/save")
            .insert_header(admin_header())
            .insert_header(("Content-Type", "application/json"))
            .set_payload(body.to_vec())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_envelope(resp, 200, &expected).await;
    }

    assert_eq!(store.writes(), 0);
}

#[actix_web::test]
async fn test_save_overlong_alias_is_not_valid() {
    let app = create_test_app(Arc::new(FakeStore::new()))
        .with_permissions(Arc::new(FakePermissions::admin()))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/save")
        .insert_header(admin_header())
        .set_json(json!({"url": "https://example.com", "alias": "a".repeat(65)}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_envelope(resp, 200, &["field Alias is not valid"]).await;
}

#[actix_web::test]
async fn test_save_storage_failure_is_generic() {
    let store = Arc::new(FakeStore::new());
    store.fail_all();
    let app = create_test_app(store)
        .with_permissions(Arc::new(FakePermissions::admin()))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/save")
        .insert_header(admin_header())
        .set_json(json!({"url": "https://example.com", "alias": "abc"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_envelope(resp, 200, &[SAVE_FAILED]).await;
}

#[actix_web::test]
async fn test_save_is_post_only() {
    let app = create_test_app(Arc::new(FakeStore::new()))
        .with_permissions(Arc::new(FakePermissions::admin()))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/save")
        .insert_header(admin_header())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 405);
}

#[actix_web::test]
async fn test_save_rejects_url_with_control_characters() {
    let store = Arc::new(FakeStore::new());
    let app = create_test_app(store.clone())
        .with_permissions(Arc::new(FakePermissions::admin()))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/save")
        .insert_header(admin_header())
        .set_json(json!({"url": "https://example.com/a\nb", "alias": "nl1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_envelope(resp, 200, &["field Url is not a valid URL"]).await;
    assert_eq!(store.writes(), 0);
    assert_eq!(store.url_of("nl1"), None);
}

#[actix_web::test]
async fn test_save_oversized_body_from_admin_is_a_decode_error() {
    let store = Arc::new(FakeStore::new());
    let app = create_test_app(store.clone())
        .with_permissions(Arc::new(FakePermissions::admin()))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/save")
        .insert_header(admin_header())
        .insert_header(("Content-Type", "application/json"))
        .set_payload(vec![b' '; MAX_BODY_BYTES + 1])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_envelope(resp, 200, &["failed to decode request"]).await;
    assert_eq!(store.writes(), 0);
}
