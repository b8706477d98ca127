//! End-to-end flows through the full middleware stack.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::test;
use backend_test_support::envelope::{assert_error_envelope, assert_ok_envelope};
use serde_json::json;
use uuid::Uuid;

use crate::support::auth::{bearer, valid_token};
use crate::support::create_test_app;
use crate::support::fake_permissions::FakePermissions;
use crate::support::fake_store::FakeStore;

#[actix_web::test]
async fn admin_saves_then_anyone_follows() {
    let store = Arc::new(FakeStore::new());
    let permissions = Arc::new(FakePermissions::admin());
    let app = create_test_app(store)
        .with_permissions(permissions.clone())
        .with_prod_routes()
        .build()
        .await;
    let uid = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/save")
        .insert_header(bearer(&valid_token(uid)))
        .set_json(json!({"url": "https://example.com", "alias": "abc123"}))
        .to_request();
    assert_ok_envelope(test::call_service(&app, req).await).await;
    assert_eq!(permissions.seen(), vec![uid.to_string()]);

    let req = test::TestRequest::get().uri("/abc123").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://example.com"
    );
}

#[actix_web::test]
async fn admin_with_empty_body() {
    let app = create_test_app(Arc::new(FakeStore::new()))
        .with_permissions(Arc::new(FakePermissions::admin()))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/save")
        .insert_header(bearer(&valid_token(Uuid::new_v4())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_envelope(resp, 200, &["empty request"]).await;
}

#[actix_web::test]
async fn non_admin_cannot_save() {
    let store = Arc::new(FakeStore::new());
    let app = create_test_app(store.clone())
        .with_permissions(Arc::new(FakePermissions::not_admin()))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/save")
        .insert_header(bearer(&valid_token(Uuid::new_v4())))
        .set_json(json!({"url": "https://example.com", "alias": "abc123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_envelope(resp, 403, &["operation does not permitted"]).await;
    assert_eq!(store.len(), 0);
}

#[actix_web::test]
async fn unknown_alias_does_not_redirect() {
    let app = create_test_app(Arc::new(FakeStore::new()))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/nonexistent-alias").to_request();
    let resp = test::call_service(&app, req).await;

    assert_ne!(resp.status(), 302);
    assert!(resp.headers().get(header::LOCATION).is_none());
    assert_error_envelope(resp, 200, &["not found"]).await;
}

#[actix_web::test]
async fn admin_with_invalid_url() {
    let store = Arc::new(FakeStore::new());
    let app = create_test_app(store.clone())
        .with_permissions(Arc::new(FakePermissions::admin()))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/save")
        .insert_header(bearer(&valid_token(Uuid::new_v4())))
        .set_json(json!({"url": "not-a-url"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_envelope(resp, 200, &["field Url is not a valid URL"]).await;
    assert_eq!(store.writes(), 0);
}
