use std::sync::Arc;

use actix_web::test;
use backend_test_support::envelope::{assert_error_envelope, assert_ok_envelope};
use url_shortener::error::INTERNAL_ERROR;
use uuid::Uuid;

use crate::support::auth::{bearer, valid_token};
use crate::support::create_test_app;
use crate::support::fake_permissions::FakePermissions;
use crate::support::fake_store::FakeStore;

async fn call_delete(store: Arc<FakeStore>, uri: &str) -> actix_web::dev::ServiceResponse {
    let app = create_test_app(store)
        .with_permissions(Arc::new(FakePermissions::admin()))
        .with_prod_routes()
        .build()
        .await;
    let req = test::TestRequest::get()
        .uri(uri)
        .insert_header(bearer(&valid_token(Uuid::new_v4())))
        .to_request();
    test::call_service(&app, req).await
}

#[actix_web::test]
async fn test_delete_removes_mapping() {
    let store = Arc::new(FakeStore::new());
    store.insert("gone", "https://example.com/gone");
    store.insert("kept", "https://example.com/kept");

    assert_ok_envelope(call_delete(store.clone(), "/del?alias=gone").await).await;

    assert_eq!(store.url_of("gone"), None);
    assert_eq!(store.len(), 1);
}

#[actix_web::test]
async fn test_delete_is_idempotent() {
    let store = Arc::new(FakeStore::new());

    assert_ok_envelope(call_delete(store.clone(), "/del?alias=missing").await).await;
    assert_ok_envelope(call_delete(store.clone(), "/del?alias=missing").await).await;

    assert_eq!(store.writes(), 2);
}

#[actix_web::test]
async fn test_delete_without_alias_is_invalid() {
    for uri in ["/del", "/del?alias=", "/del?other=x"] {
        let store = Arc::new(FakeStore::new());
        let resp = call_delete(store.clone(), uri).await;

        assert_error_envelope(resp, 200, &["invalid request"]).await;
        assert_eq!(store.writes(), 0, "uri {uri}");
    }
}

#[actix_web::test]
async fn test_delete_storage_failure_is_generic() {
    let store = Arc::new(FakeStore::new());
    store.fail_all();

    let resp = call_delete(store, "/del?alias=abc").await;

    assert_error_envelope(resp, 200, &[INTERNAL_ERROR]).await;
}
