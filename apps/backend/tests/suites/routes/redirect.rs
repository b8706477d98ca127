use std::sync::Arc;

use actix_web::http::header;
use actix_web::test;
use backend_test_support::envelope::assert_error_envelope;
use url_shortener::error::INTERNAL_ERROR;

use crate::support::create_test_app;
use crate::support::fake_store::FakeStore;

#[actix_web::test]
async fn test_redirect_to_stored_url() {
    let store = Arc::new(FakeStore::new());
    store.insert("docs", "https://example.com/docs?page=2");
    let app = create_test_app(store).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/docs").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://example.com/docs?page=2"
    );
}

#[actix_web::test]
async fn test_redirect_unknown_alias_is_not_found() {
    let app = create_test_app(Arc::new(FakeStore::new()))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/missing").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.headers().get(header::LOCATION).is_none());
    assert_error_envelope(resp, 200, &["not found"]).await;
}

#[actix_web::test]
async fn test_redirect_storage_failure_is_generic() {
    let store = Arc::new(FakeStore::new());
    store.fail_all();
    let app = create_test_app(store).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/docs").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.headers().get(header::LOCATION).is_none());
    assert_error_envelope(resp, 200, &[INTERNAL_ERROR]).await;
}

#[actix_web::test]
async fn test_redirect_unrepresentable_location_is_generic_error() {
    let store = Arc::new(FakeStore::new());
    store.insert("legacy", "https://example.com/a\nb");
    let app = create_test_app(store).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/legacy").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.headers().get(header::LOCATION).is_none());
    assert_error_envelope(resp, 200, &[INTERNAL_ERROR]).await;
}
