use std::sync::Arc;

use actix_web::test;
use backend_test_support::envelope::json_body;

use crate::support::create_test_app;
use crate::support::fake_store::FakeStore;

#[actix_web::test]
async fn test_health_without_database() {
    let app = create_test_app(Arc::new(FakeStore::new()))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/_health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert!(resp.headers().contains_key("x-request-id"));
    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "not_configured");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body.get("db_error").is_none());
    assert!(body["time"].is_string());
}

#[actix_web::test]
async fn test_health_is_not_an_alias_lookup() {
    let store = Arc::new(FakeStore::new());
    store.fail_all();
    let app = create_test_app(store).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/_health").to_request();
    let body = json_body(test::call_service(&app, req).await).await;

    assert_eq!(body["status"], "ok");
}
