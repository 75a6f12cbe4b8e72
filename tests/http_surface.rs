//! HTTP surface smoke tests: route wiring and the health probe.

use actix_web::{test, web, App};
use sevens_server::{routes, AppState};

#[actix_web::test]
async fn health_endpoint_responds_ok() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::for_tests()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(test::call_service(
        &app,
        test::TestRequest::get().uri("/health").to_request(),
    )
    .await)
    .await;
    assert_eq!(body, "ok");
}

#[actix_web::test]
async fn ws_route_rejects_plain_get() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::for_tests()))
            .configure(routes::configure),
    )
    .await;

    // Without an upgrade handshake the websocket route is a client error,
    // not a panic or a 404.
    let req = test::TestRequest::get().uri("/ws").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}
