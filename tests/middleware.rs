use actix_web::{
    App, HttpResponse,
    http::{StatusCode, header},
    test, web,
};

use pushkind_users::middleware::BlockingPath;

async fn passthrough() -> HttpResponse {
    HttpResponse::Ok().body("handler")
}

#[actix_web::test]
async fn answers_the_blocked_path_itself() {
    let app = test::init_service(
        App::new()
            .wrap(BlockingPath::default())
            .default_service(web::to(passthrough)),
    )
    .await;

    let req = test::TestRequest::get().uri("/middleware").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("text/plain; charset=utf-8")
    );
    let body = test::read_body(resp).await;
    assert_eq!(body, "middleware");
}

#[actix_web::test]
async fn other_paths_reach_the_handler() {
    let app = test::init_service(
        App::new()
            .wrap(BlockingPath::default())
            .default_service(web::to(passthrough)),
    )
    .await;

    for uri in ["/", "/users", "/middleware/", "/Middleware", "/middleware/x"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let body = test::read_body(resp).await;
        assert_eq!(body, "handler", "{uri}");
    }
}

#[actix_web::test]
async fn custom_path_and_body() {
    let app = test::init_service(
        App::new()
            .wrap(BlockingPath::new("/ping", "pong"))
            .default_service(web::to(passthrough)),
    )
    .await;

    let req = test::TestRequest::post().uri("/ping").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "pong");

    let req = test::TestRequest::get().uri("/middleware").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "handler");
}
