//! Middleware that answers one fixed path itself.

use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::ContentType;
use actix_web::{Error, HttpResponse};
use futures::future::LocalBoxFuture;

pub const DEFAULT_BLOCKED_PATH: &str = "/middleware";
pub const DEFAULT_BLOCKED_BODY: &str = "middleware";

/// Requests whose path equals `path` exactly (case-sensitive, no trailing
/// slash folding) get `body` as a `200 text/plain` response; all other
/// requests reach the wrapped service unchanged.
#[derive(Clone, Debug)]
pub struct BlockingPath {
    path: Arc<str>,
    body: Arc<str>,
}

impl BlockingPath {
    pub fn new(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            path: Arc::from(path.into()),
            body: Arc::from(body.into()),
        }
    }
}

impl Default for BlockingPath {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKED_PATH, DEFAULT_BLOCKED_BODY)
    }
}

impl<S, B> Transform<S, ServiceRequest> for BlockingPath
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type InitError = ();
    type Transform = BlockingPathMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BlockingPathMiddleware {
            service,
            path: Arc::clone(&self.path),
            body: Arc::clone(&self.body),
        }))
    }
}

pub struct BlockingPathMiddleware<S> {
    service: S,
    path: Arc<str>,
    body: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for BlockingPathMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if req.path() == &*self.path {
            let response = HttpResponse::Ok()
                .content_type(ContentType::plaintext())
                .body(self.body.to_string());
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}
