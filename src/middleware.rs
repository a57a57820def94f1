//! Final error-logging middleware.
//!
//! Any failure that escapes the handlers without being an [`AppError`] is
//! logged here and replaced with a generic 500 so that internals never leak
//! to the client. `AppError` responses pass through untouched since the
//! controllers have already shaped them.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    Error, HttpResponse,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use serde_json::json;
use std::fmt;

use crate::error::AppError;

/// Error shown for failures nothing else claimed responsibility for.
#[derive(Debug)]
struct UnhandledError;

impl fmt::Display for UnhandledError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Internal Server Error")
    }
}

impl ResponseError for UnhandledError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError().json(json!({
            "error": { "message": "Internal Server Error" }
        }))
    }
}

pub struct ErrorLogger;

impl<S, B> Transform<S, ServiceRequest> for ErrorLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = ErrorLoggerService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorLoggerService { service }))
    }
}

pub struct ErrorLoggerService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorLoggerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().clone();
        let path = req.path().to_owned();
        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) => Ok(res),
                Err(err) => {
                    // Errors that handlers mapped to AppError already carry
                    // the right status and body.
                    if err.as_error::<AppError>().is_some() {
                        return Err(err);
                    }
                    let status = err.as_response_error().status_code();
                    if status.is_server_error() {
                        log::error!("unhandled error on {} {}: {}", method, path, err);
                        return Err(UnhandledError.into());
                    }
                    Err(err)
                }
            }
        })
    }
}
