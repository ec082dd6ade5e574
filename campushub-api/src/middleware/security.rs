/// Security headers middleware
///
/// Adds a fixed set of response headers to everything the server returns,
/// including files served from `/uploads`. Uploaded files are user content,
/// so the policy forbids scripts and framing outright.
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use campushub_api::middleware::security::SecurityHeadersLayer;
///
/// let app: Router = Router::new().layer(SecurityHeadersLayer::new(true));
/// ```

use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue},
    response::Response,
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::{Layer, Service};

const BASE_HEADERS: [(HeaderName, &str); 5] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
    (
        header::CONTENT_SECURITY_POLICY,
        "default-src 'none'; img-src 'self' data:; frame-ancestors 'none'; sandbox",
    ),
    (header::X_XSS_PROTECTION, "0"),
];

const HSTS: &str = "max-age=31536000; includeSubDomains";

/// Applies [`BASE_HEADERS`], plus HSTS when `production` is set.
#[derive(Debug, Clone, Copy)]
pub struct SecurityHeadersLayer {
    production: bool,
}

impl SecurityHeadersLayer {
    pub fn new(production: bool) -> Self {
        Self { production }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeaders {
            inner,
            production: self.production,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SecurityHeaders<S> {
    inner: S,
    production: bool,
}

impl<S> Service<Request> for SecurityHeaders<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let future = self.inner.call(request);
        let production = self.production;

        Box::pin(async move {
            let mut response = future.await?;
            let headers = response.headers_mut();

            for (name, value) in BASE_HEADERS {
                headers.insert(name, HeaderValue::from_static(value));
            }

            if production {
                headers.insert(header::STRICT_TRANSPORT_SECURITY, HeaderValue::from_static(HSTS));
            }

            Ok(response)
        })
    }
}
