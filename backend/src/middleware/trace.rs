//! Request tracing middleware.
//!
//! Every request runs inside a task-local [`TraceId`] scope, and the same
//! identifier is stamped onto the response as a `Trace-Id` header. Domain
//! errors capture the ambient identifier when they are constructed, so an
//! error body and the response header always agree.
//!
//! Task-locals are not inherited by spawned tasks. Wrap any
//! `tokio::spawn`ed future in [`TraceId::scope`] to keep the identifier
//! visible there.

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::warn;
use uuid::Uuid;

use crate::domain::TRACE_ID_HEADER;

task_local! {
    static CURRENT: TraceId;
}

/// Correlation identifier scoped to a single request.
///
/// # Examples
/// ```
/// use backend::middleware::trace::TraceId;
///
/// async fn handler() {
///     if let Some(id) = TraceId::current() {
///         println!("trace id: {id}");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier of the request currently being served, when called
    /// inside a [`TraceId::scope`].
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `id` as the ambient trace identifier.
    ///
    /// # Examples
    /// ```
    /// use backend::middleware::trace::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id: TraceId = "00000000-0000-0000-0000-000000000000"
    ///     .parse()
    ///     .expect("valid UUID");
    /// let seen = TraceId::scope(id, async move { TraceId::current() }).await;
    /// assert_eq!(seen, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut>(id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Middleware factory stamping a fresh [`TraceId`] onto each request.
///
/// Handlers read the identifier through [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceScope<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceScope { inner: service }))
    }
}

/// Service produced by [`Trace`]. Not constructed directly.
pub struct TraceScope<S> {
    inner: S,
}

impl<S, B> Service<ServiceRequest> for TraceScope<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let id = TraceId::fresh();
        let fut = self.inner.call(req);
        Box::pin(TraceId::scope(id, async move {
            let mut res = fut.await?;
            stamp(res.response_mut().headers_mut(), id);
            Ok(res)
        }))
    }
}

fn stamp(headers: &mut HeaderMap, id: TraceId) {
    let name = HeaderName::from_bytes(TRACE_ID_HEADER.as_bytes());
    let value = HeaderValue::from_str(&id.to_string());
    if let (Ok(name), Ok(value)) = (name, value) {
        headers.insert(name, value);
    } else {
        warn!(trace_id = %id, "trace identifier could not be encoded as a header");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiResult, Error};
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};

    #[tokio::test]
    async fn scope_exposes_the_identifier() {
        let expected = TraceId::fresh();
        let seen = TraceId::scope(expected, async move { TraceId::current() }).await;
        assert_eq!(seen, Some(expected));
    }

    #[tokio::test]
    async fn current_is_none_outside_a_scope() {
        assert!(TraceId::current().is_none());
    }

    #[test]
    fn identifiers_parse_and_print_the_same_uuid() {
        let uuid = Uuid::nil().to_string();
        let id: TraceId = uuid.parse().expect("parse uuid");
        assert_eq!(id.to_string(), uuid);
    }

    async fn traced_response<F, Fut, Res>(handler: F) -> (ServiceResponse, String)
    where
        F: Fn() -> Fut + Clone + 'static,
        Fut: Future<Output = Res> + 'static,
        Res: actix_web::Responder + 'static,
    {
        let app =
            actix_test::init_service(App::new().wrap(Trace).route("/", web::get().to(handler)))
                .await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace header")
            .to_str()
            .expect("ascii header")
            .to_owned();
        (res, header)
    }

    #[actix_web::test]
    async fn responses_carry_a_parseable_trace_header() {
        let (_, header) = traced_response(|| async { HttpResponse::Ok().finish() }).await;
        header.parse::<TraceId>().expect("header is a UUID");
    }

    #[actix_web::test]
    async fn handlers_observe_the_header_identifier() {
        let (res, header) = traced_response(|| async {
            let id = TraceId::current().expect("trace id in scope");
            HttpResponse::Ok().body(id.to_string())
        })
        .await;
        let body = actix_test::read_body(res).await;
        assert_eq!(header.as_bytes(), body.as_ref());
    }

    #[actix_web::test]
    async fn error_bodies_agree_with_the_response_header() {
        let (res, header) = traced_response(|| async {
            ApiResult::<HttpResponse>::Err(Error::forbidden("not permitted to do anything"))
        })
        .await;
        let body: Error = actix_test::read_body_json(res).await;
        assert_eq!(body.trace_id(), Some(header.as_str()));
    }
}
