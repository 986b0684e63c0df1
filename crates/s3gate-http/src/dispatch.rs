//! Operation dispatch.
//!
//! Runs one classified, authenticated request through the callback table.
//! The order is fixed: the pre-request hook may short-circuit with a
//! response, the authentication gate rejects unverified requests when
//! enforcement is on, then the operation's slot runs. The post-request hook
//! observes every outcome, including short-circuits and errors; it fires
//! once the response is built, before the transport writes it. A panicking
//! callback is contained and answered with `InternalError`.

use std::sync::Arc;

use futures::FutureExt;
use http::Response;
use s3gate_model::{S3Error, s3_error};
use tracing::{debug, error, warn};

use crate::body::GatewayBody;
use crate::callbacks::S3Handlers;
use crate::context::{AuthOutcome, S3Context};
use crate::response::error_response;

/// Dispatch a request to its registered callback.
///
/// `enforce_auth` gates unauthenticated and failed-auth requests; when it
/// is off the outcome is recorded on the context but never blocks dispatch.
pub async fn dispatch(
    handlers: &S3Handlers,
    ctx: Arc<S3Context>,
    enforce_auth: bool,
) -> Response<GatewayBody> {
    let response = run(handlers, &ctx, enforce_auth).await;

    if let Some(hook) = &handlers.post_request {
        hook(Arc::clone(&ctx), response.status()).await;
    }
    response
}

async fn run(
    handlers: &S3Handlers,
    ctx: &Arc<S3Context>,
    enforce_auth: bool,
) -> Response<GatewayBody> {
    if let Some(hook) = &handlers.pre_request {
        if let Some(response) = hook(Arc::clone(ctx)).await {
            debug!(request_id = %ctx.request_id, "pre-request hook short-circuited");
            return response;
        }
    }

    if enforce_auth {
        match &ctx.auth {
            AuthOutcome::Authenticated(_) => {}
            AuthOutcome::Unauthenticated => {
                warn!(request_id = %ctx.request_id, "rejecting unauthenticated request");
                return failure(ctx, s3_error!(MissingAuthenticationToken));
            }
            AuthOutcome::Invalid(err) => {
                warn!(
                    request_id = %ctx.request_id,
                    code = %err.code,
                    "rejecting request with failed authentication"
                );
                return error_response(err);
            }
        }
    }

    let op = ctx.request_type();
    let Some(callback) = handlers.slot(op) else {
        debug!(request_id = %ctx.request_id, operation = %op, "no callback registered");
        return failure(ctx, S3Error::not_implemented(op.as_str()));
    };

    match std::panic::AssertUnwindSafe(callback(Arc::clone(ctx)))
        .catch_unwind()
        .await
    {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => failure(ctx, err),
        Err(_) => {
            error!(
                request_id = %ctx.request_id,
                operation = %op,
                "callback panicked"
            );
            failure(ctx, S3Error::internal_error("unexpected fault in handler"))
        }
    }
}

/// Fill in the request ID and resource before rendering an error.
fn failure(ctx: &S3Context, mut err: S3Error) -> Response<GatewayBody> {
    if err.request_id.is_none() {
        err.request_id = Some(ctx.request_id.clone());
    }
    if err.resource.is_none() {
        err.resource = Some(ctx.resource_path());
    }
    error_response(&err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use bytes::Bytes;
    use http::StatusCode;

    use crate::callbacks::{ObjectCallbacks, callback, post_hook, pre_hook};
    use crate::response::empty_response;
    use crate::router::{BaseDomainSet, route};

    fn context(method: &str, uri: &str, auth: AuthOutcome) -> Arc<S3Context> {
        let (parts, ()) = http::Request::builder()
            .method(method)
            .uri(uri)
            .header("host", "s3gate.local")
            .body(())
            .expect("valid request")
            .into_parts();
        let routing = route(&parts, &BaseDomainSet::new(["s3gate.local"])).expect("routable");
        Arc::new(S3Context::new(
            parts,
            routing,
            "req-1".to_owned(),
            auth,
            Bytes::new(),
        ))
    }

    fn handlers_with_object_read() -> S3Handlers {
        S3Handlers {
            object: ObjectCallbacks {
                read: callback(|_ctx| async { Ok(empty_response(StatusCode::OK)) }),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_should_invoke_registered_callback() {
        let handlers = handlers_with_object_read();
        let ctx = context("GET", "/b/k", AuthOutcome::Unauthenticated);
        let response = dispatch(&handlers, ctx, false).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_should_answer_not_implemented_for_empty_slot() {
        let handlers = S3Handlers::default();
        let ctx = context("GET", "/b/k", AuthOutcome::Unauthenticated);
        let response = dispatch(&handlers, ctx, false).await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn test_should_gate_unauthenticated_request_when_enforcing() {
        let handlers = handlers_with_object_read();
        let ctx = context("GET", "/b/k", AuthOutcome::Unauthenticated);
        let response = dispatch(&handlers, ctx, true).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_should_reject_failed_authentication_when_enforcing() {
        let handlers = handlers_with_object_read();
        let ctx = context(
            "GET",
            "/b/k",
            AuthOutcome::Invalid(s3_error!(SignatureDoesNotMatch)),
        );
        let response = dispatch(&handlers, ctx, true).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_should_not_gate_when_enforcement_disabled() {
        let handlers = handlers_with_object_read();
        let ctx = context(
            "GET",
            "/b/k",
            AuthOutcome::Invalid(s3_error!(SignatureDoesNotMatch)),
        );
        let response = dispatch(&handlers, ctx, false).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_should_short_circuit_on_pre_hook_response() {
        let mut handlers = handlers_with_object_read();
        handlers.pre_request = pre_hook(|_ctx| async {
            Some(empty_response(StatusCode::TOO_MANY_REQUESTS))
        });

        let ctx = context("GET", "/b/k", AuthOutcome::Unauthenticated);
        let response = dispatch(&handlers, ctx, false).await;
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_should_run_post_hook_on_every_outcome() {
        static CALLS: AtomicU32 = AtomicU32::new(0);

        let mut handlers = S3Handlers::default();
        handlers.post_request = post_hook(|_ctx, _status| async {
            CALLS.fetch_add(1, Ordering::SeqCst);
        });
        handlers.pre_request = pre_hook(|ctx| async move {
            // Short-circuit bucket requests, let the rest through.
            ctx.key()
                .is_none()
                .then(|| empty_response(StatusCode::OK))
        });

        // Short-circuited request.
        let ctx = context("HEAD", "/b", AuthOutcome::Unauthenticated);
        dispatch(&handlers, ctx, false).await;
        // Unregistered slot.
        let ctx = context("GET", "/b/k", AuthOutcome::Unauthenticated);
        dispatch(&handlers, ctx, false).await;

        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_should_contain_panicking_callback() {
        let handlers = S3Handlers {
            object: ObjectCallbacks {
                read: callback(|_ctx| async { panic!("handler bug") }),
                ..Default::default()
            },
            ..Default::default()
        };

        let ctx = context("GET", "/b/k", AuthOutcome::Unauthenticated);
        let response = dispatch(&handlers, ctx, false).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_should_stamp_request_id_on_callback_error() {
        let handlers = S3Handlers {
            object: ObjectCallbacks {
                read: callback(|ctx| async move {
                    Err(S3Error::no_such_key(ctx.key().unwrap_or("").to_owned()))
                }),
                ..Default::default()
            },
            ..Default::default()
        };

        let ctx = context("GET", "/b/k", AuthOutcome::Unauthenticated);
        let response = dispatch(&handlers, ctx, false).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "application/xml"
        );
    }
}
