//! Per-request context handed to callbacks.
//!
//! The context aggregates everything the pipeline established about a
//! request: the original head, the classification, the request ID, the
//! authentication outcome, and take-once handles to the decoded body and,
//! for streaming-signed requests, the verified chunk sequence.

use std::sync::Mutex;

use bytes::Bytes;
use s3gate_auth::AuthResult;
use s3gate_model::{ListParams, S3Error, S3RequestType};

use crate::codec::Chunk;
use crate::router::RoutingContext;

/// What authentication concluded about a request.
#[derive(Debug)]
pub enum AuthOutcome {
    /// No authentication material was present.
    Unauthenticated,
    /// The request carried a valid signature.
    Authenticated(AuthResult),
    /// The request carried authentication material that did not verify.
    Invalid(S3Error),
}

impl AuthOutcome {
    /// The verified access key, when authentication succeeded.
    #[must_use]
    pub fn access_key_id(&self) -> Option<&str> {
        match self {
            Self::Authenticated(auth) => Some(&auth.access_key_id),
            Self::Unauthenticated | Self::Invalid(_) => None,
        }
    }
}

/// The immutable request context callbacks operate on.
#[derive(Debug)]
pub struct S3Context {
    /// The request head as received.
    pub parts: http::request::Parts,
    /// The classification of the request.
    pub routing: RoutingContext,
    /// The ID stamped on this request and echoed in the response.
    pub request_id: String,
    /// What authentication concluded.
    pub auth: AuthOutcome,
    body: Mutex<Option<Bytes>>,
    chunks: Mutex<Option<Vec<Chunk>>>,
}

impl S3Context {
    /// Build a context; `body` is the fully decoded request payload.
    #[must_use]
    pub fn new(
        parts: http::request::Parts,
        routing: RoutingContext,
        request_id: String,
        auth: AuthOutcome,
        body: Bytes,
    ) -> Self {
        Self {
            parts,
            routing,
            request_id,
            auth,
            body: Mutex::new(Some(body)),
            chunks: Mutex::new(None),
        }
    }

    /// Attach the verified chunk sequence of a streaming-signed body.
    #[must_use]
    pub fn with_chunks(self, chunks: Vec<Chunk>) -> Self {
        if let Ok(mut slot) = self.chunks.lock() {
            *slot = Some(chunks);
        }
        self
    }

    /// The operation this request was classified as.
    #[must_use]
    pub fn request_type(&self) -> S3RequestType {
        self.routing.request_type
    }

    /// Target bucket, when the request addresses one.
    #[must_use]
    pub fn bucket(&self) -> Option<&str> {
        self.routing.bucket.as_deref()
    }

    /// Target key, when the request addresses one.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.routing.key.as_deref()
    }

    /// Listing and multipart parameters from the query string.
    #[must_use]
    pub fn params(&self) -> &ListParams {
        &self.routing.params
    }

    /// Take the request body.
    ///
    /// The body can be consumed once; every call after the first returns
    /// empty bytes. For streaming-signed requests this is the concatenated
    /// payload; [`take_chunks`](Self::take_chunks) hands out the same data
    /// chunk by chunk instead.
    #[must_use]
    pub fn take_body(&self) -> Bytes {
        self.body
            .lock()
            .map(|mut slot| slot.take().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Take the verified chunk sequence of a streaming-signed body.
    ///
    /// Chunks come back in wire order, ending with the terminal zero-length
    /// chunk, and can be consumed once. Later calls, and calls on requests
    /// that were not streaming-signed, yield an empty iterator.
    #[must_use]
    pub fn take_chunks(&self) -> std::vec::IntoIter<Chunk> {
        self.chunks
            .lock()
            .map(|mut slot| slot.take().unwrap_or_default())
            .unwrap_or_default()
            .into_iter()
    }

    /// The `/bucket/key` path used as the `Resource` field of errors.
    #[must_use]
    pub fn resource_path(&self) -> String {
        match (self.bucket(), self.key()) {
            (Some(bucket), Some(key)) => format!("/{bucket}/{key}"),
            (Some(bucket), None) => format!("/{bucket}"),
            _ => "/".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{BaseDomainSet, route};

    fn context(method: &str, uri: &str, body: &'static [u8]) -> S3Context {
        let (parts, ()) = http::Request::builder()
            .method(method)
            .uri(uri)
            .header("host", "s3gate.local")
            .body(())
            .expect("valid request")
            .into_parts();
        let routing = route(&parts, &BaseDomainSet::new(["s3gate.local"])).expect("routable");
        S3Context::new(
            parts,
            routing,
            "req-1".to_owned(),
            AuthOutcome::Unauthenticated,
            Bytes::from_static(body),
        )
    }

    #[test]
    fn test_should_take_body_exactly_once() {
        let ctx = context("PUT", "/b/k", b"payload");
        assert_eq!(ctx.take_body().as_ref(), b"payload");
        assert!(ctx.take_body().is_empty());
        assert!(ctx.take_body().is_empty());
    }

    #[test]
    fn test_should_take_chunks_exactly_once() {
        let chunks = vec![
            Chunk {
                data: Bytes::from_static(b"part"),
                signature: None,
                is_final: false,
            },
            Chunk {
                data: Bytes::new(),
                signature: None,
                is_final: true,
            },
        ];
        let ctx = context("PUT", "/b/k", b"part").with_chunks(chunks);

        let taken: Vec<Chunk> = ctx.take_chunks().collect();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].data.as_ref(), b"part");
        assert!(taken[1].is_final);
        assert_eq!(ctx.take_chunks().count(), 0);
    }

    #[test]
    fn test_should_yield_no_chunks_for_buffered_body() {
        let ctx = context("PUT", "/b/k", b"payload");
        assert_eq!(ctx.take_chunks().count(), 0);
        assert_eq!(ctx.take_body().as_ref(), b"payload");
    }

    #[test]
    fn test_should_build_resource_path() {
        assert_eq!(context("PUT", "/b/k", b"").resource_path(), "/b/k");
        assert_eq!(context("PUT", "/b", b"").resource_path(), "/b");
        assert_eq!(context("GET", "/", b"").resource_path(), "/");
    }

    #[test]
    fn test_should_expose_routing_accessors() {
        let ctx = context("GET", "/b/k?tagging", b"");
        assert_eq!(
            ctx.request_type(),
            s3gate_model::S3RequestType::ObjectReadTagging
        );
        assert_eq!(ctx.bucket(), Some("b"));
        assert_eq!(ctx.key(), Some("k"));
        assert!(ctx.auth.access_key_id().is_none());
    }
}
