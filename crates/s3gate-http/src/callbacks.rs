//! Callback registration.
//!
//! The gateway owns the wire protocol; storage semantics come from
//! callbacks the embedding application registers, one optional slot per
//! operation. Slots are grouped by resource level. An operation whose slot
//! is left empty answers `NotImplemented`.
//!
//! Two hooks bracket every dispatch: the pre-request hook may return a
//! response to short-circuit the pipeline, and the post-request hook
//! observes the outcome without altering it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http::Response;
use s3gate_model::{S3Error, S3RequestType};

use crate::body::GatewayBody;
use crate::context::S3Context;

/// The boxed future every callback returns.
pub type CallbackFuture =
    Pin<Box<dyn Future<Output = Result<Response<GatewayBody>, S3Error>> + Send>>;

/// A registered operation callback.
pub type Callback = Arc<dyn Fn(Arc<S3Context>) -> CallbackFuture + Send + Sync>;

/// The pre-request hook; returning `Some` short-circuits dispatch with that
/// response.
pub type PreHook = Arc<
    dyn Fn(Arc<S3Context>) -> Pin<Box<dyn Future<Output = Option<Response<GatewayBody>>> + Send>>
        + Send
        + Sync,
>;

/// The post-request hook; observes the response status after every
/// dispatch, including error responses. It runs once the response is
/// fully built but before the transport writes it out, so the write
/// itself is not yet confirmed when the hook fires.
pub type PostHook = Arc<
    dyn Fn(Arc<S3Context>, http::StatusCode) -> Pin<Box<dyn Future<Output = ()> + Send>>
        + Send
        + Sync,
>;

/// Wrap an async closure as a [`Callback`].
pub fn callback<F, Fut>(f: F) -> Option<Callback>
where
    F: Fn(Arc<S3Context>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response<GatewayBody>, S3Error>> + Send + 'static,
{
    Some(Arc::new(move |ctx| Box::pin(f(ctx))))
}

/// Wrap an async closure as a [`PreHook`].
pub fn pre_hook<F, Fut>(f: F) -> Option<PreHook>
where
    F: Fn(Arc<S3Context>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<Response<GatewayBody>>> + Send + 'static,
{
    Some(Arc::new(move |ctx| Box::pin(f(ctx))))
}

/// Wrap an async closure as a [`PostHook`].
pub fn post_hook<F, Fut>(f: F) -> Option<PostHook>
where
    F: Fn(Arc<S3Context>, http::StatusCode) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Some(Arc::new(move |ctx, status| Box::pin(f(ctx, status))))
}

/// Service-level slots.
#[derive(Default, Clone)]
pub struct ServiceCallbacks {
    /// HEAD at the service root.
    pub exists: Option<Callback>,
    /// GET at the service root.
    pub list_buckets: Option<Callback>,
}

/// Bucket-level slots.
#[derive(Default, Clone)]
pub struct BucketCallbacks {
    /// PUT bucket.
    pub write: Option<Callback>,
    /// PUT bucket `?versioning`.
    pub write_versioning: Option<Callback>,
    /// PUT bucket `?tagging`.
    pub write_tagging: Option<Callback>,
    /// PUT bucket `?acl`.
    pub write_acl: Option<Callback>,
    /// PUT bucket `?logging`.
    pub write_logging: Option<Callback>,
    /// PUT bucket `?website`.
    pub write_website: Option<Callback>,
    /// GET bucket (list objects).
    pub read: Option<Callback>,
    /// GET bucket `?versioning`.
    pub read_versioning: Option<Callback>,
    /// GET bucket `?versions`.
    pub read_versions: Option<Callback>,
    /// GET bucket `?tagging`.
    pub read_tagging: Option<Callback>,
    /// GET bucket `?acl`.
    pub read_acl: Option<Callback>,
    /// GET bucket `?location`.
    pub read_location: Option<Callback>,
    /// GET bucket `?logging`.
    pub read_logging: Option<Callback>,
    /// GET bucket `?website`.
    pub read_website: Option<Callback>,
    /// GET bucket `?uploads`.
    pub read_multipart_uploads: Option<Callback>,
    /// HEAD bucket.
    pub exists: Option<Callback>,
    /// DELETE bucket.
    pub delete: Option<Callback>,
    /// DELETE bucket `?tagging`.
    pub delete_tagging: Option<Callback>,
    /// DELETE bucket `?website`.
    pub delete_website: Option<Callback>,
}

/// Object-level slots.
#[derive(Default, Clone)]
pub struct ObjectCallbacks {
    /// PUT object.
    pub write: Option<Callback>,
    /// PUT object `?acl`.
    pub write_acl: Option<Callback>,
    /// PUT object `?tagging`.
    pub write_tagging: Option<Callback>,
    /// PUT object `?retention`.
    pub write_retention: Option<Callback>,
    /// PUT object `?legal-hold`.
    pub write_legal_hold: Option<Callback>,
    /// GET object.
    pub read: Option<Callback>,
    /// GET object with a `Range` header.
    pub read_range: Option<Callback>,
    /// GET object `?acl`.
    pub read_acl: Option<Callback>,
    /// GET object `?tagging`.
    pub read_tagging: Option<Callback>,
    /// GET object `?retention`.
    pub read_retention: Option<Callback>,
    /// GET object `?legal-hold`.
    pub read_legal_hold: Option<Callback>,
    /// GET object `?uploadId` (list parts).
    pub read_parts: Option<Callback>,
    /// HEAD object.
    pub exists: Option<Callback>,
    /// DELETE object.
    pub delete: Option<Callback>,
    /// DELETE object `?tagging`.
    pub delete_tagging: Option<Callback>,
    /// POST bucket `?delete`. Addressed at the bucket but lives here
    /// because it operates on object keys.
    pub delete_multiple: Option<Callback>,
    /// PUT object `?partNumber&uploadId`.
    pub upload_part: Option<Callback>,
    /// POST object `?uploads`.
    pub create_multipart_upload: Option<Callback>,
    /// POST object `?uploadId`.
    pub complete_multipart_upload: Option<Callback>,
    /// DELETE object `?uploadId`.
    pub abort_multipart_upload: Option<Callback>,
}

impl std::fmt::Debug for ServiceCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ServiceCallbacks(..)")
    }
}

impl std::fmt::Debug for BucketCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BucketCallbacks(..)")
    }
}

impl std::fmt::Debug for ObjectCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ObjectCallbacks(..)")
    }
}

/// The full callback table plus hooks.
#[derive(Default, Clone)]
pub struct S3Handlers {
    /// Service-level slots.
    pub service: ServiceCallbacks,
    /// Bucket-level slots.
    pub bucket: BucketCallbacks,
    /// Object-level slots.
    pub object: ObjectCallbacks,
    /// Runs before auth and dispatch; may short-circuit.
    pub pre_request: Option<PreHook>,
    /// Runs after every dispatch, once the response is built and before
    /// the transport writes it; observability only.
    pub post_request: Option<PostHook>,
}

impl std::fmt::Debug for S3Handlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Handlers")
            .field("pre_request", &self.pre_request.is_some())
            .field("post_request", &self.post_request.is_some())
            .finish_non_exhaustive()
    }
}

impl S3Handlers {
    /// The slot registered for an operation, if any.
    #[must_use]
    pub fn slot(&self, op: S3RequestType) -> Option<&Callback> {
        use S3RequestType as T;
        match op {
            T::ServiceExists => self.service.exists.as_ref(),
            T::ListBuckets => self.service.list_buckets.as_ref(),

            T::BucketWrite => self.bucket.write.as_ref(),
            T::BucketWriteVersioning => self.bucket.write_versioning.as_ref(),
            T::BucketWriteTagging => self.bucket.write_tagging.as_ref(),
            T::BucketWriteAcl => self.bucket.write_acl.as_ref(),
            T::BucketWriteLogging => self.bucket.write_logging.as_ref(),
            T::BucketWriteWebsite => self.bucket.write_website.as_ref(),
            T::BucketRead => self.bucket.read.as_ref(),
            T::BucketReadVersioning => self.bucket.read_versioning.as_ref(),
            T::BucketReadVersions => self.bucket.read_versions.as_ref(),
            T::BucketReadTagging => self.bucket.read_tagging.as_ref(),
            T::BucketReadAcl => self.bucket.read_acl.as_ref(),
            T::BucketReadLocation => self.bucket.read_location.as_ref(),
            T::BucketReadLogging => self.bucket.read_logging.as_ref(),
            T::BucketReadWebsite => self.bucket.read_website.as_ref(),
            T::BucketReadMultipartUploads => self.bucket.read_multipart_uploads.as_ref(),
            T::BucketExists => self.bucket.exists.as_ref(),
            T::BucketDelete => self.bucket.delete.as_ref(),
            T::BucketDeleteTagging => self.bucket.delete_tagging.as_ref(),
            T::BucketDeleteWebsite => self.bucket.delete_website.as_ref(),
            T::DeleteMultiple => self.object.delete_multiple.as_ref(),

            T::ObjectWrite => self.object.write.as_ref(),
            T::ObjectWriteAcl => self.object.write_acl.as_ref(),
            T::ObjectWriteTagging => self.object.write_tagging.as_ref(),
            T::ObjectWriteRetention => self.object.write_retention.as_ref(),
            T::ObjectWriteLegalHold => self.object.write_legal_hold.as_ref(),
            T::ObjectRead => self.object.read.as_ref(),
            T::ObjectReadRange => self.object.read_range.as_ref(),
            T::ObjectReadAcl => self.object.read_acl.as_ref(),
            T::ObjectReadTagging => self.object.read_tagging.as_ref(),
            T::ObjectReadRetention => self.object.read_retention.as_ref(),
            T::ObjectReadLegalHold => self.object.read_legal_hold.as_ref(),
            T::ObjectReadParts => self.object.read_parts.as_ref(),
            T::ObjectExists => self.object.exists.as_ref(),
            T::ObjectDelete => self.object.delete.as_ref(),
            T::ObjectDeleteTagging => self.object.delete_tagging.as_ref(),
            T::ObjectUploadPart => self.object.upload_part.as_ref(),
            T::ObjectCreateMultipartUpload => self.object.create_multipart_upload.as_ref(),
            T::ObjectCompleteMultipartUpload => self.object.complete_multipart_upload.as_ref(),
            T::ObjectAbortMultipartUpload => self.object.abort_multipart_upload.as_ref(),
        }
    }
}
