//! The operation taxonomy the request classifier resolves into.
//!
//! Each inbound request maps to exactly one [`S3RequestType`]. The variants
//! mirror the protocol's method + query-token matrix: sub-resource tokens
//! such as `?versioning` or `?tagging` select the corresponding read/write
//! variant, multipart identifiers (`uploadId`, `partNumber`) select the
//! multipart operations, and a `Range` header selects [`ObjectReadRange`].
//!
//! [`ObjectReadRange`]: S3RequestType::ObjectReadRange

/// The resource level a request addresses, implied by the presence of a
/// bucket name and an object key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceLevel {
    /// No bucket, no key.
    Service,
    /// Bucket present, no key.
    Bucket,
    /// Bucket and key present.
    Object,
}

/// Every operation the gateway can classify an HTTP request into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum S3RequestType {
    /// HEAD at the service root: liveness probe against the endpoint.
    ServiceExists,
    /// GET at the service root: enumerate buckets.
    ListBuckets,

    /// PUT on a bucket: create the bucket.
    BucketWrite,
    /// PUT on a bucket with `?versioning`.
    BucketWriteVersioning,
    /// PUT on a bucket with `?tagging`.
    BucketWriteTagging,
    /// PUT on a bucket with `?acl`.
    BucketWriteAcl,
    /// PUT on a bucket with `?logging`.
    BucketWriteLogging,
    /// PUT on a bucket with `?website`.
    BucketWriteWebsite,
    /// GET on a bucket: list objects.
    BucketRead,
    /// GET on a bucket with `?versioning`.
    BucketReadVersioning,
    /// GET on a bucket with `?versions`: list object versions.
    BucketReadVersions,
    /// GET on a bucket with `?tagging`.
    BucketReadTagging,
    /// GET on a bucket with `?acl`.
    BucketReadAcl,
    /// GET on a bucket with `?location`.
    BucketReadLocation,
    /// GET on a bucket with `?logging`.
    BucketReadLogging,
    /// GET on a bucket with `?website`.
    BucketReadWebsite,
    /// GET on a bucket with `?uploads`: list in-progress multipart uploads.
    BucketReadMultipartUploads,
    /// HEAD on a bucket.
    BucketExists,
    /// DELETE on a bucket.
    BucketDelete,
    /// DELETE on a bucket with `?tagging`.
    BucketDeleteTagging,
    /// DELETE on a bucket with `?website`.
    BucketDeleteWebsite,
    /// POST on a bucket with `?delete`: delete multiple objects named in the
    /// request body. Classified at bucket level; dispatched to the object
    /// callback group because it operates on object keys.
    DeleteMultiple,

    /// PUT on an object: store the object body.
    ObjectWrite,
    /// PUT on an object with `?acl`.
    ObjectWriteAcl,
    /// PUT on an object with `?tagging`.
    ObjectWriteTagging,
    /// PUT on an object with `?retention`.
    ObjectWriteRetention,
    /// PUT on an object with `?legal-hold`.
    ObjectWriteLegalHold,
    /// GET on an object: read the full body.
    ObjectRead,
    /// GET on an object with a `Range: bytes=start-end` header.
    ObjectReadRange,
    /// GET on an object with `?acl`.
    ObjectReadAcl,
    /// GET on an object with `?tagging`.
    ObjectReadTagging,
    /// GET on an object with `?retention`.
    ObjectReadRetention,
    /// GET on an object with `?legal-hold`.
    ObjectReadLegalHold,
    /// GET on an object with `?uploadId`: list uploaded parts.
    ObjectReadParts,
    /// HEAD on an object.
    ObjectExists,
    /// DELETE on an object.
    ObjectDelete,
    /// DELETE on an object with `?tagging`.
    ObjectDeleteTagging,
    /// PUT on an object with `?partNumber` and `?uploadId`.
    ObjectUploadPart,
    /// POST on an object with `?uploads`: begin a multipart upload.
    ObjectCreateMultipartUpload,
    /// POST on an object with `?uploadId`: assemble uploaded parts.
    ObjectCompleteMultipartUpload,
    /// DELETE on an object with `?uploadId`: abandon a multipart upload.
    ObjectAbortMultipartUpload,
}

impl S3RequestType {
    /// The resource level this operation addresses.
    ///
    /// The classifier guarantees the bucket/key presence on the request
    /// context is consistent with this level; a mismatch is a classification
    /// bug, never a runtime state.
    #[must_use]
    pub fn level(&self) -> ResourceLevel {
        match self {
            Self::ServiceExists | Self::ListBuckets => ResourceLevel::Service,
            Self::BucketWrite
            | Self::BucketWriteVersioning
            | Self::BucketWriteTagging
            | Self::BucketWriteAcl
            | Self::BucketWriteLogging
            | Self::BucketWriteWebsite
            | Self::BucketRead
            | Self::BucketReadVersioning
            | Self::BucketReadVersions
            | Self::BucketReadTagging
            | Self::BucketReadAcl
            | Self::BucketReadLocation
            | Self::BucketReadLogging
            | Self::BucketReadWebsite
            | Self::BucketReadMultipartUploads
            | Self::BucketExists
            | Self::BucketDelete
            | Self::BucketDeleteTagging
            | Self::BucketDeleteWebsite
            | Self::DeleteMultiple => ResourceLevel::Bucket,
            Self::ObjectWrite
            | Self::ObjectWriteAcl
            | Self::ObjectWriteTagging
            | Self::ObjectWriteRetention
            | Self::ObjectWriteLegalHold
            | Self::ObjectRead
            | Self::ObjectReadRange
            | Self::ObjectReadAcl
            | Self::ObjectReadTagging
            | Self::ObjectReadRetention
            | Self::ObjectReadLegalHold
            | Self::ObjectReadParts
            | Self::ObjectExists
            | Self::ObjectDelete
            | Self::ObjectDeleteTagging
            | Self::ObjectUploadPart
            | Self::ObjectCreateMultipartUpload
            | Self::ObjectCompleteMultipartUpload
            | Self::ObjectAbortMultipartUpload => ResourceLevel::Object,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServiceExists => "ServiceExists",
            Self::ListBuckets => "ListBuckets",
            Self::BucketWrite => "BucketWrite",
            Self::BucketWriteVersioning => "BucketWriteVersioning",
            Self::BucketWriteTagging => "BucketWriteTagging",
            Self::BucketWriteAcl => "BucketWriteAcl",
            Self::BucketWriteLogging => "BucketWriteLogging",
            Self::BucketWriteWebsite => "BucketWriteWebsite",
            Self::BucketRead => "BucketRead",
            Self::BucketReadVersioning => "BucketReadVersioning",
            Self::BucketReadVersions => "BucketReadVersions",
            Self::BucketReadTagging => "BucketReadTagging",
            Self::BucketReadAcl => "BucketReadAcl",
            Self::BucketReadLocation => "BucketReadLocation",
            Self::BucketReadLogging => "BucketReadLogging",
            Self::BucketReadWebsite => "BucketReadWebsite",
            Self::BucketReadMultipartUploads => "BucketReadMultipartUploads",
            Self::BucketExists => "BucketExists",
            Self::BucketDelete => "BucketDelete",
            Self::BucketDeleteTagging => "BucketDeleteTagging",
            Self::BucketDeleteWebsite => "BucketDeleteWebsite",
            Self::DeleteMultiple => "DeleteMultiple",
            Self::ObjectWrite => "ObjectWrite",
            Self::ObjectWriteAcl => "ObjectWriteAcl",
            Self::ObjectWriteTagging => "ObjectWriteTagging",
            Self::ObjectWriteRetention => "ObjectWriteRetention",
            Self::ObjectWriteLegalHold => "ObjectWriteLegalHold",
            Self::ObjectRead => "ObjectRead",
            Self::ObjectReadRange => "ObjectReadRange",
            Self::ObjectReadAcl => "ObjectReadAcl",
            Self::ObjectReadTagging => "ObjectReadTagging",
            Self::ObjectReadRetention => "ObjectReadRetention",
            Self::ObjectReadLegalHold => "ObjectReadLegalHold",
            Self::ObjectReadParts => "ObjectReadParts",
            Self::ObjectExists => "ObjectExists",
            Self::ObjectDelete => "ObjectDelete",
            Self::ObjectDeleteTagging => "ObjectDeleteTagging",
            Self::ObjectUploadPart => "ObjectUploadPart",
            Self::ObjectCreateMultipartUpload => "ObjectCreateMultipartUpload",
            Self::ObjectCompleteMultipartUpload => "ObjectCompleteMultipartUpload",
            Self::ObjectAbortMultipartUpload => "ObjectAbortMultipartUpload",
        }
    }
}

impl std::fmt::Display for S3RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
