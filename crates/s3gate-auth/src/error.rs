//! Authentication error types.

use thiserror::Error;

/// Errors produced while verifying request signatures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// The Authorization header is malformed.
    #[error("malformed Authorization header: {0}")]
    MalformedAuthorization(String),

    /// The signing algorithm is not supported.
    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The credential scope is not of the form `AKID/date/region/service/aws4_request`.
    #[error("invalid credential scope")]
    InvalidCredential,

    /// A required query parameter is missing or malformed.
    #[error("missing query parameter: {0}")]
    MissingQueryParam(String),

    /// A signed header named in the signature is absent from the request.
    #[error("missing signed header: {0}")]
    MissingHeader(String),

    /// The access key is not known to the credential provider.
    #[error("unknown access key: {0}")]
    UnknownAccessKey(String),

    /// The request timestamp is outside the allowed clock-skew window.
    #[error("request time too skewed: {0}")]
    RequestTimeTooSkewed(String),

    /// A presigned URL's validity window has passed.
    #[error("request has expired")]
    RequestExpired,

    /// The computed signature does not match the one supplied.
    #[error("signature does not match")]
    SignatureDoesNotMatch,

    /// A chunk signature in a streaming-signed body does not match.
    #[error("chunk signature does not match at chunk {0}")]
    ChunkSignatureDoesNotMatch(u64),
}
