//! Request classification.
//!
//! Every inbound request resolves to a [`RoutingContext`]: the addressing
//! style, the bucket and key it targets, the [`S3RequestType`] it maps to,
//! and the listing parameters it carried. Classification is driven by the
//! HTTP method, the path, the sub-resource tokens in the query string, and
//! the `Range` header.
//!
//! Bucket extraction supports both addressing forms. A host that equals a
//! configured base domain is path-style; a host that ends with
//! `.{base domain}` is virtual-hosted and the remaining prefix is the
//! bucket. Hosts matching no configured base domain fall through to an
//! optional resolver that may name the base domain the host belongs to,
//! and otherwise parse as path-style with an
//! [`AddressingStyle::Unknown`] marker.

use std::sync::Arc;

use percent_encoding::percent_decode_str;
use s3gate_model::{ByteRange, ListParams, S3Error, S3RequestType};
use tracing::debug;

/// How the request named its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingStyle {
    /// Bucket is the first path segment.
    PathStyle,
    /// Bucket is the host prefix before a configured base domain.
    VirtualHosted,
    /// Host matched no base domain; treated as path-style.
    Unknown,
}

/// Maps a host that matches no configured base domain to the base domain
/// it belongs to.
///
/// The returned domain goes through the same prefix derivation as the
/// configured ones, so a resolver never names buckets itself.
pub trait BaseDomainResolver: Send + Sync {
    /// The base domain this host falls under, if any.
    fn resolve(&self, host: &str) -> Option<String>;
}

/// The base domains the gateway answers on.
///
/// Suffixes are consulted in order; the first match wins. The optional
/// resolver handles CNAME-style hosts outside every base domain.
#[derive(Clone, Default)]
pub struct BaseDomainSet {
    suffixes: Vec<String>,
    resolver: Option<Arc<dyn BaseDomainResolver>>,
}

impl std::fmt::Debug for BaseDomainSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseDomainSet")
            .field("suffixes", &self.suffixes)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

impl BaseDomainSet {
    /// Build from an ordered list of base domains.
    #[must_use]
    pub fn new(suffixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
            resolver: None,
        }
    }

    /// Attach a resolver for hosts outside every configured base domain.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn BaseDomainResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Extract the addressing style and bucket from a `Host` header value.
    ///
    /// The port, if any, is stripped before matching.
    #[must_use]
    pub fn classify_host(&self, host: &str) -> (AddressingStyle, Option<String>) {
        let host = strip_port(host).to_ascii_lowercase();

        for suffix in &self.suffixes {
            if let Some(outcome) = split_on_base_domain(&host, suffix) {
                return outcome;
            }
        }

        if let Some(resolver) = &self.resolver {
            if let Some(domain) = resolver.resolve(&host) {
                if let Some(outcome) = split_on_base_domain(&host, &domain) {
                    return outcome;
                }
            }
        }

        (AddressingStyle::Unknown, None)
    }
}

/// Match `host` against one base domain: the domain itself is path-style,
/// a `{prefix}.{domain}` host is virtual-hosted with the prefix as bucket.
fn split_on_base_domain(host: &str, domain: &str) -> Option<(AddressingStyle, Option<String>)> {
    let domain = domain.to_ascii_lowercase();
    if host == domain {
        return Some((AddressingStyle::PathStyle, None));
    }
    let prefix = host.strip_suffix(&domain)?.strip_suffix('.')?;
    if prefix.is_empty() {
        return None;
    }
    Some((AddressingStyle::VirtualHosted, Some(prefix.to_owned())))
}

fn strip_port(host: &str) -> &str {
    // IPv6 literals keep their brackets; only a trailing :port is removed.
    if let Some(end) = host.rfind(']') {
        return &host[..=end];
    }
    host.split(':').next().unwrap_or(host)
}

/// The classification of one request.
#[derive(Debug, Clone)]
pub struct RoutingContext {
    /// How the bucket was addressed.
    pub style: AddressingStyle,
    /// Target bucket, when the request addresses one.
    pub bucket: Option<String>,
    /// Target object key, when the request addresses one.
    pub key: Option<String>,
    /// The operation this request maps to.
    pub request_type: S3RequestType,
    /// Listing and multipart parameters from the query string.
    pub params: ListParams,
    /// All query pairs, decoded, in wire order.
    pub query: Vec<(String, String)>,
}

/// Classify a request into a [`RoutingContext`].
///
/// # Errors
///
/// Returns an [`S3Error`] for methods the protocol does not use, for a
/// `Range` header that is not a single fully-bounded range, and for numeric
/// query parameters that do not parse.
pub fn route(
    parts: &http::request::Parts,
    domains: &BaseDomainSet,
) -> Result<RoutingContext, S3Error> {
    let host = parts
        .headers
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let (style, host_bucket) = domains.classify_host(host);

    let (path_bucket, path_key) = parse_path(parts.uri.path(), host_bucket.is_some());
    let (bucket, key) = if let Some(b) = host_bucket {
        (Some(b), path_bucket.or(path_key))
    } else {
        (path_bucket, path_key)
    };

    let query = parse_query_pairs(parts.uri.query().unwrap_or(""));
    let params = extract_params(&query, &parts.headers)?;
    let request_type = classify(&parts.method, bucket.as_deref(), key.as_deref(), &query, &params)?;

    debug!(
        method = %parts.method,
        ?style,
        bucket = bucket.as_deref().unwrap_or("-"),
        key = key.as_deref().unwrap_or("-"),
        operation = %request_type,
        "request classified"
    );

    Ok(RoutingContext {
        style,
        bucket,
        key,
        request_type,
        params,
        query,
    })
}

/// Split a path into (bucket, key) for path-style requests, or
/// (key-head, key-tail) joined back together for virtual-hosted ones.
fn parse_path(path: &str, host_has_bucket: bool) -> (Option<String>, Option<String>) {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return (None, None);
    }

    if host_has_bucket {
        // The whole path is the key.
        return (Some(decode_segment(trimmed)), None);
    }

    match trimmed.split_once('/') {
        Some((bucket, key)) if !key.is_empty() => {
            (Some(decode_segment(bucket)), Some(decode_segment(key)))
        }
        _ => (Some(decode_segment(trimmed.trim_end_matches('/'))), None),
    }
}

fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// Parse the raw query string into decoded pairs, preserving wire order.
/// Bare tokens (`?versioning`) become pairs with an empty value.
fn parse_query_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (decode_segment(k), decode_segment(v)),
            None => (decode_segment(pair), String::new()),
        })
        .collect()
}

fn query_get<'a>(query: &'a [(String, String)], name: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn query_has(query: &[(String, String)], name: &str) -> bool {
    query.iter().any(|(k, _)| k == name)
}

fn parse_int(query: &[(String, String)], name: &str) -> Result<Option<i32>, S3Error> {
    match query_get(query, name) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| S3Error::invalid_argument(format!("invalid {name}: {raw}"))),
    }
}

fn extract_params(
    query: &[(String, String)],
    headers: &http::HeaderMap,
) -> Result<ListParams, S3Error> {
    let max_keys = parse_int(query, "max-keys")?
        .or(parse_int(query, "max-uploads")?)
        .or(parse_int(query, "max-parts")?);

    let range = match headers.get(http::header::RANGE).map(|v| v.to_str()) {
        None => None,
        Some(Err(_)) => {
            return Err(S3Error::invalid_argument("unreadable Range header"));
        }
        Some(Ok(raw)) => Some(
            ByteRange::parse(raw)
                .ok_or_else(|| S3Error::invalid_argument(format!("invalid Range: {raw}")))?,
        ),
    };

    Ok(ListParams {
        prefix: query_get(query, "prefix").map(ToOwned::to_owned),
        delimiter: query_get(query, "delimiter").map(ToOwned::to_owned),
        marker: query_get(query, "marker")
            .or_else(|| query_get(query, "key-marker"))
            .map(ToOwned::to_owned),
        continuation_token: query_get(query, "continuation-token").map(ToOwned::to_owned),
        max_keys,
        version_id: query_get(query, "versionId").map(ToOwned::to_owned),
        upload_id: query_get(query, "uploadId").map(ToOwned::to_owned),
        part_number: parse_int(query, "partNumber")?,
        range,
    })
}

fn classify(
    method: &http::Method,
    bucket: Option<&str>,
    key: Option<&str>,
    query: &[(String, String)],
    params: &ListParams,
) -> Result<S3RequestType, S3Error> {
    use S3RequestType as T;

    match (bucket, key) {
        (None, _) => match *method {
            http::Method::GET => Ok(T::ListBuckets),
            http::Method::HEAD => Ok(T::ServiceExists),
            _ => Err(S3Error::method_not_allowed(method.as_str())),
        },

        (Some(_), None) => match *method {
            http::Method::GET => Ok(if query_has(query, "versioning") {
                T::BucketReadVersioning
            } else if query_has(query, "versions") {
                T::BucketReadVersions
            } else if query_has(query, "tagging") {
                T::BucketReadTagging
            } else if query_has(query, "acl") {
                T::BucketReadAcl
            } else if query_has(query, "location") {
                T::BucketReadLocation
            } else if query_has(query, "logging") {
                T::BucketReadLogging
            } else if query_has(query, "website") {
                T::BucketReadWebsite
            } else if query_has(query, "uploads") {
                T::BucketReadMultipartUploads
            } else {
                T::BucketRead
            }),
            http::Method::PUT => Ok(if query_has(query, "versioning") {
                T::BucketWriteVersioning
            } else if query_has(query, "tagging") {
                T::BucketWriteTagging
            } else if query_has(query, "acl") {
                T::BucketWriteAcl
            } else if query_has(query, "logging") {
                T::BucketWriteLogging
            } else if query_has(query, "website") {
                T::BucketWriteWebsite
            } else {
                T::BucketWrite
            }),
            http::Method::HEAD => Ok(T::BucketExists),
            http::Method::DELETE => Ok(if query_has(query, "tagging") {
                T::BucketDeleteTagging
            } else if query_has(query, "website") {
                T::BucketDeleteWebsite
            } else {
                T::BucketDelete
            }),
            http::Method::POST if query_has(query, "delete") => Ok(T::DeleteMultiple),
            _ => Err(S3Error::method_not_allowed(method.as_str())),
        },

        (Some(_), Some(_)) => match *method {
            http::Method::GET => Ok(if query_has(query, "acl") {
                T::ObjectReadAcl
            } else if query_has(query, "tagging") {
                T::ObjectReadTagging
            } else if query_has(query, "retention") {
                T::ObjectReadRetention
            } else if query_has(query, "legal-hold") {
                T::ObjectReadLegalHold
            } else if params.upload_id.is_some() {
                T::ObjectReadParts
            } else if params.range.is_some() {
                T::ObjectReadRange
            } else {
                T::ObjectRead
            }),
            http::Method::PUT => Ok(
                if params.part_number.is_some() && params.upload_id.is_some() {
                    T::ObjectUploadPart
                } else if query_has(query, "acl") {
                    T::ObjectWriteAcl
                } else if query_has(query, "tagging") {
                    T::ObjectWriteTagging
                } else if query_has(query, "retention") {
                    T::ObjectWriteRetention
                } else if query_has(query, "legal-hold") {
                    T::ObjectWriteLegalHold
                } else {
                    T::ObjectWrite
                },
            ),
            http::Method::HEAD => Ok(T::ObjectExists),
            http::Method::DELETE => Ok(if params.upload_id.is_some() {
                T::ObjectAbortMultipartUpload
            } else if query_has(query, "tagging") {
                T::ObjectDeleteTagging
            } else {
                T::ObjectDelete
            }),
            http::Method::POST => {
                if query_has(query, "uploads") {
                    Ok(T::ObjectCreateMultipartUpload)
                } else if params.upload_id.is_some() {
                    Ok(T::ObjectCompleteMultipartUpload)
                } else {
                    Err(S3Error::method_not_allowed(method.as_str()))
                }
            }
            _ => Err(S3Error::method_not_allowed(method.as_str())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domains() -> BaseDomainSet {
        BaseDomainSet::new(["s3gate.local", "s3.example.com"])
    }

    fn request(method: &str, uri: &str, host: &str) -> http::request::Parts {
        let (parts, ()) = http::Request::builder()
            .method(method)
            .uri(uri)
            .header("host", host)
            .body(())
            .expect("valid request")
            .into_parts();
        parts
    }

    fn request_with_range(uri: &str, range: &str) -> http::request::Parts {
        let (parts, ()) = http::Request::builder()
            .method("GET")
            .uri(uri)
            .header("host", "s3gate.local")
            .header("range", range)
            .body(())
            .expect("valid request")
            .into_parts();
        parts
    }

    #[test]
    fn test_should_detect_path_style_host() {
        let (style, bucket) = domains().classify_host("s3gate.local");
        assert_eq!(style, AddressingStyle::PathStyle);
        assert!(bucket.is_none());
    }

    #[test]
    fn test_should_detect_virtual_hosted_bucket() {
        let (style, bucket) = domains().classify_host("photos.s3gate.local");
        assert_eq!(style, AddressingStyle::VirtualHosted);
        assert_eq!(bucket.as_deref(), Some("photos"));
    }

    #[test]
    fn test_should_strip_port_before_matching() {
        let (style, bucket) = domains().classify_host("photos.s3gate.local:9000");
        assert_eq!(style, AddressingStyle::VirtualHosted);
        assert_eq!(bucket.as_deref(), Some("photos"));

        let (style, _) = domains().classify_host("s3gate.local:9000");
        assert_eq!(style, AddressingStyle::PathStyle);
    }

    #[test]
    fn test_should_respect_suffix_order() {
        // "a.b.s3gate.local" matches the first suffix with bucket "a.b",
        // even though "b.s3gate.local" could be a base domain elsewhere.
        let set = BaseDomainSet::new(["s3gate.local", "b.s3gate.local"]);
        let (_, bucket) = set.classify_host("a.b.s3gate.local");
        assert_eq!(bucket.as_deref(), Some("a.b"));
    }

    #[test]
    fn test_should_mark_unmatched_host_unknown() {
        let (style, bucket) = domains().classify_host("storage.other.net");
        assert_eq!(style, AddressingStyle::Unknown);
        assert!(bucket.is_none());
    }

    struct CnameResolver;
    impl BaseDomainResolver for CnameResolver {
        fn resolve(&self, host: &str) -> Option<String> {
            host.ends_with("example.org").then(|| "example.org".to_owned())
        }
    }

    #[test]
    fn test_should_consult_resolver_for_unmatched_host() {
        let set = domains().with_resolver(Arc::new(CnameResolver));
        let (style, bucket) = set.classify_host("assets.example.org");
        assert_eq!(style, AddressingStyle::VirtualHosted);
        assert_eq!(bucket.as_deref(), Some("assets"));

        let (style, bucket) = set.classify_host("unrelated.example.net");
        assert_eq!(style, AddressingStyle::Unknown);
        assert!(bucket.is_none());
    }

    #[test]
    fn test_should_derive_multi_label_bucket_from_resolved_domain() {
        let set = domains().with_resolver(Arc::new(CnameResolver));
        let (style, bucket) = set.classify_host("a.b.example.org");
        assert_eq!(style, AddressingStyle::VirtualHosted);
        assert_eq!(bucket.as_deref(), Some("a.b"));

        // The resolved domain itself is path-style, like a configured one.
        let (style, bucket) = set.classify_host("example.org");
        assert_eq!(style, AddressingStyle::PathStyle);
        assert!(bucket.is_none());
    }

    #[test]
    fn test_should_classify_service_operations() {
        let ctx = route(&request("GET", "/", "s3gate.local"), &domains()).unwrap();
        assert_eq!(ctx.request_type, S3RequestType::ListBuckets);
        assert!(ctx.bucket.is_none());

        let ctx = route(&request("HEAD", "/", "s3gate.local"), &domains()).unwrap();
        assert_eq!(ctx.request_type, S3RequestType::ServiceExists);
    }

    #[test]
    fn test_should_classify_bucket_list() {
        let ctx = route(
            &request("GET", "/photos?prefix=2024/&max-keys=50", "s3gate.local"),
            &domains(),
        )
        .unwrap();
        assert_eq!(ctx.request_type, S3RequestType::BucketRead);
        assert_eq!(ctx.bucket.as_deref(), Some("photos"));
        assert_eq!(ctx.params.prefix.as_deref(), Some("2024/"));
        assert_eq!(ctx.params.max_keys, Some(50));
    }

    #[test]
    fn test_should_classify_bucket_subresources() {
        let cases = [
            ("GET", "/b?versioning", S3RequestType::BucketReadVersioning),
            ("GET", "/b?versions", S3RequestType::BucketReadVersions),
            ("GET", "/b?tagging", S3RequestType::BucketReadTagging),
            ("GET", "/b?acl", S3RequestType::BucketReadAcl),
            ("GET", "/b?location", S3RequestType::BucketReadLocation),
            ("GET", "/b?logging", S3RequestType::BucketReadLogging),
            ("GET", "/b?website", S3RequestType::BucketReadWebsite),
            ("GET", "/b?uploads", S3RequestType::BucketReadMultipartUploads),
            ("PUT", "/b?versioning", S3RequestType::BucketWriteVersioning),
            ("PUT", "/b?tagging", S3RequestType::BucketWriteTagging),
            ("PUT", "/b?acl", S3RequestType::BucketWriteAcl),
            ("PUT", "/b?logging", S3RequestType::BucketWriteLogging),
            ("PUT", "/b?website", S3RequestType::BucketWriteWebsite),
            ("PUT", "/b", S3RequestType::BucketWrite),
            ("HEAD", "/b", S3RequestType::BucketExists),
            ("DELETE", "/b?tagging", S3RequestType::BucketDeleteTagging),
            ("DELETE", "/b?website", S3RequestType::BucketDeleteWebsite),
            ("DELETE", "/b", S3RequestType::BucketDelete),
            ("POST", "/b?delete", S3RequestType::DeleteMultiple),
        ];
        for (method, uri, expected) in cases {
            let ctx = route(&request(method, uri, "s3gate.local"), &domains()).unwrap();
            assert_eq!(ctx.request_type, expected, "{method} {uri}");
        }
    }

    #[test]
    fn test_should_classify_object_subresources() {
        let cases = [
            ("GET", "/b/k?acl", S3RequestType::ObjectReadAcl),
            ("GET", "/b/k?tagging", S3RequestType::ObjectReadTagging),
            ("GET", "/b/k?retention", S3RequestType::ObjectReadRetention),
            ("GET", "/b/k?legal-hold", S3RequestType::ObjectReadLegalHold),
            ("GET", "/b/k?uploadId=u1", S3RequestType::ObjectReadParts),
            ("GET", "/b/k", S3RequestType::ObjectRead),
            ("PUT", "/b/k?acl", S3RequestType::ObjectWriteAcl),
            ("PUT", "/b/k?tagging", S3RequestType::ObjectWriteTagging),
            ("PUT", "/b/k?retention", S3RequestType::ObjectWriteRetention),
            ("PUT", "/b/k?legal-hold", S3RequestType::ObjectWriteLegalHold),
            ("PUT", "/b/k", S3RequestType::ObjectWrite),
            ("HEAD", "/b/k", S3RequestType::ObjectExists),
            ("DELETE", "/b/k?tagging", S3RequestType::ObjectDeleteTagging),
            ("DELETE", "/b/k", S3RequestType::ObjectDelete),
            (
                "DELETE",
                "/b/k?uploadId=u1",
                S3RequestType::ObjectAbortMultipartUpload,
            ),
            (
                "PUT",
                "/b/k?partNumber=3&uploadId=u1",
                S3RequestType::ObjectUploadPart,
            ),
            (
                "POST",
                "/b/k?uploads",
                S3RequestType::ObjectCreateMultipartUpload,
            ),
            (
                "POST",
                "/b/k?uploadId=u1",
                S3RequestType::ObjectCompleteMultipartUpload,
            ),
        ];
        for (method, uri, expected) in cases {
            let ctx = route(&request(method, uri, "s3gate.local"), &domains()).unwrap();
            assert_eq!(ctx.request_type, expected, "{method} {uri}");
        }
    }

    #[test]
    fn test_should_classify_ranged_read() {
        let ctx = route(&request_with_range("/b/k", "bytes=0-4"), &domains()).unwrap();
        assert_eq!(ctx.request_type, S3RequestType::ObjectReadRange);
        let range = ctx.params.range.unwrap();
        assert_eq!((range.start, range.end), (0, 4));
    }

    #[test]
    fn test_should_reject_malformed_range() {
        let err = route(&request_with_range("/b/k", "bytes=-5"), &domains()).unwrap_err();
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);

        let err = route(&request_with_range("/b/k", "bytes=9-1"), &domains()).unwrap_err();
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_should_route_virtual_hosted_key() {
        let ctx = route(
            &request("GET", "/path/to/key.txt", "photos.s3gate.local"),
            &domains(),
        )
        .unwrap();
        assert_eq!(ctx.style, AddressingStyle::VirtualHosted);
        assert_eq!(ctx.bucket.as_deref(), Some("photos"));
        assert_eq!(ctx.key.as_deref(), Some("path/to/key.txt"));
        assert_eq!(ctx.request_type, S3RequestType::ObjectRead);
    }

    #[test]
    fn test_should_route_virtual_hosted_bucket_root() {
        let ctx = route(&request("GET", "/", "photos.s3gate.local"), &domains()).unwrap();
        assert_eq!(ctx.bucket.as_deref(), Some("photos"));
        assert!(ctx.key.is_none());
        assert_eq!(ctx.request_type, S3RequestType::BucketRead);
    }

    #[test]
    fn test_should_percent_decode_key() {
        let ctx = route(
            &request("GET", "/b/my%20file%2Bv2.txt", "s3gate.local"),
            &domains(),
        )
        .unwrap();
        assert_eq!(ctx.key.as_deref(), Some("my file+v2.txt"));
    }

    #[test]
    fn test_should_reject_unsupported_method() {
        let err = route(&request("PATCH", "/b/k", "s3gate.local"), &domains()).unwrap_err();
        assert_eq!(err.status_code, http::StatusCode::METHOD_NOT_ALLOWED);

        let err = route(&request("POST", "/b/k", "s3gate.local"), &domains()).unwrap_err();
        assert_eq!(err.status_code, http::StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_should_reject_non_numeric_part_number() {
        let err = route(
            &request("PUT", "/b/k?partNumber=abc&uploadId=u1", "s3gate.local"),
            &domains(),
        )
        .unwrap_err();
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_should_extract_version_and_markers() {
        let ctx = route(
            &request(
                "GET",
                "/b?versions&key-marker=photo.jpg&max-keys=10",
                "s3gate.local",
            ),
            &domains(),
        )
        .unwrap();
        assert_eq!(ctx.request_type, S3RequestType::BucketReadVersions);
        assert_eq!(ctx.params.marker.as_deref(), Some("photo.jpg"));
        assert_eq!(ctx.params.max_keys, Some(10));
    }

    #[test]
    fn test_should_not_confuse_presigned_query_with_subresource() {
        let ctx = route(
            &request(
                "GET",
                "/b/k?X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Signature=abc",
                "s3gate.local",
            ),
            &domains(),
        )
        .unwrap();
        assert_eq!(ctx.request_type, S3RequestType::ObjectRead);
    }
}
