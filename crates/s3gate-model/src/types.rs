//! Typed request and response shapes for the operations the gateway carries.
//!
//! These records are plain data; the XML mapping lives in the `s3gate-xml`
//! crate. Byte payloads never appear here, the gateway hands them to
//! callbacks directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The owner of a bucket or object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Canonical owner ID.
    pub id: String,
    /// Display name.
    pub display_name: String,
}

/// A bucket entry in a service-level listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Bucket name.
    pub name: String,
    /// Creation timestamp.
    pub creation_date: DateTime<Utc>,
}

/// Response shape for listing all buckets owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAllMyBucketsResult {
    /// The bucket owner.
    pub owner: Owner,
    /// All buckets the owner holds.
    pub buckets: Vec<Bucket>,
}

/// An object entry in a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Object key.
    pub key: String,
    /// Last modification timestamp.
    pub last_modified: DateTime<Utc>,
    /// Entity tag, quoted per the wire format.
    pub etag: String,
    /// Object size in bytes.
    pub size: u64,
    /// Storage class label.
    pub storage_class: String,
    /// Object owner, when the listing includes owners.
    pub owner: Option<Owner>,
}

/// A rolled-up key prefix produced by delimiter grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonPrefix {
    /// The shared prefix.
    pub prefix: String,
}

/// Response shape for listing objects in a bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBucketResult {
    /// Bucket name.
    pub name: String,
    /// Prefix the listing was filtered by.
    pub prefix: Option<String>,
    /// Delimiter used for grouping.
    pub delimiter: Option<String>,
    /// Marker the listing started after.
    pub marker: Option<String>,
    /// Marker to resume a truncated listing from.
    pub next_marker: Option<String>,
    /// Maximum number of keys requested.
    pub max_keys: i32,
    /// True when more keys remain beyond this page.
    pub is_truncated: bool,
    /// Object entries.
    pub contents: Vec<ObjectEntry>,
    /// Prefixes rolled up by the delimiter.
    pub common_prefixes: Vec<CommonPrefix>,
}

/// A concrete object version in a version listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectVersionEntry {
    /// Object key.
    pub key: String,
    /// Version identifier.
    pub version_id: String,
    /// True when this is the current version of the key.
    pub is_latest: bool,
    /// Last modification timestamp.
    pub last_modified: DateTime<Utc>,
    /// Entity tag, quoted per the wire format.
    pub etag: String,
    /// Version size in bytes.
    pub size: u64,
    /// Storage class label.
    pub storage_class: String,
    /// Version owner, when the listing includes owners.
    pub owner: Option<Owner>,
}

/// A delete marker in a version listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMarkerEntry {
    /// Object key.
    pub key: String,
    /// Version identifier of the marker.
    pub version_id: String,
    /// True when this marker is the current version of the key.
    pub is_latest: bool,
    /// Timestamp the marker was created.
    pub last_modified: DateTime<Utc>,
    /// Marker owner, when the listing includes owners.
    pub owner: Option<Owner>,
}

/// Response shape for listing object versions in a bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListVersionsResult {
    /// Bucket name.
    pub name: String,
    /// Prefix the listing was filtered by.
    pub prefix: Option<String>,
    /// Key marker the listing started after.
    pub key_marker: Option<String>,
    /// Maximum number of entries requested.
    pub max_keys: i32,
    /// True when more entries remain beyond this page.
    pub is_truncated: bool,
    /// Concrete versions.
    pub versions: Vec<ObjectVersionEntry>,
    /// Delete markers.
    pub delete_markers: Vec<DeleteMarkerEntry>,
}

/// Bucket versioning state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersioningStatus {
    /// Versioning is enabled.
    Enabled,
    /// Versioning is suspended.
    Suspended,
}

impl VersioningStatus {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Suspended => "Suspended",
        }
    }
}

impl std::fmt::Display for VersioningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket versioning configuration.
///
/// A bucket that has never had versioning configured serializes as an
/// empty document, represented here by `status: None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersioningConfiguration {
    /// The versioning state, absent when never configured.
    pub status: Option<VersioningStatus>,
}

/// A single key/value tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

/// A tag set attached to a bucket or object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tagging {
    /// The tags in the set.
    pub tag_set: Vec<Tag>,
}

/// Access permission granted to a grantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Full control.
    #[serde(rename = "FULL_CONTROL")]
    FullControl,
    /// Read access.
    #[serde(rename = "READ")]
    Read,
    /// Write access.
    #[serde(rename = "WRITE")]
    Write,
    /// Read the ACL.
    #[serde(rename = "READ_ACP")]
    ReadAcp,
    /// Write the ACL.
    #[serde(rename = "WRITE_ACP")]
    WriteAcp,
}

impl Permission {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullControl => "FULL_CONTROL",
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::ReadAcp => "READ_ACP",
            Self::WriteAcp => "WRITE_ACP",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The recipient of a grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grantee {
    /// A canonical user.
    CanonicalUser {
        /// Canonical user ID.
        id: String,
        /// Display name, when known.
        display_name: Option<String>,
    },
    /// A predefined group identified by URI.
    Group {
        /// Group URI.
        uri: String,
    },
}

/// A single grant in an access control list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Who the grant is for.
    pub grantee: Grantee,
    /// What the grant permits.
    pub permission: Permission,
}

/// An access control policy for a bucket or object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlPolicy {
    /// Resource owner.
    pub owner: Owner,
    /// The grants in the list.
    pub grants: Vec<Grant>,
}

/// Bucket region constraint.
///
/// The wire document is empty for the default region; `None` captures that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationConstraint {
    /// Region name, absent for the default region.
    pub region: Option<String>,
}

/// Target of bucket access logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingEnabled {
    /// Bucket that receives log objects.
    pub target_bucket: String,
    /// Prefix prepended to log object keys.
    pub target_prefix: String,
}

/// Bucket logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketLoggingStatus {
    /// Logging target, absent when logging is disabled.
    pub logging_enabled: Option<LoggingEnabled>,
}

/// Static-website hosting configuration for a bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteConfiguration {
    /// Index document suffix.
    pub index_document: Option<String>,
    /// Error document key.
    pub error_document: Option<String>,
}

/// Legal hold state on an object version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalHold {
    /// "ON" or "OFF".
    pub status: String,
}

/// Retention lock on an object version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retention {
    /// Retention mode, "GOVERNANCE" or "COMPLIANCE".
    pub mode: String,
    /// Instant the retention period ends.
    pub retain_until_date: DateTime<Utc>,
}

/// An in-progress multipart upload in a bucket-level listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipartUpload {
    /// Object key the upload targets.
    pub key: String,
    /// Upload identifier.
    pub upload_id: String,
    /// Upload initiation timestamp.
    pub initiated: DateTime<Utc>,
    /// Upload owner.
    pub owner: Option<Owner>,
    /// Storage class label.
    pub storage_class: String,
}

/// Response shape for listing in-progress multipart uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMultipartUploadsResult {
    /// Bucket name.
    pub bucket: String,
    /// Key marker the listing started after.
    pub key_marker: Option<String>,
    /// Upload-ID marker the listing started after.
    pub upload_id_marker: Option<String>,
    /// Maximum number of uploads requested.
    pub max_uploads: i32,
    /// True when more uploads remain beyond this page.
    pub is_truncated: bool,
    /// The uploads.
    pub uploads: Vec<MultipartUpload>,
}

/// Response shape for beginning a multipart upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiateMultipartUploadResult {
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Assigned upload identifier.
    pub upload_id: String,
}

/// An uploaded part in a part listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Part number, 1-based.
    pub part_number: i32,
    /// Upload timestamp.
    pub last_modified: DateTime<Utc>,
    /// Entity tag, quoted per the wire format.
    pub etag: String,
    /// Part size in bytes.
    pub size: u64,
}

/// Response shape for listing the parts of a multipart upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPartsResult {
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Upload identifier.
    pub upload_id: String,
    /// Part-number marker the listing started after.
    pub part_number_marker: Option<i32>,
    /// Maximum number of parts requested.
    pub max_parts: i32,
    /// True when more parts remain beyond this page.
    pub is_truncated: bool,
    /// The parts.
    pub parts: Vec<Part>,
}

/// A part reference in a multipart completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedPart {
    /// Part number, 1-based.
    pub part_number: i32,
    /// Entity tag reported when the part was uploaded.
    pub etag: String,
}

/// Request shape for assembling a multipart upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteMultipartUpload {
    /// The parts to assemble, in ascending part-number order.
    pub parts: Vec<CompletedPart>,
}

/// Response shape for a completed multipart upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteMultipartUploadResult {
    /// Location URL of the assembled object.
    pub location: String,
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Entity tag of the assembled object.
    pub etag: String,
}

/// An object named in a multi-delete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectIdentifier {
    /// Object key.
    pub key: String,
    /// Specific version to delete, when given.
    pub version_id: Option<String>,
}

/// Request shape for deleting multiple objects in one call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delete {
    /// The objects to delete.
    pub objects: Vec<ObjectIdentifier>,
    /// When true, the response omits successfully deleted entries.
    pub quiet: bool,
}

/// A successfully deleted entry in a multi-delete response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedObject {
    /// Object key.
    pub key: String,
    /// Version that was deleted, when versioned.
    pub version_id: Option<String>,
    /// True when the deletion created or removed a delete marker.
    pub delete_marker: bool,
    /// Version ID of the delete marker involved, when any.
    pub delete_marker_version_id: Option<String>,
}

/// A per-key failure in a multi-delete response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteErrorEntry {
    /// Object key that failed.
    pub key: String,
    /// Error code for this key.
    pub code: String,
    /// Error message for this key.
    pub message: String,
}

/// Response shape for a multi-delete request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    /// Entries deleted successfully.
    pub deleted: Vec<DeletedObject>,
    /// Entries that failed.
    pub errors: Vec<DeleteErrorEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_default_versioning_to_never_configured() {
        let config = VersioningConfiguration::default();
        assert!(config.status.is_none());
    }

    #[test]
    fn test_should_display_permission_wire_names() {
        assert_eq!(Permission::FullControl.to_string(), "FULL_CONTROL");
        assert_eq!(Permission::ReadAcp.to_string(), "READ_ACP");
    }

    #[test]
    fn test_should_default_location_to_unset_region() {
        assert!(LocationConstraint::default().region.is_none());
    }
}
