//! Serialization of response shapes to S3-compatible XML.
//!
//! Conventions follow the RestXml protocol:
//!
//! - Namespace: `http://s3.amazonaws.com/doc/2006-03-01/`
//! - Booleans: lowercase `true`/`false`
//! - Timestamps: ISO 8601 with milliseconds (`2006-02-03T16:45:09.000Z`)
//! - XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesText, Event};
use s3gate_model::types::{
    AccessControlPolicy, Bucket, BucketLoggingStatus, CommonPrefix, CompleteMultipartUploadResult,
    DeleteErrorEntry, DeleteMarkerEntry, DeleteResult, DeletedObject, Grant, Grantee,
    InitiateMultipartUploadResult, LegalHold, ListAllMyBucketsResult, ListBucketResult,
    ListMultipartUploadsResult, ListPartsResult, ListVersionsResult, LocationConstraint,
    MultipartUpload, ObjectEntry, ObjectVersionEntry, Owner, Part, Retention, Tag, Tagging,
    VersioningConfiguration, WebsiteConfiguration,
};

use crate::error::XmlError;

/// The S3 XML namespace.
pub const S3_NAMESPACE: &str = "http://s3.amazonaws.com/doc/2006-03-01/";

/// XML Schema instance namespace, used for `xsi:type` on grantees.
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Types that can render themselves as XML child elements.
///
/// Implementors write their content inside the current element; the root
/// element and namespace come from [`to_xml`].
pub trait S3Serialize {
    /// Serialize this value as XML child elements into the given writer.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if writing to the underlying writer fails.
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()>;
}

/// Serialize a value as a complete S3 XML document.
///
/// # Errors
///
/// Returns `XmlError` if serialization fails.
pub fn to_xml<T: S3Serialize>(root_element: &str, value: &T) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(512);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(quick_xml::events::BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        None,
    )))?;

    writer
        .create_element(root_element)
        .with_attribute(("xmlns", S3_NAMESPACE))
        .write_inner_content(|w| value.serialize_xml(w))?;

    Ok(buf)
}

fn text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

fn opt_text_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<&str>,
) -> io::Result<()> {
    if let Some(v) = value {
        text_element(writer, tag, v)?;
    }
    Ok(())
}

fn bool_element<W: Write>(writer: &mut Writer<W>, tag: &str, value: bool) -> io::Result<()> {
    text_element(writer, tag, if value { "true" } else { "false" })
}

fn timestamp_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &chrono::DateTime<chrono::Utc>,
) -> io::Result<()> {
    text_element(writer, tag, &format_timestamp(value))
}

/// Format a `DateTime<Utc>` as ISO 8601 with milliseconds and `Z` suffix.
fn format_timestamp(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

impl S3Serialize for Owner {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "ID", &self.id)?;
        text_element(writer, "DisplayName", &self.display_name)
    }
}

impl S3Serialize for ListAllMyBucketsResult {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer
            .create_element("Owner")
            .write_inner_content(|w| self.owner.serialize_xml(w))?;
        writer.create_element("Buckets").write_inner_content(|w| {
            for bucket in &self.buckets {
                w.create_element("Bucket")
                    .write_inner_content(|w| bucket.serialize_xml(w))?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

impl S3Serialize for Bucket {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Name", &self.name)?;
        timestamp_element(writer, "CreationDate", &self.creation_date)
    }
}

impl S3Serialize for ObjectEntry {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Key", &self.key)?;
        timestamp_element(writer, "LastModified", &self.last_modified)?;
        text_element(writer, "ETag", &self.etag)?;
        text_element(writer, "Size", &self.size.to_string())?;
        text_element(writer, "StorageClass", &self.storage_class)?;
        if let Some(owner) = &self.owner {
            writer
                .create_element("Owner")
                .write_inner_content(|w| owner.serialize_xml(w))?;
        }
        Ok(())
    }
}

impl S3Serialize for CommonPrefix {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Prefix", &self.prefix)
    }
}

impl S3Serialize for ListBucketResult {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Name", &self.name)?;
        text_element(writer, "Prefix", self.prefix.as_deref().unwrap_or(""))?;
        text_element(writer, "Marker", self.marker.as_deref().unwrap_or(""))?;
        opt_text_element(writer, "NextMarker", self.next_marker.as_deref())?;
        text_element(writer, "MaxKeys", &self.max_keys.to_string())?;
        opt_text_element(writer, "Delimiter", self.delimiter.as_deref())?;
        bool_element(writer, "IsTruncated", self.is_truncated)?;
        for entry in &self.contents {
            writer
                .create_element("Contents")
                .write_inner_content(|w| entry.serialize_xml(w))?;
        }
        for prefix in &self.common_prefixes {
            writer
                .create_element("CommonPrefixes")
                .write_inner_content(|w| prefix.serialize_xml(w))?;
        }
        Ok(())
    }
}

impl S3Serialize for ObjectVersionEntry {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Key", &self.key)?;
        text_element(writer, "VersionId", &self.version_id)?;
        bool_element(writer, "IsLatest", self.is_latest)?;
        timestamp_element(writer, "LastModified", &self.last_modified)?;
        text_element(writer, "ETag", &self.etag)?;
        text_element(writer, "Size", &self.size.to_string())?;
        text_element(writer, "StorageClass", &self.storage_class)?;
        if let Some(owner) = &self.owner {
            writer
                .create_element("Owner")
                .write_inner_content(|w| owner.serialize_xml(w))?;
        }
        Ok(())
    }
}

impl S3Serialize for DeleteMarkerEntry {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Key", &self.key)?;
        text_element(writer, "VersionId", &self.version_id)?;
        bool_element(writer, "IsLatest", self.is_latest)?;
        timestamp_element(writer, "LastModified", &self.last_modified)?;
        if let Some(owner) = &self.owner {
            writer
                .create_element("Owner")
                .write_inner_content(|w| owner.serialize_xml(w))?;
        }
        Ok(())
    }
}

impl S3Serialize for ListVersionsResult {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Name", &self.name)?;
        text_element(writer, "Prefix", self.prefix.as_deref().unwrap_or(""))?;
        text_element(writer, "KeyMarker", self.key_marker.as_deref().unwrap_or(""))?;
        text_element(writer, "MaxKeys", &self.max_keys.to_string())?;
        bool_element(writer, "IsTruncated", self.is_truncated)?;
        for version in &self.versions {
            writer
                .create_element("Version")
                .write_inner_content(|w| version.serialize_xml(w))?;
        }
        for marker in &self.delete_markers {
            writer
                .create_element("DeleteMarker")
                .write_inner_content(|w| marker.serialize_xml(w))?;
        }
        Ok(())
    }
}

impl S3Serialize for VersioningConfiguration {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        // A never-configured bucket renders an empty document.
        if let Some(status) = self.status {
            text_element(writer, "Status", status.as_str())?;
        }
        Ok(())
    }
}

impl S3Serialize for Tagging {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("TagSet").write_inner_content(|w| {
            for tag in &self.tag_set {
                w.create_element("Tag")
                    .write_inner_content(|w| tag.serialize_xml(w))?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

impl S3Serialize for Tag {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Key", &self.key)?;
        text_element(writer, "Value", &self.value)
    }
}

impl S3Serialize for Grant {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        match &self.grantee {
            Grantee::CanonicalUser { id, display_name } => {
                writer
                    .create_element("Grantee")
                    .with_attribute(("xmlns:xsi", XSI_NAMESPACE))
                    .with_attribute(("xsi:type", "CanonicalUser"))
                    .write_inner_content(|w| {
                        text_element(w, "ID", id)?;
                        opt_text_element(w, "DisplayName", display_name.as_deref())
                    })?;
            }
            Grantee::Group { uri } => {
                writer
                    .create_element("Grantee")
                    .with_attribute(("xmlns:xsi", XSI_NAMESPACE))
                    .with_attribute(("xsi:type", "Group"))
                    .write_inner_content(|w| text_element(w, "URI", uri))?;
            }
        }
        text_element(writer, "Permission", self.permission.as_str())
    }
}

impl S3Serialize for AccessControlPolicy {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer
            .create_element("Owner")
            .write_inner_content(|w| self.owner.serialize_xml(w))?;
        writer
            .create_element("AccessControlList")
            .write_inner_content(|w| {
                for grant in &self.grants {
                    w.create_element("Grant")
                        .write_inner_content(|w| grant.serialize_xml(w))?;
                }
                Ok(())
            })?;
        Ok(())
    }
}

impl S3Serialize for LocationConstraint {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        // The default region renders an empty document.
        if let Some(region) = &self.region {
            writer.write_event(Event::Text(BytesText::new(region)))?;
        }
        Ok(())
    }
}

impl S3Serialize for BucketLoggingStatus {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        if let Some(logging) = &self.logging_enabled {
            writer
                .create_element("LoggingEnabled")
                .write_inner_content(|w| {
                    text_element(w, "TargetBucket", &logging.target_bucket)?;
                    text_element(w, "TargetPrefix", &logging.target_prefix)
                })?;
        }
        Ok(())
    }
}

impl S3Serialize for WebsiteConfiguration {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        if let Some(suffix) = &self.index_document {
            writer
                .create_element("IndexDocument")
                .write_inner_content(|w| text_element(w, "Suffix", suffix))?;
        }
        if let Some(key) = &self.error_document {
            writer
                .create_element("ErrorDocument")
                .write_inner_content(|w| text_element(w, "Key", key))?;
        }
        Ok(())
    }
}

impl S3Serialize for LegalHold {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Status", &self.status)
    }
}

impl S3Serialize for Retention {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Mode", &self.mode)?;
        timestamp_element(writer, "RetainUntilDate", &self.retain_until_date)
    }
}

impl S3Serialize for MultipartUpload {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Key", &self.key)?;
        text_element(writer, "UploadId", &self.upload_id)?;
        timestamp_element(writer, "Initiated", &self.initiated)?;
        text_element(writer, "StorageClass", &self.storage_class)?;
        if let Some(owner) = &self.owner {
            writer
                .create_element("Owner")
                .write_inner_content(|w| owner.serialize_xml(w))?;
        }
        Ok(())
    }
}

impl S3Serialize for ListMultipartUploadsResult {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Bucket", &self.bucket)?;
        opt_text_element(writer, "KeyMarker", self.key_marker.as_deref())?;
        opt_text_element(writer, "UploadIdMarker", self.upload_id_marker.as_deref())?;
        text_element(writer, "MaxUploads", &self.max_uploads.to_string())?;
        bool_element(writer, "IsTruncated", self.is_truncated)?;
        for upload in &self.uploads {
            writer
                .create_element("Upload")
                .write_inner_content(|w| upload.serialize_xml(w))?;
        }
        Ok(())
    }
}

impl S3Serialize for InitiateMultipartUploadResult {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Bucket", &self.bucket)?;
        text_element(writer, "Key", &self.key)?;
        text_element(writer, "UploadId", &self.upload_id)
    }
}

impl S3Serialize for Part {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "PartNumber", &self.part_number.to_string())?;
        timestamp_element(writer, "LastModified", &self.last_modified)?;
        text_element(writer, "ETag", &self.etag)?;
        text_element(writer, "Size", &self.size.to_string())
    }
}

impl S3Serialize for ListPartsResult {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Bucket", &self.bucket)?;
        text_element(writer, "Key", &self.key)?;
        text_element(writer, "UploadId", &self.upload_id)?;
        if let Some(marker) = self.part_number_marker {
            text_element(writer, "PartNumberMarker", &marker.to_string())?;
        }
        text_element(writer, "MaxParts", &self.max_parts.to_string())?;
        bool_element(writer, "IsTruncated", self.is_truncated)?;
        for part in &self.parts {
            writer
                .create_element("Part")
                .write_inner_content(|w| part.serialize_xml(w))?;
        }
        Ok(())
    }
}

impl S3Serialize for CompleteMultipartUploadResult {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Location", &self.location)?;
        text_element(writer, "Bucket", &self.bucket)?;
        text_element(writer, "Key", &self.key)?;
        text_element(writer, "ETag", &self.etag)
    }
}

impl S3Serialize for DeletedObject {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Key", &self.key)?;
        opt_text_element(writer, "VersionId", self.version_id.as_deref())?;
        if self.delete_marker {
            bool_element(writer, "DeleteMarker", true)?;
        }
        opt_text_element(
            writer,
            "DeleteMarkerVersionId",
            self.delete_marker_version_id.as_deref(),
        )?;
        Ok(())
    }
}

impl S3Serialize for DeleteErrorEntry {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        text_element(writer, "Key", &self.key)?;
        text_element(writer, "Code", &self.code)?;
        text_element(writer, "Message", &self.message)
    }
}

impl S3Serialize for DeleteResult {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        for deleted in &self.deleted {
            writer
                .create_element("Deleted")
                .write_inner_content(|w| deleted.serialize_xml(w))?;
        }
        for error in &self.errors {
            writer
                .create_element("Error")
                .write_inner_content(|w| error.serialize_xml(w))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use s3gate_model::types::{Permission, VersioningStatus};

    fn xml_string<T: S3Serialize>(root: &str, value: &T) -> String {
        String::from_utf8(to_xml(root, value).unwrap()).unwrap()
    }

    fn test_time() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc.with_ymd_and_hms(2026, 2, 3, 16, 45, 9).unwrap()
    }

    #[test]
    fn test_should_serialize_bucket_listing_with_namespace() {
        let result = ListAllMyBucketsResult {
            owner: Owner {
                id: "owner-1".to_owned(),
                display_name: "owner".to_owned(),
            },
            buckets: vec![Bucket {
                name: "photos".to_owned(),
                creation_date: test_time(),
            }],
        };
        let xml = xml_string("ListAllMyBucketsResult", &result);
        assert!(xml.contains(
            "<ListAllMyBucketsResult xmlns=\"http://s3.amazonaws.com/doc/2006-03-01/\">"
        ));
        assert!(xml.contains("<Name>photos</Name>"));
        assert!(xml.contains("<CreationDate>2026-02-03T16:45:09.000Z</CreationDate>"));
    }

    #[test]
    fn test_should_serialize_object_listing_with_common_prefixes() {
        let result = ListBucketResult {
            name: "photos".to_owned(),
            prefix: Some("2026/".to_owned()),
            delimiter: Some("/".to_owned()),
            max_keys: 1000,
            is_truncated: false,
            contents: vec![ObjectEntry {
                key: "2026/cat.jpg".to_owned(),
                last_modified: test_time(),
                etag: "\"abc\"".to_owned(),
                size: 42,
                storage_class: "STANDARD".to_owned(),
                owner: None,
            }],
            common_prefixes: vec![CommonPrefix {
                prefix: "2026/albums/".to_owned(),
            }],
            ..Default::default()
        };
        let xml = xml_string("ListBucketResult", &result);
        assert!(xml.contains("<Contents><Key>2026/cat.jpg</Key>"));
        assert!(xml.contains("<CommonPrefixes><Prefix>2026/albums/</Prefix></CommonPrefixes>"));
        assert!(xml.contains("<IsTruncated>false</IsTruncated>"));
    }

    #[test]
    fn test_should_serialize_unconfigured_versioning_as_empty_document() {
        let xml = xml_string(
            "VersioningConfiguration",
            &VersioningConfiguration { status: None },
        );
        assert!(!xml.contains("<Status>"));

        let xml = xml_string(
            "VersioningConfiguration",
            &VersioningConfiguration {
                status: Some(VersioningStatus::Enabled),
            },
        );
        assert!(xml.contains("<Status>Enabled</Status>"));
    }

    #[test]
    fn test_should_serialize_tagging_set() {
        let tagging = Tagging {
            tag_set: vec![Tag {
                key: "env".to_owned(),
                value: "prod".to_owned(),
            }],
        };
        let xml = xml_string("Tagging", &tagging);
        assert!(xml.contains("<TagSet><Tag><Key>env</Key><Value>prod</Value></Tag></TagSet>"));
    }

    #[test]
    fn test_should_serialize_acl_with_typed_grantee() {
        let policy = AccessControlPolicy {
            owner: Owner {
                id: "owner-1".to_owned(),
                display_name: "owner".to_owned(),
            },
            grants: vec![Grant {
                grantee: Grantee::CanonicalUser {
                    id: "user-1".to_owned(),
                    display_name: Some("user".to_owned()),
                },
                permission: Permission::FullControl,
            }],
        };
        let xml = xml_string("AccessControlPolicy", &policy);
        assert!(xml.contains("xsi:type=\"CanonicalUser\""));
        assert!(xml.contains("<Permission>FULL_CONTROL</Permission>"));
    }

    #[test]
    fn test_should_serialize_default_location_as_empty() {
        let xml = xml_string("LocationConstraint", &LocationConstraint { region: None });
        assert!(xml.ends_with("<LocationConstraint xmlns=\"http://s3.amazonaws.com/doc/2006-03-01/\"/>")
            || xml.contains("</LocationConstraint>"));

        let xml = xml_string(
            "LocationConstraint",
            &LocationConstraint {
                region: Some("eu-west-1".to_owned()),
            },
        );
        assert!(xml.contains("eu-west-1"));
    }

    #[test]
    fn test_should_serialize_multi_delete_result() {
        let result = DeleteResult {
            deleted: vec![DeletedObject {
                key: "a.txt".to_owned(),
                version_id: None,
                delete_marker: false,
                delete_marker_version_id: None,
            }],
            errors: vec![DeleteErrorEntry {
                key: "b.txt".to_owned(),
                code: "AccessDenied".to_owned(),
                message: "Access Denied".to_owned(),
            }],
        };
        let xml = xml_string("DeleteResult", &result);
        assert!(xml.contains("<Deleted><Key>a.txt</Key></Deleted>"));
        assert!(xml.contains("<Error><Key>b.txt</Key><Code>AccessDenied</Code>"));
    }

    #[test]
    fn test_should_serialize_multipart_lifecycle_documents() {
        let initiated = InitiateMultipartUploadResult {
            bucket: "photos".to_owned(),
            key: "big.bin".to_owned(),
            upload_id: "upload-1".to_owned(),
        };
        let xml = xml_string("InitiateMultipartUploadResult", &initiated);
        assert!(xml.contains("<UploadId>upload-1</UploadId>"));

        let parts = ListPartsResult {
            bucket: "photos".to_owned(),
            key: "big.bin".to_owned(),
            upload_id: "upload-1".to_owned(),
            max_parts: 1000,
            parts: vec![Part {
                part_number: 1,
                last_modified: test_time(),
                etag: "\"p1\"".to_owned(),
                size: 5 * 1024 * 1024,
            }],
            ..Default::default()
        };
        let xml = xml_string("ListPartsResult", &parts);
        assert!(xml.contains("<Part><PartNumber>1</PartNumber>"));
    }
}
