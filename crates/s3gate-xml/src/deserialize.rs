//! Deserialization of request bodies from S3-compatible XML.
//!
//! Implementations parse the body documents the gateway accepts: tag sets,
//! ACL policies, versioning and website configurations, logging targets,
//! object-lock documents, multi-delete manifests, and multipart completion
//! manifests.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use s3gate_model::types::{
    AccessControlPolicy, BucketLoggingStatus, CompleteMultipartUpload, CompletedPart, Delete,
    Grant, Grantee, LegalHold, LoggingEnabled, ObjectIdentifier, Owner, Permission, Retention,
    Tag, Tagging, VersioningConfiguration, VersioningStatus, WebsiteConfiguration,
};

use crate::error::XmlError;

/// Types that can parse themselves from XML child elements.
///
/// The caller has already consumed the opening tag; implementations read
/// child content through the matching end tag.
pub trait S3Deserialize: Sized {
    /// Deserialize an instance from the given XML reader.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` if the XML is malformed or required fields are
    /// missing.
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError>;
}

/// Deserialize a complete S3 XML document into a typed value.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or deserialization fails.
pub fn from_xml<T: S3Deserialize>(xml: &[u8]) -> Result<T, XmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    // Skip the declaration and position on the root element.
    loop {
        match reader.read_event()? {
            Event::Start(_) => {
                return T::deserialize_xml(&mut reader);
            }
            Event::Eof => {
                return Err(XmlError::MissingElement("root element".to_string()));
            }
            _ => {}
        }
    }
}

fn element_name(start: &BytesStart<'_>) -> Result<String, XmlError> {
    std::str::from_utf8(start.name().as_ref())
        .map(ToOwned::to_owned)
        .map_err(|e| XmlError::ParseError(e.to_string()))
}

/// Read the text content of the current element and consume its end tag.
fn read_text_content(reader: &mut Reader<&[u8]>) -> Result<String, XmlError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                let unescaped = quick_xml::escape::unescape(&decoded)
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::End(_) => return Ok(text),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while reading text content".to_string(),
                ));
            }
            _ => {}
        }
    }
}

/// Skip over an element and all its children.
fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), XmlError> {
    let mut depth: u32 = 1;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while skipping element".to_string(),
                ));
            }
            _ => {}
        }
    }
}

fn parse_bool(s: &str) -> Result<bool, XmlError> {
    match s {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(XmlError::ParseError(format!("invalid boolean: {s}"))),
    }
}

fn parse_i32(s: &str) -> Result<i32, XmlError> {
    s.parse::<i32>()
        .map_err(|e| XmlError::ParseError(format!("invalid i32 '{s}': {e}")))
}

fn parse_timestamp(s: &str) -> Result<chrono::DateTime<chrono::Utc>, XmlError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
                .map(|ndt| ndt.and_utc())
        })
        .map_err(|e| XmlError::ParseError(format!("invalid timestamp '{s}': {e}")))
}

/// Walk the children of the current element, invoking `on_child` at each
/// child start tag, until the matching end tag is consumed.
fn for_each_child(
    reader: &mut Reader<&[u8]>,
    context: &str,
    mut on_child: impl FnMut(&mut Reader<&[u8]>, &str, &BytesStart<'_>) -> Result<(), XmlError>,
) -> Result<(), XmlError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = element_name(&e)?;
                let owned = e.to_owned();
                on_child(reader, &name, &owned)?;
            }
            Event::End(_) => return Ok(()),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(format!(
                    "unexpected EOF in {context}"
                )));
            }
            _ => {}
        }
    }
}

impl S3Deserialize for Tag {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut key = None;
        let mut value = None;
        for_each_child(reader, "Tag", |reader, name, _| {
            match name {
                "Key" => key = Some(read_text_content(reader)?),
                "Value" => value = Some(read_text_content(reader)?),
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(Tag {
            key: key.ok_or_else(|| XmlError::MissingElement("Tag/Key".to_string()))?,
            value: value.unwrap_or_default(),
        })
    }
}

impl S3Deserialize for Tagging {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut tag_set = Vec::new();
        for_each_child(reader, "Tagging", |reader, name, _| {
            match name {
                "TagSet" => {
                    for_each_child(reader, "TagSet", |reader, name, _| {
                        if name == "Tag" {
                            tag_set.push(Tag::deserialize_xml(reader)?);
                        } else {
                            skip_element(reader)?;
                        }
                        Ok(())
                    })?;
                }
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(Tagging { tag_set })
    }
}

impl S3Deserialize for Owner {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut id = String::new();
        let mut display_name = String::new();
        for_each_child(reader, "Owner", |reader, name, _| {
            match name {
                "ID" => id = read_text_content(reader)?,
                "DisplayName" => display_name = read_text_content(reader)?,
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(Owner { id, display_name })
    }
}

fn parse_permission(s: &str) -> Result<Permission, XmlError> {
    match s {
        "FULL_CONTROL" => Ok(Permission::FullControl),
        "READ" => Ok(Permission::Read),
        "WRITE" => Ok(Permission::Write),
        "READ_ACP" => Ok(Permission::ReadAcp),
        "WRITE_ACP" => Ok(Permission::WriteAcp),
        _ => Err(XmlError::ParseError(format!("invalid permission: {s}"))),
    }
}

fn deserialize_grantee(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<Grantee, XmlError> {
    let xsi_type = start
        .try_get_attribute("xsi:type")?
        .map(|attr| attr.unescape_value().map(|v| v.into_owned()))
        .transpose()
        .map_err(|e| XmlError::ParseError(e.to_string()))?
        .unwrap_or_else(|| "CanonicalUser".to_owned());

    let mut id = None;
    let mut display_name = None;
    let mut uri = None;
    for_each_child(reader, "Grantee", |reader, name, _| {
        match name {
            "ID" => id = Some(read_text_content(reader)?),
            "DisplayName" => display_name = Some(read_text_content(reader)?),
            "URI" => uri = Some(read_text_content(reader)?),
            _ => skip_element(reader)?,
        }
        Ok(())
    })?;

    match xsi_type.as_str() {
        "CanonicalUser" => Ok(Grantee::CanonicalUser {
            id: id.ok_or_else(|| XmlError::MissingElement("Grantee/ID".to_string()))?,
            display_name,
        }),
        "Group" => Ok(Grantee::Group {
            uri: uri.ok_or_else(|| XmlError::MissingElement("Grantee/URI".to_string()))?,
        }),
        other => Err(XmlError::ParseError(format!(
            "unsupported grantee type: {other}"
        ))),
    }
}

impl S3Deserialize for Grant {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut grantee = None;
        let mut permission = None;
        for_each_child(reader, "Grant", |reader, name, start| {
            match name {
                "Grantee" => grantee = Some(deserialize_grantee(reader, start)?),
                "Permission" => permission = Some(parse_permission(&read_text_content(reader)?)?),
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(Grant {
            grantee: grantee
                .ok_or_else(|| XmlError::MissingElement("Grant/Grantee".to_string()))?,
            permission: permission
                .ok_or_else(|| XmlError::MissingElement("Grant/Permission".to_string()))?,
        })
    }
}

impl S3Deserialize for AccessControlPolicy {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut owner = Owner::default();
        let mut grants = Vec::new();
        for_each_child(reader, "AccessControlPolicy", |reader, name, _| {
            match name {
                "Owner" => owner = Owner::deserialize_xml(reader)?,
                "AccessControlList" => {
                    for_each_child(reader, "AccessControlList", |reader, name, _| {
                        if name == "Grant" {
                            grants.push(Grant::deserialize_xml(reader)?);
                        } else {
                            skip_element(reader)?;
                        }
                        Ok(())
                    })?;
                }
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(AccessControlPolicy { owner, grants })
    }
}

impl S3Deserialize for VersioningConfiguration {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut status = None;
        for_each_child(reader, "VersioningConfiguration", |reader, name, _| {
            match name {
                "Status" => {
                    status = match read_text_content(reader)?.as_str() {
                        "Enabled" => Some(VersioningStatus::Enabled),
                        "Suspended" => Some(VersioningStatus::Suspended),
                        other => {
                            return Err(XmlError::ParseError(format!(
                                "invalid versioning status: {other}"
                            )));
                        }
                    };
                }
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(VersioningConfiguration { status })
    }
}

impl S3Deserialize for WebsiteConfiguration {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut index_document = None;
        let mut error_document = None;
        for_each_child(reader, "WebsiteConfiguration", |reader, name, _| {
            match name {
                "IndexDocument" => {
                    for_each_child(reader, "IndexDocument", |reader, name, _| {
                        if name == "Suffix" {
                            index_document = Some(read_text_content(reader)?);
                        } else {
                            skip_element(reader)?;
                        }
                        Ok(())
                    })?;
                }
                "ErrorDocument" => {
                    for_each_child(reader, "ErrorDocument", |reader, name, _| {
                        if name == "Key" {
                            error_document = Some(read_text_content(reader)?);
                        } else {
                            skip_element(reader)?;
                        }
                        Ok(())
                    })?;
                }
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(WebsiteConfiguration {
            index_document,
            error_document,
        })
    }
}

impl S3Deserialize for BucketLoggingStatus {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut logging_enabled = None;
        for_each_child(reader, "BucketLoggingStatus", |reader, name, _| {
            match name {
                "LoggingEnabled" => {
                    let mut target_bucket = String::new();
                    let mut target_prefix = String::new();
                    for_each_child(reader, "LoggingEnabled", |reader, name, _| {
                        match name {
                            "TargetBucket" => target_bucket = read_text_content(reader)?,
                            "TargetPrefix" => target_prefix = read_text_content(reader)?,
                            _ => skip_element(reader)?,
                        }
                        Ok(())
                    })?;
                    logging_enabled = Some(LoggingEnabled {
                        target_bucket,
                        target_prefix,
                    });
                }
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(BucketLoggingStatus { logging_enabled })
    }
}

impl S3Deserialize for LegalHold {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut status = String::new();
        for_each_child(reader, "LegalHold", |reader, name, _| {
            match name {
                "Status" => status = read_text_content(reader)?,
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        if status != "ON" && status != "OFF" {
            return Err(XmlError::ParseError(format!(
                "invalid legal hold status: {status}"
            )));
        }
        Ok(LegalHold { status })
    }
}

impl S3Deserialize for Retention {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut mode = None;
        let mut retain_until_date = None;
        for_each_child(reader, "Retention", |reader, name, _| {
            match name {
                "Mode" => mode = Some(read_text_content(reader)?),
                "RetainUntilDate" => {
                    retain_until_date = Some(parse_timestamp(&read_text_content(reader)?)?);
                }
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(Retention {
            mode: mode.ok_or_else(|| XmlError::MissingElement("Retention/Mode".to_string()))?,
            retain_until_date: retain_until_date.ok_or_else(|| {
                XmlError::MissingElement("Retention/RetainUntilDate".to_string())
            })?,
        })
    }
}

impl S3Deserialize for ObjectIdentifier {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut key = None;
        let mut version_id = None;
        for_each_child(reader, "Object", |reader, name, _| {
            match name {
                "Key" => key = Some(read_text_content(reader)?),
                "VersionId" => version_id = Some(read_text_content(reader)?),
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(ObjectIdentifier {
            key: key.ok_or_else(|| XmlError::MissingElement("Object/Key".to_string()))?,
            version_id,
        })
    }
}

impl S3Deserialize for Delete {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut objects = Vec::new();
        let mut quiet = false;
        for_each_child(reader, "Delete", |reader, name, _| {
            match name {
                "Object" => objects.push(ObjectIdentifier::deserialize_xml(reader)?),
                "Quiet" => quiet = parse_bool(&read_text_content(reader)?)?,
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        if objects.is_empty() {
            return Err(XmlError::MissingElement("Delete/Object".to_string()));
        }
        Ok(Delete { objects, quiet })
    }
}

impl S3Deserialize for CompletedPart {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut part_number = None;
        let mut etag = None;
        for_each_child(reader, "Part", |reader, name, _| {
            match name {
                "PartNumber" => part_number = Some(parse_i32(&read_text_content(reader)?)?),
                "ETag" => etag = Some(read_text_content(reader)?),
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(CompletedPart {
            part_number: part_number
                .ok_or_else(|| XmlError::MissingElement("Part/PartNumber".to_string()))?,
            etag: etag.ok_or_else(|| XmlError::MissingElement("Part/ETag".to_string()))?,
        })
    }
}

impl S3Deserialize for CompleteMultipartUpload {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut parts = Vec::new();
        for_each_child(reader, "CompleteMultipartUpload", |reader, name, _| {
            if name == "Part" {
                parts.push(CompletedPart::deserialize_xml(reader)?);
            } else {
                skip_element(reader)?;
            }
            Ok(())
        })?;
        if parts.is_empty() {
            return Err(XmlError::MissingElement(
                "CompleteMultipartUpload/Part".to_string(),
            ));
        }
        Ok(CompleteMultipartUpload { parts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_deserialize_tagging_set() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
            <Tagging><TagSet>
                <Tag><Key>env</Key><Value>prod</Value></Tag>
                <Tag><Key>team</Key><Value>storage</Value></Tag>
            </TagSet></Tagging>"#;
        let tagging: Tagging = from_xml(xml).unwrap();
        assert_eq!(tagging.tag_set.len(), 2);
        assert_eq!(tagging.tag_set[0].key, "env");
        assert_eq!(tagging.tag_set[1].value, "storage");
    }

    #[test]
    fn test_should_deserialize_acl_with_canonical_user_grantee() {
        let xml = br#"<AccessControlPolicy>
            <Owner><ID>owner-1</ID><DisplayName>owner</DisplayName></Owner>
            <AccessControlList>
                <Grant>
                    <Grantee xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="CanonicalUser">
                        <ID>user-1</ID><DisplayName>user</DisplayName>
                    </Grantee>
                    <Permission>READ</Permission>
                </Grant>
            </AccessControlList>
        </AccessControlPolicy>"#;
        let policy: AccessControlPolicy = from_xml(xml).unwrap();
        assert_eq!(policy.owner.id, "owner-1");
        assert_eq!(policy.grants.len(), 1);
        assert_eq!(policy.grants[0].permission, Permission::Read);
        assert!(matches!(
            &policy.grants[0].grantee,
            Grantee::CanonicalUser { id, .. } if id == "user-1"
        ));
    }

    #[test]
    fn test_should_deserialize_group_grantee() {
        let xml = br#"<AccessControlPolicy>
            <Owner><ID>o</ID><DisplayName>o</DisplayName></Owner>
            <AccessControlList>
                <Grant>
                    <Grantee xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="Group">
                        <URI>http://acs.amazonaws.com/groups/global/AllUsers</URI>
                    </Grantee>
                    <Permission>READ</Permission>
                </Grant>
            </AccessControlList>
        </AccessControlPolicy>"#;
        let policy: AccessControlPolicy = from_xml(xml).unwrap();
        assert!(matches!(
            &policy.grants[0].grantee,
            Grantee::Group { uri } if uri.ends_with("AllUsers")
        ));
    }

    #[test]
    fn test_should_deserialize_versioning_configuration() {
        let xml = br"<VersioningConfiguration><Status>Enabled</Status></VersioningConfiguration>";
        let config: VersioningConfiguration = from_xml(xml).unwrap();
        assert_eq!(config.status, Some(VersioningStatus::Enabled));

        let xml = br"<VersioningConfiguration></VersioningConfiguration>";
        let config: VersioningConfiguration = from_xml(xml).unwrap();
        assert_eq!(config.status, None);
    }

    #[test]
    fn test_should_reject_invalid_versioning_status() {
        let xml = br"<VersioningConfiguration><Status>Paused</Status></VersioningConfiguration>";
        let result: Result<VersioningConfiguration, _> = from_xml(xml);
        assert!(matches!(result, Err(XmlError::ParseError(_))));
    }

    #[test]
    fn test_should_deserialize_website_configuration() {
        let xml = br"<WebsiteConfiguration>
            <IndexDocument><Suffix>index.html</Suffix></IndexDocument>
            <ErrorDocument><Key>error.html</Key></ErrorDocument>
        </WebsiteConfiguration>";
        let config: WebsiteConfiguration = from_xml(xml).unwrap();
        assert_eq!(config.index_document.as_deref(), Some("index.html"));
        assert_eq!(config.error_document.as_deref(), Some("error.html"));
    }

    #[test]
    fn test_should_deserialize_logging_status() {
        let xml = br"<BucketLoggingStatus>
            <LoggingEnabled>
                <TargetBucket>logs</TargetBucket>
                <TargetPrefix>photos/</TargetPrefix>
            </LoggingEnabled>
        </BucketLoggingStatus>";
        let status: BucketLoggingStatus = from_xml(xml).unwrap();
        let logging = status.logging_enabled.unwrap();
        assert_eq!(logging.target_bucket, "logs");
        assert_eq!(logging.target_prefix, "photos/");

        let xml = br"<BucketLoggingStatus></BucketLoggingStatus>";
        let status: BucketLoggingStatus = from_xml(xml).unwrap();
        assert!(status.logging_enabled.is_none());
    }

    #[test]
    fn test_should_deserialize_legal_hold_and_reject_invalid_status() {
        let xml = br"<LegalHold><Status>ON</Status></LegalHold>";
        let hold: LegalHold = from_xml(xml).unwrap();
        assert_eq!(hold.status, "ON");

        let xml = br"<LegalHold><Status>MAYBE</Status></LegalHold>";
        let result: Result<LegalHold, _> = from_xml(xml);
        assert!(matches!(result, Err(XmlError::ParseError(_))));
    }

    #[test]
    fn test_should_deserialize_retention_with_timestamp() {
        let xml = br"<Retention>
            <Mode>GOVERNANCE</Mode>
            <RetainUntilDate>2030-01-01T00:00:00.000Z</RetainUntilDate>
        </Retention>";
        let retention: Retention = from_xml(xml).unwrap();
        assert_eq!(retention.mode, "GOVERNANCE");
        assert_eq!(retention.retain_until_date.timestamp(), 1_893_456_000);
    }

    #[test]
    fn test_should_deserialize_multi_delete_manifest() {
        let xml = br"<Delete>
            <Quiet>true</Quiet>
            <Object><Key>a.txt</Key></Object>
            <Object><Key>b.txt</Key><VersionId>v1</VersionId></Object>
        </Delete>";
        let delete: Delete = from_xml(xml).unwrap();
        assert!(delete.quiet);
        assert_eq!(delete.objects.len(), 2);
        assert_eq!(delete.objects[1].version_id.as_deref(), Some("v1"));
    }

    #[test]
    fn test_should_reject_empty_delete_manifest() {
        let xml = br"<Delete><Quiet>false</Quiet></Delete>";
        let result: Result<Delete, _> = from_xml(xml);
        assert!(matches!(result, Err(XmlError::MissingElement(_))));
    }

    #[test]
    fn test_should_deserialize_multipart_completion_manifest() {
        let xml = br#"<CompleteMultipartUpload>
            <Part><PartNumber>1</PartNumber><ETag>"e1"</ETag></Part>
            <Part><PartNumber>2</PartNumber><ETag>"e2"</ETag></Part>
        </CompleteMultipartUpload>"#;
        let manifest: CompleteMultipartUpload = from_xml(xml).unwrap();
        assert_eq!(manifest.parts.len(), 2);
        assert_eq!(manifest.parts[0].part_number, 1);
        assert_eq!(manifest.parts[1].etag, "\"e2\"");
    }

    #[test]
    fn test_should_reject_malformed_document() {
        let xml = br"<Tagging><TagSet>";
        let result: Result<Tagging, _> = from_xml(xml);
        assert!(result.is_err());
    }
}
