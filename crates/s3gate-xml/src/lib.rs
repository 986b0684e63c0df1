//! XML wire mapping for the s3gate protocol layer.
//!
//! Converts between the typed shapes in `s3gate-model` and the RestXml wire
//! format, with `noErrorWrapping: true` (errors are flat `<Error>` elements).
//!
//! # Key components
//!
//! - [`S3Serialize`] and [`to_xml`] render response bodies
//! - [`S3Deserialize`] and [`from_xml`] parse request bodies
//! - [`error_document`] renders an `S3Error` as its wire document
//!
//! # Conventions
//!
//! - Namespace: `http://s3.amazonaws.com/doc/2006-03-01/`
//! - Booleans: lowercase `true`/`false`
//! - Timestamps: ISO 8601 format (`2006-02-03T16:45:09.000Z`)
//! - XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`

pub mod deserialize;
pub mod error;
pub mod serialize;

pub use deserialize::{S3Deserialize, from_xml};
pub use error::{XmlError, error_document, error_to_xml};
pub use serialize::{S3_NAMESPACE, S3Serialize, to_xml};
