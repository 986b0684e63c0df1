//! Data model for the s3gate protocol-compatibility layer.
//!
//! This crate holds the pieces of the S3 wire protocol that every other
//! s3gate crate agrees on:
//!
//! - [`operations`] - The [`S3RequestType`](operations::S3RequestType) enum
//!   naming every operation the gateway can classify, and the resource level
//!   (service / bucket / object) each one implies.
//! - [`error`] - The S3 error-code taxonomy and the [`S3Error`](error::S3Error)
//!   type that every stage converts its failures into.
//! - [`params`] - Query parameters passed through verbatim to handlers
//!   (prefix, delimiter, markers, multipart identifiers, byte ranges).
//! - [`types`] - Plain data records for the XML-mapped request and response
//!   shapes (tagging sets, ACL policies, listings, multipart metadata).
//!
//! The crate is deliberately free of HTTP-server and crypto concerns; it only
//! describes shapes.

pub mod error;
pub mod operations;
pub mod params;
pub mod types;

pub use error::{S3Error, S3ErrorCode};
pub use operations::{ResourceLevel, S3RequestType};
pub use params::{ByteRange, ListParams};
