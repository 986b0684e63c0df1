//! Response construction helpers.

use http::{Response, StatusCode, header};
use s3gate_model::S3Error;
use s3gate_xml::error_document;
use tracing::error;

use crate::body::GatewayBody;

/// Render an [`S3Error`] as its XML error response.
#[must_use]
pub fn error_response(err: &S3Error) -> Response<GatewayBody> {
    let body = error_document(err);
    match Response::builder()
        .status(err.status_code)
        .header(header::CONTENT_TYPE, "application/xml")
        .header(header::CONTENT_LENGTH, body.len())
        .body(GatewayBody::from_bytes(body))
    {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "failed to build error response");
            fallback_response()
        }
    }
}

/// A 200 response carrying an XML document.
#[must_use]
pub fn xml_response(body: Vec<u8>) -> Response<GatewayBody> {
    xml_response_with_status(StatusCode::OK, body)
}

/// An XML response with an explicit status.
#[must_use]
pub fn xml_response_with_status(status: StatusCode, body: Vec<u8>) -> Response<GatewayBody> {
    match Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/xml")
        .header(header::CONTENT_LENGTH, body.len())
        .body(GatewayBody::from_bytes(body))
    {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "failed to build XML response");
            fallback_response()
        }
    }
}

/// A bodiless response with the given status.
#[must_use]
pub fn empty_response(status: StatusCode) -> Response<GatewayBody> {
    match Response::builder().status(status).body(GatewayBody::empty()) {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "failed to build empty response");
            fallback_response()
        }
    }
}

fn fallback_response() -> Response<GatewayBody> {
    let mut response = Response::new(GatewayBody::empty());
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

/// Stamp the headers every response carries.
pub fn add_common_headers(response: &mut Response<GatewayBody>, request_id: &str) {
    let headers = response.headers_mut();
    if let Ok(value) = request_id.parse::<header::HeaderValue>() {
        headers.insert("x-amz-request-id", value.clone());
        headers.insert("x-amz-id-2", value);
    }
    headers.insert("server", header::HeaderValue::from_static("s3gate"));
}
