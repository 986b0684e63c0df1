//! Response body type for the gateway.
//!
//! Handlers produce either a fully buffered payload (XML documents, object
//! data) or no body at all (HEAD responses, 204s). A small enum keeps the
//! response type concrete without boxing.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::{Body, Frame, SizeHint};
use http_body_util::Full;

/// The body of every gateway response.
#[derive(Debug)]
pub enum GatewayBody {
    /// A fully buffered payload.
    Buffered(Full<Bytes>),
    /// No body.
    Empty,
}

impl GatewayBody {
    /// A body wrapping the given bytes.
    #[must_use]
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self::Buffered(Full::new(data.into()))
    }

    /// A body with no content.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty
    }
}

impl Body for GatewayBody {
    type Data = Bytes;
    type Error = std::convert::Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match self.get_mut() {
            Self::Buffered(full) => Pin::new(full).poll_frame(cx),
            Self::Empty => Poll::Ready(None),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            Self::Buffered(full) => full.is_end_stream(),
            Self::Empty => true,
        }
    }

    fn size_hint(&self) -> SizeHint {
        match self {
            Self::Buffered(full) => full.size_hint(),
            Self::Empty => SizeHint::with_exact(0),
        }
    }
}

impl From<Bytes> for GatewayBody {
    fn from(data: Bytes) -> Self {
        Self::from_bytes(data)
    }
}

impl From<Vec<u8>> for GatewayBody {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(data)
    }
}

impl From<String> for GatewayBody {
    fn from(data: String) -> Self {
        Self::from_bytes(data.into_bytes())
    }
}
