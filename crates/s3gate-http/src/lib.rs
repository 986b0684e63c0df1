//! HTTP front end for the s3gate protocol layer.
//!
//! The crate owns the wire protocol and nothing else: it classifies
//! requests, verifies signatures, decodes streaming-signed bodies, and
//! dispatches to callbacks the embedding application registers. Storage
//! semantics live entirely behind those callbacks.
//!
//! # Pipeline
//!
//! 1. [`router`] classifies the request into an operation, bucket, and key
//! 2. [`service`] collects the body, checks the payload hash, and runs
//!    signature verification
//! 3. [`codec`] decodes streaming-signed chunked bodies
//! 4. [`dispatch`] runs the hooks and the operation's callback slot
//!
//! # Example
//!
//! ```rust,no_run
//! use s3gate_http::callbacks::{S3Handlers, ServiceCallbacks, callback};
//! use s3gate_http::response::xml_response;
//! use s3gate_http::router::BaseDomainSet;
//! use s3gate_http::service::{GatewayConfig, S3Gateway};
//!
//! let handlers = S3Handlers {
//!     service: ServiceCallbacks {
//!         list_buckets: callback(|_ctx| async {
//!             Ok(xml_response(b"<ListAllMyBucketsResult/>".to_vec()))
//!         }),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! let config = GatewayConfig {
//!     base_domains: BaseDomainSet::new(["s3gate.local"]),
//!     ..Default::default()
//! };
//! let gateway = S3Gateway::new(config, handlers);
//! # let _ = gateway;
//! ```

pub mod body;
pub mod callbacks;
pub mod codec;
pub mod context;
pub mod dispatch;
pub mod response;
pub mod router;
pub mod service;

pub use body::GatewayBody;
pub use callbacks::{S3Handlers, callback, post_hook, pre_hook};
pub use context::{AuthOutcome, S3Context};
pub use router::{AddressingStyle, BaseDomainResolver, BaseDomainSet, RoutingContext};
pub use service::{GatewayConfig, S3Gateway, serve};
