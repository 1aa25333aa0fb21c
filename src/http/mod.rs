//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, body limit, trace layer)
//!     → request.rs (request ID, correlated span, metrics)
//!     → params.rs (query + urlencoded/multipart form fields)
//!     → files.rs / proxy.rs (validate params, call the domain module)
//!     → response.rs (JSON envelope)  |  error.rs (status + plain text)
//!     → Send to client
//! ```

pub mod error;
pub mod files;
pub mod params;
pub mod proxy;
pub mod request;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use params::FormParams;
pub use request::{RequestContext, RequestId, X_REQUEST_ID};
pub use response::{Envelope, FileContent, Payload};
pub use server::{AppState, HttpServer};
