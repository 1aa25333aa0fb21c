//! Outbound request forwarding for the `/proxy` endpoint.
//!
//! # Data Flow
//! ```text
//! JSON descriptor (types.rs)
//!     → client.rs (validate, build, send once, buffer body)
//!     → ForwardResponse (status, canonical headers, body text)
//! ```
//!
//! # Design Decisions
//! - Single attempt, no retries
//! - The descriptor timeout bounds the whole exchange, body included
//! - Failures are split by phase so the HTTP layer can pick 400/502/500

pub mod client;
pub mod types;

pub use client::{ForwardError, Forwarder};
pub use types::{canonical_header_name, ForwardRequest, ForwardResponse, HeaderValues};
