//! File operations test-harness service.
//!
//! A small HTTP service that writes, reads, lists, deletes, and bulk-generates
//! files on the host, and forwards arbitrary HTTP requests described as JSON.
//! It is meant for load and capacity testing: there is no authentication, no
//! path sandboxing, and no locking between concurrent requests.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ http::server (router, body limit, trace)
//!                          │
//!                          ▼
//!                      http::request (request ID + span)
//!                          │
//!              ┌───────────┴────────────┐
//!              ▼                        ▼
//!        http::files               http::proxy
//!              │                        │
//!              ▼                        ▼
//!     files::{ops,generate}      forward::Forwarder ──────▶ Upstream
//!              │                        │
//!              └───────────┬────────────┘
//!                          ▼
//!     Client Response ◀─ http::response (envelope) / http::error (text)
//! ```
//!
//! Cross-cutting: `config`, `identity`, `lifecycle`, `observability`.

// Core subsystems
pub mod config;
pub mod http;
pub mod identity;

// Operations
pub mod files;
pub mod forward;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use identity::ServerId;
pub use lifecycle::Shutdown;
