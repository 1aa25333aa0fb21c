//! Filesystem operations exposed over HTTP.
//!
//! # Data Flow
//! ```text
//! http handler (validated params)
//!     → ops.rs (write / read / list / delete one entry)
//!     → generate.rs (bulk filler files)
//!     → host filesystem
//! ```
//!
//! # Design Decisions
//! - Functions return `std::io::Error` (or a typed wrapper); the HTTP layer
//!   decides which status a failure maps to
//! - No locking: concurrent writers to one path race, last writer wins
//! - No atomic or durable writes; a failed bulk run leaves earlier files

pub mod generate;
pub mod ops;

pub use generate::{filler_content, generate_files, GeneratePlan, GenerateSummary};
pub use ops::{delete_file, list_files, read_file, write_file, FileEntry, ListError};
