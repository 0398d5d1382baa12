//! Static file serving subsystem.
//!
//! # Data Flow
//! ```text
//! GET/HEAD request target
//!     → path.rs (decode, normalize, confine to document root)
//!     → server.rs (directory redirect / index / listing, open)
//!     → conditional.rs (If-Modified-Since vs truncated mtime → 304)
//!     → server.rs (headers, stream body via ReaderStream)
//! ```
//!
//! # Design Decisions
//! - The open file is owned by the response body stream, so it is closed
//!   when streaming finishes or the client goes away
//! - Only the subset of conditional GET the auction pages exercise:
//!   no ETags, ranges or compression

pub mod conditional;
pub mod listing;
pub mod path;
pub mod server;

pub use server::FileServer;
