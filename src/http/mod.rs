//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → middleware/ (request id, trace, CORS, body decode, cookies)
//!     → routes/ (health endpoint, user route group)
//!     → error.rs fallback (no match → 404)
//!     → error.rs formatter (any error → structured JSON)
//!     → response
//! ```

pub mod error;
pub mod extract;
pub mod middleware;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use extract::Payload;
pub use middleware::Cookies;
pub use server::{AppState, HttpServer};
