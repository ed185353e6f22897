//! Request-pipeline stages.
//!
//! Each stage either short-circuits with a response (through the error
//! pipeline) or delegates downstream. Stage order is fixed in
//! `http::server::build_router`.

pub mod body;
pub mod cookies;
pub mod cors;

pub use body::ParsedBody;
pub use cookies::Cookies;
pub use cors::CorsPolicy;
