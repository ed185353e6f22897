//! Observability subsystem.
//!
//! Structured logging via the `tracing` crate; the per-request trace span
//! and request-id stamping live in the HTTP pipeline itself.

pub mod logging;
