//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ optional .env file)
//!     → loader.rs (read once at entry, assemble AppConfig)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → passed by value into the lifecycle controller
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no component reads the environment
//!   after process entry
//! - All fields have defaults so an empty environment still runs
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every violation at once

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{AppConfig, CorsConfig, DatabaseConfig, LifecycleConfig, RunMode, ServerConfig};
pub use validation::ValidationError;
