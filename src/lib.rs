//! HTTP server bootstrap for a small user-management API.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────┐
//!                 │                  user-service                     │
//!                 │                                                   │
//!  Client Request │  ┌──────────┐   ┌───────────┐   ┌─────────────┐  │
//!  ───────────────┼─▶│ request  │──▶│   CORS    │──▶│ body/cookie │  │
//!                 │  │ id+trace │   │  policy   │   │   parsing   │  │
//!                 │  └──────────┘   └───────────┘   └──────┬──────┘  │
//!                 │                                        │         │
//!                 │                                        ▼         │
//!                 │              ┌────────────┐   ┌──────────────┐   │
//!  Client Response│              │   error    │◀──│ health route │   │
//!  ◀──────────────┼──────────────│ formatting │   │ user routes  │   │
//!                 │              └────────────┘   │ 404 fallback │   │
//!                 │                               └──────┬───────┘   │
//!                 │  ┌─────────────────────────────┐     │           │
//!                 │  │     Cross-Cutting Concerns   │     ▼           │
//!                 │  │  ┌────────┐ ┌─────────────┐ │  ┌─────────┐    │
//!                 │  │  │ config │ │  lifecycle  │ │  │ db slot │    │
//!                 │  │  │        │ │ start/stop  │ │  │(1 write)│    │
//!                 │  │  └────────┘ └─────────────┘ │  └─────────┘    │
//!                 │  └─────────────────────────────┘                 │
//!                 └──────────────────────────────────────────────────┘
//! ```
//!
//! The lifecycle controller connects the database once at startup, then
//! either binds a socket (standalone) or hands the composed application to
//! an external host (hosted).

// Core subsystems
pub mod config;
pub mod db;
pub mod http;
pub mod routes;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
