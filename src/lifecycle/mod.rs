//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     compose application → connect database (one-shot)
//!         → standalone: bind socket → serve until shutdown
//!         → hosted: return the composed application, no socket
//!
//! Shutdown (shutdown.rs):
//!     signal received → stop accepting → drain connections → return
//! ```
//!
//! Startup states, one-shot per process:
//! ```text
//! Uninitialized → ConnectingDb → Listening        (standalone, connected)
//!                              → ReadyHosted      (hosted, connected)
//!                              → error returned   (fatal policy)
//!                              → DegradedHosted   (non-fatal policy, slot empty)
//! ```
//!
//! No reconnection or retry loop lives here; retry policy belongs to the
//! database connector.

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{start, App, Started, StartupError};
