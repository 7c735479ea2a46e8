//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve paths → Load descriptor → Publish configuration
//!     (any failure → diagnostic → exit)
//! ```

pub mod startup;

pub use startup::{load_service_config_or_exit, load_shared_or_exit};
