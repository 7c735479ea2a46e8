//! Observability subsystem.
//!
//! Loader events (descriptor loaded, defaults applied, reload failures)
//! are emitted as structured `tracing` events; `logging.rs` installs the
//! subscriber that renders them.

pub mod logging;

pub use logging::init_logging;
