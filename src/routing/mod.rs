//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! urlmapping lines (descriptor order)
//!     → router.rs (parse "<METHOD> <URL> <RPC-METHOD>")
//!     → RouteTable (ordered, immutable)
//!     → handed to the HTTP dispatcher
//! ```
//!
//! # Design Decisions
//! - Rebuilt wholesale on every load, no incremental updates
//! - Order is priority: the dispatcher takes the first match
//! - A malformed line fails the load

pub mod router;

pub use router::{Route, RouteTable};
