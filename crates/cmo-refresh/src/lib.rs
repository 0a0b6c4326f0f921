//! cmo-refresh: Refresh coordination for the CMO dashboard
//!
//! The dashboard shows four independently-fetched data domains (alertas,
//! transitos, precintos, system status). This crate runs their refresh
//! callbacks as one logical operation with the two guarantees the UI
//! depends on:
//!
//! - **Re-entrancy protection**: a refresh in progress suppresses a new
//!   one, so the manual refresh button and the interval timer never
//!   overlap.
//! - **Minimum visible delay**: a cycle never signals completion faster
//!   than the configured perceptual floor, so the loading indicator does
//!   not flicker on fast networks.

pub mod auto;
pub mod coordinator;
pub mod errors;
pub mod types;

pub use auto::spawn_auto_refresh;
pub use coordinator::RefreshCoordinator;
pub use errors::{RefreshError, SourceFailure};
pub use types::{RefreshDomain, RefreshOutcome, SourceError, SourceFn, SourceFuture};
