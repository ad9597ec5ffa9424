//! # beacon-core
//!
//! Core types for the beacon page-event collection pipeline.
//!
//! Beacon observes page interactions (views, clicks, form submissions) on a
//! host page, correlates them under a session identity, and reports them to
//! a remote collection endpoint. A collector embedded in someone else's page
//! must never break that page, so every boundary in this workspace degrades
//! silently instead of raising.
//!
//! ## Core Paradigm
//!
//! - Session identity is resolved once per page load (URL wins over storage)
//! - Every observable occurrence becomes one immutable event record
//! - Delivery is fire-and-forget: no retry, no queueing, no escalation
//! - Failures are invisible to the embedder, typed for the tests

mod config;
mod error;
mod types;

pub mod fail_open;

pub use config::CollectorConfig;
pub use error::{BeaconError, Result};
pub use types::*;
