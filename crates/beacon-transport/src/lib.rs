//! # beacon-transport
//!
//! Delivery of wire payloads to the collection endpoint. One POST per
//! record, bounded by a timeout, every outcome class terminal: success,
//! non-2xx status, timeout, and network failure all end the record's life.
//! The fail-open `send` boundary is what the pipeline calls; the typed
//! `deliver` internals exist for the tests.

mod delivery;

pub use delivery::Transport;
