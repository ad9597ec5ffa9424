//! # beacon-collector
//!
//! The composition root: owns the session context, the view gate, and the
//! transport, and dispatches occurrences through the
//! normalize-gate-deliver pipeline.
//!
//! The embedder constructs one [`Collector`] per page load and feeds it
//! occurrences in the order they happen. Everything that can fail does so
//! silently here; the typed errors live further down the stack.

mod collector;

pub use collector::Collector;
