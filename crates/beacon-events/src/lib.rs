//! # beacon-events
//!
//! Pure event machinery: occurrence descriptors the embedder feeds in, the
//! normalizer that turns them into canonical event records, and the
//! fire-once view gate.
//!
//! Key design principles:
//! - No I/O anywhere in this crate; everything here is unit-testable
//!   without a live page or a network
//! - The gate is a pure transition function over two states
//! - Label policy is total: malformed targets fall through to sentinels,
//!   never to errors

mod gate;
mod normalize;
mod occurrence;

pub use gate::{transition, GateSignal, GateState, ViewGate};
pub use normalize::{clean_label, click_action, click_label, normalize, view_label};
pub use occurrence::{ClickTarget, Occurrence, ViewTrigger};
