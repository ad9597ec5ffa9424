//! Fire-once view gate
//!
//! Several overlapping lifecycle signals announce the same logical page view
//! (DOM-ready, window-load, section-load, a generic page-loaded signal, and
//! a timeout fallback). The gate collapses them: exactly one emission per
//! page view, re-armed only by a back/forward navigation.
//!
//! Implemented as a pure transition function over two states so the
//! dedup logic is testable without any trigger wiring. Invalid input cannot
//! exist; every (state, signal) pair is covered and the function never
//! panics.

use crate::occurrence::ViewTrigger;

/// Gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No view emitted for the current page view yet
    Unfired,
    /// A view was emitted; further triggers are swallowed
    Fired,
}

/// Inputs the gate reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSignal {
    /// One of the view trigger sources fired
    Trigger(ViewTrigger),
    /// A back/forward navigation was detected
    BackForward,
}

/// Pure gate transition
///
/// Returns the next state and whether the caller should emit a view record.
/// Unfired -> Fired on the first trigger from any source (emit). Fired ->
/// Unfired only on back/forward (no emit; the re-fire happens on the next
/// trigger). No other transitions exist.
pub fn transition(state: GateState, signal: GateSignal) -> (GateState, bool) {
    match (state, signal) {
        (GateState::Unfired, GateSignal::Trigger(_)) => (GateState::Fired, true),
        (GateState::Fired, GateSignal::Trigger(_)) => (GateState::Fired, false),
        (_, GateSignal::BackForward) => (GateState::Unfired, false),
    }
}

/// Stateful wrapper owned by the composition root
#[derive(Debug)]
pub struct ViewGate {
    state: GateState,
}

impl ViewGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Unfired,
        }
    }

    /// Feed a trigger; returns whether a view should be emitted now
    pub fn observe(&mut self, trigger: ViewTrigger) -> bool {
        let (next, emit) = transition(self.state, GateSignal::Trigger(trigger));
        self.state = next;
        emit
    }

    /// Re-arm the gate on a back/forward navigation
    pub fn reset(&mut self) {
        let (next, _) = transition(self.state, GateSignal::BackForward);
        self.state = next;
    }

    pub fn state(&self) -> GateState {
        self.state
    }
}

impl Default for ViewGate {
    fn default() -> Self {
        Self::new()
    }
}
