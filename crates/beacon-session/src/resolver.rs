//! Session resolution
//!
//! Runs once when a collector is constructed. Precedence: the URL-supplied
//! identifier always wins and is persisted immediately (migrating the
//! session if storage held a different value); otherwise the stored value is
//! used; otherwise the session is anonymous.

use tracing::debug;

use crate::query;
use crate::store::IdentityStore;

/// Outcome of a single resolution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The identity the page will run under, if any
    pub identity: Option<String>,
    /// Whether a new value was written to storage during this pass
    pub persisted: bool,
}

/// Process-wide session state for one page load
///
/// Owned by the composition root and handed by reference to whatever needs
/// the identity. Set once at resolution; mutable only through explicit
/// re-initialization.
#[derive(Debug, Default)]
pub struct SessionContext {
    identity: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn set_identity(&mut self, token: impl Into<String>) {
        self.identity = Some(token.into());
    }

    /// Apply a resolution to the context, replacing any prior identity
    pub fn apply(&mut self, resolution: &Resolution) {
        self.identity = resolution.identity.clone();
    }
}

/// Resolve the session identity for a page load
///
/// Purely local: no network, single-shot. Storage failure never blocks
/// resolution — a URL-supplied identifier is adopted even when persisting it
/// fails.
pub fn resolve(page_url: &str, store: &IdentityStore, param_name: &str) -> Resolution {
    if let Some(token) = query::param(page_url, param_name) {
        let persisted = store.set(&token);
        if !persisted {
            debug!("Session identity adopted from URL but not persisted");
        }
        return Resolution {
            identity: Some(token),
            persisted,
        };
    }

    match store.get() {
        Some(prior) => Resolution {
            identity: Some(prior),
            persisted: false,
        },
        None => {
            debug!("No session identity in URL or storage; session is anonymous");
            Resolution {
                identity: None,
                persisted: false,
            }
        }
    }
}
