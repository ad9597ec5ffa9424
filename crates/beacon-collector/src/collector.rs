//! The collector: occurrence dispatch over the full pipeline

use std::time::Duration;

use beacon_core::{ActionKind, CollectorConfig, EventRecord, WirePayload};
use beacon_events::{
    click_action, click_label, normalize, view_label, Occurrence, ViewGate, ViewTrigger,
};
use beacon_session::{pathname, resolve, IdentityBackend, IdentityStore, Resolution, SessionContext};
use beacon_transport::Transport;
use tracing::{debug, info};

/// Delay after a back/forward navigation before the view re-fires, giving
/// the new path time to settle
const NAVIGATION_SETTLE_DELAY: Duration = Duration::from_millis(150);

/// One page load's collection pipeline
///
/// Construction resolves the session identity exactly once (URL wins over
/// storage). After that, [`Collector::observe`] is the whole surface: feed
/// it occurrences in the order they happen and it emits event records in
/// that order, dropping anything that arrives while no identity is
/// resolvable.
pub struct Collector {
    config: CollectorConfig,
    store: IdentityStore,
    session: SessionContext,
    gate: ViewGate,
    transport: Transport,
    pathname: String,
    resolution: Resolution,
}

impl Collector {
    /// Create a collector for a page load
    ///
    /// Runs the session resolver once. Never fails: a collector with no
    /// resolvable identity still accepts occurrences and drops them at the
    /// transport gate.
    pub fn new(config: CollectorConfig, backend: Box<dyn IdentityBackend>, page_url: &str) -> Self {
        let store = IdentityStore::new(backend, &config.storage_key);
        let resolution = resolve(page_url, &store, &config.param_name);

        let mut session = SessionContext::new();
        session.apply(&resolution);

        let transport = Transport::from_config(&config);
        let pathname = pathname(page_url);

        if config.debug {
            info!(
                "Collector initialized (identity: {}, persisted: {})",
                resolution.identity.as_deref().unwrap_or("<none>"),
                resolution.persisted
            );
        } else {
            debug!(
                "Collector initialized (identity: {}, persisted: {})",
                resolution.identity.as_deref().unwrap_or("<none>"),
                resolution.persisted
            );
        }

        Self {
            config,
            store,
            session,
            gate: ViewGate::new(),
            transport,
            pathname,
            resolution,
        }
    }

    /// The identity this page load runs under, if any
    pub fn identity(&self) -> Option<&str> {
        self.session.identity()
    }

    /// Outcome of the load-time resolution pass
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Path the collector currently attributes events to
    pub fn current_path(&self) -> &str {
        &self.pathname
    }

    /// Dispatch one occurrence through the pipeline
    ///
    /// Clicks on buttons and anchors, form submissions, and the first view
    /// trigger of a page view each produce one record; everything else is
    /// ignored. A back/forward navigation re-arms the view gate and
    /// re-fires the view after a short settle delay.
    pub async fn observe(&mut self, occurrence: Occurrence) {
        match occurrence {
            Occurrence::Click { target } => {
                let Some(action) = click_action(&target) else {
                    return;
                };
                let label = click_label(action, &target);
                self.emit(action, label.as_deref(), None).await;
            }
            Occurrence::Submit { form_id } => {
                self.emit(ActionKind::FormSubmit, form_id.as_deref(), None)
                    .await;
            }
            Occurrence::View { trigger } => {
                if self.gate.observe(trigger) {
                    self.emit_view().await;
                }
            }
            Occurrence::Navigation { pathname } => {
                self.gate.reset();
                if let Some(path) = pathname {
                    self.pathname = path;
                }
                tokio::time::sleep(NAVIGATION_SETTLE_DELAY).await;
                if self.gate.observe(ViewTrigger::TimeoutFallback) {
                    self.emit_view().await;
                }
            }
        }
    }

    async fn emit_view(&mut self) {
        let label = view_label(&self.pathname);
        self.emit(ActionKind::PageView, Some(&label), None).await;
    }

    async fn emit(&mut self, action: ActionKind, raw_label: Option<&str>, raw_pathname: Option<&str>) {
        let record = normalize(action, raw_label, raw_pathname, &self.pathname);
        self.dispatch(record).await;
    }

    /// Gate on identity, then hand the record to the transport
    ///
    /// The process-wide identity may never have been set (page loaded with
    /// neither URL parameter nor stored value); storage is consulted once
    /// more in case another page load has written one since.
    async fn dispatch(&mut self, record: EventRecord) {
        let session_id = match self.session.identity() {
            Some(id) => id.to_string(),
            None => match self.store.get() {
                Some(recovered) => {
                    self.session.set_identity(recovered.clone());
                    recovered
                }
                None => {
                    if self.config.debug {
                        info!("Dropping {} event: no session identity", record.action);
                    } else {
                        debug!("Dropping {} event: no session identity", record.action);
                    }
                    return;
                }
            },
        };

        let payload = WirePayload::new(session_id, record);
        self.transport.send(payload).await;
    }

    /// Toggle diagnostic visibility at runtime
    ///
    /// The one piece of configuration that is mutable after construction.
    pub fn set_debug(&mut self, enabled: bool) {
        self.config.debug = enabled;
    }

    /// Explicit re-initialization against a new page URL
    ///
    /// The only way the process-wide identity changes mid-life. Re-runs the
    /// resolver and re-arms the view gate.
    pub fn reinitialize(&mut self, page_url: &str) {
        self.resolution = resolve(page_url, &self.store, &self.config.param_name);
        self.session.apply(&self.resolution);
        self.pathname = pathname(page_url);
        self.gate = ViewGate::new();
    }
}
