//! Analytics Dispatcher
//!
//! Fire-and-forget запись событий. In-flight флаг принадлежит инстансу
//! dispatcher'а: пока предыдущий send не завершился, новые вызовы
//! молча отбрасываются (включая разные события от того же инстанса).

use crate::ports::AnalyticsSink;
use crate::services::{AttributionTracker, IdentityResolver};
use domain::{AnalyticsAction, AnalyticsEvent, SubjectId};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct AnalyticsDispatcher {
    sink: Arc<dyn AnalyticsSink>,
    identity: Arc<IdentityResolver>,
    namespace: String,
    attribution: Option<Arc<AttributionTracker>>,
    enabled: bool,
    in_flight: Arc<AtomicBool>,
    last_send: Mutex<Option<JoinHandle<()>>>,
}

/// Clears the in-flight flag when the send task ends, however it ends
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AnalyticsDispatcher {
    pub fn new(
        sink: Arc<dyn AnalyticsSink>,
        identity: Arc<IdentityResolver>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            identity,
            namespace: namespace.into(),
            attribution: None,
            enabled: true,
            in_flight: Arc::new(AtomicBool::new(false)),
            last_send: Mutex::new(None),
        }
    }

    /// Attach last-seen campaign parameters to every event
    pub fn with_attribution(mut self, attribution: Arc<AttributionTracker>) -> Self {
        self.attribution = Some(attribution);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Record an event without waiting for the backend.
    ///
    /// Returns whether a send was attempted. Must be called inside a tokio runtime.
    pub fn track_event(
        &self,
        subject: &SubjectId,
        action: AnalyticsAction,
        metadata: Option<BTreeMap<String, String>>,
    ) -> bool {
        if !self.enabled {
            return false;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(subject = %subject, %action, "analytics send in flight, event dropped");
            return false;
        }
        let guard = InFlightGuard(self.in_flight.clone());

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "no async runtime, analytics event dropped");
                return false;
            }
        };

        let event = AnalyticsEvent::new(subject.clone(), action)
            .with_metadata(self.build_metadata(metadata))
            .with_client(self.identity.get_or_create_client_id(&self.namespace));

        let sink = self.sink.clone();
        let task = handle.spawn(async move {
            let _guard = guard;
            match sink.record(&event).await {
                Ok(()) => debug!(subject = %event.subject_id, action = %event.action, "analytics event recorded"),
                Err(e) => warn!(
                    subject = %event.subject_id,
                    action = %event.action,
                    error = %e,
                    "analytics event dropped"
                ),
            }
        });

        *self.last_send.lock() = Some(task);
        true
    }

    /// Wait for the most recent send to finish (used before process exit)
    pub async fn flush(&self) {
        let task = self.last_send.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!(error = %e, "analytics send task failed");
            }
        }
    }

    /// Attribution first, caller metadata wins on key collisions
    fn build_metadata(&self, metadata: Option<BTreeMap<String, String>>) -> BTreeMap<String, String> {
        let mut merged = self
            .attribution
            .as_ref()
            .map(|tracker| tracker.current().to_metadata())
            .unwrap_or_default();

        if let Some(metadata) = metadata {
            merged.extend(metadata);
        }
        merged
    }
}
