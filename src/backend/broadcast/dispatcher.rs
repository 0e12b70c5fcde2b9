//! Broadcast Dispatcher
//!
//! Resolves the connection ids registered for a target scope, pushes a
//! payload to each of them concurrently, and reports a per-connection
//! delivery outcome. All attempts are issued together and jointly awaited;
//! a slow or failing delivery never cancels or delays its siblings.
//!
//! # Failure semantics
//!
//! - Registry read failure degrades to an empty target set: the broadcast
//!   becomes a logged no-op, the caller is never failed.
//! - Transient push failures are retried with a bounded doubling backoff.
//! - `Gone` connections are not retried; their registration is dropped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;

use crate::backend::broadcast::push::{ConnectionPusher, PushError};
use crate::backend::registry::ConnectionRegistry;
use crate::shared::event::BoardEvent;

/// Target scope of one broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastScope {
    /// Connections registered for one board
    Board(String),
    /// Every connection in the registry
    Global,
}

/// Outcome of one delivery attempt chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Failed { reason: String },
}

/// Per-connection delivery result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub connection_id: String,
    pub status: DeliveryStatus,
}

/// Aggregate result of a broadcast: exactly one outcome per targeted
/// connection, in target order
#[derive(Debug, Clone, Default)]
pub struct BroadcastReport {
    pub outcomes: Vec<DeliveryOutcome>,
}

impl BroadcastReport {
    /// Number of targeted connections
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of successful deliveries
    pub fn delivered_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == DeliveryStatus::Delivered)
            .count()
    }

    /// Connection ids whose delivery ultimately failed
    pub fn failed_ids(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, DeliveryStatus::Failed { .. }))
            .map(|o| o.connection_id.as_str())
            .collect()
    }

    /// True when every targeted delivery succeeded (vacuously true for an
    /// empty target set)
    pub fn all_delivered(&self) -> bool {
        self.failed_ids().is_empty()
    }
}

/// Bounded retry policy for transient delivery failures
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Re-attempts after the initial delivery (0 disables retries)
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Policy with retries disabled (used by tests)
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Fans update notifications out to registered connections
#[derive(Clone)]
pub struct BroadcastDispatcher {
    registry: Arc<dyn ConnectionRegistry>,
    pusher: Arc<dyn ConnectionPusher>,
    retry: RetryPolicy,
}

impl BroadcastDispatcher {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, pusher: Arc<dyn ConnectionPusher>) -> Self {
        Self {
            registry,
            pusher,
            retry: RetryPolicy::default(),
        }
    }

    /// Override the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Same registry and policy, different push capability
    ///
    /// Used when an invocation derives a gateway endpoint of its own.
    pub fn with_pusher(&self, pusher: Arc<dyn ConnectionPusher>) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            pusher,
            retry: self.retry,
        }
    }

    /// Resolve the connection ids for a scope
    ///
    /// A registry read failure is logged and swallowed; the caller gets an
    /// empty target set, never an error.
    pub async fn resolve_connections(&self, scope: &BroadcastScope) -> Vec<String> {
        let result = match scope {
            BroadcastScope::Board(board_id) => {
                self.registry.connections_for_board(board_id).await
            }
            BroadcastScope::Global => self.registry.all_connections().await,
        };

        match result {
            Ok(connection_ids) => connection_ids,
            Err(e) => {
                tracing::error!("[Broadcast] Failed to resolve connections: {}", e);
                Vec::new()
            }
        }
    }

    /// Deliver an event to every connection in scope
    ///
    /// `exclude` removes the triggering connection's own id from the
    /// target set before dispatch. The returned report holds exactly one
    /// outcome per targeted connection.
    pub async fn dispatch(
        &self,
        scope: &BroadcastScope,
        event: &BoardEvent,
        exclude: Option<&str>,
    ) -> BroadcastReport {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("[Broadcast] Failed to serialize event: {}", e);
                return BroadcastReport::default();
            }
        };

        let mut targets = self.resolve_connections(scope).await;
        if let Some(own_id) = exclude {
            targets.retain(|id| id != own_id);
        }

        if targets.is_empty() {
            tracing::debug!("[Broadcast] No connections in scope, nothing to deliver");
            return BroadcastReport::default();
        }

        tracing::info!("[Broadcast] Dispatching to {} connections", targets.len());

        let mut statuses: HashMap<String, DeliveryStatus> = HashMap::new();
        let mut pending = targets.clone();

        for attempt in 0..=self.retry.max_retries {
            if attempt > 0 {
                tracing::info!(
                    "[Broadcast] Retry {} for {} connections",
                    attempt,
                    pending.len()
                );
                tokio::time::sleep(self.retry.delay_for(attempt - 1)).await;
            }

            // One concurrent wave; every attempt settles before we proceed.
            let results = join_all(pending.iter().map(|connection_id| {
                let payload = payload.as_str();
                async move {
                    let result = self.pusher.push(connection_id, payload).await;
                    (connection_id.clone(), result)
                }
            }))
            .await;

            let mut next_wave = Vec::new();
            for (connection_id, result) in results {
                match result {
                    Ok(()) => {
                        statuses.insert(connection_id, DeliveryStatus::Delivered);
                    }
                    Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                        next_wave.push(connection_id);
                    }
                    Err(e) => {
                        if let PushError::Gone { .. } = &e {
                            self.drop_gone_connection(&connection_id).await;
                        }
                        tracing::warn!(
                            "[Broadcast] Delivery to {} failed: {}",
                            connection_id,
                            e
                        );
                        statuses.insert(
                            connection_id,
                            DeliveryStatus::Failed {
                                reason: e.to_string(),
                            },
                        );
                    }
                }
            }

            if next_wave.is_empty() {
                break;
            }
            pending = next_wave;
        }

        // Report in target order; anything not settled above failed its
        // final retry wave.
        let outcomes = targets
            .into_iter()
            .map(|connection_id| {
                let status = statuses
                    .remove(&connection_id)
                    .unwrap_or(DeliveryStatus::Failed {
                        reason: "retries exhausted".to_string(),
                    });
                DeliveryOutcome {
                    connection_id,
                    status,
                }
            })
            .collect();

        let report = BroadcastReport { outcomes };
        if report.all_delivered() {
            tracing::info!("[Broadcast] Delivered to all {} connections", report.len());
        } else {
            tracing::warn!(
                "[Broadcast] {}/{} deliveries failed: {:?}",
                report.failed_ids().len(),
                report.len(),
                report.failed_ids()
            );
        }
        report
    }

    async fn drop_gone_connection(&self, connection_id: &str) {
        if let Err(e) = self.registry.deregister(connection_id).await {
            tracing::warn!(
                "[Broadcast] Failed to deregister gone connection {}: {}",
                connection_id,
                e
            );
        } else {
            tracing::info!("[Broadcast] Deregistered gone connection {}", connection_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::registry::{ConnectionRegistry, ConnectionScope};
    use crate::backend::store::{MemoryStore, StoreError};
    use crate::shared::event::BoardEvent;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Pusher that fails for a scripted set of connection ids
    struct ScriptedPusher {
        fail_ids: Vec<String>,
        gone_ids: Vec<String>,
        attempts: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedPusher {
        fn new(fail_ids: &[&str], gone_ids: &[&str]) -> Self {
            Self {
                fail_ids: fail_ids.iter().map(|s| s.to_string()).collect(),
                gone_ids: gone_ids.iter().map(|s| s.to_string()).collect(),
                attempts: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ConnectionPusher for ScriptedPusher {
        async fn push(&self, connection_id: &str, _payload: &str) -> Result<(), PushError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(connection_id.to_string());
            if self.gone_ids.iter().any(|id| id == connection_id) {
                Err(PushError::gone(connection_id))
            } else if self.fail_ids.iter().any(|id| id == connection_id) {
                Err(PushError::transport("scripted failure"))
            } else {
                Ok(())
            }
        }
    }

    /// Registry whose reads always fail
    struct FailingRegistry;

    #[async_trait]
    impl ConnectionRegistry for FailingRegistry {
        async fn register(&self, _: &str, _: ConnectionScope) -> Result<(), StoreError> {
            Ok(())
        }

        async fn deregister(&self, _: &str) -> Result<(), StoreError> {
            Ok(())
        }

        async fn connections_for_board(&self, _: &str) -> Result<Vec<String>, StoreError> {
            Err(StoreError::request("registry unavailable"))
        }

        async fn all_connections(&self) -> Result<Vec<String>, StoreError> {
            Err(StoreError::request("registry unavailable"))
        }
    }

    async fn registry_with(connections: &[(&str, ConnectionScope)]) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::default());
        for (id, scope) in connections {
            store.register(id, scope.clone()).await.unwrap();
        }
        store
    }

    fn event() -> BoardEvent {
        BoardEvent::message(None, serde_json::json!({"text": "hi"}))
    }

    #[tokio::test]
    async fn test_fan_out_reports_one_outcome_per_connection() {
        let registry = registry_with(&[
            ("c1", ConnectionScope::Global),
            ("c2", ConnectionScope::Global),
            ("c3", ConnectionScope::Global),
        ])
        .await;
        let pusher = Arc::new(ScriptedPusher::new(&["c2"], &[]));
        let dispatcher = BroadcastDispatcher::new(registry, pusher.clone())
            .with_retry_policy(RetryPolicy::none());

        let report = dispatcher
            .dispatch(&BroadcastScope::Global, &event(), None)
            .await;

        assert_eq!(report.len(), 3);
        assert_eq!(report.delivered_count(), 2);
        assert_eq!(report.failed_ids(), vec!["c2"]);
        assert!(!report.all_delivered());
    }

    #[tokio::test]
    async fn test_all_delivered() {
        let registry = registry_with(&[
            ("c1", ConnectionScope::Global),
            ("c2", ConnectionScope::Global),
        ])
        .await;
        let dispatcher = BroadcastDispatcher::new(registry, Arc::new(ScriptedPusher::new(&[], &[])));

        let report = dispatcher
            .dispatch(&BroadcastScope::Global, &event(), None)
            .await;
        assert!(report.all_delivered());
        assert_eq!(report.delivered_count(), 2);
    }

    #[tokio::test]
    async fn test_self_exclusion() {
        let registry = registry_with(&[
            ("c1", ConnectionScope::Board("b1".to_string())),
            ("c2", ConnectionScope::Board("b1".to_string())),
        ])
        .await;
        let pusher = Arc::new(ScriptedPusher::new(&[], &[]));
        let dispatcher = BroadcastDispatcher::new(registry, pusher.clone());

        let report = dispatcher
            .dispatch(
                &BroadcastScope::Board("b1".to_string()),
                &event(),
                Some("c1"),
            )
            .await;

        assert_eq!(report.len(), 1);
        assert_eq!(report.outcomes[0].connection_id, "c2");
        let seen = pusher.seen.lock().unwrap().clone();
        assert!(!seen.contains(&"c1".to_string()));
    }

    #[tokio::test]
    async fn test_board_scope_only_targets_that_board() {
        let registry = registry_with(&[
            ("c1", ConnectionScope::Board("b1".to_string())),
            ("c2", ConnectionScope::Board("b2".to_string())),
            ("c3", ConnectionScope::Global),
        ])
        .await;
        let dispatcher = BroadcastDispatcher::new(registry, Arc::new(ScriptedPusher::new(&[], &[])));

        let report = dispatcher
            .dispatch(&BroadcastScope::Board("b1".to_string()), &event(), None)
            .await;
        assert_eq!(report.len(), 1);
        assert_eq!(report.outcomes[0].connection_id, "c1");
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let registry = registry_with(&[("c1", ConnectionScope::Global)]).await;
        let pusher = Arc::new(ScriptedPusher::new(&["c1"], &[]));
        let dispatcher = BroadcastDispatcher::new(registry, pusher.clone()).with_retry_policy(
            RetryPolicy {
                max_retries: 2,
                base_delay: Duration::from_millis(1),
            },
        );

        let report = dispatcher
            .dispatch(&BroadcastScope::Global, &event(), None)
            .await;

        // initial attempt plus two retries, all failing
        assert_eq!(pusher.attempts.load(Ordering::SeqCst), 3);
        assert_eq!(report.failed_ids(), vec!["c1"]);
    }

    #[tokio::test]
    async fn test_gone_connections_are_dropped_not_retried() {
        let registry = registry_with(&[("c1", ConnectionScope::Global)]).await;
        let pusher = Arc::new(ScriptedPusher::new(&[], &["c1"]));
        let dispatcher =
            BroadcastDispatcher::new(registry.clone(), pusher.clone()).with_retry_policy(
                RetryPolicy {
                    max_retries: 2,
                    base_delay: Duration::from_millis(1),
                },
            );

        let report = dispatcher
            .dispatch(&BroadcastScope::Global, &event(), None)
            .await;

        assert_eq!(pusher.attempts.load(Ordering::SeqCst), 1);
        assert_eq!(report.failed_ids(), vec!["c1"]);
        assert!(registry.all_connections().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_registry_read_failure_degrades_to_empty_report() {
        let pusher = Arc::new(ScriptedPusher::new(&[], &[]));
        let dispatcher = BroadcastDispatcher::new(Arc::new(FailingRegistry), pusher.clone());

        let report = dispatcher
            .dispatch(&BroadcastScope::Global, &event(), None)
            .await;
        assert!(report.is_empty());
        assert!(report.all_delivered());

        let report = dispatcher
            .dispatch(&BroadcastScope::Board("b1".to_string()), &event(), None)
            .await;
        assert!(report.is_empty());

        // no push is ever attempted on an unresolvable scope
        assert_eq!(pusher.attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_scope_is_a_no_op() {
        let registry = registry_with(&[]).await;
        let pusher = Arc::new(ScriptedPusher::new(&[], &[]));
        let dispatcher = BroadcastDispatcher::new(registry, pusher.clone());

        let report = dispatcher
            .dispatch(&BroadcastScope::Global, &event(), None)
            .await;
        assert!(report.is_empty());
        assert!(report.all_delivered());
        assert_eq!(pusher.attempts.load(Ordering::SeqCst), 0);
    }
}
