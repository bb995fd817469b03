//! Authoritative concurrent table of subscription records.

use crate::registry::record::{subscription_id_for, DataKind, SubscriptionRecord, SubscriptionSettings};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;
use tracing::debug;

const SUBSCRIPTION_REGISTRY_TAG: &str = "SubscriptionRegistry:";
const SUBSCRIPTION_REGISTRY_FN_ENSURE_TAG: &str = "ensure():";
const SUBSCRIPTION_REGISTRY_FN_TOUCH_TAG: &str = "touch():";

type Records = RwLock<HashMap<String, SubscriptionRecord>>;

/// Registry of live subscriptions keyed by derived subscription id.
///
/// `ensure` performs its check-then-create inside one critical section on the
/// underlying map, so concurrent discovery of the same natural key from many
/// ingestion tasks yields exactly one record. Scans clone records out under a
/// read lock; writers never hold the lock across I/O.
pub struct SubscriptionRegistry {
    records: Records,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, HashMap<String, SubscriptionRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, HashMap<String, SubscriptionRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the record for this natural key, creating it on first
    /// discovery.
    ///
    /// Idempotent: a repeat call for the same key is a no-op that still
    /// advances `last_seen_at`. The `build` closure supplies the protocol
    /// defaults for a newly created record and runs only when one is
    /// actually inserted.
    pub fn ensure(
        &self,
        natural_key: &str,
        dataset_id: &str,
        data_kind: DataKind,
        build: impl FnOnce() -> SubscriptionSettings,
    ) -> SubscriptionRecord {
        let subscription_id = subscription_id_for(data_kind, natural_key);
        let now = SystemTime::now();

        let mut records = self.write_guard();
        match records.entry(subscription_id) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                record.last_seen_at = record.last_seen_at.max(now);
                record.clone()
            }
            Entry::Vacant(vacant) => {
                debug!(
                    "{SUBSCRIPTION_REGISTRY_TAG}:{SUBSCRIPTION_REGISTRY_FN_ENSURE_TAG} discovered {} for dataset {dataset_id}",
                    vacant.key()
                );
                let settings = build();
                let record = SubscriptionRecord {
                    subscription_id: vacant.key().clone(),
                    dataset_id: dataset_id.to_string(),
                    data_kind,
                    request_endpoints: settings.request_endpoints,
                    heartbeat_interval: settings.heartbeat_interval,
                    duration_of_validity: settings.duration_of_validity,
                    created_at: now,
                    last_seen_at: now,
                    active: true,
                };
                vacant.insert(record.clone());
                record
            }
        }
    }

    /// Advances `last_seen_at` monotonically. Unknown ids are a silent no-op.
    pub fn touch(&self, subscription_id: &str) {
        let now = SystemTime::now();
        let mut records = self.write_guard();
        match records.get_mut(subscription_id) {
            Some(record) => record.last_seen_at = record.last_seen_at.max(now),
            None => debug!(
                "{SUBSCRIPTION_REGISTRY_TAG}:{SUBSCRIPTION_REGISTRY_FN_TOUCH_TAG} no record for {subscription_id}"
            ),
        }
    }

    /// Flips the active flag for the external staleness supervisor. Returns
    /// whether the record exists; the registry never deactivates on its own.
    pub fn set_active(&self, subscription_id: &str, active: bool) -> bool {
        let mut records = self.write_guard();
        match records.get_mut(subscription_id) {
            Some(record) => {
                record.active = active;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, subscription_id: &str) -> Option<SubscriptionRecord> {
        self.read_guard().get(subscription_id).cloned()
    }

    pub fn is_existing(&self, subscription_id: &str) -> bool {
        self.read_guard().contains_key(subscription_id)
    }

    pub fn get_all_by_dataset(&self, dataset_id: &str) -> Vec<SubscriptionRecord> {
        self.read_guard()
            .values()
            .filter(|record| record.dataset_id == dataset_id)
            .cloned()
            .collect()
    }

    pub fn get_all_by_kind(&self, data_kind: DataKind) -> Vec<SubscriptionRecord> {
        self.read_guard()
            .values()
            .filter(|record| record.data_kind == data_kind)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::SubscriptionRegistry;
    use crate::registry::record::{DataKind, RequestKind, SubscriptionSettings};
    use futures::future::join_all;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    fn settings() -> SubscriptionSettings {
        SubscriptionSettings {
            request_endpoints: HashMap::from([(
                RequestKind::Subscribe,
                "https://hub.example/subscribe".to_string(),
            )]),
            heartbeat_interval: Duration::from_secs(60),
            duration_of_validity: Duration::from_secs(86_400),
        }
    }

    #[test]
    fn ensure_creates_once_and_touches_afterwards() {
        let registry = SubscriptionRegistry::new();

        let first = registry.ensure("RUT:Line:5", "RUT", DataKind::VehicleMonitoring, settings);
        assert_eq!(first.subscription_id, "VM-RUT:Line:5");
        assert!(first.active);
        assert_eq!(registry.len(), 1);

        std::thread::sleep(Duration::from_millis(5));
        let second = registry.ensure("RUT:Line:5", "RUT", DataKind::VehicleMonitoring, settings);
        assert_eq!(registry.len(), 1);
        assert_eq!(second.created_at, first.created_at);
        assert!(second.last_seen_at > first.last_seen_at);
    }

    #[test]
    fn same_natural_key_under_different_kinds_yields_distinct_records() {
        let registry = SubscriptionRegistry::new();
        registry.ensure("RUT:Quay:1", "RUT", DataKind::StopMonitoring, settings);
        registry.ensure("RUT:Quay:1", "RUT", DataKind::EstimatedTimetable, settings);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn touch_is_a_silent_noop_for_unknown_ids() {
        let registry = SubscriptionRegistry::new();
        registry.touch("VM-unknown");
        assert!(registry.is_empty());
    }

    #[test]
    fn touch_advances_last_seen_monotonically() {
        let registry = SubscriptionRegistry::new();
        let created = registry.ensure("RUT:Line:5", "RUT", DataKind::VehicleMonitoring, settings);

        std::thread::sleep(Duration::from_millis(5));
        registry.touch(&created.subscription_id);

        let touched = registry.get(&created.subscription_id).expect("record exists");
        assert!(touched.last_seen_at > created.last_seen_at);
        assert_eq!(touched.created_at, created.created_at);
    }

    #[test]
    fn set_active_only_flips_existing_records() {
        let registry = SubscriptionRegistry::new();
        let record = registry.ensure("RUT:sit:1:src", "RUT", DataKind::SituationExchange, settings);

        assert!(registry.set_active(&record.subscription_id, false));
        assert!(!registry.get(&record.subscription_id).expect("record").active);
        assert!(!registry.set_active("SX-unknown", false));
    }

    #[test]
    fn scans_filter_by_dataset_and_kind() {
        let registry = SubscriptionRegistry::new();
        registry.ensure("RUT:Line:5", "RUT", DataKind::VehicleMonitoring, settings);
        registry.ensure("RUT:Quay:1", "RUT", DataKind::StopMonitoring, settings);
        registry.ensure("ATB:Line:9", "ATB", DataKind::VehicleMonitoring, settings);

        assert_eq!(registry.get_all_by_dataset("RUT").len(), 2);
        assert_eq!(registry.get_all_by_dataset("ATB").len(), 1);
        assert_eq!(registry.get_all_by_dataset("SKY").len(), 0);
        assert_eq!(registry.get_all_by_kind(DataKind::VehicleMonitoring).len(), 2);
        assert_eq!(registry.get_all_by_kind(DataKind::SituationExchange).len(), 0);

        assert!(registry.is_existing("VM-RUT:Line:5"));
        assert!(!registry.is_existing("VM-RUT:Line:6"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_ensure_for_one_key_creates_exactly_one_record() {
        let registry = Arc::new(SubscriptionRegistry::new());

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move {
                    registry.ensure("RUT:Line:5", "RUT", DataKind::VehicleMonitoring, settings)
                })
            })
            .collect();
        let records = join_all(tasks).await;

        assert_eq!(registry.len(), 1);
        let created_at = registry
            .get("VM-RUT:Line:5")
            .expect("record exists")
            .created_at;
        for record in records {
            assert_eq!(record.expect("ensure task").created_at, created_at);
        }
    }
}
