//! Discovery-driven subscription gate in front of the canonical store.

use crate::ingest::entity::MonitoredEntity;
use crate::registry::{RequestKind, SubscriptionRegistry, SubscriptionSettings};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const DISCOVERY_SUBSCRIBER_TAG: &str = "DiscoverySubscriber:";
const DISCOVERY_SUBSCRIBER_FN_ACCEPT_BATCH_TAG: &str = "accept_batch():";

/// Placeholder substituted with the dataset id in endpoint URL templates.
const DATASET_PLACEHOLDER: &str = "{dataset}";

/// Protocol defaults filled into records created on discovery.
///
/// Endpoint URLs are templates; every occurrence of `{dataset}` is replaced
/// with the discovering dataset id.
#[derive(Clone, Debug)]
pub struct SubscriptionDefaults {
    pub heartbeat_interval: Duration,
    pub duration_of_validity: Duration,
    pub request_endpoints: HashMap<RequestKind, String>,
}

impl SubscriptionDefaults {
    pub(crate) fn settings_for(&self, dataset_id: &str) -> SubscriptionSettings {
        let request_endpoints = self
            .request_endpoints
            .iter()
            .map(|(kind, template)| (*kind, template.replace(DATASET_PLACEHOLDER, dataset_id)))
            .collect();
        SubscriptionSettings {
            request_endpoints,
            heartbeat_interval: self.heartbeat_interval,
            duration_of_validity: self.duration_of_validity,
        }
    }
}

/// What became of one ingested batch.
pub struct BatchOutcome<E> {
    /// Entities with a registry record ensured, cleared for the canonical
    /// store.
    pub accepted: Vec<E>,
    /// Entities without a derivable natural key, dropped from the batch.
    pub skipped: usize,
}

/// The recurring pattern used by every streaming ingestion path: ensure a
/// subscription exists for each discovered entity before accepting its data.
///
/// Invoked once per ingested batch, not per field, so one feed cycle costs
/// at most one registry call per entity.
pub struct DiscoverySubscriber {
    registry: Arc<SubscriptionRegistry>,
    defaults: SubscriptionDefaults,
}

impl DiscoverySubscriber {
    pub fn new(registry: Arc<SubscriptionRegistry>, defaults: SubscriptionDefaults) -> Self {
        Self { registry, defaults }
    }

    pub fn accept_batch<E: MonitoredEntity>(
        &self,
        dataset_id: &str,
        entities: Vec<E>,
    ) -> BatchOutcome<E> {
        let mut accepted = Vec::with_capacity(entities.len());
        let mut skipped = 0;

        for entity in entities {
            let Some(key) = entity.key() else {
                skipped += 1;
                continue;
            };
            self.registry.ensure(
                &key.natural_key(),
                dataset_id,
                entity.data_kind(),
                || self.defaults.settings_for(dataset_id),
            );
            accepted.push(entity);
        }

        if skipped > 0 {
            debug!(
                "{DISCOVERY_SUBSCRIBER_TAG}:{DISCOVERY_SUBSCRIBER_FN_ACCEPT_BATCH_TAG} dataset {dataset_id}: skipped {skipped} entities without a derivable key"
            );
        }
        BatchOutcome { accepted, skipped }
    }
}

#[cfg(test)]
mod tests {
    use super::{DiscoverySubscriber, SubscriptionDefaults};
    use crate::ingest::entity::{EntityKey, MonitoredEntity};
    use crate::registry::{DataKind, RequestKind, SubscriptionRegistry};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    struct VehicleActivity {
        line_ref: Option<String>,
    }

    impl MonitoredEntity for VehicleActivity {
        fn key(&self) -> Option<EntityKey> {
            self.line_ref.clone().map(EntityKey::Line)
        }

        fn data_kind(&self) -> DataKind {
            DataKind::VehicleMonitoring
        }
    }

    fn defaults() -> SubscriptionDefaults {
        SubscriptionDefaults {
            heartbeat_interval: Duration::from_secs(60),
            duration_of_validity: Duration::from_secs(86_400),
            request_endpoints: HashMap::from([(
                RequestKind::DataSupply,
                "https://hub.example/{dataset}/data".to_string(),
            )]),
        }
    }

    #[test]
    fn duplicate_keys_within_one_batch_create_one_record() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let subscriber = DiscoverySubscriber::new(registry.clone(), defaults());

        let outcome = subscriber.accept_batch(
            "RUT",
            vec![
                VehicleActivity {
                    line_ref: Some("RUT:Line:5".to_string()),
                },
                VehicleActivity {
                    line_ref: Some("RUT:Line:5".to_string()),
                },
            ],
        );

        assert_eq!(outcome.accepted.len(), 2);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn keyless_entities_are_skipped_and_counted() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let subscriber = DiscoverySubscriber::new(registry.clone(), defaults());

        let outcome = subscriber.accept_batch(
            "RUT",
            vec![
                VehicleActivity { line_ref: None },
                VehicleActivity {
                    line_ref: Some("RUT:Line:5".to_string()),
                },
            ],
        );

        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn endpoint_templates_are_expanded_with_the_dataset_id() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let subscriber = DiscoverySubscriber::new(registry.clone(), defaults());

        subscriber.accept_batch(
            "RUT",
            vec![VehicleActivity {
                line_ref: Some("RUT:Line:5".to_string()),
            }],
        );

        let record = registry.get("VM-RUT:Line:5").expect("record exists");
        assert_eq!(
            record.request_endpoints.get(&RequestKind::DataSupply),
            Some(&"https://hub.example/RUT/data".to_string())
        );
    }
}
