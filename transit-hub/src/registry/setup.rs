//! Configured subscription shape used for reconfiguration diffing.

use crate::registry::record::DataKind;
use crate::transform::ObjectType;
use std::time::Duration;

/// The configured shape of one subscription.
///
/// Compared by the reconfiguration supervisor across config reloads to tell
/// unchanged subscriptions from changed ones. The derived `subscription_id`
/// is deliberately excluded from equality: it may legitimately differ across
/// a reconfiguration while the semantic subscription stays the same. Not
/// used for registry lookups.
#[derive(Clone, Debug)]
pub struct SubscriptionSetup {
    pub subscription_id: String,
    pub address: String,
    pub dataset_id: String,
    pub data_kind: DataKind,
    pub heartbeat_interval: Duration,
    pub duration_of_validity: Duration,
    pub object_types: Vec<ObjectType>,
    pub mapping_adapter_id: Option<String>,
}

impl PartialEq for SubscriptionSetup {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
            && self.dataset_id == other.dataset_id
            && self.data_kind == other.data_kind
            && self.heartbeat_interval == other.heartbeat_interval
            && self.duration_of_validity == other.duration_of_validity
            && self.object_types == other.object_types
            && self.mapping_adapter_id == other.mapping_adapter_id
    }
}

impl Eq for SubscriptionSetup {}

#[cfg(test)]
mod tests {
    use super::SubscriptionSetup;
    use crate::registry::DataKind;
    use crate::transform::ObjectType;
    use std::time::Duration;

    fn setup(subscription_id: &str) -> SubscriptionSetup {
        SubscriptionSetup {
            subscription_id: subscription_id.to_string(),
            address: "https://provider.example/siri".to_string(),
            dataset_id: "RUT".to_string(),
            data_kind: DataKind::SituationExchange,
            heartbeat_interval: Duration::from_secs(60),
            duration_of_validity: Duration::from_secs(86_400),
            object_types: vec![ObjectType::Stop, ObjectType::Line],
            mapping_adapter_id: Some("nat-default".to_string()),
        }
    }

    #[test]
    fn equality_ignores_the_derived_subscription_id() {
        assert_eq!(setup("SX-old-id"), setup("SX-new-id"));
    }

    #[test]
    fn equality_covers_functional_fields() {
        let base = setup("SX-id");

        let mut changed = setup("SX-id");
        changed.address = "https://other.example/siri".to_string();
        assert_ne!(base, changed);

        let mut changed = setup("SX-id");
        changed.heartbeat_interval = Duration::from_secs(30);
        assert_ne!(base, changed);

        let mut changed = setup("SX-id");
        changed.object_types = vec![ObjectType::Stop];
        assert_ne!(base, changed);

        let mut changed = setup("SX-id");
        changed.mapping_adapter_id = None;
        assert_ne!(base, changed);
    }
}
