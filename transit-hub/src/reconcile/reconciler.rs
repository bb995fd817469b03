//! Policy-driven forward/reverse identifier reconciliation.

use crate::mapping::MappingCache;
use crate::reconcile::MappingPolicy;
use crate::transform::{ObjectType, TransformRuleSet};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

const RECONCILER_TAG: &str = "IdentifierReconciler:";
const RECONCILER_FN_REVERSE_TAG: &str = "reverse_transform():";

/// Composes transform rules and mapping caches into the two id directions
/// every ingestion and query path goes through.
///
/// All lookup misses degrade to passthrough or an empty result, never an
/// error; see the policy-specific contracts on [`Self::reverse_transform`].
pub struct IdentifierReconciler {
    rules: Arc<TransformRuleSet>,
    alt_ids: Arc<MappingCache<String, String>>,
    canonical_stops: Arc<MappingCache<String, String>>,
    canonical_validity: Arc<MappingCache<String, Vec<String>>>,
}

impl IdentifierReconciler {
    pub fn new(
        rules: Arc<TransformRuleSet>,
        alt_ids: Arc<MappingCache<String, String>>,
        canonical_stops: Arc<MappingCache<String, String>>,
        canonical_validity: Arc<MappingCache<String, Vec<String>>>,
    ) -> Self {
        Self {
            rules,
            alt_ids,
            canonical_stops,
            canonical_validity,
        }
    }

    /// Maps one provider id into the output namespace on ingestion.
    ///
    /// Datasets without a configured rule pass the id through unchanged.
    pub fn forward_transform(&self, id: &str, dataset_id: &str, object_type: ObjectType) -> String {
        match self.rules.rule_for(dataset_id, object_type) {
            Some(rule) => rule.apply_forward(id),
            None => id.to_string(),
        }
    }

    /// Maps one output-namespace id back into a provider namespace via the
    /// configured transform rule, for re-shaping resolved results before
    /// they are returned to the caller.
    pub fn reverse_rule_transform(
        &self,
        id: &str,
        dataset_id: &str,
        object_type: ObjectType,
    ) -> String {
        match self.rules.rule_for(dataset_id, object_type) {
            Some(rule) => rule.apply_reverse(object_type, id),
            None => id.to_string(),
        }
    }

    /// Resolves a set of query ids into provider-scoped ids per policy.
    ///
    /// - [`MappingPolicy::Canonical`] with a dataset: every id must reverse-
    ///   resolve in the canonical-stop table scoped to that dataset. If any
    ///   id of a non-empty input misses, the whole result is empty — a
    ///   partially resolvable query is treated as unresolvable rather than
    ///   silently narrowed.
    /// - [`MappingPolicy::Canonical`] without a dataset: unscoped reverse
    ///   lookup, unresolvable ids are dropped.
    /// - [`MappingPolicy::AltId`] with a dataset: reverse lookup in the
    ///   alternate-id table scoped to the dataset; misses pass through.
    /// - [`MappingPolicy::OriginalId`] with a dataset: ids pass through.
    /// - [`MappingPolicy::OriginalId`]/[`MappingPolicy::AltId`] without a
    ///   dataset: empty result, these policies require a dataset scope.
    pub async fn reverse_transform(
        &self,
        ids: &HashSet<String>,
        dataset_id: Option<&str>,
        policy: MappingPolicy,
    ) -> HashSet<String> {
        match (policy, dataset_id) {
            (MappingPolicy::Canonical, Some(dataset_id)) => {
                let mut resolved = HashSet::with_capacity(ids.len());
                for id in ids {
                    match self.canonical_stops.get_reverse(id, Some(dataset_id)).await {
                        Some(provider_id) => {
                            resolved.insert(provider_id);
                        }
                        None => {
                            debug!(
                                "{RECONCILER_TAG}:{RECONCILER_FN_REVERSE_TAG} {id} has no reverse mapping in dataset {dataset_id}, dropping all {} ids",
                                ids.len()
                            );
                            return HashSet::new();
                        }
                    }
                }
                resolved
            }
            (MappingPolicy::Canonical, None) => {
                let mut resolved = HashSet::new();
                for id in ids {
                    if let Some(provider_id) = self.canonical_stops.get_reverse(id, None).await {
                        resolved.insert(provider_id);
                    }
                }
                resolved
            }
            (MappingPolicy::AltId, Some(dataset_id)) => {
                let mut resolved = HashSet::with_capacity(ids.len());
                for id in ids {
                    match self.alt_ids.get_reverse(id, Some(dataset_id)).await {
                        Some(provider_id) => {
                            resolved.insert(provider_id);
                        }
                        None => {
                            resolved.insert(id.clone());
                        }
                    }
                }
                resolved
            }
            (MappingPolicy::OriginalId, Some(_)) => ids.clone(),
            (MappingPolicy::OriginalId, None) | (MappingPolicy::AltId, None) => {
                debug!(
                    "{RECONCILER_TAG}:{RECONCILER_FN_REVERSE_TAG} {policy:?} requires a dataset scope, returning empty set"
                );
                HashSet::new()
            }
        }
    }

    /// Whether this id is present in the canonical-stop validity set.
    pub async fn is_known_canonical(&self, id: &str) -> bool {
        self.canonical_validity.contains_key(&id.to_string()).await
    }
}
