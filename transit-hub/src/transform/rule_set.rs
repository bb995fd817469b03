//! Atomically replaceable table of transform rules keyed by dataset and object type.

use crate::transform::{IdTransformRule, ObjectType};
use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

const TRANSFORM_RULE_SET_TAG: &str = "TransformRuleSet:";
const TRANSFORM_RULE_SET_FN_REPLACE_ALL_TAG: &str = "replace_all():";

type RuleKey = (String, ObjectType);

/// Lookup table for [`IdTransformRule`]s.
///
/// Reads are lock-free snapshot loads; a configuration reload swaps the whole
/// table in one store so readers never observe a half-applied rule set.
pub struct TransformRuleSet {
    rules: ArcSwap<HashMap<RuleKey, IdTransformRule>>,
}

impl TransformRuleSet {
    pub fn new() -> Self {
        Self {
            rules: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Replaces every rule in one atomic swap.
    pub fn replace_all(
        &self,
        rules: impl IntoIterator<Item = (String, ObjectType, IdTransformRule)>,
    ) {
        let table: HashMap<RuleKey, IdTransformRule> = rules
            .into_iter()
            .map(|(dataset_id, object_type, rule)| ((dataset_id, object_type), rule))
            .collect();
        debug!(
            "{TRANSFORM_RULE_SET_TAG}:{TRANSFORM_RULE_SET_FN_REPLACE_ALL_TAG} loaded {} rules",
            table.len()
        );
        self.rules.store(Arc::new(table));
    }

    /// Returns the rule configured for this dataset and object type, if any.
    pub fn rule_for(&self, dataset_id: &str, object_type: ObjectType) -> Option<IdTransformRule> {
        self.rules
            .load()
            .get(&(dataset_id.to_string(), object_type))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.rules.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.load().is_empty()
    }
}

impl Default for TransformRuleSet {
    fn default() -> Self {
        Self::new()
    }
}
