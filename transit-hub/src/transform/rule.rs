//! Affix-based identifier transform rule for one dataset and object type.

use serde::Deserialize;

/// Kind of identified object a transform rule applies to.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectType {
    Stop,
    Line,
    Network,
    Operator,
}

const QUAY_SEGMENT: &str = "Quay";
const STOP_PLACE_SEGMENT: &str = "StopPlace";

/// Forward/reverse string transform between a provider id namespace and the
/// canonical output namespace.
///
/// Immutable once loaded from configuration; a reload replaces the owning
/// [`crate::transform::TransformRuleSet`] wholesale instead of mutating rules
/// in place. Absent affixes are skipped, never an error.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IdTransformRule {
    /// Prefix stripped from incoming provider ids, re-added on reverse.
    pub input_prefix: Option<String>,
    /// Suffix stripped from incoming provider ids, re-added on reverse.
    pub input_suffix: Option<String>,
    /// Prefix added to outgoing canonical ids, stripped on reverse.
    pub output_prefix: Option<String>,
    /// Suffix added to outgoing canonical ids, stripped on reverse.
    pub output_suffix: Option<String>,
}

impl IdTransformRule {
    /// Maps a provider-namespace id into the output namespace.
    ///
    /// Fixed order: strip input prefix, strip input suffix, add output
    /// prefix, add output suffix. The output affixes are only added when not
    /// already present, so repeated application is idempotent.
    pub fn apply_forward(&self, text: &str) -> String {
        if text.is_empty() {
            return text.to_string();
        }

        let mut id = text;
        if let Some(prefix) = &self.input_prefix {
            if let Some(stripped) = id.strip_prefix(prefix.as_str()) {
                id = stripped;
            }
        }
        if let Some(suffix) = &self.input_suffix {
            if let Some(stripped) = id.strip_suffix(suffix.as_str()) {
                id = stripped;
            }
        }

        let mut out = id.to_string();
        if let Some(prefix) = &self.output_prefix {
            if !out.starts_with(prefix.as_str()) {
                out = format!("{prefix}{out}");
            }
        }
        if let Some(suffix) = &self.output_suffix {
            if !out.ends_with(suffix.as_str()) {
                out.push_str(suffix);
            }
        }
        out
    }

    /// Maps an output-namespace id back into the provider namespace.
    ///
    /// Output affixes are stripped when present; the input affixes are then
    /// re-added unconditionally. The asymmetry against [`Self::apply_forward`]
    /// (conditional strip, unconditional re-add) is intentional and carried
    /// from the upstream mapping contract.
    ///
    /// Stop rules are shared between a stop place and its quays, which carry
    /// different id segments under one configured output prefix. When the
    /// prefix names a `Quay` segment but the id carries a `StopPlace`
    /// segment, the segment token is substituted before stripping.
    pub fn apply_reverse(&self, object_type: ObjectType, text: &str) -> String {
        if text.is_empty() {
            return text.to_string();
        }

        let mut id = text.to_string();
        if let Some(prefix) = &self.output_prefix {
            let effective_prefix = if object_type == ObjectType::Stop
                && !id.starts_with(prefix.as_str())
                && prefix.contains(QUAY_SEGMENT)
                && id.contains(STOP_PLACE_SEGMENT)
            {
                prefix.replace(QUAY_SEGMENT, STOP_PLACE_SEGMENT)
            } else {
                prefix.clone()
            };
            if let Some(stripped) = id.strip_prefix(effective_prefix.as_str()) {
                id = stripped.to_string();
            }
        }
        if let Some(suffix) = &self.output_suffix {
            if let Some(stripped) = id.strip_suffix(suffix.as_str()) {
                id = stripped.to_string();
            }
        }

        let mut out = String::new();
        if let Some(prefix) = &self.input_prefix {
            out.push_str(prefix);
        }
        out.push_str(&id);
        if let Some(suffix) = &self.input_suffix {
            out.push_str(suffix);
        }
        out
    }
}
