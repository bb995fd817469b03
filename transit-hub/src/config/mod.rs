/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Hub configuration surface.
//!
//! Consumes the per-dataset transform rules, cache refresh cadences and
//! subscription defaults as plain scalar/list values from a JSON document.
//! The loaded values feed [`crate::transform::TransformRuleSet`], the
//! refresh scheduler and [`crate::ingest::SubscriptionDefaults`].

use crate::ingest::SubscriptionDefaults;
use crate::registry::RequestKind;
use crate::transform::{IdTransformRule, ObjectType, TransformRuleSet};
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Failure loading or decoding the hub configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "unable to read configuration: {err}"),
            ConfigError::Parse(err) => write!(f, "unable to parse configuration: {err}"),
        }
    }
}

impl Error for ConfigError {}

/// One configured transform rule.
#[derive(Clone, Debug, Deserialize)]
pub struct TransformRuleConfig {
    pub dataset_id: String,
    pub object_type: ObjectType,
    #[serde(default)]
    pub input_prefix: Option<String>,
    #[serde(default)]
    pub input_suffix: Option<String>,
    #[serde(default)]
    pub output_prefix: Option<String>,
    #[serde(default)]
    pub output_suffix: Option<String>,
}

/// Mapping-cache refresh cadences, in minutes.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub canonical_stop_minutes: u64,
    pub alt_id_minutes: u64,
    pub validity_minutes: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            canonical_stop_minutes: 60,
            alt_id_minutes: 5,
            validity_minutes: 10,
        }
    }
}

impl RefreshConfig {
    pub fn canonical_stop_period(&self) -> Duration {
        Duration::from_secs(self.canonical_stop_minutes * 60)
    }

    pub fn alt_id_period(&self) -> Duration {
        Duration::from_secs(self.alt_id_minutes * 60)
    }

    pub fn validity_period(&self) -> Duration {
        Duration::from_secs(self.validity_minutes * 60)
    }
}

/// Defaults for records created on discovery.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SubscriptionDefaultsConfig {
    pub heartbeat_seconds: u64,
    pub validity_hours: u64,
    pub request_endpoints: HashMap<RequestKind, String>,
}

impl Default for SubscriptionDefaultsConfig {
    fn default() -> Self {
        Self {
            heartbeat_seconds: 60,
            validity_hours: 24,
            request_endpoints: HashMap::new(),
        }
    }
}

/// Root configuration document.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    pub transform_rules: Vec<TransformRuleConfig>,
    pub refresh: RefreshConfig,
    pub subscription_defaults: SubscriptionDefaultsConfig,
}

impl HubConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json(&contents)
    }

    /// Builds the rule set this configuration describes.
    pub fn rule_set(&self) -> TransformRuleSet {
        let rules = TransformRuleSet::new();
        self.reload_rules_into(&rules);
        rules
    }

    /// Replaces the rules of an existing set, for configuration reload.
    pub fn reload_rules_into(&self, rules: &TransformRuleSet) {
        rules.replace_all(self.transform_rules.iter().map(|rule| {
            (
                rule.dataset_id.clone(),
                rule.object_type,
                IdTransformRule {
                    input_prefix: rule.input_prefix.clone(),
                    input_suffix: rule.input_suffix.clone(),
                    output_prefix: rule.output_prefix.clone(),
                    output_suffix: rule.output_suffix.clone(),
                },
            )
        }));
    }

    pub fn subscription_defaults(&self) -> SubscriptionDefaults {
        SubscriptionDefaults {
            heartbeat_interval: Duration::from_secs(self.subscription_defaults.heartbeat_seconds),
            duration_of_validity: Duration::from_secs(
                self.subscription_defaults.validity_hours * 3_600,
            ),
            request_endpoints: self.subscription_defaults.request_endpoints.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HubConfig;
    use crate::registry::RequestKind;
    use crate::transform::ObjectType;
    use std::time::Duration;

    #[test]
    fn empty_document_falls_back_to_defaults() {
        let config = HubConfig::from_json("{}").expect("valid empty config");
        assert!(config.transform_rules.is_empty());
        assert_eq!(config.refresh.canonical_stop_period(), Duration::from_secs(3_600));
        assert_eq!(config.refresh.alt_id_period(), Duration::from_secs(300));
        assert_eq!(config.refresh.validity_period(), Duration::from_secs(600));

        let defaults = config.subscription_defaults();
        assert_eq!(defaults.heartbeat_interval, Duration::from_secs(60));
        assert_eq!(defaults.duration_of_validity, Duration::from_secs(86_400));
    }

    #[test]
    fn full_document_builds_rule_set_and_defaults() {
        let config = HubConfig::from_json(
            r#"{
                "transform_rules": [
                    {
                        "dataset_id": "RUT",
                        "object_type": "STOP",
                        "input_prefix": "RUT:",
                        "output_prefix": "NAT:Quay:"
                    }
                ],
                "refresh": { "alt_id_minutes": 2 },
                "subscription_defaults": {
                    "heartbeat_seconds": 30,
                    "request_endpoints": {
                        "SUBSCRIBE": "https://hub.example/{dataset}/subscribe"
                    }
                }
            }"#,
        )
        .expect("valid config");

        let rules = config.rule_set();
        let rule = rules
            .rule_for("RUT", ObjectType::Stop)
            .expect("configured rule");
        assert_eq!(rule.apply_forward("RUT:1"), "NAT:Quay:1");

        assert_eq!(config.refresh.alt_id_period(), Duration::from_secs(120));
        let defaults = config.subscription_defaults();
        assert_eq!(defaults.heartbeat_interval, Duration::from_secs(30));
        assert!(defaults.request_endpoints.contains_key(&RequestKind::Subscribe));
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        assert!(HubConfig::from_json("not json").is_err());
        assert!(HubConfig::from_json(r#"{"transform_rules": 3}"#).is_err());
    }
}
