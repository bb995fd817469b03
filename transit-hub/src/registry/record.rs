//! Subscription record value types.

use serde::Deserialize;
use std::collections::HashMap;
use std::time::{Duration, SystemTime};

/// Monitoring kind a subscription delivers data for.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataKind {
    SituationExchange,
    VehicleMonitoring,
    StopMonitoring,
    EstimatedTimetable,
}

impl DataKind {
    /// Prefix prepended to a natural key to derive the subscription id,
    /// keeping ids unique across kinds sharing one key space.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            DataKind::SituationExchange => "SX-",
            DataKind::VehicleMonitoring => "VM-",
            DataKind::StopMonitoring => "SM-",
            DataKind::EstimatedTimetable => "ET-",
        }
    }
}

/// Kind of request a subscription endpoint URL serves.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestKind {
    Subscribe,
    DataSupply,
    CheckStatus,
    Terminate,
}

/// Protocol-specific defaults a new record is built from.
///
/// Passed to [`crate::registry::SubscriptionRegistry::ensure`] by the build
/// closure; the registry itself owns identity, timestamps and the active
/// flag.
#[derive(Clone, Debug)]
pub struct SubscriptionSettings {
    pub request_endpoints: HashMap<RequestKind, String>,
    pub heartbeat_interval: Duration,
    pub duration_of_validity: Duration,
}

/// One live logical subscription.
///
/// Identity is `subscription_id` (kind prefix + natural key); for a given
/// pair at most one record exists. Records are never deleted by this core —
/// an external supervisor interprets `last_seen_at`/`heartbeat_interval`
/// staleness and flips `active` through the registry.
#[derive(Clone, Debug)]
pub struct SubscriptionRecord {
    pub subscription_id: String,
    pub dataset_id: String,
    pub data_kind: DataKind,
    pub request_endpoints: HashMap<RequestKind, String>,
    pub heartbeat_interval: Duration,
    pub duration_of_validity: Duration,
    pub created_at: SystemTime,
    pub last_seen_at: SystemTime,
    pub active: bool,
}

/// Derives the registry key for a natural key under a data kind.
pub(crate) fn subscription_id_for(data_kind: DataKind, natural_key: &str) -> String {
    format!("{}{}", data_kind.id_prefix(), natural_key)
}
