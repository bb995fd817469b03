//! Natural-key derivation for ingested entities.

use crate::registry::DataKind;

/// Entity-kind-specific natural key a subscription id is derived from.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum EntityKey {
    /// A line reference (vehicle/estimated-timetable entities).
    Line(String),
    /// A stop or monitoring reference (stop-monitoring entities).
    Stop(String),
    /// Composite situation identity: situation number plus reporting source.
    Situation { number: String, participant: String },
}

impl EntityKey {
    /// Renders the key into the string the subscription id is derived from.
    pub fn natural_key(&self) -> String {
        match self {
            EntityKey::Line(line_ref) => line_ref.clone(),
            EntityKey::Stop(monitoring_ref) => monitoring_ref.clone(),
            EntityKey::Situation {
                number,
                participant,
            } => format!("{number}:{participant}"),
        }
    }
}

/// An already-parsed entity arriving from a wire-format collaborator.
///
/// `key` returns `None` when the required reference field is missing; such
/// entities are skipped and counted by the discovery subscriber, never an
/// error.
pub trait MonitoredEntity {
    fn key(&self) -> Option<EntityKey>;
    fn data_kind(&self) -> DataKind;
}
