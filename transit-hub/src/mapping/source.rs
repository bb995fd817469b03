//! Source abstraction feeding mapping-cache refresh cycles.

use async_trait::async_trait;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

/// One refresh cycle's worth of mapping entries.
#[derive(Clone, Debug)]
pub enum Snapshot<K, V> {
    /// Additive delta: merged into the table, existing entries are kept.
    Partial(HashMap<K, V>),
    /// Full table state: replaces every existing entry in one swap.
    Complete(HashMap<K, V>),
}

/// Failure fetching or decoding a mapping snapshot.
///
/// Always logged and absorbed by the owning cache; a failed cycle leaves the
/// previously cached table untouched.
#[derive(Debug)]
pub enum SourceError {
    Unreachable(String),
    Malformed(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unreachable(detail) => {
                write!(f, "mapping source unreachable: {detail}")
            }
            SourceError::Malformed(detail) => {
                write!(f, "mapping source returned malformed data: {detail}")
            }
        }
    }
}

impl Error for SourceError {}

/// External collaborator a [`crate::mapping::MappingCache`] pulls from.
///
/// Implementations perform the actual I/O (file read, remote fetch); the
/// cache core itself never blocks on the network outside a refresh.
#[async_trait]
pub trait MappingSource<K, V>: Send + Sync {
    async fn fetch(&self) -> Result<Snapshot<K, V>, SourceError>;

    /// Short human-readable description used in refresh logs.
    fn describe(&self) -> String;
}
