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

//! # transit-hub
//!
//! `transit-hub` aggregates real-time public-transport data from many
//! independent providers, harmonizes identifiers across provider namespaces,
//! and republishes one canonical view. This crate is the hub core: the
//! subscription lifecycle registry and the cross-namespace identifier
//! reconciliation pipeline. Wire-format parsing, network transport and the
//! canonical store are external collaborators reached through traits.
//!
//! ## Discovery-driven ingestion
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use transit_hub::{
//!     DataKind, DiscoverySubscriber, EntityKey, MonitoredEntity, RequestKind,
//!     SubscriptionDefaults, SubscriptionRegistry,
//! };
//!
//! struct VehicleActivity {
//!     line_ref: String,
//! }
//!
//! impl MonitoredEntity for VehicleActivity {
//!     fn key(&self) -> Option<EntityKey> {
//!         Some(EntityKey::Line(self.line_ref.clone()))
//!     }
//!
//!     fn data_kind(&self) -> DataKind {
//!         DataKind::VehicleMonitoring
//!     }
//! }
//!
//! let registry = Arc::new(SubscriptionRegistry::new());
//! let subscriber = DiscoverySubscriber::new(
//!     registry.clone(),
//!     SubscriptionDefaults {
//!         heartbeat_interval: Duration::from_secs(60),
//!         duration_of_validity: Duration::from_secs(86_400),
//!         request_endpoints: HashMap::from([(
//!             RequestKind::DataSupply,
//!             "https://hub.example/{dataset}/data".to_string(),
//!         )]),
//!     },
//! );
//!
//! let batch = vec![
//!     VehicleActivity { line_ref: "RUT:Line:5".to_string() },
//!     VehicleActivity { line_ref: "RUT:Line:5".to_string() },
//! ];
//! let outcome = subscriber.accept_batch("RUT", batch);
//!
//! // Two sightings of the same line resolve to one live subscription.
//! assert_eq!(outcome.accepted.len(), 2);
//! assert_eq!(registry.len(), 1);
//! assert!(registry.is_existing("VM-RUT:Line:5"));
//! ```
//!
//! ## Internal architecture map
//!
//! - Transform: per-dataset affix rules between provider and canonical
//!   namespaces
//! - Mapping: periodically refreshed id-mapping caches with lock-free reads
//! - Reconcile: policy-driven forward/reverse id resolution over both
//! - Registry: authoritative subscription table with atomic idempotent
//!   creation
//! - Ingest: discovery-driven subscription gate in front of the canonical
//!   store
//! - Config: transform rules, refresh cadences and subscription defaults
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events. Library code emits
//! events/spans and does not unconditionally initialize a global subscriber.
//! Binaries and tests are responsible for one-time `tracing_subscriber`
//! initialization at process boundaries.

pub mod config;
pub mod ingest;
pub mod mapping;
pub mod reconcile;
pub mod registry;
pub mod transform;

pub use config::{ConfigError, HubConfig, RefreshConfig, SubscriptionDefaultsConfig, TransformRuleConfig};
pub use ingest::{BatchOutcome, DiscoverySubscriber, EntityKey, MonitoredEntity, SubscriptionDefaults};
pub use mapping::{spawn_refresh_task, MappingCache, MappingSource, Snapshot, SourceError};
pub use reconcile::{IdentifierReconciler, MappingPolicy};
pub use registry::{
    DataKind, RequestKind, SubscriptionRecord, SubscriptionRegistry, SubscriptionSettings,
    SubscriptionSetup,
};
pub use transform::{IdTransformRule, ObjectType, TransformRuleSet};
