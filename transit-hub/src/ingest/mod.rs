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

//! Ingestion layer.
//!
//! Owns the discovery-driven subscription pattern every streaming ingestion
//! path goes through: derive a natural key from each incoming entity, ensure
//! a registry record exists for it, and only then let the entity continue
//! toward the canonical store. Wire-format parsing stays outside; this layer
//! consumes already-typed entities.

mod discovery;
mod entity;

pub use discovery::{BatchOutcome, DiscoverySubscriber, SubscriptionDefaults};
pub use entity::{EntityKey, MonitoredEntity};
