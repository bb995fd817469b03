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

//! Subscription-registry layer.
//!
//! Owns the authoritative table of logical subscriptions, both explicitly
//! configured and implicitly discovered from ingested entities. Creation is
//! idempotent and atomic per key: concurrent discovery of the same natural
//! key resolves to exactly one record. Expiry and cancellation decisions
//! belong to an external supervisor reading `active`/`last_seen_at`; this
//! layer only exposes the setter.

mod record;
mod setup;
mod table;

pub use record::{DataKind, RequestKind, SubscriptionRecord, SubscriptionSettings};
pub use table::SubscriptionRegistry;
pub use setup::SubscriptionSetup;
