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

//! Mapping-cache layer.
//!
//! Owns the periodically refreshed, concurrently readable id-mapping tables
//! and their refresh scheduling. Reads are lock-free snapshot loads at all
//! times, including mid-refresh; refreshes for one cache are serialized by
//! the cache itself. A failed refresh cycle is logged and skipped, leaving
//! the previously cached table in effect.

mod cache;
mod refresh;
mod source;

pub use cache::MappingCache;
pub use refresh::spawn_refresh_task;
pub use source::{MappingSource, Snapshot, SourceError};
