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

//! Identifier-transform layer.
//!
//! Owns the per-dataset, per-object-type affix rules that move identifiers
//! between a provider namespace and the canonical output namespace. Rules are
//! pure value types; the rule set is replaced wholesale on configuration
//! reload and read lock-free by every ingestion and query path.

mod rule;
mod rule_set;

pub use rule::{IdTransformRule, ObjectType};
pub use rule_set::TransformRuleSet;
