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

//! Identifier-reconciliation layer.
//!
//! Composes the transform-rule set with the mapping caches to move ids
//! between provider namespaces and the canonical namespace, selecting
//! behavior by an output-mapping policy. Ingestion paths use the forward
//! direction; outbound query serving uses the reverse direction.

mod policy;
mod reconciler;

pub use policy::MappingPolicy;
pub use reconciler::IdentifierReconciler;
