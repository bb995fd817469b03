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

//! File-backed mapping sources for the transit-hub mapping caches.
//!
//! Covers the two tabular formats mapping data arrives in: header-driven
//! delimited alternate-id tables, and JSON snapshots of the canonical stop
//! registry. Each type implements [`MappingSource`] and is plugged into a
//! [`transit_hub::MappingCache`] whose refresh schedule does the polling.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use transit_hub::{MappingSource, Snapshot, SourceError};

const ALT_ID_TABLE_TAG: &str = "AltIdTableFile:";
const ALT_ID_TABLE_FN_FETCH_TAG: &str = "fetch():";

/// Which alternate-id column pair a table carries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AltIdColumns {
    Stop,
    Line,
}

impl AltIdColumns {
    fn id_header(&self) -> &'static str {
        match self {
            AltIdColumns::Stop => "stop_id",
            AltIdColumns::Line => "line_id",
        }
    }

    fn alt_id_header(&self) -> &'static str {
        match self {
            AltIdColumns::Stop => "stop_alt_id",
            AltIdColumns::Line => "line_alt_id",
        }
    }
}

/// Delimited alternate-id table read from a local file.
///
/// The delimiter is sniffed from the header line: `;` wins when the line
/// contains more semicolons than commas. Rows missing either column are
/// logged and skipped; the table refreshes additively.
pub struct AltIdTableFile {
    path: PathBuf,
    columns: AltIdColumns,
}

impl AltIdTableFile {
    pub fn new(path: impl Into<PathBuf>, columns: AltIdColumns) -> Self {
        Self {
            path: path.into(),
            columns,
        }
    }

    fn parse(&self, contents: &str) -> Result<HashMap<String, String>, SourceError> {
        let mut lines = contents.lines();
        let Some(header) = lines.next() else {
            return Err(SourceError::Malformed(format!(
                "{} is empty",
                self.path.display()
            )));
        };

        let delimiter = sniff_delimiter(header);
        let header_fields: Vec<&str> = header.split(delimiter).map(str::trim).collect();
        let id_index = column_index(&header_fields, self.columns.id_header(), &self.path)?;
        let alt_id_index = column_index(&header_fields, self.columns.alt_id_header(), &self.path)?;

        let mut entries = HashMap::new();
        let mut skipped = 0usize;
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
            let (Some(id), Some(alt_id)) = (fields.get(id_index), fields.get(alt_id_index)) else {
                skipped += 1;
                continue;
            };
            if id.is_empty() || alt_id.is_empty() {
                skipped += 1;
                continue;
            }
            entries.insert(id.to_string(), alt_id.to_string());
        }

        if skipped > 0 {
            warn!(
                "{ALT_ID_TABLE_TAG}:{ALT_ID_TABLE_FN_FETCH_TAG} {} skipped {skipped} malformed rows",
                self.path.display()
            );
        }
        debug!(
            "{ALT_ID_TABLE_TAG}:{ALT_ID_TABLE_FN_FETCH_TAG} {} parsed {} entries with delimiter {delimiter:?}",
            self.path.display(),
            entries.len()
        );
        Ok(entries)
    }
}

fn sniff_delimiter(header: &str) -> char {
    if header.matches(';').count() > header.matches(',').count() {
        ';'
    } else {
        ','
    }
}

fn column_index(
    header_fields: &[&str],
    column: &str,
    path: &Path,
) -> Result<usize, SourceError> {
    header_fields
        .iter()
        .position(|field| *field == column)
        .ok_or_else(|| {
            SourceError::Malformed(format!(
                "{} has no {column} column in header",
                path.display()
            ))
        })
}

#[async_trait]
impl MappingSource<String, String> for AltIdTableFile {
    async fn fetch(&self) -> Result<Snapshot<String, String>, SourceError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|err| SourceError::Unreachable(format!("{}: {err}", self.path.display())))?;
        Ok(Snapshot::Partial(self.parse(&contents)?))
    }

    fn describe(&self) -> String {
        format!("alt-id table {}", self.path.display())
    }
}

/// Canonical stop registry snapshot: a JSON object of provider id to
/// canonical id. Refreshes additively.
pub struct CanonicalStopFile {
    path: PathBuf,
}

impl CanonicalStopFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MappingSource<String, String> for CanonicalStopFile {
    async fn fetch(&self) -> Result<Snapshot<String, String>, SourceError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|err| SourceError::Unreachable(format!("{}: {err}", self.path.display())))?;
        let entries: HashMap<String, String> = serde_json::from_str(&contents)
            .map_err(|err| SourceError::Malformed(format!("{}: {err}", self.path.display())))?;
        Ok(Snapshot::Partial(entries))
    }

    fn describe(&self) -> String {
        format!("canonical stop table {}", self.path.display())
    }
}

/// Canonical-stop validity snapshot: a JSON object of canonical id to the
/// collection of ids valid under it.
///
/// Each file read is the complete validity state, so the snapshot replaces
/// the cache content instead of merging.
pub struct CanonicalValidityFile {
    path: PathBuf,
}

impl CanonicalValidityFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MappingSource<String, Vec<String>> for CanonicalValidityFile {
    async fn fetch(&self) -> Result<Snapshot<String, Vec<String>>, SourceError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|err| SourceError::Unreachable(format!("{}: {err}", self.path.display())))?;
        let entries: HashMap<String, Vec<String>> = serde_json::from_str(&contents)
            .map_err(|err| SourceError::Malformed(format!("{}: {err}", self.path.display())))?;
        Ok(Snapshot::Complete(entries))
    }

    fn describe(&self) -> String {
        format!("canonical validity table {}", self.path.display())
    }
}
