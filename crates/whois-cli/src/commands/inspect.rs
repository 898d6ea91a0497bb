// Dweve Whois Stream - Incremental query result streaming
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Summarize the records in a record file.

use crate::error::CliError;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use whois_core::ResponseObject;
use whois_json::{RecordLinesSource, RecordReaderConfig};

/// Record counts of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSummary {
    /// Records per kind.
    pub kinds: BTreeMap<String, u64>,
    /// Messages per severity.
    pub severities: BTreeMap<String, u64>,
    /// Tags seen before the first object.
    pub orphan_tags: u64,
}

impl RecordSummary {
    pub fn total(&self) -> u64 {
        self.kinds.values().sum()
    }
}

/// Read every record of `file` and count them.
///
/// Fails on the first unreadable line.
pub fn summarize(file: &Path) -> Result<RecordSummary, CliError> {
    let input = File::open(file).map_err(|e| CliError::io_error(file, e))?;
    let mut summary = RecordSummary::default();
    let mut after_object = false;

    for record in RecordLinesSource::new(input, RecordReaderConfig::default()) {
        let record = record?;
        *summary.kinds.entry(record.kind().to_string()).or_default() += 1;
        match &record {
            ResponseObject::Object(_) => after_object = true,
            ResponseObject::Tag(_) if !after_object => summary.orphan_tags += 1,
            ResponseObject::Tag(_) => {}
            ResponseObject::Message { message } => {
                let severity = message
                    .as_ref()
                    .map(|m| m.severity.as_str())
                    .unwrap_or("Empty");
                *summary.severities.entry(severity.to_string()).or_default() += 1;
            }
            ResponseObject::Other { .. } => {}
        }
    }
    Ok(summary)
}

/// Print a summary of `file` to stdout.
pub fn inspect(file: &Path) -> Result<(), CliError> {
    let summary = summarize(file)?;

    println!("{}: {} records", file.display(), summary.total());
    for (kind, count) in &summary.kinds {
        println!("  {:<16} {}", kind, count);
    }
    for (severity, count) in &summary.severities {
        let label = format!("message/{}", severity.to_ascii_lowercase());
        println!("  {:<16} {}", label, count);
    }
    if summary.orphan_tags > 0 {
        println!("  orphan tags: {}", summary.orphan_tags);
    }
    Ok(())
}
