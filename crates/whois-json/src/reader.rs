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

//! Line-delimited JSON record source.
//!
//! Each non-blank line holds one engine record, tagged with its `kind`:
//!
//! ```text
//! {"kind":"object","attributes":[{"key":"mntner","value":"TEST-MNT"},{"key":"source","value":"TEST"}]}
//! {"kind":"tag","object_key":"TEST-MNT","tags":[{"tag_type":"unref","value":"28"}]}
//! {"kind":"message","message":{"severity":"warning","text":"filtered"}}
//! ```
//!
//! Lines starting with `#` are comments. Records of a kind the model does
//! not know are passed on as [`ResponseObject::Other`].

use serde_json::Value;
use std::io::{BufRead, BufReader, Read};
use thiserror::Error;
use whois_core::ResponseObject;
use whois_stream::{ContextId, FaultKind, RecordHandler, RecordSource, StreamError, StreamResult};

const KNOWN_KINDS: [&str; 4] = ["object", "tag", "message", "other"];

/// Configuration for [`RecordLinesSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReaderConfig {
    /// Read buffer size in bytes.
    pub buffer_size: usize,
    /// Maximum length of one line, `None` for no limit.
    pub max_line_bytes: Option<usize>,
}

impl Default for RecordReaderConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,
            max_line_bytes: Some(1024 * 1024), // 1 MB per record
        }
    }
}

/// Errors reading a record file.
#[derive(Debug, Error)]
pub enum RecordReadError {
    /// I/O error reading input.
    #[error("I/O error at line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// The line is not a valid record.
    #[error("invalid record at line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The line exceeds the configured limit.
    #[error("line {line} is {size} bytes, limit is {limit}")]
    LineTooLarge { line: usize, size: usize, limit: usize },
}

impl RecordReadError {
    /// 1-based line the error occurred on.
    pub fn line(&self) -> usize {
        match self {
            RecordReadError::Io { line, .. }
            | RecordReadError::Json { line, .. }
            | RecordReadError::LineTooLarge { line, .. } => *line,
        }
    }
}

impl From<RecordReadError> for StreamError {
    fn from(err: RecordReadError) -> Self {
        StreamError::source(FaultKind::Internal, err.to_string())
    }
}

/// Reads records one line at a time.
///
/// Usable as an iterator, or as a [`RecordSource`] that pushes each record
/// into a session. Only the current line is held in memory.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use whois_json::{RecordLinesSource, RecordReaderConfig};
///
/// let input = r#"
/// {"kind":"object","attributes":[{"key":"mntner","value":"TEST-MNT"}]}
/// {"kind":"version","name":"ignored"}
/// "#;
/// let records: Vec<_> = RecordLinesSource::new(Cursor::new(input), RecordReaderConfig::default())
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].kind(), "version");
/// ```
pub struct RecordLinesSource<R: Read> {
    reader: BufReader<R>,
    config: RecordReaderConfig,
    line_buffer: String,
    line_number: usize,
}

impl<R: Read> RecordLinesSource<R> {
    pub fn new(reader: R, config: RecordReaderConfig) -> Self {
        let reader = BufReader::with_capacity(config.buffer_size, reader);
        Self {
            reader,
            config,
            line_buffer: String::new(),
            line_number: 0,
        }
    }

    /// Number of the last line read (1-based).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn parse(&self, line: &str) -> Result<ResponseObject, RecordReadError> {
        let json_error = |source| RecordReadError::Json {
            line: self.line_number,
            source,
        };
        let value: Value = serde_json::from_str(line).map_err(json_error)?;

        if let Some(kind) = value.get("kind").and_then(Value::as_str) {
            if !KNOWN_KINDS.contains(&kind) {
                return Ok(ResponseObject::Other {
                    name: kind.to_string(),
                });
            }
        }
        serde_json::from_value(value).map_err(json_error)
    }
}

impl<R: Read> Iterator for RecordLinesSource<R> {
    type Item = Result<ResponseObject, RecordReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buffer.clear();
            self.line_number += 1;

            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    let line = self.line_buffer.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }

                    if let Some(limit) = self.config.max_line_bytes {
                        if line.len() > limit {
                            return Some(Err(RecordReadError::LineTooLarge {
                                line: self.line_number,
                                size: line.len(),
                                limit,
                            }));
                        }
                    }

                    return Some(self.parse(line));
                }
                Err(source) => {
                    return Some(Err(RecordReadError::Io {
                        line: self.line_number,
                        source,
                    }))
                }
            }
        }
    }
}

impl<R: Read> RecordSource for RecordLinesSource<R> {
    fn stream_results(
        &mut self,
        context_id: ContextId,
        handler: &mut dyn RecordHandler,
    ) -> StreamResult<()> {
        tracing::debug!(%context_id, "reading records");
        for record in self.by_ref() {
            let record = record.map_err(|err| {
                tracing::error!(error = %err, "unreadable record");
                StreamError::from(err)
            })?;
            handler.handle(record)?;
        }
        Ok(())
    }
}
