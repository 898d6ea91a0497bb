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

//! JSON support for whois result streaming.
//!
//! - [`JsonStreamWriter`]: a [`StructuredWriter`](whois_stream::StructuredWriter)
//!   that renders the result envelope as one JSON document.
//! - [`RecordLinesSource`]: a [`RecordSource`](whois_stream::RecordSource)
//!   reading engine records from line-delimited JSON.
//!
//! # Examples
//!
//! ```rust
//! use std::io::Cursor;
//! use whois_core::WhoisObjectMapper;
//! use whois_json::{JsonStreamWriter, RecordLinesSource, RecordReaderConfig};
//! use whois_stream::{ResultSession, SessionConfig};
//!
//! let records = r#"{"kind":"object","attributes":[{"key":"mntner","value":"TEST-MNT"},{"key":"source","value":"TEST"}]}"#;
//! let source = RecordLinesSource::new(Cursor::new(records), RecordReaderConfig::default());
//!
//! let mut out = Vec::new();
//! let session = ResultSession::new(WhoisObjectMapper::new("http://localhost"), SessionConfig::default());
//! let report = session.run(source, JsonStreamWriter::new(&mut out));
//!
//! assert!(report.outcome.is_found());
//! let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
//! assert_eq!(doc["objects"]["object"][0]["type"], "mntner");
//! ```

mod reader;
mod writer;

pub use reader::{RecordLinesSource, RecordReadError, RecordReaderConfig};
pub use writer::{JsonStreamWriter, JsonWriterConfig};
