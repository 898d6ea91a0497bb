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

//! Shared test fixtures and utilities for whois result streaming.
//!
//! This crate provides canonical RPSL objects, a [`RecordingWriter`] that
//! journals every [`StructuredWriter`](whois_stream::StructuredWriter) call,
//! scripted and synthetic record sources, and instrumented mappers.
//!
//! # Quick Start
//!
//! ```rust
//! use whois_stream::{ResultSession, SessionConfig};
//! use whois_test::{fixtures, mappers, RecordingWriter, ScriptedSource, Step};
//!
//! let (writer, journal) = RecordingWriter::new();
//! let source = ScriptedSource::new(vec![
//!     Step::from(fixtures::mntner("A-MNT")),
//!     Step::from(fixtures::unref("A-MNT", 28)),
//!     Step::from(fixtures::person()),
//! ]);
//!
//! let report = ResultSession::new(mappers::mapper(), SessionConfig::default()).run(source, writer);
//!
//! assert!(report.outcome.is_found());
//! assert_eq!(journal.element_keys(), vec!["A-MNT", "JD1-TEST"]);
//! assert!(journal.is_well_nested());
//! ```

/// Canonical records.
pub mod fixtures;

/// Instrumented mappers.
pub mod mappers;

/// Recording structured writer.
pub mod recording;

/// Scripted and synthetic sources.
pub mod sources;

pub use mappers::{CountingMapper, FailingMapper};
pub use recording::{element_key, FailPoint, Failure, Journal, RecordingWriter, WriterCall};
pub use sources::{Produced, ScriptedSource, Step, SyntheticSource};
