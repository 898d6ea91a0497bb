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

//! Incremental whois result streaming
//!
//! This crate turns the record stream of a whois query engine into a single
//! structured document, written incrementally as records arrive. The full
//! result set is never held in memory: at most one object is kept back, long
//! enough to learn whether tags for it follow.
//!
//! # Components
//!
//! | Component | Role |
//! |-----------|------|
//! | [`StructuredWriter`] | Encoder-agnostic document sink (JSON, XML, ...) |
//! | [`classify`] / [`RecordClassifier`] | Route engine records to object, tag or message |
//! | [`LookaheadEmitter`] | One-slot lookahead that pairs objects with their tags |
//! | [`ErrorLog`] | Ordered, one-shot-drain log of operational messages |
//! | [`ResultSession`] | Runs one session and finalizes the envelope on every path |
//!
//! # Document shape
//!
//! ```text
//! open
//!   service, parameters          (if configured)
//!   objects {
//!     object [ element, element, ... ]
//!   }
//!   errormessages                (if any warnings or errors)
//!   terms-and-conditions
//! close
//! ```
//!
//! The envelope is only opened once the first object arrives. A session with
//! no objects writes nothing and ends `NotFound`; the transport answers with
//! a separate error document (see [`write_error_document`]).
//!
//! # Aborts and faults
//!
//! A consumer that stops reading surfaces as [`StreamError::Aborted`], either
//! from the source or from the writer's sink. The session stops without
//! further writes and reports [`SessionOutcome::Aborted`]. Any other error
//! ends the session `Faulted`, after closing the envelope if it was opened.

mod classifier;
mod emitter;
pub mod envelope;
mod error;
mod error_log;
mod outcome;
mod response;
mod session;
mod source;
mod writer;

pub use classifier::{classify, Record, RecordClassifier};
pub use emitter::{LookaheadEmitter, PendingObject};
pub use envelope::EnvelopeHeader;
pub use error::{FaultKind, StreamError, StreamResult, WriteError, WriteResult};
pub use error_log::ErrorLog;
pub use outcome::{ResponseStatus, SessionOutcome, SessionState};
pub use response::write_error_document;
pub use session::{ResultSession, SessionConfig, SessionReport, SessionStats};
pub use source::{ContextId, FailedSource, IterSource, RecordHandler, RecordSource};
pub use writer::StructuredWriter;

/// Re-export core types for convenience.
pub use whois_core::{Message, ObjectMapper, ResponseObject, Severity};
