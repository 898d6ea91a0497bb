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

//! Result sessions.
//!
//! A [`ResultSession`] runs one query-to-output exchange: it feeds records
//! from a [`RecordSource`] through the [`LookaheadEmitter`], collects
//! operational messages, and finalizes the envelope exactly once on whichever
//! path the stream ends.
//!
//! # Exit paths
//!
//! | Stream ends with | Objects seen | Writer calls at the end | Outcome |
//! |------------------|--------------|-------------------------|---------|
//! | completion | none | none (never opened) | `NotFound` |
//! | completion | some | flush, trailer, close | `Found` |
//! | abort | any | none | `Aborted` |
//! | fault | none | none | `Faulted` |
//! | fault | some | flush, trailer, close | `Faulted` |
//!
//! # Example
//!
//! ```rust
//! use whois_core::{Message, ResponseObject, RpslObject, WhoisObjectMapper};
//! use whois_stream::{IterSource, ResultSession, SessionConfig, SessionOutcome};
//! # use whois_stream::{StructuredWriter, WriteResult};
//! # use serde::Serialize;
//! # #[derive(Default)]
//! # struct Null;
//! # impl StructuredWriter for Null {
//! #     fn open(&mut self) -> WriteResult { Ok(()) }
//! #     fn close(&mut self) -> WriteResult { Ok(()) }
//! #     fn write_field<T: Serialize + ?Sized>(&mut self, _: &str, _: &T) -> WriteResult { Ok(()) }
//! #     fn start_block(&mut self, _: &str) -> WriteResult { Ok(()) }
//! #     fn end_block(&mut self, _: &str) -> WriteResult { Ok(()) }
//! #     fn start_array(&mut self, _: &str) -> WriteResult { Ok(()) }
//! #     fn write_element<T: Serialize + ?Sized>(&mut self, _: &T) -> WriteResult { Ok(()) }
//! #     fn end_array(&mut self) -> WriteResult { Ok(()) }
//! # }
//!
//! let records = vec![
//!     ResponseObject::from(RpslObject::from_pairs([("mntner", "TEST-MNT"), ("source", "TEST")])),
//!     ResponseObject::from(Message::warning("some objects were filtered")),
//! ];
//!
//! let session = ResultSession::new(WhoisObjectMapper::new("http://localhost"), SessionConfig::default());
//! let report = session.run(IterSource::from_records(records), Null);
//!
//! assert!(report.outcome.is_found());
//! assert_eq!(report.outcome.errors().len(), 1);
//! assert_eq!(report.stats.objects, 1);
//! ```

use crate::classifier::{Record, RecordClassifier};
use crate::emitter::LookaheadEmitter;
use crate::envelope::{EnvelopeHeader, ERRORS_FIELD, TERMS_AND_CONDITIONS, TERMS_FIELD};
use crate::error::{StreamError, StreamResult};
use crate::error_log::ErrorLog;
use crate::outcome::{SessionOutcome, SessionState};
use crate::source::{ContextId, RecordHandler, RecordSource};
use crate::writer::StructuredWriter;
use whois_core::{ErrorMessages, Link, Message, ObjectMapper, Parameters, ResponseObject, Service};

/// Configuration for a result session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Header field naming the answering service.
    pub service: Option<Service>,
    /// Header field echoing the query parameters.
    pub parameters: Option<Parameters>,
    /// Target of the trailer's terms-and-conditions link.
    pub terms_and_conditions: String,
    /// Correlation token for the source; derived from the thread if unset.
    pub context_id: Option<ContextId>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            service: None,
            parameters: None,
            terms_and_conditions: TERMS_AND_CONDITIONS.to_string(),
            context_id: None,
        }
    }
}

impl SessionConfig {
    pub fn with_service(mut self, service: Service) -> Self {
        self.service = Some(service);
        self
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_context_id(mut self, context_id: ContextId) -> Self {
        self.context_id = Some(context_id);
        self
    }
}

/// Counters collected while a session runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Object records received.
    pub objects: u64,
    /// Tag records received, attached or not.
    pub tags: u64,
    /// Tags dropped because no object was pending.
    pub dropped_tags: u64,
    /// Warning and error messages accumulated.
    pub messages: u64,
    /// Records of a kind the session does not handle.
    pub ignored_records: u64,
    /// Elements written to the object array.
    pub written: u64,
}

/// Result of [`ResultSession::run`].
#[derive(Debug)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    /// Terminal state the session ended in.
    pub state: SessionState,
    pub stats: SessionStats,
    pub context_id: ContextId,
    /// Whether the writer was opened, even if the envelope head failed.
    pub opened: bool,
}

/// Runs one query session end to end.
///
/// The session is consumed by [`run`](Self::run), so a finished session
/// cannot be restarted. Sessions own all of their state and can run
/// concurrently on different threads.
#[derive(Debug)]
pub struct ResultSession<M> {
    mapper: M,
    config: SessionConfig,
}

impl<M: ObjectMapper> ResultSession<M> {
    pub fn new(mapper: M, config: SessionConfig) -> Self {
        Self { mapper, config }
    }

    /// Stream every record of `source` into `writer`.
    ///
    /// The writer is owned by the session for its lifetime and released when
    /// this returns, whatever the outcome.
    pub fn run<S, W>(mut self, mut source: S, writer: W) -> SessionReport
    where
        S: RecordSource,
        W: StructuredWriter,
    {
        let context_id = self
            .config
            .context_id
            .unwrap_or_else(ContextId::for_current_thread);
        let span = tracing::debug_span!("result_session", %context_id);
        let _entered = span.enter();

        let header = EnvelopeHeader {
            service: self.config.service.take(),
            parameters: self.config.parameters.take(),
        };
        let mut streamer = Streamer {
            emitter: LookaheadEmitter::new(&self.mapper, header),
            writer,
            errors: ErrorLog::new(),
            classifier: RecordClassifier::new(),
            stats: SessionStats::default(),
            found_any: false,
            trailer: TrailerProgress::default(),
            halted: None,
            terms_and_conditions: &self.config.terms_and_conditions,
        };

        let result = source.stream_results(context_id, &mut streamer);
        // the first error the handler raised wins over whatever the source made of it
        let result = match streamer.halted.take() {
            Some(err) => Err(err),
            None => result,
        };

        let outcome = match result {
            Ok(()) => streamer.complete(),
            Err(err) if err.is_aborted() => {
                tracing::debug!(reason = %err, "stream aborted by consumer");
                SessionOutcome::Aborted
            }
            Err(err) => streamer.fault(err),
        };

        streamer.stats.ignored_records = streamer.classifier.unrecognized();
        streamer.stats.written = streamer.emitter.written();
        let stats = streamer.stats;
        let opened = streamer.emitter.is_opened();
        drop(streamer);

        let state = outcome.state();
        tracing::debug!(
            state = ?state,
            objects = stats.objects,
            written = stats.written,
            "session finished"
        );

        SessionReport {
            outcome,
            state,
            stats,
            context_id,
            opened,
        }
    }
}

/// Trailer stages already attempted. A stage is marked before its writer
/// call, so a failed stage is never replayed.
#[derive(Debug, Default)]
struct TrailerProgress {
    errors: bool,
    terms: bool,
    close: bool,
}

/// Per-run state; owns the writer.
struct Streamer<'a, M, W> {
    emitter: LookaheadEmitter<&'a M>,
    writer: W,
    errors: ErrorLog,
    classifier: RecordClassifier,
    stats: SessionStats,
    found_any: bool,
    trailer: TrailerProgress,
    halted: Option<StreamError>,
    terms_and_conditions: &'a str,
}

impl<M: ObjectMapper, W: StructuredWriter> Streamer<'_, M, W> {
    fn dispatch(&mut self, record: ResponseObject) -> StreamResult<()> {
        match self.classifier.classify(record) {
            Record::Object(object) => {
                self.found_any = true;
                self.stats.objects += 1;
                self.emitter.on_object(&mut self.writer, object)
            }
            Record::Tag(tag) => {
                self.stats.tags += 1;
                if !self.emitter.on_tag(tag) {
                    self.stats.dropped_tags += 1;
                }
                Ok(())
            }
            Record::Message(message) => {
                if self.errors.push(message) {
                    self.stats.messages += 1;
                }
                Ok(())
            }
        }
    }

    /// Normal completion of the source.
    fn complete(&mut self) -> SessionOutcome {
        if !self.found_any {
            return SessionOutcome::NotFound {
                errors: self.errors.drain(),
            };
        }

        let errors = self.errors.drain();
        match self.close_envelope(&errors) {
            Ok(()) => SessionOutcome::Found { errors },
            Err(err) if err.is_aborted() => {
                tracing::debug!(reason = %err, "stream aborted while closing");
                SessionOutcome::Aborted
            }
            Err(cause) => self.fail(cause, errors),
        }
    }

    /// Unrecoverable fault from the source or the mapper.
    fn fault(&mut self, cause: StreamError) -> SessionOutcome {
        let errors = self.errors.drain();
        self.fail(cause, errors)
    }

    fn fail(&mut self, cause: StreamError, errors: Vec<Message>) -> SessionOutcome {
        tracing::error!(error = %cause, "result streaming failed");
        // stages that already ran, or failed, are skipped
        if self.emitter.is_opened() && !self.trailer.close {
            if let Err(err) = self.close_envelope(&errors) {
                tracing::warn!(error = %err, "could not finalize envelope after fault");
            }
        }
        SessionOutcome::Faulted { cause, errors }
    }

    fn close_envelope(&mut self, errors: &[Message]) -> StreamResult<()> {
        self.emitter.finish(&mut self.writer)?;
        if !errors.is_empty() && !self.trailer.errors {
            self.trailer.errors = true;
            let rendered: ErrorMessages = errors.iter().collect();
            self.writer.write_field(ERRORS_FIELD, &rendered)?;
        }
        if !self.trailer.terms {
            self.trailer.terms = true;
            self.writer
                .write_field(TERMS_FIELD, &Link::locator(self.terms_and_conditions))?;
        }
        if !self.trailer.close {
            self.trailer.close = true;
            self.writer.close()?;
        }
        Ok(())
    }
}

impl<M: ObjectMapper, W: StructuredWriter> RecordHandler for Streamer<'_, M, W> {
    fn handle(&mut self, record: ResponseObject) -> StreamResult<()> {
        if let Some(err) = &self.halted {
            return Err(err.clone());
        }
        let result = self.dispatch(record);
        if let Err(err) = &result {
            self.halted = Some(err.clone());
        }
        result
    }
}
