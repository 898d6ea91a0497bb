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

//! The record source contract.
//!
//! A query engine is consumed as a push-style producer: it is handed a
//! [`RecordHandler`] and calls it once per record, in order. The handler's
//! `Result` tells the source to stop; a well-behaved source returns the
//! handler's error unchanged.

use crate::error::{StreamError, StreamResult};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use whois_core::ResponseObject;

/// Per-session correlation token handed to the record source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(u64);

impl ContextId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Token derived from the identity of the calling thread.
    pub fn for_current_thread() -> Self {
        let mut hasher = DefaultHasher::new();
        std::thread::current().id().hash(&mut hasher);
        Self(hasher.finish())
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Receives records from a source.
pub trait RecordHandler {
    /// Handle one record. An error means: stop delivering.
    fn handle(&mut self, record: ResponseObject) -> StreamResult<()>;
}

impl<F> RecordHandler for F
where
    F: FnMut(ResponseObject) -> StreamResult<()>,
{
    fn handle(&mut self, record: ResponseObject) -> StreamResult<()> {
        self(record)
    }
}

/// A push-style producer of records.
///
/// Terminates with `Ok(())` on normal completion, with
/// [`StreamError::Aborted`] when the consumer went away, or with any other
/// [`StreamError`] on an unrecoverable fault.
pub trait RecordSource {
    fn stream_results(
        &mut self,
        context_id: ContextId,
        handler: &mut dyn RecordHandler,
    ) -> StreamResult<()>;
}

impl<S: RecordSource + ?Sized> RecordSource for &mut S {
    fn stream_results(
        &mut self,
        context_id: ContextId,
        handler: &mut dyn RecordHandler,
    ) -> StreamResult<()> {
        (**self).stream_results(context_id, handler)
    }
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn stream_results(
        &mut self,
        context_id: ContextId,
        handler: &mut dyn RecordHandler,
    ) -> StreamResult<()> {
        (**self).stream_results(context_id, handler)
    }
}

/// Adapts an iterator of records into a [`RecordSource`].
///
/// An `Err` item ends the stream with that error.
///
/// ```rust
/// use whois_core::{Message, ResponseObject};
/// use whois_stream::{ContextId, IterSource, RecordSource, StreamResult};
///
/// let mut source = IterSource::from_records(vec![ResponseObject::from(Message::warning("w"))]);
/// let mut seen = 0;
/// source
///     .stream_results(ContextId::new(1), &mut |_record: ResponseObject| -> StreamResult<()> {
///         seen += 1;
///         Ok(())
///     })
///     .unwrap();
/// assert_eq!(seen, 1);
/// ```
#[derive(Debug)]
pub struct IterSource<I> {
    records: I,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = StreamResult<ResponseObject>>,
{
    pub fn new<T>(records: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            records: records.into_iter(),
        }
    }
}

type OkRecord = fn(ResponseObject) -> StreamResult<ResponseObject>;

impl<R: Iterator<Item = ResponseObject>> IterSource<std::iter::Map<R, OkRecord>> {
    /// Source that delivers `records` and completes normally.
    pub fn from_records<T>(records: T) -> Self
    where
        T: IntoIterator<IntoIter = R>,
    {
        Self {
            records: records.into_iter().map(Ok as OkRecord),
        }
    }
}

impl<I> RecordSource for IterSource<I>
where
    I: Iterator<Item = StreamResult<ResponseObject>>,
{
    fn stream_results(
        &mut self,
        context_id: ContextId,
        handler: &mut dyn RecordHandler,
    ) -> StreamResult<()> {
        tracing::debug!(%context_id, "streaming records");
        for record in &mut self.records {
            handler.handle(record?)?;
        }
        Ok(())
    }
}

/// Source that fails immediately, for callers that could not even start the
/// query.
#[derive(Debug, Clone)]
pub struct FailedSource(pub StreamError);

impl RecordSource for FailedSource {
    fn stream_results(&mut self, _: ContextId, _: &mut dyn RecordHandler) -> StreamResult<()> {
        Err(self.0.clone())
    }
}
