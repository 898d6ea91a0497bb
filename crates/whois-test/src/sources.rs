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

//! Scripted and synthetic record sources.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use whois_core::{ResponseObject, RpslObject, TagMetadata};
use whois_stream::{ContextId, RecordHandler, RecordSource, StreamError, StreamResult};

use crate::fixtures;

/// One step of a [`ScriptedSource`].
#[derive(Debug, Clone)]
pub enum Step {
    /// Deliver a record.
    Record(ResponseObject),
    /// End the stream as if the consumer disconnected.
    Abort,
    /// End the stream with a fault.
    Fault(StreamError),
}

impl From<ResponseObject> for Step {
    fn from(record: ResponseObject) -> Self {
        Step::Record(record)
    }
}

impl From<RpslObject> for Step {
    fn from(object: RpslObject) -> Self {
        Step::Record(object.into())
    }
}

impl From<TagMetadata> for Step {
    fn from(tag: TagMetadata) -> Self {
        Step::Record(tag.into())
    }
}

/// Replays a fixed script of records, aborts and faults.
///
/// ```rust
/// use whois_test::{fixtures, ScriptedSource, Step};
///
/// let source = ScriptedSource::new(vec![
///     Step::from(fixtures::mntner("A-MNT")),
///     Step::Abort,
/// ]);
/// assert_eq!(source.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    steps: Vec<Step>,
    delivered: usize,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            delivered: 0,
        }
    }

    /// Source that delivers only `records`.
    pub fn records<I, T>(records: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ResponseObject>,
    {
        Self::new(records.into_iter().map(|r| Step::Record(r.into())).collect())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of records handed to the handler.
    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl RecordSource for ScriptedSource {
    fn stream_results(
        &mut self,
        _context_id: ContextId,
        handler: &mut dyn RecordHandler,
    ) -> StreamResult<()> {
        for step in self.steps.clone() {
            match step {
                Step::Record(record) => {
                    self.delivered += 1;
                    handler.handle(record)?;
                }
                Step::Abort => return Err(StreamError::aborted("consumer disconnected")),
                Step::Fault(err) => return Err(err),
            }
        }
        Ok(())
    }
}

/// Shared counter of objects a source produced.
#[derive(Debug, Clone, Default)]
pub struct Produced(Arc<AtomicU64>);

impl Produced {
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Generates numbered maintainers lazily, each followed by a tag.
///
/// Nothing is materialized up front, so the number of objects only bounds
/// CPU time, not memory. After every delivered object the optional probe is
/// called with the number produced so far.
pub struct SyntheticSource {
    count: u64,
    produced: Produced,
    probe: Option<Box<dyn FnMut(u64)>>,
}

impl SyntheticSource {
    /// Source producing `count` objects (use `u64::MAX` for "unbounded").
    pub fn new(count: u64) -> Self {
        Self {
            count,
            produced: Produced::default(),
            probe: None,
        }
    }

    /// Call `probe` after each delivered object.
    pub fn with_probe(mut self, probe: impl FnMut(u64) + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Counter observing how many objects were produced.
    pub fn produced(&self) -> Produced {
        self.produced.clone()
    }

    fn object(i: u64) -> RpslObject {
        fixtures::mntner(&fixtures::numbered_key(i as usize))
    }
}

impl RecordSource for SyntheticSource {
    fn stream_results(
        &mut self,
        _context_id: ContextId,
        handler: &mut dyn RecordHandler,
    ) -> StreamResult<()> {
        for i in 0..self.count {
            handler.handle(ResponseObject::Object(Self::object(i)))?;
            let produced = self.produced.increment();
            if let Some(probe) = self.probe.as_mut() {
                probe(produced);
            }
            handler.handle(ResponseObject::Tag(fixtures::unref(
                &fixtures::numbered_key(i as usize),
                (i % 90) as u32,
            )))?;
        }
        Ok(())
    }
}
