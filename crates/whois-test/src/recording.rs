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

//! A structured writer that records every call.

use serde::Serialize;
use serde_json::Value;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};
use whois_stream::{StructuredWriter, WriteError, WriteResult};

/// One recorded writer call. Values are captured as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum WriterCall {
    Open,
    Close,
    Field { name: String, value: Value },
    StartBlock(String),
    EndBlock(String),
    StartArray(String),
    Element(Value),
    EndArray,
}

/// How an injected failure manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The sink reports a broken pipe (consumer gone).
    Disconnect,
    /// The value cannot be encoded.
    Encode,
}

impl Failure {
    fn error(self) -> WriteError {
        match self {
            Failure::Disconnect => WriteError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "consumer disconnected",
            )),
            Failure::Encode => WriteError::encode("injected encoding failure"),
        }
    }
}

/// A writer call that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    /// `write_field` with this name.
    Field(&'static str),
    StartBlock,
    EndBlock,
    StartArray,
    EndArray,
    Close,
}

/// Shared view of the calls a [`RecordingWriter`] received.
///
/// The writer is moved into the session; the journal stays with the test.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    calls: Arc<Mutex<Vec<WriterCall>>>,
}

impl Journal {
    fn lock(&self) -> MutexGuard<'_, Vec<WriterCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, call: WriterCall) {
        self.lock().push(call);
    }

    /// All calls in order.
    pub fn calls(&self) -> Vec<WriterCall> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&WriterCall) -> bool) -> usize {
        self.lock().iter().filter(|c| pred(c)).count()
    }

    pub fn opens(&self) -> usize {
        self.count(|c| *c == WriterCall::Open)
    }

    pub fn closes(&self) -> usize {
        self.count(|c| *c == WriterCall::Close)
    }

    /// Array elements in write order.
    pub fn elements(&self) -> Vec<Value> {
        self.lock()
            .iter()
            .filter_map(|c| match c {
                WriterCall::Element(v) => Some(v.clone()),
                _ => None,
            })
            .collect()
    }

    /// First primary-key value of every element, in write order.
    pub fn element_keys(&self) -> Vec<String> {
        self.elements().iter().map(element_key).collect()
    }

    /// Value of the first field called `name`.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.lock().iter().find_map(|c| match c {
            WriterCall::Field { name: n, value } if n == name => Some(value.clone()),
            _ => None,
        })
    }

    /// Names of all fields in write order.
    pub fn field_names(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|c| match c {
                WriterCall::Field { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether blocks and arrays were properly nested inside one envelope.
    pub fn is_well_nested(&self) -> bool {
        let calls = self.lock();
        let mut stack: Vec<String> = Vec::new();
        let mut open = false;
        let mut closed = false;

        for call in calls.iter() {
            if closed {
                return false;
            }
            match call {
                WriterCall::Open if !open => open = true,
                WriterCall::Open => return false,
                WriterCall::Close => {
                    if !open || !stack.is_empty() {
                        return false;
                    }
                    closed = true;
                }
                WriterCall::StartBlock(name) => stack.push(format!("block:{}", name)),
                WriterCall::EndBlock(name) => {
                    if stack.pop() != Some(format!("block:{}", name)) {
                        return false;
                    }
                }
                WriterCall::StartArray(_) => stack.push("array".to_string()),
                WriterCall::EndArray => {
                    if stack.pop().as_deref() != Some("array") {
                        return false;
                    }
                }
                WriterCall::Element(_) => {
                    if stack.last().map(String::as_str) != Some("array") {
                        return false;
                    }
                }
                WriterCall::Field { .. } => {
                    if !open || stack.last().map(String::as_str) == Some("array") {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// First primary-key value of a rendered element.
pub fn element_key(element: &Value) -> String {
    element["primary-key"]["attribute"][0]["value"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

/// Records every call into a [`Journal`], optionally failing on demand.
#[derive(Debug)]
pub struct RecordingWriter {
    journal: Journal,
    fail_after_elements: Option<(usize, Failure)>,
    fail_at: Option<(FailPoint, Failure)>,
    elements: usize,
    closed: bool,
}

impl RecordingWriter {
    /// A writer and the journal observing it.
    pub fn new() -> (Self, Journal) {
        let journal = Journal::default();
        let writer = Self {
            journal: journal.clone(),
            fail_after_elements: None,
            fail_at: None,
            elements: 0,
            closed: false,
        };
        (writer, journal)
    }

    /// Fail every call once `count` elements have been written.
    pub fn fail_after_elements(mut self, count: usize, failure: Failure) -> Self {
        self.fail_after_elements = Some((count, failure));
        self
    }

    /// Fail every call matching `point`; other calls still succeed.
    pub fn fail_at(mut self, point: FailPoint, failure: Failure) -> Self {
        self.fail_at = Some((point, failure));
        self
    }

    fn check(&self, hits: impl FnOnce(&FailPoint) -> bool) -> WriteResult {
        if self.closed {
            return Err(WriteError::invalid_state("write after close"));
        }
        if let Some((point, failure)) = &self.fail_at {
            if hits(point) {
                return Err(failure.error());
            }
        }
        match self.fail_after_elements {
            Some((count, failure)) if self.elements >= count => Err(failure.error()),
            _ => Ok(()),
        }
    }

    fn capture<T: Serialize + ?Sized>(value: &T) -> Result<Value, WriteError> {
        serde_json::to_value(value).map_err(WriteError::encode)
    }
}

impl StructuredWriter for RecordingWriter {
    fn open(&mut self) -> WriteResult {
        self.check(|_| false)?;
        self.journal.push(WriterCall::Open);
        Ok(())
    }

    fn close(&mut self) -> WriteResult {
        self.check(|p| *p == FailPoint::Close)?;
        self.journal.push(WriterCall::Close);
        self.closed = true;
        Ok(())
    }

    fn write_field<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> WriteResult {
        self.check(|p| matches!(p, FailPoint::Field(n) if *n == name))?;
        let value = Self::capture(value)?;
        self.journal.push(WriterCall::Field {
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    fn start_block(&mut self, name: &str) -> WriteResult {
        self.check(|p| *p == FailPoint::StartBlock)?;
        self.journal.push(WriterCall::StartBlock(name.to_string()));
        Ok(())
    }

    fn end_block(&mut self, name: &str) -> WriteResult {
        self.check(|p| *p == FailPoint::EndBlock)?;
        self.journal.push(WriterCall::EndBlock(name.to_string()));
        Ok(())
    }

    fn start_array(&mut self, name: &str) -> WriteResult {
        self.check(|p| *p == FailPoint::StartArray)?;
        self.journal.push(WriterCall::StartArray(name.to_string()));
        Ok(())
    }

    fn write_element<T: Serialize + ?Sized>(&mut self, value: &T) -> WriteResult {
        self.check(|_| false)?;
        let value = Self::capture(value)?;
        self.journal.push(WriterCall::Element(value));
        self.elements += 1;
        Ok(())
    }

    fn end_array(&mut self) -> WriteResult {
        self.check(|p| *p == FailPoint::EndArray)?;
        self.journal.push(WriterCall::EndArray);
        Ok(())
    }
}
