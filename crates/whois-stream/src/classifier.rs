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

//! Record classification.
//!
//! Engine records are routed into a closed set of three kinds. Anything the
//! streaming layer does not understand becomes an informational message, which
//! the session ignores.

use whois_core::{Message, ResponseObject, RpslObject, TagMetadata};

/// A classified record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// A result object.
    Object(RpslObject),
    /// Tags for the most recently seen object.
    Tag(TagMetadata),
    /// A status message of any severity.
    Message(Message),
}

impl Record {
    /// Short name of the record kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Record::Object(_) => "object",
            Record::Tag(_) => "tag",
            Record::Message(_) => "message",
        }
    }
}

/// Classify an engine record. Pure and infallible.
///
/// ```rust
/// use whois_core::{ResponseObject, Severity};
/// use whois_stream::{classify, Record};
///
/// let record = classify(ResponseObject::Other { name: "summary".into() });
/// match record {
///     Record::Message(msg) => assert_eq!(msg.severity, Severity::Info),
///     _ => unreachable!(),
/// }
/// ```
pub fn classify(record: ResponseObject) -> Record {
    match record {
        ResponseObject::Object(object) => Record::Object(object),
        ResponseObject::Tag(tag) => Record::Tag(tag),
        ResponseObject::Message {
            message: Some(message),
        } => Record::Message(message),
        ResponseObject::Message { message: None } => Record::Message(Message::info("")),
        ResponseObject::Other { name } => {
            Record::Message(Message::info(format!("Ignored record of kind '{}'", name)))
        }
    }
}

/// [`classify`] plus a counter of records that had no recognised kind.
#[derive(Debug, Default)]
pub struct RecordClassifier {
    unrecognized: u64,
}

impl RecordClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `record`, counting and logging unrecognised kinds.
    pub fn classify(&mut self, record: ResponseObject) -> Record {
        if let ResponseObject::Other { name } = &record {
            self.unrecognized += 1;
            tracing::debug!(kind = %name, "ignoring unrecognised record kind");
        }
        classify(record)
    }

    /// Number of unrecognised records seen so far.
    pub fn unrecognized(&self) -> u64 {
        self.unrecognized
    }
}
