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

//! Records pushed by the query engine.

use crate::{Message, RpslObject, TagMetadata};
use serde::{Deserialize, Serialize};

/// One unit of query output, in engine order.
///
/// Serialized with a `kind` discriminator so records can be replayed from
/// line-delimited JSON:
///
/// ```json
/// {"kind":"object","attributes":[{"key":"mntner","value":"TEST-MNT"}]}
/// {"kind":"tag","object_key":"TEST-MNT","tags":[{"tag_type":"unref","value":"28"}]}
/// {"kind":"message","message":{"severity":"warning","text":"filtered"}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseObject {
    /// A matching object.
    Object(RpslObject),
    /// Tags for the object that came right before.
    Tag(TagMetadata),
    /// A status message. The engine occasionally emits an empty one.
    Message {
        #[serde(default)]
        message: Option<Message>,
    },
    /// Any record kind the streaming layer has no use for.
    Other {
        /// Engine-specific record name.
        name: String,
    },
}

impl ResponseObject {
    /// Short name of the record kind, for logging.
    pub fn kind(&self) -> &str {
        match self {
            ResponseObject::Object(_) => "object",
            ResponseObject::Tag(_) => "tag",
            ResponseObject::Message { .. } => "message",
            ResponseObject::Other { name } => name,
        }
    }

    /// Wrap a message.
    pub fn message(message: Message) -> Self {
        ResponseObject::Message {
            message: Some(message),
        }
    }
}

impl From<RpslObject> for ResponseObject {
    fn from(object: RpslObject) -> Self {
        ResponseObject::Object(object)
    }
}

impl From<TagMetadata> for ResponseObject {
    fn from(tag: TagMetadata) -> Self {
        ResponseObject::Tag(tag)
    }
}

impl From<Message> for ResponseObject {
    fn from(message: Message) -> Self {
        ResponseObject::message(message)
    }
}
