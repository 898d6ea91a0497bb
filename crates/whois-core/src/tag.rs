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

//! Out-of-band tag metadata.
//!
//! The engine emits tags as a separate record directly after the object they
//! describe. Nothing in the record links the two except their position.

use serde::{Deserialize, Serialize};

/// A single tag, e.g. `unref` with value `"28"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag type identifier.
    pub tag_type: String,
    /// Free-form tag data.
    #[serde(default)]
    pub value: String,
}

impl Tag {
    /// Create a tag.
    pub fn new(tag_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag_type: tag_type.into(),
            value: value.into(),
        }
    }
}

/// All tags the engine reported for one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMetadata {
    /// Key of the object the engine attached these tags to.
    pub object_key: String,
    /// Tags in engine order.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl TagMetadata {
    /// Create tag metadata for the object with the given key.
    pub fn new(object_key: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            object_key: object_key.into(),
            tags,
        }
    }

    /// Returns true when no tags are present.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
