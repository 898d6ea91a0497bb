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

//! Error types for object mapping.

use thiserror::Error;

/// Errors raised while turning an [`RpslObject`](crate::RpslObject) into a
/// renderable [`WhoisObject`](crate::WhoisObject).
///
/// A mapping error is never recovered from by the streaming layer: the whole
/// session is faulted.
///
/// # Examples
///
/// ```rust
/// use whois_core::MappingError;
///
/// let err = MappingError::missing_source("TEST-MNT");
/// assert!(err.to_string().contains("TEST-MNT"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The object has no attributes at all.
    #[error("Object has no attributes")]
    EmptyObject,

    /// No `source:` attribute, so no links can be built.
    #[error("Object '{key}' has no source attribute")]
    MissingSource { key: String },

    /// The key attribute(s) of the type are absent.
    #[error("Object of type '{object_type}' has no primary key")]
    MissingPrimaryKey { object_type: String },
}

impl MappingError {
    /// Create a missing-source error.
    #[inline]
    pub fn missing_source(key: impl Into<String>) -> Self {
        Self::MissingSource { key: key.into() }
    }

    /// Create a missing-primary-key error.
    #[inline]
    pub fn missing_primary_key(object_type: impl Into<String>) -> Self {
        Self::MissingPrimaryKey {
            object_type: object_type.into(),
        }
    }
}

/// Result type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;
