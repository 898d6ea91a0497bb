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

//! Instrumented object mappers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use whois_core::{
    MappingError, MappingResult, ObjectMapper, RpslObject, TagMetadata, WhoisObject,
    WhoisObjectMapper,
};

use crate::fixtures::BASE_URL;

/// Default mapper rooted at the fixture base URL.
pub fn mapper() -> WhoisObjectMapper {
    WhoisObjectMapper::new(BASE_URL)
}

/// Wraps a mapper and counts how many objects it rendered.
#[derive(Debug, Clone)]
pub struct CountingMapper<M> {
    inner: M,
    count: Arc<AtomicU64>,
}

impl CountingMapper<WhoisObjectMapper> {
    /// Counting wrapper around the fixture mapper.
    pub fn fixture() -> Self {
        Self::new(mapper())
    }
}

impl<M> CountingMapper<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Handle reading the render count from elsewhere.
    pub fn counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.count)
    }

    pub fn mapped(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}

impl<M: ObjectMapper> ObjectMapper for CountingMapper<M> {
    fn map(&self, object: &RpslObject, tags: Option<&TagMetadata>) -> MappingResult<WhoisObject> {
        let mapped = self.inner.map(object, tags)?;
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(mapped)
    }
}

/// Fails for the object with a given key, maps everything else.
#[derive(Debug, Clone)]
pub struct FailingMapper {
    inner: WhoisObjectMapper,
    failing_key: String,
}

impl FailingMapper {
    pub fn new(failing_key: impl Into<String>) -> Self {
        Self {
            inner: mapper(),
            failing_key: failing_key.into(),
        }
    }
}

impl ObjectMapper for FailingMapper {
    fn map(&self, object: &RpslObject, tags: Option<&TagMetadata>) -> MappingResult<WhoisObject> {
        if object.key() == Some(self.failing_key.as_str()) {
            return Err(MappingError::missing_primary_key(
                object.object_type().unwrap_or_default(),
            ));
        }
        self.inner.map(object, tags)
    }
}
