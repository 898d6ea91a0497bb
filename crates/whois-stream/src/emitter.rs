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

//! One-slot lookahead emitter.
//!
//! The engine delivers an object's tags *after* the object. To write each
//! object together with its tags the emitter keeps the most recent object
//! pending until the next object (or the end of the stream) proves no more
//! tags can arrive for it.
//!
//! ```text
//! records:   A  tag(A)  B  C  <end>
//! writes:          .    A  B    C
//! ```
//!
//! At most one un-rendered object is held at any time, so memory does not
//! grow with the size of the result set.

use crate::envelope::{EnvelopeHeader, OBJECTS_BLOCK, OBJECT_ARRAY, PARAMETERS_FIELD, SERVICE_FIELD};
use crate::error::StreamResult;
use crate::writer::StructuredWriter;
use whois_core::{MappingResult, ObjectMapper, RpslObject, TagMetadata, WhoisObject};

/// The object waiting for its tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingObject {
    pub object: RpslObject,
    pub tag: Option<TagMetadata>,
}

impl PendingObject {
    pub fn new(object: RpslObject) -> Self {
        Self { object, tag: None }
    }
}

/// A nesting level the emitter has started and still owes an end for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Block(&'static str),
    Array,
}

/// Turns positional object/tag adjacency into nested output.
#[derive(Debug)]
pub struct LookaheadEmitter<M> {
    mapper: M,
    header: EnvelopeHeader,
    pending: Option<PendingObject>,
    opened: bool,
    levels: Vec<Level>,
    written: u64,
}

impl<M: ObjectMapper> LookaheadEmitter<M> {
    /// Create an emitter that renders with `mapper` and opens the envelope
    /// with `header`.
    pub fn new(mapper: M, header: EnvelopeHeader) -> Self {
        Self {
            mapper,
            header,
            pending: None,
            opened: false,
            levels: Vec::new(),
            written: 0,
        }
    }

    /// Handle an object record.
    ///
    /// Opens the envelope on the first object, then writes the previously
    /// pending object and makes `object` the new pending one. If rendering
    /// the previous object fails, both it and `object` are discarded.
    pub fn on_object<W: StructuredWriter>(
        &mut self,
        writer: &mut W,
        object: RpslObject,
    ) -> StreamResult<()> {
        if !self.opened {
            self.open(writer)?;
        }

        if let Some(previous) = self.pending.take() {
            self.write_pending(writer, previous)?;
        }
        self.pending = Some(PendingObject::new(object));
        Ok(())
    }

    /// Handle a tag record.
    ///
    /// The tag replaces any earlier tag of the pending object. Returns
    /// `false` when no object is pending and the tag was dropped.
    pub fn on_tag(&mut self, tag: TagMetadata) -> bool {
        match self.pending.as_mut() {
            Some(pending) => {
                pending.tag = Some(tag);
                true
            }
            None => {
                tracing::warn!(
                    object_key = %tag.object_key,
                    "dropping tag with no preceding object"
                );
                false
            }
        }
    }

    /// Write the last pending object and end every level started so far.
    ///
    /// Each end call is made at most once, even if a call fails and `finish`
    /// runs again. No-op if the envelope was never opened.
    pub fn finish<W: StructuredWriter>(&mut self, writer: &mut W) -> StreamResult<()> {
        if !self.opened {
            return Ok(());
        }

        if let Some(last) = self.pending.take() {
            self.write_pending(writer, last)?;
        }
        while let Some(level) = self.levels.pop() {
            match level {
                Level::Array => writer.end_array()?,
                Level::Block(name) => writer.end_block(name)?,
            }
        }
        Ok(())
    }

    /// Render a pending object with its tag.
    pub fn render(&self, pending: &PendingObject) -> MappingResult<WhoisObject> {
        self.mapper.map(&pending.object, pending.tag.as_ref())
    }

    /// Whether the writer's `open` succeeded, even if the rest of the
    /// envelope head did not.
    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// Whether the envelope was opened and every level in it has ended.
    pub fn is_finished(&self) -> bool {
        self.opened && self.levels.is_empty() && self.pending.is_none()
    }

    /// The object currently held back, if any.
    pub fn pending(&self) -> Option<&PendingObject> {
        self.pending.as_ref()
    }

    /// Number of array elements written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    fn open<W: StructuredWriter>(&mut self, writer: &mut W) -> StreamResult<()> {
        writer.open()?;
        self.opened = true;
        if let Some(service) = &self.header.service {
            writer.write_field(SERVICE_FIELD, service)?;
        }
        if let Some(parameters) = &self.header.parameters {
            writer.write_field(PARAMETERS_FIELD, parameters)?;
        }
        writer.start_block(OBJECTS_BLOCK)?;
        self.levels.push(Level::Block(OBJECTS_BLOCK));
        writer.start_array(OBJECT_ARRAY)?;
        self.levels.push(Level::Array);
        Ok(())
    }

    fn write_pending<W: StructuredWriter>(
        &mut self,
        writer: &mut W,
        pending: PendingObject,
    ) -> StreamResult<()> {
        let element = self.render(&pending)?;
        writer.write_element(&element)?;
        self.written += 1;
        tracing::trace!(
            object_type = %element.object_type,
            tagged = pending.tag.is_some(),
            "wrote object"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WriteResult;
    use serde::Serialize;
    use whois_core::{Service, Tag, WhoisObjectMapper};

    /// Records calls as compact strings, refusing the call named in `.1`.
    #[derive(Default)]
    struct Calls(Vec<String>, Option<&'static str>);

    impl Calls {
        fn failing_at(call: &'static str) -> Self {
            Self(Vec::new(), Some(call))
        }

        fn record(&mut self, call: String) -> WriteResult {
            if self.1 == Some(call.as_str()) {
                return Err(crate::WriteError::encode("refused"));
            }
            self.0.push(call);
            Ok(())
        }
    }

    impl StructuredWriter for Calls {
        fn open(&mut self) -> WriteResult {
            self.record("open".into())
        }
        fn close(&mut self) -> WriteResult {
            self.record("close".into())
        }
        fn write_field<T: Serialize + ?Sized>(&mut self, name: &str, _value: &T) -> WriteResult {
            self.record(format!("field:{}", name))
        }
        fn start_block(&mut self, name: &str) -> WriteResult {
            self.record(format!("block:{}", name))
        }
        fn end_block(&mut self, name: &str) -> WriteResult {
            self.record(format!("/block:{}", name))
        }
        fn start_array(&mut self, name: &str) -> WriteResult {
            self.record(format!("array:{}", name))
        }
        fn write_element<T: Serialize + ?Sized>(&mut self, value: &T) -> WriteResult {
            let json = serde_json::to_value(value).map_err(crate::WriteError::encode)?;
            let key = json["primary-key"]["attribute"][0]["value"]
                .as_str()
                .unwrap_or("?")
                .to_string();
            let tagged = if json.get("tags").is_some() { "+tag" } else { "" };
            self.record(format!("element:{}{}", key, tagged))
        }
        fn end_array(&mut self) -> WriteResult {
            self.record("/array".into())
        }
    }

    fn mntner(key: &str) -> RpslObject {
        RpslObject::from_pairs([("mntner", key), ("source", "TEST")])
    }

    fn tag(key: &str) -> TagMetadata {
        TagMetadata::new(key, vec![Tag::new("unref", "1")])
    }

    fn emitter() -> LookaheadEmitter<WhoisObjectMapper> {
        LookaheadEmitter::new(WhoisObjectMapper::new("http://localhost"), EnvelopeHeader::default())
    }

    #[test]
    fn test_first_object_opens_without_writing() {
        let mut writer = Calls::default();
        let mut emitter = emitter();

        emitter.on_object(&mut writer, mntner("A-MNT")).unwrap();

        assert_eq!(writer.0, vec!["open", "block:objects", "array:object"]);
        assert!(emitter.is_opened());
        assert_eq!(emitter.written(), 0);
        assert!(emitter.pending().is_some());
    }

    #[test]
    fn test_header_fields_written_when_supplied() {
        let mut writer = Calls::default();
        let header = EnvelopeHeader {
            service: Some(Service::new("search")),
            parameters: None,
        };
        let mut emitter = LookaheadEmitter::new(WhoisObjectMapper::new("http://localhost"), header);

        emitter.on_object(&mut writer, mntner("A-MNT")).unwrap();
        assert_eq!(writer.0[..2], ["open".to_string(), "field:service".to_string()]);
    }

    #[test]
    fn test_tag_attaches_to_previous_object() {
        let mut writer = Calls::default();
        let mut emitter = emitter();

        emitter.on_object(&mut writer, mntner("A-MNT")).unwrap();
        assert!(emitter.on_tag(tag("A-MNT")));
        emitter.on_object(&mut writer, mntner("B-MNT")).unwrap();
        emitter.finish(&mut writer).unwrap();

        assert_eq!(
            writer.0[3..],
            [
                "element:A-MNT+tag".to_string(),
                "element:B-MNT".to_string(),
                "/array".to_string(),
                "/block:objects".to_string(),
            ]
        );
        assert_eq!(emitter.written(), 2);
    }

    #[test]
    fn test_later_tag_overwrites_earlier() {
        let mut writer = Calls::default();
        let mut emitter = emitter();

        emitter.on_object(&mut writer, mntner("A-MNT")).unwrap();
        emitter.on_tag(TagMetadata::new("A-MNT", vec![Tag::new("first", "")]));
        emitter.on_tag(TagMetadata::new("A-MNT", vec![Tag::new("second", "")]));

        let pending = emitter.pending().unwrap();
        assert_eq!(pending.tag.as_ref().unwrap().tags[0].tag_type, "second");
    }

    #[test]
    fn test_orphan_tag_dropped() {
        let mut emitter = emitter();
        assert!(!emitter.on_tag(tag("NOBODY")));
        assert!(emitter.pending().is_none());
    }

    #[test]
    fn test_finish_without_objects_is_noop() {
        let mut writer = Calls::default();
        let mut emitter = emitter();
        emitter.finish(&mut writer).unwrap();
        assert!(writer.0.is_empty());
        assert!(!emitter.is_finished());
    }

    #[test]
    fn test_finish_twice_closes_once() {
        let mut writer = Calls::default();
        let mut emitter = emitter();
        emitter.on_object(&mut writer, mntner("A-MNT")).unwrap();
        emitter.finish(&mut writer).unwrap();
        emitter.finish(&mut writer).unwrap();

        let closes = writer.0.iter().filter(|c| *c == "/array").count();
        assert_eq!(closes, 1);
    }

    #[test]
    fn test_finish_unwinds_partial_open() {
        let mut writer = Calls::failing_at("array:object");
        let mut emitter = emitter();

        let err = emitter.on_object(&mut writer, mntner("A-MNT")).unwrap_err();
        assert!(!err.is_aborted());
        assert!(emitter.is_opened());
        assert!(!emitter.is_finished());

        emitter.finish(&mut writer).unwrap();
        emitter.finish(&mut writer).unwrap();
        assert_eq!(writer.0, vec!["open", "block:objects", "/block:objects"]);
        assert!(emitter.is_finished());
    }

    #[test]
    fn test_failed_end_is_not_repeated() {
        let mut writer = Calls::failing_at("/array");
        let mut emitter = emitter();
        emitter.on_object(&mut writer, mntner("A-MNT")).unwrap();

        assert!(emitter.finish(&mut writer).is_err());
        emitter.finish(&mut writer).unwrap();
        assert_eq!(writer.0[3..], ["element:A-MNT".to_string(), "/block:objects".to_string()]);
    }

    #[test]
    fn test_mapping_failure_consumes_pending() {
        let mut writer = Calls::default();
        let mut emitter = emitter();

        // no source attribute: cannot be mapped
        emitter
            .on_object(&mut writer, RpslObject::from_pairs([("mntner", "BAD-MNT")]))
            .unwrap();
        let err = emitter.on_object(&mut writer, mntner("B-MNT")).unwrap_err();

        assert!(!err.is_aborted());
        assert!(emitter.pending().is_none());
        emitter.finish(&mut writer).unwrap();
        assert_eq!(writer.0.last().map(String::as_str), Some("/block:objects"));
        assert_eq!(emitter.written(), 0);
    }
}
