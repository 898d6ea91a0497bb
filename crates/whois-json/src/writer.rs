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

//! JSON rendering of the structured writer contract.
//!
//! Blocks become JSON objects, arrays become JSON arrays and fields become
//! members of the enclosing object:
//!
//! ```text
//! open                  {
//! write_field(a, 1)       "a":1,
//! start_block(objects)    "objects":{
//! start_array(object)       "object":[
//! write_element(x)            x
//! end_array                 ]
//! end_block(objects)      }
//! close                 }
//! ```

use serde::Serialize;
use std::io::Write;
use whois_stream::{StructuredWriter, WriteError, WriteResult};

/// Configuration for [`JsonStreamWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonWriterConfig {
    /// Indent nested members, one per line.
    pub pretty: bool,
    /// Indentation unit when `pretty` is set.
    pub indent: String,
}

impl Default for JsonWriterConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
        }
    }
}

impl JsonWriterConfig {
    /// Pretty-printed output with two-space indentation.
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object { members: bool },
    Array { members: bool },
}

impl Frame {
    fn mark(&mut self) -> bool {
        match self {
            Frame::Object { members } | Frame::Array { members } => std::mem::replace(members, true),
        }
    }

    fn has_members(&self) -> bool {
        match self {
            Frame::Object { members } | Frame::Array { members } => *members,
        }
    }
}

/// Streams a JSON document to any [`Write`] sink.
///
/// Each value is encoded into a scratch buffer before it is written, so a
/// value that fails to encode leaves no bytes behind. Nothing else is
/// buffered beyond what the sink itself buffers.
///
/// # Examples
///
/// ```rust
/// use whois_json::JsonStreamWriter;
/// use whois_stream::StructuredWriter;
///
/// let mut out = Vec::new();
/// let mut writer = JsonStreamWriter::new(&mut out);
/// writer.open().unwrap();
/// writer.start_array("object").unwrap();
/// writer.write_element(&1).unwrap();
/// writer.write_element(&2).unwrap();
/// writer.end_array().unwrap();
/// writer.close().unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), r#"{"object":[1,2]}"#);
/// ```
#[derive(Debug)]
pub struct JsonStreamWriter<W: Write> {
    out: W,
    config: JsonWriterConfig,
    stack: Vec<Frame>,
    closed: bool,
}

impl<W: Write> JsonStreamWriter<W> {
    pub fn new(out: W) -> Self {
        Self::with_config(out, JsonWriterConfig::default())
    }

    pub fn with_config(out: W, config: JsonWriterConfig) -> Self {
        Self {
            out,
            config,
            stack: Vec::new(),
            closed: false,
        }
    }

    /// Recover the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Start a new member of the innermost frame.
    fn member(&mut self, expect_object: bool) -> WriteResult {
        if self.closed {
            return Err(WriteError::invalid_state("write after close"));
        }
        let depth = self.stack.len();
        let frame = self
            .stack
            .last_mut()
            .ok_or_else(|| WriteError::invalid_state("document not open"))?;
        match (frame, expect_object) {
            (Frame::Object { .. }, false) => {
                return Err(WriteError::invalid_state("element outside of an array"))
            }
            (Frame::Array { .. }, true) => {
                return Err(WriteError::invalid_state("named field inside an array"))
            }
            (frame, _) => {
                if frame.mark() {
                    self.out.write_all(b",")?;
                }
            }
        }
        self.newline(depth)
    }

    fn newline(&mut self, depth: usize) -> WriteResult {
        if self.config.pretty {
            self.out.write_all(b"\n")?;
            for _ in 0..depth {
                self.out.write_all(self.config.indent.as_bytes())?;
            }
        }
        Ok(())
    }

    fn key(&mut self, name: &str) -> WriteResult {
        serde_json::to_writer(&mut self.out, name).map_err(json_error)?;
        self.out.write_all(b":")?;
        if self.config.pretty {
            self.out.write_all(b" ")?;
        }
        Ok(())
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, WriteError> {
        if !self.config.pretty {
            return serde_json::to_vec(value).map_err(json_error);
        }
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(self.config.indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer).map_err(json_error)?;
        Ok(buf)
    }

    fn value(&mut self, encoded: &[u8]) -> WriteResult {
        if !self.config.pretty {
            self.out.write_all(encoded)?;
            return Ok(());
        }
        // lines after the first get the indent of the current depth
        let prefix = self.config.indent.repeat(self.stack.len());
        for (i, line) in encoded.split(|b| *b == b'\n').enumerate() {
            if i > 0 {
                self.out.write_all(b"\n")?;
                self.out.write_all(prefix.as_bytes())?;
            }
            self.out.write_all(line)?;
        }
        Ok(())
    }

    fn pop(&mut self, array: bool) -> WriteResult {
        let frame = match (self.stack.pop(), array) {
            (Some(frame @ Frame::Array { .. }), true) | (Some(frame @ Frame::Object { .. }), false) => {
                frame
            }
            (Some(_), _) => return Err(WriteError::invalid_state("mismatched end")),
            (None, _) => return Err(WriteError::invalid_state("nothing to end")),
        };
        if frame.has_members() {
            self.newline(self.stack.len())?;
        }
        self.out.write_all(if array { b"]" } else { b"}" })?;
        Ok(())
    }
}

fn json_error(err: serde_json::Error) -> WriteError {
    if err.is_io() {
        WriteError::Io(err.into())
    } else {
        WriteError::encode(err)
    }
}

impl<W: Write> StructuredWriter for JsonStreamWriter<W> {
    fn open(&mut self) -> WriteResult {
        if self.closed || !self.stack.is_empty() {
            return Err(WriteError::invalid_state("document already open"));
        }
        self.out.write_all(b"{")?;
        self.stack.push(Frame::Object { members: false });
        Ok(())
    }

    fn close(&mut self) -> WriteResult {
        if self.stack.len() != 1 {
            return Err(WriteError::invalid_state("close with open blocks"));
        }
        self.pop(false)?;
        if self.config.pretty {
            self.out.write_all(b"\n")?;
        }
        self.closed = true;
        self.out.flush()?;
        Ok(())
    }

    fn write_field<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> WriteResult {
        let encoded = self.encode(value)?;
        self.member(true)?;
        self.key(name)?;
        self.value(&encoded)
    }

    fn start_block(&mut self, name: &str) -> WriteResult {
        self.member(true)?;
        self.key(name)?;
        self.out.write_all(b"{")?;
        self.stack.push(Frame::Object { members: false });
        Ok(())
    }

    fn end_block(&mut self, _name: &str) -> WriteResult {
        self.pop(false)
    }

    fn start_array(&mut self, name: &str) -> WriteResult {
        self.member(true)?;
        self.key(name)?;
        self.out.write_all(b"[")?;
        self.stack.push(Frame::Array { members: false });
        Ok(())
    }

    fn write_element<T: Serialize + ?Sized>(&mut self, value: &T) -> WriteResult {
        let encoded = self.encode(value)?;
        self.member(false)?;
        self.value(&encoded)
    }

    fn end_array(&mut self) -> WriteResult {
        self.pop(true)
    }
}
