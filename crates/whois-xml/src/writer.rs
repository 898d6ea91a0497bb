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

//! XML rendering of the structured writer contract.
//!
//! Values are rendered the way the whois REST API lays out its XML: scalar
//! members become attributes, nested objects become child elements and
//! arrays become repeated children named after the array.
//!
//! ```xml
//! <whois-resources xmlns:xlink="http://www.w3.org/1999/xlink">
//!   <service name="search"/>
//!   <objects>
//!     <object type="mntner">
//!       <link xlink:type="locator" xlink:href="..."/>
//!       <source id="test"/>
//!       ...
//!     </object>
//!   </objects>
//!   <terms-and-conditions xlink:type="locator" xlink:href="..."/>
//! </whois-resources>
//! ```

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;
use whois_stream::envelope::ROOT;
use whois_stream::{StructuredWriter, WriteError, WriteResult};

/// Namespace used by link attributes.
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Elements whose attributes live in the xlink namespace.
const LINK_ELEMENTS: [&str; 2] = ["link", "terms-and-conditions"];

/// Configuration for XML output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlWriterConfig {
    /// Pretty-print with indentation.
    pub pretty: bool,
    /// Indentation string (e.g., "  " or "\t").
    pub indent: String,
    /// Root element name.
    pub root_element: String,
    /// Emit the `<?xml ...?>` declaration.
    pub declaration: bool,
}

impl Default for XmlWriterConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
            root_element: ROOT.to_string(),
            declaration: true,
        }
    }
}

/// Streams an XML document to any [`Write`] sink.
pub struct XmlStreamWriter<W: Write> {
    writer: Writer<W>,
    config: XmlWriterConfig,
    blocks: Vec<String>,
    arrays: Vec<String>,
    opened: bool,
    closed: bool,
}

impl<W: Write> XmlStreamWriter<W> {
    pub fn new(out: W) -> Self {
        Self::with_config(out, XmlWriterConfig::default())
    }

    pub fn with_config(out: W, config: XmlWriterConfig) -> Self {
        let writer = if config.pretty {
            let indent_char = config.indent.bytes().next().unwrap_or(b' ');
            Writer::new_with_indent(out, indent_char, config.indent.len())
        } else {
            Writer::new(out)
        };
        Self {
            writer,
            config,
            blocks: Vec::new(),
            arrays: Vec::new(),
            opened: false,
            closed: false,
        }
    }

    /// Recover the sink.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn ensure_writable(&self) -> WriteResult {
        if self.closed {
            return Err(WriteError::invalid_state("write after close"));
        }
        if !self.opened {
            return Err(WriteError::invalid_state("document not open"));
        }
        Ok(())
    }

    fn event(&mut self, event: Event<'_>) -> WriteResult {
        self.writer.write_event(event).map_err(xml_error)
    }

    fn element<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> WriteResult {
        let value = serde_json::to_value(value).map_err(WriteError::encode)?;
        self.value(name, &value)
    }

    fn value(&mut self, name: &str, value: &Value) -> WriteResult {
        match value {
            Value::Null => Ok(()),
            Value::Object(members) => self.object(name, members),
            Value::Array(items) => items.iter().try_for_each(|item| self.value(name, item)),
            scalar => {
                self.event(Event::Start(BytesStart::new(name)))?;
                self.event(Event::Text(BytesText::new(&scalar_text(scalar))))?;
                self.event(Event::End(BytesEnd::new(name)))
            }
        }
    }

    fn object(&mut self, name: &str, members: &Map<String, Value>) -> WriteResult {
        let link = LINK_ELEMENTS.contains(&name);
        let mut start = BytesStart::new(name);
        let mut has_children = false;

        for (key, member) in members {
            match member {
                Value::Null => {}
                Value::Object(_) | Value::Array(_) => has_children = true,
                scalar => {
                    let key = if link {
                        format!("xlink:{}", key)
                    } else {
                        key.clone()
                    };
                    start.push_attribute((key.as_str(), scalar_text(scalar).as_str()));
                }
            }
        }

        if !has_children {
            return self.event(Event::Empty(start));
        }

        self.event(Event::Start(start))?;
        for (key, member) in members {
            if matches!(member, Value::Object(_) | Value::Array(_)) {
                self.value(key, member)?;
            }
        }
        self.event(Event::End(BytesEnd::new(name)))
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn xml_error(err: quick_xml::Error) -> WriteError {
    match err {
        quick_xml::Error::Io(io) => WriteError::Io(std::io::Error::new(io.kind(), io.to_string())),
        other => WriteError::encode(other),
    }
}

impl<W: Write> StructuredWriter for XmlStreamWriter<W> {
    fn open(&mut self) -> WriteResult {
        if self.opened || self.closed {
            return Err(WriteError::invalid_state("document already open"));
        }
        if self.config.declaration {
            self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;
        }
        let root_element = self.config.root_element.clone();
        let mut root = BytesStart::new(root_element.as_str());
        root.push_attribute(("xmlns:xlink", XLINK_NAMESPACE));
        self.event(Event::Start(root))?;
        self.opened = true;
        Ok(())
    }

    fn close(&mut self) -> WriteResult {
        self.ensure_writable()?;
        if !self.blocks.is_empty() || !self.arrays.is_empty() {
            return Err(WriteError::invalid_state("close with open blocks"));
        }
        let root_element = self.config.root_element.clone();
        self.event(Event::End(BytesEnd::new(root_element.as_str())))?;
        self.closed = true;
        self.writer.get_mut().flush()?;
        Ok(())
    }

    fn write_field<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> WriteResult {
        self.ensure_writable()?;
        self.element(name, value)
    }

    fn start_block(&mut self, name: &str) -> WriteResult {
        self.ensure_writable()?;
        self.event(Event::Start(BytesStart::new(name)))?;
        self.blocks.push(name.to_string());
        Ok(())
    }

    fn end_block(&mut self, name: &str) -> WriteResult {
        self.ensure_writable()?;
        match self.blocks.pop() {
            Some(open) if open == name => self.event(Event::End(BytesEnd::new(name))),
            _ => Err(WriteError::invalid_state(format!("unexpected end of block '{}'", name))),
        }
    }

    /// Arrays have no wrapper element; each element repeats `name`.
    fn start_array(&mut self, name: &str) -> WriteResult {
        self.ensure_writable()?;
        self.arrays.push(name.to_string());
        Ok(())
    }

    fn write_element<T: Serialize + ?Sized>(&mut self, value: &T) -> WriteResult {
        self.ensure_writable()?;
        let name = self
            .arrays
            .last()
            .cloned()
            .ok_or_else(|| WriteError::invalid_state("element outside of an array"))?;
        self.element(&name, value)
    }

    fn end_array(&mut self) -> WriteResult {
        self.ensure_writable()?;
        self.arrays
            .pop()
            .map(|_| ())
            .ok_or_else(|| WriteError::invalid_state("no array to end"))
    }
}
