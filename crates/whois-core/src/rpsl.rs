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

//! RPSL objects as delivered by the query engine.
//!
//! An [`RpslObject`] is an ordered list of `key: value` attributes. The first
//! attribute names the object type, and for most types its value is also the
//! primary key. `person` and `role` objects are keyed on `nic-hdl` instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single `key: value` line of an RPSL object.
///
/// Values are kept verbatim: continuation lines, end-of-line comments and
/// irregular whitespace survive until a mapper decides how to render them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpslAttribute {
    /// Attribute name, lowercase by convention (`"admin-c"`).
    pub key: String,
    /// Raw attribute value.
    pub value: String,
}

impl RpslAttribute {
    /// Create an attribute from a key and a raw value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The value with comments removed and whitespace collapsed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use whois_core::RpslAttribute;
    ///
    /// let attr = RpslAttribute::new("descr", "  Example   network # primary\n  +  site");
    /// assert_eq!(attr.clean_value(), "Example network + site");
    /// ```
    pub fn clean_value(&self) -> String {
        let mut cleaned = String::with_capacity(self.value.len());
        for line in self.value.lines() {
            let content = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };
            for word in content.split_whitespace() {
                if !cleaned.is_empty() {
                    cleaned.push(' ');
                }
                cleaned.push_str(word);
            }
        }
        cleaned
    }

    /// End-of-line comments found in the value, joined by a single space.
    pub fn comment(&self) -> Option<String> {
        let comments: Vec<&str> = self
            .value
            .lines()
            .filter_map(|line| line.find('#').map(|pos| line[pos + 1..].trim()))
            .filter(|c| !c.is_empty())
            .collect();

        if comments.is_empty() {
            None
        } else {
            Some(comments.join(" "))
        }
    }
}

impl fmt::Display for RpslAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// An object produced by a whois query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpslObject {
    /// Attributes in source order; the first one determines the type.
    pub attributes: Vec<RpslAttribute>,
}

impl RpslObject {
    /// Create an object from its attributes.
    pub fn new(attributes: Vec<RpslAttribute>) -> Self {
        Self { attributes }
    }

    /// Build an object from `(key, value)` pairs.
    ///
    /// ```rust
    /// use whois_core::RpslObject;
    ///
    /// let obj = RpslObject::from_pairs([("mntner", "TEST-MNT"), ("source", "TEST")]);
    /// assert_eq!(obj.object_type(), Some("mntner"));
    /// assert_eq!(obj.key(), Some("TEST-MNT"));
    /// ```
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            attributes: pairs
                .into_iter()
                .map(|(k, v)| RpslAttribute::new(k, v))
                .collect(),
        }
    }

    /// Object type, i.e. the key of the first attribute.
    pub fn object_type(&self) -> Option<&str> {
        self.attributes.first().map(|a| a.key.as_str())
    }

    /// Primary key attributes for this object type.
    ///
    /// `person` and `role` objects are keyed on `nic-hdl`, `route` and
    /// `route6` on the prefix plus `origin`; everything else on the first
    /// attribute.
    pub fn primary_key_attributes(&self) -> Vec<&RpslAttribute> {
        match self.object_type() {
            Some("person") | Some("role") => self.find_all(&["nic-hdl"]),
            Some("route") => self.find_all(&["route", "origin"]),
            Some("route6") => self.find_all(&["route6", "origin"]),
            Some(_) => self.attributes.iter().take(1).collect(),
            None => Vec::new(),
        }
    }

    /// Primary key as a single string (components concatenated).
    pub fn key(&self) -> Option<&str> {
        match self.object_type() {
            Some("person") | Some("role") => self.value_of("nic-hdl"),
            Some(_) => self.attributes.first().map(|a| a.value.trim()),
            None => None,
        }
    }

    /// Value of the first attribute named `key`, trimmed.
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.trim())
    }

    /// The `source:` attribute, if present.
    pub fn source(&self) -> Option<&str> {
        self.value_of("source")
    }

    fn find_all(&self, keys: &[&str]) -> Vec<&RpslAttribute> {
        keys.iter()
            .filter_map(|k| self.attributes.iter().find(|a| a.key == *k))
            .collect()
    }
}

impl fmt::Display for RpslObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attr in &self.attributes {
            writeln!(f, "{}", attr)?;
        }
        Ok(())
    }
}
