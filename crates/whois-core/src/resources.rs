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

//! Renderable resources.
//!
//! These are the values handed to a structured writer: the mapped object
//! elements, the optional envelope header fields and the trailer payloads.
//! Field names follow the whois REST resource naming (`primary-key`,
//! `referenced-type`, `errormessage`), which every encoder reuses as-is.

use crate::Message;
use serde::{Deserialize, Serialize};

/// A hyperlink, always of the `locator` type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "type")]
    pub link_type: String,
    pub href: String,
}

impl Link {
    /// Create a locator link.
    pub fn locator(href: impl Into<String>) -> Self {
        Self {
            link_type: "locator".to_string(),
            href: href.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
}

/// One rendered attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(
        rename = "referenced-type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub referenced_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Attribute {
    /// Plain attribute with no link or comment.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            link: None,
            referenced_type: None,
            comment: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub attribute: Vec<Attribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub attribute: Vec<Attribute>,
}

/// A rendered tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisTag {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisTags {
    pub tag: Vec<WhoisTag>,
}

/// A mapped object, ready to be written as one array element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisObject {
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    pub source: Source,
    #[serde(rename = "primary-key")]
    pub primary_key: PrimaryKey,
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<WhoisTags>,
}

/// Envelope header: which service answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Envelope header: the query parameters echoed back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(rename = "inverse-lookup", default, skip_serializing_if = "Vec::is_empty")]
    pub inverse_lookup: Vec<String>,
    #[serde(rename = "type-filters", default, skip_serializing_if = "Vec::is_empty")]
    pub type_filters: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    #[serde(rename = "query-strings", default, skip_serializing_if = "Vec::is_empty")]
    pub query_strings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl Parameters {
    /// Parameters for a plain search on `query`.
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query_strings: vec![query.into()],
            ..Default::default()
        }
    }

    /// Restrict to the given sources.
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorArg {
    pub value: String,
}

/// A surfaced operational message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub severity: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ErrorArg>,
}

impl From<&Message> for ErrorMessage {
    fn from(message: &Message) -> Self {
        Self {
            severity: message.severity.as_str().to_string(),
            text: message.text.clone(),
            args: message
                .args
                .iter()
                .map(|value| ErrorArg {
                    value: value.clone(),
                })
                .collect(),
        }
    }
}

/// Trailer payload holding all accumulated messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessages {
    pub errormessage: Vec<ErrorMessage>,
}

impl ErrorMessages {
    pub fn is_empty(&self) -> bool {
        self.errormessage.is_empty()
    }
}

impl<'a> FromIterator<&'a Message> for ErrorMessages {
    fn from_iter<I: IntoIterator<Item = &'a Message>>(iter: I) -> Self {
        Self {
            errormessage: iter.into_iter().map(ErrorMessage::from).collect(),
        }
    }
}
