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

//! Whois domain model
//!
//! Types shared by every crate in the workspace: the RPSL objects, tags and
//! messages a query engine emits, the [`ResponseObject`] record that carries
//! them, and the renderable resources written to the output document.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`rpsl`] | RPSL objects and attributes |
//! | [`tag`] | Out-of-band tag metadata |
//! | [`message`] | Engine status messages |
//! | [`record`] | The record type pushed by the engine |
//! | [`resources`] | Renderable objects, header and trailer payloads |
//! | [`mapper`] | The object-mapping contract and default mapper |
//!
//! # Example
//!
//! ```rust
//! use whois_core::{ObjectMapper, RpslObject, Tag, TagMetadata, WhoisObjectMapper};
//!
//! let obj = RpslObject::from_pairs([
//!     ("mntner", "TEST-MNT"),
//!     ("mnt-by", "TEST-MNT"),
//!     ("source", "TEST"),
//! ]);
//! let tags = TagMetadata::new("TEST-MNT", vec![Tag::new("unref", "28")]);
//!
//! let mapper = WhoisObjectMapper::new("https://rest.db.ripe.net");
//! let element = mapper.map(&obj, Some(&tags)).unwrap();
//! assert_eq!(element.tags.unwrap().tag[0].id, "unref");
//! ```

pub mod error;
pub mod mapper;
pub mod message;
pub mod record;
pub mod resources;
pub mod rpsl;
pub mod tag;

pub use error::{MappingError, MappingResult};
pub use mapper::{AttributeMapping, ObjectMapper, WhoisObjectMapper};
pub use message::{Message, Severity};
pub use record::ResponseObject;
pub use resources::{
    Attribute, Attributes, ErrorArg, ErrorMessage, ErrorMessages, Link, Parameters, PrimaryKey,
    Service, Source, WhoisObject, WhoisTag, WhoisTags,
};
pub use rpsl::{RpslAttribute, RpslObject};
pub use tag::{Tag, TagMetadata};
