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

//! Object mapping: `(object, optional tags) -> renderable element`.
//!
//! The streaming layer only depends on the [`ObjectMapper`] trait. The
//! provided [`WhoisObjectMapper`] renders REST-style resources with locator
//! links for the object itself and for attributes that reference other
//! objects.

use crate::error::{MappingError, MappingResult};
use crate::resources::{
    Attribute, Attributes, Link, PrimaryKey, Source, WhoisObject, WhoisTag, WhoisTags,
};
use crate::{RpslAttribute, RpslObject, TagMetadata};

/// Maps a domain object plus its optional tags into a renderable element.
///
/// Implementations must be deterministic and free of side effects beyond the
/// returned value.
pub trait ObjectMapper {
    /// Render `object`, attaching `tags` when present.
    fn map(&self, object: &RpslObject, tags: Option<&TagMetadata>) -> MappingResult<WhoisObject>;
}

impl<M: ObjectMapper + ?Sized> ObjectMapper for &M {
    fn map(&self, object: &RpslObject, tags: Option<&TagMetadata>) -> MappingResult<WhoisObject> {
        (**self).map(object, tags)
    }
}

/// How attribute values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeMapping {
    /// Comments split into their own field, whitespace collapsed.
    #[default]
    Formatted,
    /// Values exactly as stored.
    Unformatted,
}

impl AttributeMapping {
    /// Pick the mapping for the `unformatted` query flag.
    pub fn from_unformatted(unformatted: bool) -> Self {
        if unformatted {
            AttributeMapping::Unformatted
        } else {
            AttributeMapping::Formatted
        }
    }
}

/// Default mapper producing [`WhoisObject`] resources.
///
/// # Examples
///
/// ```rust
/// use whois_core::{ObjectMapper, RpslObject, WhoisObjectMapper};
///
/// let mapper = WhoisObjectMapper::new("https://rest.db.ripe.net");
/// let obj = RpslObject::from_pairs([("mntner", "TEST-MNT"), ("source", "TEST")]);
/// let mapped = mapper.map(&obj, None).unwrap();
///
/// assert_eq!(mapped.object_type, "mntner");
/// assert_eq!(
///     mapped.link.unwrap().href,
///     "https://rest.db.ripe.net/test/mntner/TEST-MNT"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct WhoisObjectMapper {
    base_url: String,
    attribute_mapping: AttributeMapping,
}

impl WhoisObjectMapper {
    /// Create a mapper whose links are rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            attribute_mapping: AttributeMapping::default(),
        }
    }

    /// Use the given attribute mapping.
    pub fn with_attribute_mapping(mut self, mapping: AttributeMapping) -> Self {
        self.attribute_mapping = mapping;
        self
    }

    /// The configured attribute mapping.
    pub fn attribute_mapping(&self) -> AttributeMapping {
        self.attribute_mapping
    }

    fn link(&self, source: &str, object_type: &str, key: &str) -> Link {
        Link::locator(format!(
            "{}/{}/{}/{}",
            self.base_url,
            source.to_ascii_lowercase(),
            object_type,
            key
        ))
    }

    fn map_attribute(&self, attr: &RpslAttribute, source: &str) -> Attribute {
        let (value, comment) = match self.attribute_mapping {
            AttributeMapping::Formatted => (attr.clean_value(), attr.comment()),
            AttributeMapping::Unformatted => (attr.value.clone(), None),
        };

        let referenced = referenced_type(&attr.key);
        let link = match referenced {
            Some(ref_type) if !value.is_empty() => {
                let target = attr.clean_value();
                Some(self.link(source, ref_type, &target))
            }
            _ => None,
        };

        Attribute {
            name: attr.key.clone(),
            value,
            link,
            referenced_type: referenced.map(str::to_string),
            comment,
        }
    }
}

impl ObjectMapper for WhoisObjectMapper {
    fn map(&self, object: &RpslObject, tags: Option<&TagMetadata>) -> MappingResult<WhoisObject> {
        let object_type = object.object_type().ok_or(MappingError::EmptyObject)?;
        let key = object
            .key()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| MappingError::missing_primary_key(object_type))?;
        let source = object
            .source()
            .ok_or_else(|| MappingError::missing_source(key))?;

        let primary_key = PrimaryKey {
            attribute: object
                .primary_key_attributes()
                .into_iter()
                .map(|a| Attribute::new(a.key.clone(), a.clean_value()))
                .collect(),
        };

        let attributes = Attributes {
            attribute: object
                .attributes
                .iter()
                .map(|a| self.map_attribute(a, source))
                .collect(),
        };

        let tags = tags.filter(|t| !t.is_empty()).map(|t| WhoisTags {
            tag: t
                .tags
                .iter()
                .map(|tag| WhoisTag {
                    id: tag.tag_type.clone(),
                    data: tag.value.clone(),
                })
                .collect(),
        });

        Ok(WhoisObject {
            object_type: object_type.to_string(),
            link: Some(self.link(source, object_type, key)),
            source: Source {
                id: source.to_ascii_lowercase(),
            },
            primary_key,
            attributes,
            tags,
        })
    }
}

/// Object type referenced by an attribute, for attributes holding a key.
fn referenced_type(attribute: &str) -> Option<&'static str> {
    match attribute {
        "admin-c" | "tech-c" | "zone-c" | "abuse-c" | "author" | "ping-hdl" => Some("person"),
        "mnt-by" | "mnt-ref" | "mnt-lower" | "mnt-routes" | "mnt-domains" | "mnt-irt" => {
            Some("mntner")
        }
        "org" => Some("organisation"),
        "origin" => Some("aut-num"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tag;

    fn inetnum() -> RpslObject {
        RpslObject::from_pairs([
            ("inetnum", "10.0.0.0 - 10.255.255.255"),
            ("netname", "TEST-NET"),
            ("admin-c", "JD1-TEST # primary contact"),
            ("mnt-by", "TEST-MNT"),
            ("source", "TEST"),
        ])
    }

    #[test]
    fn test_map_links_and_source() {
        let mapper = WhoisObjectMapper::new("http://localhost/");
        let mapped = mapper.map(&inetnum(), None).unwrap();

        assert_eq!(mapped.source.id, "test");
        assert_eq!(
            mapped.link.as_ref().unwrap().href,
            "http://localhost/test/inetnum/10.0.0.0 - 10.255.255.255"
        );
        assert_eq!(mapped.primary_key.attribute.len(), 1);
        assert!(mapped.tags.is_none());
    }

    #[test]
    fn test_formatted_attribute_splits_comment() {
        let mapper = WhoisObjectMapper::new("http://localhost");
        let mapped = mapper.map(&inetnum(), None).unwrap();
        let admin = &mapped.attributes.attribute[2];

        assert_eq!(admin.value, "JD1-TEST");
        assert_eq!(admin.comment.as_deref(), Some("primary contact"));
        assert_eq!(admin.referenced_type.as_deref(), Some("person"));
        assert_eq!(
            admin.link.as_ref().unwrap().href,
            "http://localhost/test/person/JD1-TEST"
        );
    }

    #[test]
    fn test_unformatted_keeps_raw_value() {
        let mapper = WhoisObjectMapper::new("http://localhost")
            .with_attribute_mapping(AttributeMapping::from_unformatted(true));
        let mapped = mapper.map(&inetnum(), None).unwrap();
        let admin = &mapped.attributes.attribute[2];

        assert_eq!(admin.value, "JD1-TEST # primary contact");
        assert!(admin.comment.is_none());
        // links still point at the referenced key
        assert!(admin.link.as_ref().unwrap().href.ends_with("/person/JD1-TEST"));
    }

    #[test]
    fn test_tags_attached() {
        let mapper = WhoisObjectMapper::new("http://localhost");
        let tags = TagMetadata::new("TEST-NET", vec![Tag::new("unref", "28")]);
        let mapped = mapper.map(&inetnum(), Some(&tags)).unwrap();
        let rendered = mapped.tags.unwrap();

        assert_eq!(rendered.tag.len(), 1);
        assert_eq!(rendered.tag[0].id, "unref");
        assert_eq!(rendered.tag[0].data, "28");
    }

    #[test]
    fn test_empty_tag_list_omitted() {
        let mapper = WhoisObjectMapper::new("http://localhost");
        let tags = TagMetadata::new("TEST-NET", Vec::new());
        let mapped = mapper.map(&inetnum(), Some(&tags)).unwrap();
        assert!(mapped.tags.is_none());
    }

    #[test]
    fn test_missing_source_is_error() {
        let mapper = WhoisObjectMapper::new("http://localhost");
        let obj = RpslObject::from_pairs([("mntner", "TEST-MNT")]);
        assert_eq!(
            mapper.map(&obj, None).unwrap_err(),
            MappingError::missing_source("TEST-MNT")
        );
    }

    #[test]
    fn test_empty_object_is_error() {
        let mapper = WhoisObjectMapper::new("http://localhost");
        assert_eq!(
            mapper.map(&RpslObject::new(Vec::new()), None).unwrap_err(),
            MappingError::EmptyObject
        );
    }

    #[test]
    fn test_person_without_nic_hdl_is_error() {
        let mapper = WhoisObjectMapper::new("http://localhost");
        let obj = RpslObject::from_pairs([("person", "John Doe"), ("source", "TEST")]);
        assert_eq!(
            mapper.map(&obj, None).unwrap_err(),
            MappingError::missing_primary_key("person")
        );
    }
}
