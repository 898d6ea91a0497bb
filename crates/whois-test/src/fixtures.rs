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

//! Canonical records used across the test suites.

use whois_core::{Message, ResponseObject, RpslObject, Severity, Tag, TagMetadata};

/// A maintainer keyed on `key`.
pub fn mntner(key: &str) -> RpslObject {
    RpslObject::from_pairs([
        ("mntner", key),
        ("descr", "Test maintainer"),
        ("admin-c", "JD1-TEST"),
        ("auth", "MD5-PW $1$fU9ZMQN9$QQtm3kRqZXWAuLpeOiLN7. # test"),
        ("mnt-by", key),
        ("source", "TEST"),
    ])
}

/// A person object keyed on `JD1-TEST`.
pub fn person() -> RpslObject {
    RpslObject::from_pairs([
        ("person", "John Doe"),
        ("address", "Singel 258"),
        ("phone", "+31 20 535 4444"),
        ("nic-hdl", "JD1-TEST"),
        ("mnt-by", "TEST-MNT"),
        ("source", "TEST"),
    ])
}

/// An IPv4 allocation.
pub fn inetnum() -> RpslObject {
    RpslObject::from_pairs([
        ("inetnum", "10.0.0.0 - 10.255.255.255"),
        ("netname", "TEST-NET"),
        ("descr", "Private network   # RFC 1918"),
        ("country", "NL"),
        ("org", "ORG-TEST1-TEST"),
        ("admin-c", "JD1-TEST"),
        ("tech-c", "JD1-TEST"),
        ("status", "ALLOCATED PA"),
        ("mnt-by", "TEST-MNT"),
        ("source", "TEST"),
    ])
}

/// An organisation.
pub fn organisation() -> RpslObject {
    RpslObject::from_pairs([
        ("organisation", "ORG-TEST1-TEST"),
        ("org-name", "Test Organisation"),
        ("org-type", "LIR"),
        ("mnt-by", "TEST-MNT"),
        ("source", "TEST"),
    ])
}

/// An object that the default mapper rejects (no source attribute).
pub fn unmappable(key: &str) -> RpslObject {
    RpslObject::from_pairs([("mntner", key)])
}

/// A single-tag metadata record for `key`.
pub fn tag_for(key: &str, tag_type: &str) -> TagMetadata {
    TagMetadata::new(key, vec![Tag::new(tag_type, "")])
}

/// The `unref` tag the engine attaches to unreferenced objects.
pub fn unref(key: &str, days: u32) -> TagMetadata {
    TagMetadata::new(key, vec![Tag::new("unref", days.to_string())])
}

pub fn warning(text: &str) -> ResponseObject {
    ResponseObject::from(Message::new(Severity::Warning, text, Vec::new()))
}

pub fn error(text: &str) -> ResponseObject {
    ResponseObject::from(Message::new(Severity::Error, text, Vec::new()))
}

pub fn info(text: &str) -> ResponseObject {
    ResponseObject::from(Message::info(text))
}

/// `count` maintainers `OBJ-0-MNT` .. `OBJ-{count-1}-MNT`.
pub fn numbered_mntners(count: usize) -> Vec<RpslObject> {
    (0..count).map(|i| mntner(&numbered_key(i))).collect()
}

/// Key of the `i`th numbered maintainer.
pub fn numbered_key(i: usize) -> String {
    format!("OBJ-{}-MNT", i)
}

/// Base URL the fixture mapper uses.
pub const BASE_URL: &str = "http://rest.test";
