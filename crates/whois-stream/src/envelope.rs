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

//! Envelope layout.
//!
//! Names of the fixed envelope parts, and the optional header fields written
//! when the envelope opens.

use whois_core::{Parameters, Service};

/// Root element name, for encoders that name the document root.
pub const ROOT: &str = "whois-resources";
/// Header field carrying the [`Service`].
pub const SERVICE_FIELD: &str = "service";
/// Header field carrying the [`Parameters`].
pub const PARAMETERS_FIELD: &str = "parameters";
/// Block wrapping the object array.
pub const OBJECTS_BLOCK: &str = "objects";
/// Array of mapped objects.
pub const OBJECT_ARRAY: &str = "object";
/// Trailer field with accumulated messages.
pub const ERRORS_FIELD: &str = "errormessages";
/// Trailer field linking the terms and conditions.
pub const TERMS_FIELD: &str = "terms-and-conditions";

/// Default terms-and-conditions location.
pub const TERMS_AND_CONDITIONS: &str = "http://www.ripe.net/db/support/db-terms-conditions.pdf";

/// Header fields written right after the envelope opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvelopeHeader {
    pub service: Option<Service>,
    pub parameters: Option<Parameters>,
}
