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

//! Error response documents.
//!
//! When a session ends without objects, or faults before anything reached the
//! sink, the transport answers with a separate document carrying only the
//! messages and the terms link. It is written through a fresh writer.

use crate::envelope::{ERRORS_FIELD, TERMS_FIELD};
use crate::error::WriteResult;
use crate::writer::StructuredWriter;
use whois_core::{ErrorMessages, Link, Message};

/// Write a complete error document to `writer`.
pub fn write_error_document<W: StructuredWriter>(
    mut writer: W,
    messages: &[Message],
    terms_and_conditions: &str,
) -> WriteResult {
    writer.open()?;
    if !messages.is_empty() {
        let rendered: ErrorMessages = messages.iter().collect();
        writer.write_field(ERRORS_FIELD, &rendered)?;
    }
    writer.write_field(TERMS_FIELD, &Link::locator(terms_and_conditions))?;
    writer.close()
}
