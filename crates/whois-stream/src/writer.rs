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

//! The structured writer contract.
//!
//! A [`StructuredWriter`] is the only thing the streaming core knows about
//! the output encoding. The session guarantees well-nested calls:
//!
//! ```text
//! open
//!   write_field*            header
//!   start_block
//!     start_array
//!       write_element*
//!     end_array
//!   end_block
//!   write_field*            trailer
//! close
//! ```
//!
//! Writers do not need to defend against malformed nesting, and no call is
//! made after `close`.

use crate::error::WriteResult;
use serde::Serialize;

/// Incremental structured-document sink.
pub trait StructuredWriter {
    /// Open the document envelope.
    fn open(&mut self) -> WriteResult;

    /// Close the envelope and flush the underlying sink.
    fn close(&mut self) -> WriteResult;

    /// Write one named value at the current level.
    fn write_field<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> WriteResult;

    /// Start a named nested block.
    fn start_block(&mut self, name: &str) -> WriteResult;

    /// End the named block opened last.
    fn end_block(&mut self, name: &str) -> WriteResult;

    /// Start a named array.
    fn start_array(&mut self, name: &str) -> WriteResult;

    /// Write one element of the array opened last.
    fn write_element<T: Serialize + ?Sized>(&mut self, value: &T) -> WriteResult;

    /// End the array opened last.
    fn end_array(&mut self) -> WriteResult;
}

impl<W: StructuredWriter> StructuredWriter for &mut W {
    fn open(&mut self) -> WriteResult {
        (**self).open()
    }

    fn close(&mut self) -> WriteResult {
        (**self).close()
    }

    fn write_field<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> WriteResult {
        (**self).write_field(name, value)
    }

    fn start_block(&mut self, name: &str) -> WriteResult {
        (**self).start_block(name)
    }

    fn end_block(&mut self, name: &str) -> WriteResult {
        (**self).end_block(name)
    }

    fn start_array(&mut self, name: &str) -> WriteResult {
        (**self).start_array(name)
    }

    fn write_element<T: Serialize + ?Sized>(&mut self, value: &T) -> WriteResult {
        (**self).write_element(value)
    }

    fn end_array(&mut self) -> WriteResult {
        (**self).end_array()
    }
}
