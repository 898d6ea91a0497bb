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

//! Accumulated operational messages.

use std::mem;
use whois_core::Message;

/// Ordered log of warning and error messages for one session.
///
/// Informational messages are rejected on entry. The log is drained exactly
/// once when the session finalizes; a second drain yields nothing.
///
/// ```rust
/// use whois_core::Message;
/// use whois_stream::ErrorLog;
///
/// let mut log = ErrorLog::new();
/// assert!(!log.push(Message::info("ignored")));
/// assert!(log.push(Message::warning("kept")));
///
/// assert_eq!(log.drain().len(), 1);
/// assert!(log.drain().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ErrorLog {
    messages: Vec<Message>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` unless it is informational. Returns whether it was kept.
    pub fn push(&mut self, message: Message) -> bool {
        if message.is_info() {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Take all accumulated messages, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Message> {
        mem::take(&mut self.messages)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_preserved() {
        let mut log = ErrorLog::new();
        log.push(Message::error("first"));
        log.push(Message::info("skipped"));
        log.push(Message::warning("second"));

        let texts: Vec<_> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_drain_is_one_shot() {
        let mut log = ErrorLog::new();
        log.push(Message::error("a"));
        log.push(Message::error("b"));

        assert_eq!(log.drain(), vec![Message::error("a"), Message::error("b")]);
        assert!(log.is_empty());
        assert!(log.drain().is_empty());
    }

    #[test]
    fn test_push_after_drain() {
        let mut log = ErrorLog::new();
        log.push(Message::error("a"));
        log.drain();
        log.push(Message::warning("late"));
        assert_eq!(log.drain(), vec![Message::warning("late")]);
    }
}
