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

//! Status messages reported by the query engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message severity.
///
/// `Info` messages are informational only; the streaming layer never
/// surfaces them to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational.
    Info,
    /// Something the caller should know about.
    Warning,
    /// A problem with (part of) the query.
    Error,
}

impl Severity {
    /// Name used in rendered error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message with a `%s`-style template and positional arguments.
///
/// # Examples
///
/// ```rust
/// use whois_core::{Message, Severity};
///
/// let msg = Message::new(Severity::Error, "Invalid source '%s'", vec!["FOO".into()]);
/// assert_eq!(msg.formatted(), "Invalid source 'FOO'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Severity of the message.
    pub severity: Severity,
    /// Text template; each `%s` consumes one argument.
    pub text: String,
    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Message {
    /// Create a message.
    pub fn new(severity: Severity, text: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            args,
        }
    }

    /// Informational message without arguments.
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text, Vec::new())
    }

    /// Warning without arguments.
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text, Vec::new())
    }

    /// Error without arguments.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, text, Vec::new())
    }

    /// Whether this message is informational.
    pub fn is_info(&self) -> bool {
        self.severity == Severity::Info
    }

    /// The text with every `%s` replaced by the next argument.
    ///
    /// Surplus placeholders are left as-is; surplus arguments are ignored.
    pub fn formatted(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut args = self.args.iter();
        let mut rest = self.text.as_str();

        while let Some(pos) = rest.find("%s") {
            out.push_str(&rest[..pos]);
            match args.next() {
                Some(arg) => out.push_str(arg),
                None => out.push_str("%s"),
            }
            rest = &rest[pos + 2..];
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.formatted())
    }
}
