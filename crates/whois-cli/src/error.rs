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

//! Structured error types for the whois-stream CLI.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use whois_json::RecordReadError;
use whois_stream::WriteError;

/// Errors that stop a CLI command before it produced a result.
///
/// Query outcomes such as "not found" are not errors; they are reported
/// through the exit status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// I/O operation failed (file open, create or write).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// No supported output format matches the requested media types.
    #[error("None of the accepted media types is supported: '{0}'")]
    NotAcceptable(String),

    /// The record file could not be read.
    #[error("Record error: {0}")]
    Records(String),

    /// Writing the output document failed.
    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    ///
    /// ```rust
    /// use whois_cli::error::CliError;
    /// use std::io;
    ///
    /// let err = CliError::io_error("records.jsonl", io::Error::new(io::ErrorKind::NotFound, "missing"));
    /// assert!(err.to_string().contains("records.jsonl"));
    /// ```
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub fn not_acceptable(accept: impl Into<String>) -> Self {
        Self::NotAcceptable(accept.into())
    }
}

impl From<RecordReadError> for CliError {
    fn from(source: RecordReadError) -> Self {
        Self::Records(source.to_string())
    }
}

impl From<WriteError> for CliError {
    fn from(source: WriteError) -> Self {
        Self::Output(source.to_string())
    }
}
