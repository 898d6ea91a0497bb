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

//! Error types for result streaming.
//!
//! Two error types cross the streaming boundary:
//!
//! - [`WriteError`]: raised by a [`StructuredWriter`](crate::StructuredWriter)
//! - [`StreamError`]: raised by a record source or by the session itself
//!
//! A sink I/O failure means the consumer went away. It converts into
//! [`StreamError::Aborted`], which a session swallows instead of reporting.
//!
//! ```rust
//! use whois_stream::{StreamError, WriteError};
//! use std::io;
//!
//! let broken = io::Error::new(io::ErrorKind::BrokenPipe, "client gone");
//! let err: StreamError = WriteError::from(broken).into();
//! assert!(err.is_aborted());
//! assert_eq!(err.fault_kind(), None);
//! ```

use std::fmt;
use thiserror::Error;
use whois_core::MappingError;

/// Broad class of an unrecoverable fault, used to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The query itself was rejected.
    InvalidQuery,
    /// The caller is blocked or over its limits.
    Blocked,
    /// Anything else.
    Internal,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::InvalidQuery => write!(f, "Invalid query"),
            FaultKind::Blocked => write!(f, "Blocked"),
            FaultKind::Internal => write!(f, "Internal"),
        }
    }
}

/// Errors raised by a structured writer.
#[derive(Error, Debug)]
pub enum WriteError {
    /// The output stream failed; the consumer is gone.
    #[error("Output stream closed: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded.
    #[error("Encoding error: {0}")]
    Encode(String),

    /// The call is not legal in the writer's current state.
    #[error("Invalid writer state: {0}")]
    InvalidState(String),
}

impl WriteError {
    /// Create an encoding error.
    #[inline]
    pub fn encode(message: impl fmt::Display) -> Self {
        Self::Encode(message.to_string())
    }

    /// Create an invalid-state error.
    #[inline]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}

/// Result type for writer operations.
pub type WriteResult = Result<(), WriteError>;

/// Errors that terminate a streaming session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The consumer stopped reading. Expected, never reported as a failure.
    #[error("Stream aborted: {reason}")]
    Aborted { reason: String },

    /// The record source failed.
    #[error("{kind} fault: {message}")]
    Source { kind: FaultKind, message: String },

    /// An object could not be mapped.
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// A value could not be encoded by the writer.
    #[error("Encoding error: {0}")]
    Encode(String),
}

impl StreamError {
    /// Create a stream-aborted condition.
    #[inline]
    pub fn aborted(reason: impl Into<String>) -> Self {
        Self::Aborted {
            reason: reason.into(),
        }
    }

    /// Create a source fault of the given kind.
    #[inline]
    pub fn source(kind: FaultKind, message: impl Into<String>) -> Self {
        Self::Source {
            kind,
            message: message.into(),
        }
    }

    /// Create an internal source fault.
    #[inline]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::source(FaultKind::Internal, message)
    }

    /// Create an invalid-query source fault.
    #[inline]
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::source(FaultKind::InvalidQuery, message)
    }

    /// Whether this is a consumer-driven abort.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }

    /// Fault class, or `None` for an abort.
    pub fn fault_kind(&self) -> Option<FaultKind> {
        match self {
            Self::Aborted { .. } => None,
            Self::Source { kind, .. } => Some(*kind),
            Self::Mapping(_) | Self::Encode(_) => Some(FaultKind::Internal),
        }
    }
}

impl From<WriteError> for StreamError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Io(e) => StreamError::aborted(e.to_string()),
            WriteError::Encode(message) => StreamError::Encode(message),
            WriteError::InvalidState(message) => StreamError::internal(message),
        }
    }
}

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_write_error_is_abort() {
        let err: StreamError = WriteError::Io(io::Error::new(io::ErrorKind::ConnectionReset, "reset")).into();
        assert!(err.is_aborted());
    }

    #[test]
    fn test_encode_error_is_internal_fault() {
        let err: StreamError = WriteError::encode("bad float").into();
        assert!(!err.is_aborted());
        assert_eq!(err.fault_kind(), Some(FaultKind::Internal));
        assert!(err.to_string().contains("bad float"));
    }

    #[test]
    fn test_invalid_state_is_internal_fault() {
        let err: StreamError = WriteError::invalid_state("write after close").into();
        assert_eq!(
            err,
            StreamError::internal("write after close")
        );
    }

    #[test]
    fn test_source_fault_display() {
        let err = StreamError::invalid_query("unknown flag -Z");
        assert_eq!(err.to_string(), "Invalid query fault: unknown flag -Z");
        assert_eq!(err.fault_kind(), Some(FaultKind::InvalidQuery));
    }

    #[test]
    fn test_mapping_error_converts() {
        let err: StreamError = MappingError::EmptyObject.into();
        assert_eq!(err.fault_kind(), Some(FaultKind::Internal));
    }
}
