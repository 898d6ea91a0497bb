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

//! Session outcomes and their transport mapping.

use crate::error::{FaultKind, StreamError};
use std::fmt;
use whois_core::Message;

/// Lifecycle of one session.
///
/// `Idle -> Streaming -> {ClosedFound | ClosedNotFound | Aborted | Faulted}`.
///
/// A session is `Streaming` only inside `ResultSession::run`; the terminal
/// state it reached is reported in `SessionReport::state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Streaming,
    ClosedFound,
    ClosedNotFound,
    Aborted,
    Faulted,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionState::Idle | SessionState::Streaming)
    }
}

/// How a session ended, as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// At least one object was streamed. `errors` were written to the trailer.
    Found { errors: Vec<Message> },
    /// No object was found; nothing was written to the writer.
    NotFound { errors: Vec<Message> },
    /// The source or the mapper failed.
    Faulted {
        cause: StreamError,
        errors: Vec<Message>,
    },
    /// The consumer went away mid-stream. Not an error.
    Aborted,
}

impl SessionOutcome {
    /// Operational messages accumulated during the session.
    pub fn errors(&self) -> &[Message] {
        match self {
            SessionOutcome::Found { errors }
            | SessionOutcome::NotFound { errors }
            | SessionOutcome::Faulted { errors, .. } => errors,
            SessionOutcome::Aborted => &[],
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SessionOutcome::Found { .. })
    }

    /// The terminal state this outcome corresponds to.
    pub fn state(&self) -> SessionState {
        match self {
            SessionOutcome::Found { .. } => SessionState::ClosedFound,
            SessionOutcome::NotFound { .. } => SessionState::ClosedNotFound,
            SessionOutcome::Faulted { .. } => SessionState::Faulted,
            SessionOutcome::Aborted => SessionState::Aborted,
        }
    }

    /// Transport status for this outcome.
    pub fn status(&self) -> ResponseStatus {
        match self {
            SessionOutcome::Found { .. } => ResponseStatus::Ok,
            SessionOutcome::NotFound { .. } => ResponseStatus::NotFound,
            SessionOutcome::Faulted { cause, .. } => match cause.fault_kind() {
                Some(FaultKind::InvalidQuery) => ResponseStatus::BadRequest,
                Some(FaultKind::Blocked) => ResponseStatus::TooManyRequests,
                Some(FaultKind::Internal) | None => ResponseStatus::InternalServerError,
            },
            SessionOutcome::Aborted => ResponseStatus::Disconnected,
        }
    }

    /// Messages for a separate error response body.
    ///
    /// For a fault the cause is appended as a final error message.
    pub fn response_messages(&self) -> Vec<Message> {
        let mut messages = self.errors().to_vec();
        if let SessionOutcome::Faulted { cause, .. } = self {
            messages.push(Message::error(cause.to_string()));
        }
        messages
    }
}

/// Transport-level status of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Ok,
    NotFound,
    BadRequest,
    TooManyRequests,
    InternalServerError,
    /// No response can be sent: the consumer is gone.
    Disconnected,
}

impl ResponseStatus {
    /// HTTP status code, if a response can still be sent.
    pub fn code(&self) -> Option<u16> {
        match self {
            ResponseStatus::Ok => Some(200),
            ResponseStatus::NotFound => Some(404),
            ResponseStatus::BadRequest => Some(400),
            ResponseStatus::TooManyRequests => Some(429),
            ResponseStatus::InternalServerError => Some(500),
            ResponseStatus::Disconnected => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseStatus::Ok)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{} {:?}", code, self),
            None => write!(f, "{:?}", self),
        }
    }
}
