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

//! Command-line driver for whois result streaming.
//!
//! # Commands
//!
//! - **stream**: read line-delimited engine records and write the response
//!   document (JSON or XML) incrementally
//! - **inspect**: count the records of a record file by kind
//!
//! # Exit status
//!
//! | Outcome | Exit code |
//! |---------|-----------|
//! | objects found | 0 |
//! | output closed by the consumer | 0 |
//! | query failed | 1 |
//! | nothing found | 2 |
//!
//! # Examples
//!
//! ```no_run
//! use whois_cli::commands::{stream, StreamOptions, StreamStatus};
//! use whois_cli::format::OutputFormat;
//!
//! # fn main() -> Result<(), whois_cli::error::CliError> {
//! let mut options = StreamOptions::new("records.jsonl");
//! options.format = OutputFormat::negotiate("application/xml")?;
//! options.output = Some("result.xml".into());
//! assert_eq!(stream(&options)?, StreamStatus::Found);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod format;
