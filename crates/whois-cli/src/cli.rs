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

//! CLI command definitions and argument parsing.

use crate::commands::{self, StreamOptions, DEFAULT_BASE_URL};
use crate::error::CliError;
use crate::format::OutputFormat;
use clap::Subcommand;
use std::path::PathBuf;
use std::process::ExitCode;

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use whois_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Stream a record file into a JSON or XML result document
    ///
    /// Reads line-delimited engine records and writes the response document
    /// incrementally. Exits with 2 when nothing was found and 1 when the
    /// query failed.
    Stream {
        /// Line-delimited JSON record file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format; overrides --accept
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Accept header to negotiate the output format from
        #[arg(long, value_name = "MEDIA_TYPES")]
        accept: Option<String>,

        /// Pretty-print the document
        #[arg(short, long)]
        pretty: bool,

        /// Keep attribute values verbatim, comments included
        #[arg(long)]
        unformatted: bool,

        /// Base URL of object links
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Service name written to the document header
        #[arg(long)]
        service: Option<String>,

        /// Query string echoed in the document header
        #[arg(short, long)]
        query: Option<String>,

        /// Source searched by the query (repeatable)
        #[arg(short, long = "source")]
        sources: Vec<String>,

        /// Maximum record line length in bytes
        #[arg(long, value_name = "BYTES")]
        max_line_bytes: Option<usize>,
    },

    /// Count the records of a record file by kind
    Inspect {
        /// Line-delimited JSON record file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Commands {
    /// Execute the command and map its result to an exit status.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an input or output file cannot be used, the format
    /// cannot be negotiated, or the record file is unreadable.
    pub fn execute(self) -> Result<ExitCode, CliError> {
        match self {
            Commands::Stream {
                file,
                output,
                format,
                accept,
                pretty,
                unformatted,
                base_url,
                service,
                query,
                sources,
                max_line_bytes,
            } => {
                let mut options = StreamOptions::new(file);
                options.output = output;
                options.format = OutputFormat::resolve(format, accept.as_deref())?;
                options.pretty = pretty;
                options.unformatted = unformatted;
                options.base_url = base_url;
                options.service = service;
                options.query = query;
                options.sources = sources;
                if max_line_bytes.is_some() {
                    options.max_line_bytes = max_line_bytes;
                }
                Ok(commands::stream(&options)?.exit_code())
            }
            Commands::Inspect { file } => {
                commands::inspect(&file)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
