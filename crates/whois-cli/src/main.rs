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

//! whois-stream command line interface

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use whois_cli::cli::Commands;

/// Stream whois query results into JSON or XML documents
///
/// # Examples
///
/// ```bash
/// # Stream records to JSON on stdout
/// whois-stream stream records.jsonl
///
/// # Negotiate the format like an HTTP client would
/// whois-stream stream records.jsonl --accept "application/xml" --pretty
///
/// # Count records by kind
/// whois-stream inspect records.jsonl
/// ```
#[derive(Parser)]
#[command(name = "whois-stream")]
#[command(author, version, about = "Stream whois query results into JSON or XML documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

const DEFAULT_LOG_FILTER: &str = "whois_stream=info,whois_json=info,whois_cli=info";

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
