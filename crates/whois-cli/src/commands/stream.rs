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

//! Stream a record file into a result document.

use crate::error::CliError;
use crate::format::OutputFormat;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use whois_core::{AttributeMapping, Message, Parameters, Service, WhoisObjectMapper};
use whois_json::{JsonStreamWriter, JsonWriterConfig, RecordLinesSource, RecordReaderConfig};
use whois_stream::envelope::TERMS_AND_CONDITIONS;
use whois_stream::{
    write_error_document, ResultSession, SessionConfig, SessionOutcome, SessionReport, WriteResult,
};
use whois_xml::{XmlStreamWriter, XmlWriterConfig};

/// Default base URL for object links.
pub const DEFAULT_BASE_URL: &str = "https://rest.db.ripe.net";

/// Everything the `stream` command needs.
#[derive(Debug, Clone)]
pub struct StreamOptions {
    pub file: PathBuf,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub pretty: bool,
    pub unformatted: bool,
    pub base_url: String,
    pub service: Option<String>,
    pub query: Option<String>,
    pub sources: Vec<String>,
    pub max_line_bytes: Option<usize>,
}

impl StreamOptions {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            output: None,
            format: OutputFormat::default(),
            pretty: false,
            unformatted: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            service: None,
            query: None,
            sources: Vec::new(),
            max_line_bytes: RecordReaderConfig::default().max_line_bytes,
        }
    }

    fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::default();
        if let Some(service) = &self.service {
            config = config.with_service(Service::new(service.as_str()));
        }
        if let Some(query) = &self.query {
            config = config.with_parameters(
                Parameters::for_query(query.as_str()).with_sources(self.sources.iter().cloned()),
            );
        }
        config
    }
}

/// How a `stream` run ended, as seen by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    /// Objects were written.
    Found,
    /// No object matched; an error document was written.
    NotFound,
    /// The run failed; whatever was written is a complete document.
    Faulted,
    /// The consumer closed the output early.
    Disconnected,
}

impl StreamStatus {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            StreamStatus::Found | StreamStatus::Disconnected => ExitCode::SUCCESS,
            StreamStatus::NotFound => ExitCode::from(2),
            StreamStatus::Faulted => ExitCode::FAILURE,
        }
    }
}

impl From<&SessionOutcome> for StreamStatus {
    fn from(outcome: &SessionOutcome) -> Self {
        match outcome {
            SessionOutcome::Found { .. } => StreamStatus::Found,
            SessionOutcome::NotFound { .. } => StreamStatus::NotFound,
            SessionOutcome::Faulted { .. } => StreamStatus::Faulted,
            SessionOutcome::Aborted => StreamStatus::Disconnected,
        }
    }
}

/// Run one session from `options.file` to the output.
///
/// When the session wrote nothing (not found, or a fault before the first
/// object), a separate error document carrying the messages is written
/// instead.
pub fn stream(options: &StreamOptions) -> Result<StreamStatus, CliError> {
    let input = File::open(&options.file).map_err(|e| CliError::io_error(&options.file, e))?;
    let reader_config = RecordReaderConfig {
        max_line_bytes: options.max_line_bytes,
        ..RecordReaderConfig::default()
    };
    let source = RecordLinesSource::new(input, reader_config);

    let mut sink: Box<dyn Write> = match &options.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| CliError::io_error(path, e))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mapper = WhoisObjectMapper::new(options.base_url.as_str())
        .with_attribute_mapping(AttributeMapping::from_unformatted(options.unformatted));
    let session = ResultSession::new(mapper, options.session_config());

    tracing::debug!(file = %options.file.display(), format = %options.format, "streaming records");
    let report = match options.format {
        OutputFormat::Json => session.run(source, json_writer(&mut sink, options.pretty)),
        OutputFormat::Xml => session.run(source, xml_writer(&mut sink, options.pretty)),
    };
    log_report(&report);

    let status = StreamStatus::from(&report.outcome);
    let nothing_written = !report.opened;
    if matches!(status, StreamStatus::NotFound | StreamStatus::Faulted) && nothing_written {
        let messages = report.outcome.response_messages();
        let written = match options.format {
            OutputFormat::Json => error_document(json_writer(&mut sink, options.pretty), &messages),
            OutputFormat::Xml => error_document(xml_writer(&mut sink, options.pretty), &messages),
        };
        written?;
    }

    if status != StreamStatus::Disconnected {
        sink.flush().map_err(|e| CliError::Output(e.to_string()))?;
    }
    Ok(status)
}

fn json_writer<W: Write>(sink: W, pretty: bool) -> JsonStreamWriter<W> {
    let config = if pretty {
        JsonWriterConfig::pretty()
    } else {
        JsonWriterConfig::default()
    };
    JsonStreamWriter::with_config(sink, config)
}

fn xml_writer<W: Write>(sink: W, pretty: bool) -> XmlStreamWriter<W> {
    XmlStreamWriter::with_config(
        sink,
        XmlWriterConfig {
            pretty,
            ..XmlWriterConfig::default()
        },
    )
}

fn error_document<W: whois_stream::StructuredWriter>(writer: W, messages: &[Message]) -> WriteResult {
    write_error_document(writer, messages, TERMS_AND_CONDITIONS)
}

fn log_report(report: &SessionReport) {
    let stats = &report.stats;
    match &report.outcome {
        SessionOutcome::Faulted { cause, .. } => {
            tracing::error!(context_id = %report.context_id, error = %cause, "query failed")
        }
        outcome => tracing::info!(
            context_id = %report.context_id,
            status = %outcome.status(),
            objects = stats.objects,
            tags = stats.tags,
            dropped_tags = stats.dropped_tags,
            messages = stats.messages,
            ignored = stats.ignored_records,
            "query streamed"
        ),
    }
}
