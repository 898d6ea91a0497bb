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

//! Output format selection and `Accept` header negotiation.

use crate::error::CliError;
use clap::ValueEnum;
use std::fmt;

/// Document encodings the CLI can produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
}

impl OutputFormat {
    /// Canonical media type of the format.
    pub fn media_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Xml => "application/xml",
        }
    }

    fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "application/json" | "text/json" => Some(OutputFormat::Json),
            "application/xml" | "text/xml" => Some(OutputFormat::Xml),
            "*/*" | "application/*" => Some(OutputFormat::default()),
            _ => None,
        }
    }

    /// Pick a format from an `Accept` header value.
    ///
    /// Media ranges are tried by descending quality; among equal qualities
    /// the first listed wins. Ranges with `q=0` are never chosen.
    ///
    /// ```rust
    /// use whois_cli::format::OutputFormat;
    ///
    /// let format = OutputFormat::negotiate("text/html, application/xml;q=0.9, */*;q=0.1").unwrap();
    /// assert_eq!(format, OutputFormat::Xml);
    /// ```
    pub fn negotiate(accept: &str) -> Result<Self, CliError> {
        let mut ranges: Vec<(&str, f32)> = accept
            .split(',')
            .filter_map(|range| {
                let mut parts = range.split(';').map(str::trim);
                let media_type = parts.next().filter(|m| !m.is_empty())?;
                let quality = parts
                    .filter_map(|p| p.strip_prefix("q="))
                    .find_map(|q| q.parse::<f32>().ok())
                    .unwrap_or(1.0);
                Some((media_type, quality))
            })
            .filter(|(_, quality)| *quality > 0.0)
            .collect();
        // stable sort keeps header order among equal qualities
        ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranges
            .iter()
            .find_map(|(media_type, _)| Self::from_media_type(&media_type.to_ascii_lowercase()))
            .ok_or_else(|| CliError::not_acceptable(accept))
    }

    /// Explicit format first, then the `Accept` value, then the default.
    pub fn resolve(format: Option<Self>, accept: Option<&str>) -> Result<Self, CliError> {
        match (format, accept) {
            (Some(format), _) => Ok(format),
            (None, Some(accept)) => Self::negotiate(accept),
            (None, None) => Ok(Self::default()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_type())
    }
}
