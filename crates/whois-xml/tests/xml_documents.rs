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

//! XML documents produced by whole sessions.

use quick_xml::events::Event;
use quick_xml::Reader;
use whois_core::{Parameters, Service};
use whois_stream::envelope::TERMS_AND_CONDITIONS;
use whois_stream::{write_error_document, ResultSession, SessionConfig, SessionOutcome, StreamError};
use whois_test::{fixtures, mappers, ScriptedSource, Step};
use whois_xml::{XmlStreamWriter, XmlWriterConfig};

fn render(steps: Vec<Step>, config: SessionConfig) -> (SessionOutcome, String) {
    let mut out = Vec::new();
    let report = ResultSession::new(mappers::mapper(), config)
        .run(ScriptedSource::new(steps), XmlStreamWriter::new(&mut out));
    (report.outcome, String::from_utf8(out).unwrap())
}

/// Names of all elements in document order, checking well-formedness.
fn element_names(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut names = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) => {
                names.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap())
            }
            Event::Eof => break,
            _ => {}
        }
    }
    names
}

#[test]
fn test_found_document() {
    let config = SessionConfig::default()
        .with_service(Service::new("search"))
        .with_parameters(Parameters::for_query("A-MNT"));
    let (outcome, xml) = render(
        vec![
            fixtures::mntner("A-MNT").into(),
            fixtures::unref("A-MNT", 28).into(),
            fixtures::person().into(),
            fixtures::warning("filtered").into(),
        ],
        config,
    );
    assert!(outcome.is_found());

    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains(r#"<service name="search"/>"#));
    assert!(xml.contains(r#"<object type="mntner">"#));
    assert!(xml.contains(r#"<tag id="unref" data="28"/>"#));
    assert!(xml.contains(r#"<errormessage severity="Warning" text="filtered"/>"#));
    assert!(xml.contains(&format!(
        r#"<terms-and-conditions xlink:type="locator" xlink:href="{}"/>"#,
        TERMS_AND_CONDITIONS
    )));
    assert!(xml.ends_with("</whois-resources>"));

    let names = element_names(&xml);
    assert_eq!(names.iter().filter(|n| *n == "object").count(), 2);
    let objects = names.iter().position(|n| n == "objects").unwrap();
    let trailer = names.iter().position(|n| n == "errormessages").unwrap();
    assert!(objects < trailer);
}

#[test]
fn test_fault_still_closes_root() {
    let (outcome, xml) = render(
        vec![
            fixtures::inetnum().into(),
            Step::Fault(StreamError::internal("lost connection")),
        ],
        SessionConfig::default(),
    );
    assert!(matches!(outcome, SessionOutcome::Faulted { .. }));
    assert!(xml.ends_with("</whois-resources>"));
    assert!(element_names(&xml).contains(&"object".to_string()));
}

#[test]
fn test_abort_leaves_document_open() {
    let (outcome, xml) = render(
        vec![fixtures::inetnum().into(), fixtures::person().into(), Step::Abort],
        SessionConfig::default(),
    );
    assert_eq!(outcome, SessionOutcome::Aborted);
    assert!(!xml.contains("</whois-resources>"));
}

#[test]
fn test_error_document() {
    let mut out = Vec::new();
    let config = XmlWriterConfig {
        pretty: true,
        ..XmlWriterConfig::default()
    };
    let messages = vec![whois_core::Message::error("ERROR:101: no entries found")];
    write_error_document(
        XmlStreamWriter::with_config(&mut out, config),
        &messages,
        TERMS_AND_CONDITIONS,
    )
    .unwrap();

    let xml = String::from_utf8(out).unwrap();
    assert_eq!(
        element_names(&xml),
        vec!["whois-resources", "errormessages", "errormessage", "terms-and-conditions"]
    );
    assert!(xml.contains("ERROR:101: no entries found"));
}
