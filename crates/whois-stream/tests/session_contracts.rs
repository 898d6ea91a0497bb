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

//! End-to-end session contracts against a recording writer.

use whois_core::{Message, Parameters, Service};
use whois_stream::envelope::{ERRORS_FIELD, TERMS_AND_CONDITIONS, TERMS_FIELD};
use whois_stream::{
    FaultKind, ResponseStatus, ResultSession, SessionConfig, SessionOutcome, SessionReport,
    SessionState, StreamError, StructuredWriter,
};
use whois_test::{
    fixtures, mappers, FailPoint, FailingMapper, Failure, RecordingWriter, ScriptedSource, Step,
    WriterCall,
};

fn run(steps: Vec<Step>, writer: RecordingWriter) -> SessionReport {
    ResultSession::new(mappers::mapper(), SessionConfig::default())
        .run(ScriptedSource::new(steps), writer)
}

// =============================================================================
// Found
// =============================================================================

#[test]
fn test_found_with_trailer() {
    let (writer, journal) = RecordingWriter::new();
    let report = run(
        vec![
            fixtures::mntner("A-MNT").into(),
            fixtures::unref("A-MNT", 28).into(),
            fixtures::mntner("B-MNT").into(),
            fixtures::warning("w").into(),
        ],
        writer,
    );

    assert_eq!(
        report.outcome,
        SessionOutcome::Found {
            errors: vec![Message::warning("w")]
        }
    );
    assert_eq!(journal.opens(), 1);
    assert_eq!(journal.closes(), 1);
    assert_eq!(journal.element_keys(), vec!["A-MNT", "B-MNT"]);

    let elements = journal.elements();
    assert_eq!(elements[0]["tags"]["tag"][0]["id"], "unref");
    assert_eq!(elements[0]["tags"]["tag"][0]["data"], "28");
    assert!(elements[1].get("tags").is_none());

    let errors = journal.field(ERRORS_FIELD).unwrap();
    assert_eq!(errors["errormessage"][0]["severity"], "Warning");
    assert_eq!(errors["errormessage"][0]["text"], "w");
    assert_eq!(
        journal.field(TERMS_FIELD).unwrap()["href"],
        TERMS_AND_CONDITIONS
    );

    // trailer after the array, close last
    let calls = journal.calls();
    let end_array = calls.iter().position(|c| *c == WriterCall::EndArray).unwrap();
    let trailer = calls
        .iter()
        .position(|c| matches!(c, WriterCall::Field { name, .. } if name == ERRORS_FIELD))
        .unwrap();
    assert!(end_array < trailer);
    assert_eq!(calls.last(), Some(&WriterCall::Close));
    assert!(journal.is_well_nested());
}

#[test]
fn test_found_without_errors_has_no_errormessages() {
    let (writer, journal) = RecordingWriter::new();
    let report = run(
        vec![fixtures::person().into(), fixtures::info("ignored").into()],
        writer,
    );

    assert_eq!(report.outcome, SessionOutcome::Found { errors: vec![] });
    assert_eq!(report.outcome.status(), ResponseStatus::Ok);
    assert!(journal.field(ERRORS_FIELD).is_none());
    assert!(journal.field(TERMS_FIELD).is_some());
    assert_eq!(journal.field_names(), vec![TERMS_FIELD]);
}

#[test]
fn test_header_fields_precede_objects() {
    let (writer, journal) = RecordingWriter::new();
    let config = SessionConfig::default()
        .with_service(Service::new("search"))
        .with_parameters(Parameters::for_query("TEST-MNT").with_sources(["TEST"]));
    let report = ResultSession::new(mappers::mapper(), config).run(
        ScriptedSource::records([fixtures::mntner("TEST-MNT")]),
        writer,
    );

    assert!(report.outcome.is_found());
    let calls = journal.calls();
    assert_eq!(calls[0], WriterCall::Open);
    assert!(matches!(&calls[1], WriterCall::Field { name, value }
        if name == "service" && value["name"] == "search"));
    assert!(matches!(&calls[2], WriterCall::Field { name, .. } if name == "parameters"));
    assert_eq!(calls[3], WriterCall::StartBlock("objects".to_string()));
    assert_eq!(calls[4], WriterCall::StartArray("object".to_string()));
}

#[test]
fn test_interleaved_messages_keep_order_in_trailer() {
    let (writer, journal) = RecordingWriter::new();
    let report = run(
        vec![
            fixtures::error("first").into(),
            fixtures::mntner("A-MNT").into(),
            fixtures::info("skip").into(),
            fixtures::warning("second").into(),
        ],
        writer,
    );

    let texts: Vec<_> = report.outcome.errors().iter().map(|m| m.text.clone()).collect();
    assert_eq!(texts, vec!["first", "second"]);

    let trailer = journal.field(ERRORS_FIELD).unwrap();
    assert_eq!(trailer["errormessage"][0]["text"], "first");
    assert_eq!(trailer["errormessage"][1]["text"], "second");
    assert_eq!(report.stats.messages, 2);
}

// =============================================================================
// Tags
// =============================================================================

#[test]
fn test_later_tag_replaces_earlier() {
    let (writer, journal) = RecordingWriter::new();
    run(
        vec![
            fixtures::mntner("A-MNT").into(),
            fixtures::unref("A-MNT", 1).into(),
            fixtures::unref("A-MNT", 2).into(),
        ],
        writer,
    );

    let elements = journal.elements();
    assert_eq!(elements[0]["tags"]["tag"].as_array().unwrap().len(), 1);
    assert_eq!(elements[0]["tags"]["tag"][0]["data"], "2");
}

#[test]
fn test_orphan_tag_is_dropped() {
    let (writer, journal) = RecordingWriter::new();
    let report = run(
        vec![
            fixtures::unref("NOBODY", 5).into(),
            fixtures::mntner("A-MNT").into(),
        ],
        writer,
    );

    assert_eq!(report.outcome, SessionOutcome::Found { errors: vec![] });
    assert_eq!(report.stats.tags, 1);
    assert_eq!(report.stats.dropped_tags, 1);
    assert!(journal.elements()[0].get("tags").is_none());
}

#[test]
fn test_only_orphan_tags_is_not_found() {
    let (writer, journal) = RecordingWriter::new();
    let report = run(vec![fixtures::unref("NOBODY", 5).into()], writer);

    assert_eq!(report.outcome, SessionOutcome::NotFound { errors: vec![] });
    assert!(journal.is_empty());
}

// =============================================================================
// Not found
// =============================================================================

#[test]
fn test_not_found_never_opens_writer() {
    let (writer, journal) = RecordingWriter::new();
    let report = run(
        vec![fixtures::warning("w1").into(), fixtures::error("e1").into()],
        writer,
    );

    assert_eq!(
        report.outcome,
        SessionOutcome::NotFound {
            errors: vec![Message::warning("w1"), Message::error("e1")]
        }
    );
    assert_eq!(report.outcome.state(), SessionState::ClosedNotFound);
    assert_eq!(report.outcome.status(), ResponseStatus::NotFound);
    assert_eq!(journal.opens(), 0);
    assert!(journal.is_empty());
}

#[test]
fn test_empty_source_is_not_found() {
    let (writer, journal) = RecordingWriter::new();
    let report = run(Vec::new(), writer);

    assert_eq!(report.outcome, SessionOutcome::NotFound { errors: vec![] });
    assert!(journal.is_empty());
}

#[test]
fn test_unknown_records_are_ignored() {
    let (writer, journal) = RecordingWriter::new();
    let report = run(
        vec![
            whois_core::ResponseObject::Other {
                name: "version".to_string(),
            }
            .into(),
            whois_core::ResponseObject::Message { message: None }.into(),
        ],
        writer,
    );

    assert_eq!(report.outcome, SessionOutcome::NotFound { errors: vec![] });
    assert_eq!(report.stats.ignored_records, 1);
    assert!(journal.is_empty());
}

// =============================================================================
// Aborts
// =============================================================================

#[test]
fn test_sink_disconnect_aborts_without_trailer() {
    let (writer, journal) = RecordingWriter::new();
    let writer = writer.fail_after_elements(1, Failure::Disconnect);
    let report = run(
        vec![
            fixtures::mntner("A-MNT").into(),
            fixtures::mntner("B-MNT").into(),
            fixtures::mntner("C-MNT").into(),
            fixtures::warning("late").into(),
        ],
        writer,
    );

    assert_eq!(report.outcome, SessionOutcome::Aborted);
    assert_eq!(report.outcome.state(), SessionState::Aborted);
    assert_eq!(report.outcome.status(), ResponseStatus::Disconnected);
    assert_eq!(report.outcome.status().code(), None);
    assert_eq!(journal.element_keys(), vec!["A-MNT"]);
    assert_eq!(journal.closes(), 0);
    assert!(journal.field(TERMS_FIELD).is_none());
    assert_eq!(journal.count(|c| *c == WriterCall::EndArray), 0);
}

#[test]
fn test_source_abort_stops_writing() {
    let (writer, journal) = RecordingWriter::new();
    let source = ScriptedSource::new(vec![
        fixtures::mntner("A-MNT").into(),
        Step::Abort,
        fixtures::mntner("B-MNT").into(),
    ]);
    let report = ResultSession::new(mappers::mapper(), SessionConfig::default()).run(source, writer);

    assert_eq!(report.outcome, SessionOutcome::Aborted);
    assert!(!matches!(report.outcome, SessionOutcome::Faulted { .. }));
    assert_eq!(journal.opens(), 1);
    assert!(journal.elements().is_empty());
    assert_eq!(journal.closes(), 0);
}

// =============================================================================
// Faults
// =============================================================================

#[test]
fn test_source_fault_after_open_closes_envelope() {
    let (writer, journal) = RecordingWriter::new();
    let report = run(
        vec![
            fixtures::mntner("A-MNT").into(),
            fixtures::warning("w").into(),
            Step::Fault(StreamError::internal("engine exploded")),
            fixtures::mntner("B-MNT").into(),
        ],
        writer,
    );

    match &report.outcome {
        SessionOutcome::Faulted { cause, errors } => {
            assert_eq!(cause.fault_kind(), Some(FaultKind::Internal));
            assert_eq!(errors, &vec![Message::warning("w")]);
        }
        other => panic!("expected fault, got {:?}", other),
    }
    assert_eq!(report.outcome.status(), ResponseStatus::InternalServerError);

    // the pending object is flushed and the trailer written
    assert_eq!(journal.element_keys(), vec!["A-MNT"]);
    assert!(journal.field(ERRORS_FIELD).is_some());
    assert_eq!(journal.closes(), 1);
    assert!(journal.is_well_nested());
}

#[test]
fn test_source_fault_before_any_object_writes_nothing() {
    let (writer, journal) = RecordingWriter::new();
    let report = run(
        vec![
            fixtures::error("denied").into(),
            Step::Fault(StreamError::source(FaultKind::Blocked, "too many queries")),
        ],
        writer,
    );

    assert_eq!(report.outcome.status(), ResponseStatus::TooManyRequests);
    assert_eq!(report.outcome.errors(), &[Message::error("denied")]);
    assert!(journal.is_empty());
    assert!(!report.opened);

    let messages = report.outcome.response_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].severity, whois_core::Severity::Error);
}

#[test]
fn test_mapping_fault_discards_failing_and_next_object() {
    let (writer, journal) = RecordingWriter::new();
    let source = ScriptedSource::records([
        fixtures::mntner("A-MNT"),
        fixtures::mntner("BAD-MNT"),
        fixtures::mntner("C-MNT"),
        fixtures::mntner("D-MNT"),
    ]);
    let report = ResultSession::new(FailingMapper::new("BAD-MNT"), SessionConfig::default())
        .run(source, writer);

    assert!(matches!(
        report.outcome,
        SessionOutcome::Faulted {
            cause: StreamError::Mapping(_),
            ..
        }
    ));
    assert_eq!(report.outcome.status(), ResponseStatus::InternalServerError);
    assert_eq!(journal.element_keys(), vec!["A-MNT"]);
    assert_eq!(journal.closes(), 1);
    assert_eq!(report.stats.written, 1);
}

#[test]
fn test_mapping_fault_on_last_object_still_closes() {
    let (writer, journal) = RecordingWriter::new();
    let report = run(
        vec![
            fixtures::mntner("A-MNT").into(),
            fixtures::unmappable("LOST-MNT").into(),
        ],
        writer,
    );

    assert!(matches!(report.outcome, SessionOutcome::Faulted { .. }));
    assert_eq!(journal.element_keys(), vec!["A-MNT"]);
    assert_eq!(journal.count(|c| *c == WriterCall::EndArray), 1);
    assert_eq!(journal.closes(), 1);
    assert!(journal.is_well_nested());
}

#[test]
fn test_encode_failure_is_a_fault() {
    let (writer, journal) = RecordingWriter::new();
    let writer = writer.fail_after_elements(0, Failure::Encode);
    let report = run(vec![fixtures::mntner("A-MNT").into()], writer);

    assert!(matches!(
        report.outcome,
        SessionOutcome::Faulted {
            cause: StreamError::Encode(_),
            ..
        }
    ));
    assert!(journal.is_empty());
}

fn field_writes(journal: &whois_test::Journal, field: &str) -> usize {
    journal.count(|c| matches!(c, WriterCall::Field { name, .. } if name == field))
}

#[test]
fn test_failed_terms_link_is_not_rewritten() {
    let (writer, journal) = RecordingWriter::new();
    let writer = writer.fail_at(FailPoint::Field(TERMS_FIELD), Failure::Encode);
    let report = run(
        vec![fixtures::mntner("A-MNT").into(), fixtures::warning("w").into()],
        writer,
    );

    match &report.outcome {
        SessionOutcome::Faulted { cause, errors } => {
            assert!(matches!(cause, StreamError::Encode(_)));
            assert_eq!(errors, &vec![Message::warning("w")]);
        }
        other => panic!("expected fault, got {:?}", other),
    }
    assert_eq!(report.state, SessionState::Faulted);
    assert_eq!(journal.field_names(), vec![ERRORS_FIELD]);
    assert_eq!(journal.count(|c| *c == WriterCall::EndArray), 1);
    assert_eq!(journal.closes(), 1);
    assert!(journal.is_well_nested());
}

#[test]
fn test_failed_close_is_attempted_once() {
    let (writer, journal) = RecordingWriter::new();
    let writer = writer.fail_at(FailPoint::Close, Failure::Encode);
    let report = run(
        vec![fixtures::mntner("A-MNT").into(), fixtures::warning("w").into()],
        writer,
    );

    assert!(matches!(report.outcome, SessionOutcome::Faulted { .. }));
    assert_eq!(field_writes(&journal, ERRORS_FIELD), 1);
    assert_eq!(field_writes(&journal, TERMS_FIELD), 1);
    assert_eq!(journal.closes(), 0);
}

#[test]
fn test_partly_opened_envelope_is_closed() {
    let (writer, journal) = RecordingWriter::new();
    let writer = writer.fail_at(FailPoint::StartArray, Failure::Encode);
    let report = run(vec![fixtures::mntner("A-MNT").into()], writer);

    assert!(matches!(
        report.outcome,
        SessionOutcome::Faulted {
            cause: StreamError::Encode(_),
            ..
        }
    ));
    assert!(report.opened);

    let calls: Vec<WriterCall> = journal
        .calls()
        .into_iter()
        .map(|call| match call {
            WriterCall::Field { name, .. } => WriterCall::Field {
                name,
                value: serde_json::Value::Null,
            },
            other => other,
        })
        .collect();
    assert_eq!(
        calls,
        vec![
            WriterCall::Open,
            WriterCall::StartBlock("objects".to_string()),
            WriterCall::EndBlock("objects".to_string()),
            WriterCall::Field {
                name: TERMS_FIELD.to_string(),
                value: serde_json::Value::Null,
            },
            WriterCall::Close,
        ]
    );
    assert!(journal.is_well_nested());
}

#[test]
fn test_invalid_query_maps_to_bad_request() {
    let (writer, _journal) = RecordingWriter::new();
    let report = run(
        vec![Step::Fault(StreamError::invalid_query("bad flag"))],
        writer,
    );
    assert_eq!(report.outcome.status(), ResponseStatus::BadRequest);
    assert_eq!(report.outcome.status().code(), Some(400));
}

// =============================================================================
// Error documents
// =============================================================================

#[test]
fn test_error_document_for_not_found() {
    let (writer, _journal) = RecordingWriter::new();
    let report = run(vec![fixtures::warning("nothing").into()], writer);

    let (doc, journal) = RecordingWriter::new();
    whois_stream::write_error_document(doc, &report.outcome.response_messages(), TERMS_AND_CONDITIONS)
        .unwrap();

    assert_eq!(journal.opens(), 1);
    assert_eq!(journal.closes(), 1);
    assert_eq!(journal.field_names(), vec![ERRORS_FIELD, TERMS_FIELD]);
    let errors = journal.field(ERRORS_FIELD).unwrap();
    assert_eq!(errors["errormessage"][0]["text"], "nothing");
}

#[test]
fn test_writer_dropped_on_every_path() {
    // a writer that flags its own drop
    struct Tracked(std::rc::Rc<std::cell::Cell<bool>>, RecordingWriter);
    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }
    impl StructuredWriter for Tracked {
        fn open(&mut self) -> whois_stream::WriteResult {
            self.1.open()
        }
        fn close(&mut self) -> whois_stream::WriteResult {
            self.1.close()
        }
        fn write_field<T: serde::Serialize + ?Sized>(
            &mut self,
            name: &str,
            value: &T,
        ) -> whois_stream::WriteResult {
            self.1.write_field(name, value)
        }
        fn start_block(&mut self, name: &str) -> whois_stream::WriteResult {
            self.1.start_block(name)
        }
        fn end_block(&mut self, name: &str) -> whois_stream::WriteResult {
            self.1.end_block(name)
        }
        fn start_array(&mut self, name: &str) -> whois_stream::WriteResult {
            self.1.start_array(name)
        }
        fn write_element<T: serde::Serialize + ?Sized>(
            &mut self,
            value: &T,
        ) -> whois_stream::WriteResult {
            self.1.write_element(value)
        }
        fn end_array(&mut self) -> whois_stream::WriteResult {
            self.1.end_array()
        }
    }

    let scripts: Vec<Vec<Step>> = vec![
        vec![],
        vec![fixtures::mntner("A-MNT").into()],
        vec![fixtures::mntner("A-MNT").into(), Step::Abort],
        vec![Step::Fault(StreamError::internal("boom"))],
    ];
    for steps in scripts {
        let dropped = std::rc::Rc::new(std::cell::Cell::new(false));
        let (inner, _journal) = RecordingWriter::new();
        run_tracked(steps, Tracked(dropped.clone(), inner));
        assert!(dropped.get());
    }

    fn run_tracked(steps: Vec<Step>, writer: impl StructuredWriter) {
        ResultSession::new(mappers::mapper(), SessionConfig::default())
            .run(ScriptedSource::new(steps), writer);
    }
}
