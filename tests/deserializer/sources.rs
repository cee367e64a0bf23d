//! File and in-memory sources.

#![allow(clippy::unwrap_used)]

use std::io::Write;

use uml_interpreter::{
    Deserializer, EaXmlDeserializer, ErrorKind, FileSource, InvalidXmlError, StringSource,
    XmlSource, read_model,
};

use crate::helpers::xmi_fixtures::minimal_association;

#[test]
fn file_source_records_filename() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(minimal_association().as_bytes()).unwrap();

    let model = read_model(FileSource::new(file.path())).unwrap();

    assert_eq!(model.filename(), Some(file.path()));
    assert_eq!(model.arena().element_count(), 2);
}

#[test]
fn string_source_has_no_filename() {
    let model = EaXmlDeserializer::from_string(minimal_association())
        .read_model()
        .unwrap();
    assert_eq!(model.filename(), None);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.xml");

    let err = EaXmlDeserializer::from_path(&path).read_model().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(matches!(err, InvalidXmlError::Io { path: ref p, .. } if *p == path));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"<xmi:XMI xmlns:xmi=\"x\"><open>").unwrap();

    let err = read_model(FileSource::new(file.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn each_read_is_independent() {
    let mut deserializer = EaXmlDeserializer::from_string(minimal_association());
    let first = deserializer.read_model().unwrap();
    let second = deserializer.read_model().unwrap();
    assert_eq!(first.arena().element_count(), second.arena().element_count());

    deserializer.set_source(StringSource::new("<broken>"));
    assert_eq!(deserializer.read_model().unwrap_err().kind(), ErrorKind::Parse);
    assert!(deserializer.source().path().is_none());
}
