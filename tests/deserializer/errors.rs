//! Fatal structural problems and their classification.

#![allow(clippy::unwrap_used)]

use rstest::rstest;
use uml_interpreter::{ErrorKind, InvalidXmlError, MissingNode, StringSource, read_model};

use crate::helpers::xmi_fixtures::{UML_NS, XMI_NS, class, diagrams, xmi_document};

fn without_extension(model: &str) -> String {
    format!(
        r#"<xmi:XMI xmlns:uml="{UML_NS}" xmlns:xmi="{XMI_NS}"><uml:Model>{model}</uml:Model></xmi:XMI>"#
    )
}

#[rstest]
#[case::empty_document("", MissingNode::Root)]
#[case::declaration_only(r#"<?xml version="1.0" encoding="UTF-8"?>"#, MissingNode::Root)]
#[case::no_model(
    &format!(r#"<xmi:XMI xmlns:xmi="{XMI_NS}"><xmi:Extension><diagrams/></xmi:Extension></xmi:XMI>"#),
    MissingNode::Model
)]
#[case::model_in_wrong_namespace(
    &format!(r#"<xmi:XMI xmlns:xmi="{XMI_NS}"><xmi:Model/><xmi:Extension><diagrams/></xmi:Extension></xmi:XMI>"#),
    MissingNode::Model
)]
#[case::no_extension(&without_extension(""), MissingNode::Extension)]
#[case::no_diagrams(&xmi_document("", ""), MissingNode::Diagrams)]
#[case::diagram_without_properties(
    &xmi_document("", "<diagrams><diagram><elements/></diagram></diagrams>"),
    MissingNode::DiagramProperties
)]
#[case::attribute_without_type(
    &xmi_document(
        r#"<packagedElement xmi:type="uml:Class" xmi:id="1"><ownedAttribute name="a"/></packagedElement>"#,
        "<diagrams/>"
    ),
    MissingNode::AttributeType
)]
#[case::parameter_without_type(
    &xmi_document(
        r#"<packagedElement xmi:type="uml:Class" xmi:id="1">
             <ownedOperation name="op"><ownedParameter name="p"/></ownedOperation>
           </packagedElement>"#,
        "<diagrams/>"
    ),
    MissingNode::ParameterType
)]
fn missing_mandatory_node(#[case] doc: &str, #[case] expected: MissingNode) {
    let err = read_model(StringSource::new(doc)).unwrap_err();

    assert!(matches!(err, InvalidXmlError::MissingNode(node) if node == expected), "{err}");
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert!(err.to_string().starts_with("Parser Error:"));
}

#[test]
fn missing_model_message() {
    let err = read_model(StringSource::new(without_extension("").replace("uml:Model", "uml:Other")))
        .unwrap_err();
    assert_eq!(err.to_string(), "Parser Error: No Model node found in the XML file.");
}

#[test]
fn packaged_element_without_id() {
    let doc = xmi_document(
        r#"<packagedElement xmi:type="uml:Class" name="Anonymous"/>"#,
        &diagrams(&[]),
    );
    let err = read_model(StringSource::new(doc)).unwrap_err();

    assert!(matches!(err, InvalidXmlError::ModelIdMissing));
    assert_eq!(err.kind(), ErrorKind::Structural);
}

#[test]
fn ignored_type_needs_no_id() {
    let doc = xmi_document(
        r#"<packagedElement xmi:type="uml:Package" name="Loose"/>"#,
        &diagrams(&[]),
    );
    assert!(read_model(StringSource::new(doc)).is_ok());
}

#[rstest]
#[case::unclosed_root(&format!(r#"<xmi:XMI xmlns:xmi="{XMI_NS}"><uml:Model xmlns:uml="{UML_NS}">"#))]
#[case::mismatched_close(&format!(r#"<xmi:XMI xmlns:xmi="{XMI_NS}"><a></b></xmi:XMI>"#))]
#[case::two_roots("<a/><b/>")]
fn malformed_markup_is_a_parse_error(#[case] doc: &str) {
    let err = read_model(StringSource::new(doc)).unwrap_err();
    assert!(matches!(err, InvalidXmlError::Parse(_)), "{err:?}");
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn duplicate_id_is_a_conflict() {
    let doc = xmi_document(
        &format!("{}\n{}", class("1", "A"), class("1", "B")),
        &diagrams(&[]),
    );
    let err = read_model(StringSource::new(doc)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(err.to_string().contains("already bound"));
}
