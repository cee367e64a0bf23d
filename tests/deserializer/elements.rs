//! Classes, interfaces, attributes and methods.

#![allow(clippy::unwrap_used)]

use uml_interpreter::{
    Deserializer, EaConfig, EaXmlDeserializer, ElementKind, Identifiable, InvalidXmlError,
    MissingNode, read_model, StringSource,
};

use crate::helpers::model_lookup::{bound_id, element, relationship};
use crate::helpers::xmi_fixtures::{
    UML_NS, XMI_NS, car_and_wheel, class, diagrams, minimal_association, xmi_document,
};

#[test]
fn builds_classes_and_interfaces() {
    let model = read_model(StringSource::new(car_and_wheel())).unwrap();

    let car = element(&model, "EAID_CAR");
    assert_eq!(car.kind, ElementKind::Class);
    assert_eq!(car.name, "Car");

    let wheel = element(&model, "EAID_WHEEL");
    assert_eq!(wheel.kind, ElementKind::Interface);
    assert_eq!(wheel.name, "Wheel");
}

#[test]
fn packages_are_skipped_but_their_contents_are_read() {
    let model = read_model(StringSource::new(car_and_wheel())).unwrap();

    assert!(model.find_element("EAPK_1").is_none());
    assert_eq!(model.arena().element_count(), 2);
    assert_eq!(model.arena().relationship_count(), 1);
}

#[test]
fn unrecognized_types_contribute_nothing() {
    let model = read_model(StringSource::new(car_and_wheel())).unwrap();
    assert!(model.find_element("EAID_NOTE").is_none());
}

#[test]
fn attributes_carry_mapped_type_and_initial_value() {
    let model = read_model(StringSource::new(car_and_wheel())).unwrap();
    let car = element(&model, "EAID_CAR");

    assert_eq!(car.attributes.len(), 1);
    let speed = &car.attributes[0];
    assert_eq!(speed.name, "speed");
    assert_eq!(speed.type_name, "integer");
    assert_eq!(speed.init_value.as_deref(), Some("0"));
    assert_eq!(speed.id().as_str(), "EAID_ATTR_SPEED");
}

#[test]
fn return_parameter_sets_return_type() {
    let model = read_model(StringSource::new(car_and_wheel())).unwrap();
    let car = element(&model, "EAID_CAR");

    assert_eq!(car.methods.len(), 1);
    let drive = &car.methods[0];
    assert_eq!(drive.name, "drive");
    assert_eq!(drive.return_type, "void");
    assert_eq!(drive.id().as_str(), "EAID_OP_DRIVE");

    let names: Vec<&str> = drive.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["km"]);
    assert_eq!(drive.parameters[0].type_name, "integer");
}

const OPERATIONS: &str = r#"
<packagedElement xmi:type="uml:Class" xmi:id="EAID_1" name="Engine">
  <ownedOperation xmi:id="EAID_OP1" name="start"/>
  <ownedOperation xmi:id="EAID_OP2">
    <ownedParameter xmi:id="EAID_P1" name="rpm" direction="in">
      <type xmi:idref="EAJava_long"/>
      <defaultValue xmi:type="uml:LiteralString" value="800"/>
    </ownedParameter>
  </ownedOperation>
  <ownedAttribute xmi:id="EAID_A1" name="serial">
    <type xmi:idref="EAJava_String"/>
  </ownedAttribute>
</packagedElement>
"#;

#[test]
fn method_without_return_parameter_has_empty_return_type() {
    let doc = xmi_document(OPERATIONS, &diagrams(&[]));
    let model = read_model(StringSource::new(doc)).unwrap();
    let engine = element(&model, "EAID_1");

    let start = &engine.methods[0];
    assert_eq!(start.name, "start");
    assert_eq!(start.return_type, "");
    assert!(start.parameters.is_empty());
}

#[test]
fn unnamed_operation_and_unknown_types_fall_back_to_empty() {
    let doc = xmi_document(OPERATIONS, &diagrams(&[]));
    let model = read_model(StringSource::new(doc)).unwrap();
    let engine = element(&model, "EAID_1");

    let unnamed = &engine.methods[1];
    assert_eq!(unnamed.name, "");
    assert_eq!(unnamed.parameters[0].type_name, "");
    assert_eq!(unnamed.parameters[0].default_value.as_deref(), Some("800"));
    assert_eq!(engine.attributes[0].type_name, "");
    assert_eq!(engine.attributes[0].init_value, None);
}

#[test]
fn type_mapping_can_be_extended() {
    let doc = xmi_document(
        &OPERATIONS.replace("xmi:idref=\"EAJava_String\"", "href=\"EAJava_String\""),
        &diagrams(&[]),
    );
    let config = EaConfig::default().with_type_mapping("EAJava_String", "String");
    let model = EaXmlDeserializer::from_string(doc)
        .with_config(config)
        .read_model()
        .unwrap();

    assert_eq!(element(&model, "EAID_1").attributes[0].type_name, "String");
}

#[test]
fn element_without_name_gets_empty_name() {
    let doc = xmi_document(
        r#"<packagedElement xmi:type="uml:Class" xmi:id="EAID_1"/>"#,
        &diagrams(&[]),
    );
    let model = read_model(StringSource::new(doc)).unwrap();
    assert_eq!(element(&model, "EAID_1").name, "");
}

#[test]
fn extra_ignored_types_are_skipped() {
    let doc = xmi_document(
        &format!(
            "{}\n{}",
            class("EAID_1", "Kept"),
            r#"<packagedElement xmi:type="uml:Component" name="no id needed"/>"#
        ),
        &diagrams(&[]),
    );
    let config = EaConfig::default().with_ignored_type("uml:Component");
    let model = EaXmlDeserializer::from_string(doc)
        .with_config(config)
        .read_model()
        .unwrap();

    assert_eq!(model.arena().element_count(), 1);
}

#[test]
fn namespaces_come_from_config() {
    let doc = minimal_association()
        .replace(UML_NS, "urn:example:uml")
        .replace(XMI_NS, "urn:example:xmi");

    let err = read_model(StringSource::new(doc.clone())).unwrap_err();
    assert!(matches!(err, InvalidXmlError::MissingNode(MissingNode::Model)), "{err}");

    let config = EaConfig::default().with_namespaces("urn:example:uml", "urn:example:xmi");
    let model = EaXmlDeserializer::from_string(doc)
        .with_config(config)
        .read_model()
        .unwrap();

    assert_eq!(element(&model, "1").name, "A");
    let rel = relationship(&model, "3");
    assert_eq!(bound_id(&model, rel.source()).as_deref(), Some("1"));
    assert_eq!(bound_id(&model, rel.target()).as_deref(), Some("2"));
    assert_eq!(model.diagrams.len(), 1);
}

#[test]
fn deeply_nested_unknown_markup_is_read_and_released() {
    let depth = 50_000;
    let body = format!("{}\n{}{}", class("1", "A"), "<x>".repeat(depth), "</x>".repeat(depth));
    let doc = xmi_document(&body, "<diagrams/>");

    let handle = std::thread::Builder::new()
        .stack_size(512 * 1024)
        .spawn(move || read_model(StringSource::new(doc)).map(|m| m.arena().element_count()))
        .unwrap();

    assert_eq!(handle.join().unwrap().unwrap(), 1);
}
