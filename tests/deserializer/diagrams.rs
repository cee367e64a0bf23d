//! Diagram pass.

#![allow(clippy::unwrap_used)]

use uml_interpreter::{Diagram, Identifiable, Named, StringSource, read_model};

use crate::helpers::model_lookup::{class_diagram, member_ids};
use crate::helpers::xmi_fixtures::{association, car_and_wheel, class, diagrams, xmi_document};

fn three_classes() -> String {
    format!(
        "{}\n{}\n{}\n{}",
        class("1", "A"),
        class("2", "B"),
        class("3", "C"),
        association("4", "1", "2")
    )
}

#[test]
fn members_follow_model_order() {
    let doc = xmi_document(
        &three_classes(),
        &diagrams(&[("EAID_D1", "Reversed", &["3", "1"])]),
    );
    let model = read_model(StringSource::new(doc)).unwrap();

    let diagram = class_diagram(&model, "Reversed");
    assert_eq!(member_ids(&model, diagram), ["1", "3"]);
}

#[test]
fn connector_subjects_are_not_members() {
    let model = read_model(StringSource::new(car_and_wheel())).unwrap();

    let main = class_diagram(&model, "Main");
    assert_eq!(member_ids(&model, main), ["EAID_CAR", "EAID_WHEEL"]);
}

#[test]
fn several_diagrams_share_elements() {
    let doc = xmi_document(
        &three_classes(),
        &diagrams(&[
            ("EAID_D1", "First", &["1", "2"]),
            ("EAID_D2", "Second", &["2", "3"]),
            ("EAID_D3", "Unknown subjects", &["42"]),
        ]),
    );
    let model = read_model(StringSource::new(doc)).unwrap();

    let names: Vec<&str> = model.diagrams.iter().map(|d| d.name()).collect();
    assert_eq!(names, ["First", "Second", "Unknown subjects"]);
    assert_eq!(member_ids(&model, class_diagram(&model, "First")), ["1", "2"]);
    assert_eq!(member_ids(&model, class_diagram(&model, "Second")), ["2", "3"]);
    assert!(class_diagram(&model, "Unknown subjects").elements.is_empty());
}

#[test]
fn diagram_keeps_its_xmi_id() {
    let doc = xmi_document(&three_classes(), &diagrams(&[("EAID_D9", "Main", &["1"])]));
    let model = read_model(StringSource::new(doc)).unwrap();
    assert_eq!(model.diagrams[0].id().as_str(), "EAID_D9");
}

#[test]
fn diagram_without_elements_is_plain() {
    let doc = xmi_document(
        &three_classes(),
        r#"<diagrams>
  <diagram xmi:id="EAID_D1"><properties name="Overview" type="Logical"/></diagram>
  <diagram xmi:id="EAID_D2"><properties name="Empty" type="Logical"/><elements/></diagram>
</diagrams>"#,
    );
    let model = read_model(StringSource::new(doc)).unwrap();

    assert_eq!(model.diagrams.len(), 2);
    for diagram in &model.diagrams {
        assert!(matches!(diagram, Diagram::Plain(_)), "{} should be plain", diagram.name());
    }
}

#[test]
fn diagram_without_name_gets_empty_name() {
    let doc = xmi_document(
        &three_classes(),
        r#"<diagrams><diagram><properties type="Logical"/></diagram></diagrams>"#,
    );
    let model = read_model(StringSource::new(doc)).unwrap();
    assert_eq!(model.diagrams[0].name(), "");
}

#[test]
fn no_diagrams_listed_gives_empty_list() {
    let doc = xmi_document(&three_classes(), "<diagrams/>");
    let model = read_model(StringSource::new(doc)).unwrap();
    assert!(model.diagrams.is_empty());
    assert_eq!(model.arena().element_count(), 3);
}
