//! Traversal of a deserialized model.
//!
//! [`ModelVisitor`] has one method per entity kind. The defaults descend into
//! children through the `walk_*` functions, so an implementation only
//! overrides what it cares about and calls the matching `walk_*` to keep
//! descending.

use std::fmt::{self, Write as _};

use crate::model::{
    ClassDiagram, ClassDiagramAttribute, ClassDiagramElement, ClassDiagramMethod,
    ClassDiagramMethodParameter, ClassRelationship, Diagram, ElementKind, Identifiable, Relatable,
    RelationshipHandle, UmlDiagram, UmlModel,
};

/// Visitor over a [`UmlModel`]. Entities that refer to others by handle
/// receive the model so they can look them up.
pub trait ModelVisitor {
    fn visit_model(&mut self, model: &UmlModel) {
        walk_model(self, model);
    }

    fn visit_diagram(&mut self, _model: &UmlModel, _diagram: &UmlDiagram) {}

    fn visit_class_diagram(&mut self, model: &UmlModel, diagram: &ClassDiagram) {
        walk_class_diagram(self, model, diagram);
    }

    fn visit_class(&mut self, model: &UmlModel, element: &ClassDiagramElement) {
        walk_element(self, model, element);
    }

    fn visit_interface(&mut self, model: &UmlModel, element: &ClassDiagramElement) {
        walk_element(self, model, element);
    }

    fn visit_relationship(&mut self, _model: &UmlModel, _relationship: &ClassRelationship) {}

    fn visit_attribute(&mut self, _attribute: &ClassDiagramAttribute) {}

    fn visit_method(&mut self, method: &ClassDiagramMethod) {
        walk_method(self, method);
    }

    fn visit_parameter(&mut self, _parameter: &ClassDiagramMethodParameter) {}
}

pub fn walk_model<V: ModelVisitor + ?Sized>(visitor: &mut V, model: &UmlModel) {
    for diagram in &model.diagrams {
        match diagram {
            Diagram::Plain(d) => visitor.visit_diagram(model, d),
            Diagram::Class(d) => visitor.visit_class_diagram(model, d),
        }
    }
}

pub fn walk_class_diagram<V: ModelVisitor + ?Sized>(
    visitor: &mut V,
    model: &UmlModel,
    diagram: &ClassDiagram,
) {
    for element in diagram.elements.iter().filter_map(|h| model.element(*h)) {
        visit_element(visitor, model, element);
    }
}

/// Dispatch on the element variant.
pub fn visit_element<V: ModelVisitor + ?Sized>(
    visitor: &mut V,
    model: &UmlModel,
    element: &ClassDiagramElement,
) {
    match element.kind {
        ElementKind::Class => visitor.visit_class(model, element),
        ElementKind::Interface => visitor.visit_interface(model, element),
    }
}

/// Relations where the element is the target, then where it is the source,
/// then attributes and methods.
pub fn walk_element<V: ModelVisitor + ?Sized>(
    visitor: &mut V,
    model: &UmlModel,
    element: &ClassDiagramElement,
) {
    for rel in element.relations_from().iter().filter_map(|h| model.relationship(*h)) {
        visitor.visit_relationship(model, rel);
    }
    for rel in element.relations_to().iter().filter_map(|h| model.relationship(*h)) {
        visitor.visit_relationship(model, rel);
    }
    for attribute in &element.attributes {
        visitor.visit_attribute(attribute);
    }
    for method in &element.methods {
        visitor.visit_method(method);
    }
}

pub fn walk_method<V: ModelVisitor + ?Sized>(visitor: &mut V, method: &ClassDiagramMethod) {
    for parameter in &method.parameters {
        visitor.visit_parameter(parameter);
    }
}

// ============================================================================
// PRINTER
// ============================================================================

/// Renders the model as an indented outline.
///
/// ```text
/// |Model:
/// |--Class Diagram: "Main"
/// |----Class: "Car" id: EAID_1
/// |------Relationships (source):
/// |--------Association (drives) - Car (car)[1...1] -> [0...inf] (wheels) Wheel
/// ```
#[derive(Debug, Clone)]
pub struct ModelPrinter {
    indent: usize,
    indent_inc: usize,
    out: String,
}

impl Default for ModelPrinter {
    fn default() -> Self {
        Self::new(0, 2)
    }
}

impl ModelPrinter {
    pub fn new(indent: usize, indent_inc: usize) -> Self {
        Self {
            indent,
            indent_inc,
            out: String::new(),
        }
    }

    /// Render `model` and return the text.
    pub fn render(mut self, model: &UmlModel) -> String {
        self.visit_model(model);
        self.out
    }

    /// Render `model` into `sink`.
    pub fn write_to(self, model: &UmlModel, sink: &mut impl fmt::Write) -> fmt::Result {
        sink.write_str(&self.render(model))
    }

    fn line(&mut self, text: &str) {
        // Writing into a String cannot fail.
        let _ = writeln!(self.out, "|{}{}", "-".repeat(self.indent), text);
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += self.indent_inc;
        f(self);
        self.indent -= self.indent_inc;
    }

    /// Titled block of children, omitted when there are none.
    fn section<T>(
        &mut self,
        title: &str,
        items: impl IntoIterator<Item = T>,
        mut visit: impl FnMut(&mut Self, T),
    ) {
        let mut items = items.into_iter().peekable();
        if items.peek().is_none() {
            return;
        }
        self.line(title);
        self.nested(|p| items.for_each(|item| visit(p, item)));
    }

    fn element_body(&mut self, model: &UmlModel, element: &ClassDiagramElement) {
        self.section(
            "Relationships (target):",
            related(model, element.relations_from()),
            |p, rel| p.visit_relationship(model, rel),
        );
        self.section(
            "Relationships (source):",
            related(model, element.relations_to()),
            |p, rel| p.visit_relationship(model, rel),
        );
        self.section("Attributes:", &element.attributes, |p, a| p.visit_attribute(a));
        self.section("Methods:", &element.methods, |p, m| p.visit_method(m));
    }

    fn element(&mut self, model: &UmlModel, label: &str, element: &ClassDiagramElement) {
        self.line(&format!("{label}: \"{}\" id: {}", element.name, element.id()));
        self.nested(|p| p.element_body(model, element));
    }
}

fn related<'m>(model: &'m UmlModel, handles: &[RelationshipHandle]) -> Vec<&'m ClassRelationship> {
    handles.iter().filter_map(|h| model.relationship(*h)).collect()
}

impl ModelVisitor for ModelPrinter {
    fn visit_model(&mut self, model: &UmlModel) {
        self.line("Model:");
        self.nested(|p| walk_model(p, model));
    }

    fn visit_diagram(&mut self, _model: &UmlModel, diagram: &UmlDiagram) {
        self.line(&format!("UML Diagram: \"{}\"", diagram.name));
    }

    fn visit_class_diagram(&mut self, model: &UmlModel, diagram: &ClassDiagram) {
        self.line(&format!("Class Diagram: \"{}\"", diagram.name));
        self.nested(|p| walk_class_diagram(p, model, diagram));
    }

    fn visit_class(&mut self, model: &UmlModel, element: &ClassDiagramElement) {
        self.element(model, "Class", element);
    }

    fn visit_interface(&mut self, model: &UmlModel, element: &ClassDiagramElement) {
        self.element(model, "Interface", element);
    }

    /// Only fully bound relationships are printed.
    fn visit_relationship(&mut self, model: &UmlModel, rel: &ClassRelationship) {
        let (Some(source), Some(target)) = (
            rel.source().and_then(|h| model.element(h)),
            rel.target().and_then(|h| model.element(h)),
        ) else {
            return;
        };
        let (src, dst) = (rel.source_side(), rel.target_side());
        self.line(&format!(
            "{} ({}) - {} ({})[{}] -> [{}] ({}) {}",
            rel.kind,
            rel.name.as_deref().unwrap_or_default(),
            source.name,
            src.role.as_deref().unwrap_or_default(),
            src.multiplicity,
            dst.multiplicity,
            dst.role.as_deref().unwrap_or_default(),
            target.name,
        ));
    }

    fn visit_attribute(&mut self, attribute: &ClassDiagramAttribute) {
        self.line(&format!("{}: {}", attribute.name, attribute.type_name));
    }

    fn visit_method(&mut self, method: &ClassDiagramMethod) {
        let params: Vec<String> = method
            .parameters
            .iter()
            .map(|p| format!("'{}: {}'", p.name, p.type_name))
            .collect();
        self.line(&format!(
            "{}: [{}] -> {}",
            method.name,
            params.join(", "),
            method.return_type
        ));
    }

    fn visit_parameter(&mut self, parameter: &ClassDiagramMethodParameter) {
        self.line(&format!("{}: {}", parameter.name, parameter.type_name));
    }
}
