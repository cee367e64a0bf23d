//! Enterprise Architect XMI 2.1 deserializer.
//!
//! ## Document shape
//!
//! ```xml
//! <xmi:XMI xmlns:uml="http://schema.omg.org/spec/UML/2.1"
//!          xmlns:xmi="http://schema.omg.org/spec/XMI/2.1">
//!   <uml:Model>
//!     <packagedElement xmi:type="uml:Class" xmi:id="EAID_1" name="Car">
//!       <ownedAttribute name="wheels"><type xmi:idref="…" href="…#Integer"/></ownedAttribute>
//!     </packagedElement>
//!     <packagedElement xmi:type="uml:Association" xmi:id="EAID_3">
//!       <ownedEnd xmi:id="EAID_src…"><type xmi:idref="EAID_1"/></ownedEnd>
//!       <ownedEnd xmi:id="EAID_dst…"><type xmi:idref="EAID_2"/></ownedEnd>
//!     </packagedElement>
//!   </uml:Model>
//!   <xmi:Extension>
//!     <diagrams>
//!       <diagram><properties name="Main"/><elements><element subject="EAID_1"/></elements></diagram>
//!     </diagrams>
//!   </xmi:Extension>
//! </xmi:XMI>
//! ```

use std::path::Path;

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::config::EaConfig;
use super::constants::*;
use super::Deserializer;
use crate::error::{InvalidXmlError, MissingNode};
use crate::model::{
    ClassDiagram, ClassDiagramAttribute, ClassDiagramElement, ClassDiagramMethod,
    ClassDiagramMethodParameter, ClassRelationship, Diagram, ElementHandle, ElementKind,
    Identifiable, ModelArena, ModelHandle, Multiplicity, ObjectId, RelationshipHandle,
    RelationshipType, Side, UmlDiagram, UmlModel,
};
use crate::resolver::{ForwardResolver, PendingAction};
use crate::source::{FileSource, StringSource, XmlSource};
use crate::xml::{Tag, XmlNode};

/// Deserializer for the EA flavour of XMI 2.1.
pub struct EaXmlDeserializer {
    source: Box<dyn XmlSource>,
    config: EaConfig,
}

impl EaXmlDeserializer {
    pub fn new(source: impl XmlSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            config: EaConfig::default(),
        }
    }

    pub fn from_string(text: impl Into<String>) -> Self {
        Self::new(StringSource::new(text))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::new(FileSource::new(path.as_ref()))
    }

    pub fn with_config(mut self, config: EaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EaConfig {
        &self.config
    }

    pub fn source(&self) -> &dyn XmlSource {
        self.source.as_ref()
    }

    pub fn set_source(&mut self, source: impl XmlSource + 'static) {
        self.source = Box::new(source);
    }
}

impl Deserializer for EaXmlDeserializer {
    fn read_model(&self) -> Result<UmlModel, InvalidXmlError> {
        let tree = self.source.read_tree()?;
        let root = tree.root().ok_or(MissingNode::Root)?;

        let mut session = ParseSession::new(&self.config);
        let model_node = root.find(&session.uml(MODEL)).ok_or(MissingNode::Model)?;

        let parsed = session.parse_elements(model_node)?;
        let class_members: Vec<ModelHandle> = parsed
            .into_iter()
            .filter(|h| h.as_element().is_some())
            .collect();
        let diagrams = session.parse_diagrams(root, &class_members)?;

        debug!(
            elements = session.arena.element_count(),
            relationships = session.arena.relationship_count(),
            diagrams = diagrams.len(),
            "parsed EA model"
        );

        Ok(UmlModel::new(
            diagrams,
            self.source.path().map(Path::to_path_buf),
            session.arena,
        ))
    }
}

// ============================================================================
// PARSE SESSION
// ============================================================================

/// What a packaged element's `xmi:type` builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PackagedKind {
    Element(ElementKind),
    Relationship(RelationshipType),
}

fn classify(xmi_type: &str) -> Option<PackagedKind> {
    match xmi_type {
        CLASS_TYPE => Some(PackagedKind::Element(ElementKind::Class)),
        INTERFACE_TYPE => Some(PackagedKind::Element(ElementKind::Interface)),
        ASSOCIATION_TYPE => Some(PackagedKind::Relationship(RelationshipType::Association)),
        _ => None,
    }
}

/// Mutable state of a single `read_model` call.
struct ParseSession<'c> {
    config: &'c EaConfig,
    arena: ModelArena,
    resolver: ForwardResolver,
}

impl<'c> ParseSession<'c> {
    fn new(config: &'c EaConfig) -> Self {
        Self {
            config,
            arena: ModelArena::new(),
            resolver: ForwardResolver::new(),
        }
    }

    fn uml(&self, local: &'static str) -> Tag<'c> {
        Tag::qualified(self.config.uml_namespace.as_str(), local)
    }

    fn xmi(&self, local: &'static str) -> Tag<'c> {
        Tag::qualified(self.config.xmi_namespace.as_str(), local)
    }

    // ── Model pass ───────────────────────────────────────────────────

    /// Build every packaged element, then resolve relationship ends.
    fn parse_elements(&mut self, model_node: &XmlNode) -> Result<Vec<ModelHandle>, InvalidXmlError> {
        let mut parsed = Vec::new();
        for node in model_node.descendants(Tag::local(PACKAGED_ELEMENT)) {
            if let Some(handle) = self.parse_element(node)? {
                parsed.push(handle);
            }
        }

        let report = self
            .resolver
            .flush(&mut self.arena, self.config.strict_resolution)?;
        if !report.unresolved.is_empty() {
            info!(
                unresolved = report.unresolved.len(),
                "relationship ends left unbound"
            );
        }
        Ok(parsed)
    }

    fn parse_element(&mut self, node: &XmlNode) -> Result<Option<ModelHandle>, InvalidXmlError> {
        let xmi_type = node.attribute(&self.xmi(ATTR_TYPE));
        if let Some(t) = xmi_type.filter(|t| self.config.is_ignored(t)) {
            debug!(xmi_type = t, "skipping ignored element");
            return Ok(None);
        }

        let id = node
            .attribute(&self.xmi(ATTR_ID))
            .map(ObjectId::new)
            .ok_or(InvalidXmlError::ModelIdMissing)?;

        let handle = match xmi_type.and_then(classify) {
            Some(PackagedKind::Element(kind)) => {
                ModelHandle::Element(self.build_element(node, kind, id.clone())?)
            }
            Some(PackagedKind::Relationship(kind)) => {
                ModelHandle::Relationship(self.build_relationship(node, kind, id.clone())?)
            }
            None => {
                info!(
                    %id,
                    xmi_type = xmi_type.unwrap_or_default(),
                    "Retrieved object is unknown - couldn't build class, interface or relationship"
                );
                return Ok(None);
            }
        };

        self.resolver.register(id, handle)?;
        Ok(Some(handle))
    }

    fn build_element(
        &mut self,
        node: &XmlNode,
        kind: ElementKind,
        id: ObjectId,
    ) -> Result<ElementHandle, InvalidXmlError> {
        let name = node.attribute(&Tag::local(ATTR_NAME)).unwrap_or_default();
        let element = ClassDiagramElement::new(kind, name)
            .with_id(id)
            .with_attributes(self.build_attributes(node)?)
            .with_methods(self.build_methods(node)?);
        Ok(self.arena.add_element(element))
    }

    fn build_attributes(&self, node: &XmlNode) -> Result<Vec<ClassDiagramAttribute>, InvalidXmlError> {
        node.descendants(Tag::local(OWNED_ATTRIBUTE))
            .map(|attr| -> Result<ClassDiagramAttribute, InvalidXmlError> {
                let name = attr.attribute(&Tag::local(ATTR_NAME)).unwrap_or_default();
                let type_node = attr
                    .find(&Tag::local(ATTRIBUTE_TYPE))
                    .ok_or(MissingNode::AttributeType)?;
                let type_name = self
                    .config
                    .map_type(type_node.attribute(&Tag::local(ATTR_HREF)));

                let mut attribute = ClassDiagramAttribute::new(name, type_name);
                if let Some(value) = literal_value(attr) {
                    attribute = attribute.with_init_value(value);
                }
                self.copy_id(attr, &mut attribute);
                Ok(attribute)
            })
            .collect()
    }

    fn build_methods(&self, node: &XmlNode) -> Result<Vec<ClassDiagramMethod>, InvalidXmlError> {
        let mut methods = Vec::new();
        for op in node.descendants(Tag::local(OWNED_OPERATION)) {
            let name = op.attribute(&Tag::local(ATTR_NAME)).unwrap_or_default();
            let mut return_type = String::new();
            let mut parameters = Vec::new();

            for param in op.descendants(Tag::local(OWNED_PARAMETER)) {
                let param_name = param.attribute(&Tag::local(ATTR_NAME));
                if param_name == Some(RETURN_PARAMETER) {
                    return_type = self
                        .config
                        .map_type(param.attribute(&Tag::local(ATTR_RETURN_TYPE)));
                    continue;
                }

                let type_node = param
                    .find(&Tag::local(PARAMETER_TYPE))
                    .ok_or(MissingNode::ParameterType)?;
                let type_name = self
                    .config
                    .map_type(type_node.attribute(&Tag::local(ATTR_HREF)));

                let mut parameter =
                    ClassDiagramMethodParameter::new(param_name.unwrap_or_default(), type_name);
                if let Some(value) = literal_value(param) {
                    parameter = parameter.with_default_value(value);
                }
                self.copy_id(param, &mut parameter);
                parameters.push(parameter);
            }

            let mut method = ClassDiagramMethod::new(name, return_type, parameters);
            self.copy_id(op, &mut method);
            methods.push(method);
        }
        Ok(methods)
    }

    /// Build a relationship with unbound sides and defer binding of both ends.
    fn build_relationship(
        &mut self,
        node: &XmlNode,
        kind: RelationshipType,
        id: ObjectId,
    ) -> Result<RelationshipHandle, InvalidXmlError> {
        let name = node.attribute(&Tag::local(ATTR_NAME)).map(str::to_owned);
        let mut relationship = ClassRelationship::new(kind, name).with_id(id.clone());
        let mut source_ref: Option<&str> = None;
        let mut target_ref: Option<&str> = None;

        for end in node.descendants(Tag::local(OWNED_END)) {
            let Some(side) = end.attribute(&self.xmi(ATTR_ID)).and_then(end_side) else {
                debug!(relationship = %id, "skipping end without EA side prefix");
                continue;
            };

            let slot = match side {
                Side::Source => &mut source_ref,
                Side::Target => &mut target_ref,
            };
            if slot.is_some() {
                return Err(InvalidXmlError::relationship_ends(id.as_str(), "duplicate end"));
            }

            let referenced = end
                .find(&Tag::local(END_TYPE))
                .and_then(|t| t.attribute(&self.xmi(ATTR_IDREF)))
                .filter(|r| !r.is_empty())
                .ok_or_else(|| {
                    InvalidXmlError::relationship_ends(id.as_str(), "end without referenced element")
                })?;
            *slot = Some(referenced);

            let role = end
                .attribute(&Tag::local(ATTR_NAME))
                .filter(|r| !r.is_empty())
                .map(str::to_owned);
            let multiplicity = self.read_multiplicity(end);
            relationship = match side {
                Side::Source => relationship.with_source_side(role, multiplicity),
                Side::Target => relationship.with_target_side(role, multiplicity),
            };
        }

        let (Some(source_ref), Some(target_ref)) = (source_ref, target_ref) else {
            return Err(InvalidXmlError::relationship_ends(id.as_str(), "missing end"));
        };

        let handle = self.arena.add_relationship(relationship);
        for (side, referenced) in [(Side::Source, source_ref), (Side::Target, target_ref)] {
            self.resolver
                .defer(referenced.into(), PendingAction::for_side(side, handle));
        }
        Ok(handle)
    }

    fn read_multiplicity(&self, end: &XmlNode) -> Multiplicity {
        Multiplicity::new(
            self.read_bound(end, LOWER_VALUE),
            self.read_bound(end, UPPER_VALUE),
        )
    }

    /// A bound is unbounded when absent or typed `uml:LiteralUnlimitedNatural`.
    fn read_bound(&self, end: &XmlNode, tag: &'static str) -> String {
        end.find_all(Tag::local(tag))
            .last()
            .and_then(|value| {
                if value.attribute(&self.xmi(ATTR_TYPE)) == Some(LITERAL_UNLIMITED_NATURAL) {
                    None
                } else {
                    value.attribute(&Tag::local(ATTR_VALUE))
                }
            })
            .unwrap_or(Multiplicity::UNBOUNDED)
            .to_string()
    }

    fn copy_id(&self, node: &XmlNode, target: &mut impl Identifiable) {
        if let Some(id) = node.attribute(&self.xmi(ATTR_ID)) {
            target.set_id(ObjectId::new(id));
        }
    }

    // ── Diagram pass ─────────────────────────────────────────────────

    fn parse_diagrams(&self, root: &XmlNode, members: &[ModelHandle]) -> Result<Vec<Diagram>, InvalidXmlError> {
        let extension = root
            .find(&self.xmi(EXTENSION))
            .ok_or(MissingNode::Extension)?;
        let diagrams = extension
            .find(&Tag::local(DIAGRAMS))
            .ok_or(MissingNode::Diagrams)?;

        diagrams
            .descendants(Tag::local(DIAGRAM))
            .map(|node| self.build_diagram(node, members))
            .collect()
    }

    fn build_diagram(&self, node: &XmlNode, members: &[ModelHandle]) -> Result<Diagram, InvalidXmlError> {
        let properties = node
            .find(&Tag::local(DIAGRAM_PROPERTIES))
            .ok_or(MissingNode::DiagramProperties)?;
        let name = properties
            .attribute(&Tag::local(ATTR_NAME))
            .unwrap_or_default();

        let listed = node
            .find(&Tag::local(DIAGRAM_ELEMENTS))
            .filter(|elements| !elements.children.is_empty());
        let mut diagram = match listed {
            None => Diagram::Plain(UmlDiagram::new(name)),
            Some(elements) => {
                let subjects: FxHashSet<&str> = elements
                    .descendants(Tag::local(DIAGRAM_ELEMENT))
                    .filter_map(|e| e.attribute(&Tag::local(ATTR_SUBJECT)))
                    .collect();
                let selected: Vec<ModelHandle> = members
                    .iter()
                    .copied()
                    .filter(|h| {
                        self.id_of(*h)
                            .is_some_and(|id| subjects.contains(id.as_str()))
                    })
                    .collect();
                debug!(diagram = name, members = selected.len(), "assembled diagram");
                assemble_diagram(name, &selected)?
            }
        };

        if let Some(id) = node.attribute(&self.xmi(ATTR_ID)) {
            diagram.set_id(ObjectId::new(id));
        }
        Ok(diagram)
    }

    fn id_of(&self, handle: ModelHandle) -> Option<&ObjectId> {
        match handle {
            ModelHandle::Element(h) => self.arena.element(h).map(|e| e.id()),
            ModelHandle::Relationship(h) => self.arena.relationship(h).map(|r| r.id()),
        }
    }
}

fn end_side(end_id: &str) -> Option<Side> {
    if end_id.starts_with(END_SOURCE_PREFIX) {
        Some(Side::Source)
    } else if end_id.starts_with(END_TARGET_PREFIX) {
        Some(Side::Target)
    } else {
        None
    }
}

/// `value` of a node's `defaultValue` child, if any.
fn literal_value(node: &XmlNode) -> Option<String> {
    node.find(&Tag::local(DEFAULT_VALUE))
        .and_then(|v| v.attribute(&Tag::local(ATTR_VALUE)))
        .map(str::to_owned)
}

/// Wrap diagram members into a class diagram. Every member must be a class
/// diagram element.
fn assemble_diagram(name: &str, members: &[ModelHandle]) -> Result<Diagram, InvalidXmlError> {
    members
        .iter()
        .map(|m| m.as_element())
        .collect::<Option<Vec<_>>>()
        .map(|elements| Diagram::Class(ClassDiagram::new(name, elements)))
        .ok_or_else(|| InvalidXmlError::MixedElementTypes {
            diagram: name.to_string(),
        })
}
