//! Class diagram entities.
//!
//! Elements own their methods and attributes. Relationships live next to the
//! elements in the [`ModelArena`](super::ModelArena) and are linked to them
//! through handles in both directions; see [`ModelArena::bind_side`](super::ModelArena::bind_side).

use std::str::FromStr;

use super::id::{ElementHandle, ObjectId, RelationshipHandle};
use super::{Identifiable, Named, Relatable};

// ============================================================================
// ELEMENTS
// ============================================================================

/// Variant of a class diagram element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Class,
    Interface,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Interface => "Interface",
        }
    }
}

/// A class or interface box of a class diagram.
#[derive(Clone, Debug)]
pub struct ClassDiagramElement {
    id: ObjectId,
    pub kind: ElementKind,
    pub name: String,
    pub methods: Vec<ClassDiagramMethod>,
    pub attributes: Vec<ClassDiagramAttribute>,
    /// Relationships whose source side is this element.
    pub(crate) relations_to: Vec<RelationshipHandle>,
    /// Relationships whose target side is this element.
    pub(crate) relations_from: Vec<RelationshipHandle>,
}

impl ClassDiagramElement {
    /// Create an element with a synthesized id.
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::generate(),
            kind,
            name: name.into(),
            methods: Vec::new(),
            attributes: Vec::new(),
            relations_to: Vec::new(),
            relations_from: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(ElementKind::Class, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(ElementKind::Interface, name)
    }

    pub fn with_id(mut self, id: impl Into<ObjectId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_methods(mut self, methods: Vec<ClassDiagramMethod>) -> Self {
        self.methods = methods;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<ClassDiagramAttribute>) -> Self {
        self.attributes = attributes;
        self
    }
}

impl Identifiable for ClassDiagramElement {
    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }
}

impl Named for ClassDiagramElement {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Relatable for ClassDiagramElement {
    fn relations_to(&self) -> &[RelationshipHandle] {
        &self.relations_to
    }

    fn relations_from(&self) -> &[RelationshipHandle] {
        &self.relations_from
    }
}

// ============================================================================
// RELATIONSHIPS
// ============================================================================

/// Kind of a class relationship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RelationshipType {
    #[default]
    Association,
    Generalization,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Association => "Association",
            Self::Generalization => "Generalization",
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no [`RelationshipType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relationship type: {0}")]
pub struct UnknownRelationshipType(pub String);

impl FromStr for RelationshipType {
    type Err = UnknownRelationshipType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Association" => Ok(Self::Association),
            "Generalization" => Ok(Self::Generalization),
            other => Err(UnknownRelationshipType(other.to_string())),
        }
    }
}

/// Cardinality range of a relationship end.
///
/// Bounds stay string-encoded as exported; [`Multiplicity::UNBOUNDED`] marks
/// a missing or unlimited bound.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Multiplicity {
    pub min: String,
    pub max: String,
}

impl Multiplicity {
    pub const UNBOUNDED: &'static str = "inf";

    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Both bounds set to the unbounded sentinel.
    pub fn unbounded() -> Self {
        Self::new(Self::UNBOUNDED, Self::UNBOUNDED)
    }

    pub fn is_unbounded_min(&self) -> bool {
        self.min == Self::UNBOUNDED
    }

    pub fn is_unbounded_max(&self) -> bool {
        self.max == Self::UNBOUNDED
    }
}

impl Default for Multiplicity {
    fn default() -> Self {
        Self::new("0", "1")
    }
}

impl std::fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}...{}", self.min, self.max)
    }
}

/// Which end of a relationship a side refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }
}

/// One endpoint of a binary relationship.
///
/// The element stays `None` until a forward reference resolves. It can only
/// be changed through the arena so that the element's relation list stays
/// consistent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelationshipSide {
    pub(crate) element: Option<ElementHandle>,
    pub role: Option<String>,
    pub multiplicity: Multiplicity,
}

impl RelationshipSide {
    pub fn element(&self) -> Option<ElementHandle> {
        self.element
    }

    pub fn is_bound(&self) -> bool {
        self.element.is_some()
    }
}

/// A relationship between two class diagram elements.
#[derive(Clone, Debug)]
pub struct ClassRelationship {
    id: ObjectId,
    pub kind: RelationshipType,
    pub name: Option<String>,
    pub(crate) source: RelationshipSide,
    pub(crate) target: RelationshipSide,
}

impl ClassRelationship {
    /// Placeholder relationship with both sides unbound.
    pub fn new(kind: RelationshipType, name: Option<String>) -> Self {
        Self {
            id: ObjectId::generate(),
            kind,
            name,
            source: RelationshipSide::default(),
            target: RelationshipSide::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ObjectId>) -> Self {
        self.id = id.into();
        self
    }

    /// Replace the role and multiplicity of the source side. Any bound element is kept.
    pub fn with_source_side(mut self, role: Option<String>, multiplicity: Multiplicity) -> Self {
        self.source.role = role;
        self.source.multiplicity = multiplicity;
        self
    }

    /// Replace the role and multiplicity of the target side. Any bound element is kept.
    pub fn with_target_side(mut self, role: Option<String>, multiplicity: Multiplicity) -> Self {
        self.target.role = role;
        self.target.multiplicity = multiplicity;
        self
    }

    pub fn source_side(&self) -> &RelationshipSide {
        &self.source
    }

    pub fn target_side(&self) -> &RelationshipSide {
        &self.target
    }

    pub fn side(&self, side: Side) -> &RelationshipSide {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut RelationshipSide {
        match side {
            Side::Source => &mut self.source,
            Side::Target => &mut self.target,
        }
    }

    pub fn source(&self) -> Option<ElementHandle> {
        self.source.element
    }

    pub fn target(&self) -> Option<ElementHandle> {
        self.target.element
    }
}

impl Identifiable for ClassRelationship {
    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }
}

// ============================================================================
// MEMBERS
// ============================================================================

/// An operation of a class or interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDiagramMethod {
    id: ObjectId,
    pub name: String,
    /// Mapped return type name, empty if unknown.
    pub return_type: String,
    pub parameters: Vec<ClassDiagramMethodParameter>,
}

impl ClassDiagramMethod {
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<String>,
        parameters: Vec<ClassDiagramMethodParameter>,
    ) -> Self {
        Self {
            id: ObjectId::generate(),
            name: name.into(),
            return_type: return_type.into(),
            parameters,
        }
    }
}

/// A typed, optionally initialized attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDiagramAttribute {
    id: ObjectId,
    pub name: String,
    pub type_name: String,
    pub init_value: Option<String>,
}

impl ClassDiagramAttribute {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::generate(),
            name: name.into(),
            type_name: type_name.into(),
            init_value: None,
        }
    }

    pub fn with_init_value(mut self, value: impl Into<String>) -> Self {
        self.init_value = Some(value.into());
        self
    }
}

/// A parameter of a [`ClassDiagramMethod`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDiagramMethodParameter {
    id: ObjectId,
    pub name: String,
    pub type_name: String,
    pub default_value: Option<String>,
}

impl ClassDiagramMethodParameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::generate(),
            name: name.into(),
            type_name: type_name.into(),
            default_value: None,
        }
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

macro_rules! impl_member_traits {
    ($($ty:ty),*) => {
        $(
            impl Identifiable for $ty {
                fn id(&self) -> &ObjectId {
                    &self.id
                }

                fn set_id(&mut self, id: ObjectId) {
                    self.id = id;
                }
            }

            impl Named for $ty {
                fn name(&self) -> &str {
                    &self.name
                }
            }
        )*
    };
}

impl_member_traits!(
    ClassDiagramMethod,
    ClassDiagramAttribute,
    ClassDiagramMethodParameter
);
