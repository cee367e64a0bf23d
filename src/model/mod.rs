//! In-memory UML object graph.
//!
//! ## Ownership
//!
//! ```text
//! UmlModel ──owns──▶ Diagram ──handle──▶ ClassDiagramElement
//!    │                                      ▲        │
//!    └──owns──▶ ModelArena ──owns───────────┘        │ owns
//!                  │                                 ▼
//!                  └──owns──▶ ClassRelationship   methods / attributes
//! ```
//!
//! Shared fields are exposed through small capability traits instead of a
//! base type: [`Identifiable`], [`Named`] and [`Relatable`].

mod arena;
mod class_diagram;
mod diagram;
mod id;

pub use arena::{ModelArena, ModelError};
pub use class_diagram::{
    ClassDiagramAttribute, ClassDiagramElement, ClassDiagramMethod, ClassDiagramMethodParameter,
    ClassRelationship, ElementKind, Multiplicity, RelationshipSide, RelationshipType, Side,
    UnknownRelationshipType,
};
pub use diagram::{ClassDiagram, Diagram, UmlDiagram, UmlModel};
pub use id::{ElementHandle, ModelHandle, ObjectId, RelationshipHandle};

/// Objects carrying an external id. The id may be replaced after construction.
pub trait Identifiable {
    fn id(&self) -> &ObjectId;
    fn set_id(&mut self, id: ObjectId);
}

/// Objects with a display name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Objects that take part in relationships.
///
/// The lists are back-references maintained by
/// [`ModelArena::bind_side`]; callers only read them.
pub trait Relatable {
    /// Relationships in which this object is the source.
    fn relations_to(&self) -> &[RelationshipHandle];
    /// Relationships in which this object is the target.
    fn relations_from(&self) -> &[RelationshipHandle];
}
