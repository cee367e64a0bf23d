//! Diagrams and the top-level model.

use std::path::{Path, PathBuf};

use super::arena::ModelArena;
use super::class_diagram::{ClassDiagramElement, ClassRelationship};
use super::id::{ElementHandle, ObjectId, RelationshipHandle};
use super::{Identifiable, Named};

/// A diagram whose element kind is not (yet) modeled; only its name is kept.
#[derive(Clone, Debug)]
pub struct UmlDiagram {
    id: ObjectId,
    pub name: String,
}

impl UmlDiagram {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::generate(),
            name: name.into(),
        }
    }
}

/// A class diagram referencing elements owned by the model's arena.
#[derive(Clone, Debug)]
pub struct ClassDiagram {
    id: ObjectId,
    pub name: String,
    pub elements: Vec<ElementHandle>,
}

impl ClassDiagram {
    pub fn new(name: impl Into<String>, elements: Vec<ElementHandle>) -> Self {
        Self {
            id: ObjectId::generate(),
            name: name.into(),
            elements,
        }
    }
}

/// Any diagram of a model.
#[derive(Clone, Debug)]
pub enum Diagram {
    Plain(UmlDiagram),
    Class(ClassDiagram),
}

impl Diagram {
    pub fn as_class_diagram(&self) -> Option<&ClassDiagram> {
        match self {
            Diagram::Class(d) => Some(d),
            Diagram::Plain(_) => None,
        }
    }
}

impl Named for Diagram {
    fn name(&self) -> &str {
        match self {
            Diagram::Plain(d) => &d.name,
            Diagram::Class(d) => &d.name,
        }
    }
}

macro_rules! impl_identifiable {
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
        )*
    };
}

impl_identifiable!(UmlDiagram, ClassDiagram, UmlModel);

impl Identifiable for Diagram {
    fn id(&self) -> &ObjectId {
        match self {
            Diagram::Plain(d) => d.id(),
            Diagram::Class(d) => d.id(),
        }
    }

    fn set_id(&mut self, id: ObjectId) {
        match self {
            Diagram::Plain(d) => d.set_id(id),
            Diagram::Class(d) => d.set_id(id),
        }
    }
}

/// A deserialized UML model.
///
/// ```text
/// UmlModel
/// ├── diagrams: Vec<Diagram>       (reference elements by handle)
/// ├── arena: ModelArena            (owns elements and relationships)
/// └── filename: Option<PathBuf>    (set for file-backed sources)
/// ```
#[derive(Clone, Debug)]
pub struct UmlModel {
    id: ObjectId,
    pub diagrams: Vec<Diagram>,
    pub filename: Option<PathBuf>,
    arena: ModelArena,
}

impl Default for UmlModel {
    fn default() -> Self {
        Self::new(Vec::new(), None, ModelArena::new())
    }
}

impl UmlModel {
    pub fn new(diagrams: Vec<Diagram>, filename: Option<PathBuf>, arena: ModelArena) -> Self {
        Self {
            id: ObjectId::generate(),
            diagrams,
            filename,
            arena,
        }
    }

    pub fn arena(&self) -> &ModelArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut ModelArena {
        &mut self.arena
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn element(&self, handle: ElementHandle) -> Option<&ClassDiagramElement> {
        self.arena.element(handle)
    }

    pub fn relationship(&self, handle: RelationshipHandle) -> Option<&ClassRelationship> {
        self.arena.relationship(handle)
    }

    /// Find a diagram by name.
    pub fn diagram(&self, name: &str) -> Option<&Diagram> {
        self.diagrams.iter().find(|d| d.name() == name)
    }

    /// Find an element by external id.
    pub fn find_element(&self, id: &str) -> Option<&ClassDiagramElement> {
        self.arena
            .find_element(id)
            .and_then(|h| self.arena.element(h))
    }

    /// Render the model tree with the default printer settings.
    pub fn print(&self) -> String {
        crate::visitor::ModelPrinter::default().render(self)
    }
}
