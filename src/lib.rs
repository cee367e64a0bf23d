//! # uml-interpreter
//!
//! Reads Enterprise Architect XMI 2.1 exports into an in-memory UML model.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! visitor       → ModelVisitor, outline printer
//!   ↓
//! deserializer  → EA two-pass reader, EaConfig
//!   ↓
//! resolver      → ForwardResolver (deferred relationship ends)
//!   ↓
//! source        → XmlSource: file or in-memory text
//!   ↓
//! xml           → namespace-resolved element tree (quick-xml)
//!   ↓
//! model         → arena of elements and relationships, diagrams
//! ```
//!
//! ```no_run
//! use uml_interpreter::{read_model, FileSource};
//!
//! let model = read_model(FileSource::new("model.xml"))?;
//! println!("{}", model.print());
//! # Ok::<(), uml_interpreter::InvalidXmlError>(())
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// UML object graph: elements, relationships, diagrams
pub mod model;

/// XML tree with resolved namespaces
pub mod xml;

/// Where XMI text comes from
pub mod source;

/// Deferred binding of forward references
pub mod resolver;

/// Enterprise Architect XMI reader
pub mod deserializer;

/// Model traversal and printing
pub mod visitor;

/// Parser error taxonomy
pub mod error;

// Re-export the reading entry points
pub use deserializer::{read_model, Deserializer, EaConfig, EaXmlDeserializer};
pub use error::{ErrorKind, InvalidXmlError, MissingNode};
pub use source::{FileSource, StringSource, XmlSource};

// Re-export model types
pub use model::{
    ClassDiagram, ClassDiagramAttribute, ClassDiagramElement, ClassDiagramMethod,
    ClassDiagramMethodParameter, ClassRelationship, Diagram, ElementHandle, ElementKind,
    Identifiable, ModelArena, Multiplicity, Named, ObjectId, Relatable, RelationshipHandle,
    RelationshipType, Side, UmlDiagram, UmlModel,
};
pub use visitor::{ModelPrinter, ModelVisitor};
