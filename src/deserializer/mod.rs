//! Deserialization of XMI documents into a [`UmlModel`].
//!
//! ## Passes
//!
//! ```text
//! XmlSource::read_tree
//!        │
//!        ▼
//! Model pass      packagedElement* ──▶ elements, relationships
//!        │                            (ends deferred in ForwardResolver)
//!        ▼
//! flush           pending ends bound to resolved elements
//!        │
//!        ▼
//! Diagram pass    xmi:Extension/diagrams/diagram* ──▶ Diagram list
//! ```

pub mod constants;
mod config;
mod ea;

pub use config::EaConfig;
pub use ea::EaXmlDeserializer;

use crate::error::InvalidXmlError;
use crate::model::UmlModel;
use crate::source::XmlSource;

/// Something that turns its source into a model.
pub trait Deserializer {
    /// Parse the whole source. Structural problems abort with no partial model.
    fn read_model(&self) -> Result<UmlModel, InvalidXmlError>;
}

/// Read an Enterprise Architect export with default settings.
pub fn read_model(source: impl XmlSource + 'static) -> Result<UmlModel, InvalidXmlError> {
    EaXmlDeserializer::new(source).read_model()
}
