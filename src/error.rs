//! Error types for model deserialization.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::ModelError;
use crate::resolver::ResolveError;
use crate::xml::XmlError;

/// Mandatory nodes whose absence aborts a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingNode {
    Root,
    Model,
    Extension,
    Diagrams,
    DiagramProperties,
    AttributeType,
    ParameterType,
}

impl MissingNode {
    pub fn message(&self) -> &'static str {
        match self {
            MissingNode::Root => "No XMI node found in the XML file.",
            MissingNode::Model => "No Model node found in the XML file.",
            MissingNode::Extension => "No Extension node found in the XML file.",
            MissingNode::Diagrams => "No diagrams found in the XML file.",
            MissingNode::DiagramProperties => {
                "Invalid diagram node in XML file. Missing properties tag."
            }
            MissingNode::AttributeType => "Attribute is missing a type!",
            MissingNode::ParameterType => "Parameter is missing a type!",
        }
    }
}

impl std::fmt::Display for MissingNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Coarse classification of an [`InvalidXmlError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Markup is not well-formed.
    Parse,
    /// The source could not be read.
    Io,
    /// A mandatory node or attribute is absent or malformed.
    Structural,
    /// A diagram references elements of more than one diagram kind.
    MixedElementTypes,
    /// A forward reference never resolved (strict resolution only).
    UnresolvedReference,
    /// An external id was defined twice.
    Conflict,
    /// A model handle did not belong to the model being built.
    Model,
}

/// Failure of [`Deserializer::read_model`](crate::deserializer::Deserializer::read_model).
///
/// No partial model is returned alongside any of these.
#[derive(Debug, Error)]
pub enum InvalidXmlError {
    #[error("Parser Error: {0}")]
    Parse(#[from] XmlError),

    #[error("Parser Error: cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parser Error: {0}")]
    MissingNode(MissingNode),

    #[error("Parser Error: UML Model element is missing an id!")]
    ModelIdMissing,

    #[error("Parser Error: Relationship is missing at least one of the ends! ({relationship}: {reason})")]
    RelationshipEndsMissing {
        relationship: String,
        reason: &'static str,
    },

    #[error("Parser Error: Mixed elements' types for diagram in XML file. (diagram \"{diagram}\")")]
    MixedElementTypes { diagram: String },

    #[error("Parser Error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Parser Error: {0}")]
    Model(#[from] ModelError),
}

impl InvalidXmlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::Io { .. } => ErrorKind::Io,
            Self::MissingNode(_) | Self::ModelIdMissing | Self::RelationshipEndsMissing { .. } => {
                ErrorKind::Structural
            }
            Self::MixedElementTypes { .. } => ErrorKind::MixedElementTypes,
            Self::Resolve(ResolveError::IdMismatch { .. }) => ErrorKind::UnresolvedReference,
            Self::Resolve(ResolveError::Conflict { .. }) => ErrorKind::Conflict,
            Self::Resolve(ResolveError::Model(_)) | Self::Model(_) => ErrorKind::Model,
        }
    }

    pub(crate) fn relationship_ends(relationship: &str, reason: &'static str) -> Self {
        Self::RelationshipEndsMissing {
            relationship: relationship.to_string(),
            reason,
        }
    }
}

impl From<MissingNode> for InvalidXmlError {
    fn from(node: MissingNode) -> Self {
        Self::MissingNode(node)
    }
}
