//! Identity types: external ids and arena handles.

use std::sync::Arc;

// ============================================================================
// EXTERNAL IDS
// ============================================================================

/// External identifier of a model object.
///
/// This corresponds to `xmi:id` in an EA export. Objects built without one
/// get a synthesized UUID via [`ObjectId::generate`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(Arc<str>);

impl ObjectId {
    /// Create an id from an existing string.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Synthesize a fresh UUID v4 based id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string().into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// HANDLES
// ============================================================================

/// Stable handle of a class diagram element inside a [`ModelArena`](super::ModelArena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub(crate) u32);

/// Stable handle of a relationship inside a [`ModelArena`](super::ModelArena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationshipHandle(pub(crate) u32);

impl ElementHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl RelationshipHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Any arena object that can be registered under an external id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelHandle {
    Element(ElementHandle),
    Relationship(RelationshipHandle),
}

impl ModelHandle {
    pub fn as_element(self) -> Option<ElementHandle> {
        match self {
            ModelHandle::Element(h) => Some(h),
            ModelHandle::Relationship(_) => None,
        }
    }

    pub fn as_relationship(self) -> Option<RelationshipHandle> {
        match self {
            ModelHandle::Relationship(h) => Some(h),
            ModelHandle::Element(_) => None,
        }
    }
}

impl From<ElementHandle> for ModelHandle {
    fn from(h: ElementHandle) -> Self {
        ModelHandle::Element(h)
    }
}

impl From<RelationshipHandle> for ModelHandle {
    fn from(h: RelationshipHandle) -> Self {
        ModelHandle::Relationship(h)
    }
}
