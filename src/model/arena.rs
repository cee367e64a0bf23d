//! Arena owning every element and relationship of a model.
//!
//! Relationships and elements refer to each other by handle. The only way to
//! attach an element to a relationship side is [`ModelArena::bind_side`],
//! which updates both directions at once.

use thiserror::Error;

use super::class_diagram::{ClassDiagramElement, ClassRelationship, RelationshipType, Side};
use super::id::{ElementHandle, ObjectId, RelationshipHandle};
use super::Identifiable;

/// Errors raised by arena operations given a foreign or stale handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown element handle {0:?}")]
    UnknownElement(ElementHandle),

    #[error("unknown relationship handle {0:?}")]
    UnknownRelationship(RelationshipHandle),
}

/// Owner of all class diagram elements and relationships.
#[derive(Clone, Debug, Default)]
pub struct ModelArena {
    elements: Vec<ClassDiagramElement>,
    relationships: Vec<ClassRelationship>,
}

impl ModelArena {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Insertion ────────────────────────────────────────────────────

    pub fn add_element(&mut self, element: ClassDiagramElement) -> ElementHandle {
        let handle = ElementHandle(self.elements.len() as u32);
        self.elements.push(element);
        handle
    }

    /// Insert a relationship. Its sides start unbound regardless of input.
    pub fn add_relationship(&mut self, mut relationship: ClassRelationship) -> RelationshipHandle {
        relationship.source.element = None;
        relationship.target.element = None;
        let handle = RelationshipHandle(self.relationships.len() as u32);
        self.relationships.push(relationship);
        handle
    }

    /// Create a relationship from `source` to `target` and bind both sides.
    pub fn add_relationship_to(
        &mut self,
        source: ElementHandle,
        target: ElementHandle,
        kind: RelationshipType,
    ) -> Result<RelationshipHandle, ModelError> {
        self.check_element(source)?;
        self.check_element(target)?;
        let rel = self.add_relationship(ClassRelationship::new(kind, None));
        self.bind_side(rel, Side::Source, source)?;
        self.bind_side(rel, Side::Target, target)?;
        Ok(rel)
    }

    /// Create a relationship from `source` to `target`, seen from the target.
    pub fn add_relationship_from(
        &mut self,
        target: ElementHandle,
        source: ElementHandle,
        kind: RelationshipType,
    ) -> Result<RelationshipHandle, ModelError> {
        self.add_relationship_to(source, target, kind)
    }

    // ── Side binding ─────────────────────────────────────────────────

    /// Attach `element` to one side of `relationship`.
    ///
    /// Afterwards the element's `relations_to` (source) or `relations_from`
    /// (target) contains the relationship exactly once. Binding the element
    /// already on that side is a no-op and returns `false`. Rebinding to a
    /// different element does not remove the previous element's entry; use
    /// [`ModelArena::unbind_side`] for that.
    pub fn bind_side(
        &mut self,
        relationship: RelationshipHandle,
        side: Side,
        element: ElementHandle,
    ) -> Result<bool, ModelError> {
        self.check_element(element)?;
        let rel = self
            .relationships
            .get_mut(relationship.index())
            .ok_or(ModelError::UnknownRelationship(relationship))?;

        let slot = rel.side_mut(side);
        if slot.element == Some(element) {
            return Ok(false);
        }
        slot.element = Some(element);

        let list = self.relation_list_mut(element, side);
        if !list.contains(&relationship) {
            list.push(relationship);
        }
        Ok(true)
    }

    /// Clear one side of `relationship`, removing it from the previously
    /// bound element's relation list. Returns the element that was bound.
    pub fn unbind_side(
        &mut self,
        relationship: RelationshipHandle,
        side: Side,
    ) -> Result<Option<ElementHandle>, ModelError> {
        let rel = self
            .relationships
            .get_mut(relationship.index())
            .ok_or(ModelError::UnknownRelationship(relationship))?;

        let Some(previous) = rel.side_mut(side).element.take() else {
            return Ok(None);
        };
        self.relation_list_mut(previous, side)
            .retain(|r| *r != relationship);
        Ok(Some(previous))
    }

    fn relation_list_mut(&mut self, element: ElementHandle, side: Side) -> &mut Vec<RelationshipHandle> {
        let elem = &mut self.elements[element.index()];
        match side {
            Side::Source => &mut elem.relations_to,
            Side::Target => &mut elem.relations_from,
        }
    }

    fn check_element(&self, element: ElementHandle) -> Result<(), ModelError> {
        if element.index() < self.elements.len() {
            Ok(())
        } else {
            Err(ModelError::UnknownElement(element))
        }
    }

    // ── Lookup ───────────────────────────────────────────────────────

    pub fn element(&self, handle: ElementHandle) -> Option<&ClassDiagramElement> {
        self.elements.get(handle.index())
    }

    /// Mutable access for members and names. Relation lists stay read-only.
    pub fn element_mut(&mut self, handle: ElementHandle) -> Option<&mut ClassDiagramElement> {
        self.elements.get_mut(handle.index())
    }

    pub fn relationship(&self, handle: RelationshipHandle) -> Option<&ClassRelationship> {
        self.relationships.get(handle.index())
    }

    pub fn relationship_mut(&mut self, handle: RelationshipHandle) -> Option<&mut ClassRelationship> {
        self.relationships.get_mut(handle.index())
    }

    pub fn elements(&self) -> impl Iterator<Item = (ElementHandle, &ClassDiagramElement)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (ElementHandle(i as u32), e))
    }

    pub fn relationships(&self) -> impl Iterator<Item = (RelationshipHandle, &ClassRelationship)> {
        self.relationships
            .iter()
            .enumerate()
            .map(|(i, r)| (RelationshipHandle(i as u32), r))
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Find an element by its external id (linear scan).
    pub fn find_element(&self, id: &str) -> Option<ElementHandle> {
        self.elements()
            .find(|(_, e)| e.id().as_str() == id)
            .map(|(h, _)| h)
    }

    /// Find a relationship by its external id (linear scan).
    pub fn find_relationship(&self, id: &ObjectId) -> Option<RelationshipHandle> {
        self.relationships()
            .find(|(_, r)| r.id() == id)
            .map(|(h, _)| h)
    }
}
