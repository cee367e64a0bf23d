//! Forward-reference resolution keyed by external id.
//!
//! XMI nodes reference each other by `xmi:id`, often before the referenced
//! node has been read. Instead of re-scanning the tree for every reference,
//! the deserializer records a [`PendingAction`] under the referenced id and
//! the resolver applies it once the id is bound to an instance:
//!
//! ```text
//! defer("EAID_2", SetTarget(r0))       pending:  EAID_2 → [SetTarget(r0)]
//! register("EAID_2", Element(e1))      bound:    EAID_2 → e1
//! flush(arena, strict)                 arena.bind_side(r0, Target, e1)
//! ```
//!
//! Actions for one id run in the order they were deferred, each exactly once.

use std::collections::VecDeque;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{info, trace, warn};

use crate::model::{ModelArena, ModelError, ModelHandle, ObjectId, RelationshipHandle, Side};

/// Errors raised by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Strict flush found an id nobody registered.
    #[error("Couldn't associate given referred object id: {id} with any known instance.")]
    IdMismatch { id: ObjectId },

    /// An id was registered for two different instances.
    #[error("Object id {id} is already bound to another instance.")]
    Conflict {
        id: ObjectId,
        existing: ModelHandle,
        rejected: ModelHandle,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Mutation to run once the referenced instance is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    /// Bind the resolved element as the relationship's source.
    SetSource(RelationshipHandle),
    /// Bind the resolved element as the relationship's target.
    SetTarget(RelationshipHandle),
}

impl PendingAction {
    pub fn for_side(side: Side, relationship: RelationshipHandle) -> Self {
        match side {
            Side::Source => Self::SetSource(relationship),
            Side::Target => Self::SetTarget(relationship),
        }
    }

    pub fn relationship(&self) -> RelationshipHandle {
        match *self {
            Self::SetSource(r) | Self::SetTarget(r) => r,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            Self::SetSource(_) => Side::Source,
            Self::SetTarget(_) => Side::Target,
        }
    }
}

/// Outcome of one [`ForwardResolver::flush`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Actions executed against a resolved element.
    pub applied: usize,
    /// Actions dropped because the id resolved to something other than an element.
    pub rejected: usize,
    /// Ids still waiting for a registration (permissive flush only).
    pub unresolved: Vec<ObjectId>,
}

/// Id → instance map plus per-id queues of pending actions.
#[derive(Debug, Default)]
pub struct ForwardResolver {
    id_to_instance: IndexMap<ObjectId, ModelHandle>,
    pending: IndexMap<ObjectId, VecDeque<PendingAction>>,
}

impl ForwardResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `id` to `instance`.
    ///
    /// Registering the same pair twice is a no-op. Rebinding an id to a
    /// different instance fails with [`ResolveError::Conflict`] and keeps the
    /// first binding.
    pub fn register(&mut self, id: ObjectId, instance: ModelHandle) -> Result<(), ResolveError> {
        match self.id_to_instance.get(&id) {
            Some(&existing) if existing == instance => Ok(()),
            Some(&existing) => Err(ResolveError::Conflict {
                id,
                existing,
                rejected: instance,
            }),
            None => {
                trace!(%id, ?instance, "registered instance");
                self.id_to_instance.insert(id, instance);
                Ok(())
            }
        }
    }

    /// Queue `action` until `id` resolves. Valid before or after registration.
    pub fn defer(&mut self, id: ObjectId, action: PendingAction) {
        trace!(%id, ?action, "deferred action");
        self.pending.entry(id).or_default().push_back(action);
    }

    pub fn instance(&self, id: &str) -> Option<ModelHandle> {
        self.id_to_instance.get(id).copied()
    }

    pub fn registered_count(&self) -> usize {
        self.id_to_instance.len()
    }

    /// Pending actions in flush order.
    pub fn pending(&self) -> impl Iterator<Item = (&ObjectId, &PendingAction)> {
        self.pending
            .iter()
            .flat_map(|(id, queue)| queue.iter().map(move |action| (id, action)))
    }

    pub fn pending_count(&self) -> usize {
        self.pending.values().map(VecDeque::len).sum()
    }

    /// Run every pending action whose id is registered.
    ///
    /// With `strict` the first unregistered id fails the flush with
    /// [`ResolveError::IdMismatch`]; queues already drained stay drained.
    /// Otherwise unregistered ids are logged, reported and kept for a later
    /// flush. Drained queues are removed, so repeating a flush without new
    /// registrations or deferrals runs nothing.
    pub fn flush(&mut self, arena: &mut ModelArena, strict: bool) -> Result<FlushReport, ResolveError> {
        let outcome = self.drain_ready(arena, strict);
        self.pending.retain(|_, queue| !queue.is_empty());
        outcome
    }

    fn drain_ready(&mut self, arena: &mut ModelArena, strict: bool) -> Result<FlushReport, ResolveError> {
        let mut report = FlushReport::default();

        for (id, queue) in self.pending.iter_mut() {
            let Some(&instance) = self.id_to_instance.get(id) else {
                if strict {
                    return Err(ResolveError::IdMismatch { id: id.clone() });
                }
                info!(%id, "Couldn't associate given referred object id with any known instance.");
                report.unresolved.push(id.clone());
                continue;
            };

            while let Some(action) = queue.pop_front() {
                match instance {
                    ModelHandle::Element(element) => {
                        arena.bind_side(action.relationship(), action.side(), element)?;
                        trace!(%id, ?action, "applied pending action");
                        report.applied += 1;
                    }
                    ModelHandle::Relationship(_) => {
                        warn!(
                            %id,
                            ?action,
                            "relationship end refers to another relationship, dropping"
                        );
                        report.rejected += 1;
                    }
                }
            }
        }

        Ok(report)
    }
}
