use thiserror::Error;

use crate::EntityId;

/// Errors raised by [`ComponentTable`](super::ComponentTable). Every variant
/// is an invariant violation: the caller either built an entity wrong or ran
/// systems out of order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentTableError {
    /// `add` was called for an entity that already has a value in the table
    #[error("{table} table already contains a component for entity {entity}")]
    AlreadyExists {
        table: &'static str,
        entity: EntityId,
    },

    /// `update` or `require` was called for an entity that has no value in
    /// the table
    #[error("{table} table does not contain a component for entity {entity}")]
    NotFound {
        table: &'static str,
        entity: EntityId,
    },
}
