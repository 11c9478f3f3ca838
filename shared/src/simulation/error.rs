use thiserror::Error;

use crate::{component_table::ComponentTableError, EntityId};

/// Errors that abort a simulated frame. All of them mean the registry no
/// longer holds what the systems expect, and the peer cannot continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// A system needed a component the entity does not have
    #[error("Entity {entity} is missing its {table} component. Entity factories must attach every component a system requires")]
    MissingComponent {
        table: &'static str,
        entity: EntityId,
    },

    /// An entity was given the same component twice
    #[error("Entity {entity} already has a {table} component")]
    DuplicateComponent {
        table: &'static str,
        entity: EntityId,
    },
}

impl From<ComponentTableError> for SimulationError {
    fn from(err: ComponentTableError) -> Self {
        match err {
            ComponentTableError::NotFound { table, entity } => {
                SimulationError::MissingComponent { table, entity }
            }
            ComponentTableError::AlreadyExists { table, entity } => {
                SimulationError::DuplicateComponent { table, entity }
            }
        }
    }
}
