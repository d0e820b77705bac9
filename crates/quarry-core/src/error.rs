//! Interaction errors

use glam::IVec2;
use quarry_materials::{BlockKind, ItemKind};
use thiserror::Error;

use crate::world::WorldError;

pub type InteractionResult<T> = Result<T, InteractionError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InteractionError {
    #[error("unknown drop category: {0}")]
    UnknownDropCategory(String),

    #[error("no effect defined for '{0}'")]
    NoEffectDefined(String),

    #[error("{kind} at {cell} was already mined")]
    AlreadyMined { kind: BlockKind, cell: IVec2 },

    #[error("cannot place {0} drops at once")]
    MultiDropPlacement(usize),

    #[error("no room for {0} in hotbar or inventory")]
    InventoryFull(ItemKind),

    #[error("cell {0} is already occupied")]
    CellOccupied(IVec2),

    #[error("cell {0} is outside the world")]
    OutOfBounds(IVec2),

    #[error("world error: {0}")]
    World(#[from] WorldError),
}

impl InteractionError {
    /// Fatal errors abort the session; the rest are logged and the tick goes on
    pub fn is_fatal(&self) -> bool {
        match self {
            InteractionError::UnknownDropCategory(_)
            | InteractionError::NoEffectDefined(_)
            | InteractionError::AlreadyMined { .. }
            | InteractionError::MultiDropPlacement(_) => true,
            InteractionError::InventoryFull(_)
            | InteractionError::CellOccupied(_)
            | InteractionError::OutOfBounds(_) => false,
            InteractionError::World(err) => err.is_fatal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;

    #[test]
    fn test_fatal_taxonomy() {
        assert!(InteractionError::UnknownDropCategory("effect".into()).is_fatal());
        assert!(InteractionError::NoEffectDefined("mana 3".into()).is_fatal());
        assert!(InteractionError::MultiDropPlacement(2).is_fatal());
        assert!(InteractionError::AlreadyMined {
            kind: BlockKind::Dirt,
            cell: IVec2::new(1, 1)
        }
        .is_fatal());

        assert!(!InteractionError::InventoryFull(ItemKind::Dirt).is_fatal());
        assert!(!InteractionError::CellOccupied(IVec2::ZERO).is_fatal());
        assert!(!InteractionError::OutOfBounds(IVec2::new(-1, 0)).is_fatal());
    }

    #[test]
    fn test_world_errors_convert() {
        let err: InteractionError = WorldError::CellOccupied(IVec2::new(2, 3)).into();
        assert!(!err.is_fatal());

        let err: InteractionError = WorldError::UnknownEntity(EntityId::from_raw(99_999)).into();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            InteractionError::NoEffectDefined("mana 3".into()).to_string(),
            "no effect defined for 'mana 3'"
        );
    }
}
