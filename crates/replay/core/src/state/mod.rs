//! Decoded per-turn arena state.
//!
//! A [`Snapshot`] is immutable once built. Readers assemble it from a stored
//! record; the viewer only ever looks at it.

mod entity;

pub use entity::{
    AntCaste, Cargo, EntityCategory, EntityKind, EntityRecord, FoodKind, Owner, TerrainKind,
};

use crate::hex::{HexBounds, HexCoord};

/// Complete recorded state for one turn.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// 0-based position of the record in the store.
    pub turn: u64,
    /// Timestamp column of the stored row, verbatim.
    pub recorded_at: Option<String>,
    /// Turn number reported by the game server.
    pub game_turn: Option<i64>,
    pub player: Option<String>,
    pub score: Option<i64>,
    /// Seconds until the server advances to the next turn.
    pub next_turn_in: Option<f64>,
    /// Main anthill cell.
    pub spot: Option<HexCoord>,
    pub entities: Vec<EntityRecord>,
}

impl Snapshot {
    pub fn new(turn: u64) -> Self {
        Self {
            turn,
            ..Self::default()
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities_of(&self, category: EntityCategory) -> impl Iterator<Item = &EntityRecord> {
        self.entities
            .iter()
            .filter(move |entity| entity.category() == category)
    }

    pub fn entities_at(&self, coord: HexCoord) -> impl Iterator<Item = &EntityRecord> {
        self.entities
            .iter()
            .filter(move |entity| entity.position == coord)
    }

    /// Extent of every tile in the map, or of all entities when the map is empty.
    pub fn bounds(&self) -> Option<HexBounds> {
        HexBounds::from_cells(self.entities_of(EntityCategory::Tile).map(|e| e.position))
            .or_else(|| HexBounds::from_cells(self.entities.iter().map(|e| e.position)))
    }

    pub fn stats(&self) -> SnapshotStats {
        let mut stats = SnapshotStats {
            score: self.score,
            ..SnapshotStats::default()
        };
        for entity in &self.entities {
            match &entity.kind {
                EntityKind::Ant { cargo, .. } => {
                    stats.ants += 1;
                    if let Some(cargo) = cargo {
                        stats.carried_food += u64::from(cargo.amount);
                    }
                }
                EntityKind::Enemy { .. } => stats.enemies += 1,
                EntityKind::Food { amount, .. } => {
                    stats.food_cells += 1;
                    stats.food_amount += u64::from(*amount);
                }
                EntityKind::Home { .. } => stats.home_cells += 1,
                EntityKind::Tile { .. } => stats.tiles += 1,
            }
        }
        stats
    }
}

/// Aggregate counters derived from a [`Snapshot`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotStats {
    pub ants: usize,
    pub enemies: usize,
    pub food_cells: usize,
    pub food_amount: u64,
    pub carried_food: u64,
    pub home_cells: usize,
    pub tiles: usize,
    pub score: Option<i64>,
}
