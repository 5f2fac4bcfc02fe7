//! Fog of war: which cells the player currently sees.

use std::collections::HashSet;

use crate::hex::HexCoord;
use crate::state::{EntityCategory, EntityKind, Snapshot};

/// Cells visible in `snapshot`.
///
/// Home cells, every cell within an ant's vision radius, the cells an ant
/// walked last turn, and every cell holding an enemy or food.
pub fn visible_cells(snapshot: &Snapshot) -> HashSet<HexCoord> {
    let mut visible = HashSet::new();
    for entity in &snapshot.entities {
        match &entity.kind {
            EntityKind::Home { .. } | EntityKind::Enemy { .. } | EntityKind::Food { .. } => {
                visible.insert(entity.position);
            }
            EntityKind::Ant {
                caste, last_move, ..
            } => {
                visible.extend(entity.position.within(caste.vision_radius()));
                visible.extend(last_move.iter().copied());
            }
            EntityKind::Tile { .. } => {}
        }
    }
    visible
}

/// Whether an entity of `category` at `cell` should be drawn.
///
/// Own ants are always drawn; everything else only on visible cells.
pub fn is_drawn(category: EntityCategory, cell: HexCoord, visible: &HashSet<HexCoord>) -> bool {
    category == EntityCategory::Ant || visible.contains(&cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AntCaste, EntityRecord, FoodKind};

    fn ant_at(coord: HexCoord, caste: AntCaste, last_move: Vec<HexCoord>) -> EntityRecord {
        EntityRecord::new(
            coord,
            EntityKind::Ant {
                id: "a".into(),
                caste,
                health: 10,
                attack: None,
                cargo: None,
                planned_path: Vec::new(),
                last_move,
            },
        )
    }

    #[test]
    fn vision_radius_depends_on_caste() {
        let mut snapshot = Snapshot::new(0);
        snapshot.entities = vec![ant_at(HexCoord::ORIGIN, AntCaste::Worker, Vec::new())];
        assert_eq!(visible_cells(&snapshot).len(), 7);

        snapshot.entities = vec![ant_at(HexCoord::ORIGIN, AntCaste::Scout, Vec::new())];
        let visible = visible_cells(&snapshot);
        assert_eq!(visible.len(), 61);
        assert!(visible.contains(&HexCoord::new(4, -4)));
        assert!(!visible.contains(&HexCoord::new(5, 0)));
    }

    #[test]
    fn trail_and_objects_are_visible() {
        let far = HexCoord::new(10, 10);
        let food = HexCoord::new(-8, 2);
        let mut snapshot = Snapshot::new(0);
        snapshot.entities = vec![
            ant_at(HexCoord::ORIGIN, AntCaste::Warrior, vec![far]),
            EntityRecord::new(
                food,
                EntityKind::Food {
                    food: FoodKind::Nectar,
                    amount: 2,
                },
            ),
            EntityRecord::new(HexCoord::new(20, 0), EntityKind::Home { main: false }),
        ];
        let visible = visible_cells(&snapshot);
        assert!(visible.contains(&far));
        assert!(visible.contains(&food));
        assert!(visible.contains(&HexCoord::new(20, 0)));
        assert!(!visible.contains(&HexCoord::new(9, 10)));
    }

    #[test]
    fn ants_are_drawn_everywhere() {
        let visible = HashSet::new();
        assert!(is_drawn(EntityCategory::Ant, HexCoord::new(3, 3), &visible));
        assert!(!is_drawn(EntityCategory::Tile, HexCoord::new(3, 3), &visible));
        assert!(!is_drawn(EntityCategory::Enemy, HexCoord::new(3, 3), &visible));
    }

    #[test]
    fn vision_at_the_i32_edge() {
        let edge = HexCoord::new(i32::MAX, 0);
        let mut snapshot = Snapshot::new(0);
        snapshot.entities = vec![
            ant_at(edge, AntCaste::Worker, vec![HexCoord::new(i32::MIN, i32::MIN)]),
        ];
        let visible = visible_cells(&snapshot);
        assert_eq!(visible.len(), 6);
        assert!(visible.contains(&edge));
        assert!(visible.contains(&HexCoord::new(i32::MIN, i32::MIN)));
    }
}
