//! Projection of a [`Snapshot`] into drawable sprites.
//!
//! Sprites are emitted in paint order (tiles, food, homes, ants, enemies) so
//! a surface can draw them front to back without sorting.

use replay_core::{
    ColorKey, EntityCategory, EntityKind, EntityRecord, HexBounds, HexCoord, Layout, Point,
    Snapshot, SnapshotStats, is_drawn, visible_cells,
};

/// Hexagon radius of each category relative to the cell size.
pub const fn sprite_scale(category: EntityCategory) -> f64 {
    match category {
        EntityCategory::Tile => 1.0,
        EntityCategory::Food => 0.4,
        EntityCategory::Home => 0.8,
        EntityCategory::Ant => 0.6,
        EntityCategory::Enemy => 0.5,
    }
}

/// One entity placed in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub kind: EntityCategory,
    pub coord: HexCoord,
    pub center: Point,
    pub color: ColorKey,
    pub scale: f64,
    pub label: Option<String>,
    /// Carried food: color and amount.
    pub badge: Option<(ColorKey, u32)>,
    /// Planned move, starting at `center`.
    pub path: Vec<Point>,
}

/// `(entityType, pixelX, pixelY, colorKey)` tuple consumed by a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    pub kind: EntityCategory,
    pub x: f64,
    pub y: f64,
    pub color: ColorKey,
}

/// Everything a surface needs to paint one turn.
#[derive(Clone, Debug)]
pub struct FrameView {
    pub turn: u64,
    pub game_turn: Option<i64>,
    pub player: Option<String>,
    pub recorded_at: Option<String>,
    pub stats: SnapshotStats,
    pub bounds: Option<HexBounds>,
    pub sprites: Vec<Sprite>,
}

impl FrameView {
    pub fn project(snapshot: &Snapshot, layout: &Layout) -> Self {
        let visible = visible_cells(snapshot);
        let mut drawn: Vec<&EntityRecord> = snapshot
            .entities
            .iter()
            .filter(|entity| is_drawn(entity.category(), entity.position, &visible))
            .collect();
        // Stable: records of one category keep their stored order.
        drawn.sort_by_key(|entity| entity.category());

        Self {
            turn: snapshot.turn,
            game_turn: snapshot.game_turn,
            player: snapshot.player.clone(),
            recorded_at: snapshot.recorded_at.clone(),
            stats: snapshot.stats(),
            bounds: snapshot.bounds(),
            sprites: drawn
                .into_iter()
                .map(|entity| sprite(entity, layout))
                .collect(),
        }
    }

    pub fn draw_calls(&self) -> impl Iterator<Item = DrawCall> + '_ {
        self.sprites.iter().map(|sprite| DrawCall {
            kind: sprite.kind,
            x: sprite.center.x,
            y: sprite.center.y,
            color: sprite.color,
        })
    }

    pub fn sprites_of(&self, kind: EntityCategory) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(move |sprite| sprite.kind == kind)
    }
}

fn sprite(entity: &EntityRecord, layout: &Layout) -> Sprite {
    let center = layout.hex_to_pixel(entity.position);
    let kind = entity.category();
    let mut badge = None;
    let mut path = Vec::new();

    let label = match &entity.kind {
        EntityKind::Tile { .. } | EntityKind::Home { .. } => None,
        EntityKind::Food { amount, .. } => Some(amount.to_string()),
        EntityKind::Enemy { health, .. } => Some(health.to_string()),
        EntityKind::Ant {
            caste,
            health,
            attack,
            cargo,
            planned_path,
            ..
        } => {
            badge = cargo.map(|c| (ColorKey::Food(c.food), c.amount));
            if !planned_path.is_empty() {
                path.push(center);
                path.extend(planned_path.iter().map(|&step| layout.hex_to_pixel(step)));
            }
            let initial = caste.name().chars().next().unwrap_or('?');
            Some(format!("{initial} H:{health} A:{}", attack.unwrap_or(0)))
        }
    };

    Sprite {
        kind,
        coord: entity.position,
        center,
        color: entity.color,
        scale: sprite_scale(kind),
        label,
        badge,
        path,
    }
}

/// Text lines describing everything at `coord`, for the cell info panel.
pub fn describe_cell(snapshot: &Snapshot, coord: HexCoord) -> Vec<String> {
    let mut lines = vec![format!("Hex {coord}")];
    let here: Vec<&EntityRecord> = snapshot.entities_at(coord).collect();

    for entity in &here {
        match &entity.kind {
            EntityKind::Home { main } => {
                lines.push(format!(
                    "Home base: {}",
                    if *main { "Main" } else { "Secondary" }
                ));
            }
            EntityKind::Tile { terrain, cost } => match cost {
                Some(cost) => lines.push(format!("Tile: {} (cost {cost})", terrain.name())),
                None => lines.push(format!("Tile: {}", terrain.name())),
            },
            EntityKind::Food { food, amount } => {
                lines.push(format!("Food: {} x{amount}", food.name()));
            }
            _ => {}
        }
    }

    let ants: Vec<_> = here
        .iter()
        .filter_map(|entity| match &entity.kind {
            EntityKind::Ant {
                id,
                caste,
                health,
                attack,
                cargo,
                ..
            } => Some((id, caste, health, attack, cargo)),
            _ => None,
        })
        .collect();
    if !ants.is_empty() {
        lines.push("Ants:".to_string());
        for (id, caste, health, attack, cargo) in ants {
            lines.push(format!("- {} ({id})", caste.name()));
            lines.push(format!("  Health: {health}  Attack: {}", attack.unwrap_or(0)));
            if let Some(cargo) = cargo {
                lines.push(format!("  Carrying: {} {}", cargo.amount, cargo.food.name()));
            }
        }
    }

    let enemies: Vec<_> = here
        .iter()
        .filter_map(|entity| match &entity.kind {
            EntityKind::Enemy {
                caste,
                health,
                attack,
                ..
            } => Some((caste, health, attack)),
            _ => None,
        })
        .collect();
    if !enemies.is_empty() {
        lines.push("Enemies:".to_string());
        for (caste, health, attack) in enemies {
            lines.push(format!(
                "- {} Health: {health}  Attack: {}",
                caste.name(),
                attack.unwrap_or(0)
            ));
        }
    }

    if lines.len() == 1 {
        lines.push("Nothing recorded here".to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use replay_core::{AntCaste, Cargo, FoodKind, TerrainKind};

    fn record(q: i32, r: i32, kind: EntityKind) -> EntityRecord {
        EntityRecord::new(HexCoord::new(q, r), kind)
    }

    fn scene() -> Snapshot {
        let mut snapshot = Snapshot::new(7);
        snapshot.entities = vec![
            // Stored out of paint order on purpose.
            record(
                1,
                0,
                EntityKind::Enemy {
                    caste: AntCaste::Warrior,
                    health: 35,
                    attack: Some(70),
                    cargo: None,
                },
            ),
            record(
                0,
                0,
                EntityKind::Ant {
                    id: "w1".into(),
                    caste: AntCaste::Worker,
                    health: 130,
                    attack: Some(30),
                    cargo: Some(Cargo {
                        food: FoodKind::Apple,
                        amount: 5,
                    }),
                    planned_path: vec![HexCoord::new(0, 1), HexCoord::new(0, 2)],
                    last_move: Vec::new(),
                },
            ),
            record(
                0,
                0,
                EntityKind::Tile {
                    terrain: TerrainKind::Nest,
                    cost: Some(1),
                },
            ),
            // Beyond the worker's sight.
            record(
                6,
                0,
                EntityKind::Tile {
                    terrain: TerrainKind::Stone,
                    cost: None,
                },
            ),
            record(0, 0, EntityKind::Home { main: true }),
            record(
                -1,
                1,
                EntityKind::Food {
                    food: FoodKind::Bread,
                    amount: 9,
                },
            ),
        ];
        snapshot
    }

    #[test]
    fn sprites_follow_paint_order() {
        let frame = FrameView::project(&scene(), &Layout::flat(10.0));
        let kinds: Vec<_> = frame.sprites.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [
                EntityCategory::Tile,
                EntityCategory::Food,
                EntityCategory::Home,
                EntityCategory::Ant,
                EntityCategory::Enemy,
            ]
        );
    }

    #[test]
    fn hidden_cells_are_skipped() {
        let frame = FrameView::project(&scene(), &Layout::flat(10.0));
        assert!(frame.sprites.iter().all(|s| s.coord != HexCoord::new(6, 0)));
        assert_eq!(frame.stats.tiles, 2);
    }

    #[test]
    fn draw_calls_carry_pixel_centers() {
        let layout = Layout::flat(10.0);
        let frame = FrameView::project(&scene(), &layout);
        let enemy = frame
            .draw_calls()
            .find(|call| call.kind == EntityCategory::Enemy)
            .unwrap();
        let expected = layout.hex_to_pixel(HexCoord::new(1, 0));
        assert_eq!((enemy.x, enemy.y), (expected.x, expected.y));
        assert_eq!(enemy.color, ColorKey::Enemy);
    }

    #[test]
    fn ant_sprite_has_label_badge_and_path() {
        let frame = FrameView::project(&scene(), &Layout::flat(10.0));
        let ant = frame.sprites_of(EntityCategory::Ant).next().unwrap();
        assert_eq!(ant.label.as_deref(), Some("W H:130 A:30"));
        assert_eq!(ant.badge, Some((ColorKey::Food(FoodKind::Apple), 5)));
        assert_eq!(ant.path.len(), 3);
        assert_eq!(ant.path[0], ant.center);
        assert_eq!(ant.scale, 0.6);

        let food = frame.sprites_of(EntityCategory::Food).next().unwrap();
        assert_eq!(food.label.as_deref(), Some("9"));
        let enemy = frame.sprites_of(EntityCategory::Enemy).next().unwrap();
        assert_eq!(enemy.label.as_deref(), Some("35"));
    }

    #[test]
    fn describes_stacked_cell() {
        let lines = describe_cell(&scene(), HexCoord::ORIGIN);
        assert_eq!(lines[0], "Hex 0,0");
        assert!(lines.contains(&"Tile: Nest (cost 1)".to_string()));
        assert!(lines.contains(&"Home base: Main".to_string()));
        assert!(lines.contains(&"- Worker (w1)".to_string()));
        assert!(lines.contains(&"  Carrying: 5 Apple".to_string()));
    }

    #[test]
    fn describes_empty_cell() {
        let lines = describe_cell(&scene(), HexCoord::new(-5, -5));
        assert_eq!(lines, ["Hex -5,-5", "Nothing recorded here"]);
    }

    #[test]
    fn projects_cells_at_the_i32_edge() {
        let body = r#"{"ants": [{"id": "edge", "type": 2, "q": 2147483647, "r": 0,
            "lastMove": [{"q": -2147483648, "r": 2147483647}]}],
            "food": [{"type": 1, "q": -2147483648, "r": -2147483648, "amount": 1}]}"#;
        let snapshot = replay_store::decode_record(0, None, body).unwrap();
        let frame = FrameView::project(&snapshot, &Layout::flat(10.0));
        assert_eq!(frame.sprites.len(), 2);
        assert_eq!(frame.bounds.map(|b| b.columns()), Some(1 << 32));
        let ant = frame.sprites_of(EntityCategory::Ant).next().unwrap();
        assert_eq!(ant.coord, HexCoord::new(i32::MAX, 0));
    }
}
