use strum::{Display, EnumIter};

use crate::hex::HexCoord;
use crate::palette::ColorKey;

/// Broad entity category, in paint order (later categories draw on top).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityCategory {
    Tile,
    Food,
    Home,
    Ant,
    Enemy,
}

/// Side an entity belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Owner {
    Player,
    Enemy,
    Neutral,
}

/// Terrain type of a map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Nest,
    Empty,
    Dirt,
    Acid,
    Stone,
    Unknown(i64),
}

impl TerrainKind {
    pub const KNOWN: [Self; 5] = [Self::Nest, Self::Empty, Self::Dirt, Self::Acid, Self::Stone];

    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Nest,
            2 => Self::Empty,
            3 => Self::Dirt,
            4 => Self::Acid,
            5 => Self::Stone,
            other => Self::Unknown(other),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Nest => "Nest",
            Self::Empty => "Empty",
            Self::Dirt => "Dirt",
            Self::Acid => "Acid",
            Self::Stone => "Stone",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// Ant caste, shared by own ants and enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AntCaste {
    Worker,
    Warrior,
    Scout,
    Unknown(i64),
}

impl AntCaste {
    pub const KNOWN: [Self; 3] = [Self::Worker, Self::Warrior, Self::Scout];

    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Worker,
            1 => Self::Warrior,
            2 => Self::Scout,
            other => Self::Unknown(other),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Worker => "Worker",
            Self::Warrior => "Warrior",
            Self::Scout => "Scout",
            Self::Unknown(_) => "Unknown",
        }
    }

    /// Radius of cells this caste reveals around itself.
    pub const fn vision_radius(self) -> u32 {
        match self {
            Self::Scout => 4,
            Self::Worker | Self::Warrior | Self::Unknown(_) => 1,
        }
    }
}

/// Food resource type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FoodKind {
    Apple,
    Bread,
    Nectar,
    Unknown(i64),
}

impl FoodKind {
    pub const KNOWN: [Self; 3] = [Self::Apple, Self::Bread, Self::Nectar];

    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Apple,
            2 => Self::Bread,
            3 => Self::Nectar,
            other => Self::Unknown(other),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Apple => "Apple",
            Self::Bread => "Bread",
            Self::Nectar => "Nectar",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// Food carried by an ant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cargo {
    pub food: FoodKind,
    pub amount: u32,
}

/// Per-kind payload of an [`EntityRecord`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Tile {
        terrain: TerrainKind,
        cost: Option<u32>,
    },
    Food {
        food: FoodKind,
        amount: u32,
    },
    Home {
        /// The cell is the main spot of the anthill.
        main: bool,
    },
    Ant {
        id: String,
        caste: AntCaste,
        health: i32,
        attack: Option<i32>,
        cargo: Option<Cargo>,
        /// Cells the ant is ordered to walk this turn.
        planned_path: Vec<HexCoord>,
        /// Cells the ant walked last turn.
        last_move: Vec<HexCoord>,
    },
    Enemy {
        caste: AntCaste,
        health: i32,
        attack: Option<i32>,
        cargo: Option<Cargo>,
    },
}

impl EntityKind {
    pub const fn category(&self) -> EntityCategory {
        match self {
            Self::Tile { .. } => EntityCategory::Tile,
            Self::Food { .. } => EntityCategory::Food,
            Self::Home { .. } => EntityCategory::Home,
            Self::Ant { .. } => EntityCategory::Ant,
            Self::Enemy { .. } => EntityCategory::Enemy,
        }
    }

    pub const fn owner(&self) -> Owner {
        match self {
            Self::Ant { .. } | Self::Home { .. } => Owner::Player,
            Self::Enemy { .. } => Owner::Enemy,
            Self::Tile { .. } | Self::Food { .. } => Owner::Neutral,
        }
    }

    pub const fn color_key(&self) -> ColorKey {
        match self {
            Self::Tile { terrain, .. } => ColorKey::Terrain(*terrain),
            Self::Food { food, .. } => ColorKey::Food(*food),
            Self::Home { .. } => ColorKey::Home,
            Self::Ant { caste, .. } => ColorKey::Ant(*caste),
            Self::Enemy { .. } => ColorKey::Enemy,
        }
    }
}

/// One game object in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityRecord {
    pub position: HexCoord,
    pub kind: EntityKind,
    pub owner: Owner,
    pub color: ColorKey,
}

impl EntityRecord {
    /// Builds a record whose owner and color follow from `kind`.
    pub fn new(position: HexCoord, kind: EntityKind) -> Self {
        let owner = kind.owner();
        let color = kind.color_key();
        Self {
            position,
            kind,
            owner,
            color,
        }
    }

    pub const fn category(&self) -> EntityCategory {
        self.kind.category()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_known_kinds() {
        assert_eq!(TerrainKind::from_code(4), TerrainKind::Acid);
        assert_eq!(TerrainKind::from_code(9), TerrainKind::Unknown(9));
        assert_eq!(AntCaste::from_code(2), AntCaste::Scout);
        assert_eq!(AntCaste::from_code(-1), AntCaste::Unknown(-1));
        assert_eq!(FoodKind::from_code(3), FoodKind::Nectar);
        assert_eq!(FoodKind::from_code(0).name(), "Unknown");
    }

    #[test]
    fn scouts_see_further() {
        assert_eq!(AntCaste::Scout.vision_radius(), 4);
        assert_eq!(AntCaste::Worker.vision_radius(), 1);
        assert_eq!(AntCaste::Warrior.vision_radius(), 1);
        assert_eq!(AntCaste::Unknown(7).vision_radius(), 1);
    }

    #[test]
    fn record_derives_owner_and_color() {
        let enemy = EntityRecord::new(
            HexCoord::new(1, 2),
            EntityKind::Enemy {
                caste: AntCaste::Warrior,
                health: 40,
                attack: Some(10),
                cargo: None,
            },
        );
        assert_eq!(enemy.owner, Owner::Enemy);
        assert_eq!(enemy.color, ColorKey::Enemy);
        assert_eq!(enemy.category(), EntityCategory::Enemy);

        let tile = EntityRecord::new(
            HexCoord::ORIGIN,
            EntityKind::Tile {
                terrain: TerrainKind::Dirt,
                cost: Some(2),
            },
        );
        assert_eq!(tile.owner, Owner::Neutral);
        assert_eq!(tile.color, ColorKey::Terrain(TerrainKind::Dirt));
    }

    #[test]
    fn categories_sort_in_paint_order() {
        assert!(EntityCategory::Tile < EntityCategory::Food);
        assert!(EntityCategory::Home < EntityCategory::Ant);
        assert!(EntityCategory::Ant < EntityCategory::Enemy);
    }
}
