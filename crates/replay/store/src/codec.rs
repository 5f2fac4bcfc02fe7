//! Decoding of stored arena documents into [`Snapshot`]s.
//!
//! Each stored row carries one JSON document as reported by the game server:
//!
//! ```text
//! { "ants": [..], "enemies": [..], "food": [..], "home": [..], "map": [..],
//!   "spot": {q, r}, "score": n, "turnNo": n, "playerName": s, "nextTurnIn": x }
//! ```
//!
//! Every record needs `q` and `r`; ants, enemies, tiles and food also need
//! `type`. Missing collections and `null` are read as empty.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use replay_core::{
    AntCaste, Cargo, EntityKind, EntityRecord, FoodKind, HexCoord, Snapshot, TerrainKind,
};

/// Reasons a stored record cannot be decoded.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("record body is not text")]
    NotText,

    #[error("invalid arena document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes the record at position `turn`.
pub fn decode_record(
    turn: u64,
    recorded_at: Option<String>,
    body: &str,
) -> Result<Snapshot, CodecError> {
    let document: ArenaDocument = serde_json::from_str(body)?;
    Ok(document.into_snapshot(turn, recorded_at))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArenaDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    ants: Vec<AntDto>,
    #[serde(default, deserialize_with = "null_as_empty")]
    enemies: Vec<EnemyDto>,
    #[serde(default, deserialize_with = "null_as_empty")]
    food: Vec<FoodDto>,
    #[serde(default, deserialize_with = "null_as_empty")]
    home: Vec<HomeDto>,
    #[serde(default, deserialize_with = "null_as_empty")]
    map: Vec<TileDto>,
    #[serde(default)]
    spot: Option<CoordDto>,
    #[serde(default)]
    score: Option<i64>,
    #[serde(default, alias = "turnNumber")]
    turn_no: Option<i64>,
    #[serde(default)]
    player_name: Option<String>,
    #[serde(default)]
    next_turn_in: Option<f64>,
}

#[derive(Clone, Copy, Deserialize)]
struct CoordDto {
    q: i32,
    r: i32,
}

impl From<CoordDto> for HexCoord {
    fn from(dto: CoordDto) -> Self {
        HexCoord::new(dto.q, dto.r)
    }
}

#[derive(Deserialize)]
struct CargoDto {
    #[serde(default, rename = "type")]
    kind: Option<i64>,
    #[serde(default)]
    amount: Option<u32>,
}

impl CargoDto {
    /// Empty hands are reported as a zero amount.
    fn into_cargo(self) -> Option<Cargo> {
        let amount = self.amount.unwrap_or(0);
        (amount > 0).then(|| Cargo {
            food: FoodKind::from_code(self.kind.unwrap_or(0)),
            amount,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AntDto {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(rename = "type")]
    kind: i64,
    q: i32,
    r: i32,
    #[serde(default)]
    health: Option<i32>,
    #[serde(default)]
    attack: Option<i32>,
    #[serde(default)]
    food: Option<CargoDto>,
    #[serde(default, deserialize_with = "null_as_empty")]
    last_move: Vec<CoordDto>,
    #[serde(default, rename = "move", deserialize_with = "null_as_empty")]
    planned: Vec<CoordDto>,
}

#[derive(Deserialize)]
struct EnemyDto {
    #[serde(rename = "type")]
    kind: i64,
    q: i32,
    r: i32,
    #[serde(default)]
    health: Option<i32>,
    #[serde(default)]
    attack: Option<i32>,
    #[serde(default)]
    food: Option<CargoDto>,
}

#[derive(Deserialize)]
struct FoodDto {
    #[serde(rename = "type")]
    kind: i64,
    q: i32,
    r: i32,
    #[serde(default)]
    amount: Option<u32>,
}

#[derive(Deserialize)]
struct HomeDto {
    q: i32,
    r: i32,
    #[serde(default)]
    spot: Option<bool>,
}

#[derive(Deserialize)]
struct TileDto {
    #[serde(rename = "type")]
    kind: i64,
    q: i32,
    r: i32,
    #[serde(default)]
    cost: Option<u32>,
}

fn id_text(id: Option<serde_json::Value>) -> String {
    match id {
        Some(serde_json::Value::String(text)) => text,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl ArenaDocument {
    fn into_snapshot(self, turn: u64, recorded_at: Option<String>) -> Snapshot {
        let spot = self.spot.map(HexCoord::from);
        let capacity = self.map.len()
            + self.food.len()
            + self.home.len()
            + self.ants.len()
            + self.enemies.len();
        let mut entities = Vec::with_capacity(capacity);

        entities.extend(self.map.into_iter().map(|tile| {
            EntityRecord::new(
                HexCoord::new(tile.q, tile.r),
                EntityKind::Tile {
                    terrain: TerrainKind::from_code(tile.kind),
                    cost: tile.cost,
                },
            )
        }));

        entities.extend(self.food.into_iter().map(|food| {
            EntityRecord::new(
                HexCoord::new(food.q, food.r),
                EntityKind::Food {
                    food: FoodKind::from_code(food.kind),
                    amount: food.amount.unwrap_or(0),
                },
            )
        }));

        entities.extend(self.home.into_iter().map(|home| {
            let position = HexCoord::new(home.q, home.r);
            let main = home.spot.unwrap_or(false) || spot == Some(position);
            EntityRecord::new(position, EntityKind::Home { main })
        }));

        entities.extend(self.ants.into_iter().map(|ant| {
            EntityRecord::new(
                HexCoord::new(ant.q, ant.r),
                EntityKind::Ant {
                    id: id_text(ant.id),
                    caste: AntCaste::from_code(ant.kind),
                    health: ant.health.unwrap_or(0),
                    attack: ant.attack,
                    cargo: ant.food.and_then(CargoDto::into_cargo),
                    planned_path: ant.planned.into_iter().map(HexCoord::from).collect(),
                    last_move: ant.last_move.into_iter().map(HexCoord::from).collect(),
                },
            )
        }));

        entities.extend(self.enemies.into_iter().map(|enemy| {
            EntityRecord::new(
                HexCoord::new(enemy.q, enemy.r),
                EntityKind::Enemy {
                    caste: AntCaste::from_code(enemy.kind),
                    health: enemy.health.unwrap_or(0),
                    attack: enemy.attack,
                    cargo: enemy.food.and_then(CargoDto::into_cargo),
                },
            )
        }));

        Snapshot {
            turn,
            recorded_at,
            game_turn: self.turn_no,
            player: self.player_name,
            score: self.score,
            next_turn_in: self.next_turn_in,
            spot,
            entities,
        }
    }
}
