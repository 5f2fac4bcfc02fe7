//! Pure building blocks for the ants replay viewer.
//!
//! - [`hex`]: axial hex coordinates, distance, neighbors and pixel layout.
//! - [`state`]: decoded per-turn snapshots and their entity records.
//! - [`palette`]: display colors per entity kind.
//! - [`visibility`]: the set of cells the player can see in a snapshot.
//!
//! Nothing here performs I/O; storage lives in `replay-store`.

pub mod hex;
pub mod palette;
pub mod state;
pub mod visibility;

pub use hex::{
    CubeCoord, HexBounds, HexCoord, HexDirection, Layout, OffsetCoord, Orientation, Point,
    distance, hex_to_pixel, neighbors,
};
pub use palette::{ColorKey, LegendSection, Rgb, Swatch, legend};
pub use state::{
    AntCaste, Cargo, EntityCategory, EntityKind, EntityRecord, FoodKind, Owner, Snapshot,
    SnapshotStats, TerrainKind,
};
pub use visibility::{is_drawn, visible_cells};
