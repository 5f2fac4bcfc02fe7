//! Display colors for every entity kind.
//!
//! Each [`ColorKey`] maps to a fill color and a contrasting text color. The
//! drawing surface decides how to render them; this module only names them.

use std::fmt;

use strum::{Display, EnumIter, IntoEnumIterator};

use crate::state::{AntCaste, FoodKind, TerrainKind};

/// 24-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Self = Self(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self(0xFF, 0xFF, 0xFF);

    /// Parses `#RRGGBB` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Fill and text color pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swatch {
    pub fill: Rgb,
    pub text: Rgb,
}

impl Swatch {
    const fn new(fill: Rgb, text: Rgb) -> Self {
        Self { fill, text }
    }
}

/// Color key carried by each entity record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorKey {
    Terrain(TerrainKind),
    Ant(AntCaste),
    Food(FoodKind),
    Enemy,
    Home,
}

impl ColorKey {
    pub const fn swatch(self) -> Swatch {
        match self {
            Self::Terrain(terrain) => match terrain {
                TerrainKind::Nest => Swatch::new(Rgb(0xFF, 0x00, 0xFF), Rgb::WHITE),
                TerrainKind::Empty => Swatch::new(Rgb(0x40, 0x40, 0x40), Rgb::WHITE),
                TerrainKind::Dirt => Swatch::new(Rgb(0x8B, 0x45, 0x13), Rgb::WHITE),
                TerrainKind::Acid => Swatch::new(Rgb(0x00, 0xFF, 0x00), Rgb::BLACK),
                TerrainKind::Stone => Swatch::new(Rgb(0xC0, 0xC0, 0xC0), Rgb::BLACK),
                TerrainKind::Unknown(_) => Swatch::new(Rgb::BLACK, Rgb::WHITE),
            },
            Self::Ant(caste) => match caste {
                AntCaste::Worker => Swatch::new(Rgb(0xFF, 0xFF, 0x00), Rgb::BLACK),
                AntCaste::Warrior => Swatch::new(Rgb(0x8A, 0x2B, 0xE2), Rgb::WHITE),
                AntCaste::Scout => Swatch::new(Rgb(0x00, 0xFF, 0xFF), Rgb::BLACK),
                AntCaste::Unknown(_) => Swatch::new(Rgb::WHITE, Rgb::BLACK),
            },
            Self::Food(food) => match food {
                FoodKind::Apple => Swatch::new(Rgb(0xFF, 0x45, 0x00), Rgb::WHITE),
                FoodKind::Bread => Swatch::new(Rgb(0x32, 0xCD, 0x32), Rgb::BLACK),
                FoodKind::Nectar => Swatch::new(Rgb(0xFF, 0x69, 0xB4), Rgb::BLACK),
                FoodKind::Unknown(_) => Swatch::new(Rgb::WHITE, Rgb::BLACK),
            },
            Self::Enemy => Swatch::new(Rgb(0xFF, 0x00, 0x00), Rgb::BLACK),
            Self::Home => Swatch::new(Rgb(0x93, 0x70, 0xDB), Rgb::WHITE),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Terrain(terrain) => terrain.name(),
            Self::Ant(caste) => caste.name(),
            Self::Food(food) => food.name(),
            Self::Enemy => "Enemy",
            Self::Home => "Home",
        }
    }
}

/// Legend groups, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum LegendSection {
    Terrain,
    Ants,
    Food,
    Enemies,
    Other,
}

impl LegendSection {
    pub fn keys(self) -> Vec<ColorKey> {
        match self {
            Self::Terrain => TerrainKind::KNOWN.map(ColorKey::Terrain).to_vec(),
            Self::Ants => AntCaste::KNOWN.map(ColorKey::Ant).to_vec(),
            Self::Food => FoodKind::KNOWN.map(ColorKey::Food).to_vec(),
            Self::Enemies => vec![ColorKey::Enemy],
            Self::Other => vec![ColorKey::Home],
        }
    }
}

/// Every known color key grouped by section.
pub fn legend() -> Vec<(LegendSection, Vec<ColorKey>)> {
    LegendSection::iter()
        .map(|section| (section, section.keys()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb::from_hex("#8B4513"), Some(Rgb(0x8B, 0x45, 0x13)));
        assert_eq!(Rgb::from_hex("ff00ff"), Some(Rgb(0xFF, 0x00, 0xFF)));
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#GG0000"), None);
        assert_eq!(Rgb(0x93, 0x70, 0xDB).to_string(), "#9370DB");
    }

    #[test]
    fn known_kinds_use_fixed_colors() {
        let acid = ColorKey::Terrain(TerrainKind::Acid).swatch();
        assert_eq!(acid.fill.to_string(), "#00FF00");
        assert_eq!(acid.text, Rgb::BLACK);

        let warrior = ColorKey::Ant(AntCaste::Warrior).swatch();
        assert_eq!(warrior.fill.to_string(), "#8A2BE2");
        assert_eq!(warrior.text, Rgb::WHITE);

        assert_eq!(ColorKey::Enemy.swatch().fill.to_string(), "#FF0000");
    }

    #[test]
    fn unknown_kinds_fall_back() {
        let tile = ColorKey::Terrain(TerrainKind::Unknown(42)).swatch();
        assert_eq!((tile.fill, tile.text), (Rgb::BLACK, Rgb::WHITE));
        let ant = ColorKey::Ant(AntCaste::Unknown(9)).swatch();
        assert_eq!((ant.fill, ant.text), (Rgb::WHITE, Rgb::BLACK));
    }

    #[test]
    fn legend_lists_sections_in_order() {
        let legend = legend();
        let sections: Vec<_> = legend.iter().map(|(s, _)| s.to_string()).collect();
        assert_eq!(sections, ["Terrain", "Ants", "Food", "Enemies", "Other"]);
        assert_eq!(legend[0].1.len(), 5);
        assert_eq!(legend[0].1[0].name(), "Nest");
        assert_eq!(legend[4].1, vec![ColorKey::Home]);
    }
}
