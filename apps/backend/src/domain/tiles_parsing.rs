//! Tile notation: `R7`, `K13`, `JK`.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::tiles_types::{Color, Rank, Tile};
use crate::errors::domain::{DomainError, ValidationKind};

impl FromStr for Color {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Color::Blue),
            "K" => Ok(Color::Black),
            "R" => Ok(Color::Red),
            "G" => Ok(Color::Green),
            _ => Err(DomainError::validation(
                ValidationKind::ParseTile,
                format!("unknown color: {s}"),
            )),
        }
    }
}

impl FromStr for Tile {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "JK" {
            return Ok(Tile::Joker);
        }
        let malformed = || DomainError::validation(ValidationKind::ParseTile, format!("malformed tile: {s:?}"));
        if !s.is_ascii() || s.len() < 2 {
            return Err(malformed());
        }
        let (color, rank) = s.split_at(1);
        let color: Color = color.parse()?;
        let rank = rank
            .parse::<u8>()
            .ok()
            .and_then(Rank::new)
            .ok_or_else(malformed)?;
        Ok(Tile::Numbered { color, rank })
    }
}

/// Parse whitespace-separated tile notation, e.g. `"R1 R2 R3 JK"`.
pub fn parse_tiles(notation: &str) -> Result<Vec<Tile>, DomainError> {
    notation.split_whitespace().map(str::parse).collect()
}

impl Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            Color::Blue => "BLUE",
            Color::Black => "BLACK",
            Color::Red => "RED",
            Color::Green => "GREEN",
        };
        serializer.serialize_str(s)
    }
}

impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.get())
    }
}
