//! Core tile types: Color, Rank, Tile, Wildcard

use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Color {
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Blue, Color::Black, Color::Red, Color::Green];

    /// Single-letter notation: `B`, `K`, `R`, `G`.
    pub const fn letter(self) -> char {
        match self {
            Color::Blue => 'B',
            Color::Black => 'K',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }
}

/// Tile rank, always within `1..=13`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(u8);

impl Rank {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 13;

    pub fn new(value: u8) -> Option<Rank> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Rank(value))
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Next rank, wrapping 13 to 1.
    pub const fn wrapping_next(self) -> Rank {
        if self.0 == Self::MAX {
            Rank(Self::MIN)
        } else {
            Rank(self.0 + 1)
        }
    }

    pub fn all() -> impl Iterator<Item = Rank> {
        (Self::MIN..=Self::MAX).map(Rank)
    }
}

/// A physical tile. Two copies of every numbered tile exist, plus two jokers.
///
/// Ordering is color then rank, with jokers after every numbered tile.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Tile {
    Numbered { color: Color, rank: Rank },
    Joker,
}

impl Tile {
    /// Numbered tile from a raw rank.
    ///
    /// # Panics
    ///
    /// Panics when `rank` is outside `1..=13`. Untrusted input goes through
    /// [`str::parse`] instead, which reports a `ParseTile` error.
    pub fn new(color: Color, rank: u8) -> Tile {
        match Rank::new(rank) {
            Some(rank) => Tile::Numbered { color, rank },
            None => panic!("tile rank out of range: {rank}"),
        }
    }

    pub const fn color(self) -> Option<Color> {
        match self {
            Tile::Numbered { color, .. } => Some(color),
            Tile::Joker => None,
        }
    }

    pub const fn rank(self) -> Option<Rank> {
        match self {
            Tile::Numbered { rank, .. } => Some(rank),
            Tile::Joker => None,
        }
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Tile::Joker)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Numbered { color, rank } => write!(f, "{}{}", color.letter(), rank.get()),
            Tile::Joker => f.write_str("JK"),
        }
    }
}

/// The round's wildcard: the tile one rank above the indicator, same color.
///
/// Both tiles matching these fields and both jokers substitute for any tile.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Wildcard {
    pub color: Color,
    pub rank: Rank,
}

impl Wildcard {
    /// Derive from the indicator. Jokers never serve as indicator.
    pub fn from_indicator(indicator: Tile) -> Option<Wildcard> {
        match indicator {
            Tile::Numbered { color, rank } => Some(Wildcard {
                color,
                rank: rank.wrapping_next(),
            }),
            Tile::Joker => None,
        }
    }

    pub fn matches(&self, tile: Tile) -> bool {
        match tile {
            Tile::Joker => true,
            Tile::Numbered { color, rank } => color == self.color && rank == self.rank,
        }
    }

    pub fn tile(&self) -> Tile {
        Tile::Numbered {
            color: self.color,
            rank: self.rank,
        }
    }
}
