// Proptest generators for tile-domain types.

use proptest::prelude::*;

use crate::domain::dealing::full_tile_set;
use crate::domain::tiles_types::{Color, Tile, Wildcard};

pub fn color() -> impl Strategy<Value = Color> {
    prop_oneof![
        Just(Color::Blue),
        Just(Color::Black),
        Just(Color::Red),
        Just(Color::Green),
    ]
}

pub fn rank() -> impl Strategy<Value = u8> {
    1u8..=13
}

/// Any tile, jokers included (roughly 1 in 27).
pub fn tile() -> impl Strategy<Value = Tile> {
    prop_oneof![
        26 => (color(), rank()).prop_map(|(c, r)| Tile::new(c, r)),
        1 => Just(Tile::Joker),
    ]
}

pub fn wildcard() -> impl Strategy<Value = Wildcard> {
    (color(), rank()).prop_map(|(c, r)| Wildcard::from_indicator(Tile::new(c, r)).unwrap())
}

/// 3 to 5 tiles skewed toward one color and nearby ranks, so runs and sets
/// both show up often.
pub fn group_candidate() -> impl Strategy<Value = Vec<Tile>> {
    prop_oneof![
        prop::collection::vec(tile(), 3..=5),
        (color(), 1u8..=11, 3usize..=5, any::<bool>()).prop_map(|(c, start, len, joker)| {
            let mut tiles: Vec<Tile> = (0..len)
                .map(|i| Tile::new(c, ((start as usize - 1 + i) % 13 + 1) as u8))
                .collect();
            if joker {
                tiles[len / 2] = Tile::Joker;
            }
            tiles
        }),
        (rank(), 3usize..=4).prop_map(|(r, len)| Color::ALL[..len].iter().map(|&c| Tile::new(c, r)).collect()),
    ]
}

/// `count` tiles sampled without replacement from the physical set.
pub fn tiles_from_set(count: usize) -> impl Strategy<Value = Vec<Tile>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut set = full_tile_set();
        for i in 0..count.min(set.len()) {
            let j = rng.random_range(i..set.len());
            set.swap(i, j);
        }
        set.truncate(count);
        set
    })
}
