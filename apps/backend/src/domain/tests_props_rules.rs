/// Property-based tests for group legality, decomposition and dealing.
use std::collections::HashMap;

use proptest::prelude::*;

use crate::domain::dealing::{deal_round, full_tile_set};
use crate::domain::groups::{is_valid_group, is_valid_run, is_valid_set};
use crate::domain::hand_analysis::{analyze_hand, HandAnalysis, SearchBudget};
use crate::domain::rules::DECK_AFTER_DEAL;
use crate::domain::test_gens;
use crate::domain::tiles_types::{Color, Tile, Wildcard};
use crate::domain::winning::check_pairs_winning;

fn counts(tiles: impl IntoIterator<Item = Tile>) -> HashMap<Tile, usize> {
    let mut m = HashMap::new();
    for t in tiles {
        *m.entry(t).or_insert(0) += 1;
    }
    m
}

/// Two four-tile runs and two three-tile sets, shuffled.
fn decomposable_hand() -> impl Strategy<Value = Vec<Tile>> {
    (
        test_gens::color(),
        1u8..=10,
        test_gens::color(),
        1u8..=10,
        test_gens::rank(),
        0usize..4,
        test_gens::rank(),
        0usize..4,
    )
        .prop_map(|(c1, s1, c2, s2, r1, o1, r2, o2)| {
            let mut hand = Vec::with_capacity(14);
            for (c, s) in [(c1, s1), (c2, s2)] {
                hand.extend((s..s + 4).map(|r| Tile::new(c, r)));
            }
            for (r, offset) in [(r1, o1), (r2, o2)] {
                hand.extend((0..3).map(|i| Tile::new(Color::ALL[(offset + i) % 4], r)));
            }
            hand
        })
        .prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: a group is valid exactly when it is a valid run or a valid set.
    #[test]
    fn prop_group_is_run_or_set(tiles in test_gens::group_candidate(), wc in test_gens::wildcard()) {
        prop_assert_eq!(
            is_valid_group(&tiles, wc),
            is_valid_run(&tiles, wc) || is_valid_set(&tiles, wc)
        );
    }

    /// Property: 11-12-13-1 always wraps; 13-1-2 never does.
    #[test]
    fn prop_circular_wrap(color in test_gens::color(), wc in test_gens::wildcard()) {
        let wrap: Vec<Tile> = [11, 12, 13, 1].iter().map(|&r| Tile::new(color, r)).collect();
        let past_one: Vec<Tile> = [13, 1, 2].iter().map(|&r| Tile::new(color, r)).collect();
        prop_assume!(!wrap.iter().chain(&past_one).any(|&t| wc.matches(t)));
        prop_assert!(is_valid_run(&wrap, wc));
        prop_assert!(!is_valid_run(&past_one, wc));
    }

    /// Property: groups never exceed their size bounds.
    #[test]
    fn prop_sets_have_at_most_four(tiles in prop::collection::vec(test_gens::tile(), 5..=8), wc in test_gens::wildcard()) {
        prop_assert!(!is_valid_set(&tiles, wc));
    }

    /// Property: decomposition is sound on arbitrary 14-tile hands.
    #[test]
    fn prop_analysis_sound_on_random_hands(hand in test_gens::tiles_from_set(14), wc in test_gens::wildcard()) {
        if let HandAnalysis::Complete { groups } = analyze_hand(&hand, wc, SearchBudget::default()).unwrap() {
            for g in &groups {
                prop_assert!(is_valid_group(g, wc), "invalid group {:?}", g);
            }
            prop_assert_eq!(counts(groups.into_iter().flatten()), counts(hand));
        }
    }

    /// Property: hands built from valid groups always decompose, soundly.
    #[test]
    fn prop_constructed_hands_decompose(hand in decomposable_hand(), wc in test_gens::wildcard()) {
        let analysis = analyze_hand(&hand, wc, SearchBudget::default()).unwrap();
        let groups = analysis.groups().map(<[Vec<Tile>]>::to_vec);
        prop_assert!(groups.is_some(), "no decomposition for {:?}", hand);
        let groups = groups.unwrap();
        for g in &groups {
            prop_assert!(is_valid_group(g, wc));
            prop_assert!((3..=4).contains(&g.len()));
        }
        prop_assert_eq!(counts(groups.into_iter().flatten()), counts(hand));
    }

    /// Property: seven doubled tiles always make a pairs hand.
    #[test]
    fn prop_doubled_tiles_pair(singles in prop::collection::vec(test_gens::tile(), 7), wc in test_gens::wildcard()) {
        let mut hand: Vec<Tile> = singles.iter().flat_map(|&t| [t, t]).collect();
        hand.reverse();
        let pairs = check_pairs_winning(&hand, wc).unwrap();
        prop_assert_eq!(pairs.map(|p| p.len()), Some(7));
    }

    /// Property: dealing partitions the full set with nothing lost or invented.
    #[test]
    fn prop_deal_partitions_tile_set(seed in any::<u64>()) {
        let dealt = deal_round(seed).unwrap();
        prop_assert_eq!(dealt.deck.len(), DECK_AFTER_DEAL);
        let sizes: Vec<usize> = dealt.hands.iter().map(Vec::len).collect();
        prop_assert_eq!(sizes.iter().sum::<usize>(), 57);
        prop_assert_eq!(sizes[dealt.starting_seat as usize], 15);
        prop_assert_eq!(Some(dealt.wildcard), Wildcard::from_indicator(dealt.indicator));

        let everything = dealt
            .hands
            .iter()
            .flatten()
            .copied()
            .chain(dealt.deck.iter().copied())
            .chain(std::iter::once(dealt.indicator));
        prop_assert_eq!(counts(everything), counts(full_tile_set()));
    }
}
