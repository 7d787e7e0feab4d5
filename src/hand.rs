//! Hand helpers: the 34-kind count vector and a rough value estimate.
use crate::dora::count_dora;
use crate::tile::{TILE_KINDS, Tile};
use serde::Serialize;
use std::fmt;

/// Count of each tile kind in `tiles`, indexed by [`Tile::as_usize`].
pub fn tiles_to_counts(tiles: &[Tile]) -> [u8; TILE_KINDS] {
    let mut counts = [0; TILE_KINDS];
    for tile in tiles {
        counts[tile.as_usize()] += 1;
    }
    counts
}

/// Descriptive label attached to a value estimate. Display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Yaku {
    Tanyao,
    Yakuhai(Tile),
    Dora(u8),
}

impl fmt::Display for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Yaku::Tanyao => write!(f, "Tanyao"),
            Yaku::Yakuhai(tile) => write!(f, "Yakuhai ({})", tile.rank_word()),
            Yaku::Dora(n) => write!(f, "Dora {n}"),
        }
    }
}

/// Potential han of a partial hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HandValue {
    pub han: u8,
    pub dora: u8,
    pub tanyao: bool,
    pub yaku: Vec<Yaku>,
}

/// Estimate how much a hand could be worth if it were completed as is.
///
/// This only looks for all-simples, honor triplets and dora; it never checks
/// that the tiles actually form a winning shape.
pub fn estimate_value(tiles: &[Tile], doras: &[Tile]) -> HandValue {
    if tiles.is_empty() {
        return HandValue::default();
    }

    let mut value = HandValue::default();

    if tiles.iter().all(|t| t.is_simple()) {
        value.tanyao = true;
        value.han += 1;
        value.yaku.push(Yaku::Tanyao);
    }

    // honor triplets only, seat and round winds are not told apart
    let counts = tiles_to_counts(tiles);
    for (index, &count) in counts.iter().enumerate().skip(27) {
        if count >= 3
            && let Some(tile) = Tile::from_index(index)
        {
            value.han += 1;
            value.yaku.push(Yaku::Yakuhai(tile));
        }
    }

    value.dora = count_dora(tiles, doras);
    if value.dora > 0 {
        value.han += value.dora;
        value.yaku.push(Yaku::Dora(value.dora));
    }

    value
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::tile::test::{hand, t};

    #[test]
    pub fn count_vector_slots() {
        let counts = tiles_to_counts(&hand("19m 19p 19s 1234567z 1m"));
        assert_eq!(counts.iter().map(|&c| c as usize).sum::<usize>(), 14);
        for index in [8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33] {
            assert_eq!(counts[index], 1, "slot {index}");
        }
        assert_eq!(counts[0], 2);
        assert_eq!(counts[t("wind_east").as_usize()], 1);
        assert_eq!(counts[t("dragon_green").as_usize()], 1);
        assert_eq!(tiles_to_counts(&[]), [0; TILE_KINDS]);
    }

    #[test]
    pub fn tanyao() {
        let simples = hand("234m 567p 345s");
        let value = estimate_value(&simples, &[]);
        assert!(value.tanyao);
        assert!(value.han >= 1);
        assert_eq!(value.yaku, vec![Yaku::Tanyao]);

        let mut with_terminal = simples.clone();
        with_terminal.push(t("man1"));
        let value = estimate_value(&with_terminal, &[]);
        assert!(!value.tanyao);
        assert_eq!(value.han, 0);

        let mut with_honor = simples;
        with_honor.push(t("wind_west"));
        assert!(!estimate_value(&with_honor, &[]).tanyao);
        assert!(!estimate_value(&[], &[]).tanyao);
    }

    #[test]
    pub fn honor_triplets() {
        let value = estimate_value(&hand("123m 5555z 777z 111z 22z"), &[]);
        assert_eq!(value.han, 3);
        assert_eq!(
            value.yaku,
            vec![
                Yaku::Yakuhai(t("wind_east")),
                Yaku::Yakuhai(t("dragon_white")),
                Yaku::Yakuhai(t("dragon_red"))
            ]
        );
        assert_eq!(value.yaku[1].to_string(), "Yakuhai (white)");

        // numbered triplets are not yakuhai
        assert_eq!(estimate_value(&hand("111m 999p"), &[]).han, 0);
    }

    #[test]
    pub fn dora_adds_han() {
        let tiles = hand("2234m 567p 55z");
        let value = estimate_value(&tiles, &[t("man2"), t("dragon_white")]);
        assert_eq!(value.dora, 4);
        assert_eq!(value.han, 4);
        assert_eq!(value.yaku, vec![Yaku::Dora(4)]);

        let value = estimate_value(&hand("2234m 567p"), &[t("man2")]);
        assert_eq!(value.han, 3);
        assert!(value.tanyao);
    }
}
