//! Bonus tiles derived from revealed indicators.
use crate::tile::{Dragon, Rank, Tile, Wind};

/// Convert a dora indicator into the dora tile it designates.
///
/// Numbered suits advance one rank with 9 wrapping to 1, winds cycle
/// east-south-west-north and dragons cycle white-green-red.
pub const fn indicator_to_dora(indicator: Tile) -> Tile {
    match indicator {
        Tile::Man(r) => Tile::Man(next_rank(r)),
        Tile::Pin(r) => Tile::Pin(next_rank(r)),
        Tile::Sou(r) => Tile::Sou(next_rank(r)),
        Tile::Wind(w) => Tile::Wind(match w {
            Wind::East => Wind::South,
            Wind::South => Wind::West,
            Wind::West => Wind::North,
            Wind::North => Wind::East,
        }),
        Tile::Dragon(d) => Tile::Dragon(match d {
            Dragon::White => Dragon::Green,
            Dragon::Green => Dragon::Red,
            Dragon::Red => Dragon::White,
        }),
    }
}

const fn next_rank(rank: Rank) -> Rank {
    match Rank::new(rank.get() % 9 + 1) {
        Some(r) => r,
        None => rank,
    }
}

/// Number of tiles in `tiles` that are dora. Every hand tile counts once per
/// occurrence in the hand, however many indicators point at it.
pub fn count_dora(tiles: &[Tile], doras: &[Tile]) -> u8 {
    tiles.iter().filter(|tile| doras.contains(tile)).count() as u8
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::tile::TILE_KINDS;
    use crate::tile::test::{hand, t};

    #[test]
    pub fn known_indicators() {
        assert_eq!(indicator_to_dora(t("wind_east")), t("wind_south"));
        assert_eq!(indicator_to_dora(t("wind_north")), t("wind_east"));
        assert_eq!(indicator_to_dora(t("man9")), t("man1"));
        assert_eq!(indicator_to_dora(t("pin4")), t("pin5"));
        assert_eq!(indicator_to_dora(t("sou8")), t("sou9"));
        assert_eq!(indicator_to_dora(t("dragon_red")), t("dragon_white"));
        assert_eq!(indicator_to_dora(t("dragon_white")), t("dragon_green"));
    }

    #[test]
    pub fn cycles_within_suit() {
        for index in 0..TILE_KINDS {
            let start = Tile::from_index(index).unwrap();
            let period = if start.is_honor() {
                if matches!(start, Tile::Wind(_)) { 4 } else { 3 }
            } else {
                9
            };
            let mut tile = start;
            for step in 1..=period {
                tile = indicator_to_dora(tile);
                assert_eq!(tile.suit(), start.suit());
                assert_eq!(tile == start, step == period, "{start} after {step} steps");
            }
        }
    }

    #[test]
    pub fn dora_counting() {
        let tiles = hand("1123m 5p 55z");
        assert_eq!(count_dora(&tiles, &[]), 0);
        assert_eq!(count_dora(&tiles, &[t("man1")]), 2);
        assert_eq!(count_dora(&tiles, &[t("man1"), t("man1")]), 2);
        assert_eq!(count_dora(&tiles, &[t("man1"), t("dragon_white")]), 4);
        assert_eq!(count_dora(&tiles, &[t("pin6")]), 0);
    }
}
