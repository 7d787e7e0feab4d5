//! Shanten (distance to a complete hand).
//!
//! The discard selector only depends on [`ShantenCalculator`]; any backend with
//! the same contract can be plugged in. [`StandardShanten`] is the bundled one.
use crate::hand::tiles_to_counts;
use crate::tile::{TILE_KINDS, Tile};

/// Returned for an empty hand instead of asking the backend. It is a marker
/// worse than any real shanten, not a meaningful distance.
pub const EMPTY_HAND_SHANTEN: i8 = 99;

const YAOKYUU: [usize; 13] = [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];

pub trait ShantenCalculator: Send + Sync {
    /// `counts` is a 34-kind count vector of a concealed hand and `len_div3`
    /// the number of sets the hand still has to form (`tiles / 3`).
    ///
    /// 0 means tenpai, -1 a complete hand, higher values are further away.
    fn calc(&self, counts: &[u8; TILE_KINDS], len_div3: u8) -> i8;
}

/// Shanten of `tiles`, or [`EMPTY_HAND_SHANTEN`] when there are none.
pub fn shanten_of(calc: &dyn ShantenCalculator, tiles: &[Tile]) -> i8 {
    if tiles.is_empty() {
        return EMPTY_HAND_SHANTEN;
    }
    let counts = tiles_to_counts(tiles);
    calc.calc(&counts, (tiles.len() / 3) as u8)
}

/// Minimum over the standard form, seven pairs and thirteen orphans.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardShanten;

impl ShantenCalculator for StandardShanten {
    fn calc(&self, counts: &[u8; TILE_KINDS], len_div3: u8) -> i8 {
        let mut shanten = calc_normal(counts, len_div3);
        if len_div3 == 4 {
            shanten = shanten.min(calc_chitoi(counts)).min(calc_kokushi(counts));
        }
        shanten
    }
}

pub fn calc_normal(counts: &[u8; TILE_KINDS], len_div3: u8) -> i8 {
    let mut tiles = *counts;
    let mut best = i8::MAX;
    search_normal(&mut tiles, 0, len_div3 as i8, 0, 0, false, &mut best);
    best
}

fn search_normal(
    tiles: &mut [u8; TILE_KINDS],
    start: usize,
    sets: i8,
    mentsu: i8,
    taatsu: i8,
    has_pair: bool,
    best: &mut i8,
) {
    let Some(i) = (start..TILE_KINDS).find(|&i| tiles[i] > 0) else {
        let taatsu = taatsu.min(sets - mentsu);
        let shanten = 2 * (sets - mentsu) - taatsu - has_pair as i8;
        *best = (*best).min(shanten);
        return;
    };
    let suited = i < 27;
    let pos = i % 9;
    let room = mentsu + taatsu < sets;

    if tiles[i] >= 3 && mentsu < sets {
        tiles[i] -= 3;
        search_normal(tiles, i, sets, mentsu + 1, taatsu, has_pair, best);
        tiles[i] += 3;
    }
    if suited && pos <= 6 && tiles[i + 1] > 0 && tiles[i + 2] > 0 && mentsu < sets {
        tiles[i] -= 1;
        tiles[i + 1] -= 1;
        tiles[i + 2] -= 1;
        search_normal(tiles, i, sets, mentsu + 1, taatsu, has_pair, best);
        tiles[i] += 1;
        tiles[i + 1] += 1;
        tiles[i + 2] += 1;
    }
    if tiles[i] >= 2 {
        tiles[i] -= 2;
        if !has_pair {
            search_normal(tiles, i, sets, mentsu, taatsu, true, best);
        }
        if room {
            search_normal(tiles, i, sets, mentsu, taatsu + 1, has_pair, best);
        }
        tiles[i] += 2;
    }
    if room && suited {
        for gap in [1, 2] {
            if pos + gap <= 8 && tiles[i + gap] > 0 {
                tiles[i] -= 1;
                tiles[i + gap] -= 1;
                search_normal(tiles, i, sets, mentsu, taatsu + 1, has_pair, best);
                tiles[i] += 1;
                tiles[i + gap] += 1;
            }
        }
    }

    // leave one copy isolated
    tiles[i] -= 1;
    search_normal(tiles, i, sets, mentsu, taatsu, has_pair, best);
    tiles[i] += 1;
}

pub fn calc_chitoi(counts: &[u8; TILE_KINDS]) -> i8 {
    let pairs = counts.iter().filter(|&&c| c >= 2).count() as i8;
    let kinds = counts.iter().filter(|&&c| c >= 1).count() as i8;
    6 - pairs + (7 - kinds).max(0)
}

pub fn calc_kokushi(counts: &[u8; TILE_KINDS]) -> i8 {
    let kinds = YAOKYUU.iter().filter(|&&i| counts[i] >= 1).count() as i8;
    let has_pair = YAOKYUU.iter().any(|&i| counts[i] >= 2);
    13 - kinds - has_pair as i8
}
