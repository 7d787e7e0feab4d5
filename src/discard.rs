//! Heuristic discard choice.
//!
//! Every distinct tile in the hand is tried as the discard. The remaining
//! tiles are scored by potential han minus a penalty per step of shanten,
//! with an extra penalty for throwing away a dora.
use crate::config::DiscardConfig;
use crate::hand::{HandValue, estimate_value};
use crate::shanten::{ShantenCalculator, StandardShanten, shanten_of};
use crate::tile::{Tile, tiles_to_string};
use serde::Serialize;

/// Scores at or below this never win; the first candidate is used instead.
const SENTINEL_SCORE: i32 = -9999;

/// A full concealed hand plus the drawn tile.
pub const MAX_HAND_TILES: usize = 14;

/// One possible discard and what the hand looks like without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscardCandidate {
    pub tile: Tile,
    pub shanten: i8,
    pub value: HandValue,
    pub score: i32,
}

impl DiscardCandidate {
    pub fn to_candidate_string(&self) -> String {
        let yaku = self.value.yaku.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        format!(
            "{:<14}{:>4} shanten {:>3} han {:>6}{}",
            self.tile.to_string(),
            self.shanten,
            self.value.han,
            self.score,
            if !yaku.is_empty() { format!("  {yaku}") } else { "".to_owned() }
        )
    }
}

pub struct DiscardSelector {
    config: DiscardConfig,
    shanten: Box<dyn ShantenCalculator>,
}

impl DiscardSelector {
    pub fn new(config: DiscardConfig) -> Self {
        Self::with_calculator(config, StandardShanten)
    }

    pub fn with_calculator(config: DiscardConfig, calculator: impl ShantenCalculator + 'static) -> Self {
        Self {
            config,
            shanten: Box::new(calculator),
        }
    }

    pub fn config(&self) -> &DiscardConfig {
        &self.config
    }

    /// Score every distinct discard in `(suit, rank)` order.
    ///
    /// Empty when there is nothing to decide: an empty hand, one whose size is
    /// a multiple of three (no tile has been drawn), or one larger than
    /// [`MAX_HAND_TILES`].
    pub fn evaluate(&self, hand: &[Tile], doras: &[Tile]) -> Vec<DiscardCandidate> {
        if hand.is_empty() || hand.len() % 3 == 0 {
            return vec![];
        }
        if hand.len() > MAX_HAND_TILES {
            log::warn!(
                "{} tiles is more than a hand, not choosing a discard: {}",
                hand.len(),
                tiles_to_string(hand)
            );
            return vec![];
        }

        let mut unique = hand.to_vec();
        unique.sort_unstable();
        unique.dedup();

        unique
            .into_iter()
            .map(|tile| {
                let mut rest = hand.to_vec();
                if let Some(index) = rest.iter().position(|&t| t == tile) {
                    rest.remove(index);
                }
                let shanten = shanten_of(self.shanten.as_ref(), &rest);
                let value = estimate_value(&rest, doras);
                let mut score = value.han as i32 - shanten as i32 * self.config.shanten_weight;
                if doras.contains(&tile) {
                    score -= self.config.dora_discard_penalty;
                }
                DiscardCandidate {
                    tile,
                    shanten,
                    value,
                    score,
                }
            })
            .collect()
    }

    /// The recommended discard, `None` when [`Self::evaluate`] has nothing to offer.
    pub fn choose(&self, hand: &[Tile], doras: &[Tile]) -> Option<Tile> {
        let candidates = self.evaluate(hand, doras);
        let choice = pick(&candidates);
        if let Some(tile) = choice {
            log::debug!("discard {tile} from {}", tiles_to_string(hand));
        }
        choice
    }
}

/// First candidate with the highest score. Falls back to the first candidate
/// when none beats [`SENTINEL_SCORE`].
pub fn pick(candidates: &[DiscardCandidate]) -> Option<Tile> {
    let first = candidates.first()?;
    let mut best_score = SENTINEL_SCORE;
    let mut best = None;
    for candidate in candidates {
        if candidate.score > best_score {
            best_score = candidate.score;
            best = Some(candidate.tile);
        }
    }
    Some(best.unwrap_or(first.tile))
}
