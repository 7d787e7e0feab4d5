//! Table state assembled from what the reader recognized.
use crate::dora::indicator_to_dora;
use crate::error::{Error, Result};
use crate::tile::{Tile, Wind, tiles_to_string};
use derivative::Derivative;
use serde::Serialize;
use tinyvec::ArrayVec;

/// Indicators that can be revealed in one hand: the initial one plus four kans.
pub const MAX_DORA_INDICATORS: usize = 5;
pub const STARTING_SCORE: i32 = 25000;
/// Live wall size after the deal.
pub const STARTING_WALL: u32 = 70;

/// Open meld
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meld {
    /// Called tiles, four for a kan
    pub tiles: ArrayVec<[Tile; 4]>,
}

#[derive(Debug, Clone, Serialize, Derivative)]
#[derivative(Default)]
pub struct Player {
    pub name: String,
    /// Tiles in recognition order
    pub hand: Vec<Tile>,
    /// Discarded tiles, oldest first
    pub discards: Vec<Tile>,
    pub melds: Vec<Meld>,
    #[derivative(Default(value = "STARTING_SCORE"))]
    pub score: i32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Derivative)]
#[derivative(Default)]
pub struct GameState {
    #[derivative(Default(value = "std::array::from_fn(|i| Player::new(format!(\"Player {}\", i + 1)))"))]
    pub players: [Player; 4],
    pub current_player: usize,
    #[derivative(Default(value = "Wind::East"))]
    pub round_wind: Wind,
    #[derivative(Default(value = "1"))]
    pub round_number: u8,
    dora_indicators: ArrayVec<[Tile; MAX_DORA_INDICATORS]>,
    /// `doras[i]` is always the tile designated by `dora_indicators[i]`
    doras: ArrayVec<[Tile; MAX_DORA_INDICATORS]>,
    #[derivative(Default(value = "STARTING_WALL"))]
    pub wall_size: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    /// Swap in a freshly recognized hand for `seat`.
    pub fn replace_hand(&mut self, seat: usize, tiles: Vec<Tile>) {
        self.players[seat].hand = tiles;
    }

    /// Record a revealed indicator and return the dora it designates.
    ///
    /// Both lists grow together; once [`MAX_DORA_INDICATORS`] are revealed
    /// further indicators are refused and nothing changes.
    pub fn add_dora_indicator(&mut self, indicator: Tile) -> Result<Tile> {
        if self.dora_indicators.len() == MAX_DORA_INDICATORS {
            return Err(Error::DoraOverflow {
                max: MAX_DORA_INDICATORS,
            });
        }
        let dora = indicator_to_dora(indicator);
        self.dora_indicators.push(indicator);
        self.doras.push(dora);
        Ok(dora)
    }

    pub fn dora_indicators(&self) -> &[Tile] {
        &self.dora_indicators
    }

    pub fn doras(&self) -> &[Tile] {
        &self.doras
    }

    pub fn to_log_string(&self) -> String {
        fn join(tiles: &[Tile]) -> String {
            tiles.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
        }
        let players_string = self
            .players
            .iter()
            .enumerate()
            .map(|(i, player)| {
                let melds_string = player
                    .melds
                    .iter()
                    .map(|meld| format!("[{}]", tiles_to_string(&meld.tiles)))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!(
                    "{}{} ({}): {}{}{}",
                    if i == self.current_player { "*" } else { " " },
                    player.name,
                    player.score,
                    if player.hand.is_empty() {
                        "-".to_owned()
                    } else {
                        tiles_to_string(&player.hand)
                    },
                    if !melds_string.is_empty() {
                        format!(" {melds_string}")
                    } else {
                        "".to_owned()
                    },
                    if !player.discards.is_empty() {
                        format!("\n    discards: {}", join(&player.discards))
                    } else {
                        "".to_owned()
                    },
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "{} {} - wall {}\ndora indicators: {} | dora: {}\n{}",
            self.round_wind.as_str(),
            self.round_number,
            self.wall_size,
            if self.dora_indicators.is_empty() {
                "-".to_owned()
            } else {
                join(&self.dora_indicators)
            },
            if self.doras.is_empty() { "-".to_owned() } else { join(&self.doras) },
            players_string,
        )
    }
}
