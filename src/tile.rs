//! Tile values and their name tokens.
//!
//! A tile is identified only by suit and rank; two tiles with the same value
//! are interchangeable. Name tokens are the template names used by the
//! detector: `man1`..`sou9`, `wind_east`.., `dragon_white`..
use crate::error::{Error, Result};
use serde::Serialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// Number of distinct tile kinds.
pub const TILE_KINDS: usize = 34;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Man,
    Pin,
    Sou,
    Wind,
    Dragon,
}

impl Suit {
    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Man => "man",
            Suit::Pin => "pin",
            Suit::Sou => "sou",
            Suit::Wind => "wind",
            Suit::Dragon => "dragon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Wind {
    East,
    South,
    West,
    North,
}

impl Wind {
    pub const ALL: [Wind; 4] = [Wind::East, Wind::South, Wind::West, Wind::North];

    pub const fn as_str(self) -> &'static str {
        match self {
            Wind::East => "east",
            Wind::South => "south",
            Wind::West => "west",
            Wind::North => "north",
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.as_str() == word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dragon {
    White,
    Green,
    Red,
}

impl Dragon {
    pub const ALL: [Dragon; 3] = [Dragon::White, Dragon::Green, Dragon::Red];

    pub const fn as_str(self) -> &'static str {
        match self {
            Dragon::White => "white",
            Dragon::Green => "green",
            Dragon::Red => "red",
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == word)
    }
}

/// Rank of a numbered tile, always within `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    #[inline]
    pub const fn new(n: u8) -> Option<Self> {
        if n >= 1 && n <= 9 { Some(Self(n)) } else { None }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// A single tile value. The derived ordering is `(suit, rank)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr)]
pub enum Tile {
    Man(Rank),
    Pin(Rank),
    Sou(Rank),
    Wind(Wind),
    Dragon(Dragon),
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Man(Rank(1))
    }
}

impl Tile {
    /// Numbered tile of `suit`, `None` for honor suits or ranks outside 1-9.
    pub const fn number(suit: Suit, n: u8) -> Option<Self> {
        let Some(rank) = Rank::new(n) else {
            return None;
        };
        match suit {
            Suit::Man => Some(Tile::Man(rank)),
            Suit::Pin => Some(Tile::Pin(rank)),
            Suit::Sou => Some(Tile::Sou(rank)),
            Suit::Wind | Suit::Dragon => None,
        }
    }

    /// Inverse of [`Tile::as_usize`].
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0..=8 => Self::number(Suit::Man, index as u8 + 1),
            9..=17 => Self::number(Suit::Pin, index as u8 - 8),
            18..=26 => Self::number(Suit::Sou, index as u8 - 17),
            27..=30 => Some(Tile::Wind(Wind::ALL[index - 27])),
            31..=33 => Some(Tile::Dragon(Dragon::ALL[index - 31])),
            _ => None,
        }
    }

    pub const fn suit(self) -> Suit {
        match self {
            Tile::Man(_) => Suit::Man,
            Tile::Pin(_) => Suit::Pin,
            Tile::Sou(_) => Suit::Sou,
            Tile::Wind(_) => Suit::Wind,
            Tile::Dragon(_) => Suit::Dragon,
        }
    }

    /// Rank of a numbered tile.
    pub const fn number_rank(self) -> Option<u8> {
        match self {
            Tile::Man(r) | Tile::Pin(r) | Tile::Sou(r) => Some(r.get()),
            Tile::Wind(_) | Tile::Dragon(_) => None,
        }
    }

    /// Slot in the 34-kind count vector: man 0-8, pin 9-17, sou 18-26,
    /// winds 27-30, dragons 31-33.
    #[inline]
    pub const fn as_usize(self) -> usize {
        match self {
            Tile::Man(r) => r.get() as usize - 1,
            Tile::Pin(r) => 9 + r.get() as usize - 1,
            Tile::Sou(r) => 18 + r.get() as usize - 1,
            Tile::Wind(w) => 27 + w as usize,
            Tile::Dragon(d) => 31 + d as usize,
        }
    }

    #[inline]
    pub const fn is_honor(self) -> bool {
        matches!(self, Tile::Wind(_) | Tile::Dragon(_))
    }

    /// Numbered tile ranked 2-8.
    #[inline]
    pub const fn is_simple(self) -> bool {
        matches!(self.number_rank(), Some(2..=8))
    }

    /// Terminal or honor.
    #[inline]
    pub const fn is_yaokyuu(self) -> bool {
        !self.is_simple()
    }

    /// The rank part of the name token, e.g. `1` or `east`.
    pub fn rank_word(self) -> String {
        match self {
            Tile::Man(r) | Tile::Pin(r) | Tile::Sou(r) => r.get().to_string(),
            Tile::Wind(w) => w.as_str().to_owned(),
            Tile::Dragon(d) => d.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Man(r) | Tile::Pin(r) | Tile::Sou(r) => write!(f, "{}{}", self.suit().as_str(), r.get()),
            Tile::Wind(w) => write!(f, "wind_{}", w.as_str()),
            Tile::Dragon(d) => write!(f, "dragon_{}", d.as_str()),
        }
    }
}

impl FromStr for Tile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some((suit, word)) = s.split_once('_') {
            let tile = match suit {
                "wind" => Wind::from_word(word).map(Tile::Wind),
                "dragon" => Dragon::from_word(word).map(Tile::Dragon),
                _ => None,
            };
            return tile.ok_or_else(|| Error::invalid_tile(s));
        }

        if !s.is_ascii() || s.len() < 2 {
            return Err(Error::invalid_tile(s));
        }
        let (prefix, digit) = s.split_at(s.len() - 1);
        let suit = match prefix {
            "man" => Suit::Man,
            "pin" => Suit::Pin,
            "sou" => Suit::Sou,
            _ => return Err(Error::invalid_tile(s)),
        };
        match digit.as_bytes()[0] {
            b @ b'1'..=b'9' => Tile::number(suit, b - b'0').ok_or_else(|| Error::invalid_tile(s)),
            _ => Err(Error::invalid_tile(s)),
        }
    }
}

/// Read a compact tile string such as `234m 567p 9s 555z 12z`.
///
/// Honors use `z` with 1-4 for east/south/west/north and 5-7 for
/// white/green/red.
pub fn parse_tiles(s: &str) -> Result<Vec<Tile>> {
    if !s.is_ascii() {
        return Err(Error::invalid_tile(s));
    }

    let mut tiles = vec![];
    let mut stack = vec![];

    for b in s.as_bytes() {
        match b {
            b'1'..=b'9' => stack.push(b - b'0'),
            b'm' | b'p' | b's' | b'z' => {
                for n in stack.drain(..) {
                    let tile = match b {
                        b'm' => Tile::number(Suit::Man, n),
                        b'p' => Tile::number(Suit::Pin, n),
                        b's' => Tile::number(Suit::Sou, n),
                        _ => Tile::from_index(26 + n as usize),
                    };
                    tiles.push(tile.ok_or_else(|| Error::invalid_tile(s))?);
                }
            }
            _ if b.is_ascii_whitespace() || *b == b',' => (),
            _ => return Err(Error::invalid_tile(s)),
        }
    }
    if !stack.is_empty() {
        return Err(Error::invalid_tile(s));
    }

    Ok(tiles)
}

/// Inverse of [`parse_tiles`], grouped by suit in `(suit, rank)` order.
pub fn tiles_to_string(tiles: &[Tile]) -> String {
    let mut sorted = tiles.to_vec();
    sorted.sort_unstable();

    let mut out = String::new();
    let mut pending: Option<char> = None;
    for tile in sorted {
        let (digit, suffix) = match tile {
            Tile::Man(r) => (r.get(), 'm'),
            Tile::Pin(r) => (r.get(), 'p'),
            Tile::Sou(r) => (r.get(), 's'),
            _ => (tile.as_usize() as u8 - 26, 'z'),
        };
        if let Some(prev) = pending
            && prev != suffix
        {
            out.push(prev);
            out.push(' ');
        }
        out.push((b'0' + digit) as char);
        pending = Some(suffix);
    }
    if let Some(last) = pending {
        out.push(last);
    }
    out
}
