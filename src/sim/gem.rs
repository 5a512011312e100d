//! Gem kinds and the score table

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::KIND_COUNT;

/// Contents of a single board cell.
///
/// `Empty` sorts first; the colors follow in palette order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum GemKind {
    /// Vacated cell (after elimination, before refill)
    #[default]
    Empty,
    Red,
    Orange,
    Yellow,
    Green,
    White,
    Blue,
    Purple,
}

impl GemKind {
    /// Every non-empty color, in palette order
    pub const COLORS: [GemKind; KIND_COUNT] = [
        GemKind::Red,
        GemKind::Orange,
        GemKind::Yellow,
        GemKind::Green,
        GemKind::White,
        GemKind::Blue,
        GemKind::Purple,
    ];

    /// Points awarded for eliminating one gem of this kind
    pub const fn score(self) -> u64 {
        match self {
            GemKind::Empty => 0,
            GemKind::Red => 10,
            GemKind::Orange => 20,
            GemKind::Yellow => 15,
            GemKind::Green => 25,
            GemKind::White => 30,
            GemKind::Blue => 35,
            GemKind::Purple => 40,
        }
    }

    pub fn is_empty(self) -> bool {
        self == GemKind::Empty
    }

    /// Draw a uniformly random color (never `Empty`)
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::COLORS[rng.random_range(0..KIND_COUNT)]
    }

    /// Single-character glyph used by the text form of a board
    pub fn glyph(self) -> char {
        match self {
            GemKind::Empty => '.',
            GemKind::Red => 'R',
            GemKind::Orange => 'O',
            GemKind::Yellow => 'Y',
            GemKind::Green => 'G',
            GemKind::White => 'W',
            GemKind::Blue => 'B',
            GemKind::Purple => 'P',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph.to_ascii_uppercase() {
            '.' => Some(GemKind::Empty),
            'R' => Some(GemKind::Red),
            'O' => Some(GemKind::Orange),
            'Y' => Some(GemKind::Yellow),
            'G' => Some(GemKind::Green),
            'W' => Some(GemKind::White),
            'B' => Some(GemKind::Blue),
            'P' => Some(GemKind::Purple),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GemKind::Empty => "Empty",
            GemKind::Red => "Red",
            GemKind::Orange => "Orange",
            GemKind::Yellow => "Yellow",
            GemKind::Green => "Green",
            GemKind::White => "White",
            GemKind::Blue => "Blue",
            GemKind::Purple => "Purple",
        }
    }
}
