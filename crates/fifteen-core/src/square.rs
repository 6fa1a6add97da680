//! Position primitives: [`Square`], [`Direction`] and [`Tile`].
//!
//! The board is a fixed 4×4 grid. Columns and rows are 1-based: column 1
//! is leftmost, row 1 is topmost, so `4:4` is the bottom-right corner.

use std::fmt;
use std::str::FromStr;

use crate::board::MalformedBoard;

/// Side length of the board, in squares.
pub const SIDE: u8 = 4;

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A board coordinate: column `x` and row `y`, each in `1..=4`.
///
/// The range restriction is enforced at construction, so a `Square` is
/// always a real position on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    x: u8,
    y: u8,
}

impl Square {
    /// The bottom-right corner, empty in the solved board.
    pub const BOTTOM_RIGHT: Self = Self { x: SIDE, y: SIDE };

    /// Create a square from 1-based column and row. Returns `None` if
    /// either coordinate is off the board.
    #[inline]
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x >= 1 && x <= SIDE && y >= 1 && y <= SIDE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// The 1-based column, growing rightward.
    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// The 1-based row, growing downward.
    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Row-major index in `0..16`, used for flat board storage.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        ((self.y - 1) * SIDE + (self.x - 1)) as usize
    }

    /// The neighbouring square one step in `dir`, or `None` at the edge.
    #[inline]
    pub const fn step(self, dir: Direction) -> Option<Self> {
        let (dx, dy) = dir.delta();
        Self::new((self.x as i8 + dx) as u8, (self.y as i8 + dy) as u8)
    }

    /// The tile occupying this square in the solved board, or `None` for
    /// the bottom-right square, which is empty in the goal.
    #[inline]
    pub const fn solution_piece(self) -> Option<Tile> {
        if self.x == SIDE && self.y == SIDE {
            None
        } else {
            Some(Tile(SIDE * (self.y - 1) + self.x))
        }
    }

    /// Manhattan distance to another square.
    #[inline]
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) as u32 + self.y.abs_diff(other.y) as u32
    }

    /// Whether `other` is orthogonally adjacent (shares an edge).
    #[inline]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan(other) == 1
    }

    /// All 16 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (1..=SIDE).flat_map(|y| (1..=SIDE).map(move |x| Square { x, y }))
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Square {
    /// Row-major (reading) order: by row, then by column.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then_with(|| self.x.cmp(&other.x))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}

impl FromStr for Square {
    type Err = MalformedBoard;

    /// Parse the `"col:row"` exchange form, e.g. `"3:2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || MalformedBoard::BadSquareKey(s.to_string());
        let (x, y) = s.split_once(':').ok_or_else(bad)?;
        let x: u8 = x.parse().map_err(|_| bad())?;
        let y: u8 = y.parse().map_err(|_| bad())?;
        Square::new(x, y).ok_or_else(bad)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// A slide direction. Describes the motion of the tile itself, not of the
/// empty square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The reverse direction (Up↔Down, Left↔Right).
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit offset `(dx, dy)` in screen coordinates (y grows down).
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// A numbered tile piece. Valid boards only hold tiles `1..=15`; the range
/// is enforced where boards are constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile(pub u8);

impl Tile {
    /// Create a tile with the given number.
    #[inline]
    pub const fn new(n: u8) -> Self {
        Self(n)
    }

    /// The tile number.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The square this tile occupies in the solved board. Meaningful for
    /// tile numbers 1 through 15.
    #[inline]
    pub const fn home(self) -> Square {
        Square {
            x: (self.0 - 1) % SIDE + 1,
            y: (self.0 - 1) / SIDE + 1,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    /// Serializes as the `"col:row"` string form, so squares can key JSON
    /// maps directly.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a \"col:row\" square string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Square, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}
